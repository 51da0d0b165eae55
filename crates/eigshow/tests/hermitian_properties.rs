use eigshow::{
    decompose, decompose_backend, diagnose, verify, Backend, SolverOpts, Tolerances,
};
use nalgebra::DMatrix;
use num_complex::Complex64;
use proptest::prelude::*;

fn symmetric(n: usize, entries: &[f64]) -> DMatrix<f64> {
    let raw = DMatrix::from_column_slice(n, n, &entries[..n * n]);
    (&raw + raw.transpose()) * 0.5
}

fn hermitian(n: usize, re: &[f64], im: &[f64]) -> DMatrix<Complex64> {
    let raw = DMatrix::from_fn(n, n, |row, col| {
        Complex64::new(re[row * n + col], im[row * n + col])
    });
    (&raw + raw.adjoint()) * Complex64::new(0.5, 0.0)
}

fn entries() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-5.0f64..5.0, 36)
}

proptest! {
    #[test]
    fn symmetric_decomposition_laws(n in 1usize..7, values in entries()) {
        let matrix = symmetric(n, &values);
        let result = decompose(&matrix).unwrap();
        prop_assert!(result.eigenvalues.as_slice().windows(2).all(|pair| pair[0] <= pair[1]));

        let diag = diagnose(&matrix, &result).unwrap();
        prop_assert!(diag.within(&Tolerances::default()), "{:?}", diag);

        let form = verify(&matrix, &result).unwrap();
        for i in 0..n {
            prop_assert!((form[(i, i)] - result.eigenvalues[i]).abs() < 1e-9);
            for j in (0..n).filter(|&j| j != i) {
                prop_assert!(form[(i, j)].abs() < 1e-9);
            }
        }
    }

    #[test]
    fn backends_agree_on_symmetric_spectra(n in 1usize..7, values in entries()) {
        let matrix = symmetric(n, &values);
        let promoted = matrix.map(|value| Complex64::new(value, 0.0));
        let reference = decompose(&matrix).unwrap();
        let result = decompose_backend(&matrix, Backend::Faer, &SolverOpts::default()).unwrap();
        prop_assert_eq!(result.backend, Backend::Faer);
        prop_assert!(diagnose(&promoted, &result).unwrap().within(&Tolerances::default()));
        for (a, b) in reference.eigenvalues.iter().zip(result.eigenvalues.iter()) {
            prop_assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn hermitian_decomposition_laws(n in 1usize..7, re in entries(), im in entries()) {
        let matrix = hermitian(n, &re, &im);
        let result = decompose(&matrix).unwrap();
        prop_assert!(result.eigenvalues.as_slice().windows(2).all(|pair| pair[0] <= pair[1]));

        for i in 0..n {
            let v = result.eigenvectors.column(i);
            let residual = &matrix * v - v * Complex64::new(result.eigenvalues[i], 0.0);
            prop_assert!(residual.iter().all(|value| value.norm() < 1e-9));
            for j in 0..n {
                let overlap = v.dotc(&result.eigenvectors.column(j));
                let expected = if i == j { 1.0 } else { 0.0 };
                prop_assert!((overlap - Complex64::new(expected, 0.0)).norm() < 1e-9);
            }
        }
        prop_assert!(diagnose(&matrix, &result).unwrap().within(&Tolerances::default()));
    }
}
