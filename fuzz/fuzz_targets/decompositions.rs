#![no_main]

use arbitrary::Arbitrary;
use fsym_linalg::{
    charpoly, det, diagonalize, eigenpairs, inverse, lu, null_space_basis, qr, rank, rref,
    spectral_decompose,
};
use fsym_matrix::Matrix;
use fsym_scalar::ExactScalar;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct DecompositionInput {
    rows: u8,
    cols: u8,
    values: Vec<i8>,
}

fuzz_target!(|input: DecompositionInput| {
    let rows = 1 + usize::from(input.rows % 4);
    let cols = 1 + usize::from(input.cols % 4);
    let matrix = Matrix::from_fn(rows, cols, |r, c| {
        let value = input.values.get(r * cols + c).copied().unwrap_or_default();
        ExactScalar::from_integer(i64::from(value))
    });

    let _ = rank(&matrix);
    let _ = rref(&matrix);
    let _ = null_space_basis(&matrix);
    let _ = det(&matrix);
    let _ = charpoly(&matrix);
    let _ = eigenpairs(&matrix);
    let _ = spectral_decompose(&matrix);

    if let Ok(inv) = inverse(&matrix) {
        assert_eq!(matrix.mul(&inv).expect("shapes"), Matrix::identity(rows));
    }
    if let Ok(factors) = lu(&matrix) {
        assert_eq!(factors.l.mul(&factors.u).expect("shapes"), matrix);
    }
    if let Ok(factors) = qr(&matrix) {
        assert_eq!(factors.q.mul(&factors.r).expect("shapes"), matrix);
    }
    if let Ok(result) = diagonalize(&matrix) {
        assert_eq!(
            matrix.mul(&result.p).expect("shapes"),
            result.p.mul(&result.d).expect("shapes")
        );
    }
});
