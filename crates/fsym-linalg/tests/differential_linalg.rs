//! Differential oracle, metamorphic relation, and adversarial tests for
//! the decomposition engines.
//!
//! Oracle values are hand-computed; relations come from matrix algebra
//! identities. Everything is compared with exact equality; there are no
//! tolerances anywhere in this suite.

use fsym_linalg::{
    DecompositionError, charpoly, det, diagonalize, eigenpairs, eigenvalues, inverse, lu,
    null_space_basis, qr, rank, rref, spectral_decompose,
};
use fsym_matrix::Matrix;
use fsym_scalar::{ExactScalar, Number, Polynomial};

fn matrix(rows: &[&[&str]]) -> Matrix {
    Matrix::parse_rows(rows).expect("well-formed literal")
}

fn scalar(literal: &str) -> ExactScalar {
    fsym_scalar::parse_scalar(literal).expect("well-formed literal")
}

// ═══════════════════════════════════════════════════════════════════
// §1  Differential oracles (hand-computed exact values)
// ═══════════════════════════════════════════════════════════════════

#[test]
fn diff_rref_of_a_rank_two_system() {
    let m = matrix(&[&["1", "2", "1", "1"], &["2", "4", "0", "4"], &["3", "6", "1", "5"]]);
    let result = rref(&m).expect("rref");
    assert_eq!(
        result.rref,
        matrix(&[&["1", "2", "0", "2"], &["0", "0", "1", "-1"], &["0", "0", "0", "0"]])
    );
    assert_eq!(result.pivot_columns, vec![0, 2]);
    assert_eq!(rank(&m).expect("rank"), 2);
    assert_eq!(null_space_basis(&m).expect("basis").len(), 2);
}

#[test]
fn diff_det_of_a_fractional_matrix() {
    // [[1, 1/2], [1/2, 1/3]] has det 1/3 - 1/4 = 1/12.
    let m = matrix(&[&["1", "1/2"], &["1/2", "1/3"]]);
    assert_eq!(det(&m).expect("det"), scalar("1/12"));
}

#[test]
fn diff_inverse_of_a_two_by_two() {
    let m = matrix(&[&["2", "1"], &["1", "1"]]);
    let inv = inverse(&m).expect("inverse");
    assert_eq!(inv, matrix(&[&["1", "-1"], &["-1", "2"]]));
}

#[test]
fn diff_charpoly_of_a_three_by_three() {
    // [[1,2,0],[2,1,0],[0,0,3]]: blocks give (λ²-2λ-3)(λ-3) = λ³-5λ²+3λ+9.
    let m = matrix(&[&["1", "2", "0"], &["2", "1", "0"], &["0", "0", "3"]]);
    let p = charpoly(&m).expect("charpoly");
    let expected = Polynomial::new(
        [9i64, 3, -5, 1]
            .iter()
            .map(|&c| Number::from_integer(c))
            .collect(),
    );
    assert_eq!(p, expected);
}

#[test]
fn diff_golden_ratio_spectrum_of_the_fibonacci_matrix() {
    // [[1,1],[1,0]] has eigenvalues (1 ± √5)/2.
    let m = matrix(&[&["1", "1"], &["1", "0"]]);
    let values = eigenvalues(&m).expect("eigenvalues");
    let phi = scalar("(1 + sqrt(5)) / 2");
    let psi = scalar("(1 - sqrt(5)) / 2");
    let found: Vec<_> = values
        .iter()
        .map(|e| ExactScalar::from_number(e.value.clone()))
        .collect();
    assert!(found.contains(&phi));
    assert!(found.contains(&psi));
}

#[test]
fn diff_lu_of_a_three_by_three() {
    let m = matrix(&[&["4", "3", "2"], &["8", "7", "9"], &["12", "13", "21"]]);
    let factors = lu(&m).expect("lu");
    assert_eq!(factors.l, matrix(&[&["1", "0", "0"], &["2", "1", "0"], &["3", "4", "1"]]));
    assert_eq!(factors.u, matrix(&[&["4", "3", "2"], &["0", "1", "5"], &["0", "0", "-5"]]));
}

#[test]
fn diff_qr_of_a_pythagorean_matrix() {
    // First column (3, 4) has norm 5; everything stays rational.
    let m = matrix(&[&["3", "-1"], &["4", "3"]]);
    let factors = qr(&m).expect("qr");
    assert_eq!(factors.q, matrix(&[&["3/5", "-4/5"], &["4/5", "3/5"]]));
    assert_eq!(factors.r, matrix(&[&["5", "9/5"], &["0", "13/5"]]));
}

#[test]
fn diff_spectral_decomposition_of_the_exchange_matrix() {
    // [[0,1],[1,0]]: eigenvalues ±1, eigenvectors (1,±1)/√2.
    let m = matrix(&[&["0", "1"], &["1", "0"]]);
    let result = spectral_decompose(&m).expect("spectral");
    let gram = result.p.conjugate_transpose().mul(&result.p).expect("shapes");
    assert_eq!(gram, Matrix::identity(2));
    let reconstructed = result
        .p
        .mul(&result.d)
        .expect("shapes")
        .mul(&result.p.conjugate_transpose())
        .expect("shapes");
    assert_eq!(reconstructed, m);
}

#[test]
fn diff_engines_accept_radical_and_complex_literals() {
    let m = matrix(&[&["sqrt(2)", "0"], &["0", "sqrt(8)"]]);
    assert_eq!(det(&m).expect("det"), scalar("4"));
    let gaussian = matrix(&[&["i", "0"], &["0", "-i"]]);
    assert_eq!(det(&gaussian).expect("det"), scalar("1"));
}

// ═══════════════════════════════════════════════════════════════════
// §2  Metamorphic relations
// ═══════════════════════════════════════════════════════════════════

#[test]
fn meta_cayley_hamilton() {
    // p(A) = 0 for the characteristic polynomial p.
    let m = matrix(&[&["1", "2", "-1"], &["0", "3", "1"], &["2", "0", "1"]]);
    let p = charpoly(&m).expect("charpoly");
    let mut acc = Matrix::zeros(3, 3);
    let mut power = Matrix::identity(3);
    for k in 0..=p.degree() {
        let term = power.scale(&ExactScalar::from_number(p.coeff(k)));
        acc = acc.add(&term).expect("shapes");
        if k < p.degree() {
            power = power.mul(&m).expect("shapes");
        }
    }
    assert_eq!(acc, Matrix::zeros(3, 3));
}

#[test]
fn meta_det_of_inverse_is_reciprocal() {
    let m = matrix(&[&["3", "1"], &["2", "4"]]);
    let d = det(&m).expect("det");
    let d_inv = det(&inverse(&m).expect("inverse")).expect("det");
    assert_eq!(&d * &d_inv, ExactScalar::one());
}

#[test]
fn meta_inverse_antidistributes_over_products() {
    let a = matrix(&[&["1", "1"], &["0", "2"]]);
    let b = matrix(&[&["2", "1"], &["1", "1"]]);
    let lhs = inverse(&a.mul(&b).expect("shapes")).expect("inverse");
    let rhs = inverse(&b)
        .expect("inverse")
        .mul(&inverse(&a).expect("inverse"))
        .expect("shapes");
    assert_eq!(lhs, rhs);
}

#[test]
fn meta_gram_matrix_preserves_rank() {
    let m = matrix(&[&["1", "2"], &["2", "4"], &["0", "1"]]);
    let gram = m.transpose().mul(&m).expect("shapes");
    assert_eq!(rank(&gram).expect("rank"), rank(&m).expect("rank"));
}

#[test]
fn meta_diagonalization_reconstructs_through_the_inverse() {
    let m = matrix(&[&["4", "1"], &["2", "3"]]);
    let result = diagonalize(&m).expect("diagonalize");
    let p_inv = inverse(&result.p).expect("P invertible");
    let reconstructed = result
        .p
        .mul(&result.d)
        .expect("shapes")
        .mul(&p_inv)
        .expect("shapes");
    assert_eq!(reconstructed, m);
}

#[test]
fn meta_eigenpair_multiplicity_bounds() {
    let m = matrix(&[&["2", "1", "0"], &["0", "2", "0"], &["0", "0", "5"]]);
    let pairs = eigenpairs(&m).expect("pairs");
    for pair in &pairs {
        assert!(pair.basis.len() >= 1);
        assert!(pair.basis.len() <= pair.eigenvalue.algebraic_multiplicity);
    }
    let algebraic_total: usize = pairs
        .iter()
        .map(|pair| pair.eigenvalue.algebraic_multiplicity)
        .sum();
    assert_eq!(algebraic_total, 3);
}

#[test]
fn meta_symbolic_determinant_matches_substituted_determinant() {
    let symbolic = matrix(&[&["x", "1", "0"], &["1", "x", "1"], &["0", "1", "x"]]);
    let d = det(&symbolic).expect("det");
    let at_two = matrix(&[&["2", "1", "0"], &["1", "2", "1"], &["0", "1", "2"]]);
    assert_eq!(
        ExactScalar::from_number(d.substitute(&Number::from_integer(2))),
        det(&at_two).expect("det")
    );
}

// ═══════════════════════════════════════════════════════════════════
// §3  Adversarial inputs and failure propagation
// ═══════════════════════════════════════════════════════════════════

#[test]
fn adv_non_square_failures_name_the_shape() {
    let m = matrix(&[&["1", "2", "3"], &["4", "5", "6"]]);
    let expected = Err(DecompositionError::StructuralMismatch { rows: 2, cols: 3 });
    assert_eq!(det(&m), expected.clone().map(|()| ExactScalar::zero()));
    assert_eq!(charpoly(&m).err(), expected.clone().err());
    assert_eq!(lu(&m).err(), expected.clone().err());
    assert_eq!(diagonalize(&m).err(), expected.err());
    // Shape-agnostic engines still succeed on the same input.
    assert_eq!(rank(&m).expect("rank"), 2);
}

#[test]
fn adv_failures_do_not_poison_other_engines() {
    let singular = matrix(&[&["1", "2"], &["2", "4"]]);
    assert_eq!(inverse(&singular), Err(DecompositionError::SingularMatrix));
    assert_eq!(qr(&singular), Err(DecompositionError::SingularMatrix));
    // The same matrix still ranks, factors, and diagonalizes.
    assert_eq!(rank(&singular).expect("rank"), 1);
    assert!(eigenvalues(&singular).is_ok());
    assert!(diagonalize(&singular).is_ok());
}

#[test]
fn adv_closure_exits_are_reported_not_approximated() {
    // Companion of λ³ - 2: eigenvalues are cube roots.
    let m = matrix(&[&["0", "0", "2"], &["1", "0", "0"], &["0", "1", "0"]]);
    assert_eq!(
        eigenvalues(&m),
        Err(DecompositionError::UnsupportedRootForm { degree: 3 })
    );
    assert_eq!(
        diagonalize(&m).err(),
        Some(DecompositionError::UnsupportedRootForm { degree: 3 })
    );
    // The polynomial itself is still exactly computable.
    assert!(charpoly(&m).is_ok());
}

#[test]
fn adv_zero_matrix_is_well_behaved_everywhere() {
    let zero = Matrix::zeros(2, 2);
    assert_eq!(rank(&zero).expect("rank"), 0);
    assert_eq!(det(&zero).expect("det"), ExactScalar::zero());
    assert_eq!(inverse(&zero), Err(DecompositionError::SingularMatrix));
    assert_eq!(lu(&zero), Err(DecompositionError::ZeroPivotEncountered { step: 0 }));
    let result = diagonalize(&zero).expect("diagonalize");
    assert_eq!(result.d, Matrix::zeros(2, 2));
}
