#![forbid(unsafe_code)]

//! End-to-end harness around the decomposition engines.
//!
//! [`MatrixReport::compute`] runs every boundary operation on one matrix
//! and keeps each outcome independently, so a failure in one engine never
//! hides the results of another. The summary and ledger hooks turn a
//! report into the serializable forms the suites archive.

pub mod fixtures;

use fsym_linalg::{
    DecompositionLedger, DecompositionResult, DetStrategy, Diagonalization, Eigenpair, Eigenvalue,
    LuFactors, QrFactors, RrefResult, adjugate, charpoly, det, det_strategy, diagonalize,
    eigenpairs, eigenvalues, inverse, lu, null_space_basis, qr, rank, record_outcome, rref,
    spectral_decompose,
};
use fsym_matrix::Matrix;
use fsym_scalar::{ExactScalar, Polynomial};

/// One `Result` per boundary operation, all computed from the same input.
#[derive(Debug, Clone)]
pub struct MatrixReport {
    pub shape: (usize, usize),
    pub det_strategy: DetStrategy,
    pub rank: DecompositionResult<usize>,
    pub rref: DecompositionResult<RrefResult>,
    pub null_space: DecompositionResult<Vec<Matrix>>,
    pub det: DecompositionResult<ExactScalar>,
    pub adjugate: DecompositionResult<Matrix>,
    pub inverse: DecompositionResult<Matrix>,
    pub charpoly: DecompositionResult<Polynomial>,
    pub eigenvalues: DecompositionResult<Vec<Eigenvalue>>,
    pub eigenpairs: DecompositionResult<Vec<Eigenpair>>,
    pub diagonalization: DecompositionResult<Diagonalization>,
    pub lu: DecompositionResult<LuFactors>,
    pub qr: DecompositionResult<QrFactors>,
    pub spectral: DecompositionResult<Diagonalization>,
}

impl MatrixReport {
    /// Runs all engines on `matrix`. Square-only engines report their own
    /// structural failures; nothing here short-circuits.
    #[must_use]
    pub fn compute(matrix: &Matrix) -> Self {
        Self {
            shape: matrix.shape(),
            det_strategy: det_strategy(matrix),
            rank: rank(matrix),
            rref: rref(matrix),
            null_space: null_space_basis(matrix),
            det: det(matrix),
            adjugate: adjugate(matrix),
            inverse: inverse(matrix),
            charpoly: charpoly(matrix),
            eigenvalues: eigenvalues(matrix),
            eigenpairs: eigenpairs(matrix),
            diagonalization: diagonalize(matrix),
            lu: lu(matrix),
            qr: qr(matrix),
            spectral: spectral_decompose(matrix),
        }
    }

    /// `(operation, "ok" | error display)` pairs in engine order.
    #[must_use]
    pub fn outcome_summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("rank", describe(&self.rank)),
            ("rref", describe(&self.rref)),
            ("null_space", describe(&self.null_space)),
            ("det", describe(&self.det)),
            ("adjugate", describe(&self.adjugate)),
            ("inverse", describe(&self.inverse)),
            ("charpoly", describe(&self.charpoly)),
            ("eigenvalues", describe(&self.eigenvalues)),
            ("eigenpairs", describe(&self.eigenpairs)),
            ("diagonalize", describe(&self.diagonalization)),
            ("lu", describe(&self.lu)),
            ("qr", describe(&self.qr)),
            ("spectral_decompose", describe(&self.spectral)),
        ]
    }

    /// The summary as a JSON array of `[operation, outcome]` pairs.
    pub fn summary_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.outcome_summary())
    }

    /// Number of operations that succeeded.
    #[must_use]
    pub fn successes(&self) -> usize {
        self.outcome_summary()
            .iter()
            .filter(|(_, outcome)| outcome == "ok")
            .count()
    }

    /// Appends one ledger entry per operation, in engine order. Only the
    /// determinant records a strategy.
    pub fn record_into(&self, ledger: &mut DecompositionLedger) {
        record_outcome(ledger, "rank", self.shape, None, &self.rank);
        record_outcome(ledger, "rref", self.shape, None, &self.rref);
        record_outcome(ledger, "null_space", self.shape, None, &self.null_space);
        record_outcome(
            ledger,
            "det",
            self.shape,
            Some(self.det_strategy.as_str()),
            &self.det,
        );
        record_outcome(ledger, "adjugate", self.shape, None, &self.adjugate);
        record_outcome(ledger, "inverse", self.shape, None, &self.inverse);
        record_outcome(ledger, "charpoly", self.shape, None, &self.charpoly);
        record_outcome(ledger, "eigenvalues", self.shape, None, &self.eigenvalues);
        record_outcome(ledger, "eigenpairs", self.shape, None, &self.eigenpairs);
        record_outcome(ledger, "diagonalize", self.shape, None, &self.diagonalization);
        record_outcome(ledger, "lu", self.shape, None, &self.lu);
        record_outcome(ledger, "qr", self.shape, None, &self.qr);
        record_outcome(ledger, "spectral_decompose", self.shape, None, &self.spectral);
    }
}

fn describe<T>(result: &DecompositionResult<T>) -> String {
    match result {
        Ok(_) => String::from("ok"),
        Err(err) => err.to_string(),
    }
}
