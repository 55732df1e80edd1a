//! Bounded FIFO evidence ledger for decomposition audit trails.
//!
//! The engines themselves stay pure; hosts and the conformance harness
//! wrap each boundary call with [`record_outcome`] and serialize the
//! ledger to JSONL for offline inspection.

use std::collections::VecDeque;

use serde::Serialize;

use crate::DecompositionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationOutcome {
    Success,
    Failure,
}

/// Record of a single boundary operation invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationEvidenceEntry {
    pub operation: &'static str,
    pub shape: (usize, usize),
    pub strategy: Option<&'static str>,
    pub outcome: OperationOutcome,
    pub detail: String,
}

/// Bounded FIFO evidence buffer recording decomposition outcomes.
///
/// Capacity is clamped to a minimum of one entry. When full, the oldest
/// entry is evicted before a new entry is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecompositionLedger {
    capacity: usize,
    entries: VecDeque<OperationEvidenceEntry>,
}

impl DecompositionLedger {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
        }
    }

    /// Append an entry, evicting the oldest if at capacity.
    pub fn record(&mut self, entry: OperationEvidenceEntry) {
        if self.entries.len() == self.capacity {
            let _ = self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently recorded entry.
    #[must_use]
    pub fn latest(&self) -> Option<&OperationEvidenceEntry> {
        self.entries.back()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperationEvidenceEntry> {
        self.entries.iter()
    }

    /// One JSON object per line, oldest first.
    pub fn serialize_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&serde_json::to_string(entry)?);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Records the outcome of one boundary call; errors keep their display
/// form in `detail`.
pub fn record_outcome<T>(
    ledger: &mut DecompositionLedger,
    operation: &'static str,
    shape: (usize, usize),
    strategy: Option<&'static str>,
    result: &Result<T, DecompositionError>,
) {
    let (outcome, detail) = match result {
        Ok(_) => (OperationOutcome::Success, String::new()),
        Err(err) => (OperationOutcome::Failure, err.to_string()),
    };
    ledger.record(OperationEvidenceEntry {
        operation,
        shape,
        strategy,
        outcome,
        detail,
    });
}
