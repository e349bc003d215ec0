//! Call budget errors.

/// Raised when a write would be recorded against an exhausted quota.
///
/// The sequencer checks the quota before every unit of work, so this only
/// surfaces if that bookkeeping is broken.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Budget Error: quota of {} calls already spent at line {} in {}", initial, line, file)]
pub struct BudgetError {
    /// Quota the run started with
    pub initial: u32,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl BudgetError {
    /// Create a new BudgetError at the current location.
    #[track_caller]
    pub fn exhausted(initial: u32) -> Self {
        let location = std::panic::Location::caller();
        Self {
            initial,
            line: location.line(),
            file: location.file(),
        }
    }
}
