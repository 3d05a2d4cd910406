use thiserror::Error;

/// Domain-specific errors for the exam scheduler.
///
/// Only three kinds exist by design: eager input validation, internal
/// contract violations, and I/O/parse failures at the ingest boundary.
/// Placement infeasibility is never an error — it is recorded in
/// `ScheduleResult::conflicts` and `unscheduled_merges` instead.
#[derive(Error, Debug)]
pub enum SchedulerError {
    // Input/parse errors (ingest boundary, not part of the core contract)
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    // InvalidInput (spec.md §7.1) — dataset contradicts stated invariants
    #[error("CRN '{crn}' appears in multiple merge groups: '{first_group}' and '{second_group}'")]
    CrnInMultipleMergeGroups {
        crn: String,
        first_group: String,
        second_group: String,
    },

    #[error("Merge group '{0}' is empty")]
    EmptyMergeGroup(String),

    #[error("Merge group '{0}' needs at least two CRNs")]
    MergeGroupTooSmall(String),

    #[error("Merge group '{group}' references unknown CRN '{crn}'")]
    UnknownCrnInMergeGroup { group: String, crn: String },

    #[error("Duplicate {id_type} id: '{id}'")]
    DuplicateId { id_type: String, id: String },

    #[error("Invalid scheduling parameter: {0}")]
    InvalidParams(String),

    // ProgrammerError (spec.md §7.2) — internal contract violation
    #[error("programmer error: {0}")]
    ProgrammerError(String),
}

/// Use anyhow::Result at application boundaries, as the teacher crate does.
pub type Result<T> = anyhow::Result<T>;
