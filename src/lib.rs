//! exam-scheduler — conflict-graph-based university final-exam scheduler.
//!
//! # Algorithm overview
//!
//! The core is a five-phase pipeline over an already-normalized
//! [`types::SchedulingDataset`]:
//! 1. **ConflictGraphBuilder** ([`core::ConflictGraphBuilder`]): builds an
//!    undirected graph of shared-student/shared-instructor conflicts.
//! 2. **Colorer** ([`core::Colorer`]): DSATUR greedy coloring, with merge
//!    groups forcibly equalized after coloring.
//! 3. **SlotAssigner** ([`core::SlotAssigner`]): places each section at the
//!    slot minimizing (hard-conflict-count, soft-penalty-tuple).
//! 4. **RoomAssigner** ([`core::RoomAssigner`]): smallest-fit-first room
//!    assignment per slot.
//! 5. **Analyzer** ([`core::Analyzer`]): re-derives hard and soft violations
//!    from the final assignment.
//!
//! # Example
//!
//! ```no_run
//! use exam_scheduler::parser::load_input_from_dir;
//! use exam_scheduler::core::{schedule_exams, Analyzer};
//! use std::path::Path;
//!
//! let input = load_input_from_dir(Path::new("./data/demo")).unwrap();
//! let result = schedule_exams(&input.dataset, &input.merges, &input.params).unwrap();
//! let analysis = Analyzer::analyze(&result, &input.dataset, &input.merges, &input.params);
//! println!("Hard conflicts: {}", analysis.statistics.hard_conflict_count());
//! println!("Unplaced exams: {}", analysis.statistics.unplaced_exams);
//! ```

pub mod core;
pub mod error;
pub mod parser;
pub mod reporter;
pub mod types;

pub use error::{Result, SchedulerError};
