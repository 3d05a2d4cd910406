use super::{Crn, InstructorId, RoomId, Slot};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Kind of hard-constraint violation (spec.md §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictKind {
    StudentDoubleBook,
    StudentGtMaxPerDay,
    InstructorDoubleBook,
    InstructorGtMaxPerDay,
}

/// A single detected hard-constraint violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub entity_id: String,
    pub crn: Crn,
    pub conflicting_crn: Option<Crn>,
    pub day: u8,
    pub block: u8,
}

/// Complete output of the scheduling algorithm (spec.md §6).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub assignments: HashMap<Crn, Slot>,
    pub room_assignments: HashMap<Crn, RoomId>,
    pub conflicts: Vec<Conflict>,
    pub colors: HashMap<Crn, u32>,
    pub unscheduled_merges: HashSet<String>,

    /// Room assignments produced by a capacity-deficit fallback
    /// (spec.md §4.5/§7 "recording invalid=true on the assignment").
    pub invalid_room_assignments: HashSet<Crn>,

    // Diagnostic metadata used by reporters/downstream formatters.
    pub course_sizes: HashMap<Crn, u32>,
    pub course_codes: HashMap<Crn, String>,
    pub room_capacities: HashMap<RoomId, u32>,
    pub instructors_by_section: HashMap<Crn, HashSet<InstructorId>>,
}

impl ScheduleResult {
    /// Every CRN present anywhere in a non-unscheduled merge group, plus
    /// every solo CRN, that ended up assigned.
    pub fn is_assigned(&self, crn: &Crn) -> bool {
        self.assignments.contains_key(crn)
    }
}
