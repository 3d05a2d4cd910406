use super::{Crn, InstructorId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single course offering that receives one exam slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub crn: Crn,
    pub course_code: String,
    pub enrollment: u32,
    #[serde(default)]
    pub instructors: HashSet<InstructorId>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub exam_term: Option<String>,
}
