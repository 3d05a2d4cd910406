use super::{Crn, StudentId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A student and the sections they are enrolled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub student_id: StudentId,
    #[serde(default)]
    pub enrolled_sections: HashSet<Crn>,
}
