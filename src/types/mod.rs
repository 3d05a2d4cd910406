mod dataset;
mod merge;
mod params;
mod result;
mod room;
mod section;
mod slot;
mod student;

pub use dataset::*;
pub use merge::*;
pub use params::*;
pub use result::*;
pub use room::*;
pub use section::*;
pub use slot::*;
pub use student::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Newtype for a course registration number — the opaque key identifying a section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Crn(pub String);

impl fmt::Display for Crn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Crn {
    fn from(s: &str) -> Self {
        Crn(s.to_string())
    }
}

/// Newtype for a student identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StudentId {
    fn from(s: &str) -> Self {
        StudentId(s.to_string())
    }
}

/// Newtype for an instructor identifier (name or id, as supplied by the host).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstructorId(pub String);

impl fmt::Display for InstructorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for InstructorId {
    fn from(s: &str) -> Self {
        InstructorId(s.to_string())
    }
}

/// Newtype for a room identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub String);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        RoomId(s.to_string())
    }
}
