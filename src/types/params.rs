use crate::error::{Result, SchedulerError};
use serde::{Deserialize, Serialize};

/// Immutable scheduling parameters (spec.md §6).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SchedulingParams {
    pub max_days: u8,
    pub student_max_per_day: u32,
    pub instructor_max_per_day: u32,
    pub w_large_late: u32,
    pub w_b2b_student: u32,
    pub w_b2b_instructor: u32,
    pub prioritize_large_courses: bool,
}

impl Default for SchedulingParams {
    fn default() -> Self {
        Self {
            max_days: 7,
            student_max_per_day: 2,
            instructor_max_per_day: 2,
            w_large_late: 1,
            w_b2b_student: 6,
            w_b2b_instructor: 2,
            prioritize_large_courses: false,
        }
    }
}

impl SchedulingParams {
    /// Eager range check (spec.md §7.1 InvalidInput); called before phase A.
    pub fn validate(&self) -> Result<()> {
        if self.max_days == 0 || self.max_days > 7 {
            return Err(SchedulerError::InvalidParams(format!(
                "max_days must be in 1..=7, got {}",
                self.max_days
            ))
            .into());
        }
        if self.student_max_per_day == 0 {
            return Err(SchedulerError::InvalidParams(
                "student_max_per_day must be positive".to_string(),
            )
            .into());
        }
        if self.instructor_max_per_day == 0 {
            return Err(SchedulerError::InvalidParams(
                "instructor_max_per_day must be positive".to_string(),
            )
            .into());
        }
        if self.w_large_late == 0 {
            return Err(SchedulerError::InvalidParams("w_large_late must be positive".to_string()).into());
        }
        if self.w_b2b_student == 0 {
            return Err(SchedulerError::InvalidParams("w_b2b_student must be positive".to_string()).into());
        }
        if self.w_b2b_instructor == 0 {
            return Err(SchedulerError::InvalidParams("w_b2b_instructor must be positive".to_string()).into());
        }
        Ok(())
    }
}
