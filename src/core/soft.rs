use super::SchedulingState;
use crate::types::{Crn, LARGE_COURSE_THRESHOLD, SchedulingDataset, SchedulingParams, EARLY_WEEK_CUTOFF};

/// Soft-penalty tuple for lexicographic comparison when choosing a slot.
/// Lower is better in every component (spec.md §4.6).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SoftPenalty {
    pub large_course_late: u32,
    pub back_to_back_students: u32,
    pub back_to_back_instructors: u32,
    pub instructor_load: u32,
    pub slot_seat_load: u32,
    pub slot_exam_count: u32,
}

pub type SoftKey = (u32, u32, u32, u32, u32, u32, u8, u8);

impl SoftPenalty {
    pub fn as_tuple(&self, day: u8, block: u8) -> SoftKey {
        (
            self.large_course_late,
            self.back_to_back_students,
            self.back_to_back_instructors,
            self.instructor_load,
            self.slot_seat_load,
            self.slot_exam_count,
            day,
            block,
        )
    }
}

/// Evaluates the soft-penalty tuple for a candidate placement. Reads only
/// from `state` and `dataset`; never mutates (spec.md §4.6).
pub struct SoftConstraintEvaluator;

impl SoftConstraintEvaluator {
    pub fn evaluate(
        dataset: &SchedulingDataset,
        state: &SchedulingState,
        params: &SchedulingParams,
        crn: &Crn,
        day: u8,
        block: u8,
    ) -> SoftPenalty {
        let enrollment = dataset.enrollment(crn);
        Self::evaluate_group(dataset, state, params, std::slice::from_ref(crn), enrollment, day, block)
    }

    /// Group form used for merge groups (spec.md §4.3: "treating the section
    /// and all its merged siblings as being placed at (d,b)"). `enrollment`
    /// is the group's effective (summed) enrollment rather than any one
    /// member's; `back_to_back`/`instructor_load` sum each member's own
    /// contribution, and the slot-level components are read once since they
    /// describe the slot itself, not any one member.
    pub fn evaluate_group(
        dataset: &SchedulingDataset,
        state: &SchedulingState,
        params: &SchedulingParams,
        members: &[Crn],
        enrollment: u32,
        day: u8,
        block: u8,
    ) -> SoftPenalty {
        let mut penalty = SoftPenalty::default();

        if enrollment >= LARGE_COURSE_THRESHOLD {
            let days_late = (day as i32) - (EARLY_WEEK_CUTOFF as i32) + 1;
            let days_late = days_late.max(0) as u32;
            penalty.large_course_late = days_late * params.w_large_late;
        }

        let mut b2b_students = 0u32;
        let mut b2b_instructors = 0u32;
        let mut instructor_load = 0u32;

        for member in members {
            for student_id in dataset.students_of(member) {
                let has_adjacent = state
                    .student_schedule
                    .get(student_id)
                    .map(|slots| {
                        slots
                            .iter()
                            .any(|&(d, b)| d == day && (b + 1 == block || b == block + 1))
                    })
                    .unwrap_or(false);
                if has_adjacent {
                    b2b_students += 1;
                }
            }

            for instructor in dataset.instructors_of(member) {
                let has_adjacent = state
                    .instructor_schedule
                    .get(instructor)
                    .map(|slots| {
                        slots
                            .iter()
                            .any(|&(d, b)| d == day && (b + 1 == block || b == block + 1))
                    })
                    .unwrap_or(false);
                if has_adjacent {
                    b2b_instructors += 1;
                }

                if let Some(slots) = state.instructor_schedule.get(instructor) {
                    instructor_load += slots.iter().filter(|&&(d, _)| d == day).count() as u32;
                }
            }
        }

        penalty.back_to_back_students = b2b_students * params.w_b2b_student;
        penalty.back_to_back_instructors = b2b_instructors * params.w_b2b_instructor;
        penalty.instructor_load = instructor_load;

        let slot = (day, block);
        penalty.slot_seat_load = state.slot_seat_load.get(&slot).copied().unwrap_or(0);
        penalty.slot_exam_count = state.slot_exam_count.get(&slot).copied().unwrap_or(0);

        penalty
    }
}
