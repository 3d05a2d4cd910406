mod json;
mod markdown;
mod text;

pub use json::*;
pub use markdown::*;
pub use text::*;

use crate::types::{day_name, Crn, InstructorId, ScheduleResult, SchedulingDataset, StudentId};

/// Course code for a crn, falling back to "Unknown" for a crn the result
/// never recorded metadata for.
pub(crate) fn course_code_of(result: &ScheduleResult, crn: &Crn) -> String {
    result
        .course_codes
        .get(crn)
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string())
}

/// One entry in a per-student or per-instructor individual schedule view
/// (spec.md §9 supplement: recovered from the original's `sample_ui.py`).
pub struct ScheduleEntry {
    pub crn: Crn,
    pub course_code: String,
    pub day: u8,
    pub block: u8,
    pub room: Option<crate::types::RoomId>,
}

/// A single student's own exam list, sorted by day then block.
pub fn student_schedule(
    result: &ScheduleResult,
    dataset: &SchedulingDataset,
    student_id: &StudentId,
) -> Vec<ScheduleEntry> {
    let Some(student) = dataset.students.get(student_id) else {
        return Vec::new();
    };

    let mut entries: Vec<ScheduleEntry> = student
        .enrolled_sections
        .iter()
        .filter_map(|crn| {
            let &(day, block) = result.assignments.get(crn)?;
            Some(ScheduleEntry {
                crn: crn.clone(),
                course_code: result
                    .course_codes
                    .get(crn)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                day,
                block,
                room: result.room_assignments.get(crn).cloned(),
            })
        })
        .collect();

    entries.sort_by(|a, b| (a.day, a.block, &a.crn).cmp(&(b.day, b.block, &b.crn)));
    entries
}

/// One instructor's own exam list, sorted by day then block.
pub fn instructor_schedule(
    result: &ScheduleResult,
    dataset: &SchedulingDataset,
    instructor_id: &InstructorId,
) -> Vec<ScheduleEntry> {
    let mut entries: Vec<ScheduleEntry> = dataset
        .instructors_by_section
        .iter()
        .filter(|(_, names)| names.contains(instructor_id))
        .filter_map(|(crn, _)| {
            let &(day, block) = result.assignments.get(crn)?;
            Some(ScheduleEntry {
                crn: crn.clone(),
                course_code: result
                    .course_codes
                    .get(crn)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                day,
                block,
                room: result.room_assignments.get(crn).cloned(),
            })
        })
        .collect();

    entries.sort_by(|a, b| (a.day, a.block, &a.crn).cmp(&(b.day, b.block, &b.crn)));
    entries
}

pub fn format_entry(entry: &ScheduleEntry) -> String {
    format!(
        "{} {} ({}) — {} [{}] room {}",
        day_name(entry.day),
        crate::types::block_time(entry.block),
        entry.crn,
        entry.course_code,
        entry.block,
        entry
            .room
            .as_ref()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "TBD".to_string()),
    )
}
