use super::course_code_of;
use crate::core::ScheduleAnalysis;
use crate::types::{block_time, day_name, ScheduleResult};

/// Markdown rendering of a schedule analysis, for a docs/PR-friendly report.
pub fn generate_markdown_report(result: &ScheduleResult, analysis: &ScheduleAnalysis) -> String {
    let mut lines = Vec::new();
    let stats = &analysis.statistics;

    lines.push("# Exam Schedule Report".to_string());
    lines.push(String::new());
    lines.push(format!("_generated {}_", chrono::Utc::now().to_rfc3339()));
    lines.push(String::new());

    lines.push("## Statistics".to_string());
    lines.push(String::new());
    lines.push("| Metric | Value |".to_string());
    lines.push("|---|---|".to_string());
    lines.push(format!("| Classes | {} |", stats.num_classes));
    lines.push(format!("| Students | {} |", stats.num_students));
    lines.push(format!("| Rooms used | {} |", stats.num_rooms));
    lines.push(format!("| Slots used | {} |", stats.slots_used));
    lines.push(format!("| Unplaced exams | {} |", stats.unplaced_exams));
    lines.push(format!("| Student double-bookings | {} |", stats.student_double_book_count));
    lines.push(format!("| Instructor double-bookings | {} |", stats.instructor_double_book_count));
    lines.push(format!("| Students over per-day cap | {} |", stats.student_gt_max_per_day_count));
    lines.push(format!("| Instructors over per-day cap | {} |", stats.instructor_gt_max_per_day_count));
    lines.push(format!("| Back-to-back students | {} |", stats.back_to_back_students_count));
    lines.push(format!("| Back-to-back instructors | {} |", stats.back_to_back_instructors_count));
    lines.push(format!("| Large courses placed late | {} |", stats.large_courses_not_early_count));
    lines.push(String::new());

    lines.push("## Hard conflicts".to_string());
    lines.push(String::new());
    if stats.hard_conflict_count() == 0 {
        lines.push("None.".to_string());
    } else {
        lines.push("| Kind | Entity | Day | Block | CRN | Course |".to_string());
        lines.push("|---|---|---|---|---|---|".to_string());
        for record in &analysis.student_double_book {
            lines.push(format!(
                "| StudentDoubleBook | {} | {} | {} | {} | {} |",
                record.entity_id,
                day_name(record.day),
                block_time(record.block),
                record.crn,
                course_code_of(result, &record.crn),
            ));
        }
        for record in &analysis.instructor_double_book {
            lines.push(format!(
                "| InstructorDoubleBook | {} | {} | {} | {} | {} |",
                record.entity_id,
                day_name(record.day),
                block_time(record.block),
                record.crn,
                course_code_of(result, &record.crn),
            ));
        }
        for record in &analysis.student_gt_max_per_day {
            lines.push(format!(
                "| StudentGtMaxPerDay | {} | {} | — | {:?} | — |",
                record.entity_id,
                day_name(record.day),
                record.colliding_crns,
            ));
        }
        for record in &analysis.instructor_gt_max_per_day {
            lines.push(format!(
                "| InstructorGtMaxPerDay | {} | {} | — | {:?} | — |",
                record.entity_id,
                day_name(record.day),
                record.colliding_crns,
            ));
        }
    }
    lines.push(String::new());

    if !result.unscheduled_merges.is_empty() {
        lines.push("## Unscheduled merge groups".to_string());
        lines.push(String::new());
        let mut groups: Vec<&String> = result.unscheduled_merges.iter().collect();
        groups.sort();
        for group in groups {
            lines.push(format!("- {group}"));
        }
    }

    lines.join("\n")
}
