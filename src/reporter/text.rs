use super::course_code_of;
use crate::core::ScheduleAnalysis;
use crate::types::{block_time, day_name, ScheduleResult};
use colored::Colorize;

/// Plain text report with terminal colors, flattening hard and soft
/// conflicts into one human-readable breakdown (spec.md §9 supplement:
/// recovered from the original's `conflict_formatter.py`).
pub fn generate_text_report(result: &ScheduleResult, analysis: &ScheduleAnalysis) -> String {
    let mut lines = Vec::new();

    lines.push("=".repeat(60));
    lines.push("          EXAM SCHEDULE REPORT".to_string());
    lines.push(format!("          generated {}", chrono::Utc::now().to_rfc3339()));
    lines.push("=".repeat(60));
    lines.push(String::new());

    lines.push("-".repeat(40));
    lines.push("STATISTICS".to_string());
    lines.push("-".repeat(40));
    let stats = &analysis.statistics;
    lines.push(format!("  Classes:          {}", stats.num_classes));
    lines.push(format!("  Students:         {}", stats.num_students));
    lines.push(format!("  Rooms used:       {}", stats.num_rooms));
    lines.push(format!("  Slots used:       {}", stats.slots_used));
    lines.push(format!("  Unplaced exams:   {}", stats.unplaced_exams));
    lines.push(String::new());

    lines.push("-".repeat(40));
    lines.push("HARD CONFLICTS".to_string());
    lines.push("-".repeat(40));
    if analysis.statistics.hard_conflict_count() == 0 {
        lines.push("  none".green().to_string());
    } else {
        for record in &analysis.student_double_book {
            lines.push(
                format!(
                    "  StudentDoubleBook: {} on {} ({}) — crn {} ({})",
                    record.entity_id,
                    day_name(record.day),
                    block_time(record.block),
                    record.crn,
                    course_code_of(result, &record.crn),
                )
                .red()
                .to_string(),
            );
        }
        for record in &analysis.instructor_double_book {
            lines.push(
                format!(
                    "  InstructorDoubleBook: {} on {} ({}) — crn {} ({})",
                    record.entity_id,
                    day_name(record.day),
                    block_time(record.block),
                    record.crn,
                    course_code_of(result, &record.crn),
                )
                .red()
                .to_string(),
            );
        }
        for record in &analysis.student_gt_max_per_day {
            lines.push(
                format!(
                    "  StudentGtMaxPerDay: {} on {}: crns {:?}",
                    record.entity_id,
                    day_name(record.day),
                    record.colliding_crns,
                )
                .red()
                .to_string(),
            );
        }
        for record in &analysis.instructor_gt_max_per_day {
            lines.push(
                format!(
                    "  InstructorGtMaxPerDay: {} on {}: crns {:?}",
                    record.entity_id,
                    day_name(record.day),
                    record.colliding_crns,
                )
                .red()
                .to_string(),
            );
        }
    }
    lines.push(String::new());

    lines.push("-".repeat(40));
    lines.push("SOFT CONFLICTS".to_string());
    lines.push("-".repeat(40));
    if analysis.back_to_back_students.is_empty()
        && analysis.back_to_back_instructors.is_empty()
        && analysis.large_courses_not_early.is_empty()
    {
        lines.push("  none".green().to_string());
    } else {
        for record in &analysis.back_to_back_students {
            lines.push(format!(
                "  back-to-back student {} on {}: blocks {:?}",
                record.entity_id,
                day_name(record.day),
                record.blocks
            ).yellow().to_string());
        }
        for record in &analysis.back_to_back_instructors {
            lines.push(format!(
                "  back-to-back instructor {} on {}: blocks {:?}",
                record.entity_id,
                day_name(record.day),
                record.blocks
            ).yellow().to_string());
        }
        for record in &analysis.large_courses_not_early {
            lines.push(format!(
                "  large course {} ({}) placed {} (enrollment {})",
                record.crn,
                record.course_code,
                day_name(record.day),
                record.enrollment
            ).yellow().to_string());
        }
    }

    if !result.unscheduled_merges.is_empty() {
        lines.push(String::new());
        lines.push("-".repeat(40));
        lines.push("UNSCHEDULED MERGE GROUPS".to_string());
        lines.push("-".repeat(40));
        let mut groups: Vec<&String> = result.unscheduled_merges.iter().collect();
        groups.sort();
        for group in groups {
            lines.push(format!("  {group}").red().to_string());
        }
    }

    lines.join("\n")
}
