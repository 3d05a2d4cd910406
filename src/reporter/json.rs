use crate::core::ScheduleAnalysis;
use crate::error::Result;
use crate::types::ScheduleResult;

/// JSON rendering of the raw scheduling output.
pub fn generate_json_report(result: &ScheduleResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// JSON rendering of the post-hoc analysis.
pub fn generate_analysis_json(analysis: &ScheduleAnalysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

/// Compact summary, useful for a CLI's `--format json` top line.
#[derive(serde::Serialize)]
pub struct JsonSummary {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub num_classes: usize,
    pub num_students: usize,
    pub num_rooms: usize,
    pub slots_used: usize,
    pub unplaced_exams: usize,
    pub hard_conflict_count: usize,
}

pub fn generate_json_summary(_result: &ScheduleResult, analysis: &ScheduleAnalysis) -> Result<String> {
    let summary = JsonSummary {
        generated_at: chrono::Utc::now(),
        num_classes: analysis.statistics.num_classes,
        num_students: analysis.statistics.num_students,
        num_rooms: analysis.statistics.num_rooms,
        slots_used: analysis.statistics.slots_used,
        unplaced_exams: analysis.statistics.unplaced_exams,
        hard_conflict_count: analysis.statistics.hard_conflict_count(),
    };

    Ok(serde_json::to_string_pretty(&summary)?)
}
