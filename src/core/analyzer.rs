use crate::types::{
    Crn, InstructorId, MergeGroups, RoomId, ScheduleResult, SchedulingDataset, SchedulingParams,
    EARLY_WEEK_CUTOFF, LARGE_COURSE_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A double-booking between two of an entity's own sections at one slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoubleBookRecord {
    pub entity_id: String,
    pub crn: Crn,
    pub conflicting_crn: Crn,
    pub day: u8,
    pub block: u8,
}

/// An entity exceeding its per-day exam cap. `colliding_crns` lists every
/// section that contributed to the overage that day (spec.md §9
/// "`conflicting_crns` (plural) on `*_gt_max_per_day` conflicts").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GtMaxPerDayRecord {
    pub entity_id: String,
    pub day: u8,
    pub colliding_crns: Vec<Crn>,
}

/// An entity with two exams in adjacent blocks on the same day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackToBackRecord {
    pub entity_id: String,
    pub day: u8,
    pub blocks: Vec<u8>,
}

/// A large section (enrollment >= [`LARGE_COURSE_THRESHOLD`]) not placed in
/// the early part of the week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LargeCourseLateRecord {
    pub crn: Crn,
    pub course_code: String,
    pub day: u8,
    pub block: u8,
    pub enrollment: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleStatistics {
    pub student_double_book_count: usize,
    pub instructor_double_book_count: usize,
    pub student_gt_max_per_day_count: usize,
    pub instructor_gt_max_per_day_count: usize,
    pub back_to_back_students_count: usize,
    pub back_to_back_instructors_count: usize,
    pub large_courses_not_early_count: usize,
    pub num_classes: usize,
    pub num_students: usize,
    pub num_rooms: usize,
    pub slots_used: usize,
    pub unplaced_exams: usize,
}

impl ScheduleStatistics {
    /// Authoritative hard-conflict count (spec.md §9): the sum of the
    /// analyzer's own recomputed violation counts, not the placement-time
    /// conflict log, which can under-report conflicts the search avoided by
    /// picking a different slot.
    pub fn hard_conflict_count(&self) -> usize {
        self.student_double_book_count
            + self.instructor_double_book_count
            + self.student_gt_max_per_day_count
            + self.instructor_gt_max_per_day_count
    }
}

/// Output of the post-hoc analysis pass (spec.md §4.7).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleAnalysis {
    pub student_double_book: Vec<DoubleBookRecord>,
    pub instructor_double_book: Vec<DoubleBookRecord>,
    pub student_gt_max_per_day: Vec<GtMaxPerDayRecord>,
    pub instructor_gt_max_per_day: Vec<GtMaxPerDayRecord>,
    pub back_to_back_students: Vec<BackToBackRecord>,
    pub back_to_back_instructors: Vec<BackToBackRecord>,
    pub large_courses_not_early: Vec<LargeCourseLateRecord>,
    pub statistics: ScheduleStatistics,
}

/// Re-derives hard and soft violations from the final `assignments`, never
/// from the placement-time conflict log (spec.md §9: the recomputation is
/// authoritative; the log exists only for order-preserving diagnostics).
pub struct Analyzer;

impl Analyzer {
    pub fn analyze(
        result: &ScheduleResult,
        dataset: &SchedulingDataset,
        merges: &MergeGroups,
        params: &SchedulingParams,
    ) -> ScheduleAnalysis {
        let mut analysis = ScheduleAnalysis::default();

        analyze_students(&mut analysis, result, dataset, params);
        analyze_instructors(&mut analysis, result, dataset, params);
        analyze_large_courses(&mut analysis, result, dataset);
        analysis.statistics = compute_statistics(&analysis, result, dataset, merges);

        analysis
    }
}

/// Per-day (block, crn) pairs for one entity, used identically by the
/// student and instructor passes below.
fn group_by_day(crns: &[Crn], result: &ScheduleResult) -> HashMap<u8, Vec<(u8, Crn)>> {
    let mut by_day: HashMap<u8, Vec<(u8, Crn)>> = HashMap::new();
    for crn in crns {
        if let Some(&(day, block)) = result.assignments.get(crn) {
            by_day.entry(day).or_default().push((block, crn.clone()));
        }
    }
    by_day
}

fn analyze_students(
    analysis: &mut ScheduleAnalysis,
    result: &ScheduleResult,
    dataset: &SchedulingDataset,
    params: &SchedulingParams,
) {
    let mut student_ids: Vec<_> = dataset.students.keys().collect();
    student_ids.sort();

    for student_id in student_ids {
        let mut crns: Vec<Crn> = dataset.students[student_id]
            .enrolled_sections
            .iter()
            .cloned()
            .collect();
        crns.sort();

        let by_day = group_by_day(&crns, result);
        let mut days: Vec<u8> = by_day.keys().copied().collect();
        days.sort();

        for day in days {
            let entries = &by_day[&day];

            let mut by_block: HashMap<u8, Vec<Crn>> = HashMap::new();
            for (block, crn) in entries {
                by_block.entry(*block).or_default().push(crn.clone());
            }
            let mut blocks: Vec<u8> = by_block.keys().copied().collect();
            blocks.sort();
            for block in &blocks {
                let mut same_slot = by_block[block].clone();
                same_slot.sort();
                if same_slot.len() >= 2 {
                    let anchor = same_slot[0].clone();
                    for other in &same_slot[1..] {
                        analysis.student_double_book.push(DoubleBookRecord {
                            entity_id: student_id.to_string(),
                            crn: anchor.clone(),
                            conflicting_crn: other.clone(),
                            day,
                            block: *block,
                        });
                    }
                }
            }

            if entries.len() as u32 > params.student_max_per_day {
                let mut colliding: Vec<Crn> = entries.iter().map(|(_, c)| c.clone()).collect();
                colliding.sort();
                analysis.student_gt_max_per_day.push(GtMaxPerDayRecord {
                    entity_id: student_id.to_string(),
                    day,
                    colliding_crns: colliding,
                });
            }

            let mut distinct_blocks = blocks.clone();
            distinct_blocks.dedup();
            if distinct_blocks.windows(2).any(|w| w[1] == w[0] + 1) {
                analysis.back_to_back_students.push(BackToBackRecord {
                    entity_id: student_id.to_string(),
                    day,
                    blocks: distinct_blocks,
                });
            }
        }
    }
}

fn analyze_instructors(
    analysis: &mut ScheduleAnalysis,
    result: &ScheduleResult,
    dataset: &SchedulingDataset,
    params: &SchedulingParams,
) {
    let mut sections_by_instructor: HashMap<InstructorId, Vec<Crn>> = HashMap::new();
    let mut crns: Vec<&Crn> = dataset.instructors_by_section.keys().collect();
    crns.sort();
    for crn in crns {
        let mut names: Vec<&InstructorId> = dataset.instructors_by_section[crn].iter().collect();
        names.sort();
        for name in names {
            sections_by_instructor
                .entry(name.clone())
                .or_default()
                .push(crn.clone());
        }
    }

    let mut instructor_names: Vec<&InstructorId> = sections_by_instructor.keys().collect();
    instructor_names.sort();

    for instructor in instructor_names {
        let mut crns = sections_by_instructor[instructor].clone();
        crns.sort();

        let by_day = group_by_day(&crns, result);
        let mut days: Vec<u8> = by_day.keys().copied().collect();
        days.sort();

        for day in days {
            let entries = &by_day[&day];

            let mut by_block: HashMap<u8, Vec<Crn>> = HashMap::new();
            for (block, crn) in entries {
                by_block.entry(*block).or_default().push(crn.clone());
            }
            let mut blocks: Vec<u8> = by_block.keys().copied().collect();
            blocks.sort();
            for block in &blocks {
                let mut same_slot = by_block[block].clone();
                same_slot.sort();
                if same_slot.len() >= 2 {
                    let anchor = same_slot[0].clone();
                    for other in &same_slot[1..] {
                        analysis.instructor_double_book.push(DoubleBookRecord {
                            entity_id: instructor.to_string(),
                            crn: anchor.clone(),
                            conflicting_crn: other.clone(),
                            day,
                            block: *block,
                        });
                    }
                }
            }

            if entries.len() as u32 > params.instructor_max_per_day {
                let mut colliding: Vec<Crn> = entries.iter().map(|(_, c)| c.clone()).collect();
                colliding.sort();
                analysis.instructor_gt_max_per_day.push(GtMaxPerDayRecord {
                    entity_id: instructor.to_string(),
                    day,
                    colliding_crns: colliding,
                });
            }

            let mut distinct_blocks = blocks.clone();
            distinct_blocks.dedup();
            if distinct_blocks.windows(2).any(|w| w[1] == w[0] + 1) {
                analysis.back_to_back_instructors.push(BackToBackRecord {
                    entity_id: instructor.to_string(),
                    day,
                    blocks: distinct_blocks,
                });
            }
        }
    }
}

fn analyze_large_courses(
    analysis: &mut ScheduleAnalysis,
    result: &ScheduleResult,
    dataset: &SchedulingDataset,
) {
    let mut crns: Vec<&Crn> = dataset.sections.keys().collect();
    crns.sort();
    for crn in crns {
        let enrollment = dataset.enrollment(crn);
        if enrollment < LARGE_COURSE_THRESHOLD {
            continue;
        }
        if let Some(&(day, block)) = result.assignments.get(crn) {
            if day >= EARLY_WEEK_CUTOFF {
                analysis.large_courses_not_early.push(LargeCourseLateRecord {
                    crn: crn.clone(),
                    course_code: dataset.sections[crn].course_code.clone(),
                    day,
                    block,
                    enrollment,
                });
            }
        }
    }
}

fn compute_statistics(
    analysis: &ScheduleAnalysis,
    result: &ScheduleResult,
    dataset: &SchedulingDataset,
    merges: &MergeGroups,
) -> ScheduleStatistics {
    let num_students = dataset
        .students
        .keys()
        .filter(|id| {
            dataset.students[*id]
                .enrolled_sections
                .iter()
                .any(|crn| result.assignments.contains_key(crn))
        })
        .count();

    let num_rooms: HashSet<&RoomId> = result.room_assignments.values().collect();
    let slots_used: HashSet<_> = result.assignments.values().collect();

    let unplaced_exams: usize = result
        .unscheduled_merges
        .iter()
        .map(|group_id| merges.get(group_id).map(|v| v.len()).unwrap_or(0))
        .sum();

    ScheduleStatistics {
        student_double_book_count: analysis.student_double_book.len(),
        instructor_double_book_count: analysis.instructor_double_book.len(),
        student_gt_max_per_day_count: analysis.student_gt_max_per_day.len(),
        instructor_gt_max_per_day_count: analysis.instructor_gt_max_per_day.len(),
        back_to_back_students_count: analysis.back_to_back_students.len(),
        back_to_back_instructors_count: analysis.back_to_back_instructors.len(),
        large_courses_not_early_count: analysis.large_courses_not_early.len(),
        num_classes: result.assignments.len(),
        num_students,
        num_rooms: num_rooms.len(),
        slots_used: slots_used.len(),
        unplaced_exams,
    }
}
