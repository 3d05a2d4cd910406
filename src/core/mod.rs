mod analyzer;
mod colorer;
mod graph;
mod room_assigner;
mod slot_assigner;
mod soft;

pub use analyzer::*;
pub use colorer::*;
pub use graph::*;
pub use room_assigner::*;
pub use slot_assigner::*;
pub use soft::*;

use crate::error::Result;
use crate::types::{
    build_crn_to_group, identify_unscheduled, Crn, InstructorId, MergeGroups, SchedulingDataset,
    SchedulingParams, ScheduleResult, Slot,
};
use std::collections::HashMap;

/// Single source of truth for incremental scheduling state. Owned by one
/// scheduling call; both [`ConflictDetector`](slot_assigner) and
/// [`SoftConstraintEvaluator`](soft) read and update it (spec.md §4, "S").
#[derive(Debug, Default, Clone)]
pub struct SchedulingState {
    pub student_schedule: HashMap<crate::types::StudentId, Vec<Slot>>,
    pub instructor_schedule: HashMap<InstructorId, Vec<Slot>>,
    pub slot_to_crns: HashMap<Slot, Vec<Crn>>,
    pub slot_seat_load: HashMap<Slot, u32>,
    pub slot_exam_count: HashMap<Slot, u32>,
}

impl SchedulingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The only method that mutates scheduling state. Call once per
    /// placement decision.
    pub fn record_placement(&mut self, crn: &Crn, day: u8, block: u8, dataset: &SchedulingDataset) {
        let slot = (day, block);

        for student_id in dataset.students_of(crn) {
            self.student_schedule
                .entry(student_id.clone())
                .or_default()
                .push(slot);
        }
        for instructor in dataset.instructors_of(crn) {
            self.instructor_schedule
                .entry(instructor.clone())
                .or_default()
                .push(slot);
        }

        self.slot_to_crns.entry(slot).or_default().push(crn.clone());
        *self.slot_seat_load.entry(slot).or_insert(0) += dataset.enrollment(crn);
        *self.slot_exam_count.entry(slot).or_insert(0) += 1;
    }
}

/// Run the complete scheduling pipeline (phases A-D of spec.md §2) over a
/// dataset and merge map, producing a [`ScheduleResult`].
///
/// No I/O, no logging beyond the returned diagnostics, no concurrency: a
/// pure function of its inputs (spec.md §5).
pub fn schedule_exams(
    dataset: &SchedulingDataset,
    merges: &MergeGroups,
    params: &SchedulingParams,
) -> Result<ScheduleResult> {
    params.validate()?;

    // Eager InvalidInput check (spec.md §3 invariant, §7.1): a CRN may
    // appear in at most one merge group.
    let crn_to_group = build_crn_to_group(merges)?;
    let unscheduled_merges = identify_unscheduled(merges, dataset);

    let mut result = ScheduleResult {
        unscheduled_merges: unscheduled_merges.clone(),
        ..Default::default()
    };
    for (crn, section) in &dataset.sections {
        result.course_sizes.insert(crn.clone(), section.enrollment);
        result.course_codes.insert(crn.clone(), section.course_code.clone());
    }
    for room in &dataset.rooms {
        result.room_capacities.insert(room.name.clone(), room.capacity);
    }
    result.instructors_by_section = dataset.instructors_by_section.clone();

    // Phase A: build the conflict graph over every section (including
    // members of unscheduled merges; they still need a color so the
    // merge post-pass has something consistent to overwrite).
    if dataset.sections.is_empty() {
        return Ok(result);
    }
    let graph = ConflictGraphBuilder::build(dataset, merges);

    // Phase B: DSATUR coloring + merge-group color equalization.
    let colors = Colorer::color(&graph, merges)?;
    result.colors = colors.clone();

    // Phase C: slot assignment with incremental conflict/penalty evaluation.
    let mut state = SchedulingState::new();
    let slot_result = SlotAssigner::assign(
        dataset,
        &colors,
        merges,
        &crn_to_group,
        &unscheduled_merges,
        params,
        &mut state,
    );
    result.assignments = slot_result.assignments;
    result.conflicts = slot_result.conflicts;

    // Phase D: capacity-aware room assignment.
    let room_result = RoomAssigner::assign(
        &result.assignments,
        &slot_result.placement_order,
        dataset,
        merges,
        &crn_to_group,
    );
    result.room_assignments = room_result.room_assignments;
    result.invalid_room_assignments = room_result.invalid;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Room, Section, SchedulingParams, Student};
    use std::collections::HashSet;

    fn section(crn: &str, enrollment: u32) -> Section {
        Section {
            crn: Crn(crn.to_string()),
            course_code: crn.to_string(),
            enrollment,
            instructors: HashSet::new(),
            department: None,
            exam_term: None,
        }
    }

    fn student(id: &str, crns: &[&str]) -> Student {
        Student {
            student_id: crate::types::StudentId(id.to_string()),
            enrolled_sections: crns.iter().map(|c| Crn(c.to_string())).collect(),
        }
    }

    fn room(name: &str, capacity: u32) -> Room {
        Room {
            name: crate::types::RoomId(name.to_string()),
            capacity,
        }
    }

    fn params(max_days: u8, student_cap: u32, instructor_cap: u32) -> SchedulingParams {
        SchedulingParams {
            max_days,
            student_max_per_day: student_cap,
            instructor_max_per_day: instructor_cap,
            ..SchedulingParams::default()
        }
    }

    #[test]
    fn empty_dataset_yields_empty_result() {
        let dataset = SchedulingDataset::build(vec![], vec![], vec![]);
        let result = schedule_exams(&dataset, &MergeGroups::new(), &SchedulingParams::default()).unwrap();
        assert!(result.assignments.is_empty());
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn scenario1_trivial_no_conflict() {
        let sections = vec![section("A", 10), section("B", 10), section("C", 10)];
        let students = vec![
            student("s1", &["A"]),
            student("s2", &["B"]),
            student("s3", &["C"]),
        ];
        let rooms = vec![room("R1", 20)];
        let dataset = SchedulingDataset::build(sections, students, rooms);
        let result = schedule_exams(&dataset, &MergeGroups::new(), &params(1, 3, 3)).unwrap();

        assert_eq!(result.assignments.len(), 3);
        assert!(result.conflicts.is_empty());
        let blocks: HashSet<_> = result.assignments.values().map(|&(_, b)| b).collect();
        assert_eq!(blocks.len(), 3, "all three sections should land in distinct blocks");
    }

    #[test]
    fn scenario2_shared_student_forces_separation() {
        let sections = vec![section("A", 10), section("B", 10)];
        let students = vec![student("s1", &["A", "B"])];
        let rooms = vec![room("R1", 20)];
        let dataset = SchedulingDataset::build(sections, students, rooms);
        let result = schedule_exams(&dataset, &MergeGroups::new(), &params(1, 2, 2)).unwrap();

        assert_ne!(
            result.assignments[&Crn("A".to_string())],
            result.assignments[&Crn("B".to_string())]
        );
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn scenario3_infeasible_student_over_cap() {
        let sections = vec![section("A", 5), section("B", 5), section("C", 5), section("D", 5)];
        let students = vec![student("s1", &["A", "B", "C", "D"])];
        let rooms = vec![room("R1", 20)];
        let dataset = SchedulingDataset::build(sections, students, rooms);
        let result = schedule_exams(&dataset, &MergeGroups::new(), &params(1, 2, 2)).unwrap();

        assert_eq!(result.assignments.len(), 4);
        let gt_cap_conflicts = result
            .conflicts
            .iter()
            .filter(|c| matches!(c.kind, crate::types::ConflictKind::StudentGtMaxPerDay))
            .count();
        assert!(gt_cap_conflicts >= 2);
    }

    #[test]
    fn scenario4_merge_happy_path() {
        let sections = vec![section("A", 30), section("B", 25)];
        let rooms = vec![room("R1", 50), room("R2", 100)];
        let dataset = SchedulingDataset::build(sections, vec![], rooms);
        let mut merges = MergeGroups::new();
        merges.insert("m1".to_string(), vec![Crn("A".to_string()), Crn("B".to_string())]);

        let result = schedule_exams(&dataset, &merges, &SchedulingParams::default()).unwrap();

        let a = Crn("A".to_string());
        let b = Crn("B".to_string());
        assert_eq!(result.assignments[&a], result.assignments[&b]);
        assert_eq!(result.room_assignments[&a], result.room_assignments[&b]);
        assert_eq!(result.room_assignments[&a], crate::types::RoomId("R2".to_string()));
    }

    #[test]
    fn scenario5_merge_too_large_is_unscheduled() {
        let sections = vec![section("A", 60), section("B", 60)];
        let rooms = vec![room("R1", 100)];
        let dataset = SchedulingDataset::build(sections, vec![], rooms);
        let mut merges = MergeGroups::new();
        merges.insert("m1".to_string(), vec![Crn("A".to_string()), Crn("B".to_string())]);

        let result = schedule_exams(&dataset, &merges, &SchedulingParams::default()).unwrap();

        assert!(result.unscheduled_merges.contains("m1"));
        assert!(!result.assignments.contains_key(&Crn("A".to_string())));
        assert!(!result.assignments.contains_key(&Crn("B".to_string())));
        assert!(!result.room_assignments.contains_key(&Crn("A".to_string())));
    }

    #[test]
    fn scenario6_large_course_gets_early_day() {
        let mut sections = vec![section("BIG", 150)];
        for i in 0..5 {
            sections.push(section(&format!("S{i}"), 20));
        }
        let rooms = vec![room("R1", 200)];
        let dataset = SchedulingDataset::build(sections, vec![], rooms);
        let mut p = SchedulingParams::default();
        p.max_days = 7;
        p.w_large_late = 10;

        let result = schedule_exams(&dataset, &MergeGroups::new(), &p).unwrap();
        let (day, _) = result.assignments[&Crn("BIG".to_string())];
        assert!(day < crate::types::EARLY_WEEK_CUTOFF);
    }

    #[test]
    fn duplicate_crn_within_merge_group_is_allowed_but_same_crn_in_two_groups_fails() {
        let mut merges = MergeGroups::new();
        merges.insert("m1".to_string(), vec![Crn("A".to_string()), Crn("B".to_string())]);
        merges.insert("m2".to_string(), vec![Crn("A".to_string()), Crn("C".to_string())]);
        let dataset = SchedulingDataset::build(
            vec![section("A", 10), section("B", 10), section("C", 10)],
            vec![],
            vec![room("R1", 50)],
        );
        let err = schedule_exams(&dataset, &merges, &SchedulingParams::default()).unwrap_err();
        assert!(err.to_string().contains("multiple merge groups"));
    }
}
