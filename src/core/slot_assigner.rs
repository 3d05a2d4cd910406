use super::soft::SoftConstraintEvaluator;
use super::SchedulingState;
use crate::types::{
    all_slots, Conflict, ConflictKind, Crn, InstructorId, MergeGroups, SchedulingDataset,
    SchedulingParams, Slot, StudentId,
};
use std::collections::{HashMap, HashSet};

/// Detects hard-constraint violations for a candidate placement (spec.md §4.4).
/// Reads only from `state` and `dataset`; never mutates.
pub struct ConflictDetector;

impl ConflictDetector {
    pub fn check_placement(
        dataset: &SchedulingDataset,
        state: &SchedulingState,
        params: &SchedulingParams,
        crn: &Crn,
        day: u8,
        block: u8,
    ) -> Vec<Conflict> {
        let mut conflicts = Vec::new();

        let mut students: Vec<&StudentId> = dataset.students_of(crn).iter().collect();
        students.sort();
        for student_id in students {
            if let Some(other_crn) =
                find_conflicting_crn(&state.slot_to_crns, day, block, |c| {
                    dataset.students_of(c).contains(student_id)
                })
            {
                conflicts.push(Conflict {
                    kind: ConflictKind::StudentDoubleBook,
                    entity_id: student_id.to_string(),
                    crn: crn.clone(),
                    conflicting_crn: Some(other_crn),
                    day,
                    block,
                });
            }

            let count_today = state
                .student_schedule
                .get(student_id)
                .map(|slots| slots.iter().filter(|&&(d, _)| d == day).count())
                .unwrap_or(0) as u32;
            if count_today >= params.student_max_per_day {
                conflicts.push(Conflict {
                    kind: ConflictKind::StudentGtMaxPerDay,
                    entity_id: student_id.to_string(),
                    crn: crn.clone(),
                    conflicting_crn: None,
                    day,
                    block,
                });
            }
        }

        let mut instructors: Vec<&InstructorId> = dataset.instructors_of(crn).iter().collect();
        instructors.sort();
        for instructor in instructors {
            if let Some(other_crn) =
                find_conflicting_crn(&state.slot_to_crns, day, block, |c| {
                    dataset.instructors_of(c).contains(instructor)
                })
            {
                conflicts.push(Conflict {
                    kind: ConflictKind::InstructorDoubleBook,
                    entity_id: instructor.to_string(),
                    crn: crn.clone(),
                    conflicting_crn: Some(other_crn),
                    day,
                    block,
                });
            }

            let count_today = state
                .instructor_schedule
                .get(instructor)
                .map(|slots| slots.iter().filter(|&&(d, _)| d == day).count())
                .unwrap_or(0) as u32;
            if count_today >= params.instructor_max_per_day {
                conflicts.push(Conflict {
                    kind: ConflictKind::InstructorGtMaxPerDay,
                    entity_id: instructor.to_string(),
                    crn: crn.clone(),
                    conflicting_crn: None,
                    day,
                    block,
                });
            }
        }

        conflicts
    }
}

/// Among CRNs already placed at `(day, block)`, find the lexicographically
/// first one matching `matches` — gives `conflictingCrn` a deterministic
/// value when more than one already-placed section would qualify.
fn find_conflicting_crn(
    slot_to_crns: &HashMap<Slot, Vec<Crn>>,
    day: u8,
    block: u8,
    matches: impl Fn(&Crn) -> bool,
) -> Option<Crn> {
    let mut candidates: Vec<&Crn> = slot_to_crns
        .get(&(day, block))
        .map(|v| v.iter().collect())
        .unwrap_or_default();
    candidates.sort();
    candidates.into_iter().find(|c| matches(c)).cloned()
}

/// One unit of placement: either a solo section or a whole merge group
/// anchored by its representative (the first listed CRN present in the
/// dataset — spec.md §9's explicit reverse-lookup approach, made concrete
/// for representative selection).
struct OrderItem {
    repr: Crn,
    effective_enrollment: u32,
    members: Vec<Crn>,
}

fn build_order(
    dataset: &SchedulingDataset,
    merges: &MergeGroups,
    crn_to_group: &HashMap<Crn, String>,
    unscheduled_merges: &HashSet<String>,
    colors: &HashMap<Crn, u32>,
    params: &SchedulingParams,
) -> Vec<OrderItem> {
    let mut crns: Vec<&Crn> = dataset.sections.keys().collect();
    crns.sort();

    let mut seen_groups: HashSet<&String> = HashSet::new();
    let mut items = Vec::new();

    for crn in crns {
        if let Some(group_id) = crn_to_group.get(crn) {
            if unscheduled_merges.contains(group_id) {
                continue;
            }
            if !seen_groups.insert(group_id) {
                continue;
            }
            let members: Vec<Crn> = merges[group_id]
                .iter()
                .filter(|c| dataset.sections.contains_key(*c))
                .cloned()
                .collect();
            if members.is_empty() {
                continue;
            }
            let effective_enrollment: u32 = members.iter().map(|c| dataset.enrollment(c)).sum();
            items.push(OrderItem {
                repr: members[0].clone(),
                effective_enrollment,
                members,
            });
        } else {
            items.push(OrderItem {
                repr: crn.clone(),
                effective_enrollment: dataset.enrollment(crn),
                members: vec![crn.clone()],
            });
        }
    }

    if params.prioritize_large_courses {
        items.sort_by(|a, b| {
            b.effective_enrollment
                .cmp(&a.effective_enrollment)
                .then_with(|| a.repr.cmp(&b.repr))
        });
    } else {
        let mut color_weight: HashMap<u32, u32> = HashMap::new();
        for item in &items {
            let color = colors.get(&item.repr).copied().unwrap_or(0);
            *color_weight.entry(color).or_insert(0) += item.effective_enrollment;
        }
        let mut color_order: Vec<u32> = color_weight.keys().copied().collect();
        color_order.sort_by(|a, b| color_weight[b].cmp(&color_weight[a]).then(a.cmp(b)));
        let color_rank: HashMap<u32, usize> =
            color_order.iter().enumerate().map(|(i, c)| (*c, i)).collect();

        items.sort_by(|a, b| {
            let ra = color_rank[&colors.get(&a.repr).copied().unwrap_or(0)];
            let rb = color_rank[&colors.get(&b.repr).copied().unwrap_or(0)];
            ra.cmp(&rb)
                .then_with(|| b.effective_enrollment.cmp(&a.effective_enrollment))
                .then_with(|| a.repr.cmp(&b.repr))
        });
    }

    items
}

/// Output of the slot-assignment phase (spec.md §4.3).
pub struct SlotAssignResult {
    pub assignments: HashMap<Crn, Slot>,
    pub conflicts: Vec<Conflict>,
    /// Representative-level placement order; [`RoomAssigner`](super::room_assigner)
    /// walks it instead of iterating a HashMap so room assignment stays
    /// deterministic (spec.md §5).
    pub placement_order: Vec<Crn>,
}

pub struct SlotAssigner;

impl SlotAssigner {
    pub fn assign(
        dataset: &SchedulingDataset,
        colors: &HashMap<Crn, u32>,
        merges: &MergeGroups,
        crn_to_group: &HashMap<Crn, String>,
        unscheduled_merges: &HashSet<String>,
        params: &SchedulingParams,
        state: &mut SchedulingState,
    ) -> SlotAssignResult {
        let items = build_order(dataset, merges, crn_to_group, unscheduled_merges, colors, params);
        let slots = all_slots(params.max_days);

        let mut assignments = HashMap::new();
        let mut conflicts = Vec::new();
        let mut placement_order = Vec::new();

        for item in &items {
            let mut best_key: Option<(u32, super::soft::SoftKey)> = None;
            let mut best_slot = (0u8, 0u8);
            let mut best_conflicts: Vec<Conflict> = Vec::new();

            for &(day, block) in &slots {
                let mut candidate_conflicts = Vec::new();
                for member in &item.members {
                    candidate_conflicts.extend(ConflictDetector::check_placement(
                        dataset, state, params, member, day, block,
                    ));
                }

                let penalty = SoftConstraintEvaluator::evaluate_group(
                    dataset,
                    state,
                    params,
                    &item.members,
                    item.effective_enrollment,
                    day,
                    block,
                );
                let key = (candidate_conflicts.len() as u32, penalty.as_tuple(day, block));

                if best_key.as_ref().map(|b| key < *b).unwrap_or(true) {
                    best_key = Some(key);
                    best_slot = (day, block);
                    best_conflicts = candidate_conflicts;
                }
            }

            let (day, block) = best_slot;
            for member in &item.members {
                assignments.insert(member.clone(), (day, block));
                state.record_placement(member, day, block, dataset);
            }
            conflicts.extend(best_conflicts);
            placement_order.push(item.repr.clone());
        }

        SlotAssignResult {
            assignments,
            conflicts,
            placement_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Colorer, ConflictGraphBuilder};
    use crate::types::{Room, Section, Student};
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
            student_id: StudentId(id.to_string()),
            enrolled_sections: crns.iter().map(|c| Crn(c.to_string())).collect(),
        }
    }

    #[test]
    fn find_conflicting_crn_picks_lexicographically_first_match() {
        let mut slot_to_crns = HashMap::new();
        slot_to_crns.insert((0u8, 0u8), vec![Crn("Z".to_string()), Crn("A".to_string())]);
        let found = find_conflicting_crn(&slot_to_crns, 0, 0, |_| true);
        assert_eq!(found, Some(Crn("A".to_string())));
    }

    #[test]
    fn find_conflicting_crn_is_none_when_nothing_matches() {
        let mut slot_to_crns = HashMap::new();
        slot_to_crns.insert((0u8, 0u8), vec![Crn("A".to_string())]);
        let found = find_conflicting_crn(&slot_to_crns, 0, 0, |_| false);
        assert_eq!(found, None);
    }

    #[test]
    fn build_order_prioritizes_large_courses_when_flagged() {
        let sections = vec![section("small", 10), section("big", 90)];
        let dataset = SchedulingDataset::build(sections, vec![], Vec::<Room>::new());
        let graph = ConflictGraphBuilder::build(&dataset, &MergeGroups::new());
        let colors = Colorer::color(&graph, &MergeGroups::new()).unwrap();
        let params = SchedulingParams {
            prioritize_large_courses: true,
            ..SchedulingParams::default()
        };

        let order = build_order(
            &dataset,
            &MergeGroups::new(),
            &HashMap::new(),
            &HashSet::new(),
            &colors,
            &params,
        );
        assert_eq!(order[0].repr, Crn("big".to_string()));
    }

    #[test]
    fn build_order_skips_unscheduled_merge_groups() {
        let sections = vec![section("A", 10), section("B", 10)];
        let dataset = SchedulingDataset::build(sections, vec![], Vec::<Room>::new());
        let graph = ConflictGraphBuilder::build(&dataset, &MergeGroups::new());
        let colors = Colorer::color(&graph, &MergeGroups::new()).unwrap();

        let mut merges = MergeGroups::new();
        merges.insert("m1".to_string(), vec![Crn("A".to_string()), Crn("B".to_string())]);
        let mut crn_to_group = HashMap::new();
        crn_to_group.insert(Crn("A".to_string()), "m1".to_string());
        crn_to_group.insert(Crn("B".to_string()), "m1".to_string());
        let mut unscheduled = HashSet::new();
        unscheduled.insert("m1".to_string());

        let order = build_order(
            &dataset,
            &merges,
            &crn_to_group,
            &unscheduled,
            &colors,
            &SchedulingParams::default(),
        );
        assert!(order.is_empty());
    }

    #[test]
    fn assign_places_merge_group_members_at_the_same_slot() {
        let sections = vec![section("A", 10), section("B", 10)];
        let dataset = SchedulingDataset::build(sections, vec![], Vec::<Room>::new());
        let graph = ConflictGraphBuilder::build(&dataset, &MergeGroups::new());
        let mut merges = MergeGroups::new();
        merges.insert("m1".to_string(), vec![Crn("A".to_string()), Crn("B".to_string())]);
        let colors = Colorer::color(&graph, &merges).unwrap();

        let mut crn_to_group = HashMap::new();
        crn_to_group.insert(Crn("A".to_string()), "m1".to_string());
        crn_to_group.insert(Crn("B".to_string()), "m1".to_string());

        let mut state = SchedulingState::new();
        let result = SlotAssigner::assign(
            &dataset,
            &colors,
            &merges,
            &crn_to_group,
            &HashSet::new(),
            &SchedulingParams::default(),
            &mut state,
        );

        assert_eq!(
            result.assignments[&Crn("A".to_string())],
            result.assignments[&Crn("B".to_string())]
        );
        assert_eq!(result.placement_order.len(), 1);
    }

    #[test]
    fn conflict_detector_flags_student_double_book() {
        let sections = vec![section("A", 10), section("B", 10)];
        let students = vec![student("s1", &["A", "B"])];
        let dataset = SchedulingDataset::build(sections, students, Vec::<Room>::new());
        let params = SchedulingParams::default();

        let mut state = SchedulingState::new();
        state.record_placement(&Crn("A".to_string()), 0, 0, &dataset);

        let conflicts = ConflictDetector::check_placement(&dataset, &state, &params, &Crn("B".to_string()), 0, 0);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::StudentDoubleBook);
        assert_eq!(conflicts[0].conflicting_crn, Some(Crn("A".to_string())));
    }
}
