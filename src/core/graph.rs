use crate::types::{Crn, InstructorId, MergeGroups, SchedulingDataset};
use std::collections::HashMap;

/// Edge weight forced onto every pair of CRNs within a merge group. Far
/// above any organically accumulated student/instructor weight, so that
/// DSATUR treats merged CRNs as mutually adjacent (spec.md §4.1) — the
/// coloring phase then overwrites their colors to be identical in a
/// separate post-pass (§4.2), so these edges exist only to keep each
/// member's color out of the others' neighborhoods during coloring.
pub const MERGE_SENTINEL_WEIGHT: u32 = 1_000_000;

/// Undirected conflict graph: nodes are CRNs, edges carry accumulated
/// student/instructor overlap weight (spec.md §4.1).
#[derive(Debug, Default, Clone)]
pub struct Graph {
    nodes: Vec<Crn>,
    adjacency: HashMap<Crn, HashMap<Crn, u32>>,
}

impl Graph {
    pub fn nodes(&self) -> &[Crn] {
        &self.nodes
    }

    pub fn neighbors(&self, crn: &Crn) -> impl Iterator<Item = &Crn> {
        self.adjacency.get(crn).into_iter().flat_map(|m| m.keys())
    }

    pub fn degree(&self, crn: &Crn) -> usize {
        self.adjacency.get(crn).map(|m| m.len()).unwrap_or(0)
    }

    pub fn has_edge(&self, a: &Crn, b: &Crn) -> bool {
        self.adjacency.get(a).map(|m| m.contains_key(b)).unwrap_or(false)
    }

    fn add_node(&mut self, crn: &Crn) {
        if !self.adjacency.contains_key(crn) {
            self.nodes.push(crn.clone());
            self.adjacency.insert(crn.clone(), HashMap::new());
        }
    }

    fn add_edge(&mut self, a: &Crn, b: &Crn, weight: u32) {
        if a == b {
            return;
        }
        self.add_node(a);
        self.add_node(b);
        let existing_a = self.adjacency.get(a).and_then(|m| m.get(b)).copied();
        let new_weight = existing_a.map(|w| w.max(weight)).unwrap_or(weight);
        self.adjacency.get_mut(a).unwrap().insert(b.clone(), new_weight);
        self.adjacency.get_mut(b).unwrap().insert(a.clone(), new_weight);
    }

    fn bump_edge_to_at_least(&mut self, a: &Crn, b: &Crn, min_weight: u32) {
        let current = self.adjacency.get(a).and_then(|m| m.get(b)).copied().unwrap_or(0);
        let target = current.max(min_weight);
        self.adjacency.get_mut(a).unwrap().insert(b.clone(), target);
        self.adjacency.get_mut(b).unwrap().insert(a.clone(), target);
    }
}

/// Builds the conflict graph from a dataset and its merge groups
/// (spec.md §4.1).
pub struct ConflictGraphBuilder;

impl ConflictGraphBuilder {
    pub fn build(dataset: &SchedulingDataset, merges: &MergeGroups) -> Graph {
        let mut graph = Graph::default();

        // Every section is a node, even one with no conflicts at all.
        let mut crns: Vec<&Crn> = dataset.sections.keys().collect();
        crns.sort();
        for crn in crns {
            graph.add_node(crn);
        }

        let mut edge_weights: HashMap<(Crn, Crn), u32> = HashMap::new();

        // Student-shared-section pass.
        let mut students: Vec<_> = dataset.students.values().collect();
        students.sort_by(|a, b| a.student_id.cmp(&b.student_id));
        for student in students {
            let mut enrolled: Vec<&Crn> = student
                .enrolled_sections
                .iter()
                .filter(|crn| dataset.sections.contains_key(*crn))
                .collect();
            enrolled.sort();
            for i in 0..enrolled.len() {
                for j in (i + 1)..enrolled.len() {
                    let key = edge_key(enrolled[i], enrolled[j]);
                    *edge_weights.entry(key).or_insert(0) += 1;
                }
            }
        }

        // Instructor-shared-section pass: invert instructors_by_section.
        let mut sections_by_instructor: HashMap<&InstructorId, Vec<&Crn>> = HashMap::new();
        let mut crns: Vec<&Crn> = dataset.instructors_by_section.keys().collect();
        crns.sort();
        for crn in crns {
            let instructors = &dataset.instructors_by_section[crn];
            let mut names: Vec<&InstructorId> = instructors.iter().collect();
            names.sort();
            for name in names {
                sections_by_instructor.entry(name).or_default().push(crn);
            }
        }
        let mut instructor_names: Vec<&&InstructorId> = sections_by_instructor.keys().collect();
        instructor_names.sort();
        for name in instructor_names {
            let crns = &sections_by_instructor[*name];
            for i in 0..crns.len() {
                for j in (i + 1)..crns.len() {
                    let key = edge_key(crns[i], crns[j]);
                    *edge_weights.entry(key).or_insert(0) += 1;
                }
            }
        }

        for ((a, b), weight) in edge_weights {
            graph.add_edge(&a, &b, weight);
        }

        // Merge-group sentinel pass. Unknown CRNs are silently ignored
        // (spec.md §4.1 Failure).
        let mut group_ids: Vec<&String> = merges.keys().collect();
        group_ids.sort();
        for group_id in group_ids {
            let members: Vec<&Crn> = merges[group_id]
                .iter()
                .filter(|crn| dataset.sections.contains_key(*crn))
                .collect();
            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    let (a, b) = (members[i], members[j]);
                    if graph.has_edge(a, b) {
                        graph.bump_edge_to_at_least(a, b, MERGE_SENTINEL_WEIGHT);
                    } else {
                        graph.add_edge(a, b, MERGE_SENTINEL_WEIGHT);
                    }
                }
            }
        }

        graph
    }
}

fn edge_key(a: &Crn, b: &Crn) -> (Crn, Crn) {
    if a < b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}
