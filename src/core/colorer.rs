use super::graph::Graph;
use crate::error::{Result, SchedulerError};
use crate::types::{Crn, MergeGroups};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

/// DSATUR greedy coloring plus the merge-group post-pass (spec.md §4.2).
pub struct Colorer;

impl Colorer {
    /// Colors every node in `graph`. Fails with `ProgrammerError` if asked
    /// to color an empty graph — callers with a non-empty dataset should
    /// never hit this; an empty dataset should skip coloring entirely
    /// rather than calling this function.
    pub fn color(graph: &Graph, merges: &MergeGroups) -> Result<HashMap<Crn, u32>> {
        if graph.nodes().is_empty() {
            return Err(SchedulerError::ProgrammerError(
                "requested coloring on an empty graph".to_string(),
            )
            .into());
        }

        let mut colors: HashMap<Crn, u32> = HashMap::new();
        let mut saturation: HashMap<Crn, HashSet<u32>> =
            graph.nodes().iter().map(|n| (n.clone(), HashSet::new())).collect();
        let mut uncolored: HashSet<Crn> = graph.nodes().iter().cloned().collect();

        while !uncolored.is_empty() {
            let next = uncolored
                .iter()
                .max_by_key(|crn| {
                    let sat_degree = saturation.get(*crn).map(|s| s.len()).unwrap_or(0);
                    let uncolored_neighbor_degree = graph
                        .neighbors(crn)
                        .filter(|n| uncolored.contains(*n))
                        .count();
                    (sat_degree, uncolored_neighbor_degree, Reverse((*crn).clone()))
                })
                .cloned()
                .expect("uncolored set is non-empty");

            let neighbor_colors: HashSet<u32> = graph
                .neighbors(&next)
                .filter_map(|n| colors.get(n).copied())
                .collect();
            let mut color = 0u32;
            while neighbor_colors.contains(&color) {
                color += 1;
            }

            colors.insert(next.clone(), color);
            uncolored.remove(&next);

            for neighbor in graph.neighbors(&next) {
                if uncolored.contains(neighbor) {
                    saturation.get_mut(neighbor).unwrap().insert(color);
                }
            }
        }

        apply_merge_post_pass(&mut colors, merges);
        Ok(colors)
    }
}

/// Overwrite every merge group's members with their most common color
/// (ties toward the lower integer), guaranteeing invariant 3 ahead of
/// slot assignment.
fn apply_merge_post_pass(colors: &mut HashMap<Crn, u32>, merges: &MergeGroups) {
    let mut group_ids: Vec<&String> = merges.keys().collect();
    group_ids.sort();

    for group_id in group_ids {
        let members = &merges[group_id];
        let mut counts: HashMap<u32, usize> = HashMap::new();
        for crn in members {
            if let Some(color) = colors.get(crn) {
                *counts.entry(*color).or_insert(0) += 1;
            }
        }
        if counts.is_empty() {
            continue;
        }

        let target = counts
            .into_iter()
            .max_by_key(|(color, count)| (*count, Reverse(*color)))
            .map(|(color, _)| color)
            .unwrap();

        for crn in members {
            if colors.contains_key(crn) {
                colors.insert(crn.clone(), target);
            }
        }
    }
}
