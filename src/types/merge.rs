use super::{Crn, SchedulingDataset};
use crate::error::{Result, SchedulerError};
use std::collections::{HashMap, HashSet};

/// Merge groups as supplied by the host: merge group id -> ordered list of CRNs.
/// Order is significant — the first CRN present in the dataset becomes the
/// group's scheduling representative (§4.3).
pub type MergeGroups = HashMap<String, Vec<Crn>>;

/// Build the canonical `crn -> merge_group_id` reverse lookup (spec.md §9:
/// "a reverse lookup crn -> mergeGroupId is built once").
///
/// This is the one eager invariant check the core pipeline performs on merge
/// data before phase A: a CRN may appear in at most one group (spec.md §3).
/// Everything else about a merge group (unknown CRNs, emptiness) is handled
/// leniently inside the pipeline; use [`MergeValidator::validate`] if a host
/// wants the stricter pre-flight checks of spec.md §4.8.
pub fn build_crn_to_group(merges: &MergeGroups) -> Result<HashMap<Crn, String>> {
    let mut index = HashMap::new();
    for (group_id, crns) in merges {
        for crn in crns {
            if let Some(existing) = index.insert(crn.clone(), group_id.clone()) {
                return Err(SchedulerError::CrnInMultipleMergeGroups {
                    crn: crn.0.clone(),
                    first_group: existing,
                    second_group: group_id.clone(),
                }
                .into());
            }
        }
    }
    Ok(index)
}

/// Identify merge groups whose total enrollment exceeds every available
/// room. These are added to `unscheduled_merges` and never appear in the
/// final assignment (spec.md §4.3, §4.8).
pub fn identify_unscheduled(merges: &MergeGroups, dataset: &SchedulingDataset) -> HashSet<String> {
    let max_capacity = dataset.max_room_capacity();
    if max_capacity == 0 {
        return merges.keys().cloned().collect();
    }

    merges
        .iter()
        .filter_map(|(group_id, crns)| {
            let total: u32 = crns
                .iter()
                .filter(|crn| dataset.sections.contains_key(crn))
                .map(|crn| dataset.enrollment(crn))
                .sum();
            (total > max_capacity).then(|| group_id.clone())
        })
        .collect()
}

/// Result of validating one merge group against a dataset (spec.md §4.8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCheck {
    pub total_enrollment: u32,
    pub max_room_capacity: u32,
    pub is_valid: bool,
    /// A merge group may be accepted even when not schedulable; it simply
    /// becomes an unscheduled merge. This field is always true.
    pub can_proceed: bool,
    pub warning: Option<String>,
}

/// Pre-scheduling gate: validates a single merge group submission, raising
/// hard errors on malformed input (spec.md §4.8 "Error conditions").
pub struct MergeValidator;

impl MergeValidator {
    pub fn validate(group_id: &str, crns: &[Crn], dataset: &SchedulingDataset) -> Result<MergeCheck> {
        if crns.is_empty() {
            return Err(SchedulerError::EmptyMergeGroup(group_id.to_string()).into());
        }
        if crns.len() < 2 {
            return Err(SchedulerError::MergeGroupTooSmall(group_id.to_string()).into());
        }
        for crn in crns {
            if !dataset.sections.contains_key(crn) {
                return Err(SchedulerError::UnknownCrnInMergeGroup {
                    group: group_id.to_string(),
                    crn: crn.0.clone(),
                }
                .into());
            }
        }

        let total_enrollment: u32 = crns.iter().map(|crn| dataset.enrollment(crn)).sum();
        let max_room_capacity = dataset.max_room_capacity();
        let is_valid = max_room_capacity > 0 && total_enrollment <= max_room_capacity;

        let warning = if is_valid {
            None
        } else {
            Some(format!(
                "merge group '{group_id}' totals {total_enrollment} students, which exceeds the largest room capacity of {max_room_capacity}"
            ))
        };

        Ok(MergeCheck {
            total_enrollment,
            max_room_capacity,
            is_valid,
            can_proceed: true,
            warning,
        })
    }
}
