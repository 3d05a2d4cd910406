use crate::types::{Crn, MergeGroups, Room, RoomId, SchedulingDataset, Slot};
use std::collections::{HashMap, HashSet};

/// Output of the room-assignment phase (spec.md §4.5).
pub struct RoomAssignResult {
    pub room_assignments: HashMap<Crn, RoomId>,
    /// CRNs placed by the capacity-deficit fallback (steps 3/4 of §4.5).
    pub invalid: HashSet<Crn>,
}

/// Capacity-aware, smallest-fit-first room assignment (spec.md §4.5).
pub struct RoomAssigner;

impl RoomAssigner {
    pub fn assign(
        assignments: &HashMap<Crn, Slot>,
        placement_order: &[Crn],
        dataset: &SchedulingDataset,
        merges: &MergeGroups,
        crn_to_group: &HashMap<Crn, String>,
    ) -> RoomAssignResult {
        let mut rooms_by_capacity: Vec<&Room> = dataset.rooms.iter().collect();
        rooms_by_capacity.sort_by(|a, b| a.capacity.cmp(&b.capacity).then(a.name.cmp(&b.name)));

        let mut used_by_slot: HashMap<Slot, HashSet<RoomId>> = HashMap::new();
        let mut room_assignments = HashMap::new();
        let mut invalid = HashSet::new();

        for repr in placement_order {
            let slot = match assignments.get(repr) {
                Some(&s) => s,
                None => continue,
            };

            // Representative carries the whole group; everyone else adopts
            // its room in the same pass rather than a separate one.
            let members: Vec<Crn> = match crn_to_group.get(repr) {
                Some(group_id) => merges[group_id]
                    .iter()
                    .filter(|c| dataset.sections.contains_key(*c))
                    .cloned()
                    .collect(),
                None => vec![repr.clone()],
            };
            let required: u32 = members.iter().map(|c| dataset.enrollment(c)).sum();

            let used = used_by_slot.entry(slot).or_default();

            let chosen = rooms_by_capacity
                .iter()
                .find(|r| r.capacity >= required && !used.contains(&r.name))
                .map(|r| (r.name.clone(), false))
                .or_else(|| {
                    rooms_by_capacity
                        .iter()
                        .rev()
                        .find(|r| !used.contains(&r.name))
                        .map(|r| (r.name.clone(), true))
                })
                .or_else(|| rooms_by_capacity.iter().next_back().map(|r| (r.name.clone(), true)));

            if let Some((room_name, is_invalid)) = chosen {
                used.insert(room_name.clone());
                for member in &members {
                    room_assignments.insert(member.clone(), room_name.clone());
                    if is_invalid {
                        invalid.insert(member.clone());
                    }
                }
            }
        }

        RoomAssignResult {
            room_assignments,
            invalid,
        }
    }
}
