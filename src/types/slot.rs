/// Candidate time slots per day. Fixed, bit-exact (spec.md §6).
pub const BLOCKS_PER_DAY: u8 = 5;

/// Enrollment at or above which a section is a "large course" (spec.md §6).
pub const LARGE_COURSE_THRESHOLD: u32 = 100;

/// Days 0..EARLY_WEEK_CUTOFF are "early week" (spec.md §6).
pub const EARLY_WEEK_CUTOFF: u8 = 3;

/// Day names, Monday-first. Fixed, bit-exact.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Human-readable block time labels, keyed by block index. Fixed, bit-exact.
pub fn block_time(block: u8) -> &'static str {
    match block {
        0 => "9AM-11AM",
        1 => "11:30AM-1:30PM",
        2 => "2PM-4PM",
        3 => "4:30PM-6:30PM",
        4 => "7PM-9PM",
        _ => "",
    }
}

/// A single (day, block) slot in the candidate grid.
pub type Slot = (u8, u8);

/// The full candidate grid `{0..max_days} x {0..BLOCKS_PER_DAY}`.
pub fn all_slots(max_days: u8) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(max_days as usize * BLOCKS_PER_DAY as usize);
    for day in 0..max_days {
        for block in 0..BLOCKS_PER_DAY {
            slots.push((day, block));
        }
    }
    slots
}

pub fn day_name(day: u8) -> &'static str {
    DAY_NAMES.get(day as usize).copied().unwrap_or("Unknown")
}
