use super::{Crn, InstructorId, Room, RoomId, Section, Student, StudentId};
use std::collections::{HashMap, HashSet};

/// Complete, normalized input to the scheduling core.
///
/// All fields are immutable after construction (spec.md §3). The two
/// precomputed lookups are canonical: every conflict check in `core::`
/// reads only from them, never by re-deriving from `sections`/`students`.
#[derive(Debug, Clone)]
pub struct SchedulingDataset {
    pub sections: HashMap<Crn, Section>,
    pub students: HashMap<StudentId, Student>,
    pub rooms: Vec<Room>,
    pub students_by_section: HashMap<Crn, HashSet<StudentId>>,
    pub instructors_by_section: HashMap<Crn, HashSet<InstructorId>>,
}

impl SchedulingDataset {
    /// Build a dataset from raw entities, deriving the canonical lookups.
    ///
    /// Sections with zero enrollment are dropped, per spec.md §3 invariant 5
    /// ("a section with 0 enrollment is excluded from the dataset before the
    /// core runs") — this is the one place that precondition is enforced
    /// rather than merely assumed, since real ingest data routinely contains
    /// cancelled sections.
    pub fn build(sections: Vec<Section>, students: Vec<Student>, rooms: Vec<Room>) -> Self {
        let sections: HashMap<Crn, Section> = sections
            .into_iter()
            .filter(|s| s.enrollment > 0)
            .map(|s| (s.crn.clone(), s))
            .collect();

        let mut students_by_section: HashMap<Crn, HashSet<StudentId>> = HashMap::new();
        let mut student_map: HashMap<StudentId, Student> = HashMap::new();
        for student in students {
            for crn in &student.enrolled_sections {
                if sections.contains_key(crn) {
                    students_by_section
                        .entry(crn.clone())
                        .or_default()
                        .insert(student.student_id.clone());
                }
            }
            student_map.insert(student.student_id.clone(), student);
        }

        let instructors_by_section: HashMap<Crn, HashSet<InstructorId>> = sections
            .values()
            .map(|s| (s.crn.clone(), s.instructors.clone()))
            .collect();

        Self {
            sections,
            students: student_map,
            rooms,
            students_by_section,
            instructors_by_section,
        }
    }

    pub fn enrollment(&self, crn: &Crn) -> u32 {
        self.sections.get(crn).map(|s| s.enrollment).unwrap_or(0)
    }

    pub fn students_of(&self, crn: &Crn) -> &HashSet<StudentId> {
        static EMPTY: std::sync::OnceLock<HashSet<StudentId>> = std::sync::OnceLock::new();
        self.students_by_section
            .get(crn)
            .unwrap_or_else(|| EMPTY.get_or_init(HashSet::new))
    }

    pub fn instructors_of(&self, crn: &Crn) -> &HashSet<InstructorId> {
        static EMPTY: std::sync::OnceLock<HashSet<InstructorId>> = std::sync::OnceLock::new();
        self.instructors_by_section
            .get(crn)
            .unwrap_or_else(|| EMPTY.get_or_init(HashSet::new))
    }

    pub fn max_room_capacity(&self) -> u32 {
        self.rooms.iter().map(|r| r.capacity).max().unwrap_or(0)
    }
}
