use crate::error::{Result, SchedulerError};
use crate::types::{Room, Section, Student};
use std::collections::HashSet;

/// Non-fatal findings from ingest-time validation. Anything fatal (duplicate
/// ids) raises a `SchedulerError` directly instead of landing here.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Eager checks run before `SchedulingDataset::build` (spec.md §7.1
/// InvalidInput). Catches the one class of error the dataset builder would
/// otherwise paper over silently: duplicate ids, which `HashMap::collect`
/// resolves by last-write-wins rather than failing.
pub fn validate_input(sections: &[Section], students: &[Student], rooms: &[Room]) -> Result<ValidationResult> {
    check_duplicate_crns(sections)?;
    check_duplicate_student_ids(students)?;
    check_duplicate_room_names(rooms)?;

    let mut result = ValidationResult::default();

    let crns: HashSet<&str> = sections.iter().map(|s| s.crn.0.as_str()).collect();
    for student in students {
        for crn in &student.enrolled_sections {
            if !crns.contains(crn.0.as_str()) {
                result.add_warning(format!(
                    "student '{}' references unknown crn '{}' (will be ignored)",
                    student.student_id, crn
                ));
            }
        }
    }

    if rooms.is_empty() {
        result.add_warning("no rooms supplied; room assignment will leave every section unassigned".to_string());
    }

    Ok(result)
}

fn check_duplicate_crns(sections: &[Section]) -> Result<()> {
    let mut seen = HashSet::new();
    for section in sections {
        if !seen.insert(&section.crn) {
            return Err(SchedulerError::DuplicateId {
                id_type: "crn".to_string(),
                id: section.crn.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

fn check_duplicate_student_ids(students: &[Student]) -> Result<()> {
    let mut seen = HashSet::new();
    for student in students {
        if !seen.insert(&student.student_id) {
            return Err(SchedulerError::DuplicateId {
                id_type: "student".to_string(),
                id: student.student_id.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

fn check_duplicate_room_names(rooms: &[Room]) -> Result<()> {
    let mut seen = HashSet::new();
    for room in rooms {
        if !seen.insert(&room.name) {
            return Err(SchedulerError::DuplicateId {
                id_type: "room".to_string(),
                id: room.name.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Crn, StudentId};

    fn section(crn: &str) -> Section {
        Section {
            crn: Crn(crn.to_string()),
            course_code: crn.to_string(),
            enrollment: 10,
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

    fn room(name: &str) -> Room {
        Room { name: crate::types::RoomId(name.to_string()), capacity: 50 }
    }

    #[test]
    fn duplicate_crn_fails_fast() {
        let sections = vec![section("A"), section("A")];
        let err = validate_input(&sections, &[], &[room("R1")]).unwrap_err();
        assert!(err.to_string().contains("crn"));
    }

    #[test]
    fn duplicate_student_id_fails_fast() {
        let sections = vec![section("A")];
        let students = vec![student("s1", &["A"]), student("s1", &["A"])];
        let err = validate_input(&sections, &students, &[room("R1")]).unwrap_err();
        assert!(err.to_string().contains("student"));
    }

    #[test]
    fn duplicate_room_name_fails_fast() {
        let sections = vec![section("A")];
        let rooms = vec![room("R1"), room("R1")];
        let err = validate_input(&sections, &[], &rooms).unwrap_err();
        assert!(err.to_string().contains("room"));
    }

    #[test]
    fn unknown_crn_reference_is_a_warning_not_an_error() {
        let sections = vec![section("A")];
        let students = vec![student("s1", &["A", "ghost"])];
        let result = validate_input(&sections, &students, &[room("R1")]).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("ghost"));
    }

    #[test]
    fn empty_room_list_produces_a_warning() {
        let sections = vec![section("A")];
        let result = validate_input(&sections, &[], &[]).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("no rooms supplied")));
    }

    #[test]
    fn clean_input_has_no_warnings() {
        let sections = vec![section("A")];
        let students = vec![student("s1", &["A"])];
        let result = validate_input(&sections, &students, &[room("R1")]).unwrap();
        assert!(result.warnings.is_empty());
    }
}
