use super::validate_input;
use crate::error::{Result, SchedulerError};
use crate::types::{Crn, MergeGroups, Room, SchedulingDataset, SchedulingParams, Section, Student};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Everything a host needs to call [`crate::core::schedule_exams`]: a
/// normalized dataset, the merge map, and resolved parameters.
pub struct ParsedInput {
    pub dataset: SchedulingDataset,
    pub merges: MergeGroups,
    pub params: SchedulingParams,
    pub warnings: Vec<String>,
}

/// Load a complete scheduling input from a directory of JSON files plus an
/// optional `config.toml`, following the same "required JSON, optional TOML"
/// layout as `load_input_from_dir` in the teacher's parser.
///
/// Runs the eager `InvalidInput` checks (spec.md §7.1) before the dataset is
/// built, so a duplicate id fails the whole call rather than being silently
/// dropped by `SchedulingDataset::build`'s `HashMap::collect`.
pub fn load_input_from_dir(dir: &Path) -> Result<ParsedInput> {
    let sections = load_sections(&dir.join("sections.json"))?;
    let students = load_students(&dir.join("students.json"))?;
    let rooms = load_rooms(&dir.join("rooms.json"))?;
    let merges = load_merges(&dir.join("merges.json"))?;
    let params = load_config_or_default(&dir.join("config.toml"));
    params.validate()?;

    let validation = validate_input(&sections, &students, &rooms)?;
    let dataset = SchedulingDataset::build(sections, students, rooms);

    Ok(ParsedInput {
        dataset,
        merges,
        params,
        warnings: validation.warnings,
    })
}

pub fn load_sections(path: &Path) -> Result<Vec<Section>> {
    load_json_file(path)
}

pub fn load_students(path: &Path) -> Result<Vec<Student>> {
    load_json_file(path)
}

pub fn load_rooms(path: &Path) -> Result<Vec<Room>> {
    load_json_file(path)
}

/// Merge groups, present or absent. An absent `merges.json` means "no merge
/// groups" rather than an error — not every dataset has cross-listed
/// sections.
pub fn load_merges(path: &Path) -> Result<MergeGroups> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let raw: HashMap<String, Vec<Crn>> = load_json_file(path)?;
    Ok(raw)
}

/// Load params from TOML file, or use defaults (spec.md's ambient
/// `SchedulingParams` defaults) if the file is absent or unparseable.
pub fn load_config_or_default(path: &Path) -> SchedulingParams {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => SchedulingParams::default(),
        }
    } else {
        SchedulingParams::default()
    }
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| SchedulerError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SchedulerError::JsonParse {
            file: path_str,
            message: e.to_string(),
        }
        .into()
    })
}
