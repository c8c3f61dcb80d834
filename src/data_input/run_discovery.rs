// src/data_input/run_discovery.rs

use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::constants::RUN_IDENTIFIER_PATTERN;
use crate::data_input::log_data::{PsuTable, TtsTable};
use crate::data_input::log_parser::{parse_psu_file, parse_tts_file};
use crate::error::{AnalysisError, AnalysisResult};

/// All tables sharing one run identifier, in directory listing order.
#[derive(Debug, Default, Clone)]
pub struct RunGroup {
    pub identifier: String,
    pub tts: Vec<TtsTable>,
    pub psu: Vec<PsuTable>,
}

impl RunGroup {
    pub fn new(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            ..Default::default()
        }
    }

    /// Pairs the Nth thrust-test table with the Nth power-supply table.
    pub fn paired_runs(&self) -> AnalysisResult<Vec<(&TtsTable, &PsuTable)>> {
        if self.tts.len() != self.psu.len() {
            return Err(AnalysisError::RunCountMismatch {
                identifier: self.identifier.clone(),
                tts: self.tts.len(),
                psu: self.psu.len(),
            });
        }
        Ok(self.tts.iter().zip(self.psu.iter()).collect())
    }
}

/// Identifier -> `RunGroup`, keeping first-seen order.
#[derive(Debug, Default, Clone)]
pub struct RunCatalog {
    groups: Vec<RunGroup>,
    index: HashMap<String, usize>,
}

impl RunCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn group_mut(&mut self, identifier: &str) -> &mut RunGroup {
        let next = self.groups.len();
        let idx = *self.index.entry(identifier.to_string()).or_insert(next);
        if idx == next {
            self.groups.push(RunGroup::new(identifier));
        }
        &mut self.groups[idx]
    }

    pub fn insert_tts(&mut self, identifier: &str, table: TtsTable) {
        self.group_mut(identifier).tts.push(table);
    }

    pub fn insert_psu(&mut self, identifier: &str, table: PsuTable) {
        self.group_mut(identifier).psu.push(table);
    }

    pub fn get(&self, identifier: &str) -> Option<&RunGroup> {
        self.index.get(identifier).map(|&idx| &self.groups[idx])
    }

    pub fn groups(&self) -> &[RunGroup] {
        &self.groups
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.identifier.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(RUN_IDENTIFIER_PATTERN).expect("run identifier pattern is valid"))
}

/// Extracts the run identifier: the shortest leading part of the name that
/// ends in `_<digits>` (`PropA_1.csv` -> `PropA_1`).
pub fn run_identifier(file_name: &str) -> Option<String> {
    identifier_regex()
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Regular files (or links to them) in `dir`, sorted by file name.
pub fn sorted_file_names(dir: &Path) -> AnalysisResult<Vec<(String, PathBuf)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // Follows symlinks; dangling links and directories are skipped.
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((name, path));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

/// Scans both log directories and groups tables by run identifier.
///
/// The thrust-test directory is read first, so identifiers are ordered by
/// their first appearance there.
pub fn discover_runs(tts_dir: &Path, psu_dir: &Path) -> AnalysisResult<RunCatalog> {
    let mut catalog = RunCatalog::new();

    for (name, path) in sorted_file_names(tts_dir)? {
        match run_identifier(&name) {
            Some(identifier) => catalog.insert_tts(&identifier, parse_tts_file(&path)?),
            None => log::debug!("Ignoring '{}': no run identifier", path.display()),
        }
    }
    for (name, path) in sorted_file_names(psu_dir)? {
        match run_identifier(&name) {
            Some(identifier) => catalog.insert_psu(&identifier, parse_psu_file(&path)?),
            None => log::debug!("Ignoring '{}': no run identifier", path.display()),
        }
    }

    log::info!(
        "Discovered {} run identifier(s) in '{}' and '{}'",
        catalog.len(),
        tts_dir.display(),
        psu_dir.display()
    );
    Ok(catalog)
}


// src/data_input/run_discovery.rs
