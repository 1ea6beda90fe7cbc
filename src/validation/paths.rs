//! Filesystem checks for the configured directories. Nothing is created here.

use std::path::Path;

use crate::config::model::AppConfig;

use super::{Finding, Problem, Setting};

/// Checks the active directory, backup directory and cache file path.
pub fn check(config: &AppConfig) -> Vec<Finding> {
    let mut findings = Vec::new();

    if let Some(problem) = directory_problem(&config.active_dir, true) {
        findings.push(Finding::new(Setting::NginxDir, problem));
    }

    if let Some(problem) = directory_problem(&config.backup_dir, false) {
        findings.push(Finding::new(Setting::BackupDir, problem));
    } else if same_directory(&config.active_dir, &config.backup_dir) {
        findings.push(Finding::new(Setting::BackupDir, Problem::SameAsActive));
    }

    if let Some(cache_file) = &config.cache_file {
        if let Some(problem) = cache_file_problem(cache_file) {
            findings.push(Finding::new(Setting::CacheFile, problem));
        }
    }

    findings
}

/// `must_list` also requires the directory to be listable, as the active one is scanned on every `list`.
fn directory_problem(path: &Path, must_list: bool) -> Option<Problem> {
    if !path.exists() {
        return Some(Problem::Missing);
    }
    if !path.is_dir() {
        return Some(Problem::NotADirectory);
    }
    if must_list {
        if let Err(e) = std::fs::read_dir(path) {
            return Some(Problem::Unreadable(e.to_string()));
        }
    }
    None
}

fn cache_file_problem(path: &Path) -> Option<Problem> {
    if path.is_dir() {
        return Some(Problem::IsADirectory);
    }
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) if !parent.exists() => Some(Problem::ParentMissing),
        _ => None,
    }
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
