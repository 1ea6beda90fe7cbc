//! Sanity checks for the directories and files named in the env file.

pub mod paths;
pub mod report;

use std::path::Path;

use crate::config::model::AppConfig;

/// Env file settings that point at the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    NginxDir,
    BackupDir,
    CacheFile,
}

impl Setting {
    /// Report order.
    pub const ALL: [Setting; 3] = [Setting::NginxDir, Setting::BackupDir, Setting::CacheFile];

    pub fn key(self) -> &'static str {
        match self {
            Setting::NginxDir => "NGINX_DIR",
            Setting::BackupDir => "BACKUP_DIR",
            Setting::CacheFile => "CACHE_FILE",
        }
    }

    /// Resolved value, `None` for an unset cache file.
    pub fn value(self, config: &AppConfig) -> Option<&Path> {
        match self {
            Setting::NginxDir => Some(config.active_dir.as_path()),
            Setting::BackupDir => Some(config.backup_dir.as_path()),
            Setting::CacheFile => config.cache_file.as_deref(),
        }
    }
}

/// What is wrong with a setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    Missing,
    NotADirectory,
    Unreadable(String),
    SameAsActive,
    IsADirectory,
    ParentMissing,
}

/// One problem found on one setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub setting: Setting,
    pub problem: Problem,
}

impl Finding {
    pub fn new(setting: Setting, problem: Problem) -> Self {
        Self { setting, problem }
    }

    /// Whether the tool cannot work with this setting as it stands.
    ///
    /// A missing backup directory or cache directory is created on first use.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            (self.setting, &self.problem),
            (Setting::BackupDir, Problem::Missing) | (_, Problem::ParentMissing)
        )
    }

    pub fn describe(&self) -> String {
        match &self.problem {
            Problem::Missing => "does not exist".to_string(),
            Problem::NotADirectory => "is not a directory".to_string(),
            Problem::Unreadable(reason) => format!("cannot be listed: {}", reason),
            Problem::SameAsActive => "is the same directory as NGINX_DIR".to_string(),
            Problem::IsADirectory => "is a directory, expected a file path".to_string(),
            Problem::ParentMissing => "parent directory does not exist yet".to_string(),
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match (self.setting, &self.problem) {
            (Setting::NginxDir, Problem::Missing) => {
                Some("point NGINX_DIR at the directory nginx includes")
            }
            (Setting::BackupDir, Problem::Missing) => Some("created by the first `move backup`"),
            (Setting::BackupDir, Problem::SameAsActive) => {
                Some("disabled sites would stay loaded; use a directory outside nginx's includes")
            }
            (Setting::CacheFile, Problem::ParentMissing) => Some("created by the first cached `list`"),
            (_, Problem::Unreadable(_)) => Some("check directory permissions"),
            _ => None,
        }
    }
}

/// Runs every check against the resolved configuration.
pub fn validate_config(config: &AppConfig) -> Vec<Finding> {
    paths::check(config)
}

pub fn fatal_count(findings: &[Finding]) -> usize {
    findings.iter().filter(|f| f.is_fatal()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_backup_and_cache_parent_are_advisory() {
        assert!(!Finding::new(Setting::BackupDir, Problem::Missing).is_fatal());
        assert!(!Finding::new(Setting::CacheFile, Problem::ParentMissing).is_fatal());
        assert!(Finding::new(Setting::NginxDir, Problem::Missing).is_fatal());
        assert!(Finding::new(Setting::BackupDir, Problem::SameAsActive).is_fatal());
    }

    #[test]
    fn unset_cache_file_has_no_value() {
        let config = AppConfig::default();
        assert_eq!(Setting::CacheFile.value(&config), None);
        assert_eq!(
            Setting::NginxDir.value(&config),
            Some(Path::new("/etc/nginx/conf.d"))
        );
    }
}
