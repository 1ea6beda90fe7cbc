//! Listing records and their JSON output shapes.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::ListFormat;

/// Which directory a configuration file was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Loaded by nginx.
    Active,
    /// Parked in the backup directory.
    Backup,
}

impl Origin {
    pub fn is_disabled(self) -> bool {
        self == Origin::Backup
    }
}

/// One configuration file found by a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFileRecord {
    pub filename: String,
    pub server_name: String,
    pub origin: Origin,
    /// Directory the file was found in, as configured.
    pub dir: PathBuf,
}

#[derive(Serialize)]
struct DirectoryEntry<'a> {
    filename: &'a str,
    server_name: &'a str,
    current_dir: &'a Path,
}

#[derive(Serialize)]
struct SourceEntry<'a> {
    filename: &'a str,
    server_name: &'a str,
    source: Origin,
    disabled: bool,
}

/// Serializes records as a pretty-printed JSON array in the requested shape.
pub fn render(records: &[ConfigFileRecord], format: ListFormat) -> Result<String, serde_json::Error> {
    match format {
        ListFormat::Directory => {
            let entries: Vec<_> = records
                .iter()
                .map(|r| DirectoryEntry {
                    filename: &r.filename,
                    server_name: &r.server_name,
                    current_dir: &r.dir,
                })
                .collect();
            serde_json::to_string_pretty(&entries)
        }
        ListFormat::Source => {
            let entries: Vec<_> = records
                .iter()
                .map(|r| SourceEntry {
                    filename: &r.filename,
                    server_name: &r.server_name,
                    source: r.origin,
                    disabled: r.origin.is_disabled(),
                })
                .collect();
            serde_json::to_string_pretty(&entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn records() -> Vec<ConfigFileRecord> {
        vec![
            ConfigFileRecord {
                filename: "a.conf".to_string(),
                server_name: "a.example.com".to_string(),
                origin: Origin::Active,
                dir: PathBuf::from("/etc/nginx/conf.d"),
            },
            ConfigFileRecord {
                filename: "c.conf".to_string(),
                server_name: "no_server_name".to_string(),
                origin: Origin::Backup,
                dir: PathBuf::from("/home/manager-bkp"),
            },
        ]
    }

    #[test]
    fn directory_shape_carries_current_dir() {
        let out = render(&records(), ListFormat::Directory).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            json!([
                {"filename": "a.conf", "server_name": "a.example.com", "current_dir": "/etc/nginx/conf.d"},
                {"filename": "c.conf", "server_name": "no_server_name", "current_dir": "/home/manager-bkp"}
            ])
        );
        assert!(out.starts_with("[\n  {\n    \"filename\""));
    }

    #[test]
    fn source_shape_carries_tag_and_flag() {
        let out = render(&records(), ListFormat::Source).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            json!([
                {"filename": "a.conf", "server_name": "a.example.com", "source": "active", "disabled": false},
                {"filename": "c.conf", "server_name": "no_server_name", "source": "backup", "disabled": true}
            ])
        );
    }

    #[test]
    fn empty_listing_is_empty_array() {
        assert_eq!(render(&[], ListFormat::Directory).unwrap(), "[]");
    }
}
