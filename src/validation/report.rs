//! Per-setting report printed by `config-validate`.

use crate::config::model::AppConfig;

use super::{fatal_count, Finding, Setting};

/// Renders one block per setting with its resolved value and any findings.
pub fn format_report(config: &AppConfig, findings: &[Finding]) -> String {
    let mut report = String::new();

    for setting in Setting::ALL {
        let value = match setting.value(config) {
            Some(path) => path.display().to_string(),
            None => "(unset, listings are not cached)".to_string(),
        };
        report.push_str(&format!("{:<11} = {}\n", setting.key(), value));

        let mut any = false;
        for finding in findings.iter().filter(|f| f.setting == setting) {
            any = true;
            let label = if finding.is_fatal() { "error" } else { "warning" };
            report.push_str(&format!("    {}: {}", label, finding.describe()));
            if let Some(hint) = finding.hint() {
                report.push_str(&format!(" ({})", hint));
            }
            report.push('\n');
        }
        if !any && setting.value(config).is_some() {
            report.push_str("    ok\n");
        }
    }

    let fatal = fatal_count(findings);
    report.push_str(&format!(
        "\n{} error(s), {} warning(s)\n",
        fatal,
        findings.len() - fatal
    ));

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Problem;
    use std::path::PathBuf;

    #[test]
    fn clean_report_marks_each_setting_ok() {
        let report = format_report(&AppConfig::default(), &[]);
        assert_eq!(
            report,
            "NGINX_DIR   = /etc/nginx/conf.d\n    ok\n\
             BACKUP_DIR  = /home/manager-bkp\n    ok\n\
             CACHE_FILE  = (unset, listings are not cached)\n\
             \n0 error(s), 0 warning(s)\n"
        );
    }

    #[test]
    fn findings_sit_under_their_setting() {
        let config = AppConfig {
            cache_file: Some(PathBuf::from("/var/cache/conf-mover/cache.json")),
            ..AppConfig::default()
        };
        let findings = vec![
            Finding::new(Setting::CacheFile, Problem::ParentMissing),
            Finding::new(Setting::NginxDir, Problem::Missing),
        ];

        let report = format_report(&config, &findings);
        let nginx = report.find("NGINX_DIR").unwrap();
        let missing = report.find("    error: does not exist").unwrap();
        let backup = report.find("BACKUP_DIR").unwrap();
        assert!(nginx < missing && missing < backup);
        assert!(report.contains(
            "CACHE_FILE  = /var/cache/conf-mover/cache.json\n    warning: parent directory does not exist yet (created by the first cached `list`)\n"
        ));
        assert!(report.ends_with("1 error(s), 1 warning(s)\n"));
    }
}
