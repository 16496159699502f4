//! Input file discovery.

use crate::config::MergeConfig;
use crate::error::{MergeError, MergeResult};
use std::path::PathBuf;

/// Find the input workbooks for a run.
///
/// Matches `config.pattern` inside `config.data_dir` (the directory part is
/// taken literally, only the pattern is a glob). Directories are ignored.
/// The result is sorted by path so repeated runs see files in the same order.
pub fn discover_inputs(config: &MergeConfig) -> MergeResult<Vec<PathBuf>> {
    let dir = glob::Pattern::escape(&config.data_dir.to_string_lossy());
    let pattern = PathBuf::from(dir)
        .join(&config.pattern)
        .to_string_lossy()
        .into_owned();

    tracing::info!("Searching for Excel files with pattern '{}'...", pattern);

    let entries = glob::glob(&pattern).map_err(|source| MergeError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    tracing::debug!(count = files.len(), "discovery finished");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(dir: &std::path::Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_matches_pattern_only() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "signal_mt_stop_b.xlsx");
        touch(dir.path(), "signal_mt_stop_a.xlsx");
        touch(dir.path(), "all_signal_mt_stop_2024-01-01_00-00-00.xlsx");
        touch(dir.path(), "signal_mt_stop_c.csv");
        touch(dir.path(), "other.xlsx");
        fs::create_dir(dir.path().join("signal_mt_stop_dir.xlsx")).unwrap();

        let config = MergeConfig::default().with_data_dir(dir.path());
        let files = discover_inputs(&config).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["signal_mt_stop_a.xlsx", "signal_mt_stop_b.xlsx"]);
    }

    #[test]
    fn test_discovery_is_repeatable() {
        let dir = tempdir().unwrap();
        for name in ["signal_mt_stop_3.xlsx", "signal_mt_stop_1.xlsx", "signal_mt_stop_2.xlsx"] {
            touch(dir.path(), name);
        }
        let config = MergeConfig::default().with_data_dir(dir.path());

        let first = discover_inputs(&config).unwrap();
        let second = discover_inputs(&config).unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "unrelated.xlsx");
        let config = MergeConfig::default().with_data_dir(dir.path());
        assert!(discover_inputs(&config).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        let config = MergeConfig::default().with_data_dir(dir.path().join("nope"));
        assert!(discover_inputs(&config).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = tempdir().unwrap();
        let config = MergeConfig::default()
            .with_data_dir(dir.path())
            .with_pattern("signal_[.xlsx");
        assert!(matches!(
            discover_inputs(&config),
            Err(MergeError::Pattern { .. })
        ));
    }
}
