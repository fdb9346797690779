//! Settings infrastructure for argsel.
//!
//! Loads `settings.toml` to configure how argument selections are offered
//! to the client.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

/// Root settings structure loaded from settings.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Selection behaviour.
    pub selection: Option<SelectionSettings>,
}

/// The `[selection]` table.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionSettings {
    /// Enclosing argument lists offered by `textDocument/selectionRange`.
    pub levels: Option<usize>,

    /// Whether the outer-argument range sits between inner ranges.
    pub include_outer: Option<bool>,

    /// Whether failed argument requests are shown to the user.
    pub report_failures: Option<bool>,
}

/// Effective selection options with defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionOptions {
    pub levels: usize,
    pub include_outer: bool,
    pub report_failures: bool,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            levels: 3,
            include_outer: true,
            report_failures: true,
        }
    }
}

impl SelectionOptions {
    /// Resolve options from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let defaults = Self::default();
        let Some(selection) = settings.selection.as_ref() else {
            return defaults;
        };

        let levels = match selection.levels {
            Some(0) => {
                warn!("selection.levels must be at least 1, using 1");
                1
            }
            Some(levels) => levels,
            None => defaults.levels,
        };

        Self {
            levels,
            include_outer: selection.include_outer.unwrap_or(defaults.include_outer),
            report_failures: selection
                .report_failures
                .unwrap_or(defaults.report_failures),
        }
    }
}

/// Load settings from a settings.toml file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("failed to parse {}: {}", path.display(), e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

/// Discover settings.toml by searching up the directory tree, then direct children.
///
/// Search order:
/// 1. Walk up from `start_dir` to filesystem root
/// 2. If not found, check immediate child directories of `start_dir`
///
/// Returns `(settings, settings_dir)` where `settings_dir` is the directory
/// containing the found settings.toml. If not found, returns
/// `(Settings::default(), start_dir)`.
pub fn discover_settings(start_dir: &Path) -> (Settings, PathBuf) {
    // Phase 1: Walk up from start_dir
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join("settings.toml");
        if candidate.is_file() {
            debug!("using settings from {}", candidate.display());
            return (load_settings(&candidate), dir.to_path_buf());
        }
        current = dir.parent();
    }

    // Phase 2: Check immediate child directories
    if let Ok(entries) = std::fs::read_dir(start_dir) {
        for entry in entries.flatten() {
            if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                let candidate = entry.path().join("settings.toml");
                if candidate.is_file() {
                    debug!("using settings from {}", candidate.display());
                    return (load_settings(&candidate), entry.path());
                }
            }
        }
    }

    (Settings::default(), start_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_selection_table() {
        let options = SelectionOptions::from_settings(&Settings::default());
        assert_eq!(options, SelectionOptions::default());
    }

    #[test]
    fn parses_selection_table() {
        let settings: Settings = toml::from_str(
            r#"
[selection]
levels = 5
include_outer = false
"#,
        )
        .unwrap();
        let options = SelectionOptions::from_settings(&settings);
        assert_eq!(options.levels, 5);
        assert!(!options.include_outer);
        assert!(options.report_failures);
    }

    #[test]
    fn zero_levels_clamps_to_one() {
        let settings = Settings {
            selection: Some(SelectionSettings {
                levels: Some(0),
                ..Default::default()
            }),
        };
        assert_eq!(SelectionOptions::from_settings(&settings).levels, 1);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = make_test_dir("malformed");
        let path = dir.join("settings.toml");
        std::fs::write(&path, "[selection]\nlevels = \"many\"\n").unwrap();

        let settings = load_settings(&path);
        assert!(settings.selection.is_none());

        cleanup_test_dir(&dir);
    }

    #[test]
    fn missing_file_is_default() {
        let settings = load_settings(Path::new("/nonexistent/argsel/settings.toml"));
        assert!(settings.selection.is_none());
    }

    /// Create a unique temp directory for test isolation.
    fn make_test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("argsel-test")
            .join(name)
            .join(format!("{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Clean up a test directory.
    fn cleanup_test_dir(dir: &Path) {
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn discover_settings_in_current_dir() {
        let dir = make_test_dir("discover-current");
        std::fs::write(dir.join("settings.toml"), "[selection]\nlevels = 2\n").unwrap();

        let (settings, settings_dir) = discover_settings(&dir);
        assert_eq!(settings_dir, dir);
        assert_eq!(settings.selection.unwrap().levels, Some(2));

        cleanup_test_dir(&dir);
    }

    #[test]
    fn discover_settings_in_parent_dir() {
        let parent = make_test_dir("discover-parent");
        let child = parent.join("subdir");
        std::fs::create_dir_all(&child).unwrap();
        std::fs::write(
            parent.join("settings.toml"),
            "[selection]\ninclude_outer = false\n",
        )
        .unwrap();

        let (settings, settings_dir) = discover_settings(&child);
        assert_eq!(settings_dir, parent);
        assert_eq!(settings.selection.unwrap().include_outer, Some(false));

        cleanup_test_dir(&parent);
    }

    #[test]
    fn discover_settings_in_child_dir() {
        let parent = make_test_dir("discover-child");
        let child = parent.join("config");
        std::fs::create_dir_all(&child).unwrap();
        std::fs::write(
            child.join("settings.toml"),
            "[selection]\nreport_failures = false\n",
        )
        .unwrap();

        let (settings, settings_dir) = discover_settings(&parent);
        assert_eq!(settings_dir, child);
        assert_eq!(settings.selection.unwrap().report_failures, Some(false));

        cleanup_test_dir(&parent);
    }

    #[test]
    fn discover_settings_parent_preferred_over_child() {
        let parent = make_test_dir("discover-priority");
        let child = parent.join("nested");
        std::fs::create_dir_all(&child).unwrap();
        std::fs::write(parent.join("settings.toml"), "[selection]\nlevels = 4\n").unwrap();
        std::fs::write(child.join("settings.toml"), "[selection]\nlevels = 9\n").unwrap();

        let (settings, settings_dir) = discover_settings(&parent);
        assert_eq!(settings_dir, parent);
        assert_eq!(settings.selection.unwrap().levels, Some(4));

        cleanup_test_dir(&parent);
    }
}
