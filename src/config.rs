use std::collections::HashMap;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::bucket::BucketLabels;
use crate::error::{QueueError, Result};
use crate::queue::{QueueSettings, DEFAULT_MAX_DAYS_AHEAD};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub queue: QueueConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QueueConfig {
    /// JSON snapshot exported by the scheduler.
    #[serde(default)]
    pub snapshot: PathBuf,
    /// Note paths in the snapshot are relative to this directory.
    #[serde(default = "default_notes_dir")]
    pub notes_dir: PathBuf,
    #[serde(default = "default_max_days_ahead")]
    pub max_days_ahead: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LabelsConfig {
    #[serde(default = "default_new")]
    pub new: String,
    #[serde(default = "default_yesterday")]
    pub yesterday: String,
    #[serde(default = "default_today")]
    pub today: String,
    #[serde(default = "default_tomorrow")]
    pub tomorrow: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            new: default_new(),
            yesterday: default_yesterday(),
            today: default_today(),
            tomorrow: default_tomorrow(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UiConfig {
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width_percent: u8,
    #[serde(default = "default_mouse")]
    pub mouse: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            sidebar_width_percent: default_sidebar_width(),
            mouse: default_mouse(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct KeybindingsConfig {
    #[serde(default = "default_preset")]
    pub preset: String,
    #[serde(default)]
    pub bindings: HashMap<String, String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            bindings: HashMap::new(),
        }
    }
}

fn default_notes_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_days_ahead() -> i64 {
    DEFAULT_MAX_DAYS_AHEAD
}

fn default_new() -> String {
    BucketLabels::default().new
}

fn default_yesterday() -> String {
    BucketLabels::default().yesterday
}

fn default_today() -> String {
    BucketLabels::default().today
}

fn default_tomorrow() -> String {
    BucketLabels::default().tomorrow
}

fn default_sidebar_width() -> u8 {
    40
}

fn default_mouse() -> bool {
    true
}

fn default_preset() -> String {
    "vim".into()
}

impl AppConfig {
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        let config: AppConfig = Figment::new()
            .merge(Serialized::defaults(AppConfig::defaults()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("REVIEW_QUEUE_").split("__").lowercase(true))
            .extract()
            .map_err(|e| QueueError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue.snapshot.as_os_str().is_empty() {
            return Err(QueueError::Config(
                "queue.snapshot is required (path to the scheduler's JSON export)".into(),
            ));
        }
        if self.queue.max_days_ahead < 0 {
            return Err(QueueError::Config(format!(
                "queue.max_days_ahead must be >= 0, got {}",
                self.queue.max_days_ahead
            )));
        }
        if !(10..=90).contains(&self.ui.sidebar_width_percent) {
            return Err(QueueError::Config(format!(
                "ui.sidebar_width_percent must be between 10 and 90, got {}",
                self.ui.sidebar_width_percent
            )));
        }
        let labels = [
            ("labels.new", &self.labels.new),
            ("labels.yesterday", &self.labels.yesterday),
            ("labels.today", &self.labels.today),
            ("labels.tomorrow", &self.labels.tomorrow),
        ];
        if let Some((key, _)) = labels.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(QueueError::Config(format!("{} must not be empty", key)));
        }
        Ok(())
    }

    pub fn queue_settings(&self) -> QueueSettings {
        QueueSettings {
            max_days_ahead: self.queue.max_days_ahead,
            labels: BucketLabels {
                new: self.labels.new.clone(),
                yesterday: self.labels.yesterday.clone(),
                today: self.labels.today.clone(),
                tomorrow: self.labels.tomorrow.clone(),
            },
        }
    }

    /// Absolute location of a note path taken from the snapshot.
    pub fn note_path(&self, note: &str) -> PathBuf {
        let path = Path::new(note);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.queue.notes_dir.join(path)
        }
    }

    pub fn config_dir() -> Option<PathBuf> {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(|xdg| PathBuf::from(xdg).join("review-queue"))
            .or_else(|| {
                directories::BaseDirs::new()
                    .map(|dirs| dirs.home_dir().join(".config").join("review-queue"))
            })
    }

    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = r#"[queue]
snapshot = ""        # JSON export of due notes per deck
notes_dir = "."      # note paths in the snapshot are relative to this
max_days_ahead = 365 # hide buckets further out than this

[labels]
new = "New"
yesterday = "Yesterday"
today = "Today"
tomorrow = "Tomorrow"

[ui]
sidebar_width_percent = 40
mouse = true    # click opens, right click shows the note menu

[keybindings]
preset = "vim"  # vim | emacs | vscode

# Override specific keys:
# [keybindings.bindings]
# quit = "Ctrl+q"
# context_menu = "Space"
"#;

        std::fs::write(path, content)?;
        Ok(())
    }

    fn defaults() -> Self {
        Self {
            queue: QueueConfig {
                snapshot: PathBuf::new(),
                notes_dir: default_notes_dir(),
                max_days_ahead: default_max_days_ahead(),
            },
            labels: LabelsConfig::default(),
            ui: UiConfig::default(),
            keybindings: KeybindingsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_valid_config_from_toml() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[queue]
snapshot = "/tmp/queue.json"
notes_dir = "/home/me/vault"
max_days_ahead = 7

[labels]
today = "Hoy"

[keybindings]
preset = "emacs"

[ui]
mouse = false
"#,
        );

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.queue.snapshot, PathBuf::from("/tmp/queue.json"));
        assert_eq!(config.queue.notes_dir, PathBuf::from("/home/me/vault"));
        assert_eq!(config.queue.max_days_ahead, 7);
        assert_eq!(config.labels.today, "Hoy");
        assert_eq!(config.labels.new, "New");
        assert_eq!(config.keybindings.preset, "emacs");
        assert!(!config.ui.mouse);
        assert_eq!(config.ui.sidebar_width_percent, 40);
    }

    #[test]
    fn defaults_apply_for_missing_optional_fields() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[queue]
snapshot = "queue.json"
"#,
        );

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.queue.max_days_ahead, 365);
        assert_eq!(config.queue.notes_dir, PathBuf::from("."));
        assert_eq!(config.labels.yesterday, "Yesterday");
        assert_eq!(config.keybindings.preset, "vim");
    }

    #[test]
    fn validate_fails_without_snapshot() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[queue]
snapshot = ""
"#,
        );

        let err = AppConfig::load_from_path(&path);
        assert!(err.is_err());
        let msg = err.unwrap_err().to_string();
        assert!(msg.contains("queue.snapshot"));
    }

    #[test]
    fn validate_fails_on_negative_cutoff() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[queue]
snapshot = "queue.json"
max_days_ahead = -2
"#,
        );

        let msg = AppConfig::load_from_path(&path).unwrap_err().to_string();
        assert!(msg.contains("max_days_ahead"));
    }

    #[test]
    fn validate_fails_on_extreme_sidebar_width() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[queue]
snapshot = "queue.json"

[ui]
sidebar_width_percent = 95
"#,
        );

        let msg = AppConfig::load_from_path(&path).unwrap_err().to_string();
        assert!(msg.contains("sidebar_width_percent"));
    }

    #[test]
    fn validate_fails_on_blank_label() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[queue]
snapshot = "queue.json"

[labels]
tomorrow = "  "
"#,
        );

        let msg = AppConfig::load_from_path(&path).unwrap_err().to_string();
        assert!(msg.contains("labels.tomorrow"));
    }

    #[test]
    fn queue_settings_carry_labels_and_cutoff() {
        let mut config = AppConfig::defaults();
        config.queue.max_days_ahead = 3;
        config.labels.new = "Fresh".into();

        let settings = config.queue_settings();
        assert_eq!(settings.max_days_ahead, 3);
        assert_eq!(settings.labels.new, "Fresh");
        assert_eq!(settings.labels.today, "Today");
    }

    #[test]
    fn note_path_joins_relative_paths() {
        let mut config = AppConfig::defaults();
        config.queue.notes_dir = PathBuf::from("/vault");
        assert_eq!(config.note_path("cards/a.md"), PathBuf::from("/vault/cards/a.md"));
        assert_eq!(config.note_path("/abs/b.md"), PathBuf::from("/abs/b.md"));
    }

    #[test]
    fn write_default_creates_config_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("subdir").join("config.toml");

        AppConfig::write_default(&path).unwrap();

        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("max_days_ahead"));
        assert!(content.contains("vim"));
    }

    #[test]
    fn default_config_parses_but_needs_snapshot() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        AppConfig::write_default(&path).unwrap();

        let msg = AppConfig::load_from_path(&path).unwrap_err().to_string();
        assert!(msg.contains("queue.snapshot"));
    }

    #[test]
    fn keybinding_overrides_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[queue]
snapshot = "queue.json"

[keybindings.bindings]
quit = "Ctrl+q"
reload = "F5"
"#,
        );

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.keybindings.bindings.get("quit").unwrap(), "Ctrl+q");
        assert_eq!(config.keybindings.bindings.get("reload").unwrap(), "F5");
    }

    #[test]
    fn config_dir_returns_some() {
        let dir = AppConfig::config_dir();
        assert!(dir.is_some());
    }
}
