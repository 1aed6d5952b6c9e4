use crate::error::{Result, TimelineError};
use crate::types::{Category, SessionDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Top-level run configuration, loaded from JSON or TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Chart title.
    pub title: String,
    /// Where the artifacts are written. Relative paths in a config file are
    /// resolved against the file's directory.
    pub output_dir: PathBuf,
    /// Session name to transcript descriptor.
    pub sessions: BTreeMap<String, SessionDescriptor>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            title: "Session Activity Timeline".into(),
            output_dir: PathBuf::from("."),
            sessions: BTreeMap::new(),
        }
    }
}

impl TimelineConfig {
    /// Pick the configuration for a run.
    ///
    /// An existing file is loaded (and must parse); a missing file or no path
    /// at all falls back to [`TimelineConfig::builtin`].
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => {
                info!("Loading config from {}", path.display());
                Self::load_from(path)
            }
            Some(path) => {
                warn!("Config file not found: {}", path.display());
                info!("Using built-in sessions");
                Ok(Self::builtin())
            }
            None => Ok(Self::builtin()),
        }
    }

    /// Load configuration from a specific path.
    ///
    /// `.toml` files are parsed as TOML, anything else as JSON.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&contents)?,
            _ => serde_json::from_str(&contents)?,
        };

        config.output_dir = expand_home(&config.output_dir);
        if config.output_dir.is_relative() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            config.output_dir = base.join(&config.output_dir);
        }

        for (name, desc) in &config.sessions {
            if desc.path.as_os_str().is_empty() {
                return Err(TimelineError::Config(format!(
                    "session {:?} has an empty path",
                    name
                )));
            }
        }

        Ok(config)
    }

    /// The session table used when no config file is supplied.
    pub fn builtin() -> Self {
        let claude = |project: &str, id: &str| {
            SessionDescriptor::new(
                format!("~/.claude/projects/{}/{}.jsonl", project, id),
                Category::Claude,
            )
        };
        let codex = |day: &str, file: &str| {
            SessionDescriptor::new(
                format!("~/.codex/sessions/2026/01/{}/{}.jsonl", day, file),
                Category::Codex,
            )
        };

        let sessions = BTreeMap::from([
            (
                "Claude Code #1".to_string(),
                claude(
                    "-Users-stefansko-conductor-workspaces-jax-js-mcmc-lyon",
                    "0b9b0665-46df-40fd-b2d0-10df07d451b3",
                ),
            ),
            (
                "Claude Code #2".to_string(),
                claude(
                    "-Users-stefansko-conductor-workspaces-jax-js-mcmc-kyoto",
                    "4045d60b-5016-4c3b-b25d-9174ef216086",
                ),
            ),
            (
                "Claude Code #2.2".to_string(),
                claude(
                    "-Users-stefansko-conductor-workspaces-jax-js-mcmc-kyoto",
                    "d87c1e7e-bfb3-473b-9f11-ec436618f965",
                ),
            ),
            (
                "Claude Code #4".to_string(),
                claude(
                    "-Users-stefansko-conductor-workspaces-jax-js-mcmc-cairo",
                    "3d2b0069-5075-488e-9614-ad30db3f8c9b",
                ),
            ),
            (
                "Claude Code #6".to_string(),
                claude(
                    "-Users-stefansko-jax-js-mcmc",
                    "c2f46c1d-6ecd-4e41-a0af-d1ca3b2cf4e8",
                ),
            ),
            (
                "Codex #2.1".to_string(),
                codex(
                    "17",
                    "rollout-2026-01-17T00-08-07-019bc910-e873-7f91-b5e9-659c99dfa485",
                ),
            ),
            (
                "Codex #3".to_string(),
                codex(
                    "16",
                    "rollout-2026-01-16T16-46-56-019bc77d-000e-7252-99f9-f3d45926c791",
                ),
            ),
            (
                "Codex #3.1".to_string(),
                codex(
                    "16",
                    "rollout-2026-01-16T23-53-58-019bc903-f3de-71f0-bbff-67bd1983c4b3",
                ),
            ),
            (
                "Codex #5a".to_string(),
                codex(
                    "16",
                    "rollout-2026-01-16T23-25-23-019bc8e9-c9b9-7b80-9906-aed4c2a8027b",
                ),
            ),
            (
                "Codex #5b".to_string(),
                codex(
                    "17",
                    "rollout-2026-01-17T00-38-20-019bc92c-9234-7c31-b59e-0937c69da930",
                ),
            ),
        ]);

        Self {
            title: "Vibe Engineering Activity Timeline".into(),
            output_dir: PathBuf::from("docs"),
            sessions,
        }
    }
}

/// Replace a leading `~` with the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_table() {
        let config = TimelineConfig::builtin();
        assert_eq!(config.sessions.len(), 10);
        let claude = config
            .sessions
            .values()
            .filter(|d| d.category == Category::Claude)
            .count();
        assert_eq!(claude, 5);
        assert!(config.sessions["Codex #3"]
            .path
            .to_string_lossy()
            .starts_with("~/.codex/sessions/2026/01/16/"));
    }

    #[test]
    fn test_load_json_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("timeline_config.json");
        std::fs::write(
            &path,
            r#"{
                "title": "Sprint Review",
                "output_dir": "out",
                "sessions": {
                    "Claude Code #1": {"path": "/logs/a.jsonl", "type": "claude"},
                    "Codex #1": {"path": "/logs/b.jsonl", "type": "codex"}
                }
            }"#,
        )
        .unwrap();

        let config = TimelineConfig::load_from(&path).unwrap();
        assert_eq!(config.title, "Sprint Review");
        assert_eq!(config.output_dir, dir.path().join("out"));
        assert_eq!(config.sessions.len(), 2);
        assert_eq!(config.sessions["Codex #1"].category, Category::Codex);
    }

    #[test]
    fn test_load_toml_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("timeline.toml");
        std::fs::write(
            &path,
            r#"
title = "From TOML"
output_dir = "/tmp/timeline-out"

[sessions."Claude Code #1"]
path = "/logs/a.jsonl"
type = "claude"
"#,
        )
        .unwrap();

        let config = TimelineConfig::load_from(&path).unwrap();
        assert_eq!(config.title, "From TOML");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/timeline-out"));
        assert_eq!(config.sessions["Claude Code #1"].category, Category::Claude);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("minimal.json");
        std::fs::write(&path, "{}").unwrap();

        let config = TimelineConfig::load_from(&path).unwrap();
        assert_eq!(config.title, "Session Activity Timeline");
        assert_eq!(config.output_dir, dir.path().join("."));
        assert!(config.sessions.is_empty());
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"sessions": {"a": {"path": 3}}"#).unwrap();

        let err = TimelineConfig::resolve(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, TimelineError::Json(_)));
    }

    #[test]
    fn test_unknown_category_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad_type.json");
        std::fs::write(
            &path,
            r#"{"sessions": {"a": {"path": "/x.jsonl", "type": "gemini"}}}"#,
        )
        .unwrap();

        assert!(TimelineConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_empty_session_path_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty_path.json");
        std::fs::write(&path, r#"{"sessions": {"a": {"path": "", "type": "codex"}}}"#).unwrap();

        let err = TimelineConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, TimelineError::Config(_)));
    }

    #[test]
    fn test_missing_config_falls_back_to_builtin() {
        let dir = TempDir::new().unwrap();
        let config = TimelineConfig::resolve(Some(dir.path().join("nope.json").as_path())).unwrap();
        assert_eq!(config.title, "Vibe Engineering Activity Timeline");
        assert_eq!(config.sessions.len(), 10);
    }

    #[test]
    fn test_no_config_uses_builtin() {
        let config = TimelineConfig::resolve(None).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("docs"));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home(Path::new("/abs/path")), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_home(Path::new("~/.claude/x.jsonl")),
                home.join(".claude/x.jsonl")
            );
        }
    }
}
