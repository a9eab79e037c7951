//! Change detection for the config file.
//!
//! Other invocations edit the file while a watch loop runs. The watcher
//! compares file contents rather than modification times, so two writes in
//! the same timestamp tick are still seen.

use std::path::{Path, PathBuf};

use super::Config;
use crate::error::ConfigError;

#[derive(Debug)]
pub struct ConfigWatcher {
    path: PathBuf,
    last_seen: Option<String>,
}

impl ConfigWatcher {
    /// Start watching `path`. Its current content counts as already seen.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let last_seen = std::fs::read_to_string(&path).ok();
        Self { path, last_seen }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The freshly parsed config if the file changed since the last call.
    ///
    /// A missing file is not a change. Content that fails to parse is
    /// reported once and then treated as seen, so a half-written file does
    /// not produce an error on every poll.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the new content is not
    /// a valid config.
    pub fn poll(&mut self) -> Result<Option<Config>, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: self.path.clone(),
            message,
        };
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(load_failed(e.to_string())),
        };
        if self.last_seen.as_deref() == Some(content.as_str()) {
            return Ok(None);
        }
        let parsed = toml::from_str::<Config>(&content).map_err(|e| load_failed(e.to_string()));
        self.last_seen = Some(content);
        let config = parsed?;
        config.validate()?;
        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::{AlarmDraft, TimeOfDay};

    #[test]
    fn unchanged_file_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save_to(&path).unwrap();

        let mut watcher = ConfigWatcher::new(&path);
        assert!(watcher.poll().unwrap().is_none());
        assert!(watcher.poll().unwrap().is_none());
    }

    #[test]
    fn edits_are_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.save_to(&path).unwrap();
        let mut watcher = ConfigWatcher::new(&path);

        cfg.alarms.add(AlarmDraft {
            time: TimeOfDay::new(12, 0).unwrap(),
            ..AlarmDraft::default()
        });
        cfg.save_to(&path).unwrap();

        let reloaded = watcher.poll().unwrap().expect("edit should be seen");
        assert_eq!(reloaded.alarms.len(), 3);
        assert!(watcher.poll().unwrap().is_none());
    }

    #[test]
    fn broken_content_errors_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save_to(&path).unwrap();
        let mut watcher = ConfigWatcher::new(&path);

        std::fs::write(&path, "[[alarms]]\ntime = \"nope\"\n").unwrap();
        assert!(matches!(watcher.poll(), Err(ConfigError::LoadFailed { .. })));
        assert!(watcher.poll().unwrap().is_none());
    }

    #[test]
    fn missing_file_is_not_a_change() {
        let dir = tempfile::tempdir().unwrap();
        let mut watcher = ConfigWatcher::new(dir.path().join("absent.toml"));
        assert!(watcher.poll().unwrap().is_none());
    }
}
