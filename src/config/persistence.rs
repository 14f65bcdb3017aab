//! Event log persistence module
//!
//! Handles saving, loading, and rotation of recorded analytics events.

use crate::events::RecordedEvent;
use crate::{Result, WizardError, APP_NAME, EVENTS_FILE, MAX_EVENT_HISTORY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Event log storage manager
#[derive(Debug, Clone)]
pub struct EventLogStorage {
    events_path: PathBuf,
    max_history: usize,
}

/// Event log file structure for JSON persistence
#[derive(Debug, Serialize, Deserialize)]
struct EventLogFile {
    version: u32,
    events: Vec<RecordedEvent>,
}

impl EventLogStorage {
    /// Create a storage manager at the standard location
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(Self::events_file_path()?))
    }

    /// Create a storage manager for an explicit file
    pub fn with_path(events_path: PathBuf) -> Self {
        Self {
            events_path,
            max_history: MAX_EVENT_HISTORY,
        }
    }

    /// Keep at most `max_history` events (minimum one)
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history.max(1);
        self
    }

    /// Get the standard event log path
    /// Uses $DATA_HOME/appeal-wizard/events.json
    pub fn events_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            WizardError::ConfigError("Unable to determine data directory".to_string())
        })?;

        Ok(data_dir.join(APP_NAME).join(EVENTS_FILE))
    }

    /// Load all events from the log file
    pub fn load_events(&self) -> Result<Vec<RecordedEvent>> {
        if !self.events_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.events_path).map_err(|e| {
            WizardError::PersistenceError(format!(
                "Failed to read event log {}: {}",
                self.events_path.display(),
                e
            ))
        })?;

        let file: EventLogFile = serde_json::from_str(&content).map_err(|e| {
            WizardError::PersistenceError(format!(
                "Failed to parse event log {}: {}",
                self.events_path.display(),
                e
            ))
        })?;

        Ok(file.events)
    }

    /// Append an event, dropping the oldest ones past the history limit
    pub fn append_event(&self, event: RecordedEvent) -> Result<()> {
        let mut events = self.load_events()?;
        events.push(event);

        if events.len() > self.max_history {
            let skip_count = events.len() - self.max_history;
            events.drain(..skip_count);
        }

        self.save_events(events)
    }

    fn save_events(&self, events: Vec<RecordedEvent>) -> Result<()> {
        if let Some(parent) = self.events_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                WizardError::PersistenceError(format!(
                    "Failed to create data directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = serde_json::to_string_pretty(&EventLogFile { version: 1, events })?;

        fs::write(&self.events_path, content).map_err(|e| {
            WizardError::PersistenceError(format!(
                "Failed to write event log {}: {}",
                self.events_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the number of stored events
    pub fn count_events(&self) -> Result<usize> {
        Ok(self.load_events()?.len())
    }

    /// Remove the event log
    pub fn clear_events(&self) -> Result<()> {
        if self.events_path.exists() {
            fs::remove_file(&self.events_path).map_err(|e| {
                WizardError::PersistenceError(format!(
                    "Failed to remove event log {}: {}",
                    self.events_path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Get the most recent N events, oldest first
    pub fn recent_events(&self, count: usize) -> Result<Vec<RecordedEvent>> {
        let mut events = self.load_events()?;
        if events.len() > count {
            events.drain(..events.len() - count);
        }
        Ok(events)
    }

    pub fn path(&self) -> &Path {
        &self.events_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::AnalyticsEvent;
    use crate::models::AppealType;
    use tempfile::TempDir;

    fn event(appeal_type: AppealType, used_quiz: bool) -> RecordedEvent {
        RecordedEvent::now(AnalyticsEvent::FormStarted {
            appeal_type,
            used_quiz,
        })
    }

    fn storage(temp_dir: &TempDir) -> EventLogStorage {
        EventLogStorage::with_path(temp_dir.path().join("nested").join("events.json"))
    }

    #[test]
    fn test_events_file_path() {
        let path = EventLogStorage::events_file_path();
        assert!(path.is_ok());
        assert!(path.unwrap().to_string_lossy().contains("appeal-wizard"));
    }

    #[test]
    fn test_load_empty_log() {
        let temp_dir = TempDir::new().unwrap();
        assert!(storage(&temp_dir).load_events().unwrap().is_empty());
    }

    #[test]
    fn test_append_and_load_event() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);

        storage.append_event(event(AppealType::SecondInstance, false)).unwrap();

        let events = storage.load_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].event,
            AnalyticsEvent::FormStarted {
                appeal_type: AppealType::SecondInstance,
                used_quiz: false,
            }
        );
    }

    #[test]
    fn test_event_log_rotation() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir).with_max_history(3);

        for i in 0..5 {
            storage.append_event(event(AppealType::PriorDefense, i % 2 == 0)).unwrap();
        }

        let events = storage.load_events().unwrap();
        assert_eq!(events.len(), 3);
        // Events 2, 3, 4 remain
        let flags: Vec<bool> = events
            .iter()
            .map(|e| match e.event {
                AnalyticsEvent::FormStarted { used_quiz, .. } => used_quiz,
            })
            .collect();
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn test_count_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);

        for _ in 0..4 {
            storage.append_event(event(AppealType::FirstInstance, true)).unwrap();
        }
        assert_eq!(storage.count_events().unwrap(), 4);

        storage.clear_events().unwrap();
        assert_eq!(storage.count_events().unwrap(), 0);
    }

    #[test]
    fn test_recent_events() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);

        for appeal_type in AppealType::all() {
            storage.append_event(event(appeal_type, false)).unwrap();
        }

        let recent = storage.recent_events(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(
            recent[1].event,
            AnalyticsEvent::FormStarted {
                appeal_type: AppealType::SecondInstance,
                used_quiz: false,
            }
        );
        assert_eq!(storage.recent_events(10).unwrap().len(), 3);
    }

    #[test]
    fn test_event_log_file_format() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        storage.append_event(event(AppealType::PriorDefense, true)).unwrap();

        let content = fs::read_to_string(storage.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["events"][0]["event"], "form_started");
        assert_eq!(value["events"][0]["type"], "prior_defense");
        assert_eq!(value["events"][0]["usedQuiz"], true);
        assert!(value["events"][0]["timestamp"].is_string());
    }
}
