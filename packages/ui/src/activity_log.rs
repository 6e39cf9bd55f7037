//! Session record of wallet activity: connections, confirmed transactions and
//! the failures the pages reported. Kept in a `Signal<ActivityLog>` context
//! provided by the app root.

use std::collections::VecDeque;

use dioxus::prelude::*;
use registry::flows::Submitted;
use registry::units::format_clock;
use registry::TxHash;

/// Oldest entries are dropped past this many.
const MAX_ENTRIES: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

impl LogLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "activity-entry activity-entry--info",
            Self::Success => "activity-entry activity-entry--success",
            Self::Error => "activity-entry activity-entry--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActivityEntry {
    /// `HH:MM:SS` UTC
    pub time: String,
    pub level: LogLevel,
    pub message: String,
    pub tx_hash: Option<TxHash>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    pub open: bool,
}

impl ActivityLog {
    pub fn push(&mut self, entry: ActivityEntry) {
        if self.entries.len() == MAX_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|e| e.level == LogLevel::Error)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

pub fn log_activity(log: &mut Signal<ActivityLog>, level: LogLevel, message: &str) {
    log.write().push(ActivityEntry {
        time: format_clock(now_secs()),
        level,
        message: message.to_string(),
        tx_hash: None,
    });
}

/// Record a confirmed transaction with its hash.
pub fn log_submitted(log: &mut Signal<ActivityLog>, submitted: &Submitted) {
    log.write().push(ActivityEntry {
        time: format_clock(now_secs()),
        level: LogLevel::Success,
        message: submitted.message.to_string(),
        tx_hash: Some(submitted.tx_hash.clone()),
    });
}

#[cfg(target_arch = "wasm32")]
fn now_secs() -> u64 {
    (js_sys::Date::now() / 1000.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: LogLevel, message: &str) -> ActivityEntry {
        ActivityEntry {
            time: "00:00:00".to_string(),
            level,
            message: message.to_string(),
            tx_hash: None,
        }
    }

    #[test]
    fn lists_newest_first() {
        let mut log = ActivityLog::default();
        log.push(entry(LogLevel::Info, "first"));
        log.push(entry(LogLevel::Success, "second"));
        let messages: Vec<_> = log.newest_first().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["second", "first"]);
    }

    #[test]
    fn drops_oldest_past_capacity() {
        let mut log = ActivityLog::default();
        for i in 0..MAX_ENTRIES + 5 {
            log.push(entry(LogLevel::Info, &i.to_string()));
        }
        assert_eq!(log.len(), MAX_ENTRIES);
        assert_eq!(log.newest_first().last().map(|e| e.message.as_str()), Some("5"));
    }

    #[test]
    fn tracks_errors_until_cleared() {
        let mut log = ActivityLog::default();
        log.push(entry(LogLevel::Success, "ok"));
        assert!(!log.has_errors());
        log.push(entry(LogLevel::Error, "execution reverted: Land is not for sale"));
        assert!(log.has_errors());
        log.clear();
        assert!(log.is_empty());
        assert!(!log.has_errors());
    }
}
