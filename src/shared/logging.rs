use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn console_log_path(state_root: &Path) -> PathBuf {
    state_root.join("logs/console.log")
}

/// JSON-lines event log for a console session. A log without a path drops
/// every line, which is what tests and one-shot commands use.
#[derive(Debug, Clone, Default)]
pub struct ConsoleLog {
    path: Option<PathBuf>,
}

impl ConsoleLog {
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn at_state_root(state_root: &Path) -> Self {
        Self {
            path: Some(console_log_path(state_root)),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&self, event: &str, message: &str) {
        self.append("info", event, message);
    }

    pub fn warn(&self, event: &str, message: &str) {
        self.append("warn", event, message);
    }

    pub fn append(&self, level: &str, event: &str, message: &str) {
        let Some(path) = self.path.as_ref() else {
            return;
        };
        let payload = serde_json::json!({
            "timestamp": now_secs(),
            "level": level,
            "event": event,
            "message": message,
        });
        let Ok(line) = serde_json::to_string(&payload) else {
            return;
        };
        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) else {
            return;
        };
        let _ = writeln!(file, "{line}");
    }
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_one_json_object_per_line() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = ConsoleLog::at_state_root(dir.path());
        log.info("wizard.advance", "general -> administrators");
        log.warn("backend.error", "timed out");

        let raw = fs::read_to_string(console_log_path(dir.path())).expect("read log");
        let lines: Vec<serde_json::Value> = raw
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "wizard.advance");
        assert_eq!(lines[1]["level"], "warn");
    }

    #[test]
    fn disabled_log_writes_nothing() {
        let log = ConsoleLog::disabled();
        log.info("wizard.submit", "ignored");
        assert!(log.path().is_none());
    }
}
