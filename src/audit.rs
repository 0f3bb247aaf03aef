//! Structured audit log: one JSON object per line, size-rotated.
//!
//! Every order lifecycle event (`client.init`, `order.attempt.*`,
//! `order.placed.*`, `order.error.*`) appends an entry of the form
//! `{"ts": <epoch millis>, "action": "...", "details": {...}}`.
//!
//! The logger is an explicitly constructed instance, created once at startup
//! and handed to the factory and submitter. It is not a process-global.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde_json::{json, Value};
use tracing::warn;

use crate::error::Result;

pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_MAX_BACKUPS: u32 = 3;

/// Append-only JSON-lines sink with size-based rotation.
///
/// When an append would push the active file past `max_bytes`, generations
/// shift (`bot.log` -> `bot.log.1` -> ... -> `bot.log.N`) and the oldest is
/// dropped. Rotation state lives behind a `Mutex`; concurrent appenders
/// within one process serialize on it, cross-process coordination is not
/// attempted.
pub struct AuditLogger {
    path: PathBuf,
    max_bytes: u64,
    max_backups: u32,
    file: Mutex<File>,
}

impl AuditLogger {
    /// Open (or create) the sink at `path` with the default rotation policy.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_rotation(path, DEFAULT_MAX_BYTES, DEFAULT_MAX_BACKUPS)
    }

    pub fn with_rotation(
        path: impl AsRef<Path>,
        max_bytes: u64,
        max_backups: u32,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            max_bytes,
            max_backups,
            file: Mutex::new(file),
        })
    }

    /// Append one entry. Sink failures degrade to a diagnostic warning; an
    /// order workflow never aborts because the audit file is sick.
    pub fn log(&self, action: &str, details: Value) {
        let entry = json!({
            "ts": Utc::now().timestamp_millis(),
            "action": action,
            "details": details,
        });
        if let Err(e) = self.append(&entry) {
            warn!("audit append failed for {}: {}", action, e);
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.lock_file().flush()?;
        Ok(())
    }

    fn append(&self, entry: &Value) -> Result<()> {
        let line = serde_json::to_string(entry)?;
        let mut file = self.lock_file();
        self.rotate_if_needed(&mut file, line.len() as u64 + 1)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    // A poisoned lock only means another appender panicked mid-write; the
    // sink itself is still append-safe.
    fn lock_file(&self) -> MutexGuard<'_, File> {
        match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn rotate_if_needed(&self, file: &mut File, incoming: u64) -> Result<()> {
        if self.max_bytes == 0 || self.max_backups == 0 {
            return Ok(());
        }
        let len = file.metadata()?.len();
        if len == 0 || len + incoming <= self.max_bytes {
            return Ok(());
        }

        file.flush()?;
        for idx in (1..self.max_backups).rev() {
            let from = self.backup_path(idx);
            if from.exists() {
                std::fs::rename(&from, self.backup_path(idx + 1))?;
            }
        }
        std::fs::rename(&self.path, self.backup_path(1))?;
        *file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        Ok(())
    }

    fn backup_path(&self, idx: u32) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.path.display(), idx))
    }
}

impl Drop for AuditLogger {
    fn drop(&mut self) {
        let _ = self.lock_file().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap_or_default()
            .lines()
            .map(|line| serde_json::from_str(line).expect("audit line should be valid JSON"))
            .collect()
    }

    #[test]
    fn entries_are_json_lines_with_millis_timestamp() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bot.log");
        let audit = AuditLogger::open(&path).expect("open audit log");

        audit.log("client.init", json!({"mode": "dry-run"}));
        audit.log("order.attempt.limit", json!({"symbol": "BTCUSDT"}));
        audit.flush().expect("flush");

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["action"], "client.init");
        assert_eq!(lines[0]["details"]["mode"], "dry-run");
        assert!(lines[0]["ts"].is_i64(), "ts must be an integer: {}", lines[0]["ts"]);
        assert_eq!(lines[1]["action"], "order.attempt.limit");
    }

    #[test]
    fn rotation_shifts_generations_and_truncates_active_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bot.log");
        // Tiny cap so every entry forces a rollover.
        let audit = AuditLogger::with_rotation(&path, 64, 3).expect("open audit log");

        for i in 0..6 {
            audit.log("rotation.probe", json!({"seq": i, "pad": "xxxxxxxxxxxxxxxx"}));
        }
        audit.flush().expect("flush");

        assert!(path.exists());
        assert!(dir.path().join("bot.log.1").exists());
        assert!(dir.path().join("bot.log.2").exists());
        assert!(dir.path().join("bot.log.3").exists());
        assert!(!dir.path().join("bot.log.4").exists());

        // Newest entry stays in the active file.
        let lines = read_lines(&path);
        assert_eq!(lines.last().expect("active file non-empty")["details"]["seq"], 5);
    }

    #[test]
    fn zero_backups_disables_rotation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bot.log");
        let audit = AuditLogger::with_rotation(&path, 64, 0).expect("open audit log");

        for i in 0..5 {
            audit.log("rotation.probe", json!({"seq": i, "pad": "xxxxxxxxxxxxxxxx"}));
        }
        audit.flush().expect("flush");

        assert_eq!(read_lines(&path).len(), 5);
        assert!(!dir.path().join("bot.log.1").exists());
    }
}
