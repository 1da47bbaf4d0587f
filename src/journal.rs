//! Append-only session journal.
//!
//! Each line is `[YYYY-MM-DD HH:MM:SS] message` in local time. The journal
//! lives at `~/.local/share/tui-timer/log.txt` unless another path is given.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::debug;

use crate::paths::{self, PathError};

/// File name inside the data directory.
pub const JOURNAL_FILE: &str = "log.txt";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors that can occur while writing the journal.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("failed to open journal {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write journal {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Path(#[from] PathError),
}

#[derive(Debug)]
struct Sink {
    path: PathBuf,
    file: File,
}

/// Append-only, timestamped log of what happened during a run.
#[derive(Debug)]
pub struct Journal {
    sink: Option<Sink>,
}

impl Journal {
    /// Opens (or creates) the journal at `path` for appending.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Open` if the directory or file cannot be
    /// created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, JournalError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| JournalError::Open {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| JournalError::Open {
                path: path.clone(),
                source,
            })?;
        debug!("Journal opened at {}", path.display());

        Ok(Self {
            sink: Some(Sink { path, file }),
        })
    }

    /// Opens `~/.local/share/tui-timer/log.txt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory is unknown or the file cannot
    /// be opened.
    pub fn open_default() -> Result<Self, JournalError> {
        Self::open(paths::data_dir()?.join(JOURNAL_FILE))
    }

    /// A journal that drops every line.
    #[must_use]
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|sink| sink.path.as_path())
    }

    /// Appends one timestamped line.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Write` if the line cannot be written.
    pub fn record(&mut self, message: &str) -> Result<(), JournalError> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };

        let line = format_line(Local::now().naive_local(), message);
        sink.file
            .write_all(line.as_bytes())
            .map_err(|source| JournalError::Write {
                path: sink.path.clone(),
                source,
            })
    }
}

fn format_line(at: NaiveDateTime, message: &str) -> String {
    format!("[{}] {}\n", at.format(TIMESTAMP_FORMAT), message)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_format_line() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 3)
            .unwrap();
        assert_eq!(
            format_line(at, "Started Work session"),
            "[2024-03-09 07:05:03] Started Work session\n"
        );
    }

    #[test]
    fn test_record_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("share").join(JOURNAL_FILE);

        let mut journal = Journal::open(&path).unwrap();
        journal.record("first").unwrap();
        journal.record("second").unwrap();
        drop(journal);

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] first"));
        assert!(lines[1].ends_with("] second"));
        // "[YYYY-MM-DD HH:MM:SS] "
        assert_eq!(&lines[0][20..22], "] ");
    }

    #[test]
    fn test_reopen_keeps_existing_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(JOURNAL_FILE);

        Journal::open(&path).unwrap().record("one").unwrap();
        Journal::open(&path).unwrap().record("two").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_disabled_journal() {
        let mut journal = Journal::disabled();
        assert!(journal.path().is_none());
        assert!(journal.record("ignored").is_ok());
    }

    #[test]
    fn test_open_in_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = Journal::open(blocker.join(JOURNAL_FILE)).unwrap_err();
        assert!(matches!(err, JournalError::Open { .. }));
    }
}
