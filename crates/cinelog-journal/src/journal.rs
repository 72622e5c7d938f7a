use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::Result;
use crate::event::JournalEvent;

/// The append-only event log file.
///
/// One UTF-8 encoded event per line. Writes are unconditional appends with
/// single-writer discipline: the process owning the journal owns the file
/// for its lifetime. Every append is flushed so the log never trails the
/// in-memory state by more than the write in progress.
pub struct Journal {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl Journal {
    /// Open (or create) the journal file at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Append one event as a single line.
    pub fn append(&self, event: &JournalEvent) -> Result<()> {
        let line = event.encode();
        let mut writer = self.writer.lock().expect("journal mutex poisoned");
        writeln!(writer, "{line}")?;
        writer.flush()?;
        debug!(line = %line, "journal append");
        Ok(())
    }

    /// Read every line of the journal, front to back.
    pub fn lines(&self) -> Result<Vec<String>> {
        let reader = BufReader::new(File::open(&self.path)?);
        let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
        Ok(lines)
    }

    /// Truncate the journal to empty. Used for test isolation, not part of
    /// steady-state operation.
    pub fn clear(&self) -> Result<()> {
        let mut writer = self.writer.lock().expect("journal mutex poisoned");
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        *writer = BufWriter::new(file);
        debug!("journal cleared");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
