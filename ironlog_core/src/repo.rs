//! Set record persistence.
//!
//! Records are appended to a JSONL (JSON Lines) file with file locking to
//! ensure safe concurrent access. Deletes and batch updates rewrite the file
//! through a temp file and an atomic rename.

use crate::{Error, Result, SetRecord};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Durable store of set records
///
/// The engine only needs insert, delete-by-id, full scan and a batch update;
/// everything else is derived in memory.
pub trait SetRepository {
    /// Append a record, assigning and returning its id
    fn insert(&mut self, record: SetRecord) -> Result<Uuid>;

    /// Delete a record by id; silently succeeds when the id is unknown
    fn delete_by_id(&mut self, id: Uuid) -> Result<()>;

    /// All records in insertion order
    fn scan_all(&self) -> Result<Vec<SetRecord>>;

    /// Apply `patch` to every record matching `predicate`, returning the count
    fn update_where(
        &mut self,
        predicate: &dyn Fn(&SetRecord) -> bool,
        patch: &dyn Fn(&mut SetRecord),
    ) -> Result<usize>;
}

/// JSONL-backed repository with file locking
pub struct JsonlSetRepository {
    path: PathBuf,
}

impl JsonlSetRepository {
    /// Create a repository backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Replace the whole file contents atomically
    ///
    /// Writes to a temp file in the same directory, syncs, then renames over
    /// the original so readers never observe a half-written file.
    fn rewrite(&self, records: &[SetRecord]) -> Result<()> {
        self.ensure_parent_dir()?;

        let parent = self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "repository path missing parent")
        })?;
        let temp = NamedTempFile::new_in(parent)?;

        temp.as_file().lock_exclusive()?;
        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            for record in records {
                let line = serde_json::to_string(record)?;
                writer.write_all(line.as_bytes())?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

impl SetRepository for JsonlSetRepository {
    fn insert(&mut self, mut record: SetRecord) -> Result<Uuid> {
        self.ensure_parent_dir()?;

        let id = record.id.unwrap_or_else(Uuid::new_v4);
        record.id = Some(id);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(&record)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Inserted set {} ({})", id, record.exercise);
        Ok(id)
    }

    fn delete_by_id(&mut self, id: Uuid) -> Result<()> {
        let records = self.scan_all()?;
        let remaining: Vec<SetRecord> = records
            .into_iter()
            .filter(|r| r.id != Some(id))
            .collect();

        self.rewrite(&remaining)?;
        tracing::debug!("Deleted set {} (if present)", id);
        Ok(())
    }

    fn scan_all(&self) -> Result<Vec<SetRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        file.lock_shared()?;

        let reader = BufReader::new(&file);
        let mut records = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<SetRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("Failed to parse set at line {}: {}", line_num + 1, e);
                    // Continue reading, don't fail completely
                }
            }
        }

        file.unlock()?;
        tracing::debug!("Read {} sets from repository", records.len());
        Ok(records)
    }

    fn update_where(
        &mut self,
        predicate: &dyn Fn(&SetRecord) -> bool,
        patch: &dyn Fn(&mut SetRecord),
    ) -> Result<usize> {
        let mut records = self.scan_all()?;
        let mut count = 0;

        for record in records.iter_mut() {
            if predicate(record) {
                patch(record);
                count += 1;
            }
        }

        if count > 0 {
            self.rewrite(&records)?;
        }

        tracing::debug!("Updated {} sets", count);
        Ok(count)
    }
}
