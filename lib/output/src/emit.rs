use atomicwrites::{AtomicFile, OverwriteBehavior};
use rankx_core::{Error, Result, TopKTable};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The fixed single-byte field delimiter of the output artifact.
///
/// Not configurable: the artifact is the one bit-exact compatibility
/// surface, so the delimiter is part of the format.
pub const FIELD_DELIMITER: char = ',';

/// Writes a [`TopKTable`] as a single delimited text artifact.
///
/// One `category,item,score` line per retained entry, no header, sorted
/// by category ascending, score descending, item ascending. The write is
/// atomic: the complete artifact appears at the destination or nothing
/// does, and a pre-existing artifact is only replaced once the new one is
/// fully on disk.
pub struct Emitter {
    destination: PathBuf,
}

impl Emitter {
    pub fn new<P: AsRef<Path>>(destination: P) -> Self {
        Self {
            destination: destination.as_ref().to_path_buf(),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Fails fast on an unusable destination, before any record has been
    /// consumed upstream. Creates missing parent directories.
    pub fn preflight(&self) -> Result<()> {
        if let Some(parent) = self.destination.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::InvalidConfig(format!(
                        "destination '{}' is not writable: {}",
                        self.destination.display(),
                        e
                    ))
                })?;
            }
        }
        Ok(())
    }

    /// Emits the table. An empty table produces an empty artifact, which
    /// is a successful run, not an error.
    pub fn emit(&self, table: &TopKTable) -> Result<()> {
        self.preflight()?;
        let entries = table.sorted_entries();

        let file = AtomicFile::new(&self.destination, OverwriteBehavior::AllowOverwrite);
        file.write(|f| {
            let mut writer = BufWriter::new(f);
            for entry in &entries {
                writeln!(
                    writer,
                    "{}{sep}{}{sep}{}",
                    entry.category,
                    entry.item,
                    entry.score,
                    sep = FIELD_DELIMITER
                )?;
            }
            writer.flush()
        })
        .map_err(|e| Error::Write(format!("{}: {}", self.destination.display(), e)))?;

        debug!(
            entries = entries.len(),
            "artifact written to {}",
            self.destination.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankx_core::{GroupRanker, Record};

    fn table(k: usize, records: Vec<Record>) -> TopKTable {
        let mut ranker = GroupRanker::new(k).unwrap();
        ranker.feed(records).unwrap();
        ranker.finalize()
    }

    #[test]
    fn test_emit_sorted_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("topk.csv");
        let table = table(
            2,
            vec![
                Record::new("fr", "X", 50),
                Record::new("en", "B", 90),
                Record::new("en", "A", 100),
                Record::new("en", "C", 95),
            ],
        );

        Emitter::new(&dest).emit(&table).unwrap();
        let body = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(body, "en,A,100\nen,C,95\nfr,X,50\n");
    }

    #[test]
    fn test_empty_table_creates_empty_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("topk.csv");
        let table = TopKTable::new(3).unwrap();

        Emitter::new(&dest).emit(&table).unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"");
    }

    #[test]
    fn test_emit_overwrites_previous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("topk.csv");
        std::fs::write(&dest, "stale contents\n").unwrap();

        let table = table(1, vec![Record::new("en", "A", 1)]);
        Emitter::new(&dest).emit(&table).unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "en,A,1\n");
    }

    #[test]
    fn test_emit_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("results").join("nested").join("topk.csv");

        let table = table(1, vec![Record::new("en", "A", 1)]);
        Emitter::new(&dest).emit(&table).unwrap();
        assert!(dest.exists());
    }

    #[test]
    fn test_emit_to_directory_fails_without_side_files() {
        let dir = tempfile::tempdir().unwrap();
        // The destination itself is a directory: finalize cannot succeed.
        let err = Emitter::new(dir.path())
            .emit(&table(1, vec![Record::new("en", "A", 1)]))
            .unwrap_err();
        assert!(matches!(err, Error::Write(_) | Error::InvalidConfig(_)));
        // No temporary files left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_idempotent_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            Record::new("en", "A", 100),
            Record::new("fr", "X", 50),
            Record::new("en", "B", 100),
        ];
        let first = dir.path().join("first.csv");
        let second = dir.path().join("second.csv");
        Emitter::new(&first).emit(&table(2, records.clone())).unwrap();
        Emitter::new(&second).emit(&table(2, records)).unwrap();
        assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
    }
}
