//! Append-only JSON-lines logs for moves and battle results.
//!
//! Each record is one `serde_json` object on its own line, so a log can be
//! tailed, grepped, or concatenated across runs.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::battle::engine::BattleReport;
use crate::battle::events::MoveEvent;
use crate::errors::{StoreError, StoreResult};
use crate::summary::BattleSummary;

/// Generic append-only log of serializable records.
pub struct JsonLinesLog<T> {
    path: PathBuf,
    writer: BufWriter<File>,
    _phantom: PhantomData<T>,
}

impl<T> JsonLinesLog<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Opens a log for appending, creating the parent directory and file if needed.
    pub fn open_or_create(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let offset = file.metadata()?.len();
        tracing::debug!(path = %path.display(), offset, "opened log");

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            _phantom: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, record: &T) -> StoreResult<()> {
        serde_json::to_writer(&mut self.writer, record).map_err(StoreError::Serialize)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn append_all<'a, I>(&mut self, records: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        for record in records {
            self.append(record)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> StoreResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes pending writes, then reads every record from the start of the file.
    pub fn read_all(&mut self) -> StoreResult<Vec<T>> {
        self.flush()?;
        read_records(&self.path)
    }
}

impl<T> Drop for JsonLinesLog<T> {
    fn drop(&mut self) {
        if let Err(err) = self.writer.flush() {
            tracing::warn!(path = %self.path.display(), %err, "failed to flush log on drop");
        }
    }
}

/// Reads every record from a log file. A missing file reads as empty.
pub fn read_records<T: DeserializeOwned>(path: impl AsRef<Path>) -> StoreResult<Vec<T>> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut records = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| StoreError::Json {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

pub type MoveStore = JsonLinesLog<MoveEvent>;
pub type ResultStore = JsonLinesLog<BattleSummary>;

/// The next unused battle id: one past the largest recorded, or 1 for none.
pub fn next_battle_id(results: &[BattleSummary]) -> u64 {
    results
        .iter()
        .map(|summary| summary.battle_id)
        .max()
        .map_or(1, |max| max + 1)
}

/// The move and result logs written together after each battle.
pub struct ArenaStore {
    moves: MoveStore,
    results: ResultStore,
}

impl ArenaStore {
    pub fn open_or_create(
        moves_path: impl AsRef<Path>,
        results_path: impl AsRef<Path>,
    ) -> StoreResult<Self> {
        Ok(Self {
            moves: MoveStore::open_or_create(moves_path)?,
            results: ResultStore::open_or_create(results_path)?,
        })
    }

    /// Appends a battle's moves and its summary row.
    pub fn record(&mut self, report: &BattleReport) -> StoreResult<BattleSummary> {
        let summary = BattleSummary::from_report(report);
        self.moves.append_all(report.moves.iter())?;
        self.results.append(&summary)?;
        Ok(summary)
    }

    pub fn flush(&mut self) -> StoreResult<()> {
        self.moves.flush()?;
        self.results.flush()
    }

    pub fn next_battle_id(&mut self) -> StoreResult<u64> {
        Ok(next_battle_id(&self.results.read_all()?))
    }

    pub fn moves(&mut self) -> &mut MoveStore {
        &mut self.moves
    }

    pub fn results(&mut self) -> &mut ResultStore {
        &mut self.results
    }
}
