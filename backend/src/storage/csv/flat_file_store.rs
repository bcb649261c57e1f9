//! # Flat-File Store
//!
//! Generic CRUD engine for one entity collection backed by one text file in
//! the data directory. One encoded record per line, in append order.
//!
//! ## Write model
//!
//! Every mutation reads the whole collection, changes it in memory and
//! rewrites the file: the new image goes to `<file>.tmp` first and is then
//! renamed over the original, so the file is always either the old image or
//! the new one.
//!
//! ## Ids
//!
//! `next_id` is seeded from the highest id found in the file (readable or
//! not) and only moves forward, so deleted ids are never handed out again by
//! the same store. Clones share the counter and the lock guarding it; the
//! lock is held across the whole read-modify-write of a mutation. Once the
//! id after `RecordId::MAX` is reached, new records are refused with
//! [`StorageError::IdsExhausted`].
//!
//! ## Unreadable lines
//!
//! The file is read one physical line at a time and blank lines are ignored.
//! Lines that fail to decode are skipped by listings. [`FlatFileStore::scan`]
//! reports them; [`FlatFileStore::list_all`] logs each one at `warn`.

use log::{debug, info, warn};
use shared::{RecordId, NEW_RECORD_ID};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::codec::{self, LineCodec};
use super::connection::CsvConnection;
use crate::storage::error::{Result, StorageError};

/// A line that was skipped because it could not be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the file
    pub line: u64,
    /// Id at the start of the line, if it was readable
    pub id: Option<RecordId>,
    pub reason: String,
}

/// Result of reading a whole collection file
#[derive(Debug, Clone)]
pub struct Listing<R> {
    pub records: Vec<R>,
    pub skipped: Vec<SkippedLine>,
}

impl<R> Default for Listing<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<R: LineCodec> Listing<R> {
    /// Highest id present in the file, counting unreadable lines that start with an id
    pub fn highest_id(&self) -> Option<RecordId> {
        let decoded = self.records.iter().map(|r| r.id());
        let skipped = self.skipped.iter().filter_map(|s| s.id);
        decoded.chain(skipped).max()
    }
}

pub struct FlatFileStore<R> {
    connection: CsvConnection,
    path: PathBuf,
    /// Wider than `RecordId` so the counter can sit one past the last id
    next_id: Arc<Mutex<u64>>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for FlatFileStore<R> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
            path: self.path.clone(),
            next_id: Arc::clone(&self.next_id),
            _record: PhantomData,
        }
    }
}

impl<R: LineCodec> FlatFileStore<R> {
    /// Open the store for `file_name` inside the connection's data directory,
    /// seeding the id counter from the current file contents
    pub fn open(connection: CsvConnection, file_name: &str) -> Result<Self> {
        let path = connection.file_path(file_name);
        let mut store = Self {
            connection,
            path,
            next_id: Arc::new(Mutex::new(1)),
            _record: PhantomData,
        };

        let listing = store.scan()?;
        let next_id = listing.highest_id().map_or(1, |highest| u64::from(highest) + 1);
        store.next_id = Arc::new(Mutex::new(next_id));

        debug!(
            "Opened {} store at {:?}: {} records, next id {}",
            R::KIND,
            store.path,
            listing.records.len(),
            next_id
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Id the next new record will receive
    pub fn next_id(&self) -> Result<RecordId> {
        let next_id = self.lock()?;
        Self::issuable(*next_id)
    }

    fn issuable(next_id: u64) -> Result<RecordId> {
        RecordId::try_from(next_id).map_err(|_| StorageError::IdsExhausted { kind: R::KIND })
    }

    /// Read the whole file, separating decoded records from unreadable lines.
    /// A missing file is an empty collection.
    pub fn scan(&self) -> Result<Listing<R>> {
        self.connection.ensure_data_directory()?;

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{} file {:?} doesn't exist yet, returning empty list", R::KIND, self.path);
                return Ok(Listing::default());
            }
            Err(e) => return Err(StorageError::unavailable(&self.path, e)),
        };

        let mut listing = Listing::default();

        for (index, bytes) in BufReader::new(file).split(b'\n').enumerate() {
            let bytes = bytes.map_err(|e| StorageError::unavailable(&self.path, e))?;
            let line = index as u64 + 1;

            let decoded = match String::from_utf8(bytes) {
                Ok(decoded) => decoded,
                Err(_) => {
                    listing.skipped.push(SkippedLine {
                        line,
                        id: None,
                        reason: "line is not valid UTF-8".to_string(),
                    });
                    continue;
                }
            };
            let text = decoded.strip_suffix('\r').unwrap_or(decoded.as_str());
            if text.trim().is_empty() {
                continue;
            }

            let raw = match codec::split_line(text) {
                Ok(raw) => raw,
                Err(reason) => {
                    listing.skipped.push(SkippedLine { line, id: None, reason });
                    continue;
                }
            };
            match codec::decode_record::<R>(&raw, line) {
                Ok(record) => listing.records.push(record),
                Err(StorageError::MalformedRecord { reason, .. }) => {
                    listing.skipped.push(SkippedLine {
                        line,
                        id: codec::leading_id(&raw),
                        reason,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(listing)
    }

    /// All readable records in file order
    pub fn list_all(&self) -> Result<Vec<R>> {
        let listing = self.scan()?;
        for skipped in &listing.skipped {
            warn!(
                "Skipping malformed {} record at {:?} line {}: {}",
                R::KIND,
                self.path,
                skipped.line,
                skipped.reason
            );
        }
        Ok(listing.records)
    }

    /// Insert or replace a record without any conflict check
    pub fn save(&self, record: R) -> Result<R> {
        self.save_checked(record, |_, _| Ok(()))
    }

    /// Insert or replace a record after `check` accepted it.
    ///
    /// A record with id 0 receives the next id and is appended; a record with
    /// a known id replaces the stored one at the same position; an unknown
    /// non-zero id is appended as-is. `check` sees the current collection and
    /// the record as it will be stored (id already assigned), under the lock.
    /// If it fails nothing is written and no id is consumed.
    pub fn save_checked<F>(&self, mut record: R, check: F) -> Result<R>
    where
        F: FnOnce(&[R], &R) -> Result<()>,
    {
        let mut next_id = self.lock()?;

        let is_new = record.id() == NEW_RECORD_ID;
        if is_new {
            record.set_id(Self::issuable(*next_id)?);
        }

        let mut records = self.list_all()?;
        if let Err(e) = check(&records, &record) {
            warn!("Rejected {} record {}: {}", R::KIND, record.id(), e);
            return Err(e);
        }

        match records.iter_mut().find(|existing| existing.id() == record.id()) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        self.write_all(&records)?;

        *next_id = (*next_id).max(u64::from(record.id()) + 1);

        if is_new {
            info!("Created {} record {}", R::KIND, record.id());
        } else {
            info!("Saved {} record {}", R::KIND, record.id());
        }
        Ok(record)
    }

    /// Remove every record with this id. Returns false (and leaves the file
    /// untouched) when there was none.
    pub fn delete(&self, id: RecordId) -> Result<bool> {
        let _guard = self.lock()?;

        let mut records = self.list_all()?;
        let before = records.len();
        records.retain(|record| record.id() != id);

        if records.len() == before {
            debug!("No {} record {} to delete", R::KIND, id);
            return Ok(false);
        }

        self.write_all(&records)?;
        info!("Deleted {} record {}", R::KIND, id);
        Ok(true)
    }

    pub fn find_by_id(&self, id: RecordId) -> Result<Option<R>> {
        Ok(self.list_all()?.into_iter().find(|record| record.id() == id))
    }

    /// Records matching a predicate, in file order
    pub fn find_where<P>(&self, predicate: P) -> Result<Vec<R>>
    where
        P: Fn(&R) -> bool,
    {
        Ok(self.list_all()?.into_iter().filter(|record| predicate(record)).collect())
    }

    pub fn exists_where<P>(&self, predicate: P) -> Result<bool>
    where
        P: Fn(&R) -> bool,
    {
        Ok(self.list_all()?.iter().any(predicate))
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.list_all()?.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, u64>> {
        self.next_id
            .lock()
            .map_err(|_| StorageError::LockPoisoned { kind: R::KIND })
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        PathBuf::from(temp)
    }

    /// Replace the file with exactly these records
    fn write_all(&self, records: &[R]) -> Result<()> {
        self.connection.ensure_data_directory()?;
        let temp_path = self.temp_path();

        let written = self.write_temp(&temp_path, records).and_then(|_| {
            fs::rename(&temp_path, &self.path).map_err(|e| StorageError::unavailable(&self.path, e))
        });
        if written.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        written?;

        debug!("Wrote {} {} records to {:?}", records.len(), R::KIND, self.path);
        Ok(())
    }

    fn write_temp(&self, temp_path: &Path, records: &[R]) -> Result<()> {
        let file = File::create(temp_path).map_err(|e| StorageError::unavailable(temp_path, e))?;
        let mut writer = BufWriter::new(file);

        for record in records {
            let line = codec::encode(record)?;
            writeln!(writer, "{}", line).map_err(|e| StorageError::unavailable(temp_path, e))?;
        }

        writer.flush().map_err(|e| StorageError::unavailable(temp_path, e))?;
        Ok(())
    }
}
