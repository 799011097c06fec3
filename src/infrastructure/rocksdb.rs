use crate::domain::booking::{BookingRecord, BookingRequest, BookingStatus};
use crate::domain::ports::BookingRepository;
use crate::error::{BookingError, Result};
use async_trait::async_trait;
use chrono::Utc;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for storing booking records.
pub const CF_BOOKINGS: &str = "bookings";
/// Column Family for repository bookkeeping (id counter).
pub const CF_META: &str = "meta";

const LAST_ID_KEY: &[u8] = b"last_id";

/// A persistent booking repository backed by RocksDB.
///
/// Records are keyed by their big-endian id so iteration yields them in id
/// order. Writes are serialized through `write_lock`.
///
/// `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

impl From<rocksdb::Error> for BookingError {
    fn from(e: rocksdb::Error) -> Self {
        BookingError::StorageError(e.into_string())
    }
}

fn internal(message: String) -> BookingError {
    BookingError::InternalError(Box::new(std::io::Error::other(message)))
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at `path`, creating the
    /// `bookings` and `meta` column families if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_bookings = ColumnFamilyDescriptor::new(CF_BOOKINGS, Options::default());
        let cf_meta = ColumnFamilyDescriptor::new(CF_META, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_bookings, cf_meta])?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn bookings_cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(CF_BOOKINGS)
            .ok_or_else(|| internal("Bookings column family not found".to_string()))
    }

    fn meta_cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(CF_META)
            .ok_or_else(|| internal("Meta column family not found".to_string()))
    }

    fn last_id(&self) -> Result<u32> {
        let cf = self.meta_cf()?;
        match self.db.get_cf(cf, LAST_ID_KEY)? {
            Some(bytes) => {
                let raw: [u8; 4] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| internal("Corrupt booking id counter".to_string()))?;
                Ok(u32::from_be_bytes(raw))
            }
            None => Ok(0),
        }
    }

    fn read(&self, id: u32) -> Result<Option<BookingRecord>> {
        let cf = self.bookings_cf()?;
        match self.db.get_cf(cf, id.to_be_bytes())? {
            Some(bytes) => {
                let record = serde_json::from_slice(&bytes)
                    .map_err(|e| internal(format!("Deserialization error: {}", e)))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn write(&self, record: &BookingRecord) -> Result<()> {
        let cf = self.bookings_cf()?;
        let value = serde_json::to_vec(record)
            .map_err(|e| internal(format!("Serialization error: {}", e)))?;
        self.db.put_cf(cf, record.id.to_be_bytes(), value)?;
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for RocksDBStore {
    async fn insert(&self, request: BookingRequest) -> Result<BookingRecord> {
        let _guard = self.write_lock.lock().await;

        let id = self
            .last_id()?
            .checked_add(1)
            .ok_or_else(|| BookingError::StorageError("booking ids exhausted".to_string()))?;
        let record = BookingRecord::from_request(id, request, Utc::now());
        let value = serde_json::to_vec(&record)
            .map_err(|e| internal(format!("Serialization error: {}", e)))?;

        // Counter first: a crash in between leaves a gap, never a reused id.
        self.db.put_cf(self.meta_cf()?, LAST_ID_KEY, id.to_be_bytes())?;
        self.db.put_cf(self.bookings_cf()?, id.to_be_bytes(), value)?;

        Ok(record)
    }

    async fn get(&self, id: u32) -> Result<Option<BookingRecord>> {
        self.read(id)
    }

    async fn get_all(&self) -> Result<Vec<BookingRecord>> {
        let cf = self.bookings_cf()?;
        let mut records = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) =
                item.map_err(|e| internal(format!("RocksDB iteration error: {}", e)))?;
            let record: BookingRecord = serde_json::from_slice(&value)
                .map_err(|e| internal(format!("Failed to deserialize booking: {}", e)))?;
            records.push(record);
        }
        Ok(records)
    }

    async fn update_status(
        &self,
        id: u32,
        status: BookingStatus,
    ) -> Result<Option<BookingRecord>> {
        let _guard = self.write_lock.lock().await;
        let Some(mut record) = self.read(id)? else {
            return Ok(None);
        };
        record.status = status;
        self.write(&record)?;
        Ok(Some(record))
    }

    async fn delete(&self, id: u32) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let cf = self.bookings_cf()?;
        if self.db.get_pinned_cf(cf, id.to_be_bytes())?.is_none() {
            return Ok(false);
        }
        self.db.delete_cf(cf, id.to_be_bytes())?;
        Ok(true)
    }
}
