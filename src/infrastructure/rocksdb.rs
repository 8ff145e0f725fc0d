use crate::domain::booking::{BookingRecord, InsertAck};
use crate::domain::ports::BookingStore;
use crate::error::{BookingError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Column Family for storing booking records.
pub const CF_BOOKINGS: &str = "bookings";

/// A persistent booking store backed by RocksDB.
///
/// Records are stored as JSON under a monotonically increasing big-endian
/// key, so iteration returns bookings in insertion order.
pub struct RocksDbBookingStore {
    db: Arc<DB>,
    next_key: AtomicU64,
}

impl RocksDbBookingStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures the "bookings" column family exists and resumes key
    /// allocation after the highest key already present.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_bookings = ColumnFamilyDescriptor::new(CF_BOOKINGS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_bookings])
            .map_err(|e| BookingError::StoreError(e.to_string()))?;

        let store = Self {
            db: Arc::new(db),
            next_key: AtomicU64::new(0),
        };
        let last = store.last_key()?;
        store.next_key.store(last.map_or(0, |k| k + 1), Ordering::SeqCst);
        Ok(store)
    }

    fn cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(CF_BOOKINGS)
            .ok_or_else(|| BookingError::StoreError("Bookings column family not found".to_string()))
    }

    fn last_key(&self) -> Result<Option<u64>> {
        let cf = self.cf()?;
        let mut iter = self.db.iterator_cf(cf, rocksdb::IteratorMode::End);
        match iter.next() {
            Some(item) => {
                let (key, _value) = item.map_err(|e| BookingError::StoreError(e.to_string()))?;
                let bytes: [u8; 8] = key
                    .as_ref()
                    .try_into()
                    .map_err(|_| BookingError::StoreError("Malformed booking key".to_string()))?;
                Ok(Some(u64::from_be_bytes(bytes)))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl BookingStore for RocksDbBookingStore {
    async fn insert(&self, record: BookingRecord) -> Result<InsertAck> {
        let cf = self.cf()?;
        let key = self.next_key.fetch_add(1, Ordering::SeqCst).to_be_bytes();
        let value = serde_json::to_vec(&record)?;

        self.db
            .put_cf(cf, key, value)
            .map_err(|e| BookingError::StoreError(e.to_string()))?;

        Ok(InsertAck::accepted(record))
    }

    async fn all(&self) -> Result<Vec<BookingRecord>> {
        let cf = self.cf()?;
        let mut bookings = Vec::new();
        let iter = self.db.iterator_cf(cf, rocksdb::IteratorMode::Start);

        for item in iter {
            let (_key, value) = item.map_err(|e| BookingError::StoreError(e.to_string()))?;
            let record: BookingRecord = serde_json::from_slice(&value)?;
            bookings.push(record);
        }

        Ok(bookings)
    }
}
