use super::booking::{BookingRecord, InsertAck};
use crate::error::Result;
use async_trait::async_trait;

/// The persistence boundary for finished bookings.
///
/// Stands in for the remote backend's insert contract: the settlement engine
/// treats it as an opaque async call that either acknowledges the record or
/// reports why it was rejected.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert(&self, record: BookingRecord) -> Result<InsertAck>;
    async fn all(&self) -> Result<Vec<BookingRecord>>;
}

pub type BookingStoreBox = Box<dyn BookingStore>;
pub type BookingStoreFactory = Box<dyn Fn() -> BookingStoreBox + Send + Sync>;
