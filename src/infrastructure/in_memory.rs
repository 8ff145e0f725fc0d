use crate::domain::booking::{BookingRecord, InsertAck};
use crate::domain::ports::BookingStore;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory booking store.
///
/// Uses `Arc<RwLock<Vec<BookingRecord>>>` to allow shared concurrent access.
/// Stands in for the remote backend in tests and in the replay CLI; every
/// insert is acknowledged with the echoed record.
#[derive(Default, Clone)]
pub struct InMemoryBookingStore {
    bookings: Arc<RwLock<Vec<BookingRecord>>>,
}

impl InMemoryBookingStore {
    /// Creates a new, empty in-memory booking store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn insert(&self, record: BookingRecord) -> Result<InsertAck> {
        let mut bookings = self.bookings.write().await;
        bookings.push(record.clone());
        Ok(InsertAck::accepted(record))
    }

    async fn all(&self) -> Result<Vec<BookingRecord>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.clone())
    }
}
