use crate::domain::booking::BookingRecord;
use crate::error::Result;
use rust_decimal::Decimal;
use std::io::Write;

/// Writes booking records as CSV.
///
/// This is the presentation boundary: money is rounded to two fraction
/// digits here and nowhere earlier.
pub struct BookingWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> BookingWriter<W> {
    pub fn new(destination: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(destination),
        }
    }

    /// Writes a header followed by one row per booking, then flushes.
    pub fn write_bookings(&mut self, bookings: Vec<BookingRecord>) -> Result<()> {
        self.writer.write_record([
            "customer",
            "name",
            "origin",
            "destination",
            "distance_km",
            "distance_price",
            "duration",
            "vehicle",
            "scheduled_at",
            "total_price",
            "created_at",
        ])?;

        for booking in bookings {
            self.writer.write_record([
                booking.customer_id.as_str(),
                booking.customer_name.as_str(),
                booking.origin.as_str(),
                booking.destination.as_str(),
                &display_money(booking.distance_km),
                &display_money(booking.distance_price),
                booking.duration.as_str(),
                booking.vehicle_name.as_str(),
                booking.scheduled_at.as_str(),
                &display_money(booking.total_price),
                &booking.created_at.to_rfc3339(),
            ])?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

fn display_money(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}
