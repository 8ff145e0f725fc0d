pub mod booking_writer;
pub mod checkout_reader;
