pub mod booking;
pub mod card;
pub mod checklist;
pub mod cost;
pub mod ports;
pub mod trip;
