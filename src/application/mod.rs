//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `SettlementEngine`, the single entry point that
//! turns a validated payment intent into a persisted booking record.

pub mod settlement;
