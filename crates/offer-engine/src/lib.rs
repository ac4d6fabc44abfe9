//! Discount resolution engine for promotional payment offers.
//!
//! The `offers` module holds the decision logic: a pattern-based
//! summary parser, the discount calculator with its combination and
//! capping policy, the offer store abstraction, and the service plus
//! HTTP router that tie them together. Configuration, telemetry, and
//! the application error type live alongside it so binaries only wire
//! infrastructure.

pub mod config;
pub mod error;
pub mod offers;
pub mod telemetry;
