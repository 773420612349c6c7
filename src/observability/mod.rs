//! Observability subsystem for gridquery
//!
//! Structured JSON logging with typed events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on planning or execution
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use gridquery::observability::{Event, Logger};
//!
//! Logger::info(Event::QueryComplete.as_str(), &[("rows", "42")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
