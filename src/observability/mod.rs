//! Observability for nben902
//!
//! Structured JSON-line logging of typed events.
//!
//! ```ignore
//! use nben902::observability::{Event, Logger};
//!
//! Logger::info(Event::RecordsLoaded, &[("rows", "42")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
