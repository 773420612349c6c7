//! Observable events for gridquery
//!
//! Events are explicit and typed; the logger takes their string form.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Request handling
    /// Request failed validation
    RequestRejected,
    /// Plan could not be built for a valid request
    PlanRejected,
    /// Plan built
    PlanBuilt,

    // Execution
    /// Plan execution complete
    QueryComplete,
    /// Collection failed during execution
    QueryFailed,

    // CLI
    /// Configuration loaded
    ConfigLoaded,
    /// Records file loaded into memory
    RecordsLoaded,
}

impl Event {
    /// Returns the event name as used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::PlanRejected => "PLAN_REJECTED",
            Event::PlanBuilt => "PLAN_BUILT",
            Event::QueryComplete => "QUERY_COMPLETE",
            Event::QueryFailed => "QUERY_FAILED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::RecordsLoaded => "RECORDS_LOADED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
