//! gridquery - server-side processing for data grids
//!
//! Validates grid requests, plans them against a field policy and runs
//! the plan over a pluggable collection.

pub mod api;
pub mod cli;
pub mod executor;
pub mod observability;
pub mod planner;
pub mod validator;
