//! Query Planner subsystem for gridquery
//!
//! The planner turns a validated grid request and a field policy into a
//! deterministic pipeline of stages. It never reads data.
//!
//! # Design Principles
//!
//! - Deterministic: same request and policy → same plan
//! - Allow-listed: only policy-approved fields are searched or returned
//! - Single-key sort: only the first order entry is honored
//! - Explicit: an out-of-range sort column is an error, never a silent no-op

mod errors;
mod explain;
mod planner;
mod policy;
mod stage;

pub use errors::{PlanError, PlanErrorCode, PlanResult};
pub use explain::ExplainPlan;
pub use planner::{QueryPlan, QueryPlanner};
pub use policy::{FieldPolicy, ResolvedFields, SortPlacement, DEFAULT_PRIMARY_KEY};
pub use stage::{MatchMode, SearchFilter, SliceBounds, SortSpec, Stage, ROW_ID_FIELD};
