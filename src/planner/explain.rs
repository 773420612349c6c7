//! Explain plan output
//!
//! Produces deterministic, human-readable explain output.

use std::fmt;

use serde::Serialize;

use super::errors::PlanError;
use super::planner::QueryPlan;
use super::stage::Stage;

/// Explain plan output
#[derive(Debug, Clone, Serialize)]
pub struct ExplainPlan {
    /// Whether planning succeeded
    pub accepted: bool,
    /// Echo token (if accepted)
    pub draw: Option<i64>,
    /// One line per stage, in execution order
    pub stages: Vec<String>,
    /// Rejection reason (if rejected)
    pub rejection_reason: Option<String>,
    /// Rejection error code (if rejected)
    pub rejection_code: Option<String>,
}

impl ExplainPlan {
    /// Creates an explain plan from a successful query plan
    pub fn from_plan(plan: &QueryPlan) -> Self {
        Self {
            accepted: true,
            draw: Some(plan.draw),
            stages: plan.stages.iter().map(describe).collect(),
            rejection_reason: None,
            rejection_code: None,
        }
    }

    /// Creates an explain plan from a planning error
    pub fn from_error(err: &PlanError) -> Self {
        Self::rejected(err.code().code(), err.message())
    }

    /// Creates an explain plan from any coded rejection
    pub fn rejected(code: &str, reason: &str) -> Self {
        Self {
            accepted: false,
            draw: None,
            stages: Vec::new(),
            rejection_reason: Some(reason.to_string()),
            rejection_code: Some(code.to_string()),
        }
    }
}

fn describe(stage: &Stage) -> String {
    match stage {
        Stage::Filter(f) => format!(
            "{} {} {:?} in [{}]",
            stage.name(),
            f.mode.as_str(),
            f.value,
            f.fields.join(", ")
        ),
        Stage::Slice(bounds) => match bounds.end {
            Some(end) => format!("{} [{}, {})", stage.name(), bounds.start, end),
            None => format!("{} [{}, ..)", stage.name(), bounds.start),
        },
        Stage::MergeRowId { primary_key } => format!("{} from {}", stage.name(), primary_key),
        Stage::MergeDefaults { defaults } => {
            let keys: Vec<&str> = defaults.keys().map(String::as_str).collect();
            format!("{} [{}]", stage.name(), keys.join(", "))
        }
        Stage::Sort(spec) => format!("{} {} {}", stage.name(), spec.field, spec.direction.as_str()),
        Stage::Project { fields } => format!("{} [{}]", stage.name(), fields.join(", ")),
        Stage::CountTotal | Stage::Materialize | Stage::CountFiltered => stage.name().to_string(),
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;

        if self.accepted {
            writeln!(f, "Status: ACCEPTED")?;
            if let Some(draw) = self.draw {
                writeln!(f, "Draw: {}", draw)?;
            }
            writeln!(f, "Stages:")?;
            for (i, stage) in self.stages.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, stage)?;
            }
        } else {
            writeln!(f, "Status: REJECTED")?;
            if let Some(code) = &self.rejection_code {
                writeln!(f, "Error Code: {}", code)?;
            }
            if let Some(reason) = &self.rejection_reason {
                writeln!(f, "Reason: {}", reason)?;
            }
        }

        Ok(())
    }
}
