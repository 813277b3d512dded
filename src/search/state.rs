//! Search lifecycle states

use crate::breach::BreachResult;
use crate::error::LookupError;
use serde::{Deserialize, Serialize};

/// Why a search ended in `Failed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum FailureReason {
    Transport(String),
    Parse(String),
    Timeout,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(detail) => write!(f, "Breach service unreachable: {}", detail),
            Self::Parse(detail) => write!(f, "Unreadable response from breach service: {}", detail),
            Self::Timeout => write!(f, "Breach lookup timed out"),
        }
    }
}

impl From<LookupError> for FailureReason {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::Transport(detail) => FailureReason::Transport(detail),
            LookupError::Parse(detail) => FailureReason::Parse(detail),
        }
    }
}

/// State of the most recent search. Replaced whole on every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    /// No search has been started
    #[default]
    Idle,
    /// A lookup is in flight
    Pending,
    /// The source reported a breach
    Found(BreachResult),
    /// The source answered with no records
    NotFound,
    /// The lookup could not be completed
    Failed(FailureReason),
}

impl SearchState {
    /// Whether a search has settled into this state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Found(_) | Self::NotFound | Self::Failed(_))
    }

    /// Stable lowercase name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Found(_) => "found",
            Self::NotFound => "not_found",
            Self::Failed(_) => "failed",
        }
    }

    pub fn breach(&self) -> Option<&BreachResult> {
        match self {
            Self::Found(breach) => Some(breach),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}
