//! Build ordering policy and the stage labels used in errors and logs.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// When a builder-level validator runs relative to construction.
///
/// - PreConstruct: validate the accumulated properties, then construct
/// - PostConstruct: construct, then validate the finished instance
///   (a rejected instance is dropped, never returned)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    PreConstruct,
    #[default]
    PostConstruct,
}

impl fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationPolicy::PreConstruct => write!(f, "pre_construct"),
            ValidationPolicy::PostConstruct => write!(f, "post_construct"),
        }
    }
}

impl FromStr for ValidationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre_construct" => Ok(ValidationPolicy::PreConstruct),
            "post_construct" => Ok(ValidationPolicy::PostConstruct),
            other => Err(format!("unknown validation policy: '{other}'")),
        }
    }
}

/// Stages a single `build()` call moves through.
///
/// `Idle -> Validating -> Constructing -> Done` under PreConstruct,
/// `Idle -> Constructing -> ValidatingResult -> Done` under PostConstruct.
/// `Failed` is reachable from any validating or constructing stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStage {
    Idle,
    Validating,
    Constructing,
    ValidatingResult,
    Done,
    Failed,
}

impl BuildStage {
    /// The stage that follows `self` on the success path under `policy`.
    ///
    /// Terminal stages return themselves.
    pub fn next(self, policy: ValidationPolicy) -> BuildStage {
        match (policy, self) {
            (_, BuildStage::Done) => BuildStage::Done,
            (_, BuildStage::Failed) => BuildStage::Failed,
            (ValidationPolicy::PreConstruct, BuildStage::Idle) => BuildStage::Validating,
            (ValidationPolicy::PreConstruct, BuildStage::Validating) => BuildStage::Constructing,
            (ValidationPolicy::PreConstruct, _) => BuildStage::Done,
            (ValidationPolicy::PostConstruct, BuildStage::Idle) => BuildStage::Constructing,
            (ValidationPolicy::PostConstruct, BuildStage::Constructing) => {
                BuildStage::ValidatingResult
            }
            (ValidationPolicy::PostConstruct, _) => BuildStage::Done,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BuildStage::Done | BuildStage::Failed)
    }
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BuildStage::Idle => "idle",
            BuildStage::Validating => "validating",
            BuildStage::Constructing => "constructing",
            BuildStage::ValidatingResult => "validating_result",
            BuildStage::Done => "done",
            BuildStage::Failed => "failed",
        };
        write!(f, "{s}")
    }
}
