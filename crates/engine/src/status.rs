//! Review and processing status enumerations.

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Human audit state of a transaction.
///
/// Every transaction starts `Pending` at extraction time. `Approved`,
/// `Rejected` and `Edited` are all reachable from any state by further
/// manual action; none of them is re-entered automatically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
    Edited,
}

impl ReviewStatus {
    /// Every status, in stable order.
    pub const ALL: [ReviewStatus; 4] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::Edited,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Edited => "edited",
        }
    }
}

impl TryFrom<&str> for ReviewStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "edited" => Ok(Self::Edited),
            other => Err(EngineError::Validation(format!(
                "invalid review status: {other}"
            ))),
        }
    }
}

/// Processing state of an uploaded statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Processing,
    Completed,
    Failed,
}

impl ProcessingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl TryFrom<&str> for ProcessingStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(EngineError::Validation(format!(
                "invalid processing status: {other}"
            ))),
        }
    }
}
