//! Mapping from homework status codes to notification text

use std::str::FromStr;

use serde_json::Value;

use crate::validator::WorkItemRecord;

pub const NAME_FIELD: &str = "homework_name";
pub const STATUS_FIELD: &str = "status";

/// Review state of a homework, as reported by the status API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 3] = [
        ReviewStatus::Approved,
        ReviewStatus::Reviewing,
        ReviewStatus::Rejected,
    ];

    /// Status code as it appears on the wire
    pub fn code(&self) -> &'static str {
        match self {
            ReviewStatus::Approved => "approved",
            ReviewStatus::Reviewing => "reviewing",
            ReviewStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict sent to the user
    pub fn verdict(&self) -> &'static str {
        match self {
            ReviewStatus::Approved => "The work has been reviewed: the reviewer liked everything. Hooray!",
            ReviewStatus::Reviewing => "The work has been taken for review.",
            ReviewStatus::Rejected => "The work has been reviewed: the reviewer left some remarks.",
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = crate::BotError;

    fn from_str(code: &str) -> crate::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| crate::BotError::UnknownStatus(code.to_string()))
    }
}

/// Build the notification text for a homework record
pub fn parse_status(homework: &WorkItemRecord) -> crate::Result<String> {
    let (name, status) = match (homework.get(NAME_FIELD), homework.get(STATUS_FIELD)) {
        (Some(name), Some(status)) => (name, status),
        _ => {
            return Err(crate::BotError::MissingFields(format!(
                "'{}' and '{}' are required",
                NAME_FIELD, STATUS_FIELD
            )))
        }
    };

    let name = match name {
        Value::String(name) => name.clone(),
        other => other.to_string(),
    };
    let status: ReviewStatus = match status {
        Value::String(code) => code.parse()?,
        other => return Err(crate::BotError::UnknownStatus(other.to_string())),
    };

    Ok(format!(
        "Changed review status for \"{}\". {}",
        name,
        status.verdict()
    ))
}
