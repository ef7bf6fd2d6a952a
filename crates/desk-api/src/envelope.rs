use serde::{Deserialize, Serialize};

use desk_data::{Member, Payment};

use crate::error::ApiError;

/// Response to `get_members`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembersEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<Member>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MembersEnvelope {
    pub fn ok(members: Vec<Member>) -> Self {
        Self {
            success: true,
            members: Some(members),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            members: None,
            message: Some(message.into()),
        }
    }

    /// Check the envelope shape. A missing success flag never
    /// deserializes, a false one or a missing record array is
    /// a protocol violation.
    pub fn into_records(self) -> Result<Vec<Member>, ApiError> {
        if !self.success {
            return Err(ApiError::Shape("members response not successful"));
        }
        self.members
            .ok_or(ApiError::Shape("members response without record array"))
    }
}

/// Response to `get_payments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentsEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payments: Option<Vec<Payment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PaymentsEnvelope {
    pub fn ok(payments: Vec<Payment>) -> Self {
        Self {
            success: true,
            payments: Some(payments),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            payments: None,
            message: Some(message.into()),
        }
    }

    pub fn into_records(self) -> Result<Vec<Payment>, ApiError> {
        if !self.success {
            return Err(ApiError::Shape("payments response not successful"));
        }
        self.payments
            .ok_or(ApiError::Shape("payments response without record array"))
    }
}

/// Response to a create, update or delete request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AckEnvelope {
    pub fn ok(id: u32) -> Self {
        Self {
            success: true,
            id: Some(id),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            message: Some(message.into()),
        }
    }

    pub fn into_result(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            let message = self
                .message
                .unwrap_or_else(|| "request rejected".to_string());
            Err(ApiError::Rejected(message))
        }
    }
}
