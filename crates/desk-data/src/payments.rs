use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::MembershipType;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PaymentFilter {
    pub id: Option<u32>,
    pub member_id: Option<u32>,
    pub date_before: Option<NaiveDate>,
    pub date_after: Option<NaiveDate>,
}

#[derive(Debug, Default, Clone, FromRow, Serialize, Deserialize)]
pub struct Payment {
    pub id: u32,
    pub member_id: u32,
    pub amount: f64,
    pub date: NaiveDate,
    pub payment_type: MembershipType,
    pub expiry: NaiveDate,
}

/// Create / update payload for a payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentDraft {
    pub member_id: u32,
    pub amount: f64,
    pub date: NaiveDate,
    pub payment_type: MembershipType,
    pub expiry: NaiveDate,
}

impl PaymentDraft {
    /// Apply the draft onto an existing record, keeping the id.
    pub fn apply_to(&self, payment: &Payment) -> Payment {
        Payment {
            id: payment.id,
            member_id: self.member_id,
            amount: self.amount,
            date: self.date,
            payment_type: self.payment_type,
            expiry: self.expiry,
        }
    }
}

impl From<&Payment> for PaymentDraft {
    fn from(payment: &Payment) -> Self {
        PaymentDraft {
            member_id: payment.member_id,
            amount: payment.amount,
            date: payment.date,
            payment_type: payment.payment_type,
            expiry: payment.expiry,
        }
    }
}
