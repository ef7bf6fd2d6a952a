use anyhow::Result;
use async_trait::async_trait;

use desk_data::PaymentDraft;

use crate::envelope::{AckEnvelope, PaymentsEnvelope};

/// The payments collaborator contract.
#[async_trait]
pub trait PaymentsApi: Send + Sync {
    async fn get_payments(&self) -> Result<PaymentsEnvelope>;
    async fn add_payment(&self, draft: PaymentDraft) -> Result<AckEnvelope>;
    async fn update_payment(&self, id: u32, draft: PaymentDraft) -> Result<AckEnvelope>;
    async fn delete_payment(&self, id: u32) -> Result<AckEnvelope>;
}
