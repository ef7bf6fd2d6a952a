use anyhow::Result;
use async_trait::async_trait;

use desk_data::MemberDraft;

use crate::envelope::{AckEnvelope, MembersEnvelope};

/// The members collaborator contract. The transport behind it
/// is opaque to the views.
#[async_trait]
pub trait MembersApi: Send + Sync {
    async fn get_members(&self) -> Result<MembersEnvelope>;
    async fn add_member(&self, draft: MemberDraft) -> Result<AckEnvelope>;
    async fn update_member(&self, id: u32, draft: MemberDraft) -> Result<AckEnvelope>;
    async fn delete_member(&self, id: u32) -> Result<AckEnvelope>;
}
