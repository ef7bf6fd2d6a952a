use anyhow::Result;
use async_trait::async_trait;

use desk_data::{
    Delete, Insert, Member, MemberDraft, MemberFilter, Payment, PaymentDraft,
    PaymentFilter, Query, Retrieve, Update,
};
use desk_db::{results::QueryError, Connection};

use crate::{
    envelope::{AckEnvelope, MembersEnvelope, PaymentsEnvelope},
    members::MembersApi,
    payments::PaymentsApi,
};

/// In-process collaborator backed by the local database.
/// Owns all persistence; the views only ever see envelopes.
#[derive(Clone)]
pub struct LocalCollaborator {
    db: Connection,
}

impl LocalCollaborator {
    pub fn new(db: Connection) -> Self {
        Self { db }
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<QueryError>(), Some(QueryError::NotFound))
}

#[async_trait]
impl MembersApi for LocalCollaborator {
    async fn get_members(&self) -> Result<MembersEnvelope> {
        let members: Vec<Member> = self.db.query(&MemberFilter::default()).await?;
        Ok(MembersEnvelope::ok(members))
    }

    async fn add_member(&self, draft: MemberDraft) -> Result<AckEnvelope> {
        let member = self.db.insert(draft.apply_to(&Member::default())).await?;
        Ok(AckEnvelope::ok(member.id))
    }

    async fn update_member(&self, id: u32, draft: MemberDraft) -> Result<AckEnvelope> {
        let current: Member = match self.db.retrieve(id).await {
            Ok(member) => member,
            Err(err) if is_not_found(&err) => {
                return Ok(AckEnvelope::failed(format!("Member {} not found", id)))
            }
            Err(err) => return Err(err),
        };
        let member = self.db.update(draft.apply_to(&current)).await?;
        Ok(AckEnvelope::ok(member.id))
    }

    async fn delete_member(&self, id: u32) -> Result<AckEnvelope> {
        let member: Member = match self.db.retrieve(id).await {
            Ok(member) => member,
            Err(err) if is_not_found(&err) => {
                return Ok(AckEnvelope::failed(format!("Member {} not found", id)))
            }
            Err(err) => return Err(err),
        };
        // A member with payments on file cannot be deleted, the
        // foreign key constraint would reject it anyway.
        match self.db.delete(&member).await {
            Ok(()) => Ok(AckEnvelope::ok(id)),
            Err(err) => Ok(AckEnvelope::failed(format!(
                "Failed to delete member {}: {}",
                id, err
            ))),
        }
    }
}

#[async_trait]
impl PaymentsApi for LocalCollaborator {
    async fn get_payments(&self) -> Result<PaymentsEnvelope> {
        let payments: Vec<Payment> = self.db.query(&PaymentFilter::default()).await?;
        Ok(PaymentsEnvelope::ok(payments))
    }

    async fn add_payment(&self, draft: PaymentDraft) -> Result<AckEnvelope> {
        match self.db.insert(draft.apply_to(&Payment::default())).await {
            Ok(payment) => Ok(AckEnvelope::ok(payment.id)),
            // Rejected by the member foreign key
            Err(err) => Ok(AckEnvelope::failed(format!("Failed to add payment: {}", err))),
        }
    }

    async fn update_payment(&self, id: u32, draft: PaymentDraft) -> Result<AckEnvelope> {
        let current: Payment = match self.db.retrieve(id).await {
            Ok(payment) => payment,
            Err(err) if is_not_found(&err) => {
                return Ok(AckEnvelope::failed(format!("Payment {} not found", id)))
            }
            Err(err) => return Err(err),
        };
        let payment = self.db.update(draft.apply_to(&current)).await?;
        Ok(AckEnvelope::ok(payment.id))
    }

    async fn delete_payment(&self, id: u32) -> Result<AckEnvelope> {
        let payment: Payment = match self.db.retrieve(id).await {
            Ok(payment) => payment,
            Err(err) if is_not_found(&err) => {
                return Ok(AckEnvelope::failed(format!("Payment {} not found", id)))
            }
            Err(err) => return Err(err),
        };
        self.db.delete(&payment).await?;
        Ok(AckEnvelope::ok(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use desk_data::MembershipType;

    async fn collaborator() -> LocalCollaborator {
        LocalCollaborator::new(Connection::open_test().await)
    }

    fn member_draft(first: &str, last: &str) -> MemberDraft {
        MemberDraft {
            first_name: first.to_string(),
            last_name: last.to_string(),
            membership_expiry: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            membership_renewal: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            length_months: 1,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_member_roundtrip() {
        let api = collaborator().await;

        let ack = api.add_member(member_draft("Erika", "Mustermann")).await.unwrap();
        assert!(ack.success);
        let id = ack.id.unwrap();

        let members = api.get_members().await.unwrap().into_records().unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].full_name(), "Erika Mustermann");
        assert_eq!(members[0].membership_type, MembershipType::Annual);

        let mut draft = member_draft("Erika", "Beispiel");
        draft.membership_type = MembershipType::Monthly;
        api.update_member(id, draft).await.unwrap().into_result().unwrap();

        let members = api.get_members().await.unwrap().into_records().unwrap();
        assert_eq!(members[0].last_name, "Beispiel");
        assert_eq!(members[0].membership_type, MembershipType::Monthly);

        api.delete_member(id).await.unwrap().into_result().unwrap();
        let members = api.get_members().await.unwrap().into_records().unwrap();
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_member_is_rejected() {
        let api = collaborator().await;
        let ack = api.delete_member(999).await.unwrap();
        assert!(!ack.success);
        assert!(ack.into_result().is_err());
    }

    #[tokio::test]
    async fn test_payment_roundtrip() {
        let api = collaborator().await;
        let member = api.add_member(member_draft("Test", "Member")).await.unwrap();

        let draft = PaymentDraft {
            member_id: member.id.unwrap(),
            amount: 500.0,
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            payment_type: MembershipType::Monthly,
            expiry: NaiveDate::from_ymd_opt(2025, 2, 15).unwrap(),
        };
        let ack = api.add_payment(draft).await.unwrap();
        assert!(ack.success);
        let id = ack.id.unwrap();

        let payments = api.get_payments().await.unwrap().into_records().unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].amount, 500.0);

        api.delete_payment(id).await.unwrap().into_result().unwrap();
        let payments = api.get_payments().await.unwrap().into_records().unwrap();
        assert!(payments.is_empty());
    }

    #[tokio::test]
    async fn test_payment_for_unknown_member_is_rejected() {
        let api = collaborator().await;
        let draft = PaymentDraft {
            member_id: 999,
            amount: 100.0,
            ..Default::default()
        };
        let ack = api.add_payment(draft).await.unwrap();
        assert!(!ack.success);
    }
}
