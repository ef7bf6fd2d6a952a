//! In-memory collaborator for view tests.

use std::sync::{
    atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering},
    Arc, Mutex,
};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};

use desk_api::{
    AckEnvelope, MembersApi, MembersEnvelope, PaymentsApi, PaymentsEnvelope,
};
use desk_data::{Member, MemberDraft, MembershipType, Payment, PaymentDraft};

#[derive(Default)]
struct MockState {
    members: Mutex<Vec<Member>>,
    payments: Mutex<Vec<Payment>>,
    next_id: AtomicU32,
    get_members_calls: AtomicUsize,
    get_payments_calls: AtomicUsize,
    mutation_calls: AtomicUsize,
    members_load_broken: AtomicBool,
    payments_load_broken: AtomicBool,
    reject_mutations: AtomicBool,
}

/// Clones share state, so tests can keep a handle for
/// inspection next to the one the view owns.
#[derive(Clone, Default)]
pub(crate) struct MockCollaborator {
    state: Arc<MockState>,
}

/// Later ids get later creation times, so the default sort is
/// deterministic in tests.
fn created_at_for(id: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + Duration::minutes(id as i64)
}

impl MockCollaborator {
    fn next_id(&self) -> u32 {
        self.state.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn seed_member(&self, first: &str, last: &str) -> Member {
        self.seed_member_full(first, last, MembershipType::Annual)
    }

    pub fn seed_member_full(
        &self,
        first: &str,
        last: &str,
        membership_type: MembershipType,
    ) -> Member {
        let id = self.next_id();
        let member = Member {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            membership_type,
            membership_expiry: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            membership_renewal: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            length_months: 1,
            created_at: created_at_for(id),
            ..Default::default()
        };
        self.state.members.lock().unwrap().push(member.clone());
        member
    }

    pub fn seed_payment(&self, member_id: u32, date: NaiveDate) -> Payment {
        self.seed_payment_full(
            member_id,
            100.0,
            date,
            MembershipType::Annual,
            date,
        )
    }

    pub fn seed_payment_full(
        &self,
        member_id: u32,
        amount: f64,
        date: NaiveDate,
        payment_type: MembershipType,
        expiry: NaiveDate,
    ) -> Payment {
        let payment = Payment {
            id: self.next_id(),
            member_id,
            amount,
            date,
            payment_type,
            expiry,
        };
        self.state.payments.lock().unwrap().push(payment.clone());
        payment
    }

    pub fn break_members_load(&self) {
        self.state.members_load_broken.store(true, Ordering::SeqCst);
    }

    pub fn break_payments_load(&self) {
        self.state.payments_load_broken.store(true, Ordering::SeqCst);
    }

    pub fn reject_mutations(&self) {
        self.state.reject_mutations.store(true, Ordering::SeqCst);
    }

    fn rejects(&self) -> bool {
        self.state.reject_mutations.load(Ordering::SeqCst)
    }

    pub fn get_members_calls(&self) -> usize {
        self.state.get_members_calls.load(Ordering::SeqCst)
    }

    pub fn get_payments_calls(&self) -> usize {
        self.state.get_payments_calls.load(Ordering::SeqCst)
    }

    pub fn mutation_calls(&self) -> usize {
        self.state.mutation_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MembersApi for MockCollaborator {
    async fn get_members(&self) -> Result<MembersEnvelope> {
        self.state.get_members_calls.fetch_add(1, Ordering::SeqCst);
        if self.state.members_load_broken.load(Ordering::SeqCst) {
            return Ok(MembersEnvelope::failed("collaborator offline"));
        }
        Ok(MembersEnvelope::ok(
            self.state.members.lock().unwrap().clone(),
        ))
    }

    async fn add_member(&self, draft: MemberDraft) -> Result<AckEnvelope> {
        self.state.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if self.rejects() {
            return Ok(AckEnvelope::failed("rejected by collaborator"));
        }
        let id = self.next_id();
        let mut member = draft.apply_to(&Member::default());
        member.id = id;
        member.created_at = created_at_for(id);
        self.state.members.lock().unwrap().push(member);
        Ok(AckEnvelope::ok(id))
    }

    async fn update_member(
        &self,
        id: u32,
        draft: MemberDraft,
    ) -> Result<AckEnvelope> {
        self.state.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if self.rejects() {
            return Ok(AckEnvelope::failed("rejected by collaborator"));
        }
        let mut members = self.state.members.lock().unwrap();
        match members.iter_mut().find(|m| m.id == id) {
            Some(member) => {
                let updated = draft.apply_to(member);
                *member = updated;
                Ok(AckEnvelope::ok(id))
            }
            None => Ok(AckEnvelope::failed("Member not found")),
        }
    }

    async fn delete_member(&self, id: u32) -> Result<AckEnvelope> {
        self.state.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if self.rejects() {
            return Ok(AckEnvelope::failed("rejected by collaborator"));
        }
        let mut members = self.state.members.lock().unwrap();
        if members.iter().any(|m| m.id == id) {
            members.retain(|m| m.id != id);
            Ok(AckEnvelope::ok(id))
        } else {
            Ok(AckEnvelope::failed("Member not found"))
        }
    }
}

#[async_trait]
impl PaymentsApi for MockCollaborator {
    async fn get_payments(&self) -> Result<PaymentsEnvelope> {
        self.state.get_payments_calls.fetch_add(1, Ordering::SeqCst);
        if self.state.payments_load_broken.load(Ordering::SeqCst) {
            return Ok(PaymentsEnvelope::failed("collaborator offline"));
        }
        Ok(PaymentsEnvelope::ok(
            self.state.payments.lock().unwrap().clone(),
        ))
    }

    async fn add_payment(&self, draft: PaymentDraft) -> Result<AckEnvelope> {
        self.state.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if self.rejects() {
            return Ok(AckEnvelope::failed("rejected by collaborator"));
        }
        let id = self.next_id();
        let mut payment = draft.apply_to(&Payment::default());
        payment.id = id;
        self.state.payments.lock().unwrap().push(payment);
        Ok(AckEnvelope::ok(id))
    }

    async fn update_payment(
        &self,
        id: u32,
        draft: PaymentDraft,
    ) -> Result<AckEnvelope> {
        self.state.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if self.rejects() {
            return Ok(AckEnvelope::failed("rejected by collaborator"));
        }
        let mut payments = self.state.payments.lock().unwrap();
        match payments.iter_mut().find(|p| p.id == id) {
            Some(payment) => {
                let updated = draft.apply_to(payment);
                *payment = updated;
                Ok(AckEnvelope::ok(id))
            }
            None => Ok(AckEnvelope::failed("Payment not found")),
        }
    }

    async fn delete_payment(&self, id: u32) -> Result<AckEnvelope> {
        self.state.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if self.rejects() {
            return Ok(AckEnvelope::failed("rejected by collaborator"));
        }
        let mut payments = self.state.payments.lock().unwrap();
        if payments.iter().any(|p| p.id == id) {
            payments.retain(|p| p.id != id);
            Ok(AckEnvelope::ok(id))
        } else {
            Ok(AckEnvelope::failed("Payment not found"))
        }
    }
}
