use tracing::error;

use desk_api::{ApiError, MembersApi, PaymentsApi};
use desk_data::{Member, Payment};

use crate::{
    form::PaymentForm,
    pipeline::{
        payment_page, MonthFilter, NameIndex, Page, PaymentQuery, SortOrder,
        TypeFilter,
    },
    state::{Modal, Notice, Phase},
};

/// Both reads are issued together and joined; the load fails
/// if either of them does.
async fn fetch_all<A>(api: &A) -> Result<(Vec<Payment>, Vec<Member>), ApiError>
where
    A: PaymentsApi + MembersApi,
{
    let (payments, members) =
        tokio::join!(api.get_payments(), api.get_members());
    let payments = payments.map_err(ApiError::Transport)?.into_records()?;
    let members = members.map_err(ApiError::Transport)?.into_records()?;
    Ok((payments, members))
}

/// State machine of the payments screen. Carries the member
/// snapshot alongside the payments to resolve display names.
pub struct PaymentsView<A> {
    api: A,
    phase: Phase,
    payments: Vec<Payment>,
    members: Vec<Member>,
    names: NameIndex,
    query: PaymentQuery,
    modal: Modal<PaymentForm>,
    pending_delete: Option<u32>,
    notice: Option<Notice>,
    generation: u64,
}

impl<A: PaymentsApi + MembersApi> PaymentsView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            phase: Phase::Idle,
            payments: Vec::new(),
            members: Vec::new(),
            names: NameIndex::default(),
            query: PaymentQuery::default(),
            modal: Modal::Closed,
            pending_delete: None,
            notice: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn query(&self) -> &PaymentQuery {
        &self.query
    }

    pub fn modal(&self) -> &Modal<PaymentForm> {
        &self.modal
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn resolve_name(&self, member_id: u32) -> &str {
        self.names.resolve(member_id)
    }

    pub fn names(&self) -> &NameIndex {
        &self.names
    }

    /// Members selectable in the payment form.
    pub fn member_options(&self) -> Vec<(u32, String)> {
        self.members
            .iter()
            .map(|m| (m.id, m.full_name()))
            .collect()
    }

    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.generation
    }

    pub fn complete_load(
        &mut self,
        generation: u64,
        outcome: Result<(Vec<Payment>, Vec<Member>), ApiError>,
    ) {
        if generation != self.generation {
            return;
        }
        match outcome {
            Ok((payments, members)) => {
                self.names = NameIndex::build(&members);
                self.payments = payments;
                self.members = members;
                self.phase = Phase::Ready;
            }
            Err(err) => {
                error!("failed to fetch payments: {}", err);
                self.phase = Phase::Error("Failed to fetch data".to_string());
            }
        }
    }

    pub async fn load(&mut self) {
        let generation = self.begin_load();
        let outcome = fetch_all(&self.api).await;
        self.complete_load(generation, outcome);
    }

    /// Refresh the payments list only, after a create or an
    /// update. A failed refresh keeps the stale list.
    pub async fn refresh_payments(&mut self) {
        let outcome = self
            .api
            .get_payments()
            .await
            .map_err(ApiError::Transport)
            .and_then(|envelope| envelope.into_records());
        match outcome {
            Ok(payments) => self.payments = payments,
            Err(err) => error!("failed to refresh payments: {}", err),
        }
    }

    // Pipeline parameters

    pub fn set_search(&mut self, term: &str) {
        self.query.search = term.to_string();
    }

    pub fn set_type_filter(&mut self, filter: TypeFilter) {
        self.query.payment_type = filter;
    }

    pub fn set_month_filter(&mut self, filter: MonthFilter) {
        self.query.month = filter;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.query.sort = sort;
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.page = page;
    }

    pub fn next_page(&mut self) {
        let page = self.visible();
        if page.page < page.total_pages {
            self.query.page = page.page + 1;
        }
    }

    pub fn prev_page(&mut self) {
        let page = self.visible();
        if page.page > 1 {
            self.query.page = page.page - 1;
        }
    }

    pub fn visible(&self) -> Page<Payment> {
        payment_page(&self.payments, &self.names, &self.query)
    }

    // Modal

    pub fn open_add(&mut self) {
        self.modal = Modal::Open {
            target: None,
            form: PaymentForm::default(),
        };
    }

    pub fn open_edit(&mut self, id: u32) -> bool {
        match self.payments.iter().find(|p| p.id == id) {
            Some(payment) => {
                let form = PaymentForm::from_payment(payment);
                self.modal = Modal::Open {
                    target: Some(id),
                    form,
                };
                true
            }
            None => false,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut PaymentForm> {
        self.modal.form_mut()
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    pub async fn submit(&mut self) -> bool {
        let (target, form) = match &self.modal {
            Modal::Open { target, form } => (*target, form.clone()),
            Modal::Closed => return false,
        };
        let draft = match form.to_draft() {
            Ok(draft) => draft,
            Err(err) => {
                self.notice = Some(Notice::Error(err.to_string()));
                return false;
            }
        };

        let outcome = match target {
            Some(id) => self.api.update_payment(id, draft).await,
            None => self.api.add_payment(draft).await,
        };
        let outcome = outcome
            .map_err(ApiError::Transport)
            .and_then(|ack| ack.into_result());

        match outcome {
            Ok(()) => {
                let message = match target {
                    Some(_) => "Payment updated successfully!",
                    None => "Payment added successfully!",
                };
                self.notice = Some(Notice::Info(message.to_string()));
                self.modal = Modal::Closed;
                self.refresh_payments().await;
                true
            }
            Err(err) => {
                error!("failed to save payment: {}", err);
                self.notice = Some(Notice::Error(format!(
                    "Failed to save payment: {}",
                    err
                )));
                false
            }
        }
    }

    // Delete

    pub fn begin_delete(&mut self, id: u32) -> Option<&Payment> {
        if !self.payments.iter().any(|p| p.id == id) {
            return None;
        }
        self.pending_delete = Some(id);
        self.payments.iter().find(|p| p.id == id)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) -> bool {
        let id = match self.pending_delete.take() {
            Some(id) => id,
            None => return false,
        };
        let outcome = self
            .api
            .delete_payment(id)
            .await
            .map_err(ApiError::Transport)
            .and_then(|ack| ack.into_result());

        match outcome {
            Ok(()) => {
                self.payments.retain(|p| p.id != id);
                self.notice =
                    Some(Notice::Info("Payment deleted successfully!".to_string()));
                true
            }
            Err(err) => {
                error!("failed to delete payment {}: {}", id, err);
                self.notice = Some(Notice::Error(
                    "Failed to delete payment. Please try again.".to_string(),
                ));
                false
            }
        }
    }
}
