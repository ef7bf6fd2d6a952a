use tracing::error;

use desk_api::{ApiError, MembersApi};
use desk_data::Member;

use crate::{
    form::MemberForm,
    pipeline::{member_page, MemberQuery, Page, SortOrder, TypeFilter},
    state::{Modal, Notice, Phase},
};

async fn fetch_members<A: MembersApi>(api: &A) -> Result<Vec<Member>, ApiError> {
    let envelope = api.get_members().await.map_err(ApiError::Transport)?;
    envelope.into_records()
}

/// State machine of the members screen: record snapshot,
/// pipeline parameters, modal form and delete confirmation.
pub struct MembersView<A> {
    api: A,
    phase: Phase,
    members: Vec<Member>,
    query: MemberQuery,
    modal: Modal<MemberForm>,
    pending_delete: Option<u32>,
    notice: Option<Notice>,
    generation: u64,
}

impl<A: MembersApi> MembersView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            phase: Phase::Idle,
            members: Vec::new(),
            query: MemberQuery::default(),
            modal: Modal::Closed,
            pending_delete: None,
            notice: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn query(&self) -> &MemberQuery {
        &self.query
    }

    pub fn modal(&self) -> &Modal<MemberForm> {
        &self.modal
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Start a load, superseding any load still in flight.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.generation
    }

    /// Apply a load outcome. Outcomes of superseded loads are
    /// dropped.
    pub fn complete_load(
        &mut self,
        generation: u64,
        outcome: Result<Vec<Member>, ApiError>,
    ) {
        if generation != self.generation {
            return;
        }
        match outcome {
            Ok(members) => {
                self.members = members;
                self.phase = Phase::Ready;
            }
            Err(err) => {
                error!("failed to fetch members: {}", err);
                self.phase = Phase::Error("Failed to fetch members".to_string());
            }
        }
    }

    pub async fn load(&mut self) {
        let generation = self.begin_load();
        let outcome = fetch_members(&self.api).await;
        self.complete_load(generation, outcome);
    }

    // Pipeline parameters

    pub fn set_search(&mut self, term: &str) {
        self.query.search = term.to_string();
    }

    pub fn set_type_filter(&mut self, filter: TypeFilter) {
        self.query.membership_type = filter;
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

    /// The currently rendered page.
    pub fn visible(&self) -> Page<Member> {
        member_page(&self.members, &self.query)
    }

    // Modal

    pub fn open_add(&mut self) {
        self.modal = Modal::Open {
            target: None,
            form: MemberForm::default(),
        };
    }

    pub fn open_edit(&mut self, id: u32) -> bool {
        match self.members.iter().find(|m| m.id == id) {
            Some(member) => {
                let form = MemberForm::from_member(member);
                self.modal = Modal::Open {
                    target: Some(id),
                    form,
                };
                true
            }
            None => false,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut MemberForm> {
        self.modal.form_mut()
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    /// Submit the modal form. On success the modal closes and
    /// the whole list is refetched; on failure the modal stays
    /// open with the form intact.
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
            Some(id) => self.api.update_member(id, draft).await,
            None => self.api.add_member(draft).await,
        };
        let outcome = outcome
            .map_err(ApiError::Transport)
            .and_then(|ack| ack.into_result());

        match outcome {
            Ok(()) => {
                let message = match target {
                    Some(_) => "Member updated successfully!",
                    None => "Member added successfully!",
                };
                self.notice = Some(Notice::Info(message.to_string()));
                self.modal = Modal::Closed;
                // Refresh the list
                self.load().await;
                true
            }
            Err(err) => {
                error!("failed to save member: {}", err);
                self.notice =
                    Some(Notice::Error(format!("Failed to save member: {}", err)));
                false
            }
        }
    }

    // Delete

    /// Mark a record for deletion. Nothing is dispatched until
    /// the caller confirms.
    pub fn begin_delete(&mut self, id: u32) -> Option<&Member> {
        if !self.members.iter().any(|m| m.id == id) {
            return None;
        }
        self.pending_delete = Some(id);
        self.members.iter().find(|m| m.id == id)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Dispatch the confirmed delete. On success the record is
    /// removed locally, without a refetch.
    pub async fn confirm_delete(&mut self) -> bool {
        let id = match self.pending_delete.take() {
            Some(id) => id,
            None => return false,
        };
        let outcome = self
            .api
            .delete_member(id)
            .await
            .map_err(ApiError::Transport)
            .and_then(|ack| ack.into_result());

        match outcome {
            Ok(()) => {
                self.members.retain(|m| m.id != id);
                self.notice =
                    Some(Notice::Info("Member deleted successfully!".to_string()));
                true
            }
            Err(err) => {
                error!("failed to delete member {}: {}", id, err);
                self.notice = Some(Notice::Error(
                    "Failed to delete member. Please try again.".to_string(),
                ));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockCollaborator;
    use desk_data::MembershipType;

    async fn ready_view(members: usize) -> (MockCollaborator, MembersView<MockCollaborator>) {
        let api = MockCollaborator::default();
        for _ in 0..members {
            api.seed_member("Test", "Member");
        }
        let mut view = MembersView::new(api.clone());
        view.load().await;
        assert!(view.phase().is_ready());
        (api, view)
    }

    fn fill_valid_form(view: &mut MembersView<MockCollaborator>) {
        let form = view.form_mut().unwrap();
        form.set("first_name", "Erika").unwrap();
        form.set("last_name", "Mustermann").unwrap();
        form.set("membership_expiry", "2025-12-01").unwrap();
        form.set("membership_renewal", "2025-11-01").unwrap();
    }

    #[tokio::test]
    async fn test_load_populates_members() {
        let (_api, view) = ready_view(3).await;
        assert_eq!(view.members().len(), 3);
    }

    #[tokio::test]
    async fn test_unsuccessful_load_is_an_error_state() {
        let api = MockCollaborator::default();
        api.seed_member("Hidden", "Member");
        api.break_members_load();

        let mut view = MembersView::new(api);
        view.load().await;

        assert_eq!(
            view.phase(),
            &Phase::Error("Failed to fetch members".to_string())
        );
        assert!(view.members().is_empty());
    }

    #[tokio::test]
    async fn test_stale_load_outcome_is_dropped() {
        let api = MockCollaborator::default();
        let mut view = MembersView::new(api);

        let first = view.begin_load();
        let second = view.begin_load();

        view.complete_load(first, Ok(vec![Member::default()]));
        assert_eq!(view.phase(), &Phase::Loading);
        assert!(view.members().is_empty());

        view.complete_load(second, Ok(vec![]));
        assert!(view.phase().is_ready());
    }

    #[tokio::test]
    async fn test_twelve_members_two_pages() {
        let (_api, mut view) = ready_view(12).await;

        let page = view.visible();
        assert_eq!(page.rows.len(), 10);
        assert_eq!((page.page, page.total_pages), (1, 2));

        view.next_page();
        let page = view.visible();
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.page, 2);

        // Next is a no-op on the last page
        view.next_page();
        assert_eq!(view.visible().page, 2);

        view.prev_page();
        assert_eq!(view.visible().page, 1);
    }

    #[tokio::test]
    async fn test_add_member_refetches_list() {
        let (api, mut view) = ready_view(1).await;
        assert_eq!(api.get_members_calls(), 1);

        view.open_add();
        fill_valid_form(&mut view);
        assert!(view.submit().await);

        assert!(!view.modal().is_open());
        assert_eq!(
            view.take_notice(),
            Some(Notice::Info("Member added successfully!".to_string()))
        );
        // Initial load plus the post-mutation refetch
        assert_eq!(api.get_members_calls(), 2);
        assert_eq!(view.members().len(), 2);
    }

    #[tokio::test]
    async fn test_edit_resubmit_changes_nothing() {
        let (api, mut view) = ready_view(0).await;
        api.seed_member_full(
            "Erika",
            "Mustermann",
            MembershipType::Monthly,
        );
        view.load().await;
        let before = view.members()[0].clone();

        assert!(view.open_edit(before.id));
        assert!(view.submit().await);

        let after = &view.members()[0];
        assert_eq!(after.first_name, before.first_name);
        assert_eq!(after.last_name, before.last_name);
        assert_eq!(after.membership_type, before.membership_type);
        assert_eq!(after.membership_expiry, before.membership_expiry);
        assert_eq!(after.annual_membership, before.annual_membership);
        assert_eq!(after.length_months, before.length_months);
    }

    #[tokio::test]
    async fn test_rejected_submit_keeps_modal_open() {
        let (api, mut view) = ready_view(0).await;
        api.reject_mutations();

        view.open_add();
        fill_valid_form(&mut view);
        assert!(!view.submit().await);

        assert!(view.modal().is_open());
        // The form keeps its values for the retry
        let form = view.form_mut().unwrap();
        assert_eq!(form.first_name, "Erika");
        match view.take_notice() {
            Some(Notice::Error(msg)) => {
                assert!(msg.starts_with("Failed to save member"))
            }
            other => panic!("expected error notice, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_dispatched() {
        let (api, mut view) = ready_view(0).await;

        view.open_add();
        assert!(!view.submit().await);
        assert!(view.modal().is_open());
        assert_eq!(api.mutation_calls(), 0);
    }

    #[tokio::test]
    async fn test_confirmed_delete_splices_locally() {
        let (api, mut view) = ready_view(3).await;
        let id = view.members()[1].id;

        assert!(view.begin_delete(id).is_some());
        assert!(view.confirm_delete().await);

        assert_eq!(view.members().len(), 2);
        assert!(view.members().iter().all(|m| m.id != id));
        // No refetch for the removal
        assert_eq!(api.get_members_calls(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_delete_dispatches_nothing() {
        let (api, mut view) = ready_view(1).await;
        let id = view.members()[0].id;

        view.begin_delete(id);
        view.cancel_delete();
        assert!(!view.confirm_delete().await);
        assert_eq!(api.mutation_calls(), 0);
        assert_eq!(view.members().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_state() {
        let (api, mut view) = ready_view(2).await;
        api.reject_mutations();
        let id = view.members()[0].id;

        view.begin_delete(id);
        assert!(!view.confirm_delete().await);

        assert_eq!(view.members().len(), 2);
        assert_eq!(
            view.take_notice(),
            Some(Notice::Error(
                "Failed to delete member. Please try again.".to_string()
            ))
        );
    }
}
