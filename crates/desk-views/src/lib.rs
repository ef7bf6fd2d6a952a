// List pipeline
mod pipeline;
pub use pipeline::{
    member_page, paginate, payment_page, MemberQuery, MonthFilter, NameIndex,
    Page, PaymentQuery, SortOrder, TypeFilter, PAGE_SIZE, UNKNOWN_MEMBER,
};

// Modal forms
mod form;
pub use form::{FormError, MemberForm, PaymentForm};

// Screen state machines
mod state;
pub use state::{Modal, Notice, Phase};

mod members_view;
pub use members_view::MembersView;

mod payments_view;
pub use payments_view::PaymentsView;

#[cfg(test)]
pub(crate) mod mock;
