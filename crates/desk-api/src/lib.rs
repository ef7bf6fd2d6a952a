mod envelope;
pub use envelope::{AckEnvelope, MembersEnvelope, PaymentsEnvelope};

mod error;
pub use error::ApiError;

mod members;
pub use members::MembersApi;

mod payments;
pub use payments::PaymentsApi;

mod local;
pub use local::LocalCollaborator;
