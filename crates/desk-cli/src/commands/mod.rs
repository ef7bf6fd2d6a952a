use anyhow::{anyhow, Result};

use desk_views::Notice;

mod init;
pub use init::InitDb;

mod members;
pub use members::Members;

mod payments;
pub use payments::Payments;

/// Print the outcome notice of a dispatched mutation. Error
/// notices become command failures.
pub(crate) fn report_notice(notice: Option<Notice>) -> Result<()> {
    match notice {
        Some(Notice::Info(message)) => {
            println!("{}", message);
            Ok(())
        }
        Some(Notice::Error(message)) => Err(anyhow!(message)),
        None => Ok(()),
    }
}
