use clap::{Parser, Subcommand};

use crate::commands::{InitDb, Members, Payments};

#[derive(Parser, Debug)]
#[clap(name = "desk", version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Path to the membership database
    #[clap(long, default_value = "frontdesk.sqlite3", env = "FRONTDESK_DB")]
    pub db: String,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database and install the schema
    #[clap(name = "init")]
    Init(InitDb),
    /// Manage members
    #[clap(name = "members", subcommand)]
    Members(Members),
    /// Manage payments
    #[clap(name = "payments", subcommand)]
    Payments(Payments),
}
