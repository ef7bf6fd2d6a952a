use anyhow::Result;
use clap::Args;

use desk_db::{schema, Connection};

#[derive(Args, Debug)]
pub struct InitDb {}

impl InitDb {
    /// Create the database file and install the schema.
    pub async fn run(self, db: &str) -> Result<()> {
        let conn = Connection::open_create(db).await?;
        schema::install(&conn).await?;
        println!("Database initialized at {}.", db);
        Ok(())
    }
}
