use anyhow::Result;

use desk_cli::cli::{Cli, Command};
use desk_db::Connection;

#[tokio::main]
async fn main() -> Result<()> {
    let filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::init();
    match cli.command {
        Command::Init(cmd) => cmd.run(&cli.db).await,
        Command::Members(cmd) => {
            let conn = Connection::open(&cli.db).await?;
            cmd.run(conn).await
        }
        Command::Payments(cmd) => {
            let conn = Connection::open(&cli.db).await?;
            cmd.run(conn).await
        }
    }?;

    Ok(())
}
