use church_ledger::{
    cli::Cli,
    config::database::{connect, get_database_url},
};
use dotenvy::dotenv;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();

    // 3. Parse arguments and connect
    let cli = Cli::init();
    let database_url = cli.database_url.clone().unwrap_or_else(get_database_url);

    let db = match connect(&database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!(kind = ?e.kind(), "Failed to connect to database: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!("Database connection established.");

    // 4. Run the subcommand
    match cli.run(&db).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(kind = ?e.kind(), "{e}");
            ExitCode::FAILURE
        }
    }
}
