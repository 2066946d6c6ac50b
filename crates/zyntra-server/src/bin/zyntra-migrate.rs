use tracing::info;

use zyntra_db::{Database, migrations};
use zyntra_server::config::Config;

fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    zyntra_server::init_tracing();

    let config = Config::from_env();
    let db = Database::open(&config.db_path, config.db_readers)?;

    info!("Applying migrations from {}", config.migrations_dir.display());
    let applied = migrations::apply_pending(&db, &config.migrations_dir)?;

    println!("migrations applied: {applied}");
    Ok(())
}
