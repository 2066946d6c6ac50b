//! Versioned SQL migrations.
//!
//! A migration is a file named `<version>.up.sql`. Versions are applied in
//! ascending string order, each in its own transaction, and recorded in
//! `schema_migrations` so reruns skip them.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{debug, info};

use crate::Database;

const UP_SUFFIX: &str = ".up.sql";

const ENSURE_SCHEMA_MIGRATIONS: &str = "
    CREATE TABLE IF NOT EXISTS schema_migrations (
        version     TEXT PRIMARY KEY,
        applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    );
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub version: String,
    pub path: PathBuf,
}

/// Applies every migration in `dir` not yet recorded. Returns how many ran.
///
/// Stops at the first failure; migrations applied before it stay applied.
pub fn apply_pending(db: &Database, dir: &Path) -> Result<usize> {
    db.with_conn_mut(|conn| {
        conn.execute_batch(ENSURE_SCHEMA_MIGRATIONS)
            .context("ensure schema_migrations")?;

        let migrations = load_migrations(dir)?;
        let applied = applied_versions(conn)?;

        let mut count = 0;
        for migration in &migrations {
            if applied.contains(&migration.version) {
                debug!("Migration {} already applied", migration.version);
                continue;
            }
            apply_one(conn, migration)?;
            info!("Applied migration {}", migration.version);
            count += 1;
        }

        info!("Database migrations complete ({} applied)", count);
        Ok(count)
    })
}

/// Lists `<version>.up.sql` files in `dir`, sorted by version.
pub fn load_migrations(dir: &Path) -> Result<Vec<Migration>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("read migrations dir {}", dir.display()))?;

    let mut migrations = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let Some(version) = name.to_str().and_then(|n| n.strip_suffix(UP_SUFFIX)) else {
            continue;
        };
        if version.is_empty() {
            continue;
        }

        migrations.push(Migration {
            version: version.to_string(),
            path: entry.path(),
        });
    }

    migrations.sort_by(|a, b| a.version.cmp(&b.version));
    Ok(migrations)
}

pub fn applied_versions(conn: &Connection) -> Result<HashSet<String>> {
    let mut stmt = conn
        .prepare("SELECT version FROM schema_migrations")
        .context("query schema_migrations")?;
    let versions = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<HashSet<_>>>()
        .context("scan schema_migrations")?;
    Ok(versions)
}

fn apply_one(conn: &mut Connection, migration: &Migration) -> Result<()> {
    let sql = fs::read_to_string(&migration.path)
        .with_context(|| format!("read migration {}", migration.version))?;

    // Dropping the transaction without commit rolls it back.
    let tx = conn
        .transaction()
        .with_context(|| format!("begin tx {}", migration.version))?;
    tx.execute_batch(&sql)
        .with_context(|| format!("exec migration {}", migration.version))?;
    tx.execute(
        "INSERT INTO schema_migrations (version) VALUES (?1)",
        [&migration.version],
    )
    .with_context(|| format!("record migration {}", migration.version))?;
    tx.commit()
        .with_context(|| format!("commit migration {}", migration.version))?;
    Ok(())
}
