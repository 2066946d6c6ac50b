pub mod migrations;

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// SQLite handle with one writer and a small pool of read-only readers.
pub struct Database {
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    reader_idx: AtomicUsize,
}

impl Database {
    pub fn open(path: &Path, readers: usize) -> Result<Self> {
        let writer = Connection::open(path)
            .with_context(|| format!("open database {}", path.display()))?;
        writer.pragma_update(None, "journal_mode", "WAL")?;
        writer.pragma_update(None, "foreign_keys", "ON")?;

        let reader_count = readers.max(1);
        let mut pool = Vec::with_capacity(reader_count);
        for _ in 0..reader_count {
            let conn = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .with_context(|| format!("open reader for {}", path.display()))?;
            pool.push(Mutex::new(conn));
        }

        info!(
            "Database opened at {} (1 writer + {} readers)",
            path.display(),
            reader_count
        );
        Ok(Self {
            writer: Mutex::new(writer),
            readers: pool,
            reader_idx: AtomicUsize::new(0),
        })
    }

    /// Runs `f` on the next reader, round-robin.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let idx = self.reader_idx.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = self.readers[idx]
            .lock()
            .map_err(|e| anyhow::anyhow!("Reader lock poisoned: {}", e))?;
        f(&conn)
    }

    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Writer lock poisoned: {}", e))?;
        f(&mut conn)
    }

    /// Cheap round trip used by readiness checks.
    pub fn ping(&self) -> Result<()> {
        self.with_conn(|conn| {
            let one: i64 = conn
                .query_row("SELECT 1", [], |row| row.get(0))
                .context("ping database")?;
            anyhow::ensure!(one == 1, "unexpected ping result {one}");
            Ok(())
        })
    }

    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    /// Fresh path under the system temp dir; removed on drop.
    pub struct TempPath(pub PathBuf);

    impl TempPath {
        pub fn new(suffix: &str) -> Self {
            Self(std::env::temp_dir().join(format!("zyntra-{}{suffix}", uuid::Uuid::new_v4())))
        }
    }

    impl Drop for TempPath {
        fn drop(&mut self) {
            if self.0.is_dir() {
                let _ = std::fs::remove_dir_all(&self.0);
            } else {
                for ext in ["", "-wal", "-shm"] {
                    let mut p = self.0.clone().into_os_string();
                    p.push(ext);
                    let _ = std::fs::remove_file(PathBuf::from(p));
                }
            }
        }
    }
}
