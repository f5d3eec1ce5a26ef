pub mod lifecycle;
pub mod minutes;
pub mod models;
pub mod test_utils;

pub use lifecycle::{HasLifecycle, Lifecycle};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::path::Path;

/// Opens a connection pool for `url`.
///
/// A bare SQLite file URL gets its parent directory created first, since
/// SQLite will not create intermediate directories itself.
pub async fn connect(url: &str) -> Result<DatabaseConnection, DbErr> {
    if let Err(err) = ensure_sqlite_parent(url) {
        tracing::warn!(url, error = %err, "could not create database directory");
    }

    let mut options = ConnectOptions::new(url.to_owned());
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;
    tracing::info!("connected to database");
    Ok(db)
}

/// Creates the directory holding a `sqlite://` database file. Other URLs
/// are left alone.
fn ensure_sqlite_parent(url: &str) -> std::io::Result<()> {
    let Some(path) = url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let file = path.split('?').next().unwrap_or(path);
    match Path::new(file).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("rollcall-{}-{name}", std::process::id()))
    }

    #[test]
    fn creates_nested_database_directory() {
        let root = scratch("nested");
        let url = format!("sqlite://{}/a/b/app.db?mode=rwc", root.display());

        ensure_sqlite_parent(&url).unwrap();
        assert!(root.join("a/b").is_dir());

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn non_file_urls_are_ignored() {
        assert!(ensure_sqlite_parent("sqlite::memory:").is_ok());
        assert!(ensure_sqlite_parent("sqlite://app.db").is_ok());
    }

    #[test]
    fn blocked_directory_is_reported() {
        let blocker = scratch("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let url = format!("sqlite://{}/app.db?mode=rwc", blocker.display());

        assert!(ensure_sqlite_parent(&url).is_err());

        std::fs::remove_file(&blocker).unwrap();
    }

    #[tokio::test]
    async fn connect_survives_an_uncreatable_directory() {
        let blocker = scratch("connect-blocker");
        std::fs::write(&blocker, b"").unwrap();
        let url = format!("sqlite://{}/app.db?mode=rwc", blocker.display());

        assert!(connect(&url).await.is_err());

        std::fs::remove_file(&blocker).unwrap();
    }
}
