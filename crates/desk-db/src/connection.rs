use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    Connection as SqlConnection,
};
use tokio::sync::{Mutex, MutexGuard};

use crate::schema;

/// Removes the temporary test database file when the last
/// connection clone is dropped.
struct TestHandle {
    filename: String,
}

impl Drop for TestHandle {
    fn drop(&mut self) {
        let path = Path::new(&self.filename);
        if path.exists() {
            let _ = fs::remove_file(path);
        }
    }
}

/// A thread safe connection to the database.
#[derive(Clone)]
pub struct Connection {
    conn: Arc<Mutex<SqliteConnection>>,
    _test_guard: Option<Arc<TestHandle>>,
}

impl Connection {
    /// Open a connection to the database.
    pub async fn open(filename: &str) -> Result<Self> {
        let opts = SqliteConnectOptions::from_str(filename)?.foreign_keys(true);
        let conn = SqliteConnection::connect_with(&opts).await?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            _test_guard: None,
        })
    }

    /// Open a connection, creating the database file if it
    /// does not exist yet. Used by `init`.
    pub async fn open_create(filename: &str) -> Result<Self> {
        let opts = SqliteConnectOptions::from_str(filename)?
            .create_if_missing(true)
            .foreign_keys(true);
        let conn = SqliteConnection::connect_with(&opts).await?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            _test_guard: None,
        })
    }

    pub async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.conn.lock().await
    }

    /// Open a new test database connection with the schema
    /// installed. The database file is created per call and
    /// removed again when the connection is dropped.
    pub async fn open_test() -> Self {
        let filename = format!("/tmp/frontdesk_test_{}.sqlite3", rand::random::<u64>());
        let handle = TestHandle {
            filename: filename.clone(),
        };

        let opts = SqliteConnectOptions::from_str(&filename)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);
        let conn = SqliteConnection::connect_with(&opts).await.unwrap();
        let conn = Self {
            conn: Arc::new(Mutex::new(conn)),
            _test_guard: Some(Arc::new(handle)),
        };
        schema::install(&conn).await.unwrap();
        conn
    }
}
