//! SQLite-backed knowledge store.
//!
//! Holds the `chatbot_content` table of question/answer/keyword records.
//! Queries run on the blocking thread pool behind a shared connection.

use async_trait::async_trait;
use mabrur_application::ports::knowledge_store::{KnowledgeStore, KnowledgeStoreError};
use mabrur_domain::{ContentType, KnowledgeRecord, SearchTerms, sample_records};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Type;
use rusqlite::{Connection, Row, params, params_from_iter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info};

/// Errors opening or writing the knowledge database
#[derive(Error, Debug)]
pub enum KnowledgeDbError {
    #[error("Failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Knowledge database lock poisoned")]
    Poisoned,
}

const SELECT_COLUMNS: &str = "id, content_type, question, answer, keywords, is_active";

/// SQL function lowercasing with Unicode rules; the built-in `lower()` only folds ASCII.
const UNICODE_LOWER: &str = "unicode_lower";

/// Knowledge store backed by SQLite
#[derive(Clone)]
pub struct SqliteKnowledgeStore {
    conn: Arc<Mutex<Connection>>,
    db_path: Option<PathBuf>,
}

impl SqliteKnowledgeStore {
    /// Open or create the database at `path` and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, KnowledgeDbError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        Self::with_connection(Connection::open(path)?, Some(path.to_path_buf()))
    }

    /// Private in-memory database, mostly for tests and demos.
    pub fn open_in_memory() -> Result<Self, KnowledgeDbError> {
        Self::with_connection(Connection::open_in_memory()?, None)
    }

    fn with_connection(
        conn: Connection,
        db_path: Option<PathBuf>,
    ) -> Result<Self, KnowledgeDbError> {
        register_functions(&conn)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path,
        };
        store.init_schema()?;
        Ok(store)
    }

    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn init_schema(&self) -> Result<(), KnowledgeDbError> {
        let conn = self.conn.lock().map_err(|_| KnowledgeDbError::Poisoned)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS chatbot_content (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                content_type TEXT NOT NULL,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                keywords TEXT NOT NULL DEFAULT '',
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_chatbot_content_active
                ON chatbot_content(is_active);
            "#,
        )?;
        Ok(())
    }

    /// Insert a record, returning its new id. The record's own `id` is ignored.
    pub fn insert(&self, record: &KnowledgeRecord) -> Result<i64, KnowledgeDbError> {
        let conn = self.conn.lock().map_err(|_| KnowledgeDbError::Poisoned)?;
        conn.execute(
            r#"
            INSERT INTO chatbot_content (content_type, question, answer, keywords, is_active, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                record.content_type.as_str(),
                &record.question,
                &record.answer,
                &record.keywords,
                record.is_active,
                chrono::Utc::now().to_rfc3339()
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn count(&self) -> Result<usize, KnowledgeDbError> {
        let conn = self.conn.lock().map_err(|_| KnowledgeDbError::Poisoned)?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM chatbot_content", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Insert the sample records into an empty table.
    ///
    /// Returns how many records were inserted; a populated table is left alone.
    pub fn seed_defaults(&self) -> Result<usize, KnowledgeDbError> {
        if self.count()? > 0 {
            debug!("Knowledge table already populated, skipping seed");
            return Ok(0);
        }

        let records = sample_records();
        for record in &records {
            self.insert(record)?;
        }
        info!("Seeded {} knowledge records", records.len());
        Ok(records.len())
    }

    fn query_active(
        conn: &Connection,
        terms: &[String],
        limit: usize,
    ) -> rusqlite::Result<Vec<KnowledgeRecord>> {
        let clause = format!(
            "{f}(question) LIKE ? ESCAPE '\\' OR {f}(keywords) LIKE ? ESCAPE '\\'",
            f = UNICODE_LOWER
        );
        let clauses = vec![clause; terms.len()];
        let sql = format!(
            "SELECT {} FROM chatbot_content WHERE is_active = 1 AND ({}) ORDER BY id LIMIT {}",
            SELECT_COLUMNS,
            clauses.join(" OR "),
            limit
        );

        let patterns: Vec<String> = terms
            .iter()
            .map(|term| format!("%{}%", escape_like(term)))
            .flat_map(|pattern| [pattern.clone(), pattern])
            .collect();

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(patterns.iter()), row_to_record)?;
        rows.collect()
    }
}

#[async_trait]
impl KnowledgeStore for SqliteKnowledgeStore {
    async fn find_active(
        &self,
        terms: &SearchTerms,
        limit: usize,
    ) -> Result<Vec<KnowledgeRecord>, KnowledgeStoreError> {
        if terms.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let conn = Arc::clone(&self.conn);
        let terms = terms.as_slice().to_vec();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| KnowledgeStoreError::Unavailable("connection lock poisoned".into()))?;
            Self::query_active(&conn, &terms, limit)
                .map_err(|e| KnowledgeStoreError::QueryFailed(e.to_string()))
        })
        .await
        .map_err(|e| KnowledgeStoreError::Unavailable(e.to_string()))?
    }
}

fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )
}

/// Escape LIKE wildcards so terms match literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<KnowledgeRecord> {
    let content_type: String = row.get(1)?;
    let content_type: ContentType = content_type
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;

    Ok(KnowledgeRecord {
        id: row.get(0)?,
        content_type,
        question: row.get(2)?,
        answer: row.get(3)?,
        keywords: row.get(4)?,
        is_active: row.get(5)?,
    })
}
