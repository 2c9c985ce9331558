//! SQLite persistence for bizplan
//!
//! The whole settings blob (plans, active plan, preferences) is stored as
//! one JSON document in a single-row table.

use std::sync::Mutex;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::config::BizplanPaths;
use crate::store::{PlanStore, Settings};

const SETTINGS_KEY: &str = "settings";

/// Loads and saves the persisted settings blob
pub trait PersistenceGateway {
    /// `None` when nothing has been saved yet
    fn load(&self) -> Result<Option<Settings>>;
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// Read the settings through `gateway` and build a store from them.
///
/// Missing data yields an empty store with default preferences.
pub fn load_store(gateway: &dyn PersistenceGateway) -> Result<PlanStore> {
    let settings = gateway.load()?.unwrap_or_default();
    Ok(PlanStore::from_settings(settings))
}

pub fn save_store(gateway: &dyn PersistenceGateway, store: &PlanStore) -> Result<()> {
    gateway.save(store.settings())
}

/// Database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open an existing database
    pub fn open(paths: &BizplanPaths) -> Result<Self> {
        let conn = Connection::open(&paths.db_file).context("Failed to open bizplan database")?;
        Ok(Self { conn })
    }

    /// Initialize a new database with schema
    pub fn init(paths: &BizplanPaths) -> Result<Self> {
        let conn =
            Connection::open(&paths.db_file).context("Failed to create bizplan database")?;
        let db = Self { conn };
        db.create_schema()?;
        Ok(db)
    }

    /// In-memory database, mostly for tests
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        let db = Self { conn };
        db.create_schema()?;
        Ok(db)
    }

    fn create_schema(&self) -> Result<()> {
        self.conn
            .execute(
                r#"
                CREATE TABLE IF NOT EXISTS settings (
                    key         TEXT PRIMARY KEY,
                    data        TEXT NOT NULL,
                    updated_at  INTEGER NOT NULL
                )
                "#,
                [],
            )
            .context("Failed to create settings table")?;
        Ok(())
    }

    /// Unix timestamp of the last save, if any
    pub fn last_saved(&self) -> Result<Option<i64>> {
        let result = self.conn.query_row(
            "SELECT updated_at FROM settings WHERE key = ?1",
            params![SETTINGS_KEY],
            |row| row.get(0),
        );
        match result {
            Ok(ts) => Ok(Some(ts)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl PersistenceGateway for Database {
    fn load(&self) -> Result<Option<Settings>> {
        let mut stmt = self
            .conn
            .prepare("SELECT data FROM settings WHERE key = ?1")?;

        let result = stmt.query_row(params![SETTINGS_KEY], |row| {
            let data_str: String = row.get(0)?;
            serde_json::from_str::<Settings>(&data_str)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(e.into()))
        });

        match result {
            Ok(settings) => Ok(Some(settings)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).context("Failed to load settings"),
        }
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        let data_json = serde_json::to_string(settings).context("Failed to serialize settings")?;
        let now = chrono::Utc::now().timestamp();

        self.conn
            .execute(
                "INSERT OR REPLACE INTO settings (key, data, updated_at) VALUES (?1, ?2, ?3)",
                params![SETTINGS_KEY, data_json, now],
            )
            .context("Failed to save settings")?;

        tracing::debug!(plans = settings.plans.len(), "settings saved");
        Ok(())
    }
}

/// Gateway that keeps the blob in memory as serialized JSON
#[derive(Debug, Default)]
pub struct MemoryGateway {
    data: Mutex<Option<String>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the gateway with raw JSON, as if it had been saved earlier
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            data: Mutex::new(Some(json.into())),
        }
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load(&self) -> Result<Option<Settings>> {
        let data = self.data.lock().unwrap_or_else(|p| p.into_inner());
        data.as_deref()
            .map(|json| serde_json::from_str(json).context("Failed to parse stored settings"))
            .transpose()
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        let json = serde_json::to_string(settings).context("Failed to serialize settings")?;
        *self.data.lock().unwrap_or_else(|p| p.into_inner()) = Some(json);
        Ok(())
    }
}
