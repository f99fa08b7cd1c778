//! JSON file store.
//!
//! Each collection lives in one JSON array under the store directory
//! (`strategies.json`, `tickets.json`). Writes go to a temporary file that
//! is renamed over the original, so a crash never leaves a torn document.
//!
//! Records that fail to decode are skipped with a warning on read but kept
//! verbatim on write, so a newer or hand-edited record is never lost.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::warn;

use crate::domain::id::OwnerId;
use crate::domain::strategy::Strategy;
use crate::domain::ticket::BetTicket;
use crate::error::{Error, Result};
use crate::port::outbound::store::{StrategyStore, TicketStore};

const STRATEGIES_FILE: &str = "strategies.json";
const TICKETS_FILE: &str = "tickets.json";

/// File-backed store for strategies and tickets.
pub struct JsonFileStore {
    dir: PathBuf,
    strategies: Mutex<()>,
    tickets: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the directory cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| store_error(&dir, &e))?;
        Ok(Self {
            dir,
            strategies: Mutex::new(()),
            tickets: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    async fn read_raw(&self, file: &str) -> Result<Vec<Value>> {
        let path = self.path(file);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(store_error(&path, &e)),
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|e| store_error(&path, &e))
    }

    async fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let raw = self.read_raw(file).await?;
        Ok(raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(file, index, error = %e, "Skipping unreadable record");
                    None
                }
            })
            .collect())
    }

    async fn write_raw(&self, file: &str, records: &[Value]) -> Result<()> {
        let path = self.path(file);
        let tmp = path.with_extension("json.tmp");
        let text = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&tmp, text)
            .await
            .map_err(|e| store_error(&tmp, &e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| store_error(&path, &e))
    }

    /// Replace the record with the same `id`, or append it.
    async fn upsert<T: Serialize>(&self, file: &str, id: &str, record: &T) -> Result<()> {
        let mut records = self.read_raw(file).await?;
        let value = serde_json::to_value(record)?;
        match records
            .iter_mut()
            .find(|existing| existing.get("id").and_then(Value::as_str) == Some(id))
        {
            Some(slot) => *slot = value,
            None => records.push(value),
        }
        self.write_raw(file, &records).await
    }
}

fn store_error(path: &Path, error: &dyn std::fmt::Display) -> Error {
    Error::Store(format!("{}: {error}", path.display()))
}

#[async_trait]
impl StrategyStore for JsonFileStore {
    async fn list_strategies(&self) -> Result<Vec<Strategy>> {
        let _guard = self.strategies.lock().await;
        self.read(STRATEGIES_FILE).await
    }

    async fn list_strategies_by_owner(&self, owner: &OwnerId) -> Result<Vec<Strategy>> {
        let _guard = self.strategies.lock().await;
        let all: Vec<Strategy> = self.read(STRATEGIES_FILE).await?;
        Ok(all.into_iter().filter(|s| s.owner() == owner).collect())
    }

    async fn create_strategy(&self, strategy: &Strategy) -> Result<()> {
        let _guard = self.strategies.lock().await;
        self.upsert(STRATEGIES_FILE, strategy.id().as_str(), strategy).await
    }

    async fn update_strategy(&self, strategy: &Strategy) -> Result<()> {
        let _guard = self.strategies.lock().await;
        self.upsert(STRATEGIES_FILE, strategy.id().as_str(), strategy).await
    }
}

#[async_trait]
impl TicketStore for JsonFileStore {
    async fn list_tickets(&self) -> Result<Vec<BetTicket>> {
        let _guard = self.tickets.lock().await;
        self.read(TICKETS_FILE).await
    }

    async fn create_ticket(&self, ticket: &BetTicket) -> Result<()> {
        let _guard = self.tickets.lock().await;
        self.upsert(TICKETS_FILE, ticket.id().as_str(), ticket).await
    }

    async fn update_ticket(&self, ticket: &BetTicket) -> Result<()> {
        let _guard = self.tickets.lock().await;
        self.upsert(TICKETS_FILE, ticket.id().as_str(), ticket).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::criterion::{Criterion, Operator};
    use crate::domain::id::StrategyId;
    use crate::domain::metric::Metric;
    use crate::domain::outcome::TargetOutcome;
    use rust_decimal_macros::dec;

    fn strategy(id: &str) -> Strategy {
        Strategy::try_new(
            StrategyId::new(id),
            OwnerId::new("u1"),
            "Late goals",
            vec![Criterion::new(Metric::Minute, Operator::GreaterThan, dec!(70))],
            TargetOutcome::Over05Goals,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn missing_files_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        assert!(store.list_strategies().await.unwrap().is_empty());
        assert!(store.list_tickets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upserts_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonFileStore::open(dir.path()).await.unwrap();
            let mut s = strategy("s1");
            store.create_strategy(&s).await.unwrap();
            s.set_active(false);
            store.update_strategy(&s).await.unwrap();
        }
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let all = store.list_strategies().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(!all[0].is_active());
        assert!(!dir.path().join("strategies.json.tmp").exists());
    }

    #[tokio::test]
    async fn unreadable_records_are_skipped_but_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let garbage = r#"[{"id": "broken", "owner": 7}]"#;
        std::fs::write(dir.path().join(STRATEGIES_FILE), garbage).unwrap();

        let store = JsonFileStore::open(dir.path()).await.unwrap();
        assert!(store.list_strategies().await.unwrap().is_empty());

        store.create_strategy(&strategy("s1")).await.unwrap();
        assert_eq!(store.list_strategies().await.unwrap().len(), 1);

        let text = std::fs::read_to_string(dir.path().join(STRATEGIES_FILE)).unwrap();
        assert!(text.contains("broken"));
    }

    #[tokio::test]
    async fn malformed_document_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TICKETS_FILE), "{not json").unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        assert!(matches!(store.list_tickets().await, Err(Error::Store(_))));
    }
}
