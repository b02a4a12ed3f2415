use super::{Query, StoreTrait};
use crate::error::{self, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Inner {
    tables: HashMap<String, Vec<Value>>,
    faults: Vec<Fault>,
}

/// Makes every operation on `table` touching a row whose `column` equals
/// `value` fail with [`error::STORE_UNAVAILABLE`].
#[derive(Clone, Debug, PartialEq, Eq)]
struct Fault {
    table: String,
    column: String,
    value: Value,
}

impl Fault {
    fn hits(&self, table: &str, row: &Value) -> bool {
        self.table == table && row[self.column.as_str()] == self.value
    }
}

/// In-process store with the same filter semantics as the REST one.
///
/// Rows are kept as JSON objects; inserted rows without an `id` get a fresh
/// UUID. Clones share the same tables.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every row of `table` in insertion order.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }

    /// Fails reads and writes of `table` rows where `column == value`.
    pub fn fail_on(&self, table: &str, column: &str, value: impl Serialize) {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);

        self.lock().faults.push(Fault {
            table: table.to_owned(),
            column: column.to_owned(),
            value,
        });
    }

    /// Removes every injected failure.
    pub fn heal(&self) {
        self.lock().faults.clear();
    }

    fn check(inner: &Inner, table: &str, rows: &[&Value]) -> Result {
        let failed = inner
            .faults
            .iter()
            .any(|fault| rows.iter().any(|row| fault.hits(table, row)));

        if failed {
            warn!(table, "injected store failure");
            return Err(error::STORE_UNAVAILABLE);
        }

        Ok(())
    }

    fn decode<R: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<R>> {
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(error::Error::from))
            .collect()
    }
}

impl StoreTrait for MemoryStore {
    async fn select<T>(&self, table: &str, query: &Query) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let rows = {
            let inner = self.lock();

            let mut rows: Vec<Value> = inner
                .tables
                .get(table)
                .map(|rows| rows.iter().filter(|row| query.matches(row)).cloned().collect())
                .unwrap_or_default();

            Self::check(&inner, table, &rows.iter().collect::<Vec<_>>())?;
            query.arrange(&mut rows);

            rows
        };

        Self::decode(rows)
    }

    async fn insert<T, R>(&self, table: &str, rows: &[T]) -> Result<Vec<R>>
    where
        T: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let mut values = Vec::with_capacity(rows.len());

        for row in rows {
            let mut value = serde_json::to_value(row)?;

            if let Value::Object(map) = &mut value {
                map.entry("id")
                    .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
            }

            values.push(value);
        }

        {
            let mut inner = self.lock();
            Self::check(&inner, table, &values.iter().collect::<Vec<_>>())?;

            inner
                .tables
                .entry(table.to_owned())
                .or_default()
                .extend(values.iter().cloned());
        }

        Self::decode(values)
    }

    async fn patch<P, R>(&self, table: &str, query: &Query, patch: &P) -> Result<Vec<R>>
    where
        P: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let Value::Object(fields) = serde_json::to_value(patch)? else {
            return Ok(Vec::new());
        };

        let updated = {
            let mut inner = self.lock();

            let matched: Vec<&Value> = inner
                .tables
                .get(table)
                .map(|rows| rows.iter().filter(|row| query.matches(row)).collect())
                .unwrap_or_default();

            Self::check(&inner, table, &matched)?;

            let mut updated = Vec::new();

            if let Some(rows) = inner.tables.get_mut(table) {
                for row in rows.iter_mut().filter(|row| query.matches(row)) {
                    if let Value::Object(map) = row {
                        for (key, value) in &fields {
                            map.insert(key.clone(), value.clone());
                        }
                    }
                    updated.push(row.clone());
                }
            }

            updated
        };

        Self::decode(updated)
    }
}
