//! Table registry: maps table ids to shared games.

use crate::config::ServerConfig;
use crate::error::RegistryError;
use crate::table::{Table, TableId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Id of the table behind the unprefixed routes.
pub const DEFAULT_TABLE: &str = "default";

/// Manages all tables. Cheap to clone; clones share the same tables.
///
/// Tables are opened on demand. When the limit is reached, an idle table
/// (no clients, and either untouched or finished) is closed to make room.
/// The default table is never closed.
#[derive(Debug, Clone)]
pub struct Registry {
    tables: Arc<Mutex<HashMap<TableId, Arc<Table>>>>,
    default: Arc<Table>,
    max_tables: usize,
    channel_capacity: usize,
}

impl Registry {
    /// Creates a registry holding only the default table.
    #[instrument]
    pub fn new(max_tables: usize, channel_capacity: usize) -> Self {
        let default = Arc::new(Table::new(DEFAULT_TABLE.to_string(), channel_capacity));
        let tables = HashMap::from([(DEFAULT_TABLE.to_string(), Arc::clone(&default))]);
        info!(max_tables, "Creating table registry");
        Self {
            tables: Arc::new(Mutex::new(tables)),
            default,
            max_tables: max_tables.max(1),
            channel_capacity,
        }
    }

    /// Creates a registry sized from configuration.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(*config.max_tables(), *config.channel_capacity())
    }

    /// The table served by the unprefixed routes.
    pub fn default_table(&self) -> Arc<Table> {
        Arc::clone(&self.default)
    }

    /// Looks up an open table without opening one.
    #[instrument(skip(self))]
    pub fn lookup(&self, id: &str) -> Result<Arc<Table>, RegistryError> {
        check_id(id)?;
        self.tables
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::Unknown(id.to_string()))
    }

    /// Looks up a table, opening it if it doesn't exist yet.
    #[instrument(skip(self))]
    pub fn get_or_create(&self, id: &str) -> Result<Arc<Table>, RegistryError> {
        check_id(id)?;

        let mut tables = self.tables.lock();
        if let Some(table) = tables.get(id) {
            return Ok(Arc::clone(table));
        }
        if tables.len() >= self.max_tables && !evict_idle(&mut tables) {
            warn!(table = id, max = self.max_tables, "Table limit reached");
            return Err(RegistryError::Full {
                max: self.max_tables,
            });
        }

        let table = Arc::new(Table::new(id.to_string(), self.channel_capacity));
        tables.insert(id.to_string(), Arc::clone(&table));
        debug!(count = tables.len(), "Table opened");
        Ok(table)
    }

    /// Lists open table ids, sorted.
    pub fn list(&self) -> Vec<TableId> {
        let mut ids: Vec<_> = self.tables.lock().keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::from_config(&ServerConfig::default())
    }
}

/// Closes one idle table. Returns whether one was found.
///
/// Every handle to a table is cloned under the registry lock, so a strong
/// count of one means no request or socket is using it.
fn evict_idle(tables: &mut HashMap<TableId, Arc<Table>>) -> bool {
    let idle = tables
        .iter()
        .filter(|(id, table)| {
            id.as_str() != DEFAULT_TABLE && Arc::strong_count(table) == 1 && table.is_idle()
        })
        .map(|(id, _)| id.clone())
        .min();

    match idle {
        Some(id) => {
            tables.remove(&id);
            info!(table = %id, "Closed idle table");
            true
        }
        None => false,
    }
}

fn check_id(id: &str) -> Result<(), RegistryError> {
    if is_valid_id(id) {
        Ok(())
    } else {
        warn!(table = id, "Rejected table id");
        Err(RegistryError::InvalidId(id.to_string()))
    }
}

fn is_valid_id(id: &str) -> bool {
    (1..=64).contains(&id.len())
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
