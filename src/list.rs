//! To-do list domain model and persistent store for the tally TUI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::Config;
use crate::util::blocking;
use crate::{tlog_debug, Error, Result};

const MAX_LIST_NAME_LENGTH: usize = 64;
const STORE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(pub Uuid);

impl ListId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ListId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

/// A single entry in a to-do list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// A named to-do list. Items keep insertion order and are displayed numbered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    pub items: Vec<Item>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoList {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ListId::new(),
            name: name.into(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate item text against this list without mutating anything.
    ///
    /// Empty (or all-whitespace) text and text already present in the list
    /// are rejected, matching the entry-form validation rules.
    pub fn validate_item(&self, text: &str) -> Result<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyItem);
        }
        if self.items.iter().any(|i| i.text == trimmed) {
            return Err(Error::DuplicateItem);
        }
        Ok(())
    }

    /// Validate and append an item. Returns a copy of the new item.
    pub fn add_item(&mut self, text: &str) -> Result<Item> {
        self.validate_item(text)?;
        let item = Item::new(text.trim());
        self.items.push(item.clone());
        self.updated_at = Utc::now();
        Ok(item)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Validate a list name for creation.
pub fn validate_list_name(name: &str, existing: &[TodoList]) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(
            "You can't have an empty list name".to_string(),
        ));
    }
    if trimmed.len() > MAX_LIST_NAME_LENGTH {
        return Err(Error::Validation(format!(
            "List name too long (max {} characters)",
            MAX_LIST_NAME_LENGTH
        )));
    }
    if existing.iter().any(|l| l.name == trimmed) {
        return Err(Error::ListExists(trimmed.to_string()));
    }
    Ok(())
}

/// Persistent application state: all lists, versioned for future migration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub version: u32,
    pub lists: Vec<TodoList>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            version: STORE_VERSION,
            lists: Vec::new(),
        }
    }

    pub fn find_by_name(&self, name: &str) -> Option<&TodoList> {
        self.lists.iter().find(|l| l.name == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut TodoList> {
        self.lists.iter_mut().find(|l| l.name == name)
    }

    pub async fn load(config: &Config) -> Result<Self> {
        let path = config.store_path()?;
        blocking(move || Self::load_path(&path)).await
    }

    pub fn load_sync(config: &Config) -> Result<Self> {
        Self::load_path(&config.store_path()?)
    }

    pub fn load_path(path: &Path) -> Result<Self> {
        tlog_debug!("Store::load_path path={}", path.display());

        if !path.exists() {
            tlog_debug!("Store file not found, returning empty store");
            return Ok(Self::new());
        }

        let contents = fs::read_to_string(path)?;
        let store: Store = serde_json::from_str(&contents)?;
        tlog_debug!("Store loaded: {} lists", store.lists.len());
        Ok(store)
    }

    pub async fn save(&self, path: PathBuf) -> Result<()> {
        tlog_debug!("Store::save lists={}", self.lists.len());
        let contents = serde_json::to_string_pretty(self)?;

        blocking(move || write_atomic(&path, &contents)).await
    }

    pub fn save_sync(&self, config: &Config) -> Result<()> {
        let path = config.store_path()?;
        let contents = serde_json::to_string_pretty(self)?;
        write_atomic(&path, &contents)
    }

    pub fn save_path(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        write_atomic(path, &contents)
    }
}

/// Write the store with a backup of the previous file and an atomic rename,
/// so a crash mid-write never leaves a truncated store behind.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            tlog_debug!("Creating store directory: {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }

    if path.exists() {
        let backup_path = path.with_extension("json.bak");
        tlog_debug!("Creating store backup: {}", backup_path.display());
        fs::copy(path, &backup_path)?;
    }

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, contents)?;
    fs::rename(&temp_path, path)?;
    tlog_debug!("Store saved: {}", path.display());

    Ok(())
}
