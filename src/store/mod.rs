//! Item store module
//!
//! Single owner of the JSON backing file holding the item collection.
//! Every mutation runs a load → modify → save cycle over the whole file;
//! an internal mutex serializes those cycles so two concurrent mutations
//! cannot lose each other's writes.

mod item;

pub use item::{Item, ItemDraft, ItemSize};

use chrono::Utc;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::sync::Mutex;

use crate::logger;

/// Errors surfaced by store operations
#[derive(Debug)]
pub enum StoreError {
    /// A required field is missing/falsy, or the size code is unknown
    Validation(&'static str),
    /// No item with the given id exists
    NotFound(String),
    /// The backing file could not be read or written
    Io(std::io::Error),
    /// The backing file exists but does not parse as an item array
    Corrupt(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => f.write_str(msg),
            Self::NotFound(id) => write!(f, "Item with id {id} not found"),
            Self::Io(e) => write!(f, "Backing file I/O failed: {e}"),
            Self::Corrupt(e) => write!(f, "Backing file is not a valid item array: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Corrupt(e) => Some(e),
            Self::Validation(_) | Self::NotFound(_) => None,
        }
    }
}

const INVALID_ATTRIBUTES: &str = "Invalid item attributes";

/// Disambiguates ids generated within the same millisecond
static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// File-backed item store
///
/// Owns all access to the data file. Reads are lock-free; mutations hold
/// `write_lock` across their whole read-modify-write cycle.
pub struct ItemStore {
    data_path: PathBuf,
    write_lock: Mutex<()>,
}

impl ItemStore {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Load the full collection
    ///
    /// A missing file or blank content is an empty collection. Read and
    /// parse failures propagate so callers can answer with a 500 instead
    /// of silently reporting an empty store.
    pub async fn load_all(&self) -> Result<Vec<Item>, StoreError> {
        let content = match fs::read_to_string(&self.data_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                logger::log_error(&format!(
                    "Failed to read '{}': {e}",
                    self.data_path.display()
                ));
                return Err(StoreError::Io(e));
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            logger::log_error(&format!(
                "Failed to parse '{}': {e}",
                self.data_path.display()
            ));
            StoreError::Corrupt(e)
        })
    }

    /// Overwrite the backing file with the full collection, pretty-printed
    pub async fn save_all(&self, items: &[Item]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(items).map_err(StoreError::Corrupt)?;
        fs::write(&self.data_path, json).await.map_err(|e| {
            logger::log_error(&format!(
                "Failed to write '{}': {e}",
                self.data_path.display()
            ));
            StoreError::Io(e)
        })
    }

    /// Linear scan for the first item with a matching id
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Item>, StoreError> {
        Ok(self.load_all().await?.into_iter().find(|item| item.id == id))
    }

    /// Validate the draft, assign an id, append, and persist
    pub async fn create(&self, draft: ItemDraft) -> Result<Item, StoreError> {
        let (name, price, size) = validate_new(draft)?;

        let _guard = self.write_lock.lock().await;
        let mut items = self.load_all().await?;
        let item = Item {
            id: generate_id(&items),
            name,
            price,
            size,
        };
        items.push(item.clone());
        self.save_all(&items).await?;
        Ok(item)
    }

    /// Apply the provided fields to an existing item and persist
    ///
    /// Absent or falsy fields (empty name, zero price) leave the stored
    /// value unchanged. A provided size outside {s, m, l} is rejected,
    /// the same rule creation enforces.
    #[allow(clippy::float_cmp)]
    pub async fn update(&self, id: &str, draft: ItemDraft) -> Result<Item, StoreError> {
        let size = match draft.size.as_deref() {
            Some(code) if !code.is_empty() => Some(
                ItemSize::from_code(code).ok_or(StoreError::Validation(INVALID_ATTRIBUTES))?,
            ),
            _ => None,
        };

        let _guard = self.write_lock.lock().await;
        let mut items = self.load_all().await?;
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(name) = draft.name.filter(|name| !name.is_empty()) {
            item.name = name;
        }
        if let Some(price) = draft.price.filter(|price| *price != 0.0) {
            item.price = price;
        }
        if let Some(size) = size {
            item.size = size;
        }

        let updated = item.clone();
        self.save_all(&items).await?;
        Ok(updated)
    }

    /// Remove the item with the given id and persist the filtered collection
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load_all().await?;
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.save_all(&items).await
    }
}

/// Check create attributes: name and price must be present and truthy,
/// size must be a known code
#[allow(clippy::float_cmp)]
fn validate_new(draft: ItemDraft) -> Result<(String, f64, ItemSize), StoreError> {
    let name = draft
        .name
        .filter(|name| !name.is_empty())
        .ok_or(StoreError::Validation(INVALID_ATTRIBUTES))?;
    let price = draft
        .price
        .filter(|price| *price != 0.0)
        .ok_or(StoreError::Validation(INVALID_ATTRIBUTES))?;
    let size = draft
        .size
        .as_deref()
        .and_then(ItemSize::from_code)
        .ok_or(StoreError::Validation(INVALID_ATTRIBUTES))?;
    Ok((name, price, size))
}

/// Generate an id unique among the currently persisted items
///
/// Ids are the creation time in milliseconds; when two creates land in the
/// same millisecond, a process-wide sequence suffix disambiguates.
fn generate_id(existing: &[Item]) -> String {
    let base = Utc::now().timestamp_millis().to_string();
    let mut id = base.clone();
    while existing.iter().any(|item| item.id == id) {
        let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        id = format!("{base}-{seq}");
    }
    id
}
