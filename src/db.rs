use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;

#[cfg(not(target_arch = "wasm32"))]
use rusqlite::{Connection, OptionalExtension};
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

/// The one key the whole collection lives under.
pub const STORAGE_KEY: &str = "recipes";

/// The `localStorage` surface: string keys, string values, scoped to one
/// origin.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.items.clear();
        Ok(())
    }
}

/// An origin store kept in a SQLite file, for running the catalog outside a
/// browser.
#[cfg(not(target_arch = "wasm32"))]
pub struct SqliteStore {
    conn: Connection,
}

#[cfg(not(target_arch = "wasm32"))]
impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        log::debug!("Opening store at {:?}", path.as_ref());
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            (),
        )?;
        Ok(Self { conn })
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for SqliteStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM storage WHERE key = ?1", (key,), |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM storage WHERE key = ?1", (key,))?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM storage", ())?;
        Ok(())
    }
}

/// Reads the stored collection. Nothing stored, an unreadable store or text
/// that isn't a JSON array all read as an empty collection. Entries come back
/// exactly as stored, whatever their shape.
pub fn get_recipes_from_storage<S: KeyValueStore + ?Sized>(store: &S) -> Vec<Value> {
    let json_str = match store.get_item(STORAGE_KEY) {
        Ok(Some(content)) => content,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("Could not read {:?} from storage: {}", STORAGE_KEY, e);
            return Vec::new();
        }
    };
    match serde_json::from_str(&json_str) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            log::warn!("Ignoring {:?} in storage, it is not a list", STORAGE_KEY);
            Vec::new()
        }
        Err(e) => {
            log::warn!("Ignoring malformed {:?} in storage: {}", STORAGE_KEY, e);
            Vec::new()
        }
    }
}

pub fn save_recipes_to_storage<S: KeyValueStore + ?Sized>(
    store: &mut S,
    recipes: &[Value],
) -> Result<()> {
    let json_str = serde_json::to_string(recipes)?;
    store.set_item(STORAGE_KEY, &json_str)?;
    log::debug!("Saved {} recipes", recipes.len());
    Ok(())
}

/// Appends one record with a read-modify-write of the whole collection. Another
/// writer between the read and the write is overwritten.
pub fn append_recipe_to_storage<S: KeyValueStore + ?Sized>(
    store: &mut S,
    recipe: Value,
) -> Result<usize> {
    let mut recipes = get_recipes_from_storage(store);
    recipes.push(recipe);
    save_recipes_to_storage(store, &recipes)?;
    Ok(recipes.len())
}
