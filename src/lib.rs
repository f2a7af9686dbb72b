//! A recipe catalog: cards rendered from a locally persisted collection, a
//! form that appends to it and a control that wipes it.
//!
//! Built for `wasm32` it runs in the page against `localStorage`; built
//! natively it runs against an in-memory DOM and a SQLite file.

pub mod card;
pub mod catalog;
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod db;
pub mod dom;
pub mod error;
pub mod page;
pub mod recipe;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use card::RecipeCard;
pub use catalog::Catalog;
pub use db::{KeyValueStore, MemoryStore, STORAGE_KEY};
pub use error::{Error, Result};
pub use recipe::{FieldValue, Recipe, StarRating};
