use crate::card::RecipeCard;
use crate::db::{self, KeyValueStore};
use crate::dom::Dom;
use crate::error::Result;
use crate::recipe::{self, Recipe};
use serde_json::Value;

/// Drives one page: the listing container cards go into and the origin store
/// the collection is kept in. It holds nothing the store doesn't.
pub struct Catalog<D: Dom, S: KeyValueStore> {
    dom: D,
    listing: D::Node,
    store: S,
}

impl<D: Dom, S: KeyValueStore> Catalog<D, S> {
    pub fn new(dom: D, listing: D::Node, store: S) -> Self {
        Self {
            dom,
            listing,
            store,
        }
    }

    pub fn listing(&self) -> &D::Node {
        &self.listing
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Renders every stored recipe, in order. Returns how many were shown.
    pub fn init(&self) -> Result<usize> {
        let recipes = db::get_recipes_from_storage(&self.store);
        log::info!("Loaded {} recipes from storage", recipes.len());
        self.add_recipes(&recipes)?;
        Ok(recipes.len())
    }

    /// One card per entry. Entries that aren't objects get an empty card.
    pub fn add_recipes(&self, entries: &[Value]) -> Result<()> {
        for entry in entries {
            self.add_recipe(entry)?;
        }
        Ok(())
    }

    fn add_recipe(&self, entry: &Value) -> Result<RecipeCard<D>> {
        let card = RecipeCard::new(&self.dom)?;
        match Recipe::from_value(entry) {
            Some(recipe) => card.render(&recipe)?,
            None => log::debug!("Nothing to show for {}", entry),
        }
        card.mount(&self.listing)?;
        Ok(card)
    }

    /// Handles a form submission: `fields` are the named controls in document
    /// order. The new card is shown before the store is written.
    pub fn submit<I, K, V>(&mut self, fields: I) -> Result<Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let record = Value::Object(recipe::form_record(fields));
        self.add_recipe(&record)?;
        let count = db::append_recipe_to_storage(&mut self.store, record.clone())?;
        log::info!("Added {}, {} recipes stored", record["titleTxt"], count);
        Ok(record)
    }

    /// Wipes the origin store and empties the listing.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()?;
        self.dom.clear_children(&self.listing);
        log::info!("Cleared storage and listing");
        Ok(())
    }

    pub fn recipes(&self) -> Vec<Value> {
        db::get_recipes_from_storage(&self.store)
    }
}
