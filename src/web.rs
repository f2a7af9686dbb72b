//! Browser entry point: wires the catalog to the page and `localStorage`.

use crate::catalog::Catalog;
use crate::db::KeyValueStore;
use crate::dom::web::{js_error, WebDom};
use crate::error::{Error, Result};
use crate::page::{FORM_ID, RESET_CLASS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, FormData, HtmlFormElement, Node, Storage};

type PageCatalog = Catalog<WebDom, LocalStorage>;

impl From<Error> for JsValue {
    fn from(error: Error) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

pub struct LocalStorage {
    storage: Storage,
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(storage_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(storage_error)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(storage_error)
    }

    fn clear(&mut self) -> Result<()> {
        self.storage.clear().map_err(storage_error)
    }
}

fn storage_error(value: JsValue) -> Error {
    match js_error(value) {
        Error::Dom(message) => Error::Storage(message),
        other => other,
    }
}

/// Runs once the module is instantiated. Module scripts are deferred, so the
/// form and listing already exist.
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }
    log::info!("Starting recipe catalog...");

    let window = web_sys::window().ok_or(Error::MissingElement("a window"))?;
    let document = window.document().ok_or(Error::MissingElement("a document"))?;
    let storage = window
        .local_storage()
        .map_err(storage_error)?
        .ok_or_else(|| Error::Storage("localStorage is disabled".to_string()))?;

    let listing: Node = document
        .query_selector("main")
        .map_err(js_error)?
        .ok_or(Error::MissingElement("a <main> listing"))?
        .into();
    let catalog = Catalog::new(WebDom::new(document.clone()), listing, LocalStorage { storage });
    catalog.init()?;
    let catalog = Rc::new(RefCell::new(catalog));

    let form: HtmlFormElement = document
        .get_element_by_id(FORM_ID)
        .ok_or(Error::MissingElement("the #new-recipe form"))?
        .dyn_into()
        .map_err(|_| Error::Dom(format!("#{} is not a form", FORM_ID)))?;
    init_form_handler(&form, catalog)?;
    Ok(())
}

fn init_form_handler(form: &HtmlFormElement, catalog: Rc<RefCell<PageCatalog>>) -> Result<()> {
    let on_submit = {
        let catalog = Rc::clone(&catalog);
        let form = form.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let submitted = form_fields(&form).and_then(|fields| catalog.borrow_mut().submit(fields));
            if let Err(e) = submitted {
                log::error!("Failed to add recipe: {}", e);
            }
        })
    };
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_submit.forget();

    let clear_button = form
        .get_elements_by_class_name(RESET_CLASS)
        .item(0)
        .ok_or(Error::MissingElement("a .danger reset button"))?;
    let on_clear = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        if let Err(e) = catalog.borrow_mut().reset() {
            log::error!("Failed to clear recipes: {}", e);
        }
    });
    clear_button
        .add_event_listener_with_callback("click", on_clear.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_clear.forget();
    Ok(())
}

/// Named controls in document order. File inputs have no string value and
/// are left out.
fn form_fields(form: &HtmlFormElement) -> Result<Vec<(String, String)>> {
    let data = FormData::new_with_form(form).map_err(js_error)?;
    let entries = js_sys::try_iter(&data)
        .map_err(js_error)?
        .ok_or_else(|| Error::Dom("form data is not iterable".to_string()))?;

    let mut fields = Vec::new();
    for entry in entries {
        let pair: js_sys::Array = entry.map_err(js_error)?.unchecked_into();
        if let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            fields.push((key, value));
        }
    }
    Ok(fields)
}
