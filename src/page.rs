//! The page the catalog expects to live in: a `#new-recipe` form whose named
//! controls match the record keys, a `.danger` reset button inside it and a
//! `<main>` listing.

use crate::dom::{Dom, MemoryDom, MemoryNode};
use crate::error::Result;

pub const FORM_ID: &str = "new-recipe";
pub const RESET_CLASS: &str = "danger";

/// (name, label, input type) for every control on the form.
static FORM_FIELDS: [(&str, &str, &str); 9] = [
    ("imgSrc", "Image Source", "text"),
    ("imgAlt", "Image Alt Text", "text"),
    ("titleLnk", "Title Link", "text"),
    ("titleTxt", "Title Text", "text"),
    ("organization", "Organization", "text"),
    ("rating", "Rating", "number"),
    ("numRatings", "Number of Ratings", "number"),
    ("lengthTime", "Length of Time", "text"),
    ("ingredients", "Ingredients", "text"),
];

pub struct Page<D: Dom> {
    pub root: D::Node,
    pub form: D::Node,
    pub listing: D::Node,
}

impl<D: Dom> Page<D> {
    pub fn build(dom: &D, title: &str) -> Result<Self> {
        let root = dom.create_element("html")?;
        dom.set_attribute(&root, "lang", "en")?;

        let head = dom.append_element(&root, "head")?;
        let meta = dom.append_element(&head, "meta")?;
        dom.set_attribute(&meta, "charset", "utf-8")?;
        let title_el = dom.append_element(&head, "title")?;
        dom.set_text(&title_el, title);

        let body = dom.append_element(&root, "body")?;
        let form = dom.append_element(&body, "form")?;
        dom.set_attribute(&form, "id", FORM_ID)?;
        let fieldset = dom.append_element(&form, "fieldset")?;
        let legend = dom.append_element(&fieldset, "legend")?;
        dom.set_text(&legend, "New Recipe");
        for (name, label_text, kind) in FORM_FIELDS {
            let label = dom.append_element(&fieldset, "label")?;
            dom.set_attribute(&label, "for", name)?;
            dom.set_text(&label, label_text);
            let input = dom.append_element(&fieldset, "input")?;
            dom.set_attribute(&input, "type", kind)?;
            dom.set_attribute(&input, "id", name)?;
            dom.set_attribute(&input, "name", name)?;
        }
        let submit = dom.append_element(&form, "button")?;
        dom.set_attribute(&submit, "type", "submit")?;
        dom.set_text(&submit, "Add Recipe");
        let reset = dom.append_element(&form, "button")?;
        dom.set_attribute(&reset, "type", "button")?;
        dom.set_attribute(&reset, "class", RESET_CLASS)?;
        dom.set_text(&reset, "Clear Local Storage");

        let listing = dom.append_element(&body, "main")?;
        Ok(Self {
            root,
            form,
            listing,
        })
    }
}

impl Page<MemoryDom> {
    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html>\n{}\n", self.root.to_html())
    }

    pub fn field_names(&self) -> Vec<String> {
        self.form
            .query_all(|node: &MemoryNode| node.tag().as_deref() == Some("input"))
            .iter()
            .filter_map(|input| input.attribute("name"))
            .collect()
    }
}
