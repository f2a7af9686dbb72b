use super::Dom;
use crate::error::{Error, Result};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Node, ShadowRootInit, ShadowRootMode};

pub(crate) fn js_error(value: JsValue) -> Error {
    Error::Dom(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn as_element(node: &Node) -> Result<&Element> {
    node.dyn_ref::<Element>()
        .ok_or_else(|| Error::Dom(format!("{} is not an element", node.node_name())))
}

impl Dom for WebDom {
    type Node = Node;

    fn create_element(&self, tag: &str) -> Result<Node> {
        let element = self.document.create_element(tag).map_err(js_error)?;
        Ok(element.into())
    }

    fn attach_shadow(&self, host: &Node) -> Result<Node> {
        let shadow = as_element(host)?
            .attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))
            .map_err(js_error)?;
        Ok(shadow.into())
    }

    fn set_attribute(&self, node: &Node, name: &str, value: &str) -> Result<()> {
        as_element(node)?
            .set_attribute(name, value)
            .map_err(js_error)
    }

    fn set_text(&self, node: &Node, text: &str) {
        node.set_text_content(Some(text));
    }

    fn append_child(&self, parent: &Node, child: &Node) -> Result<()> {
        parent.append_child(child).map_err(js_error)?;
        Ok(())
    }

    fn clear_children(&self, node: &Node) {
        node.set_text_content(None);
    }
}
