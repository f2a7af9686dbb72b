//! The handful of DOM operations the catalog needs, behind one trait so the
//! same card and controller code runs in the browser and in tests.

use crate::error::Result;

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::{MemoryDom, MemoryNode};

pub trait Dom: Clone {
    /// A handle to a node. Cloning it clones the handle, not the node.
    type Node: Clone;

    fn create_element(&self, tag: &str) -> Result<Self::Node>;

    /// Attaches an open shadow root to `host` and returns it.
    fn attach_shadow(&self, host: &Self::Node) -> Result<Self::Node>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<()>;

    /// Replaces every child of `node` with a single text node.
    fn set_text(&self, node: &Self::Node, text: &str);

    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    fn clear_children(&self, node: &Self::Node);

    /// Creates `tag`, appends it to `parent` and hands it back.
    fn append_element(&self, parent: &Self::Node, tag: &str) -> Result<Self::Node> {
        let element = self.create_element(tag)?;
        self.append_child(parent, &element)?;
        Ok(element)
    }
}
