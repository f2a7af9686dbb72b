//! A small owned node tree that answers the [`Dom`] trait without a browser.
//! It backs the native preview and every test, and it serializes to HTML with
//! declarative shadow roots so a rendered page keeps its card styles scoped.

use super::Dom;
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

static VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

static RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryDom;

#[derive(Debug)]
enum Kind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    ShadowRoot,
    Text(String),
}

#[derive(Debug)]
struct NodeData {
    kind: Kind,
    children: Vec<MemoryNode>,
    shadow_root: Option<MemoryNode>,
    parent: Weak<RefCell<NodeData>>,
}

#[derive(Debug, Clone)]
pub struct MemoryNode(Rc<RefCell<NodeData>>);

impl MemoryNode {
    fn new(kind: Kind) -> Self {
        MemoryNode(Rc::new(RefCell::new(NodeData {
            kind,
            children: Vec::new(),
            shadow_root: None,
            parent: Weak::new(),
        })))
    }

    pub fn element(tag: &str) -> Self {
        Self::new(Kind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        })
    }

    fn text(text: &str) -> Self {
        Self::new(Kind::Text(text.to_string()))
    }

    pub fn ptr_eq(&self, other: &MemoryNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn tag(&self) -> Option<String> {
        match &self.0.borrow().kind {
            Kind::Element { tag, .. } => Some(tag.clone()),
            _ => None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        match &self.0.borrow().kind {
            Kind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone()),
            _ => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn children(&self) -> Vec<MemoryNode> {
        self.0.borrow().children.clone()
    }

    pub fn element_children(&self) -> Vec<MemoryNode> {
        self.children()
            .into_iter()
            .filter(|child| child.tag().is_some())
            .collect()
    }

    pub fn shadow_root(&self) -> Option<MemoryNode> {
        self.0.borrow().shadow_root.clone()
    }

    /// Concatenated text of this node's light tree.
    pub fn text_content(&self) -> String {
        let data = self.0.borrow();
        match &data.kind {
            Kind::Text(text) => text.clone(),
            _ => data.children.iter().map(MemoryNode::text_content).collect(),
        }
    }

    /// Depth-first search of the light tree below this node. Like
    /// `querySelectorAll`, it does not descend into shadow roots.
    pub fn query_all<F>(&self, predicate: F) -> Vec<MemoryNode>
    where
        F: Fn(&MemoryNode) -> bool,
    {
        let mut found = Vec::new();
        self.collect(&predicate, &mut found);
        found
    }

    fn collect<F>(&self, predicate: &F, found: &mut Vec<MemoryNode>)
    where
        F: Fn(&MemoryNode) -> bool,
    {
        for child in self.children() {
            if predicate(&child) {
                found.push(child.clone());
            }
            child.collect(predicate, found);
        }
    }

    pub fn first_by_tag(&self, tag: &str) -> Option<MemoryNode> {
        self.query_all(|node| node.tag().as_deref() == Some(tag))
            .into_iter()
            .next()
    }

    pub fn first_by_class(&self, class: &str) -> Option<MemoryNode> {
        self.query_all(|node| node.has_class(class))
            .into_iter()
            .next()
    }

    fn detach(&self) {
        let parent = self.0.borrow().parent.upgrade();
        if let Some(parent) = parent {
            parent
                .borrow_mut()
                .children
                .retain(|child| !child.ptr_eq(self));
        }
        self.0.borrow_mut().parent = Weak::new();
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out, false);
        out
    }

    fn write_html(&self, out: &mut String, raw_text: bool) {
        let data = self.0.borrow();
        match &data.kind {
            Kind::Text(text) if raw_text => out.push_str(text),
            Kind::Text(text) => out.push_str(&escape_html(text, false)),
            Kind::ShadowRoot => {
                for child in &data.children {
                    child.write_html(out, false);
                }
            }
            Kind::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {}=\"{}\"", name, escape_html(value, true)));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                if let Some(shadow) = &data.shadow_root {
                    out.push_str("<template shadowrootmode=\"open\">");
                    shadow.write_html(out, false);
                    out.push_str("</template>");
                }
                let raw = RAW_TEXT_ELEMENTS.contains(&tag.as_str());
                for child in &data.children {
                    child.write_html(out, raw);
                }
                out.push_str(&format!("</{}>", tag));
            }
        }
    }
}

fn escape_html(text: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

impl Dom for MemoryDom {
    type Node = MemoryNode;

    fn create_element(&self, tag: &str) -> Result<MemoryNode> {
        if tag.is_empty() || tag.contains(|c: char| c.is_whitespace() || c == '<' || c == '>') {
            return Err(Error::Dom(format!("invalid tag name {:?}", tag)));
        }
        Ok(MemoryNode::element(tag))
    }

    fn attach_shadow(&self, host: &MemoryNode) -> Result<MemoryNode> {
        let mut data = host.0.borrow_mut();
        if !matches!(data.kind, Kind::Element { .. }) {
            return Err(Error::Dom("shadow roots attach to elements only".to_string()));
        }
        if data.shadow_root.is_some() {
            return Err(Error::Dom("element already hosts a shadow root".to_string()));
        }
        let shadow = MemoryNode::new(Kind::ShadowRoot);
        data.shadow_root = Some(shadow.clone());
        Ok(shadow)
    }

    fn set_attribute(&self, node: &MemoryNode, name: &str, value: &str) -> Result<()> {
        match &mut node.0.borrow_mut().kind {
            Kind::Element { attributes, .. } => {
                match attributes.iter_mut().find(|(key, _)| key == name) {
                    Some((_, existing)) => *existing = value.to_string(),
                    None => attributes.push((name.to_string(), value.to_string())),
                }
                Ok(())
            }
            _ => Err(Error::Dom(format!("cannot set {} on a non-element", name))),
        }
    }

    fn set_text(&self, node: &MemoryNode, text: &str) {
        self.clear_children(node);
        if text.is_empty() {
            return;
        }
        let child = MemoryNode::text(text);
        child.0.borrow_mut().parent = Rc::downgrade(&node.0);
        node.0.borrow_mut().children.push(child);
    }

    fn append_child(&self, parent: &MemoryNode, child: &MemoryNode) -> Result<()> {
        if matches!(parent.0.borrow().kind, Kind::Text(_)) {
            return Err(Error::Dom("text nodes have no children".to_string()));
        }
        if parent.ptr_eq(child) {
            return Err(Error::Dom("a node cannot contain itself".to_string()));
        }
        child.detach();
        child.0.borrow_mut().parent = Rc::downgrade(&parent.0);
        parent.0.borrow_mut().children.push(child.clone());
        Ok(())
    }

    fn clear_children(&self, node: &MemoryNode) {
        let children = std::mem::take(&mut node.0.borrow_mut().children);
        for child in children {
            child.0.borrow_mut().parent = Weak::new();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_shadow_roots_declaratively() {
        let dom = MemoryDom;
        let host = dom.create_element("recipe-card").unwrap();
        let shadow = dom.attach_shadow(&host).unwrap();
        let style = dom.append_element(&shadow, "style").unwrap();
        dom.set_text(&style, "div.rating>img { width: 78px; }");
        let img = dom.append_element(&shadow, "img").unwrap();
        dom.set_attribute(&img, "alt", "\"quoted\" & <odd>").unwrap();

        assert_eq!(
            host.to_html(),
            "<recipe-card><template shadowrootmode=\"open\">\
             <style>div.rating>img { width: 78px; }</style>\
             <img alt=\"&quot;quoted&quot; &amp; &lt;odd&gt;\">\
             </template></recipe-card>"
        );
    }

    #[test]
    fn text_is_escaped_outside_raw_elements() {
        let dom = MemoryDom;
        let p = dom.create_element("p").unwrap();
        dom.set_text(&p, "salt & <pepper>");
        assert_eq!(p.to_html(), "<p>salt &amp; &lt;pepper&gt;</p>");
        assert_eq!(p.text_content(), "salt & <pepper>");
    }

    #[test]
    fn appending_moves_a_node() {
        let dom = MemoryDom;
        let first = dom.create_element("main").unwrap();
        let second = dom.create_element("section").unwrap();
        let card = dom.append_element(&first, "article").unwrap();
        dom.append_child(&second, &card).unwrap();
        assert!(first.children().is_empty());
        assert!(second.children()[0].ptr_eq(&card));
    }

    #[test]
    fn shadow_root_attaches_once() {
        let dom = MemoryDom;
        let host = dom.create_element("div").unwrap();
        dom.attach_shadow(&host).unwrap();
        assert!(matches!(dom.attach_shadow(&host), Err(Error::Dom(_))));
    }

    #[test]
    fn queries_skip_shadow_trees() {
        let dom = MemoryDom;
        let main = dom.create_element("main").unwrap();
        let host = dom.append_element(&main, "recipe-card").unwrap();
        let shadow = dom.attach_shadow(&host).unwrap();
        dom.append_element(&shadow, "article").unwrap();
        assert!(main.first_by_tag("article").is_none());
        assert!(shadow.first_by_tag("article").is_some());
    }
}
