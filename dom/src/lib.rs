pub mod config;
pub mod error;

mod document;
mod reader;
mod writer;

pub use config::{Config, Format};
pub use document::XmlDocument;
pub use nxml_nom::model::Attributes;

use nxml_parser::model::TagKind;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

// -----------------------------------------------------------------------------------------------

pub type XmlNode = Rc<RefCell<Node>>;

pub fn node(value: Node) -> XmlNode {
    Rc::new(RefCell::new(value))
}

// -----------------------------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `<name {attr}>[value][children]</name>`
    #[default]
    Normal,
    /// `<!--{comment}-->`
    Comment,
    /// `<![CDATA[{data}]]>`
    CData,
    /// `<?xml{declaration}?>`
    Declaration,
    /// `<?xml-stylesheet{stylesheet}?>`
    StyleSheet,
    /// `<!DOCTYPE {spec}>` or `<!DOCTYPE {spec}[{children}]>`
    DocType,
    DtdElement,
    DtdAttList,
    DtdEntity,
    DtdNotation,
    /// `<!{data}>`
    GenericBang,
    /// `<?{data}?>`
    GenericQuestion,
    /// Text between tags.
    CharData,
    Unknown,
}

impl NodeKind {
    /// Name given to parsed nodes of this kind, unless the name comes from the markup.
    pub fn fixed_name(&self) -> Option<&'static str> {
        match self {
            NodeKind::Comment => Some("Comment"),
            NodeKind::CData => Some("CData"),
            NodeKind::Declaration => Some("xml"),
            NodeKind::StyleSheet => Some("xml-stylesheet"),
            NodeKind::DocType => Some("DTD"),
            NodeKind::GenericBang | NodeKind::GenericQuestion => Some("Special"),
            NodeKind::Unknown => Some("Unknown"),
            NodeKind::CharData => Some(""),
            NodeKind::Normal
            | NodeKind::DtdElement
            | NodeKind::DtdAttList
            | NodeKind::DtdEntity
            | NodeKind::DtdNotation => None,
        }
    }

    /// Kinds reachable through path segments.
    pub fn is_addressable(&self) -> bool {
        matches!(self, NodeKind::Normal | NodeKind::CData)
    }
}

impl From<TagKind> for NodeKind {
    fn from(value: TagKind) -> Self {
        match value {
            TagKind::CData => NodeKind::CData,
            TagKind::DocType => NodeKind::DocType,
            TagKind::DtdElement => NodeKind::DtdElement,
            TagKind::DtdAttList => NodeKind::DtdAttList,
            TagKind::DtdEntity => NodeKind::DtdEntity,
            TagKind::DtdNotation => NodeKind::DtdNotation,
            TagKind::StyleSheet => NodeKind::StyleSheet,
            TagKind::Declaration => NodeKind::Declaration,
            TagKind::Comment => NodeKind::Comment,
            TagKind::GenericBang => NodeKind::GenericBang,
            TagKind::GenericQuestion => NodeKind::GenericQuestion,
            TagKind::Normal => NodeKind::Normal,
        }
    }
}

// -----------------------------------------------------------------------------------------------

/// One entity of the tree.
///
/// A node owns its children. The parent link is weak and only serves lookups such as
/// [`Node::depth`].
#[derive(Debug, Default)]
pub struct Node {
    kind: NodeKind,
    name: String,
    value: String,
    attributes: Attributes,
    children: Vec<XmlNode>,
    parent: Weak<RefCell<Node>>,
    id: usize,
    last_id: usize,
}

impl PartialEq<Node> for Node {
    fn eq(&self, other: &Node) -> bool {
        self.kind == other.kind
            && self.name == other.name
            && self.value == other.value
            && self.attributes == other.attributes
            && self.children == other.children
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .to_xml_string(&Config::default())
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Node {
    pub fn new(kind: NodeKind, name: &str) -> Self {
        Node {
            kind,
            name: name.to_string(),
            ..Node::default()
        }
    }

    pub fn element(name: &str) -> Self {
        Node::new(NodeKind::Normal, name)
    }

    pub fn char_data(value: &str) -> Self {
        Node::new(NodeKind::CharData, "").with_value(value)
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Reads one node, with its descendants, from the start of `input`.
    pub fn read_from_str(input: &str) -> error::Result<Option<XmlNode>> {
        let mut reader = nxml_parser::Reader::new(input);
        reader::read_node(&mut reader)
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) -> Option<String> {
        self.attributes.insert(name.to_string(), value.to_string())
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn children(&self) -> &[XmlNode] {
        self.children.as_slice()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Identifier assigned by the parent on insertion, unique among its siblings.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn parent(&self) -> Option<XmlNode> {
        self.parent.upgrade()
    }

    /// Number of ancestors.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut parent = self.parent();
        while let Some(node) = parent {
            depth += 1;
            parent = node.borrow().parent();
        }
        depth
    }

    /// No value, no children and no attributes.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.children.is_empty() && self.attributes.is_empty()
    }

    pub fn is_clear(&self) -> bool {
        self.name.is_empty() && self.is_empty()
    }

    pub fn position(&self, id: usize) -> Option<usize> {
        self.children.iter().position(|v| v.borrow().id == id)
    }

    pub fn child(&self, id: usize) -> Option<XmlNode> {
        self.position(id).map(|i| self.children[i].clone())
    }

    /// First element or CDATA child called `name`.
    pub fn find_child(&self, name: &str) -> Option<XmlNode> {
        self.children
            .iter()
            .find(|v| {
                let child = v.borrow();
                child.kind.is_addressable() && child.name == name
            })
            .cloned()
    }

    /// Value of the first child called `name`, whatever its kind.
    pub fn value_of_child(&self, name: &str) -> Option<String> {
        self.children
            .iter()
            .map(|v| v.borrow())
            .find(|v| v.name == name)
            .map(|v| v.value.clone())
    }

    /// Appends `child` as the last child of `parent` and returns its new id.
    ///
    /// A child still attached elsewhere is detached from its old parent first. Gives `None`,
    /// and changes nothing, when `child` is `parent` or one of its ancestors.
    pub fn append(parent: &XmlNode, child: XmlNode) -> Option<usize> {
        if is_ancestor_or_self(&child, parent) {
            return None;
        }

        detach(&child);

        let mut owner = parent.borrow_mut();
        owner.last_id += 1;
        let id = owner.last_id;
        {
            let mut child = child.borrow_mut();
            child.parent = Rc::downgrade(parent);
            child.id = id;
        }
        owner.children.push(child);
        Some(id)
    }

    /// Removes the child with `id` from `parent`, together with its subtree.
    pub fn remove(parent: &XmlNode, id: usize) -> Option<XmlNode> {
        let mut owner = parent.borrow_mut();
        let index = owner.position(id)?;
        let child = owner.children.remove(index);
        child.borrow_mut().parent = Weak::new();
        Some(child)
    }

    /// Puts `child` at the place of the child with `id`; the newcomer keeps that id.
    ///
    /// Like [`Node::append`], refuses `parent` itself and its ancestors.
    pub fn replace(parent: &XmlNode, id: usize, child: XmlNode) -> Option<XmlNode> {
        if is_ancestor_or_self(&child, parent) {
            return None;
        }

        detach(&child);

        let mut owner = parent.borrow_mut();
        let index = owner.position(id)?;
        {
            let mut child = child.borrow_mut();
            child.parent = Rc::downgrade(parent);
            child.id = id;
        }
        let old = std::mem::replace(&mut owner.children[index], child);
        old.borrow_mut().parent = Weak::new();
        Some(old)
    }

    pub fn to_xml_string(&self, config: &Config) -> error::Result<String> {
        let mut out = String::new();
        writer::write_node(self, config, &mut out)?;
        Ok(out)
    }
}

fn is_ancestor_or_self(node: &XmlNode, parent: &XmlNode) -> bool {
    let mut current = Some(parent.clone());
    while let Some(ancestor) = current {
        if Rc::ptr_eq(&ancestor, node) {
            return true;
        }
        current = ancestor.borrow().parent();
    }
    false
}

fn detach(child: &XmlNode) {
    let (parent, id) = {
        let child = child.borrow();
        (child.parent(), child.id)
    };

    if let Some(parent) = parent {
        Node::remove(&parent, id);
    }
}

// -----------------------------------------------------------------------------------------------
