pub mod eval;
pub mod expr;

use nxml_dom::error::Result;
use nxml_dom::{node, Node, XmlDocument, XmlNode};

// -----------------------------------------------------------------------------------------------

/// Access to the nodes of a document through path expressions such as `/Root/Items/Item1`.
///
/// Paths that do not resolve are not errors: lookups give an empty string or `None` and
/// updates give `false`.
pub trait Navigator {
    fn node_for_path(&self, path: &str) -> Option<XmlNode>;

    fn get_value(&self, path: &str) -> String;

    fn set_value(&mut self, path: &str, value: &str) -> bool;

    fn get_attribute(&self, path: &str, name: &str) -> String;

    fn set_attribute(&mut self, path: &str, name: &str, value: &str) -> bool;

    /// Appends an empty element called `name` below `parent_path`.
    fn add_node(&mut self, parent_path: &str, name: &str) -> bool;

    /// Appends the root element of `xml` below `parent_path`.
    fn add_node_from_str(&mut self, parent_path: &str, xml: &str) -> Result<bool>;

    fn add_xml_node(&mut self, parent_path: &str, node: XmlNode) -> bool;

    /// Makes sure every element along `path` exists.
    fn add_node_for_path(&mut self, path: &str) -> bool;

    /// Puts `node` at the place of the node at `path`. The root cannot be replaced.
    fn replace_node(&mut self, path: &str, node: XmlNode) -> bool;

    /// Removes the node at `path` with its subtree. The root cannot be removed.
    fn remove_node(&mut self, path: &str) -> bool;

    /// Paths of the leaf elements of the document.
    fn node_paths(&self) -> Vec<String>;

    /// Paths of the leaf elements below the node at `path`.
    fn node_paths_for(&self, path: &str) -> Vec<String>;
}

impl Navigator for XmlDocument {
    fn node_for_path(&self, path: &str) -> Option<XmlNode> {
        let path = expr::parse(path);
        let found = eval::resolve(self, &path);
        log::trace!("resolve {} (found: {})", path, found.is_some());
        found
    }

    fn get_value(&self, path: &str) -> String {
        self.node_for_path(path)
            .map(|v| v.borrow().value().to_string())
            .unwrap_or_default()
    }

    fn set_value(&mut self, path: &str, value: &str) -> bool {
        self.node_for_path(path)
            .map(|v| v.borrow_mut().set_value(value))
            .is_some()
    }

    fn get_attribute(&self, path: &str, name: &str) -> String {
        self.node_for_path(path)
            .and_then(|v| v.borrow().attribute(name).map(str::to_string))
            .unwrap_or_default()
    }

    fn set_attribute(&mut self, path: &str, name: &str, value: &str) -> bool {
        self.node_for_path(path)
            .map(|v| v.borrow_mut().set_attribute(name, value))
            .is_some()
    }

    fn add_node(&mut self, parent_path: &str, name: &str) -> bool {
        self.add_xml_node(parent_path, node(Node::element(name)))
    }

    fn add_node_from_str(&mut self, parent_path: &str, xml: &str) -> Result<bool> {
        let parent = match self.node_for_path(parent_path) {
            Some(parent) => parent,
            None => return Ok(false),
        };

        let mut fragment = XmlDocument::with_config(self.config().clone());
        fragment.read_from_str(xml)?;

        match fragment.root() {
            Some(root) => Ok(Node::append(&parent, root).is_some()),
            None => Ok(false),
        }
    }

    fn add_xml_node(&mut self, parent_path: &str, node: XmlNode) -> bool {
        match self.node_for_path(parent_path) {
            Some(parent) => Node::append(&parent, node).is_some(),
            None => false,
        }
    }

    fn add_node_for_path(&mut self, path: &str) -> bool {
        eval::create(self, &expr::parse(path)).is_some()
    }

    fn replace_node(&mut self, path: &str, node: XmlNode) -> bool {
        let found = match self.node_for_path(path) {
            Some(found) => found,
            None => return false,
        };

        let (parent, id) = {
            let found = found.borrow();
            (found.parent(), found.id())
        };

        match parent {
            Some(parent) => Node::replace(&parent, id, node).is_some(),
            None => false,
        }
    }

    fn remove_node(&mut self, path: &str) -> bool {
        let found = match self.node_for_path(path) {
            Some(found) => found,
            None => return false,
        };

        let (parent, id) = {
            let found = found.borrow();
            (found.parent(), found.id())
        };

        match parent {
            Some(parent) => Node::remove(&parent, id).is_some(),
            None => false,
        }
    }

    fn node_paths(&self) -> Vec<String> {
        let mut paths = vec![];
        if let Some(root) = self.root() {
            eval::leaf_paths(&root, "", &mut paths);
        }
        paths
    }

    fn node_paths_for(&self, path: &str) -> Vec<String> {
        let path = expr::parse(path);
        let mut paths = vec![];
        if let Some(found) = eval::resolve(self, &path) {
            let prefix = path.to_string();
            for child in found.borrow().children() {
                eval::leaf_paths(child, &prefix, &mut paths);
            }
        }
        paths
    }
}

// -----------------------------------------------------------------------------------------------
