use super::expr::model::Path;
use nxml_dom::{node, Node, NodeKind, XmlDocument, XmlNode};

// -----------------------------------------------------------------------------------------------

/// Finds the node addressed by `path`.
///
/// The first segment names the root element; each following segment picks the first
/// element or CDATA child with that name.
pub fn resolve(document: &XmlDocument, path: &Path) -> Option<XmlNode> {
    let (first, rest) = path.split_first()?;
    let root = document.root()?;
    if root.borrow().name() != first {
        return None;
    }

    rest.iter()
        .try_fold(root, |current, name| current.borrow().find_child(name))
}

/// Like [`resolve`], but creates the root and any missing element on the way.
pub fn create(document: &mut XmlDocument, path: &Path) -> Option<XmlNode> {
    let (first, rest) = path.split_first()?;

    let root = match document.root() {
        Some(root) => root,
        None => {
            let root = node(Node::element(first));
            document.set_root(root.clone());
            log::debug!("create root {:?}", first);
            root
        }
    };

    if root.borrow().name() != first {
        return None;
    }

    let found = rest.iter().fold(root, |current, name| {
        let child = current.borrow().find_child(name);
        child.unwrap_or_else(|| {
            let child = node(Node::element(name));
            Node::append(&current, child.clone());
            log::debug!("create {:?} below {:?}", name, current.borrow().name());
            child
        })
    });

    Some(found)
}

/// Collects the paths of the leaf elements at and below `node`.
///
/// `prefix` is the path of the parent of `node`. An element holding CDATA is a leaf
/// whatever else it holds.
pub fn leaf_paths(node: &XmlNode, prefix: &str, paths: &mut Vec<String>) {
    let node = node.borrow();
    match node.kind() {
        NodeKind::CData => {
            if paths.last().map(String::as_str) != Some(prefix) {
                paths.push(prefix.to_string());
            }
        }
        NodeKind::Normal => {
            let path = format!("{}/{}", prefix, node.name());
            let children: Vec<&XmlNode> = node
                .children()
                .iter()
                .filter(|v| v.borrow().kind().is_addressable())
                .collect();

            if children.is_empty() {
                paths.push(path);
            } else {
                for child in children {
                    leaf_paths(child, &path, paths);
                }
            }
        }
        _ => {}
    }
}

// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::parse;

    const INPUT: &str = "<a><b><c>1</c><![CDATA[x]]><![CDATA[y]]></b><d/><!--e--></a>";

    #[test]
    fn test_resolve() {
        let document = XmlDocument::parse(INPUT).unwrap();

        let c = resolve(&document, &parse("/a/b/c")).unwrap();
        assert_eq!("1", c.borrow().value());

        let cdata = resolve(&document, &parse("/a/b/CData")).unwrap();
        assert_eq!("x", cdata.borrow().value());

        assert!(resolve(&document, &parse("/a")).is_some());
        assert!(resolve(&document, &parse("/a/Comment")).is_none());
        assert!(resolve(&document, &parse("/b")).is_none());
        assert!(resolve(&document, &parse("/a/x/c")).is_none());
        assert!(resolve(&document, &parse("/")).is_none());
    }

    #[test]
    fn test_create() {
        let mut document = XmlDocument::new();
        let item = create(&mut document, &parse("/Root/Items/Item5")).unwrap();
        assert_eq!("Item5", item.borrow().name());
        assert_eq!(2, item.borrow().depth());
        assert_eq!(
            "<Root><Items><Item5></Item5></Items></Root>",
            document.to_xml_string().unwrap()
        );

        let again = create(&mut document, &parse("/Root/Items/Item5")).unwrap();
        assert!(std::rc::Rc::ptr_eq(&item, &again));

        create(&mut document, &parse("/Root/Head")).unwrap();
        assert_eq!(2, document.root().unwrap().borrow().child_count());

        assert!(create(&mut document, &parse("/Other/Items")).is_none());
        assert!(create(&mut document, &parse("")).is_none());
    }

    #[test]
    fn test_leaf_paths() {
        let document = XmlDocument::parse(INPUT).unwrap();
        let mut paths = vec![];
        leaf_paths(&document.root().unwrap(), "", &mut paths);
        assert_eq!(vec!["/a/b/c", "/a/b", "/a/d"], paths);
    }
}
