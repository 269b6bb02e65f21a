use crate::config::{Config, Format};
use crate::error::{Error, Result, Violation};
use crate::{detach, reader, writer, NodeKind, XmlNode};
use nxml_parser::Reader;
use std::fmt;

// -----------------------------------------------------------------------------------------------

/// Top-level constructs of a text, in document order, with the settings used to write them.
#[derive(Debug, Default)]
pub struct XmlDocument {
    nodes: Vec<XmlNode>,
    last_id: usize,
    config: Config,
}

impl fmt::Display for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_xml_string().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl XmlDocument {
    pub fn new() -> Self {
        XmlDocument::default()
    }

    pub fn with_config(config: Config) -> Self {
        XmlDocument {
            config,
            ..XmlDocument::default()
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        let mut document = XmlDocument::new();
        document.read_from_str(input)?;
        Ok(document)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn set_format(&mut self, format: Format) {
        self.config.format = format;
    }

    pub fn set_readable(&mut self, readable: bool) {
        self.set_format(if readable {
            Format::Readable
        } else {
            Format::Compact
        });
    }

    pub fn nodes(&self) -> &[XmlNode] {
        self.nodes.as_slice()
    }

    /// The first top-level element.
    pub fn root(&self) -> Option<XmlNode> {
        self.first_of(NodeKind::Normal)
    }

    pub fn declaration(&self) -> Option<XmlNode> {
        self.first_of(NodeKind::Declaration)
    }

    pub fn stylesheet(&self) -> Option<XmlNode> {
        self.first_of(NodeKind::StyleSheet)
    }

    pub fn doctype(&self) -> Option<XmlNode> {
        self.first_of(NodeKind::DocType)
    }

    fn first_of(&self, kind: NodeKind) -> Option<XmlNode> {
        self.nodes
            .iter()
            .find(|v| v.borrow().kind() == kind)
            .cloned()
    }

    /// Makes `node` the root element, in place of the current one if any.
    pub fn set_root(&mut self, node: XmlNode) -> Option<XmlNode> {
        let index = self
            .nodes
            .iter()
            .position(|v| v.borrow().kind() == NodeKind::Normal);

        match index {
            Some(index) => {
                detach(&node);
                let id = self.nodes[index].borrow().id;
                node.borrow_mut().id = id;
                Some(std::mem::replace(&mut self.nodes[index], node))
            }
            None => {
                self.push(node);
                None
            }
        }
    }

    /// Appends a top-level node and returns its id.
    pub fn push(&mut self, node: XmlNode) -> usize {
        detach(&node);
        self.last_id += 1;
        node.borrow_mut().id = self.last_id;
        self.nodes.push(node);
        self.last_id
    }

    pub fn remove(&mut self, id: usize) -> Option<XmlNode> {
        let index = self.nodes.iter().position(|v| v.borrow().id == id)?;
        Some(self.nodes.remove(index))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.last_id = 0;
    }

    /// Replaces the content of the document with the constructs read from `input`.
    ///
    /// The document is left untouched when reading fails.
    pub fn read_from_str(&mut self, input: &str) -> Result<()> {
        let mut reader = Reader::new(input);
        let mut nodes = vec![];
        while let Some(node) = reader::read_node(&mut reader)? {
            if !node.borrow().is_clear() {
                nodes.push(node);
            }
        }

        if !nodes.iter().any(|v| v.borrow().kind() == NodeKind::Normal) {
            return Err(Error::NoRootElement);
        }

        let violations = validate_nodes(&nodes);
        if !violations.is_empty() {
            if self.config.strict {
                return Err(Error::Validation(violations));
            }

            for violation in violations {
                log::warn!("{}", violation);
            }
        }

        self.clear();
        for node in nodes {
            self.push(node);
        }

        log::debug!("read document with {} top-level nodes", self.nodes.len());
        Ok(())
    }

    /// Reads an already loaded byte sequence, which must be UTF-8.
    pub fn read_from_bytes(&mut self, input: &[u8]) -> Result<()> {
        let input = std::str::from_utf8(input)?;
        self.read_from_str(input)
    }

    /// Structural rules broken by the top-level nodes.
    pub fn validate(&self) -> Vec<Violation> {
        validate_nodes(&self.nodes)
    }

    pub fn to_xml_string(&self) -> Result<String> {
        if self.config.strict && self.root().is_none() {
            return Err(Error::RootNotDefined);
        }

        let mut out = String::new();
        writer::write_nodes(&self.nodes, &self.config, &mut out)?;
        Ok(out)
    }
}

fn validate_nodes(nodes: &[XmlNode]) -> Vec<Violation> {
    let position = |kind: NodeKind| nodes.iter().position(|v| v.borrow().kind() == kind);
    let count = |kind: NodeKind| nodes.iter().filter(|v| v.borrow().kind() == kind).count();

    let mut violations = vec![];

    if count(NodeKind::Normal) > 1 {
        violations.push(Violation::MoreThanOneRoot);
    }

    if count(NodeKind::Declaration) > 1 {
        violations.push(Violation::MoreThanOneDeclaration);
    }

    if count(NodeKind::DocType) > 1 {
        violations.push(Violation::MoreThanOneDocType);
    }

    if let (Some(doctype), Some(root)) = (position(NodeKind::DocType), position(NodeKind::Normal)) {
        if doctype > root {
            violations.push(Violation::DocTypeAfterRoot);
        }
    }

    if count(NodeKind::CData) > 0 {
        violations.push(Violation::CDataInRoot);
    }

    violations
}

// -----------------------------------------------------------------------------------------------
