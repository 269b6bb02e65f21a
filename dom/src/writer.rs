use crate::config::Config;
use crate::error::{Error, Result};
use crate::{Attributes, Node, NodeKind, XmlNode};

// -----------------------------------------------------------------------------------------------

/// Appends the text of `node` and its descendants to `out`.
///
/// Line breaks go between children, never after the node itself.
pub(crate) fn write_node(node: &Node, config: &Config, out: &mut String) -> Result<()> {
    let indent = config.indent_for(node.depth());

    match node.kind() {
        NodeKind::Normal => write_element(node, &indent, config, out)?,
        NodeKind::CharData => {
            if node.child_count() > 0 || !node.attributes().is_empty() {
                return Err(Error::IllegalElementType(NodeKind::CharData));
            }

            out.push_str(&indent);
            out.push_str(node.value());
        }
        NodeKind::Declaration => {
            out.push_str(&indent);
            out.push_str("<?xml");
            write_declaration_attributes(node.attributes(), out);
            out.push_str("?>");
        }
        NodeKind::StyleSheet => {
            out.push_str(&indent);
            out.push_str("<?xml-stylesheet");
            write_attributes(node.attributes(), out);
            out.push_str("?>");
        }
        NodeKind::DocType => write_doctype(node, &indent, config, out)?,
        NodeKind::DtdElement => write_dtd("ELEMENT", node, &indent, out),
        NodeKind::DtdAttList => write_dtd("ATTLIST", node, &indent, out),
        NodeKind::DtdEntity => write_dtd("ENTITY", node, &indent, out),
        NodeKind::DtdNotation => write_dtd("NOTATION", node, &indent, out),
        NodeKind::Comment => write_raw("<!--", node, "-->", &indent, out),
        NodeKind::CData => write_raw("<![CDATA[", node, "]]>", &indent, out),
        NodeKind::GenericBang => write_raw("<!", node, ">", &indent, out),
        NodeKind::GenericQuestion => write_raw("<?", node, "?>", &indent, out),
        NodeKind::Unknown => write_raw("<", node, ">", &indent, out),
    }

    Ok(())
}

/// Appends top-level nodes in order, each followed by a line break.
pub(crate) fn write_nodes(nodes: &[XmlNode], config: &Config, out: &mut String) -> Result<()> {
    for node in nodes {
        write_node(&node.borrow(), config, out)?;
        out.push_str(config.line_feed());
    }
    Ok(())
}

// -----------------------------------------------------------------------------------------------

/// Self-closing form: nothing inside, below the root, and full nodes not requested.
fn is_direct(node: &Node, config: &Config) -> bool {
    node.kind() == NodeKind::Normal
        && node.value().is_empty()
        && node.child_count() == 0
        && !config.use_full_nodes
        && node.depth() > 0
}

fn write_element(node: &Node, indent: &str, config: &Config, out: &mut String) -> Result<()> {
    if node.name().is_empty() {
        return Err(Error::MissingElementName);
    }

    out.push_str(indent);
    out.push('<');
    out.push_str(node.name());
    write_attributes(node.attributes(), out);

    if is_direct(node, config) {
        out.push_str("/>");
        return Ok(());
    }

    out.push('>');
    out.push_str(node.value());

    if node.child_count() > 0 {
        out.push_str(config.line_feed());
        write_children(node, config, out)?;
        out.push_str(indent);
    }

    out.push_str("</");
    out.push_str(node.name());
    out.push('>');
    Ok(())
}

fn write_children(node: &Node, config: &Config, out: &mut String) -> Result<()> {
    for child in node.children() {
        let child = child.borrow();
        write_node(&child, config, out)?;
        if child.kind() != NodeKind::CharData {
            out.push_str(config.line_feed());
        }
    }
    Ok(())
}

fn write_doctype(node: &Node, indent: &str, config: &Config, out: &mut String) -> Result<()> {
    out.push_str(indent);
    out.push_str("<!DOCTYPE ");
    out.push_str(node.value());

    if node.child_count() > 0 {
        out.push('[');
        out.push_str(config.line_feed());
        write_children(node, config, out)?;
        out.push_str(indent);
        out.push(']');
    }

    out.push('>');
    Ok(())
}

fn write_dtd(keyword: &str, node: &Node, indent: &str, out: &mut String) {
    out.push_str(indent);
    out.push_str("<!");
    out.push_str(keyword);
    for part in [node.name(), node.value()] {
        if !part.is_empty() {
            out.push(' ');
            out.push_str(part);
        }
    }
    out.push('>');
}

fn write_raw(open: &str, node: &Node, close: &str, indent: &str, out: &mut String) {
    out.push_str(indent);
    out.push_str(open);
    out.push_str(node.value());
    out.push_str(close);
}

// -----------------------------------------------------------------------------------------------

fn write_declaration_attributes(attributes: &Attributes, out: &mut String) {
    let version = attributes
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("version"));

    if let Some((name, value)) = version {
        write_attribute(name, value, out);
    }

    for (name, value) in attributes {
        if !name.eq_ignore_ascii_case("version") {
            write_attribute(name, value, out);
        }
    }
}

fn write_attributes(attributes: &Attributes, out: &mut String) {
    for (name, value) in attributes {
        write_attribute(name, value, out);
    }
}

fn write_attribute(name: &str, value: &str, out: &mut String) {
    let quote = if value.contains('"') && !value.contains('\'') {
        '\''
    } else {
        '"'
    };

    out.push(' ');
    out.push_str(name);
    out.push('=');
    out.push(quote);
    out.push_str(value);
    out.push(quote);
}

// -----------------------------------------------------------------------------------------------
