use crate::error::{Error, Result};
use crate::{node, Node, NodeKind, XmlNode};
use nxml_nom::{element_name, trim};
use nxml_parser::error as scan;
use nxml_parser::model::TagKind;
use nxml_parser::{Quotes, Reader};

// -----------------------------------------------------------------------------------------------

/// Reads the next top-level construct, or `None` at the end of input.
pub(crate) fn read_node(reader: &mut Reader) -> Result<Option<XmlNode>> {
    let first = match reader.read_char_skip_blanks() {
        Some(ch) => ch,
        None => return Ok(None),
    };

    if first == '<' {
        return read_tag(reader).map(Some);
    }

    reader.unread_char(first);
    let text = read_text(reader, &['<']);
    Ok(Some(node(Node::char_data(trim(&text)))))
}

// -----------------------------------------------------------------------------------------------

fn read_tag(reader: &mut Reader) -> Result<XmlNode> {
    let tag = reader.read_open_tag()?;
    let kind = NodeKind::from(tag);
    let close = tag.pattern().close;

    let node = match tag {
        TagKind::Normal => read_element(reader)?,
        TagKind::Declaration | TagKind::StyleSheet => read_instruction(reader, kind, close)?,
        TagKind::DocType => read_doctype(reader)?,
        TagKind::DtdElement | TagKind::DtdAttList | TagKind::DtdEntity | TagKind::DtdNotation => {
            read_dtd(reader, kind)?
        }
        TagKind::Comment | TagKind::CData | TagKind::GenericBang | TagKind::GenericQuestion => {
            read_raw(reader, kind, close)?
        }
    };

    log::debug!("read {:?} node {:?}", kind, node.borrow().name());
    Ok(node)
}

fn read_element(reader: &mut Reader) -> Result<XmlNode> {
    let close = TagKind::Normal.pattern().close;
    let raw = reader
        .read_until(close, true)
        .map_err(unterminated(NodeKind::Normal, close))?;

    let mut interior = trim(&raw);
    let direct = interior.ends_with('/');
    if direct {
        interior = &interior[..interior.len() - 1];
    }

    let (attrs, name) = element_name(interior).map_err(|_| Error::MissingElementName)?;
    if name.is_empty() {
        return Err(Error::MissingElementName);
    }

    let mut element = Node::element(name);
    nxml_nom::attributes(attrs, element.attributes_mut());

    let element = node(element);
    if !direct {
        read_content(reader, &element)?;
    }

    Ok(element)
}

fn read_content(reader: &mut Reader, element: &XmlNode) -> Result<()> {
    let name = element.borrow().name().to_string();
    let mut text = String::new();
    let mut has_cr = false;
    let mut has_children = false;

    loop {
        let ch = reader
            .read_char()
            .ok_or_else(|| Error::MissingCloseTag(name.clone()))?;

        if ch != '<' {
            has_cr |= ch == '\r';
            text.push(ch);
            continue;
        }

        let next = reader
            .read_char_skip_blanks()
            .ok_or_else(|| Error::MissingDataAfterLessThan(name.clone()))?;

        if next == '/' {
            let close = reader
                .read_until(">", true)
                .map_err(|_| Error::MissingGreaterThanInCloseTag(name.clone()))?;

            let found = trim(&close);
            if found != name {
                return Err(Error::IncorrectCloseTag {
                    name,
                    found: found.to_string(),
                });
            }

            break;
        }

        flush_text(element, &mut text);
        reader.unread_char(next);
        let child = read_tag(reader)?;
        Node::append(element, child);
        has_children = true;
        has_cr = false;
    }

    if !has_children {
        element.borrow_mut().set_value(trim(&text));
        return Ok(());
    }

    flush_text(element, &mut text);

    // Line breaks after the last child come from readable output.
    if has_cr {
        for child in element.borrow().children() {
            let mut child = child.borrow_mut();
            if child.kind() != NodeKind::CharData {
                continue;
            }

            if let Some(end) = child.value().find(|c: char| c == '\r' || c == '\n') {
                let value = child.value()[..end].to_string();
                child.set_value(&value);
            }
        }
    }

    Ok(())
}

fn read_instruction(reader: &mut Reader, kind: NodeKind, close: &'static str) -> Result<XmlNode> {
    let interior = reader
        .read_until(close, true)
        .map_err(unterminated(kind, close))?;

    let mut instruction = Node::new(kind, kind.fixed_name().unwrap_or_default());
    nxml_nom::attributes(&interior, instruction.attributes_mut());
    Ok(node(instruction))
}

fn read_doctype(reader: &mut Reader) -> Result<XmlNode> {
    let mut declared = String::new();
    let mut quotes = Quotes::default();

    let has_subset = loop {
        let ch = reader.read_char().ok_or(Error::Unterminated {
            kind: NodeKind::DocType,
            terminator: ">",
        })?;

        if !quotes.feed(ch) && (ch == '>' || ch == '[') {
            break ch == '[';
        }

        declared.push(ch);
    };

    let doctype = node(Node::new(NodeKind::DocType, "DTD").with_value(trim(&declared)));
    if has_subset {
        read_subset(reader, &doctype)?;
    }

    Ok(doctype)
}

fn read_subset(reader: &mut Reader, doctype: &XmlNode) -> Result<()> {
    let missing = || Error::Unterminated {
        kind: NodeKind::DocType,
        terminator: "]>",
    };

    loop {
        match reader.read_char_skip_blanks().ok_or_else(missing)? {
            ']' => {
                return match reader.read_char_skip_blanks() {
                    Some('>') => Ok(()),
                    _ => Err(missing()),
                };
            }
            '<' => {
                let child = read_tag(reader)?;
                Node::append(doctype, child);
            }
            ch => {
                reader.unread_char(ch);
                let text = read_text(reader, &['<', ']']);
                Node::append(doctype, node(Node::char_data(trim(&text))));
            }
        }
    }
}

fn read_dtd(reader: &mut Reader, kind: NodeKind) -> Result<XmlNode> {
    let raw = reader.read_with_quotes('>').map_err(unterminated(kind, ">"))?;
    let body = trim(&raw);
    let (rest, name) = element_name(body).unwrap_or((body, ""));

    let mut dtd = Node::new(kind, name).with_value(trim(rest));
    nxml_nom::attributes(body, dtd.attributes_mut());
    Ok(node(dtd))
}

fn read_raw(reader: &mut Reader, kind: NodeKind, close: &'static str) -> Result<XmlNode> {
    let value = reader
        .read_until(close, false)
        .map_err(unterminated(kind, close))?;

    let raw = Node::new(kind, kind.fixed_name().unwrap_or_default()).with_value(&value);
    Ok(node(raw))
}

// -----------------------------------------------------------------------------------------------

fn read_text(reader: &mut Reader, stops: &[char]) -> String {
    let mut text = String::new();
    while let Some(ch) = reader.read_char() {
        if stops.contains(&ch) {
            reader.unread_char(ch);
            break;
        }

        text.push(ch);
    }
    text
}

fn flush_text(element: &XmlNode, text: &mut String) {
    let value = trim(text);
    if !value.is_empty() {
        Node::append(element, node(Node::char_data(value)));
    }
    text.clear();
}

fn unterminated(kind: NodeKind, terminator: &'static str) -> impl FnOnce(scan::Error) -> Error {
    move |_| Error::Unterminated { kind, terminator }
}

// -----------------------------------------------------------------------------------------------
