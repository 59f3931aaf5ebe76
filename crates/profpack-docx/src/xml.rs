//! A small order-preserving XML tree over quick-xml events.
//!
//! Word templates carry far more markup than this crate models (section
//! properties, styles, drawings); everything parses into a generic element
//! tree and serializes back out unchanged, so unknown markup survives a
//! fill pass. Prefixed names (`w:p`) are kept as literal strings; namespace
//! resolution is unnecessary for a single, fixed vocabulary.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{DocxError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
    /// Parsed from `<name/>`; written back the same way while childless.
    pub self_closing: bool,
}

impl XmlElement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.attrs.iter_mut().find(|(key, _)| key == name) {
            slot.1 = value.to_string();
        } else {
            self.attrs.push((name.to_string(), value.to_string()));
        }
    }

    pub fn child_elements(&self) -> impl Iterator<Item = (usize, &XmlElement)> {
        self.children.iter().enumerate().filter_map(|(i, node)| {
            if let XmlNode::Element(el) = node {
                Some((i, el))
            } else {
                None
            }
        })
    }

    pub fn find_child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements()
            .find(|(_, el)| el.name == name)
            .map(|(_, el)| el)
    }

    pub fn find_child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.children.iter_mut().find_map(|node| match node {
            XmlNode::Element(el) if el.name == name => Some(el),
            _ => None,
        })
    }

    /// Concatenated direct text children (not descendants).
    pub fn direct_text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            if let XmlNode::Text(text) = node {
                out.push_str(text);
            }
        }
        out
    }
}

/// Parse a standalone XML document into an element tree.
///
/// Comments and processing instructions are not part of WordprocessingML
/// main parts and are dropped; character and entity references are resolved
/// into the text nodes.
pub fn parse(xml: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(element_from(&start, false, reader.decoder())?);
            }
            Event::Empty(start) => {
                let element = element_from(&start, true, reader.decoder())?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or(DocxError::UnbalancedXml)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(parent) = stack.last_mut() {
                    push_text(parent, &text.decode().map_err(quick_xml::Error::from)?);
                }
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    push_text(parent, &String::from_utf8_lossy(&data));
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(parent) = stack.last_mut() {
                    push_text(parent, &resolve_reference(&reference));
                }
            }
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if !stack.is_empty() {
        return Err(DocxError::UnbalancedXml);
    }
    root.ok_or(DocxError::UnbalancedXml)
}

/// Serialize an element tree back to a standalone XML document with the
/// canonical OOXML declaration.
pub fn serialize(root: &XmlElement) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    write_element(&mut writer, root)?;
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| DocxError::Utf8(e.utf8_error()))
}

fn element_from(
    start: &BytesStart<'_>,
    self_closing: bool,
    decoder: quick_xml::Decoder,
) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = XmlElement::new(&name);
    element.self_closing = self_closing;
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.decode_and_unescape_value(decoder)?.into_owned();
        element.attrs.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Element(element));
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(DocxError::UnbalancedXml),
    }
}

/// Append text, merging with a trailing text node so split references
/// ("a&amp;b" arriving as three events) form one node.
fn push_text(parent: &mut XmlElement, text: &str) {
    if let Some(XmlNode::Text(existing)) = parent.children.last_mut() {
        existing.push_str(text);
    } else {
        parent.children.push(XmlNode::Text(text.to_string()));
    }
}

fn resolve_reference(raw: &[u8]) -> String {
    let name = String::from_utf8_lossy(raw);
    match name.as_ref() {
        "amp" => "&".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "apos" => "'".to_string(),
        "quot" => "\"".to_string(),
        _ => {
            if let Some(code) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                if let Some(c) = u32::from_str_radix(code, 16).ok().and_then(char::from_u32) {
                    return c.to_string();
                }
            } else if let Some(code) = name.strip_prefix('#') {
                if let Some(c) = code.parse::<u32>().ok().and_then(char::from_u32) {
                    return c.to_string();
                }
            }
            // Unknown entity: keep the literal reference text.
            format!("&{name};")
        }
    }
}

fn write_element(writer: &mut Writer<Cursor<Vec<u8>>>, element: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attrs {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    if element.children.is_empty() && element.self_closing {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }
    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Element(el) => write_element(writer, el)?,
            XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
