//! Small namespace-aware element tree built on quick-xml's `NsReader`.
//!
//! The whole document is checked while it is read: mismatched or unclosed
//! tags, undefined entities, unbound prefixes, and anything other than
//! whitespace, comments or processing instructions after the root element
//! all fail the parse.

use std::borrow::Cow;

use quick_xml::{
    events::{BytesStart, Event},
    name::{Namespace, ResolveResult},
    NsReader
};

use crate::error::{HarvestError, HarvestResult};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub namespace: Option<String>,
    pub name: String,
    // unprefixed attributes keep their plain name, prefixed ones are `{ns}name`.
    attributes: Vec<(String, String)>,
    /// Character data before the first child element.
    pub text: String,
    pub children: Vec<XmlElement>
}

impl XmlElement {
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.name == name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given expanded name.
    pub fn find(&self, namespace: &str, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.is(namespace, name))
    }

    /// All direct children with the given expanded name, in document order.
    pub fn find_all<'a>(
        &'a self,
        namespace: &'a str,
        name: &'a str
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |child| child.is(namespace, name))
    }
}

struct OpenElement {
    element: XmlElement,
    seen_child: bool
}

pub fn parse_document(raw: &[u8]) -> HarvestResult<XmlElement> {
    let mut reader = NsReader::from_reader(raw);
    let mut buf = Vec::new();
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let element = open_element(&reader, &e, root.is_some())?;
                if let Some(parent) = stack.last_mut() {
                    parent.seen_child = true;
                }
                stack.push(OpenElement { element, seen_child: false });
            }
            Event::Empty(e) => {
                let element = open_element(&reader, &e, root.is_some())?;
                close_element(element, &mut stack, &mut root);
            }
            Event::End(e) => {
                let open = stack.pop().ok_or_else(|| {
                    malformed(format!("unmatched end tag </{}>", String::from_utf8_lossy(e.name().as_ref())))
                })?;
                close_element(open.element, &mut stack, &mut root);
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(quick_xml::Error::from)?;
                push_text(&mut stack, &text, root.is_some())?;
            }
            Event::CData(e) => {
                let text = reader.decoder().decode(&e).map_err(quick_xml::Error::from)?;
                push_text(&mut stack, &text, root.is_some())?;
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, doctype
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(malformed(format!("unclosed element <{}>", open.element.name)));
    }
    root.ok_or_else(|| malformed("no root element".to_string()))
}

fn open_element<R>(
    reader: &NsReader<R>,
    start: &BytesStart<'_>,
    after_root: bool
) -> HarvestResult<XmlElement> {
    let (resolved, local) = reader.resolve_element(start.name());
    if after_root {
        return Err(malformed(format!(
            "element <{}> after the root element",
            String::from_utf8_lossy(local.as_ref())
        )));
    }
    let namespace = resolve_namespace(reader, resolved)?;
    let name = decode(reader, local.as_ref())?.into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let value = attr.unescape_value().map_err(quick_xml::Error::from)?.into_owned();
        let (resolved, local) = reader.resolve_attribute(attr.key);
        let local = decode(reader, local.as_ref())?;
        let key = match resolve_namespace(reader, resolved)? {
            Some(ns) => format!("{{{}}}{}", ns, local),
            None => local.into_owned()
        };
        attributes.push((key, value));
    }

    Ok(XmlElement {
        namespace,
        name,
        attributes,
        ..XmlElement::default()
    })
}

fn close_element(element: XmlElement, stack: &mut Vec<OpenElement>, root: &mut Option<XmlElement>) {
    match stack.last_mut() {
        Some(parent) => {
            parent.seen_child = true;
            parent.element.children.push(element);
        }
        None => *root = Some(element)
    }
}

fn push_text(stack: &mut [OpenElement], text: &str, after_root: bool) -> HarvestResult<()> {
    match stack.last_mut() {
        Some(open) if !open.seen_child => open.element.text.push_str(text),
        Some(_) => {}
        None if text.trim().is_empty() => {}
        None if after_root => return Err(malformed("text after the root element".to_string())),
        None => return Err(malformed("text before the root element".to_string()))
    }
    Ok(())
}

fn resolve_namespace<R>(reader: &NsReader<R>, resolved: ResolveResult<'_>) -> HarvestResult<Option<String>> {
    match resolved {
        ResolveResult::Bound(Namespace(ns)) => Ok(Some(decode(reader, ns)?.into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(malformed(format!(
            "unbound namespace prefix `{}`",
            String::from_utf8_lossy(&prefix)
        )))
    }
}

fn decode<'b, R>(reader: &NsReader<R>, bytes: &'b [u8]) -> HarvestResult<Cow<'b, str>> {
    Ok(reader.decoder().decode(bytes).map_err(quick_xml::Error::from)?)
}

fn malformed(message: String) -> HarvestError {
    HarvestError::MalformedFeed(message)
}
