//! XMP packets.
//!
//! Reading flattens the RDF tree into one entry per property, plus path
//! entries for structures and arrays of structures:
//!
//! ```text
//! Xmp.dc.subject                    Bag ["beach", "sun"]
//! Xmp.xmpMM.History                 Seq []            (array of structures)
//! Xmp.xmpMM.History[1]/stEvt:action "saved"
//! ```
//!
//! Writing rebuilds the tree from those paths and serializes it as a single
//! `rdf:Description`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use tracing::{debug, trace, warn};

use crate::error::{CodecError, ErrorCode};
use crate::xmp::namespace::{namespace_prefix, namespace_uri, register_discovered};
use crate::xmp::{ArrayKind, XmpDatum, XmpKey, XmpValue, X_DEFAULT};

const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";
const META_NS: &str = "adobe:ns:meta/";

fn invalid_xmp(message: impl std::fmt::Display) -> CodecError {
    CodecError::new(ErrorCode::InvalidXmp, message.to_string())
}

// =============================================================================
// Element tree
// =============================================================================

#[derive(Debug, Default)]
struct Attribute {
    ns: Option<String>,
    local: String,
    /// Qualified name as written
    raw: String,
    value: String,
}

#[derive(Debug, Default)]
struct Element {
    ns: Option<String>,
    local: String,
    /// Prefix as written, used to name namespaces found in the packet
    prefix: Option<String>,
    attributes: Vec<Attribute>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn is(&self, ns: &str, local: &str) -> bool {
        self.ns.as_deref() == Some(ns) && self.local == local
    }

    fn rdf_attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.ns.as_deref() == Some(RDF_NS) && a.local == local)
            .map(|a| a.value.as_str())
    }

    fn lang(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.raw == "xml:lang" || (a.ns.as_deref() == Some(XML_NS) && a.local == "lang"))
            .map(|a| a.value.as_str())
    }

    /// Attributes that are properties rather than RDF or XML syntax.
    fn property_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| {
            !a.raw.starts_with("xml:")
                && !matches!(a.ns.as_deref(), Some(RDF_NS) | Some(XML_NS) | None)
        })
    }
}

fn resolved(result: &ResolveResult<'_>) -> Option<String> {
    match result {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
        _ => None,
    }
}

fn element_from(
    reader: &NsReader<&[u8]>,
    ns: Option<String>,
    start: &BytesStart<'_>,
) -> Result<Element, CodecError> {
    let mut element = Element {
        ns,
        local: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        prefix: start
            .name()
            .prefix()
            .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned()),
        ..Element::default()
    };
    for attribute in start.attributes() {
        let attribute = attribute.map_err(invalid_xmp)?;
        let raw = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        if raw == "xmlns" || raw.starts_with("xmlns:") {
            continue;
        }
        let (ns, local) = reader.resolve_attribute(attribute.key);
        let ns = resolved(&ns);
        let local = String::from_utf8_lossy(local.as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(invalid_xmp)?.into_owned();
        element.attributes.push(Attribute {
            ns,
            local,
            raw,
            value,
        });
    }
    Ok(element)
}

fn parse_tree(text: &str) -> Result<Element, CodecError> {
    let mut reader = NsReader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut roots: Vec<Element> = Vec::new();

    loop {
        let (ns, event) = reader.read_resolved_event().map_err(invalid_xmp)?;
        let ns = resolved(&ns);
        match event {
            Event::Start(start) => {
                let element = element_from(&reader, ns, &start)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = element_from(&reader, ns, &start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => roots.push(element),
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| invalid_xmp("unbalanced end tag"))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => roots.push(element),
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape().map_err(invalid_xmp)?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if !stack.is_empty() {
        return Err(invalid_xmp("unterminated element"));
    }

    let mut document = Element::default();
    document.children = roots;
    Ok(document)
}

fn find_rdf(element: &Element) -> Option<&Element> {
    if element.is(RDF_NS, "RDF") {
        return Some(element);
    }
    element.children.iter().find_map(find_rdf)
}

// =============================================================================
// Reading
// =============================================================================

/// A property value as found in the packet.
#[derive(Debug)]
enum Node {
    Text { text: String, lang: Option<String> },
    Array(ArrayKind, Vec<Node>),
    /// Fields as `(namespace, name, prefix as written, value)`
    Struct(Vec<(String, String, Option<String>, Node)>),
}

fn parse_node(element: &Element) -> Node {
    let lang = element.lang().map(str::to_string);

    if let Some(array) = element.children.iter().find(|c| {
        c.ns.as_deref() == Some(RDF_NS) && ArrayKind::from_rdf_name(c.local.as_bytes()).is_some()
    }) {
        let kind = ArrayKind::from_rdf_name(array.local.as_bytes()).unwrap_or(ArrayKind::Bag);
        let items = array
            .children
            .iter()
            .filter(|li| li.is(RDF_NS, "li"))
            .map(parse_node)
            .collect();
        return Node::Array(kind, items);
    }

    let mut fields = Vec::new();
    let description = element.children.iter().find(|c| c.is(RDF_NS, "Description"));
    if element.rdf_attribute("parseType") == Some("Resource") || description.is_some() {
        let body = description.unwrap_or(element);
        collect_fields(body, &mut fields);
        return Node::Struct(fields);
    }

    if element.property_attributes().next().is_some() {
        collect_fields(element, &mut fields);
        return Node::Struct(fields);
    }

    let text = match element.rdf_attribute("resource") {
        Some(resource) => resource.to_string(),
        None => element.text.clone(),
    };
    Node::Text { text, lang }
}

fn collect_fields(element: &Element, fields: &mut Vec<(String, String, Option<String>, Node)>) {
    for attribute in element.property_attributes() {
        let Some(ns) = &attribute.ns else { continue };
        let prefix = attribute.raw.split_once(':').map(|(p, _)| p.to_string());
        fields.push((
            ns.clone(),
            attribute.local.clone(),
            prefix,
            Node::Text {
                text: attribute.value.clone(),
                lang: None,
            },
        ));
    }
    for child in &element.children {
        let Some(ns) = &child.ns else { continue };
        if ns == RDF_NS {
            continue;
        }
        fields.push((ns.clone(), child.local.clone(), child.prefix.clone(), parse_node(child)));
    }
}

struct Flattener {
    auto_register: bool,
    datums: Vec<XmpDatum>,
}

impl Flattener {
    /// Key prefix for a namespace, registering it when allowed.
    fn prefix_for(&self, uri: &str, written: Option<&str>) -> Option<String> {
        if let Some(prefix) = namespace_prefix(uri) {
            return Some(prefix);
        }
        if self.auto_register {
            if let Some(prefix) = register_discovered(uri, written.unwrap_or("ns")) {
                return Some(prefix);
            }
        }
        warn!(namespace = uri, "dropping properties of unregistered namespace");
        None
    }

    fn push(&mut self, prefix: &str, path: &str, value: XmpValue) {
        trace!(prefix, path, "read XMP property");
        self.datums
            .push(XmpDatum::new(XmpKey::from_parts(prefix, path), value));
    }

    fn flatten(&mut self, prefix: &str, path: &str, node: Node) {
        match node {
            Node::Text { text, .. } => self.push(prefix, path, XmpValue::Text(text)),
            Node::Array(kind, items) => {
                let all_text = items.iter().all(|i| matches!(i, Node::Text { .. }));
                let any_lang = items
                    .iter()
                    .any(|i| matches!(i, Node::Text { lang: Some(_), .. }));

                if all_text && kind == ArrayKind::Alt && any_lang {
                    let entries = items.into_iter().filter_map(|item| match item {
                        Node::Text { text, lang } => {
                            Some((lang.unwrap_or_else(|| X_DEFAULT.to_string()), text))
                        }
                        _ => None,
                    });
                    let value = XmpValue::lang_alt(entries);
                    self.push(prefix, path, value);
                } else if all_text {
                    let items = items
                        .into_iter()
                        .filter_map(|item| match item {
                            Node::Text { text, .. } => Some(text),
                            _ => None,
                        })
                        .collect();
                    self.push(prefix, path, XmpValue::Array { kind, items });
                } else {
                    self.push(prefix, path, XmpValue::Array { kind, items: Vec::new() });
                    for (i, item) in items.into_iter().enumerate() {
                        self.flatten(prefix, &format!("{path}[{}]", i + 1), item);
                    }
                }
            }
            Node::Struct(fields) => {
                for (ns, name, written, value) in fields {
                    let Some(field_prefix) = self.prefix_for(&ns, written.as_deref()) else {
                        continue;
                    };
                    self.flatten(prefix, &format!("{path}/{field_prefix}:{name}"), value);
                }
            }
        }
    }
}

/// Parse a packet into entries.
///
/// With `auto_register`, namespaces missing from the registry are registered
/// under a prefix derived from the one written in the packet; this needs an
/// initialized registry. Properties whose namespace stays unknown are dropped.
///
/// # Errors
/// `InvalidXmp` if the packet is not well-formed XML.
pub fn parse_packet(packet: &[u8], auto_register: bool) -> Result<Vec<XmpDatum>, CodecError> {
    let text = std::str::from_utf8(packet).map_err(invalid_xmp)?;
    let text = text.trim_start_matches('\u{feff}').trim_end_matches('\0');
    let document = parse_tree(text)?;

    let mut flattener = Flattener {
        auto_register,
        datums: Vec::new(),
    };
    let Some(rdf) = find_rdf(&document) else {
        debug!("XMP packet without rdf:RDF");
        return Ok(Vec::new());
    };

    for description in rdf.children.iter().filter(|c| c.is(RDF_NS, "Description")) {
        let mut properties = Vec::new();
        collect_fields(description, &mut properties);
        for (ns, name, written, node) in properties {
            let Some(prefix) = flattener.prefix_for(&ns, written.as_deref()) else {
                continue;
            };
            flattener.flatten(&prefix, &name, node);
        }
    }

    debug!(properties = flattener.datums.len(), "parsed XMP packet");
    Ok(flattener.datums)
}

// =============================================================================
// Writing
// =============================================================================

#[derive(Debug)]
enum OutNode {
    Empty,
    Text(String),
    Array(ArrayKind, Vec<OutNode>),
    LangAlt(Vec<(String, String)>),
    /// Fields by qualified name
    Struct(Vec<(String, OutNode)>),
}

fn item(node: &mut OutNode, index: usize, kind: ArrayKind) -> &mut OutNode {
    if !matches!(node, OutNode::Array(..)) {
        *node = OutNode::Array(kind, Vec::new());
    }
    match node {
        OutNode::Array(_, items) => {
            if items.len() < index {
                items.resize_with(index, || OutNode::Empty);
            }
            &mut items[index - 1]
        }
        other => other,
    }
}

fn field<'a>(node: &'a mut OutNode, name: &str) -> &'a mut OutNode {
    if !matches!(node, OutNode::Struct(_)) {
        *node = OutNode::Struct(Vec::new());
    }
    match node {
        OutNode::Struct(fields) => {
            let index = match fields.iter().position(|(n, _)| n == name) {
                Some(index) => index,
                None => {
                    fields.push((name.to_string(), OutNode::Empty));
                    fields.len() - 1
                }
            };
            &mut fields[index].1
        }
        other => other,
    }
}

fn assign(slot: &mut OutNode, value: &XmpValue) {
    match value {
        XmpValue::Array { kind, items } if items.is_empty() => match slot {
            OutNode::Array(existing, _) => *existing = *kind,
            _ => *slot = OutNode::Array(*kind, Vec::new()),
        },
        XmpValue::Text(text) => *slot = OutNode::Text(text.clone()),
        XmpValue::Array { kind, items } => {
            *slot = OutNode::Array(*kind, items.iter().cloned().map(OutNode::Text).collect())
        }
        XmpValue::LangAlt(entries) => *slot = OutNode::LangAlt(entries.clone()),
    }
}

struct Root {
    prefix: String,
    name: String,
    node: OutNode,
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push(' ');
    }
}

fn write_node(out: &mut String, name: &str, node: &OutNode, depth: usize) {
    match node {
        OutNode::Empty => {}
        OutNode::Text(text) => {
            indent(out, depth);
            out.push_str(&format!("<{name}>{}</{name}>\n", escape(text)));
        }
        OutNode::Array(kind, items) => {
            let container = kind.rdf_element();
            indent(out, depth);
            out.push_str(&format!("<{name}>\n"));
            indent(out, depth + 1);
            if items.iter().all(|i| matches!(i, OutNode::Empty)) {
                out.push_str(&format!("<{container}/>\n"));
            } else {
                out.push_str(&format!("<{container}>\n"));
                for item in items {
                    write_node(out, "rdf:li", item, depth + 2);
                }
                indent(out, depth + 1);
                out.push_str(&format!("</{container}>\n"));
            }
            indent(out, depth);
            out.push_str(&format!("</{name}>\n"));
        }
        OutNode::LangAlt(entries) => {
            indent(out, depth);
            out.push_str(&format!("<{name}>\n"));
            indent(out, depth + 1);
            out.push_str("<rdf:Alt>\n");
            for (lang, text) in entries {
                indent(out, depth + 2);
                out.push_str(&format!(
                    "<rdf:li xml:lang=\"{}\">{}</rdf:li>\n",
                    escape(lang),
                    escape(text)
                ));
            }
            indent(out, depth + 1);
            out.push_str("</rdf:Alt>\n");
            indent(out, depth);
            out.push_str(&format!("</{name}>\n"));
        }
        OutNode::Struct(fields) => {
            indent(out, depth);
            out.push_str(&format!("<{name} rdf:parseType=\"Resource\">\n"));
            for (field_name, value) in fields {
                write_node(out, field_name, value, depth + 1);
            }
            indent(out, depth);
            out.push_str(&format!("</{name}>\n"));
        }
    }
}

/// Serialize entries into a packet with `padding` bytes of whitespace.
///
/// Returns `None` when no entry holds a value.
///
/// # Errors
/// `SchemaNamespaceNotRegistered` if a prefix used by a key is no longer
/// registered.
pub fn serialize_packet(
    datums: &[XmpDatum],
    padding: usize,
) -> Result<Option<Vec<u8>>, CodecError> {
    let mut roots: Vec<Root> = Vec::new();
    let mut prefixes: Vec<String> = Vec::new();

    for datum in datums {
        let Some(value) = &datum.value else {
            debug!(key = %datum.key, "skipping property without value");
            continue;
        };
        let segments = datum.key.segments();
        let Some((first, rest)) = segments.split_first() else {
            return Err(CodecError::new(
                ErrorCode::InvalidKey,
                format!("cannot encode property path '{}'", datum.key),
            ));
        };
        for segment in &segments {
            if !prefixes.contains(&segment.prefix) {
                prefixes.push(segment.prefix.clone());
            }
        }

        let index = match roots
            .iter()
            .position(|r| r.prefix == first.prefix && r.name == first.name)
        {
            Some(index) => index,
            None => {
                roots.push(Root {
                    prefix: first.prefix.clone(),
                    name: first.name.clone(),
                    node: OutNode::Empty,
                });
                roots.len() - 1
            }
        };

        let default_kind = datum
            .key
            .info()
            .and_then(|info| info.value_type.array_kind())
            .or_else(|| {
                XmpKey::from_parts(&first.prefix, &first.name)
                    .info()
                    .and_then(|info| info.value_type.array_kind())
            })
            .unwrap_or(ArrayKind::Seq);

        let mut slot = &mut roots[index].node;
        if let Some(i) = first.index {
            slot = item(slot, i, default_kind);
        }
        for segment in rest {
            slot = field(slot, &segment.qualified_name());
            if let Some(i) = segment.index {
                slot = item(slot, i, ArrayKind::Seq);
            }
        }
        assign(slot, value);
    }

    if roots.iter().all(|r| matches!(r.node, OutNode::Empty)) {
        return Ok(None);
    }

    let mut declarations = String::new();
    for prefix in &prefixes {
        let uri = namespace_uri(prefix).ok_or_else(|| {
            CodecError::new(
                ErrorCode::SchemaNamespaceNotRegistered,
                format!("no namespace registered for prefix '{prefix}'"),
            )
        })?;
        declarations.push_str(&format!("\n    xmlns:{prefix}=\"{}\"", escape(&uri)));
    }

    let mut out = String::new();
    out.push_str("<?xpacket begin=\"\u{feff}\" id=\"W5M0MpCehiHzreSzNTczkc9d\"?>\n");
    out.push_str(&format!(
        "<x:xmpmeta xmlns:x=\"{META_NS}\" x:xmptk=\"imgmeta {}\">\n",
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str(&format!(" <rdf:RDF xmlns:rdf=\"{RDF_NS}\">\n"));
    out.push_str(&format!("  <rdf:Description rdf:about=\"\"{declarations}>\n"));
    for root in &roots {
        write_node(&mut out, &format!("{}:{}", root.prefix, root.name), &root.node, 3);
    }
    out.push_str("  </rdf:Description>\n");
    out.push_str(" </rdf:RDF>\n");
    out.push_str("</x:xmpmeta>\n");

    let mut remaining = padding;
    while remaining > 0 {
        let line = remaining.min(100);
        out.push_str(&" ".repeat(line - 1));
        out.push('\n');
        remaining -= line;
    }
    out.push_str("<?xpacket end=\"w\"?>");

    debug!(bytes = out.len(), properties = roots.len(), "serialized XMP packet");
    Ok(Some(out.into_bytes()))
}
