//! Lightning web component bundle metadata.
//!
//! A bundle's `.js-meta.xml` is resubmitted as a JSON object. The XML is read
//! strictly into a JSON tree using the usual XML-to-JSON conventions:
//! text-only elements become strings, attributes live under `$`, text next to
//! child elements lives under `_`, and repeated siblings collapse into an
//! array.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};
use thiserror::Error;

const ATTRIBUTES_KEY: &str = "$";
const TEXT_KEY: &str = "_";
const INDENT: &str = "  ";

/// Errors raised while reading bundle metadata.
#[derive(Debug, Clone, Error)]
pub enum MetadataError {
    /// The document is not well-formed XML.
    #[error("malformed metadata XML: {source}")]
    Xml {
        /// Underlying parser error.
        #[source]
        source: Arc<quick_xml::Error>,
    },
    /// The document contains no element.
    #[error("metadata XML has no root element")]
    MissingRoot,
    /// The document contains more than one top-level element.
    #[error("metadata XML has more than one root element")]
    MultipleRoots,
    /// Text appears outside the root element.
    #[error("metadata XML has text outside the root element")]
    TextOutsideRoot,
    /// The document ended inside an element.
    #[error("metadata XML ended before </{tag}>")]
    UnclosedElement {
        /// Name of the innermost open element.
        tag: String,
    },
}

impl From<quick_xml::Error> for MetadataError {
    fn from(source: quick_xml::Error) -> Self {
        Self::Xml {
            source: Arc::new(source),
        }
    }
}

/// Builds the `Metadata` payload for a `LightningComponentBundle` upsert.
///
/// Root attributes are dropped, `targetConfigs` is rebuilt as headless XML and
/// base64-encoded (empty when absent), and `targets` is normalised to
/// `{"target": [..]}` however many targets the file lists.
///
/// # Errors
///
/// Returns [`MetadataError`] when `xml` is not a single well-formed element.
pub fn lwc_bundle_metadata(xml: &str) -> Result<Value, MetadataError> {
    let mut metadata = match parse_strict(xml)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    metadata.remove(ATTRIBUTES_KEY);

    let target_configs = metadata
        .get("targetConfigs")
        .map(|configs| build_headless("targetConfigs", configs))
        .unwrap_or_default();
    let targets = to_array(metadata.get("targets"), "target");
    metadata.insert(String::from("targets"), targets);
    metadata.insert(
        String::from("targetConfigs"),
        Value::String(STANDARD.encode(target_configs)),
    );
    Ok(Value::Object(metadata))
}

/// Parses `xml` into the JSON tree of its root element.
///
/// # Errors
///
/// Returns [`MetadataError`] for malformed markup, mismatched or unclosed
/// tags, stray text, and documents with zero or several root elements.
pub fn parse_strict(xml: &str) -> Result<Value, MetadataError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut open: Vec<Frame> = Vec::new();
    let mut root: Option<Value> = None;
    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                ensure_single_root(&open, root.as_ref())?;
                open.push(Frame::open(&start)?);
            }
            Event::Empty(start) => {
                ensure_single_root(&open, root.as_ref())?;
                let frame = Frame::open(&start)?;
                attach(&mut open, &mut root, frame);
            }
            Event::End(_) => {
                if let Some(frame) = open.pop() {
                    attach(&mut open, &mut root, frame);
                }
            }
            Event::Text(text) => {
                let content = text.unescape().map_err(quick_xml::Error::from)?;
                push_text(&mut open, &content)?;
            }
            Event::CData(data) => {
                let content = String::from_utf8_lossy(&data.into_inner()).into_owned();
                push_text(&mut open, &content)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(frame) = open.last() {
        return Err(MetadataError::UnclosedElement {
            tag: frame.name.clone(),
        });
    }
    root.ok_or(MetadataError::MissingRoot)
}

/// Serialises `value` as indented XML rooted at `root_name`, without an XML
/// declaration.
#[must_use]
pub fn build_headless(root_name: &str, value: &Value) -> String {
    let mut lines = Vec::new();
    write_element(&mut lines, root_name, value, 0);
    lines.join("\n")
}

/// Wraps `value` as `{key: [..]}`: absent or empty values give an empty list,
/// a single entry becomes a one-element list, and lists are kept.
#[must_use]
pub fn to_array(value: Option<&Value>, key: &str) -> Value {
    let items = match value.and_then(|container| container.get(key)) {
        Some(Value::Array(items)) => items.clone(),
        Some(item) => vec![item.clone()],
        None => Vec::new(),
    };
    let mut wrapped = Map::new();
    wrapped.insert(key.to_owned(), Value::Array(items));
    Value::Object(wrapped)
}

struct Frame {
    name: String,
    attributes: Map<String, Value>,
    children: Vec<(String, Value)>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, MetadataError> {
        let mut attributes = Map::new();
        for entry in start.attributes() {
            let attribute = entry.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(quick_xml::Error::from)?
                .into_owned();
            attributes.insert(key, Value::String(value));
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    fn close(self) -> Value {
        if self.attributes.is_empty() && self.children.is_empty() {
            return Value::String(self.text);
        }
        let mut map = Map::new();
        if !self.attributes.is_empty() {
            map.insert(ATTRIBUTES_KEY.to_owned(), Value::Object(self.attributes));
        }
        for (name, value) in self.children {
            match map.get_mut(&name) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    map.insert(name, value);
                }
            }
        }
        if !self.text.is_empty() {
            map.insert(TEXT_KEY.to_owned(), Value::String(self.text));
        }
        Value::Object(map)
    }
}

fn ensure_single_root(open: &[Frame], root: Option<&Value>) -> Result<(), MetadataError> {
    if open.is_empty() && root.is_some() {
        return Err(MetadataError::MultipleRoots);
    }
    Ok(())
}

fn attach(open: &mut [Frame], root: &mut Option<Value>, frame: Frame) {
    let name = frame.name.clone();
    let value = frame.close();
    match open.last_mut() {
        Some(parent) => parent.children.push((name, value)),
        None => *root = Some(value),
    }
}

fn push_text(open: &mut [Frame], content: &str) -> Result<(), MetadataError> {
    match open.last_mut() {
        Some(frame) => {
            frame.text.push_str(content);
            Ok(())
        }
        None if content.trim().is_empty() => Ok(()),
        None => Err(MetadataError::TextOutsideRoot),
    }
}

fn write_element(lines: &mut Vec<String>, name: &str, value: &Value, depth: usize) {
    let indent = INDENT.repeat(depth);
    match value {
        Value::Array(items) => {
            for item in items {
                write_element(lines, name, item, depth);
            }
        }
        Value::Object(map) => {
            let attributes = map
                .get(ATTRIBUTES_KEY)
                .and_then(Value::as_object)
                .map(render_attributes)
                .unwrap_or_default();
            let text = map.get(TEXT_KEY).map(scalar_text).unwrap_or_default();
            let children: Vec<_> = map
                .iter()
                .filter(|(key, _)| key.as_str() != ATTRIBUTES_KEY && key.as_str() != TEXT_KEY)
                .collect();
            if children.is_empty() {
                lines.push(if text.is_empty() {
                    format!("{indent}<{name}{attributes}/>")
                } else {
                    format!("{indent}<{name}{attributes}>{}</{name}>", escape(&text))
                });
                return;
            }
            lines.push(format!("{indent}<{name}{attributes}>"));
            if !text.is_empty() {
                lines.push(format!("{indent}{INDENT}{}", escape(&text)));
            }
            for (child_name, child) in children {
                write_element(lines, child_name, child, depth + 1);
            }
            lines.push(format!("{indent}</{name}>"));
        }
        scalar => {
            let text = scalar_text(scalar);
            lines.push(if text.is_empty() {
                format!("{indent}<{name}/>")
            } else {
                format!("{indent}<{name}>{}</{name}>", escape(&text))
            });
        }
    }
}

fn render_attributes(attributes: &Map<String, Value>) -> String {
    attributes
        .iter()
        .map(|(key, value)| format!(" {key}=\"{}\"", escape(&scalar_text(value))))
        .collect()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    const BUNDLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<LightningComponentBundle xmlns="http://soap.sforce.com/2006/04/metadata">
    <apiVersion>59.0</apiVersion>
    <isExposed>true</isExposed>
    <targets>
        <target>lightning__RecordPage</target>
    </targets>
    <targetConfigs>
        <targetConfig targets="lightning__RecordPage">
            <property name="title" type="String" default="Hello &amp; welcome"/>
            <objects>
                <object>Account</object>
                <object>Contact</object>
            </objects>
        </targetConfig>
    </targetConfigs>
</LightningComponentBundle>"#;

    fn decode(value: &Value) -> String {
        let encoded = value.as_str().expect("encoded string");
        let bytes = STANDARD.decode(encoded).expect("valid base64");
        String::from_utf8(bytes).expect("utf-8 xml")
    }

    #[test]
    fn parses_elements_attributes_and_repeats() {
        let tree = parse_strict(BUNDLE_XML).expect("well-formed xml");
        assert_eq!(tree["$"]["xmlns"], "http://soap.sforce.com/2006/04/metadata");
        assert_eq!(tree["apiVersion"], "59.0");
        assert_eq!(tree["targets"], json!({"target": "lightning__RecordPage"}));
        assert_eq!(
            tree["targetConfigs"]["targetConfig"]["objects"]["object"],
            json!(["Account", "Contact"])
        );
        assert_eq!(
            tree["targetConfigs"]["targetConfig"]["property"]["$"]["default"],
            "Hello & welcome"
        );
    }

    #[test]
    fn keeps_mixed_text_under_underscore() {
        let tree = parse_strict(r#"<a kind="x">hello<b>1</b></a>"#).expect("well-formed xml");
        assert_eq!(tree, json!({"$": {"kind": "x"}, "b": "1", "_": "hello"}));
    }

    #[test]
    fn builds_bundle_metadata_payload() {
        let metadata = lwc_bundle_metadata(BUNDLE_XML).expect("metadata builds");

        assert!(metadata.get("$").is_none());
        assert_eq!(metadata["apiVersion"], "59.0");
        assert_eq!(metadata["isExposed"], "true");
        assert_eq!(
            metadata["targets"],
            json!({"target": ["lightning__RecordPage"]})
        );
        assert_eq!(
            decode(&metadata["targetConfigs"]),
            [
                "<targetConfigs>",
                "  <targetConfig targets=\"lightning__RecordPage\">",
                "    <property name=\"title\" type=\"String\" default=\"Hello &amp; welcome\"/>",
                "    <objects>",
                "      <object>Account</object>",
                "      <object>Contact</object>",
                "    </objects>",
                "  </targetConfig>",
                "</targetConfigs>",
            ]
            .join("\n")
        );
    }

    #[rstest]
    #[case::absent("<B><apiVersion>59.0</apiVersion></B>", json!([]))]
    #[case::empty("<B><targets></targets></B>", json!([]))]
    #[case::single("<B><targets><target>a</target></targets></B>", json!(["a"]))]
    #[case::list(
        "<B><targets><target>a</target><target>b</target></targets></B>",
        json!(["a", "b"])
    )]
    fn normalises_targets_to_a_list(#[case] xml: &str, #[case] expected: Value) {
        let metadata = lwc_bundle_metadata(xml).expect("metadata builds");
        assert_eq!(metadata["targets"], json!({"target": expected}));
    }

    #[test]
    fn missing_target_configs_encode_as_empty() {
        let metadata = lwc_bundle_metadata("<B><isExposed>false</isExposed></B>")
            .expect("metadata builds");
        assert_eq!(metadata["targetConfigs"], "");
    }

    #[rstest]
    #[case::mismatched("<a><b></a></b>")]
    #[case::unclosed("<a><b>text</b>")]
    #[case::two_roots("<a/><b/>")]
    #[case::stray_text("<a/>trailing")]
    #[case::empty("")]
    #[case::not_xml("just some text")]
    fn rejects_malformed_documents(#[case] xml: &str) {
        assert!(lwc_bundle_metadata(xml).is_err(), "accepted {xml:?}");
    }
}
