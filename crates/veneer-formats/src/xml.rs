//! XML response bodies.
//!
//! Documents are written event by event rather than through serde, because
//! the element names are derived, not declared: keys are hyphenated
//! (`first_name` becomes `<first-name>`), array items are tagged with the
//! singular of their container's key (`<users><user>..`), and `null`
//! values become empty elements with a `nil="true"` attribute.
//!
//! The root element is taken from the document itself when it is an object
//! with exactly one key (the usual shape after root-node wrapping);
//! anything else gets a generic wrapper so the output is always a single
//! well-formed tree.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;
use veneer::naming::{BasicInflector, NamingStrategy};

use crate::FormatError;

/// Root element used when the document does not carry its own root key.
const FALLBACK_ROOT: &str = "response";

/// Item element used for arrays whose singular cannot be derived from a
/// surrounding key.
const FALLBACK_ITEM: &str = "record";

static DEFAULT_NAMING: BasicInflector = BasicInflector;

/// Writes documents as XML.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use veneer_formats::xml::XmlAdapter;
///
/// let doc = json!({"user": {"first_name": "Han"}});
/// let out = XmlAdapter::new().to_string(&doc).unwrap();
/// assert_eq!(
///     out,
///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
///      <user><first-name>Han</first-name></user>"
/// );
/// ```
pub struct XmlAdapter<'a> {
    naming: &'a dyn NamingStrategy,
    declaration: bool,
}

impl Default for XmlAdapter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> XmlAdapter<'a> {
    /// Creates an adapter with the regular-English naming strategy and an
    /// XML declaration.
    pub fn new() -> Self {
        Self {
            naming: &DEFAULT_NAMING,
            declaration: true,
        }
    }

    /// Swaps in a custom naming strategy for tag derivation.
    pub fn with_naming(mut self, naming: &'a dyn NamingStrategy) -> Self {
        self.naming = naming;
        self
    }

    /// Omits the leading `<?xml ..?>` declaration.
    pub fn without_declaration(mut self) -> Self {
        self.declaration = false;
        self
    }

    /// Serializes a document to an XML string.
    pub fn to_string(&self, doc: &Value) -> Result<String, FormatError> {
        let mut writer = Writer::new(Vec::new());

        if self.declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
                .map_err(|e| FormatError::Xml(e.to_string()))?;
        }

        match doc {
            // The post-wrapping shape: a single root key becomes the root
            // element directly.
            Value::Object(map) if map.len() == 1 => {
                let (key, value) = map.iter().next().ok_or_else(|| {
                    FormatError::Xml("empty single-key object".to_string())
                })?;
                self.write_value(&mut writer, key, value)?;
            }
            other => {
                self.write_value(&mut writer, FALLBACK_ROOT, other)?;
            }
        }

        String::from_utf8(writer.into_inner()).map_err(|e| FormatError::Xml(e.to_string()))
    }

    fn write_value(
        &self,
        writer: &mut Writer<Vec<u8>>,
        key: &str,
        value: &Value,
    ) -> Result<(), FormatError> {
        let tag = self.naming.xml_tag(key);

        match value {
            Value::Null => {
                let mut start = BytesStart::new(tag.as_str());
                start.push_attribute(("nil", "true"));
                writer
                    .write_event(Event::Empty(start))
                    .map_err(|e| FormatError::Xml(e.to_string()))?;
            }
            Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                writer
                    .write_event(Event::Start(BytesStart::new(tag.as_str())))
                    .map_err(|e| FormatError::Xml(e.to_string()))?;
                writer
                    .write_event(Event::Text(BytesText::new(&text)))
                    .map_err(|e| FormatError::Xml(e.to_string()))?;
                writer
                    .write_event(Event::End(BytesEnd::new(tag.as_str())))
                    .map_err(|e| FormatError::Xml(e.to_string()))?;
            }
            Value::Array(items) => {
                writer
                    .write_event(Event::Start(BytesStart::new(tag.as_str())))
                    .map_err(|e| FormatError::Xml(e.to_string()))?;
                let item_key = if key == FALLBACK_ROOT {
                    FALLBACK_ITEM.to_string()
                } else {
                    self.naming.item_tag(key)
                };
                for item in items {
                    self.write_value(writer, &item_key, item)?;
                }
                writer
                    .write_event(Event::End(BytesEnd::new(tag.as_str())))
                    .map_err(|e| FormatError::Xml(e.to_string()))?;
            }
            Value::Object(map) => {
                writer
                    .write_event(Event::Start(BytesStart::new(tag.as_str())))
                    .map_err(|e| FormatError::Xml(e.to_string()))?;
                for (child_key, child) in map {
                    self.write_value(writer, child_key, child)?;
                }
                writer
                    .write_event(Event::End(BytesEnd::new(tag.as_str())))
                    .map_err(|e| FormatError::Xml(e.to_string()))?;
            }
        }
        Ok(())
    }
}
