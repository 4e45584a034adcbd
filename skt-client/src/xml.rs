//! XML → JSON conversion for SOAP responses.
//!
//! The mapping keeps the shape the response types expect:
//!
//! - the document is an object keyed by the root element's local name
//! - namespace prefixes are dropped (`soap:Envelope` → `Envelope`)
//! - a repeated child becomes an array, a single child a bare value
//! - an element with only text becomes a string, an empty element `null`
//! - attributes become `_name` keys; text next to children or attributes
//!   goes under `__text`
//! - `xmlns` declarations are skipped

use quick_xml::Reader;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

/// Errors converting an XML document.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("unbalanced element <{0}>")]
    UnbalancedTag(String),

    #[error("document has no root element")]
    Empty,
}

/// An element whose end tag has not been read yet.
#[derive(Debug, Default)]
struct OpenElement {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl OpenElement {
    fn start(e: &BytesStart<'_>) -> Result<Self, XmlError> {
        let mut attributes = Map::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = attr.key;
            if key.as_ref() == b"xmlns" || key.prefix().is_some_and(|p| p.as_ref() == b"xmlns") {
                continue;
            }
            let name = String::from_utf8_lossy(key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.insert(format!("_{name}"), Value::String(value));
        }

        Ok(Self {
            name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
            attributes,
            ..Self::default()
        })
    }

    fn add_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }

    fn into_value(self) -> (String, Value) {
        let value = if self.children.is_empty() && self.attributes.is_empty() {
            if self.text.is_empty() {
                Value::Null
            } else {
                Value::String(self.text)
            }
        } else {
            let mut map = self.attributes;
            map.extend(self.children);
            if !self.text.is_empty() {
                map.insert("__text".to_string(), Value::String(self.text));
            }
            Value::Object(map)
        };
        (self.name, value)
    }
}

/// Convert an XML document to JSON.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use skt_client::xml::to_json;
///
/// let value = to_json("<a:Root xmlns:a=\"urn:x\"><Item>1</Item><Item>2</Item><One/></a:Root>").unwrap();
/// assert_eq!(value, json!({"Root": {"Item": ["1", "2"], "One": null}}));
/// ```
pub fn to_json(xml: &str) -> Result<Value, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<(String, Value)> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => stack.push(OpenElement::start(&e)?),
            Event::Empty(e) => {
                let (name, value) = OpenElement::start(&e)?.into_value();
                close(&mut stack, &mut root, name, value)?;
            }
            Event::End(e) => {
                let element = stack.pop().ok_or_else(|| {
                    XmlError::UnbalancedTag(String::from_utf8_lossy(e.local_name().as_ref()).into_owned())
                })?;
                let (name, value) = element.into_value();
                close(&mut stack, &mut root, name, value)?;
            }
            Event::Text(e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::UnbalancedTag(open.name));
    }

    let (name, value) = root.ok_or(XmlError::Empty)?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

fn close(
    stack: &mut [OpenElement],
    root: &mut Option<(String, Value)>,
    name: String,
    value: Value,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.add_child(name, value),
        None if root.is_none() => *root = Some((name, value)),
        None => return Err(XmlError::UnbalancedTag(name)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const STATIONS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <soap:Body>
    <GetStartEndPointResponse xmlns="http://www.etis.fskab.se/v1.0/ETISws">
      <GetStartEndPointResult>
        <Code>0</Code>
        <Message />
        <StartPoints>
          <Point>
            <Id>80000</Id>
            <Name>Malmö C</Name>
            <Type>STOP_AREA</Type>
            <X>6167930</X>
            <Y>1323215</Y>
          </Point>
        </StartPoints>
      </GetStartEndPointResult>
    </GetStartEndPointResponse>
  </soap:Body>
</soap:Envelope>"#;

    #[test]
    fn soap_envelope() {
        let value = to_json(STATIONS).unwrap();
        let result = &value["Envelope"]["Body"]["GetStartEndPointResponse"]["GetStartEndPointResult"];

        assert_eq!(result["Code"], json!("0"));
        assert_eq!(result["Message"], Value::Null);
        assert_eq!(
            result["StartPoints"]["Point"],
            json!({
                "Id": "80000",
                "Name": "Malmö C",
                "Type": "STOP_AREA",
                "X": "6167930",
                "Y": "1323215"
            })
        );
    }

    #[test]
    fn repeated_children_become_array() {
        let value = to_json("<L><P>a</P><Q>x</Q><P>b</P><P>c</P></L>").unwrap();
        assert_eq!(value, json!({"L": {"P": ["a", "b", "c"], "Q": "x"}}));
    }

    #[test]
    fn attributes_and_text() {
        let value = to_json(r#"<Name lang="sv" xml:space="keep">Lund &amp; Malmö</Name>"#).unwrap();
        assert_eq!(
            value,
            json!({"Name": {"_lang": "sv", "_space": "keep", "__text": "Lund & Malmö"}})
        );
    }

    #[test]
    fn cdata_is_text() {
        let value = to_json("<D><Details><![CDATA[Buss <ersätter> tåg]]></Details></D>").unwrap();
        assert_eq!(value, json!({"D": {"Details": "Buss <ersätter> tåg"}}));
    }

    #[test]
    fn empty_document() {
        assert!(matches!(to_json(""), Err(XmlError::Empty)));
        assert!(matches!(
            to_json("<?xml version=\"1.0\"?>"),
            Err(XmlError::Empty)
        ));
    }

    #[test]
    fn unclosed_element() {
        assert!(to_json("<A><B>1</B>").is_err());
    }

    #[test]
    fn mismatched_end_tag() {
        assert!(to_json("<A><B>1</C></A>").is_err());
    }
}
