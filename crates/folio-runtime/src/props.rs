//! Component properties carried by mount placeholders.
//!
//! Props travel as a JSON object embedded in the placeholder element. The
//! runtime never interprets them; it parses the object, hands it to the
//! matched constructor untouched, and lets the component pick out what it
//! needs.

use serde_json::{Map, Value};

/// An opaque bag of component properties.
///
/// Keys are ordered, so rendered output is deterministic for a given bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props(Map<String, Value>);

impl Props {
    /// Create an empty property bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object into props.
    ///
    /// Blank input is the empty bag. Anything other than a JSON object is
    /// rejected.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::new());
        }
        let map: Map<String, Value> = serde_json::from_str(raw)?;
        Ok(Self(map))
    }

    /// Look up a raw value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a string value.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Look up a boolean value.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Insert a value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// The bag as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Render entries as HTML attributes, skipping the listed keys.
    ///
    /// Strings and numbers become quoted attributes, `true` becomes a bare
    /// attribute, `false` and `null` are dropped, and structured values are
    /// embedded as escaped JSON. The result carries a leading space when
    /// non-empty so it can be spliced directly after a tag name.
    pub fn to_attributes(&self, skip: &[&str]) -> String {
        let mut attrs = Vec::new();

        for (key, value) in &self.0 {
            if skip.contains(&key.as_str()) {
                continue;
            }
            match value {
                Value::String(s) => {
                    attrs.push(format!(r#"{}="{}""#, key, html_escape(s)));
                }
                Value::Bool(true) => {
                    attrs.push(key.clone());
                }
                Value::Bool(false) | Value::Null => {}
                Value::Number(n) => {
                    attrs.push(format!(r#"{}="{}""#, key, n));
                }
                structured => {
                    let json = serde_json::to_string(structured).unwrap_or_default();
                    attrs.push(format!(r#"{}="{}""#, key, html_escape(&json)));
                }
            }
        }

        if attrs.is_empty() {
            String::new()
        } else {
            format!(" {}", attrs.join(" "))
        }
    }
}

impl From<Map<String, Value>> for Props {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Escape HTML special characters including single quotes for XSS prevention.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_json_objects() {
        let props = Props::parse(r#"{"label": "Search", "limit": 5}"#).unwrap();

        assert_eq!(props.str("label"), Some("Search"));
        assert_eq!(props.get("limit"), Some(&Value::from(5)));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn blank_input_is_the_empty_bag() {
        assert_eq!(Props::parse("").unwrap(), Props::new());
        assert_eq!(Props::parse("  \n ").unwrap(), Props::new());
    }

    #[test]
    fn rejects_non_object_json() {
        assert!(Props::parse("[1, 2]").is_err());
        assert!(Props::parse(r#""just a string""#).is_err());
        assert!(Props::parse("{not json").is_err());
    }

    #[test]
    fn renders_attributes_in_key_order() {
        let props = Props::parse(r#"{"zeta": "z", "alpha": "a"}"#).unwrap();

        assert_eq!(props.to_attributes(&[]), r#" alpha="a" zeta="z""#);
    }

    #[test]
    fn attribute_rendering_follows_value_kind() {
        let props = Props::parse(
            r#"{"open": true, "hidden": false, "note": null, "count": 3, "title": "a<b"}"#,
        )
        .unwrap();

        assert_eq!(
            props.to_attributes(&[]),
            r#" count="3" open title="a&lt;b""#
        );
    }

    #[test]
    fn structured_values_embed_as_escaped_json() {
        let props = Props::parse(r#"{"tabs": ["one", "two"]}"#).unwrap();

        assert_eq!(
            props.to_attributes(&[]),
            r#" tabs="[&quot;one&quot;,&quot;two&quot;]""#
        );
    }

    #[test]
    fn skip_list_drops_keys() {
        let props = Props::parse(r#"{"prev": "x", "title": "y"}"#).unwrap();

        assert_eq!(props.to_attributes(&["prev"]), r#" title="y""#);
    }
}
