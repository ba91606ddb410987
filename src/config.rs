//! Hierarchical configuration value object.
//!
//! A [`Configuration`] is a typed tree node with a name, an ordered list of
//! attributes, and an ordered list of child nodes. It is built once per
//! generation request, either programmatically or from an already-parsed
//! `serde_json::Value`, and only read afterwards. Every accessor has a
//! default-taking form that returns the default verbatim when the key is
//! absent; the plain form fails with [`Error::MissingKey`].
//!
//! Length attributes accept a unit suffix (`mm`, `cm`, `pt`, `in`); a bare
//! number is taken as millimeters.

use crate::error::{Error, Result};

/// An immutable-after-build configuration tree node.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Configuration>,
}

impl Configuration {
    /// Create an empty node with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Build a configuration tree from a parsed JSON value.
    ///
    /// Objects become child nodes, scalar members become attributes, and
    /// arrays become repeated same-named children.
    pub fn from_json_value(name: impl Into<String>, value: &serde_json::Value) -> Result<Self> {
        let mut node = Configuration::new(name);
        let obj = value.as_object().ok_or_else(|| {
            Error::Configuration("configuration root must be a JSON object".to_string())
        })?;
        for (key, member) in obj {
            match member {
                serde_json::Value::Object(_) => {
                    node.children
                        .push(Configuration::from_json_value(key.clone(), member)?);
                }
                serde_json::Value::Array(items) => {
                    for item in items {
                        node.children
                            .push(Configuration::from_json_value(key.clone(), item)?);
                    }
                }
                serde_json::Value::String(s) => node.attributes.push((key.clone(), s.clone())),
                serde_json::Value::Number(n) => {
                    node.attributes.push((key.clone(), n.to_string()));
                }
                serde_json::Value::Bool(b) => {
                    node.attributes.push((key.clone(), b.to_string()));
                }
                serde_json::Value::Null => {}
            }
        }
        Ok(node)
    }

    /// Build a configuration tree from a JSON string.
    pub fn from_json_str(name: impl Into<String>, json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| Error::Configuration(format!("invalid configuration JSON: {e}")))?;
        Self::from_json_value(name, &value)
    }

    /// Node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an attribute during construction, replacing any existing value
    /// for the same key.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.attributes.retain(|(k, _)| *k != key);
        self.attributes.push((key, value.into()));
        self
    }

    /// Add a child node during construction.
    pub fn with_child(mut self, child: Configuration) -> Self {
        self.children.push(child);
        self
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&Configuration> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given name, in document order.
    pub fn children(&self, name: &str) -> Vec<&Configuration> {
        self.children.iter().filter(|c| c.name == name).collect()
    }

    /// Raw attribute value; fails when absent.
    pub fn attribute(&self, key: &str) -> Result<&str> {
        self.attribute_opt(key)
            .ok_or_else(|| Error::MissingKey(key.to_string()))
    }

    /// Raw attribute value, or `default` verbatim when absent.
    pub fn attribute_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.attribute_opt(key).unwrap_or(default)
    }

    /// Float attribute; fails when absent or malformed.
    pub fn float(&self, key: &str) -> Result<f64> {
        let raw = self.attribute(key)?;
        parse_float(key, raw)
    }

    /// Float attribute, or `default` verbatim when absent.
    pub fn float_or(&self, key: &str, default: f64) -> Result<f64> {
        match self.attribute_opt(key) {
            Some(raw) => parse_float(key, raw),
            None => Ok(default),
        }
    }

    /// Integer attribute; fails when absent or malformed.
    pub fn integer(&self, key: &str) -> Result<i64> {
        let raw = self.attribute(key)?;
        raw.trim()
            .parse::<i64>()
            .map_err(|_| Error::Configuration(format!("key {key}: invalid integer {raw:?}")))
    }

    /// Integer attribute, or `default` verbatim when absent.
    pub fn integer_or(&self, key: &str, default: i64) -> Result<i64> {
        match self.attribute_opt(key) {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| Error::Configuration(format!("key {key}: invalid integer {raw:?}"))),
            None => Ok(default),
        }
    }

    /// Boolean attribute (`true`/`false`), or `default` verbatim when absent.
    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool> {
        match self.attribute_opt(key) {
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(other) => Err(Error::Configuration(format!(
                "key {key}: invalid boolean {other:?}"
            ))),
            None => Ok(default),
        }
    }

    /// Length attribute in millimeters; fails when absent or malformed.
    pub fn length(&self, key: &str) -> Result<f64> {
        let raw = self.attribute(key)?;
        parse_length(key, raw)
    }

    /// Length attribute in millimeters, or `default` verbatim when absent.
    pub fn length_or(&self, key: &str, default: f64) -> Result<f64> {
        match self.attribute_opt(key) {
            Some(raw) => parse_length(key, raw),
            None => Ok(default),
        }
    }

    fn attribute_opt(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn parse_float(key: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| Error::Configuration(format!("key {key}: invalid number {raw:?}")))
}

/// Parse a length value with an optional unit suffix into millimeters.
fn parse_length(key: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let (number, factor) = if let Some(v) = trimmed.strip_suffix("mm") {
        (v, 1.0)
    } else if let Some(v) = trimmed.strip_suffix("cm") {
        (v, 10.0)
    } else if let Some(v) = trimmed.strip_suffix("pt") {
        (v, 25.4 / 72.0)
    } else if let Some(v) = trimmed.strip_suffix("in") {
        (v, 25.4)
    } else {
        (trimmed, 1.0)
    };
    let value = number
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::Configuration(format!("key {key}: invalid length {raw:?}")))?;
    if value < 0.0 {
        return Err(Error::Configuration(format!(
            "key {key}: negative length {raw:?}"
        )));
    }
    Ok(value * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_returned_verbatim() {
        let cfg = Configuration::new("barcode");
        assert_eq!(cfg.attribute_or("checksum", "auto"), "auto");
        assert_eq!(cfg.float_or("wide-factor", 2.5).unwrap(), 2.5);
        // Defaults are not re-validated: a negative default passes through.
        assert_eq!(cfg.length_or("height", -1.0).unwrap(), -1.0);
    }

    #[test]
    fn test_missing_key_fails_without_default() {
        let cfg = Configuration::new("barcode");
        assert!(matches!(
            cfg.attribute("module-width"),
            Err(Error::MissingKey(_))
        ));
    }

    #[test]
    fn test_length_units() {
        let cfg = Configuration::new("barcode")
            .with_attribute("a", "0.33")
            .with_attribute("b", "1cm")
            .with_attribute("c", "72pt")
            .with_attribute("d", "1in");
        assert!((cfg.length("a").unwrap() - 0.33).abs() < 1e-9);
        assert_eq!(cfg.length("b").unwrap(), 10.0);
        assert!((cfg.length("c").unwrap() - 25.4).abs() < 1e-9);
        assert_eq!(cfg.length("d").unwrap(), 25.4);
        assert!(cfg.length("missing").is_err());
    }

    #[test]
    fn test_from_json() {
        let cfg = Configuration::from_json_str(
            "barcode",
            r#"{
                "module-width": "0.21mm",
                "checksum": "add",
                "human-readable": { "placement": "bottom", "font-size": "8pt" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.attribute("checksum").unwrap(), "add");
        assert!((cfg.length("module-width").unwrap() - 0.21).abs() < 1e-9);
        let hr = cfg.child("human-readable").unwrap();
        assert_eq!(hr.attribute("placement").unwrap(), "bottom");
    }

    #[test]
    fn test_same_named_children_grouped() {
        let cfg = Configuration::new("root")
            .with_child(Configuration::new("item").with_attribute("v", "1"))
            .with_child(Configuration::new("other"))
            .with_child(Configuration::new("item").with_attribute("v", "2"));
        let items = cfg.children("item");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].attribute("v").unwrap(), "2");
    }
}
