//! Custom document properties and key/value lists
//!
//! Custom properties end up in the `docProps/custom.xml` part, in the order they were set.
//!
//! # Example
//!
//! ```rust
//! use sheetwright_core::{CustomProperties, DateTime};
//!
//! let mut props = CustomProperties::new();
//! props.set_string("Checked by", "Eve").unwrap();
//! props.set_datetime("Date completed", DateTime::date(2016, 12, 12)).unwrap();
//! props.set_integer("Document number", 12345).unwrap();
//! props.set_boolean("Has review", false).unwrap();
//!
//! assert_eq!(props.len(), 4);
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::datetime::DateTime;
use crate::diagnostics::{default_reporter, report_warning, Reporter};
use crate::error::{ErrorCode, Result};
use crate::limits::LengthLimit;

/// Value kinds a custom property can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    String,
    Double,
    Integer,
    Boolean,
    DateTime,
}

impl PropertyKind {
    /// Variant-type element used for this kind in the custom properties part
    pub fn vt_tag(self) -> &'static str {
        match self {
            PropertyKind::String => "vt:lpwstr",
            PropertyKind::Double => "vt:r8",
            PropertyKind::Integer => "vt:i4",
            PropertyKind::Boolean => "vt:bool",
            PropertyKind::DateTime => "vt:filetime",
        }
    }
}

/// The value of a custom property
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PropertyValue {
    String(String),
    Double(f64),
    Integer(i32),
    Boolean(bool),
    DateTime(DateTime),
}

impl PropertyValue {
    /// Kind tag of the value
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::String(_) => PropertyKind::String,
            PropertyValue::Double(_) => PropertyKind::Double,
            PropertyValue::Integer(_) => PropertyKind::Integer,
            PropertyValue::Boolean(_) => PropertyKind::Boolean,
            PropertyValue::DateTime(_) => PropertyKind::DateTime,
        }
    }

    /// The text of a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value; integers widen to `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Double(n) => Some(*n),
            PropertyValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integer value, without conversion from doubles
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as boolean if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as a date/time if this is one
    pub fn as_datetime(&self) -> Option<&DateTime> {
        match self {
            PropertyValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

/// Text as written inside the variant-type element
impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => f.write_str(s),
            PropertyValue::Double(n) => write!(f, "{n}"),
            PropertyValue::Integer(i) => write!(f, "{i}"),
            PropertyValue::Boolean(b) => write!(f, "{b}"),
            PropertyValue::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        PropertyValue::Double(n)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<DateTime> for PropertyValue {
    fn from(dt: DateTime) -> Self {
        PropertyValue::DateTime(dt)
    }
}

/// A named, typed document property
///
/// Deserialized properties go through [`CustomProperty::new`], so the limits hold for them too.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCustomProperty"))]
pub struct CustomProperty {
    name: String,
    value: PropertyValue,
}

/// Unchecked wire form of [`CustomProperty`]
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawCustomProperty {
    name: String,
    value: PropertyValue,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCustomProperty> for CustomProperty {
    type Error = ErrorCode;

    fn try_from(raw: RawCustomProperty) -> Result<Self> {
        CustomProperty::new(raw.name, raw.value)
    }
}

impl CustomProperty {
    /// Validate and build a property
    ///
    /// The name must be non-empty and at most 255 characters; string values are held to the
    /// same 255-character limit.
    ///
    /// ```
    /// use sheetwright_core::{CustomProperty, ErrorCode, PropertyKind};
    ///
    /// let prop = CustomProperty::new("Author", "Jane").unwrap();
    /// assert_eq!(prop.kind(), PropertyKind::String);
    ///
    /// assert_eq!(CustomProperty::new("", 1), Err(ErrorCode::ParameterIsEmpty));
    /// ```
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Result<Self> {
        let name = name.into();
        let value = value.into();
        Self::validate(&name, &value).map_err(|(_, code)| code)?;
        Ok(Self { name, value })
    }

    /// Check a name/value pair, naming the offending parameter on failure
    fn validate(
        name: &str,
        value: &PropertyValue,
    ) -> std::result::Result<(), (&'static str, ErrorCode)> {
        if name.is_empty() {
            return Err(("name", ErrorCode::ParameterIsEmpty));
        }
        LengthLimit::Chars255
            .check(name)
            .map_err(|code| ("name", code))?;

        if let PropertyValue::String(s) = value {
            LengthLimit::Chars255
                .check(s)
                .map_err(|code| ("value", code))?;
        }
        Ok(())
    }

    /// Property name as written to the document
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Typed value
    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    /// Shorthand for `self.value().kind()`
    pub fn kind(&self) -> PropertyKind {
        self.value.kind()
    }
}

/// Custom properties of one document, in insertion order
///
/// Names are not deduplicated: setting the same name twice keeps both entries, and each is
/// written out. [`CustomProperties::get`] returns the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomProperties {
    properties: Vec<CustomProperty>,
}

impl CustomProperties {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property, reporting failures to the default reporter
    pub fn set(&mut self, name: &str, value: impl Into<PropertyValue>) -> Result<()> {
        self.set_with_reporter(name, value, default_reporter())
    }

    /// Add a property, reporting failures to `reporter`
    ///
    /// On failure nothing is added.
    pub fn set_with_reporter(
        &mut self,
        name: &str,
        value: impl Into<PropertyValue>,
        reporter: &dyn Reporter,
    ) -> Result<()> {
        let value = value.into();

        if let Err((param, code)) = CustomProperty::validate(name, &value) {
            let function = setter_name(value.kind());
            let message = match code {
                ErrorCode::ParameterIsEmpty => {
                    format!("{function}(): parameter '{param}' cannot be empty.")
                }
                _ => format!(
                    "{function}(): parameter '{param}' exceeds Excel length limit of {}.",
                    LengthLimit::Chars255.chars()
                ),
            };
            report_warning(reporter, &message);
            return Err(code);
        }

        self.properties.push(CustomProperty {
            name: name.to_string(),
            value,
        });
        Ok(())
    }

    pub fn set_string(&mut self, name: &str, value: &str) -> Result<()> {
        self.set(name, value)
    }

    pub fn set_number(&mut self, name: &str, value: f64) -> Result<()> {
        self.set(name, value)
    }

    pub fn set_integer(&mut self, name: &str, value: i32) -> Result<()> {
        self.set(name, value)
    }

    pub fn set_boolean(&mut self, name: &str, value: bool) -> Result<()> {
        self.set(name, value)
    }

    pub fn set_datetime(&mut self, name: &str, value: DateTime) -> Result<()> {
        self.set(name, value)
    }

    /// Append an already validated property
    pub fn push(&mut self, property: CustomProperty) {
        self.properties.push(property);
    }

    /// First property with exactly this name
    pub fn get(&self, name: &str) -> Option<&CustomProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CustomProperty> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<'a> IntoIterator for &'a CustomProperties {
    type Item = &'a CustomProperty;
    type IntoIter = std::slice::Iter<'a, CustomProperty>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

fn setter_name(kind: PropertyKind) -> &'static str {
    match kind {
        PropertyKind::String => "set_custom_property_string",
        PropertyKind::Double => "set_custom_property_number",
        PropertyKind::Integer => "set_custom_property_integer",
        PropertyKind::Boolean => "set_custom_property_boolean",
        PropertyKind::DateTime => "set_custom_property_datetime",
    }
}

/// A string key/value pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    /// Create a pair
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered list of key/value pairs; keys may repeat
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueList {
    entries: Vec<KeyValue>,
}

impl KeyValueList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(KeyValue::new(key, value));
    }

    /// Value of the first pair with this key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|kv| kv.key == key)
            .map(|kv| kv.value.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeyValue> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a KeyValueList {
    type Item = &'a KeyValue;
    type IntoIter = std::slice::Iter<'a, KeyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyValueList {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| KeyValue::new(k, v))
                .collect(),
        }
    }
}
