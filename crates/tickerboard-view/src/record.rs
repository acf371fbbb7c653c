use serde_json::{Map, Number, Value};

/// A flat record as sent by the backend proxy: field name to scalar value.
///
/// Fields enumerate the way a browser enumerates object keys: integer-like
/// keys (`"0"`, `"17"`, but not `"07"`) first in ascending order, then every
/// other key in the order the proxy serialized them. The latter relies on
/// `serde_json`'s `preserve_order` feature.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Accepts only JSON objects.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Removes a field, handing back its raw value.
    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// The text of a field, if present.
    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).map(coerce)
    }

    /// Fields in record order, values already coerced to text.
    pub fn entries(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        let (mut indices, named): (Vec<_>, Vec<_>) =
            self.0.iter().partition(|(key, _)| array_index(key).is_some());
        indices.sort_by_key(|(key, _)| array_index(key));

        indices
            .into_iter()
            .chain(named)
            .map(|(key, value)| (key.as_str(), coerce(value)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// String coercion of a JSON value, matching what a browser prints when the
/// value is interpolated into text.
pub fn coerce(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        // nested nulls collapse to empty strings inside a joined array
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

// every JSON number is a double once it reaches the browser, integers included
fn number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) => ryu_js::Buffer::new().format(f).to_string(),
        None => n.to_string(),
    }
}

/// Keys a browser treats as array indices: canonical decimal integers below
/// `2^32 - 1`.
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty()
        || (key.len() > 1 && key.starts_with('0'))
        || !key.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    key.parse::<u32>().ok().filter(|index| *index != u32::MAX)
}
