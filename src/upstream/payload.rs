use serde_json::{Map, Value};

/// Upstream response body, read defensively.
///
/// The backend wraps results as `{ message, data }`, but any part of that can
/// be missing or of the wrong shape. Accessors never fail: a missing object
/// reads as an empty [`Section`], a missing list reads as an empty slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    body: Value,
}

impl Payload {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Non-JSON bodies (HTML error pages, empty 204s) become an empty payload.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(serde_json::from_slice(bytes).unwrap_or(Value::Null))
    }

    pub fn raw(&self) -> &Value {
        &self.body
    }

    pub fn message(&self) -> Option<&str> {
        non_empty_str(self.body.get("message"))
    }

    pub fn error(&self) -> Option<&str> {
        non_empty_str(self.body.get("error"))
    }

    pub fn data_value(&self) -> Option<&Value> {
        self.body.get("data").filter(|v| !v.is_null())
    }

    /// `data` as an object.
    pub fn data(&self) -> Section<'_> {
        Section::of(self.body.get("data"))
    }

    /// `data` as a list.
    pub fn data_list(&self) -> &[Value] {
        as_list(self.body.get("data"))
    }

    /// `data` as a list, or `data[key]` when the backend nests the list.
    pub fn data_list_or(&self, key: &str) -> &[Value] {
        match self.body.get("data") {
            Some(Value::Array(items)) => items.as_slice(),
            other => Section::of(other).list(key),
        }
    }
}

/// A JSON object that may be absent. Reads through a missing section yield
/// more missing sections, empty lists and `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Section<'a>(Option<&'a Map<String, Value>>);

impl<'a> Section<'a> {
    pub fn of(value: Option<&'a Value>) -> Self {
        Self(value.and_then(Value::as_object))
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    /// Present and not null.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.and_then(|map| map.get(key)).filter(|v| !v.is_null())
    }

    pub fn section(&self, key: &str) -> Section<'a> {
        Section::of(self.get(key))
    }

    pub fn list(&self, key: &str) -> &'a [Value] {
        as_list(self.get(key))
    }

    pub fn str(&self, key: &str) -> Option<&'a str> {
        non_empty_str(self.get(key))
    }

    /// First key holding a truthy value, in order. Zero, empty strings and
    /// `false` are skipped, as the console has always treated them as absent.
    pub fn first_truthy(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().filter_map(|k| self.get(k)).find(|v| is_truthy(v))
    }

    /// The object itself, or `{}` when missing.
    pub fn to_value(&self) -> Value {
        self.0.cloned().map(Value::Object).unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// The object itself, or `fallback` when missing.
    pub fn to_value_or(&self, fallback: Value) -> Value {
        self.0.cloned().map(Value::Object).unwrap_or(fallback)
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn as_list(value: Option<&Value>) -> &[Value] {
    value.and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_data_wrapper_reads_as_empty() {
        let payload = Payload::new(json!({ "message": "ok" }));
        assert!(payload.data().is_missing());
        assert!(payload.data_list().is_empty());
        assert_eq!(payload.data().to_value(), json!({}));
        assert_eq!(payload.message(), Some("ok"));
    }

    #[test]
    fn non_array_where_list_expected_is_empty() {
        let payload = Payload::new(json!({ "data": { "drivers": "oops" } }));
        assert!(payload.data().list("drivers").is_empty());
        assert!(payload.data_list().is_empty());
    }

    #[test]
    fn nested_sections_degrade() {
        let payload = Payload::new(json!({ "data": { "overview": null, "users": 3 } }));
        let data = payload.data();
        assert!(data.section("overview").is_missing());
        assert!(data.section("users").is_missing());
        assert!(data.section("nope").section("deeper").list("x").is_empty());
    }

    #[test]
    fn non_json_body_is_empty_payload() {
        let payload = Payload::from_bytes(b"<html>bad gateway</html>");
        assert_eq!(payload.raw(), &Value::Null);
        assert!(payload.message().is_none());
        assert!(payload.data().is_missing());
    }

    #[test]
    fn data_list_or_accepts_both_shapes() {
        let flat = Payload::new(json!({ "data": [{ "id": 1 }] }));
        assert_eq!(flat.data_list_or("drivers").len(), 1);

        let nested = Payload::new(json!({ "data": { "drivers": [{ "id": 1 }, { "id": 2 }] } }));
        assert_eq!(nested.data_list_or("drivers").len(), 2);
    }

    #[test]
    fn first_truthy_skips_zero_and_empty() {
        let payload = Payload::new(json!({ "data": { "totalDrivers": 0, "total": 12 } }));
        assert_eq!(
            payload.data().first_truthy(&["totalDrivers", "total"]),
            Some(&json!(12))
        );
    }

    #[test]
    fn blank_message_is_ignored() {
        let payload = Payload::new(json!({ "message": "  ", "error": "Forbidden" }));
        assert_eq!(payload.message(), None);
        assert_eq!(payload.error(), Some("Forbidden"));
    }
}
