//! The [`Record`] trait: how the engine reads a row.
//!
//! Rows are caller-owned and never mutated. Every column that names a source
//! field reads it through [`Record::field`].

use std::borrow::Cow;

use crate::value::{Number, Value};

/// Trait for row types that expose named fields to the engine.
///
/// This trait is typically derived using `#[derive(Record)]`, but can also be
/// implemented manually.
///
/// # Derive Usage
///
/// ```ignore
/// use rowscope::Record;
///
/// #[derive(Record)]
/// struct Attendance {
///     #[field(String)]
///     name: String,
///     #[field(Number, rename = "totalHours")]
///     total_hours: Option<f64>,
///     #[field(Display)]
///     status: Status,
/// }
///
/// assert_eq!(Attendance::TOTAL_HOURS, "totalHours");
/// ```
///
/// # Manual Implementation
///
/// ```
/// use rowscope::{Number, Record, Value};
///
/// struct Employee {
///     name: String,
///     age: u8,
/// }
///
/// impl Record for Employee {
///     fn field(&self, name: &str) -> Value<'_> {
///         match name {
///             "name" => Value::str(&self.name),
///             "age" => Value::Number(Number::from(self.age)),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of a field, or [`Value::None`] if the field doesn't
    /// exist or is empty for this row.
    fn field(&self, name: &str) -> Value<'_>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Value<'_> {
        (**self).field(name)
    }
}

/// Untyped JSON objects work as rows: keys are field names.
impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Value<'_> {
        self.get(name).map(json_value).unwrap_or(Value::None)
    }
}

/// A JSON value is a row only when it is an object; anything else has no fields.
impl Record for serde_json::Value {
    fn field(&self, name: &str) -> Value<'_> {
        match self {
            serde_json::Value::Object(map) => map.field(name),
            _ => Value::None,
        }
    }
}

fn json_value(value: &serde_json::Value) -> Value<'_> {
    use serde_json::Value as Json;

    match value {
        Json::Null => Value::None,
        Json::Bool(b) => Value::Bool(*b),
        Json::String(s) => Value::str(s),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(Number::I64(i))
            } else if let Some(u) = n.as_u64() {
                Value::Number(Number::U64(u))
            } else {
                n.as_f64()
                    .map(|f| Value::Number(Number::F64(f)))
                    .unwrap_or(Value::None)
            }
        }
        // Nested structures are matched on their compact JSON text.
        Json::Array(_) | Json::Object(_) => Value::String(Cow::Owned(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Employee {
        name: String,
        age: u8,
    }

    impl Record for Employee {
        fn field(&self, name: &str) -> Value<'_> {
            match name {
                "name" => Value::str(&self.name),
                "age" => Value::Number(Number::from(self.age)),
                _ => Value::None,
            }
        }
    }

    #[test]
    fn manual_impl() {
        let emp = Employee {
            name: "Diya Sharma".to_string(),
            age: 29,
        };

        assert_eq!(emp.field("name"), Value::str("Diya Sharma"));
        assert_eq!(emp.field("age"), Value::Number(Number::U64(29)));
        assert_eq!(emp.field("unknown"), Value::None);
        assert_eq!((&emp).field("name").to_text(), "Diya Sharma");
    }

    #[test]
    fn json_rows() {
        let row = json!({
            "name": "Kabir",
            "hours": 7.5,
            "days": 3,
            "remote": true,
            "notes": null,
            "tags": ["a", "b"]
        });

        assert_eq!(row.field("name"), Value::str("Kabir"));
        assert_eq!(row.field("hours"), Value::Number(Number::F64(7.5)));
        assert_eq!(row.field("days"), Value::Number(Number::I64(3)));
        assert_eq!(row.field("remote"), Value::Bool(true));
        assert_eq!(row.field("notes"), Value::None);
        assert_eq!(row.field("missing"), Value::None);
        assert_eq!(row.field("tags").to_text(), r#"["a","b"]"#);
    }

    #[test]
    fn non_object_json_has_no_fields() {
        assert_eq!(json!([1, 2]).field("0"), Value::None);
    }
}
