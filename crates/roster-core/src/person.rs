//! People as the REST endpoint hands them out.
//!
//! The server owns identity: `id` is assigned on create and echoed back on
//! every list. Only `id` and `username` are read from a payload; any other
//! field the server adds is ignored.
//!
//! # Example
//!
//! ```
//! use roster_core::{people_from_json, PersonId};
//!
//! let people = people_from_json(r#"[{"id":1,"username":"foo","extra":true}]"#).unwrap();
//! assert_eq!(people[0].id, PersonId::from(1u64));
//! assert_eq!(people[0].username, "foo");
//! ```

use crate::error::PersonError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Server-assigned person identifier.
///
/// Numeric in practice but treated as opaque: it is rendered and sent back
/// on delete exactly as the server produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PersonId {
    /// Non-negative integer id
    Unsigned(u64),
    /// Negative integer id
    Signed(i64),
    /// String id
    Text(String),
}

impl PersonId {
    /// Id for a float holding a whole number, as JSON encoders and
    /// JavaScript produce for `1.0`. `None` for fractions, NaN, infinities
    /// and values outside the 64-bit integer range.
    pub fn from_integral_f64(n: f64) -> Option<Self> {
        if !n.is_finite() || n.fract() != 0.0 {
            return None;
        }
        if (0.0..18_446_744_073_709_551_616.0).contains(&n) {
            Some(Self::Unsigned(n as u64))
        } else if (-9_223_372_036_854_775_808.0..0.0).contains(&n) {
            Some(Self::Signed(n as i64))
        } else {
            None
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

/// Any id shape a server may send.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for PersonId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match WireId::deserialize(deserializer)? {
            WireId::Unsigned(n) => Ok(Self::Unsigned(n)),
            WireId::Signed(n) => Ok(Self::Signed(n)),
            WireId::Float(n) => Self::from_integral_f64(n).ok_or_else(|| {
                serde::de::Error::custom(format!("person id {n} is not a whole number"))
            }),
            WireId::Text(s) => Ok(Self::Text(s)),
        }
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned(n) => write!(f, "{n}"),
            Self::Signed(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for PersonId {
    fn from(id: u64) -> Self {
        Self::Unsigned(id)
    }
}

impl From<i64> for PersonId {
    fn from(id: i64) -> Self {
        u64::try_from(id).map_or(Self::Signed(id), Self::Unsigned)
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for PersonId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// A person with both fields populated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PersonRecord")]
pub struct Person {
    /// Server-assigned id
    pub id: PersonId,
    /// Display name
    pub username: String,
}

impl Person {
    /// Create a person, rejecting an empty id or username.
    pub fn new(id: impl Into<PersonId>, username: impl Into<String>) -> Result<Self, PersonError> {
        Self::try_from(PersonRecord {
            id: Some(id.into()),
            username: Some(username.into()),
        })
    }

    /// Decode the body of a create response.
    pub fn from_json(body: &str) -> Result<Self, PersonError> {
        let record: PersonRecord = serde_json::from_str(body)?;
        Self::try_from(record)
    }
}

/// Wire shape of a person; every field optional so the decoder can say
/// which one is missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonRecord {
    id: Option<PersonId>,
    username: Option<String>,
}

impl TryFrom<PersonRecord> for Person {
    type Error = PersonError;

    fn try_from(record: PersonRecord) -> Result<Self, Self::Error> {
        let id = record.id.ok_or(PersonError::MissingField("id"))?;
        if id.is_empty() {
            return Err(PersonError::EmptyField("id"));
        }
        let username = record
            .username
            .ok_or(PersonError::MissingField("username"))?;
        if username.is_empty() {
            return Err(PersonError::EmptyField("username"));
        }
        Ok(Self { id, username })
    }
}

/// Build the list of people from a decoded list response.
///
/// Order follows the response. A single bad entry fails the whole list so
/// that nothing half-decoded is ever rendered.
pub fn people_from_value(response: Value) -> Result<Vec<Person>, PersonError> {
    let Value::Array(entries) = response else {
        return Err(PersonError::NotAList(json_kind(&response)));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value::<PersonRecord>(entry)
                .map_err(PersonError::from)
                .and_then(Person::try_from)
                .map_err(|e| PersonError::at(index, e))
        })
        .collect()
}

/// Build the list of people from the raw body of a list response.
pub fn people_from_json(body: &str) -> Result<Vec<Person>, PersonError> {
    people_from_value(serde_json::from_str(body)?)
}

/// How a create request body goes over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    /// `application/x-www-form-urlencoded`, as a plain `$.post` sends it
    #[default]
    Form,
    /// `application/json`
    Json,
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPerson {
    /// Username exactly as typed
    pub username: String,
}

impl NewPerson {
    /// Create a payload for the given username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// Field pairs for form encoding.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![("username".to_string(), self.username.clone())]
    }

    /// JSON encoding.
    pub fn to_json(&self) -> Result<String, PersonError> {
        Ok(serde_json::to_string(self)?)
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_person_id_display() {
        assert_eq!(PersonId::from(9999u64).to_string(), "9999");
        assert_eq!(PersonId::from(-4i64).to_string(), "-4");
        assert_eq!(PersonId::from("abc-1").to_string(), "abc-1");
    }

    #[test]
    fn test_person_id_from_non_negative_i64_is_unsigned() {
        assert_eq!(PersonId::from(7i64), PersonId::Unsigned(7));
    }

    #[test]
    fn test_person_id_deserializes_numbers_and_strings() {
        let n: PersonId = serde_json::from_value(json!(12)).unwrap();
        assert_eq!(n, PersonId::Unsigned(12));
        let s: PersonId = serde_json::from_value(json!("x12")).unwrap();
        assert_eq!(s, PersonId::Text("x12".to_string()));
    }

    #[test]
    fn test_person_id_accepts_integral_floats() {
        let n: PersonId = serde_json::from_str("1.0").unwrap();
        assert_eq!(n, PersonId::Unsigned(1));
        let m: PersonId = serde_json::from_str("-3.0").unwrap();
        assert_eq!(m, PersonId::Signed(-3));
        assert!(serde_json::from_str::<PersonId>("1.5").is_err());
    }

    #[test]
    fn test_people_from_json_integral_float_id() {
        let people = people_from_json(r#"[{"id":1.0,"username":"a"}]"#).unwrap();
        assert_eq!(people[0].id, PersonId::from(1u64));
        assert!(people_from_json(r#"[{"id":1.25,"username":"a"}]"#).is_err());
    }

    #[test]
    fn test_person_id_from_integral_f64() {
        assert_eq!(PersonId::from_integral_f64(3.0), Some(PersonId::Unsigned(3)));
        assert_eq!(PersonId::from_integral_f64(-2.0), Some(PersonId::Signed(-2)));
        assert_eq!(PersonId::from_integral_f64(0.5), None);
        assert_eq!(PersonId::from_integral_f64(f64::NAN), None);
        assert_eq!(PersonId::from_integral_f64(f64::INFINITY), None);
        assert_eq!(PersonId::from_integral_f64(1e30), None);
    }

    #[test]
    fn test_person_from_json_ignores_extra_fields() {
        let person = Person::from_json(r#"{"id":1,"username":"done","email":"d@x"}"#).unwrap();
        assert_eq!(person, Person::new(1u64, "done").unwrap());
    }

    #[test]
    fn test_person_from_json_missing_id() {
        let err = Person::from_json(r#"{"username":"done"}"#).unwrap_err();
        assert!(matches!(err, PersonError::MissingField("id")));
    }

    #[test]
    fn test_person_from_json_null_username() {
        let err = Person::from_json(r#"{"id":1,"username":null}"#).unwrap_err();
        assert!(matches!(err, PersonError::MissingField("username")));
    }

    #[test]
    fn test_person_new_rejects_empty_username() {
        assert!(matches!(
            Person::new(1u64, ""),
            Err(PersonError::EmptyField("username"))
        ));
    }

    #[test]
    fn test_person_new_rejects_empty_text_id() {
        assert!(matches!(
            Person::new("", "foo"),
            Err(PersonError::EmptyField("id"))
        ));
    }

    #[test]
    fn test_person_from_json_not_json() {
        assert!(matches!(
            Person::from_json("<html>"),
            Err(PersonError::Json(_))
        ));
    }

    #[test]
    fn test_person_deserialize_goes_through_validation() {
        let result: Result<Person, _> = serde_json::from_value(json!({"id": 1, "username": ""}));
        assert!(result.is_err());
    }

    #[test]
    fn test_people_from_value_keeps_response_order() {
        let people = people_from_value(json!([
            {"id": 1, "username": "foo"},
            {"id": 2, "username": "bar"}
        ]))
        .unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].id, PersonId::from(1u64));
        assert_eq!(people[0].username, "foo");
        assert_eq!(people[1].id, PersonId::from(2u64));
        assert_eq!(people[1].username, "bar");
    }

    #[test]
    fn test_people_from_value_empty_array() {
        assert!(people_from_value(json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_people_from_value_rejects_object() {
        let err = people_from_value(json!({"some": "data"})).unwrap_err();
        assert!(matches!(err, PersonError::NotAList("object")));
    }

    #[test]
    fn test_people_from_value_reports_bad_entry_index() {
        let err = people_from_value(json!([
            {"id": 1, "username": "foo"},
            {"id": 2}
        ]))
        .unwrap_err();
        match err {
            PersonError::Entry { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(*source, PersonError::MissingField("username")));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_people_from_value_rejects_non_object_entry() {
        let err = people_from_value(json!([42])).unwrap_err();
        assert!(matches!(err, PersonError::Entry { index: 0, .. }));
    }

    #[test]
    fn test_people_from_json() {
        let people = people_from_json(r#"[{"id":"a","username":"alpha"}]"#).unwrap();
        assert_eq!(people[0].id.to_string(), "a");
    }

    #[test]
    fn test_new_person_form_fields() {
        let body = NewPerson::new(" foobar ");
        assert_eq!(
            body.form_fields(),
            vec![("username".to_string(), " foobar ".to_string())]
        );
    }

    #[test]
    fn test_body_encoding_default_is_form() {
        assert_eq!(BodyEncoding::default(), BodyEncoding::Form);
        let json: BodyEncoding = serde_json::from_value(json!("json")).unwrap();
        assert_eq!(json, BodyEncoding::Json);
    }

    #[test]
    fn test_new_person_to_json() {
        assert_eq!(
            NewPerson::new("foo").to_json().unwrap(),
            r#"{"username":"foo"}"#
        );
    }
}
