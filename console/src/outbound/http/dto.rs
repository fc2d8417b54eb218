//! DTOs for the record and auth JSON payloads.
//!
//! `list` responses decode into these transport DTOs first and are then
//! mapped into domain records row by row. Request bodies borrow from the
//! domain values they serialise.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::validation::parse_age;
use crate::domain::{Credentials, Record, RecordFields, RecordId, Registration};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdDto {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AgeDto {
    Number(serde_json::Number),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RecordDto {
    #[serde(alias = "_id")]
    id: IdDto,
    name: String,
    email: String,
    age: AgeDto,
    phone: String,
    city: String,
    id_number: String,
}

impl RecordDto {
    fn into_domain(self) -> Result<Record, String> {
        let raw_id = match self.id {
            IdDto::Text(text) => text,
            IdDto::Number(number) => number.to_string(),
        };
        let id = RecordId::new(raw_id).map_err(|error| error.to_string())?;
        let raw_age = match self.age {
            AgeDto::Number(number) => number.to_string(),
            AgeDto::Text(text) => text,
        };
        let age = parse_age(&raw_age)
            .map_err(|error| format!("record {id} has invalid age {raw_age:?}: {error}"))?;
        Ok(Record::new(
            id,
            RecordFields {
                name: self.name,
                email: self.email,
                age,
                phone: self.phone,
                city: self.city,
                id_number: self.id_number,
            },
        ))
    }
}

/// Decode a `list` body into domain records, preserving server order.
///
/// Only a body that is not a JSON array fails. Rows the console cannot
/// represent (missing fields, a blank id, an age that is not a positive
/// integer) are logged and skipped so the remaining rows still display.
pub(super) fn decode_records(body: &[u8]) -> Result<Vec<Record>, String> {
    let rows: Vec<serde_json::Value> = serde_json::from_slice(body)
        .map_err(|error| format!("invalid record list JSON payload: {error}"))?;
    Ok(rows.into_iter().filter_map(decode_row).collect())
}

fn decode_row(row: serde_json::Value) -> Option<Record> {
    let record_id = row
        .get("id")
        .or_else(|| row.get("_id"))
        .map(|value| value.as_str().map_or_else(|| value.to_string(), str::to_owned))
        .unwrap_or_default();
    let decoded = serde_json::from_value::<RecordDto>(row)
        .map_err(|error| error.to_string())
        .and_then(RecordDto::into_domain);
    match decoded {
        Ok(record) => Some(record),
        Err(error) => {
            warn!(record_id = %record_id, error = %error, "skipping undecodable record row");
            None
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct LoginRequestDto<'a> {
    email: &'a str,
    password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginRequestDto<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            email: credentials.email(),
            password: credentials.password(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RegisterRequestDto<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

impl<'a> From<&'a Registration> for RegisterRequestDto<'a> {
    fn from(registration: &'a Registration) -> Self {
        Self {
            name: registration.name(),
            email: registration.credentials().email(),
            password: registration.credentials().password(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for payload decoding and encoding.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn body(value: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&value).expect("serialise fixture")
    }

    fn record_json(id: serde_json::Value, age: serde_json::Value) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Ana",
            "email": "ana@x.com",
            "age": age,
            "phone": "5551234567",
            "city": "Lima",
            "idNumber": "A1"
        })
    }

    #[rstest]
    #[case(json!("7"), json!(30), "7")]
    #[case(json!(42), json!(30), "42")]
    #[case(json!("abc"), json!("30"), "abc")]
    #[case(json!("x"), json!(30.0), "x")]
    fn decodes_identifier_and_age_variants(
        #[case] id: serde_json::Value,
        #[case] age: serde_json::Value,
        #[case] expected_id: &str,
    ) {
        let records = decode_records(&body(json!([record_json(id, age)]))).expect("decodes");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id().as_ref(), expected_id);
        assert_eq!(records[0].fields().age, 30);
        assert_eq!(records[0].fields().id_number, "A1");
    }

    #[test]
    fn accepts_underscore_id_key() {
        let mut value = record_json(json!("ignored"), json!(30));
        let object = value.as_object_mut().expect("object");
        object.remove("id");
        object.insert("_id".to_owned(), json!("65f0c1"));

        let records = decode_records(&body(json!([value]))).expect("decodes");
        assert_eq!(records[0].id().as_ref(), "65f0c1");
    }

    #[test]
    fn preserves_server_order() {
        let payload = json!([
            record_json(json!("2"), json!(30)),
            record_json(json!("1"), json!(30)),
        ]);
        let records = decode_records(&body(payload)).expect("decodes");
        let ids: Vec<_> = records.iter().map(|record| record.id().to_string()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[rstest]
    #[case(b"not json".to_vec())]
    #[case(b"{\"records\": []}".to_vec())]
    fn rejects_payloads_that_are_not_lists(#[case] payload: Vec<u8>) {
        assert!(decode_records(&payload).is_err());
    }

    #[rstest]
    #[case(record_json(json!(""), json!(30)))]
    #[case(record_json(json!("2"), json!(0)))]
    #[case(record_json(json!("2"), json!(-4)))]
    #[case(record_json(json!("2"), json!(30.5)))]
    #[case(record_json(json!("2"), json!("thirty")))]
    #[case(json!({ "id": "2", "name": "Ana" }))]
    fn skips_unusable_rows_and_keeps_the_rest(#[case] bad_row: serde_json::Value) {
        let payload = json!([
            record_json(json!("1"), json!(30)),
            bad_row,
            record_json(json!("3"), json!(41)),
        ]);

        let records = decode_records(&body(payload)).expect("list still decodes");

        let ids: Vec<_> = records.iter().map(|record| record.id().to_string()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(records[1].fields().age, 41);
    }

    #[test]
    fn login_body_has_email_and_password_only() {
        let credentials =
            Credentials::try_from_parts("ana@x.com", "hunter2").expect("valid credentials");
        let value = serde_json::to_value(LoginRequestDto::from(&credentials)).expect("serialise");
        assert_eq!(value, json!({ "email": "ana@x.com", "password": "hunter2" }));
    }

    #[test]
    fn register_body_carries_name() {
        let registration =
            Registration::try_from_parts("Ana", "ana@x.com", "hunter2").expect("valid");
        let value =
            serde_json::to_value(RegisterRequestDto::from(&registration)).expect("serialise");
        assert_eq!(
            value,
            json!({ "name": "Ana", "email": "ana@x.com", "password": "hunter2" })
        );
    }
}
