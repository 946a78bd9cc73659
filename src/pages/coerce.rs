// src/pages/coerce.rs
//
// Form value coercion
//
// Inputs hand back strings. Before a submit the page turns them into the
// types the backend expects: numbers parsed, blanks sent as null, dates
// validated, files split out into multipart parts.
//
// RULES:
// - Only fields named by a spec are sent
// - A value that cannot be parsed fails the submit with a field error
// - File inputs left untouched are omitted so the stored file is kept

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde_json::{json, Map, Value};

use crate::api::{FilePart, MultipartPayload, RequestBody};
use crate::error::{AppError, AppResult};
use crate::form::{FieldValue, FormValues};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Sent as-is, blank included
    Text,
    /// Blank becomes null
    OptionalText,
    Integer,
    Decimal,
    Boolean,
    /// `YYYY-MM-DD`
    Date,
    /// `datetime-local` input, interpreted in local time
    DateTime,
    /// `HH:MM`
    Time,
    /// Id of a related record
    ForeignKey,
    /// Comma separated ids of related records
    IdList,
    File,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Initial checkbox state for boolean fields
    pub checked: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            checked: false,
        }
    }

    pub const fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Value an empty form starts from
    pub fn initial_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Boolean => FieldValue::Bool(self.checked),
            FieldKind::File => FieldValue::Empty,
            _ => FieldValue::text(""),
        }
    }
}

pub fn text(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Text)
}

pub fn optional(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::OptionalText)
}

pub fn integer(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Integer)
}

pub fn decimal(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Decimal)
}

pub fn boolean(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Boolean)
}

pub fn date(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Date)
}

pub fn datetime(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::DateTime)
}

pub fn time(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Time)
}

pub fn foreign_key(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::ForeignKey)
}

pub fn id_list(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::IdList)
}

pub fn file(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::File)
}

/// Initial form values for a set of specs
pub fn initial_values(specs: &[FieldSpec]) -> FormValues {
    specs
        .iter()
        .map(|spec| (spec.name.to_string(), spec.initial_value()))
        .collect()
}

/// Build the request body for a submit.
pub fn coerce_values(
    specs: &[FieldSpec],
    values: &FormValues,
    multipart: bool,
) -> AppResult<RequestBody> {
    let mut object = Map::new();
    let mut files = Vec::new();

    for spec in specs {
        let value = values.get(spec.name).unwrap_or(&FieldValue::Empty);

        if spec.kind == FieldKind::File {
            if let Some(part) = file_part(spec.name, value)? {
                files.push(part);
            }
            continue;
        }

        object.insert(spec.name.to_string(), coerce_one(spec, value)?);
    }

    if !multipart {
        if !files.is_empty() {
            return Err(AppError::Validation(
                "File fields need a multipart resource".to_string(),
            ));
        }
        return Ok(RequestBody::Json(Value::Object(object)));
    }

    let payload = files
        .into_iter()
        .fold(MultipartPayload::from_object(&object), MultipartPayload::with_file);

    Ok(RequestBody::Multipart(payload))
}

fn coerce_one(spec: &FieldSpec, value: &FieldValue) -> AppResult<Value> {
    let field = spec.name;

    if let FieldValue::Bool(b) = value {
        return match spec.kind {
            FieldKind::Boolean => Ok(Value::Bool(*b)),
            _ => Err(invalid(field, "expected a text value")),
        };
    }

    let raw = value.as_text().unwrap_or("").trim();

    match spec.kind {
        FieldKind::Text => Ok(json!(value.as_text().unwrap_or(""))),
        FieldKind::Boolean => Ok(Value::Bool(matches!(raw, "true" | "on" | "1"))),
        _ if raw.is_empty() => Ok(Value::Null),
        FieldKind::OptionalText => Ok(json!(raw)),
        FieldKind::Integer | FieldKind::ForeignKey => raw
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| invalid(field, "must be a whole number")),
        FieldKind::Decimal => parse_decimal(raw)
            .map(|n| json!(n))
            .ok_or_else(|| invalid(field, "must be a number")),
        FieldKind::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|d| json!(d.format("%Y-%m-%d").to_string()))
            .map_err(|_| invalid(field, "must be a date (YYYY-MM-DD)")),
        FieldKind::DateTime => parse_datetime(raw)
            .map(|dt| json!(dt.to_rfc3339()))
            .ok_or_else(|| invalid(field, "must be a date and time")),
        FieldKind::Time => ["%H:%M", "%H:%M:%S"]
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
            .map(|t| json!(t.format("%H:%M").to_string()))
            .ok_or_else(|| invalid(field, "must be a time (HH:MM)")),
        FieldKind::IdList => parse_id_list(raw)
            .map(|ids| json!(ids))
            .ok_or_else(|| invalid(field, "must be a list of ids")),
        FieldKind::File => Ok(Value::Null),
    }
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Accepts `1,2,3` as typed and `[1,2,3]` as prefilled from a record
fn parse_id_list(raw: &str) -> Option<Vec<i64>> {
    let inner = raw.trim_start_matches('[').trim_end_matches(']');
    inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>().ok())
        .collect()
}

/// New files only. A prefilled URL or an untouched input keeps the stored file.
fn file_part(field: &str, value: &FieldValue) -> AppResult<Option<FilePart>> {
    match value {
        FieldValue::File(attachment) => attachment.clone().into_part(field).map(Some),
        FieldValue::Text(s) if s.starts_with("data:") => data_url_part(field, s).map(Some),
        _ => Ok(None),
    }
}

/// Camera captures arrive as `data:image/jpeg;base64,...`
fn data_url_part(field: &str, url: &str) -> AppResult<FilePart> {
    let (header, data) = url
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .ok_or_else(|| invalid(field, "malformed data URL"))?;

    let mime = header.trim_end_matches(";base64");
    let extension = mime.rsplit('/').next().unwrap_or("bin");
    let bytes = STANDARD
        .decode(data.as_bytes())
        .map_err(|_| invalid(field, "data URL is not valid base64"))?;

    Ok(FilePart {
        field: field.to_string(),
        file_name: format!("{}.{}", field, extension),
        mime: Some(mime.to_string()),
        bytes,
    })
}

fn invalid(field: &str, message: &str) -> AppError {
    AppError::InvalidField {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FileAttachment;

    fn values(pairs: &[(&str, FieldValue)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn json_body(body: RequestBody) -> Value {
        match body {
            RequestBody::Json(value) => value,
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[test]
    fn test_numbers_parsed_and_blanks_nulled() {
        let specs = [text("number"), integer("floor"), decimal("area_m2"), foreign_key("owner")];
        let form = values(&[
            ("number", FieldValue::text("101")),
            ("floor", FieldValue::text("1")),
            ("area_m2", FieldValue::text("54,5")),
            ("owner", FieldValue::text("")),
        ]);

        let body = json_body(coerce_values(&specs, &form, false).unwrap());

        assert_eq!(
            body,
            json!({"number": "101", "floor": 1, "area_m2": 54.5, "owner": null})
        );
    }

    #[test]
    fn test_unparsable_number_is_field_error() {
        let specs = [integer("capacity")];
        let form = values(&[("capacity", FieldValue::text("doce"))]);

        let err = coerce_values(&specs, &form, false).unwrap_err();

        assert!(err.field_errors().unwrap().contains_key("capacity"));
    }

    #[test]
    fn test_unknown_fields_are_not_sent() {
        let specs = [text("name")];
        let form = values(&[
            ("id", FieldValue::text("3")),
            ("name", FieldValue::text("Torre A")),
            ("tower_name", FieldValue::text("x")),
        ]);

        let body = json_body(coerce_values(&specs, &form, false).unwrap());
        assert_eq!(body, json!({"name": "Torre A"}));
    }

    #[test]
    fn test_booleans_dates_and_times() {
        let specs = [
            boolean("is_active"),
            boolean("is_closed"),
            date("due_date"),
            time("start_time"),
            optional("notes"),
        ];
        let form = values(&[
            ("is_active", FieldValue::Bool(true)),
            ("due_date", FieldValue::text("2026-03-10")),
            ("start_time", FieldValue::text("08:30:00")),
            ("notes", FieldValue::text("   ")),
        ]);

        let body = json_body(coerce_values(&specs, &form, false).unwrap());

        assert_eq!(body["is_active"], json!(true));
        assert_eq!(body["is_closed"], json!(false));
        assert_eq!(body["due_date"], json!("2026-03-10"));
        assert_eq!(body["start_time"], json!("08:30"));
        assert_eq!(body["notes"], Value::Null);
    }

    #[test]
    fn test_bad_date_is_field_error() {
        let specs = [date("paid_at")];
        let form = values(&[("paid_at", FieldValue::text("10/03/2026"))]);
        let err = coerce_values(&specs, &form, false).unwrap_err();
        assert!(err.field_errors().unwrap().contains_key("paid_at"));
    }

    #[test]
    fn test_datetime_local_is_converted_to_utc() {
        let specs = [datetime("start")];
        let form = values(&[("start", FieldValue::text("2026-05-01T08:00"))]);

        let body = json_body(coerce_values(&specs, &form, false).unwrap());
        let sent = DateTime::parse_from_rfc3339(body["start"].as_str().unwrap()).unwrap();

        let expected = Local
            .from_local_datetime(&NaiveDate::from_ymd_opt(2026, 5, 1).unwrap().and_hms_opt(8, 0, 0).unwrap())
            .earliest()
            .unwrap();
        assert_eq!(sent.with_timezone(&Utc), expected.with_timezone(&Utc));
    }

    #[test]
    fn test_id_list_accepts_typed_and_prefilled_forms() {
        let specs = [id_list("permissions")];

        let typed = values(&[("permissions", FieldValue::text("1, 4,7"))]);
        let body = json_body(coerce_values(&specs, &typed, false).unwrap());
        assert_eq!(body["permissions"], json!([1, 4, 7]));

        let prefilled = values(&[("permissions", FieldValue::text("[2,3]"))]);
        let body = json_body(coerce_values(&specs, &prefilled, false).unwrap());
        assert_eq!(body["permissions"], json!([2, 3]));
    }

    #[test]
    fn test_multipart_splits_files_from_fields() {
        let specs = [text("title"), boolean("is_published"), file("attachment")];
        let form = values(&[
            ("title", FieldValue::text("Corte de agua")),
            ("is_published", FieldValue::Bool(true)),
            (
                "attachment",
                FieldValue::File(FileAttachment {
                    file_name: "aviso.pdf".into(),
                    mime: Some("application/pdf".into()),
                    data: STANDARD.encode(b"%PDF"),
                }),
            ),
        ]);

        let RequestBody::Multipart(payload) = coerce_values(&specs, &form, true).unwrap() else {
            panic!("expected multipart");
        };

        assert_eq!(payload.field("title"), Some("Corte de agua"));
        assert_eq!(payload.field("is_published"), Some("true"));
        assert_eq!(payload.files.len(), 1);
        assert_eq!(payload.files[0].file_name, "aviso.pdf");
    }

    #[test]
    fn test_existing_file_url_is_kept_by_omission() {
        let specs = [text("full_name"), file("photo")];
        let form = values(&[
            ("full_name", FieldValue::text("Ana")),
            ("photo", FieldValue::text("https://cdn.example.com/photo.jpg")),
        ]);

        let RequestBody::Multipart(payload) = coerce_values(&specs, &form, true).unwrap() else {
            panic!("expected multipart");
        };

        assert!(payload.files.is_empty());
        assert_eq!(payload.field("photo"), None);
    }

    #[test]
    fn test_camera_capture_becomes_jpeg_part() {
        let specs = [file("photo")];
        let url = format!("data:image/jpeg;base64,{}", STANDARD.encode([0xFF, 0xD8, 0xFF]));
        let form = values(&[("photo", FieldValue::Text(url))]);

        let RequestBody::Multipart(payload) = coerce_values(&specs, &form, true).unwrap() else {
            panic!("expected multipart");
        };

        let part = &payload.files[0];
        assert_eq!(part.file_name, "photo.jpeg");
        assert_eq!(part.mime.as_deref(), Some("image/jpeg"));
        assert_eq!(part.bytes, vec![0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn test_initial_values_follow_kinds() {
        let specs = [text("name"), boolean("is_active").checked(), file("photo")];
        let initial = initial_values(&specs);

        assert_eq!(initial["name"], FieldValue::text(""));
        assert_eq!(initial["is_active"], FieldValue::Bool(true));
        assert_eq!(initial["photo"], FieldValue::Empty);
    }
}
