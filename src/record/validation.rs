//! Shape checks applied to every write before it reaches the database.

use serde_json::Value;

use crate::{
    Error,
    record::{RecordFields, RecordForm, RecordId, RecordKind},
};

/// Validate a JSON request body for `kind`.
///
/// The identifying field must be a non-empty string and `amount` must be a
/// number. Both are forwarded unchanged; no trimming or range checks are done.
///
/// # Errors
///
/// Returns [Error::InvalidLabel] if the identifying field is missing, empty or
/// not a string, checked first, and [Error::InvalidAmount] if `amount` is
/// missing, null or not a number.
pub fn validate_json(kind: RecordKind, body: &Value) -> Result<RecordFields, Error> {
    let label = match body.get(kind.label_field()) {
        Some(Value::String(label)) if !label.is_empty() => label.clone(),
        _ => return Err(Error::InvalidLabel(kind)),
    };

    let amount = body
        .get("amount")
        .and_then(Value::as_f64)
        .ok_or(Error::InvalidAmount)?;

    Ok(RecordFields { label, amount })
}

/// Validate form data submitted from the HTML pages.
///
/// Applies the same rules as [validate_json], where the amount must parse as
/// a finite number.
pub fn validate_form(kind: RecordKind, form: &RecordForm) -> Result<RecordFields, Error> {
    if form.label.is_empty() {
        return Err(Error::InvalidLabel(kind));
    }

    let amount = form
        .amount
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or(Error::InvalidAmount)?;

    Ok(RecordFields {
        label: form.label.clone(),
        amount,
    })
}

/// Parse a record ID taken from a request path.
pub fn parse_record_id(raw_id: &str) -> Result<RecordId, Error> {
    raw_id
        .parse()
        .map_err(|_| Error::InvalidRecordId(raw_id.to_owned()))
}
