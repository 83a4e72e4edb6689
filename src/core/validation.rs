//! Submission validation - turns raw submitted field values into a typed
//! order-creation payload or a field-keyed error map.
//!
//! The check is pure: no clock reads (the submission day is a parameter) and
//! no persistence calls. Failed validation therefore guarantees nothing was
//! written anywhere. Catalog membership is enforced for category, size, and
//! flavor; the size lookup is also what resolves the order's price, so
//! `total_price` is always `catalog price + delivery fee` by construction.

use crate::catalog;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error-map key for failures that do not belong to a single field
/// (image upload, persistence).
pub const FORM_ERRORS_KEY: &str = "_form";

/// Raw submitted order fields, exactly as they arrive from the form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderSubmission {
    /// Customer's full name
    #[serde(default)]
    pub customer_name: String,
    /// Contact phone number
    #[serde(default)]
    pub phone_number: String,
    /// Selected catalog category
    #[serde(default)]
    pub cake_category: String,
    /// Selected catalog size label
    #[serde(default)]
    pub cake_size: String,
    /// Selected catalog flavor
    #[serde(default)]
    pub flavor: String,
    /// Optional message to pipe onto the cake
    #[serde(default)]
    pub message_on_cake: Option<String>,
    /// Requested delivery date ("YYYY-MM-DD" or RFC 3339)
    #[serde(default)]
    pub delivery_date: String,
    /// Full delivery address
    #[serde(default)]
    pub delivery_location: String,
}

/// A validated, well-typed order-creation payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// Customer's full name, trimmed
    pub customer_name: String,
    /// Contact phone number
    pub phone_number: String,
    /// Catalog category
    pub cake_category: String,
    /// Catalog size label
    pub cake_size: String,
    /// Catalog flavor
    pub flavor: String,
    /// Optional cake message (≤100 characters)
    pub message_on_cake: Option<String>,
    /// Delivery date, on or after the submission day
    pub delivery_date: NaiveDate,
    /// Full delivery address, trimmed
    pub delivery_location: String,
    /// Size base price plus the delivery fee, fixed here once
    pub total_price: f64,
}

/// Per-field validation error messages, keyed by field name plus the
/// [`FORM_ERRORS_KEY`] bucket for cross-cutting failures.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationErrors {
    #[serde(flatten)]
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Records an error message against a field.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Records a cross-cutting (non-field) error message.
    pub fn push_form(&mut self, message: impl Into<String>) {
        self.push(FORM_ERRORS_KEY, message);
    }

    /// Builds an error map holding a single `_form` message.
    #[must_use]
    pub fn form_error(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push_form(message);
        errors
    }

    /// True when no errors have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }
}

/// Parses the submitted delivery date, accepting either a bare date or a
/// full RFC 3339 timestamp (the storefront form sends the latter).
fn parse_delivery_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Checks a raw submission against the validation rules and the catalog.
///
/// `today` is the submission day used for the delivery-date floor, and
/// `delivery_fee` is the configured flat fee added to the size's base price.
///
/// # Errors
/// Returns the complete field-keyed error map when any rule fails; every
/// failing field is reported, not just the first.
pub fn validate_submission(
    submission: &OrderSubmission,
    today: NaiveDate,
    delivery_fee: f64,
) -> Result<NewOrder, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let customer_name = submission.customer_name.trim();
    if customer_name.chars().count() < 2 {
        errors.push("customer_name", "Name is required.");
    }

    let phone_number = submission.phone_number.trim();
    if phone_number.chars().count() < 10 {
        errors.push("phone_number", "A valid phone number is required.");
    }

    if submission.cake_category.is_empty() {
        errors.push("cake_category", "Please select a cake category.");
    } else if !catalog::is_known_category(&submission.cake_category) {
        errors.push("cake_category", "Unknown cake category.");
    }

    let mut base_price = None;
    if submission.cake_size.is_empty() {
        errors.push("cake_size", "Please select a cake size.");
    } else {
        base_price = catalog::size_price(&submission.cake_size);
        if base_price.is_none() {
            errors.push("cake_size", "Unknown cake size.");
        }
    }

    if submission.flavor.is_empty() {
        errors.push("flavor", "Please select a flavor.");
    } else if !catalog::is_known_flavor(&submission.flavor) {
        errors.push("flavor", "Unknown flavor.");
    }

    let message_on_cake = submission
        .message_on_cake
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(ToString::to_string);
    if let Some(message) = &message_on_cake
        && message.chars().count() > 100
    {
        errors.push("message_on_cake", "Message cannot exceed 100 characters.");
    }

    let mut delivery_date = None;
    if submission.delivery_date.is_empty() {
        errors.push("delivery_date", "Please pick a delivery date.");
    } else {
        match parse_delivery_date(&submission.delivery_date) {
            Some(date) if date < today => {
                errors.push("delivery_date", "Delivery date cannot be in the past.");
            }
            Some(date) => delivery_date = Some(date),
            None => errors.push("delivery_date", "Invalid delivery date."),
        }
    }

    let delivery_location = submission.delivery_location.trim();
    if delivery_location.chars().count() < 5 {
        errors.push("delivery_location", "Delivery address is required.");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // Both unwrapped values are guaranteed by the error-free path above.
    let (Some(base_price), Some(delivery_date)) = (base_price, delivery_date) else {
        return Err(ValidationErrors::form_error("Invalid submission."));
    };

    Ok(NewOrder {
        customer_name: customer_name.to_string(),
        phone_number: phone_number.to_string(),
        cake_category: submission.cake_category.clone(),
        cake_size: submission.cake_size.clone(),
        flavor: submission.flavor.clone(),
        message_on_cake,
        delivery_date,
        delivery_location: delivery_location.to_string(),
        total_price: base_price + delivery_fee,
    })
}
