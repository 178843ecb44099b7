//! Booking-request workflow: public submission and admin status handling.

use log::info;
use serde::Deserialize;

use crate::error::{Result, StoreError};
use crate::models::{BookingRequest, BookingStatus, BookingType};
use crate::store::SiteStore;

/// A booking submission from the public form, validated at the boundary
/// before anything reaches the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub booking_type: BookingType,
    pub date: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl BookingForm {
    /// Checks required fields and the email shape. All problems are
    /// collected into one [`StoreError::Validation`] so the form can show
    /// them together.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if self.name.trim().is_empty() {
            problems.push("name is required");
        }
        if self.date.trim().is_empty() {
            problems.push("date is required");
        }
        if !is_valid_email(&self.email) {
            problems.push("email is not a valid address");
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation(problems.join("; ")))
        }
    }
}

/// Minimal `local@dotted-domain` shape check. The form only needs to catch
/// obvious typos, not implement the full address grammar.
fn is_valid_email(address: &str) -> bool {
    let mut parts = address.splitn(2, '@');
    let (local, domain) = match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => (local, domain),
        _ => return false,
    };
    !local.is_empty()
        && !local.contains(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains(char::is_whitespace)
}

/// Validates the form and appends a new request with status `pending` and a
/// freshly assigned id.
pub fn submit_booking(store: &SiteStore, form: BookingForm) -> Result<BookingRequest> {
    form.validate()?;
    store.append(|id| BookingRequest {
        id,
        name: form.name,
        email: form.email,
        booking_type: form.booking_type,
        date: form.date,
        status: BookingStatus::Pending,
        message: form.message,
    })
}

/// Sets the status of a booking request.
///
/// Any status may follow any status; there is no transition table. The
/// admin UI limits which actions it offers, the store does not.
pub fn set_request_status(
    store: &SiteStore,
    id: u64,
    status: BookingStatus,
) -> Result<BookingRequest> {
    let mut requests = store.get_all::<BookingRequest>();
    match requests.iter_mut().find(|r| r.id == id) {
        Some(request) => {
            request.status = status;
            let updated = request.clone();
            store.replace_all(requests)?;
            Ok(updated)
        }
        None => Err(StoreError::NotFound(format!(
            "no booking request with id {id}"
        ))),
    }
}

/// The admin "send response" action. No mail transport exists; the action
/// logs the intent and marks the request `responded`.
pub fn send_response(store: &SiteStore, id: u64) -> Result<BookingRequest> {
    let updated = set_request_status(store, id, BookingStatus::Responded)?;
    info!(
        "response to booking request {} recorded for {}",
        updated.id, updated.email
    );
    Ok(updated)
}
