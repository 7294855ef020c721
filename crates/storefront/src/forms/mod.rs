//! Form validation engine.
//!
//! A [`FormValidator`] owns the values and per-field [`FieldStatus`] of one
//! form. Fields are validated on every input change and on blur; the first
//! failing rule (required, then minimum length, then maximum length, then
//! pattern) supplies the field's error message. Submitting validates every
//! field and hands a [`FormSubmission`] to a [`SubmitTransport`].
//!
//! ```rust
//! use boutique_storefront::forms::contact_form;
//!
//! let mut form = contact_form();
//! assert!(!form.on_input("email", "nobody"));
//! assert_eq!(form.error("email"), Some("Please enter a valid email address"));
//! assert!(form.on_input("email", "nobody@example.com"));
//! ```

mod presets;
mod rules;
mod transport;

use std::collections::{BTreeMap, HashMap};

use boutique_core::FieldStatus;
use thiserror::Error;
use tracing::instrument;

pub use presets::{CONTACT_FIELDS, REVIEW_FIELDS, contact_form, review_form};
pub use rules::{FieldRules, RuleKind, RuleOverride, RuleSet, Violation};
pub use transport::{FormSubmission, SimulatedTransport, SubmitTransport, TransportError};

/// Shown when a submit is blocked by invalid fields.
pub const INVALID_FORM_MESSAGE: &str = "Please fix the errors above before submitting.";

/// Shown after a successful submit.
pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";

/// Shown when the transport fails.
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Sorry, there was an error sending your message. Please try again.";

/// Errors from submitting a form.
#[derive(Debug, Error)]
pub enum FormError {
    /// One or more fields failed validation. Holds `(field, message)` pairs
    /// in form order.
    #[error("Please fix the errors above before submitting.")]
    Invalid(Vec<(String, String)>),

    /// The transport did not accept the submission. The form keeps its
    /// values.
    #[error("Sorry, there was an error sending your message. Please try again.")]
    Transport(#[source] TransportError),
}

/// A delivered submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub submission: FormSubmission,
    pub message: &'static str,
}

#[derive(Debug, Clone, Default)]
struct FieldState {
    value: String,
    status: FieldStatus,
    error: Option<String>,
}

/// Validator for one form instance.
#[derive(Debug, Clone)]
pub struct FormValidator {
    fields: Vec<String>,
    rules: RuleSet,
    state: HashMap<String, FieldState>,
}

impl FormValidator {
    /// Bind `fields` (in display order) to `rules`.
    ///
    /// Fields without rules are always valid.
    #[must_use]
    pub fn new<I, F>(fields: I, rules: RuleSet) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let state = fields
            .iter()
            .map(|field| (field.clone(), FieldState::default()))
            .collect();
        Self {
            fields,
            rules,
            state,
        }
    }

    /// Merge custom rules over the current ones for `field`.
    #[must_use]
    pub fn with_rule(mut self, field: &str, patch: RuleOverride) -> Self {
        self.rules.merge(field, patch);
        self
    }

    /// Field names in display order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Store a new raw value and validate it. Unknown fields are ignored.
    pub fn on_input(&mut self, field: &str, value: &str) -> bool {
        let Some(state) = self.state.get_mut(field) else {
            return true;
        };
        state.value = value.to_string();
        self.validate_field(field)
    }

    /// Validate a field that lost focus.
    pub fn on_blur(&mut self, field: &str) -> bool {
        self.validate_field(field)
    }

    /// Validate one field, updating its status and error.
    pub fn validate_field(&mut self, field: &str) -> bool {
        let violation = self
            .rules
            .get(field)
            .zip(self.state.get(field))
            .and_then(|(rules, state)| rules.check(&state.value));
        let Some(state) = self.state.get_mut(field) else {
            return true;
        };
        let valid = violation.is_none();
        state.status = FieldStatus::from_outcome(valid);
        state.error = violation.map(|v| v.message);
        valid
    }

    /// Validate every field. Does not stop at the first failure.
    pub fn validate_all(&mut self) -> bool {
        let fields = self.fields.clone();
        fields
            .iter()
            .fold(true, |all_valid, field| self.validate_field(field) && all_valid)
    }

    /// Status of a field. Unknown fields read as untouched.
    #[must_use]
    pub fn status(&self, field: &str) -> FieldStatus {
        self.state
            .get(field)
            .map(|state| state.status)
            .unwrap_or_default()
    }

    /// Current error message of a field.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.state.get(field).and_then(|state| state.error.as_deref())
    }

    /// All current `(field, message)` errors in form order.
    #[must_use]
    pub fn errors(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter_map(|field| {
                self.error(field)
                    .map(|message| (field.clone(), message.to_string()))
            })
            .collect()
    }

    /// Trimmed values keyed by field name.
    #[must_use]
    pub fn values(&self) -> BTreeMap<String, String> {
        self.state
            .iter()
            .map(|(field, state)| (field.clone(), state.value.trim().to_string()))
            .collect()
    }

    /// Clear every value and put every field back to untouched.
    pub fn reset(&mut self) {
        for state in self.state.values_mut() {
            *state = FieldState::default();
        }
    }

    /// Validate everything and, if valid, send the form.
    ///
    /// A successful send resets the form.
    ///
    /// # Errors
    ///
    /// - `FormError::Invalid` if any field fails validation
    /// - `FormError::Transport` if the transport fails
    #[instrument(skip(self, transport), fields(fields = self.fields.len()))]
    pub async fn submit<T: SubmitTransport>(
        &mut self,
        transport: &T,
    ) -> Result<SubmissionReceipt, FormError> {
        if !self.validate_all() {
            let errors = self.errors();
            tracing::debug!(invalid = errors.len(), "Form submission blocked");
            return Err(FormError::Invalid(errors));
        }

        let submission = FormSubmission::new(self.values());
        if let Err(e) = transport.send(&submission).await {
            tracing::warn!(error = %e, submission_id = %submission.id, "Form submission failed");
            return Err(FormError::Transport(e));
        }

        self.reset();
        Ok(SubmissionReceipt {
            submission,
            message: SUCCESS_MESSAGE,
        })
    }
}
