//! Integration tests for the contact and review forms.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use boutique_core::FieldStatus;
use boutique_storefront::error::{ErrorCategory, StorefrontError};
use boutique_storefront::forms::{
    FormError, FormSubmission, RuleKind, RuleOverride, SUCCESS_MESSAGE, SimulatedTransport,
    SubmitTransport, TransportError, contact_form, review_form,
};

struct RejectingTransport;

impl SubmitTransport for RejectingTransport {
    async fn send(&self, _submission: &FormSubmission) -> Result<(), TransportError> {
        Err(TransportError::Rejected("mailbox full".to_string()))
    }
}

#[test]
fn test_required_message_takes_priority_over_pattern() {
    let mut form = contact_form();
    assert!(!form.on_input("email", "   "));
    assert_eq!(form.error("email"), Some("Email address is required"));

    assert!(!form.on_input("name", ""));
    assert_eq!(form.error("name"), Some("Name is required"));
}

#[tokio::test]
async fn test_empty_required_field_blocks_submit() {
    let mut form = contact_form();
    form.on_input("name", "Anna");
    form.on_input("email", "anna@example.com");
    form.on_input("topic", "Returns");

    let err = form
        .submit(&SimulatedTransport::new(Duration::ZERO))
        .await
        .unwrap_err();
    let FormError::Invalid(errors) = &err else {
        panic!("expected validation errors");
    };
    assert_eq!(
        errors,
        &vec![("message".to_string(), "Message is required".to_string())]
    );
    assert_eq!(StorefrontError::from(err).category(), ErrorCategory::Validation);
}

#[tokio::test]
async fn test_review_form_round_trip() {
    let mut form = review_form();
    form.on_input("name", "Олена");
    form.on_input("email", "olena@example.com");
    form.on_input("review", "  Lovely fabric, true to size.  ");

    let receipt = form
        .submit(&SimulatedTransport::new(Duration::ZERO))
        .await
        .unwrap();
    assert_eq!(receipt.message, SUCCESS_MESSAGE);
    assert_eq!(
        receipt.submission.values["review"],
        "Lovely fabric, true to size."
    );

    let json = serde_json::to_value(&receipt.submission).unwrap();
    assert_eq!(json["email"], "olena@example.com");
    assert!(json["timestamp"].is_string());

    assert_eq!(form.status("review"), FieldStatus::Untouched);
}

#[tokio::test]
async fn test_rejected_submission_is_reported() {
    let mut form = review_form();
    form.on_input("name", "Anna");
    form.on_input("email", "anna@example.com");
    form.on_input("review", "Runs a little large.");

    let err = form.submit(&RejectingTransport).await.unwrap_err();
    assert!(matches!(err, FormError::Transport(TransportError::Rejected(_))));
    assert_eq!(form.status("review"), FieldStatus::Valid);
}

#[test]
fn test_custom_rules_merge_with_defaults() {
    let mut form = contact_form().with_rule(
        "topic",
        RuleOverride {
            max_length: Some(10),
            ..RuleOverride::default()
        }
        .message(RuleKind::MaxLength, "Keep the topic short"),
    );

    assert!(!form.on_input("topic", "A very long topic line"));
    assert_eq!(form.error("topic"), Some("Keep the topic short"));
    assert!(!form.on_input("topic", "Hi"));
    assert_eq!(form.error("topic"), Some("Topic must be at least 3 characters long"));
    assert!(form.on_input("topic", "Sizing"));
}
