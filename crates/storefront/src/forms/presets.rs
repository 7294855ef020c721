//! The storefront's two forms.

use super::{FormValidator, RuleSet};

/// Fields of the contact form.
pub const CONTACT_FIELDS: [&str; 4] = ["name", "email", "topic", "message"];

/// Fields of the product review form.
pub const REVIEW_FIELDS: [&str; 3] = ["name", "email", "review"];

/// Contact page form with the default rules.
#[must_use]
pub fn contact_form() -> FormValidator {
    FormValidator::new(CONTACT_FIELDS, RuleSet::defaults())
}

/// Product review form with the default rules.
#[must_use]
pub fn review_form() -> FormValidator {
    FormValidator::new(REVIEW_FIELDS, RuleSet::defaults())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_form_uses_review_rules() {
        let mut form = review_form();
        assert_eq!(form.fields().len(), 3);
        assert!(!form.on_input("review", "meh"));
        assert_eq!(
            form.error("review"),
            Some("Review must be at least 10 characters long")
        );
    }

    #[test]
    fn test_forms_share_rules_for_common_fields() {
        let mut contact = contact_form();
        let mut review = review_form();
        assert_eq!(contact.on_input("email", "a@b"), review.on_input("email", "a@b"));
        assert_eq!(contact.error("email"), review.error("email"));
    }
}
