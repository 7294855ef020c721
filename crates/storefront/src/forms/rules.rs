//! Field rules and their messages.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s\x{0400}-\x{04FF}]+$").expect("Invalid regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

/// The rule kinds, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Required,
    MinLength,
    MaxLength,
    Pattern,
}

impl RuleKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Pattern => "pattern",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed rule and the message to show for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: RuleKind,
    pub message: String,
}

/// Rules for one field.
///
/// Values are checked after trimming. Length limits count characters.
/// Length and pattern rules only apply to non-empty values, so an empty
/// optional field is always valid.
#[derive(Debug, Clone)]
pub struct FieldRules {
    label: String,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    messages: HashMap<RuleKind, String>,
}

impl FieldRules {
    /// Empty rules for a field shown to users as `label`.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            required: false,
            min_length: None,
            max_length: None,
            pattern: None,
            messages: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn min_length(mut self, chars: usize) -> Self {
        self.min_length = Some(chars);
        self
    }

    #[must_use]
    pub const fn max_length(mut self, chars: usize) -> Self {
        self.max_length = Some(chars);
        self
    }

    #[must_use]
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Set the message shown when `kind` fails.
    #[must_use]
    pub fn message(mut self, kind: RuleKind, message: impl Into<String>) -> Self {
        self.messages.insert(kind, message.into());
        self
    }

    /// Message for a failed rule, falling back to a generic one.
    #[must_use]
    pub fn message_for(&self, kind: RuleKind) -> String {
        if let Some(message) = self.messages.get(&kind) {
            return message.clone();
        }
        let label = &self.label;
        match kind {
            RuleKind::Required => format!("{label} is required"),
            RuleKind::MinLength => format!(
                "{label} must be at least {} characters long",
                self.min_length.unwrap_or_default()
            ),
            RuleKind::MaxLength => format!(
                "{label} must not exceed {} characters",
                self.max_length.unwrap_or_default()
            ),
            RuleKind::Pattern => format!("{label} is not in a valid format"),
        }
    }

    /// Check a value. Returns the first failing rule, if any.
    #[must_use]
    pub fn check(&self, value: &str) -> Option<Violation> {
        let value = value.trim();
        let failed = if value.is_empty() {
            self.required.then_some(RuleKind::Required)
        } else {
            let chars = value.chars().count();
            if self.min_length.is_some_and(|min| chars < min) {
                Some(RuleKind::MinLength)
            } else if self.max_length.is_some_and(|max| chars > max) {
                Some(RuleKind::MaxLength)
            } else if self.pattern.as_ref().is_some_and(|re| !re.is_match(value)) {
                Some(RuleKind::Pattern)
            } else {
                None
            }
        };
        failed.map(|kind| Violation {
            kind,
            message: self.message_for(kind),
        })
    }

    /// Apply an override on top of these rules.
    #[must_use]
    pub fn merged(mut self, patch: RuleOverride) -> Self {
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(min) = patch.min_length {
            self.min_length = Some(min);
        }
        if let Some(max) = patch.max_length {
            self.max_length = Some(max);
        }
        if let Some(pattern) = patch.pattern {
            self.pattern = Some(pattern);
        }
        self.messages.extend(patch.messages);
        self
    }
}

/// Partial rules merged over a field's existing rules.
///
/// Unset entries keep the existing value. Messages are merged per rule kind.
#[derive(Debug, Clone, Default)]
pub struct RuleOverride {
    pub required: Option<bool>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub messages: HashMap<RuleKind, String>,
}

impl RuleOverride {
    #[must_use]
    pub fn message(mut self, kind: RuleKind, message: impl Into<String>) -> Self {
        self.messages.insert(kind, message.into());
        self
    }
}

/// Rules for every field of a form, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    fields: HashMap<String, FieldRules>,
}

impl RuleSet {
    /// No rules at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in rules for `name`, `email`, `topic`, `message` and `review`.
    #[must_use]
    pub fn defaults() -> Self {
        let mut rules = Self::empty();
        rules.insert(
            "name",
            FieldRules::new("Name")
                .required()
                .min_length(2)
                .max_length(50)
                .pattern(NAME_RE.clone())
                .message(RuleKind::Pattern, "Name can only contain letters and spaces"),
        );
        rules.insert(
            "email",
            FieldRules::new("Email address")
                .required()
                .pattern(EMAIL_RE.clone())
                .message(RuleKind::Pattern, "Please enter a valid email address"),
        );
        rules.insert(
            "topic",
            FieldRules::new("Topic").required().min_length(3).max_length(100),
        );
        rules.insert(
            "message",
            FieldRules::new("Message").required().min_length(10).max_length(500),
        );
        rules.insert(
            "review",
            FieldRules::new("Review").required().min_length(10).max_length(1000),
        );
        rules
    }

    /// Replace the rules for `field`.
    pub fn insert(&mut self, field: impl Into<String>, rules: FieldRules) {
        self.fields.insert(field.into(), rules);
    }

    /// Merge `patch` over the rules for `field`. A field with no rules yet
    /// starts from empty rules labeled with the field name.
    pub fn merge(&mut self, field: &str, patch: RuleOverride) {
        let base = self
            .fields
            .remove(field)
            .unwrap_or_else(|| FieldRules::new(field));
        self.fields.insert(field.to_string(), base.merged(patch));
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldRules> {
        self.fields.get(field)
    }
}
