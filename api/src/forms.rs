use crate::models::Post;
use serde::Serialize;
use serde_json::Value;
use std::{borrow::Cow, collections::BTreeMap};
use validator::{Validate, ValidationError, ValidationErrors};

/// Field name -> messages, in field order.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Raw title/content as submitted by the client.
///
/// Built with `from_body`, so an incomplete body ends up in the `Invalid`
/// branch instead of being rejected by an extractor.
#[derive(Debug, Clone, Default, Validate)]
pub struct PostSubmission {
    #[validate(
        custom(function = "required"),
        length(max = 100, message = "Field cannot be longer than 100 characters.")
    )]
    pub title: String,
    #[validate(custom(function = "required"))]
    pub content: String,
}

/// Title and content that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(PostFields),
    Invalid(FieldErrors),
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("This field is required.")));
    }
    Ok(())
}

fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|error| match &error.message {
                    Some(message) => message.to_string(),
                    None => error.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

impl PostSubmission {
    /// Parse a request body field by field. A field that is missing or not
    /// a string is empty; the other fields keep what the user sent. A body
    /// that is not JSON at all is an empty submission.
    pub fn from_body(body: &[u8]) -> Self {
        let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Self {
            title: field("title"),
            content: field("content"),
        }
    }

    pub fn check(&self) -> ValidationResult {
        match self.validate() {
            Ok(()) => ValidationResult::Valid(PostFields {
                title: self.title.clone(),
                content: self.content.clone(),
            }),
            Err(errors) => ValidationResult::Invalid(field_errors(&errors)),
        }
    }
}

/// What the create/update form shows: current values plus any errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub errors: FieldErrors,
}

impl PostForm {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn prefilled(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            errors: FieldErrors::new(),
        }
    }

    /// Re-display a rejected submission with what the user already typed.
    pub fn rejected(submission: PostSubmission, errors: FieldErrors) -> Self {
        Self {
            title: submission.title,
            content: submission.content,
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(title: &str, content: &str) -> PostSubmission {
        PostSubmission {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_valid_submission() {
        let result = submission("Hello", "World").check();

        assert_eq!(
            result,
            ValidationResult::Valid(PostFields {
                title: "Hello".into(),
                content: "World".into(),
            })
        );
    }

    #[test]
    fn test_blank_fields_are_required() {
        let ValidationResult::Invalid(errors) = submission("   ", "").check() else {
            panic!("blank submission should be invalid");
        };

        assert_eq!(errors["title"], vec!["This field is required."]);
        assert_eq!(errors["content"], vec!["This field is required."]);
    }

    #[test]
    fn test_title_length_limit() {
        let long_title = "x".repeat(101);
        let ValidationResult::Invalid(errors) = submission(&long_title, "body").check() else {
            panic!("long title should be invalid");
        };

        assert_eq!(
            errors["title"],
            vec!["Field cannot be longer than 100 characters."]
        );
        assert!(!errors.contains_key("content"));
        assert!(matches!(
            submission(&"x".repeat(100), "body").check(),
            ValidationResult::Valid(_)
        ));
    }

    #[test]
    fn test_from_body_is_lenient() {
        let parsed = PostSubmission::from_body(br#"{"title":"only title"}"#);
        assert_eq!(parsed.title, "only title");
        assert_eq!(parsed.content, "");

        let garbage = PostSubmission::from_body(b"not json");
        assert_eq!(garbage.title, "");
        assert!(matches!(garbage.check(), ValidationResult::Invalid(_)));
    }

    #[test]
    fn test_from_body_keeps_well_typed_fields() {
        let parsed = PostSubmission::from_body(br#"{"title": 5, "content": "kept"}"#);

        assert_eq!(parsed.title, "");
        assert_eq!(parsed.content, "kept");
        let ValidationResult::Invalid(errors) = parsed.check() else {
            panic!("numeric title should be invalid");
        };
        assert!(errors.contains_key("title"));
        assert!(!errors.contains_key("content"));
    }

    #[test]
    fn test_rejected_form_keeps_input() {
        let input = submission("kept", "");
        let ValidationResult::Invalid(errors) = input.check() else {
            panic!("missing content should be invalid");
        };

        let form = PostForm::rejected(input, errors);

        assert_eq!(form.title, "kept");
        assert!(!form.is_valid());
        assert!(form.errors.contains_key("content"));
    }
}
