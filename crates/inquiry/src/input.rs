use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError, ValidationErrors};

/// Project types offered by the contact form. Other values are relayed too.
pub const PROJECT_TYPES: [&str; 5] = [
    "Custom Painting",
    "Photography Session",
    "Digital Art Commission",
    "Art Direction",
    "Other",
];

/// Contact form submission as received on the wire.
///
/// Missing or null keys deserialize to empty strings so that validation,
/// not the JSON extractor, reports them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct InquiryInput {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    #[serde(deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[validate(custom(function = "not_blank"), length(max = 100))]
    #[serde(deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[validate(custom(function = "not_blank"), email)]
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[validate(custom(function = "not_blank"), length(max = 100))]
    #[serde(deserialize_with = "null_as_empty")]
    pub project_type: String,
    #[validate(length(max = 100))]
    pub budget: Option<String>,
    #[validate(custom(function = "not_blank"), length(max = 5000))]
    #[serde(deserialize_with = "null_as_empty")]
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("must not be blank".into()));
    }
    Ok(())
}

/// A validated contact form submission. Never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Inquiry {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub project_type: String,
    pub budget: Option<String>,
    pub message: String,
}

impl InquiryInput {
    pub fn into_inquiry(self) -> Result<Inquiry, ValidationErrors> {
        self.validate()?;

        Ok(Inquiry {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            project_type: self.project_type,
            budget: self.budget.filter(|budget| !budget.trim().is_empty()),
            message: self.message,
        })
    }
}

impl Inquiry {
    /// Whether the project type is one the contact form offers
    pub fn has_known_project_type(&self) -> bool {
        PROJECT_TYPES.contains(&self.project_type.as_str())
    }

    pub fn subject(&self) -> String {
        format!(
            "New Portfolio Inquiry from {} {}",
            self.first_name, self.last_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> InquiryInput {
        InquiryInput {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            project_type: PROJECT_TYPES[0].to_string(),
            budget: None,
            message: "A large abstract piece in warm colors.".to_string(),
        }
    }

    #[test]
    fn test_valid_input_converts() {
        let inquiry = input().into_inquiry().unwrap();

        assert_eq!(inquiry.first_name, "John");
        assert_eq!(inquiry.project_type, "Custom Painting");
        assert_eq!(inquiry.budget, None);
    }

    #[test]
    fn test_blank_budget_is_dropped() {
        let inquiry = InquiryInput {
            budget: Some("   ".to_string()),
            ..input()
        }
        .into_inquiry()
        .unwrap();

        assert_eq!(inquiry.budget, None);

        let inquiry = InquiryInput {
            budget: Some("$1,000 - $5,000".to_string()),
            ..input()
        }
        .into_inquiry()
        .unwrap();

        assert_eq!(inquiry.budget.as_deref(), Some("$1,000 - $5,000"));
    }

    #[test]
    fn test_blank_message_is_rejected() {
        let errors = InquiryInput {
            message: " \n\t".to_string(),
            ..input()
        }
        .into_inquiry()
        .unwrap_err();

        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["message"][0].code, "required");
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let errors = InquiryInput {
            email: "john.doe".to_string(),
            ..input()
        }
        .into_inquiry()
        .unwrap_err();

        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_every_required_field_reported() {
        let errors = InquiryInput::default().into_inquiry().unwrap_err();

        // first name, last name, email, project type, message
        assert_eq!(errors.field_errors().len(), 5);
    }

    #[test]
    fn test_oversized_message_is_rejected() {
        let errors = InquiryInput {
            message: "a".repeat(5001),
            ..input()
        }
        .into_inquiry()
        .unwrap_err();

        assert_eq!(errors.field_errors()["message"][0].code, "length");
    }

    #[test]
    fn test_deserialize_camel_case_with_missing_and_null() {
        let input: InquiryInput = serde_json::from_str(
            r#"{"firstName":"Ana","lastName":"Lí","email":"ana@example.com","budget":null,"message":"hi"}"#,
        )
        .unwrap();

        assert_eq!(input.first_name, "Ana");
        assert_eq!(input.last_name, "Lí");
        assert_eq!(input.project_type, "");
        assert_eq!(input.budget, None);
        assert!(input.into_inquiry().is_err());
    }

    #[test]
    fn test_null_required_fields_reported_as_missing() {
        let input: InquiryInput = serde_json::from_str(
            r#"{"firstName":null,"lastName":"Doe","email":"john.doe@example.com","projectType":"Other","message":null}"#,
        )
        .unwrap();

        assert_eq!(input.first_name, "");

        let errors = input.into_inquiry().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["first_name"][0].code, "required");
        assert_eq!(fields["message"][0].code, "required");
    }

    #[test]
    fn test_unlisted_project_type_is_accepted() {
        let inquiry = InquiryInput {
            project_type: "Mural".to_string(),
            ..input()
        }
        .into_inquiry()
        .unwrap();

        assert!(!inquiry.has_known_project_type());
        assert!(input().into_inquiry().unwrap().has_known_project_type());
    }

    #[test]
    fn test_subject_keeps_names_verbatim() {
        let inquiry = InquiryInput {
            first_name: "Mary Ann".to_string(),
            last_name: "Ødegård 山田".to_string(),
            ..input()
        }
        .into_inquiry()
        .unwrap();

        assert_eq!(
            inquiry.subject(),
            "New Portfolio Inquiry from Mary Ann Ødegård 山田"
        );
    }
}
