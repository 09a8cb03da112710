/// Message attached to a field that broke one of its rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Input `name` of the field.
    pub field: String,
    pub message: String,
}

/// Outcome of a field or whole-form check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    #[default]
    Valid,
    /// At least one field broke a rule, in field order.
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Empty when valid.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    pub fn first_error(&self) -> Option<&FieldError> {
        self.errors().first()
    }

    /// Error message for one field.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors()
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}
