//! Form validation.
//!
//! Per-field rules with Portuguese default messages, checked on submit,
//! on blur and (debounced) while the user corrects an invalid field.
//!
//! # Example
//!
//! ```ignore
//! use panelkit::validation::{FieldRules, FormValidator};
//!
//! let validator = FormValidator::builder()
//!     .field("nome", FieldRules::new().required().min_length(3))
//!     .field("email", FieldRules::new().required().email())
//!     .field("telefone", FieldRules::new().phone())
//!     .build();
//!
//! let result = validator.validate(&values);
//! if result.is_invalid() {
//!     toasts.error(result.first_error().map(|e| e.message.as_str()).unwrap_or_default());
//! }
//! ```

mod result;
mod rules;
mod validator;

pub use result::{FieldError, ValidationResult};
pub use rules::{CustomRule, FieldRules, RuleKind, is_phone};
pub use validator::{
    ErrorHook, FieldValues, FormValidator, FormValidatorBuilder, INPUT_DEBOUNCE,
};
