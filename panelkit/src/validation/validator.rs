//! Form-level validator.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, Weak};
use std::time::Duration;

use paneldom::Element;

use super::result::{FieldError, ValidationResult};
use super::rules::FieldRules;
use crate::debounce::Debouncer;

/// Quiet period before an invalid field is re-checked while typing.
pub const INPUT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Current form values keyed by input name.
pub type FieldValues = BTreeMap<String, String>;

/// Called with `(field, message)` whenever a field's error appears,
/// changes or clears.
pub type ErrorHook = Arc<dyn Fn(&str, Option<&str>) + Send + Sync>;

struct FieldEntry {
    name: String,
    rules: FieldRules,
    debouncer: Debouncer,
}

struct ValidatorShared {
    fields: Vec<FieldEntry>,
    errors: RwLock<BTreeMap<String, String>>,
    on_error: Option<ErrorHook>,
}

/// Builder for [`FormValidator`].
#[derive(Default)]
pub struct FormValidatorBuilder {
    fields: Vec<(String, FieldRules)>,
    on_error: Option<ErrorHook>,
}

impl FormValidatorBuilder {
    /// Add a field. Re-adding a name replaces its rules.
    pub fn field(mut self, name: impl Into<String>, rules: FieldRules) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = rules,
            None => self.fields.push((name, rules)),
        }
        self
    }

    pub fn on_error(mut self, hook: impl Fn(&str, Option<&str>) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> FormValidator {
        let fields = self
            .fields
            .into_iter()
            .map(|(name, rules)| FieldEntry {
                name,
                rules,
                debouncer: Debouncer::new(INPUT_DEBOUNCE),
            })
            .collect();

        FormValidator {
            shared: Arc::new(ValidatorShared {
                fields,
                errors: RwLock::new(BTreeMap::new()),
                on_error: self.on_error,
            }),
        }
    }
}

/// Validates a form's fields and tracks their current errors.
///
/// Clones share the same error state.
#[derive(Clone)]
pub struct FormValidator {
    shared: Arc<ValidatorShared>,
}

impl FormValidator {
    pub fn builder() -> FormValidatorBuilder {
        FormValidatorBuilder::default()
    }

    /// Names of the validated fields, in declaration order.
    pub fn fields(&self) -> Vec<String> {
        self.shared.fields.iter().map(|f| f.name.clone()).collect()
    }

    /// Validate every field present in `values`.
    ///
    /// Fields absent from `values` are not checked and keep their current
    /// error state.
    pub fn validate(&self, values: &FieldValues) -> ValidationResult {
        let mut errors = Vec::new();
        for field in &self.shared.fields {
            let Some(value) = values.get(&field.name) else {
                continue;
            };
            if let Err(message) = self.check_field(field, value) {
                errors.push(FieldError {
                    field: field.name.clone(),
                    message,
                });
            }
        }

        if !errors.is_empty() {
            log::debug!("form validation failed on {} field(s)", errors.len());
        }
        ValidationResult::from_errors(errors)
    }

    /// Validate one field and record the outcome.
    ///
    /// Unknown fields are always valid.
    pub fn validate_field(&self, name: &str, value: &str) -> bool {
        match self.entry(name) {
            Some(field) => self.check_field(field, value).is_ok(),
            None => true,
        }
    }

    /// Focus left the field.
    pub fn blur(&self, name: &str, value: &str) -> bool {
        self.validate_field(name, value)
    }

    /// The user typed into the field.
    ///
    /// Only a field already showing an error is re-checked, after
    /// [`INPUT_DEBOUNCE`] without further input.
    pub fn input(&self, name: &str, value: impl Into<String>) {
        if self.error(name).is_none() {
            return;
        }
        let Some(field) = self.entry(name) else {
            return;
        };

        let weak = Arc::downgrade(&self.shared);
        let name = name.to_string();
        let value = value.into();
        field.debouncer.schedule(move || {
            if let Some(validator) = Self::from_weak(&weak) {
                validator.validate_field(&name, &value);
            }
        });
    }

    /// Current error of a field.
    pub fn error(&self, name: &str) -> Option<String> {
        self.shared
            .errors
            .read()
            .ok()
            .and_then(|errors| errors.get(name).cloned())
    }

    pub fn errors(&self) -> BTreeMap<String, String> {
        self.shared
            .errors
            .read()
            .map(|errors| errors.clone())
            .unwrap_or_default()
    }

    pub fn has_errors(&self) -> bool {
        self.shared
            .errors
            .read()
            .map(|errors| !errors.is_empty())
            .unwrap_or(false)
    }

    /// Clear every error and cancel pending re-checks.
    pub fn reset(&self) {
        for field in &self.shared.fields {
            field.debouncer.cancel();
        }
        let cleared = match self.shared.errors.write() {
            Ok(mut errors) => std::mem::take(&mut *errors),
            Err(_) => return,
        };
        for name in cleared.keys() {
            self.notify(name, None);
        }
    }

    /// Wrap an input with its validation state.
    ///
    /// An invalid input gets the `is-invalid` class and `aria-invalid`,
    /// followed by a `div.invalid-feedback` carrying the message.
    pub fn decorate(&self, name: &str, input: Element) -> Element {
        let group = Element::div().class("form-field");
        match self.error(name) {
            Some(message) => group
                .class("has-error")
                .child(input.class("is-invalid").aria("invalid", "true"))
                .child(
                    Element::div()
                        .class("invalid-feedback")
                        .role("alert")
                        .child(Element::text(message)),
                ),
            None => group.child(input),
        }
    }

    fn from_weak(weak: &Weak<ValidatorShared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    fn entry(&self, name: &str) -> Option<&FieldEntry> {
        self.shared.fields.iter().find(|f| f.name == name)
    }

    fn check_field(&self, field: &FieldEntry, value: &str) -> Result<(), String> {
        let outcome = field.rules.check(value);
        self.set_error(&field.name, outcome.as_ref().err().cloned());
        outcome
    }

    fn set_error(&self, name: &str, message: Option<String>) {
        let changed = {
            let Ok(mut errors) = self.shared.errors.write() else {
                return;
            };
            match &message {
                Some(m) if errors.get(name) == Some(m) => false,
                Some(m) => {
                    errors.insert(name.to_string(), m.clone());
                    true
                }
                None => errors.remove(name).is_some(),
            }
        };

        if changed {
            self.notify(name, message.as_deref());
        }
    }

    fn notify(&self, name: &str, message: Option<&str>) {
        if let Some(hook) = &self.shared.on_error {
            hook(name, message);
        }
    }
}

impl std::fmt::Debug for FormValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormValidator")
            .field("fields", &self.fields())
            .field("errors", &self.errors())
            .finish()
    }
}
