//! Per-field rule set.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::format::parse_leading_float;

/// Custom check, called with the trimmed value.
pub type CustomRule = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Rule identifiers, used to override messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Required,
    MinLength,
    MaxLength,
    Email,
    Phone,
    Number,
    Min,
    Max,
    Pattern,
    Custom,
}

/// Rules for one field.
///
/// Rules are checked in a fixed order (required, lengths, email, phone,
/// number, range, pattern, custom) and the first failure wins. An empty
/// value passes every rule but `required`.
#[derive(Clone, Default)]
pub struct FieldRules {
    required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    email: bool,
    phone: bool,
    number: bool,
    min: Option<f64>,
    max: Option<f64>,
    pattern: Option<Regex>,
    custom: Option<CustomRule>,
    messages: HashMap<RuleKind, String>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Minimum length in characters.
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Maximum length in characters.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    /// Brazilian phone number: `(dd) dddd-dddd` or `(dd) ddddd-dddd`.
    pub fn phone(mut self) -> Self {
        self.phone = true;
        self
    }

    pub fn number(mut self) -> Self {
        self.number = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn custom(mut self, check: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.custom = Some(Arc::new(check));
        self
    }

    /// Override the message of one rule.
    pub fn message(mut self, rule: RuleKind, message: impl Into<String>) -> Self {
        self.messages.insert(rule, message.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Check a value. Leading and trailing whitespace is ignored.
    pub fn check(&self, value: &str) -> Result<(), String> {
        let value = value.trim();

        if value.is_empty() {
            return if self.required {
                Err(self.message_for(RuleKind::Required))
            } else {
                Ok(())
            };
        }

        let length = value.chars().count();
        if self.min_length.is_some_and(|min| length < min) {
            return Err(self.message_for(RuleKind::MinLength));
        }
        if self.max_length.is_some_and(|max| length > max) {
            return Err(self.message_for(RuleKind::MaxLength));
        }
        if self.email && !is_email(value) {
            return Err(self.message_for(RuleKind::Email));
        }
        if self.phone && !is_phone(value) {
            return Err(self.message_for(RuleKind::Phone));
        }
        if self.number && !value.parse::<f64>().is_ok_and(|n| !n.is_nan()) {
            return Err(self.message_for(RuleKind::Number));
        }

        let numeric = parse_leading_float(value);
        if let (Some(min), Some(n)) = (self.min, numeric)
            && n < min
        {
            return Err(self.message_for(RuleKind::Min));
        }
        if let (Some(max), Some(n)) = (self.max, numeric)
            && n > max
        {
            return Err(self.message_for(RuleKind::Max));
        }

        if self.pattern.as_ref().is_some_and(|re| !re.is_match(value)) {
            return Err(self.message_for(RuleKind::Pattern));
        }
        if self.custom.as_ref().is_some_and(|check| !check(value)) {
            return Err(self.message_for(RuleKind::Custom));
        }
        Ok(())
    }

    fn message_for(&self, rule: RuleKind) -> String {
        if let Some(message) = self.messages.get(&rule) {
            return message.clone();
        }
        match rule {
            RuleKind::Required => "Este campo é obrigatório".to_string(),
            RuleKind::MinLength => {
                format!("Mínimo de {} caracteres", self.min_length.unwrap_or_default())
            }
            RuleKind::MaxLength => {
                format!("Máximo de {} caracteres", self.max_length.unwrap_or_default())
            }
            RuleKind::Email => "E-mail inválido".to_string(),
            RuleKind::Phone => "Telefone inválido".to_string(),
            RuleKind::Number => "Número inválido".to_string(),
            RuleKind::Min => format!("Valor mínimo: {}", self.min.unwrap_or_default()),
            RuleKind::Max => format!("Valor máximo: {}", self.max.unwrap_or_default()),
            RuleKind::Pattern => "Formato inválido".to_string(),
            RuleKind::Custom => "Valor inválido".to_string(),
        }
    }
}

impl fmt::Debug for FieldRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRules")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("number", &self.number)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Address check; the domain must contain a dot.
fn is_email(value: &str) -> bool {
    email_address::EmailAddress::is_valid(value)
        && value
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.contains('.'))
}

/// `(dd)`, optional space, then 4-5 digits, optional `-`, 4 digits.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\([0-9]{2}\)\s?[0-9]{4,5}-?[0-9]{4}$").expect("invalid phone regex")
});

pub fn is_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_formats() {
        assert!(is_phone("(11) 98765-4321"));
        assert!(is_phone("(11) 8765-4321"));
        assert!(is_phone("(11)987654321"));
        assert!(!is_phone("11 98765-4321"));
        assert!(!is_phone("(1) 98765-4321"));
        assert!(!is_phone("(11) 987-4321"));
        assert!(!is_phone("(11)  98765-4321"));
        assert!(!is_phone("(11) 98765-4321 "));
        assert!(!is_phone("(11) 98765-432a"));
    }

    #[test]
    fn test_email_needs_dotted_domain() {
        assert!(is_email("ana@empresa.com.br"));
        assert!(!is_email("ana@localhost"));
        assert!(!is_email("ana"));
    }
}
