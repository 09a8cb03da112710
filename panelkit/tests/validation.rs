use std::sync::{Arc, Mutex};
use std::time::Duration;

use panelkit::prelude::*;
use panelkit::validation::{FieldValues, RuleKind};
use regex::Regex;

fn values(pairs: &[(&str, &str)]) -> FieldValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn customer_form() -> FormValidator {
    FormValidator::builder()
        .field("nome", FieldRules::new().required().min_length(3).max_length(40))
        .field("email", FieldRules::new().required().email())
        .field("telefone", FieldRules::new().phone())
        .field("idade", FieldRules::new().number().min(18.0).max(120.0))
        .build()
}

// ============================================================================
// Rules
// ============================================================================

#[test]
fn test_default_messages() {
    let rules = FieldRules::new().required().min_length(3);
    assert_eq!(rules.check("   "), Err("Este campo é obrigatório".to_string()));
    assert_eq!(rules.check("ab"), Err("Mínimo de 3 caracteres".to_string()));
    assert_eq!(rules.check("  abc  "), Ok(()));

    assert_eq!(
        FieldRules::new().max_length(2).check("abc"),
        Err("Máximo de 2 caracteres".to_string())
    );
    assert_eq!(
        FieldRules::new().email().check("ana@"),
        Err("E-mail inválido".to_string())
    );
    assert_eq!(
        FieldRules::new().phone().check("1234"),
        Err("Telefone inválido".to_string())
    );
    assert_eq!(
        FieldRules::new().number().check("12abc"),
        Err("Número inválido".to_string())
    );
    assert_eq!(FieldRules::new().min(5.0).check("4"), Err("Valor mínimo: 5".to_string()));
    assert_eq!(FieldRules::new().max(9.5).check("10"), Err("Valor máximo: 9.5".to_string()));
}

#[test]
fn test_empty_optional_field_passes() {
    let rules = FieldRules::new().email().min_length(10);
    assert_eq!(rules.check(""), Ok(()));
}

#[test]
fn test_length_counts_characters() {
    assert_eq!(FieldRules::new().max_length(4).check("ação"), Ok(()));
}

#[test]
fn test_pattern_custom_and_overrides() {
    let cep = FieldRules::new().pattern(Regex::new(r"^\d{5}-\d{3}$").unwrap());
    assert_eq!(cep.check("01310-100"), Ok(()));
    assert_eq!(cep.check("01310100"), Err("Formato inválido".to_string()));

    let even = FieldRules::new()
        .custom(|v| v.parse::<i64>().is_ok_and(|n| n % 2 == 0))
        .message(RuleKind::Custom, "Informe um número par");
    assert_eq!(even.check("4"), Ok(()));
    assert_eq!(even.check("3"), Err("Informe um número par".to_string()));
}

// ============================================================================
// Form
// ============================================================================

#[test]
fn test_validate_collects_first_error_per_field() {
    let form = customer_form();
    let result = form.validate(&values(&[
        ("nome", "Jo"),
        ("email", "joao@empresa.com.br"),
        ("telefone", "(11) 98765-4321"),
        ("idade", "12"),
    ]));

    assert!(result.is_invalid());
    assert_eq!(result.errors().len(), 2);
    assert_eq!(result.error_for("nome"), Some("Mínimo de 3 caracteres"));
    assert_eq!(result.error_for("idade"), Some("Valor mínimo: 18"));
    assert_eq!(form.error("idade").as_deref(), Some("Valor mínimo: 18"));
    assert!(form.error("email").is_none());
}

#[test]
fn test_validate_skips_absent_fields() {
    let form = customer_form();
    let result = form.validate(&values(&[("nome", "Joana"), ("email", "joana@empresa.com")]));
    assert!(result.is_valid());
    assert!(!form.has_errors());
}

#[test]
fn test_blur_sets_and_clears_error() {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = changes.clone();
    let form = FormValidator::builder()
        .field("email", FieldRules::new().required().email())
        .on_error(move |field, message| {
            sink.lock().unwrap().push((field.to_string(), message.map(String::from)))
        })
        .build();

    assert!(!form.blur("email", "ana"));
    assert!(!form.blur("email", "ana"));
    assert!(form.blur("email", "ana@empresa.com"));
    assert!(form.validate_field("desconhecido", ""));

    assert_eq!(
        *changes.lock().unwrap(),
        vec![
            ("email".to_string(), Some("E-mail inválido".to_string())),
            ("email".to_string(), None),
        ]
    );
}

#[test]
fn test_decorate_marks_invalid_input() {
    let form = customer_form();
    form.validate_field("nome", "");

    let decorated = form.decorate("nome", Element::div().id("nome"));
    let html = paneldom::to_html(&decorated);
    assert!(html.contains("is-invalid"));
    assert!(html.contains("aria-invalid=\"true\""));
    assert!(html.contains("invalid-feedback"));
    assert!(html.contains("Este campo é obrigatório"));

    form.reset();
    let clean = paneldom::to_html(&form.decorate("nome", Element::div().id("nome")));
    assert!(!clean.contains("is-invalid"));
    assert!(form.errors().is_empty());
}

// ============================================================================
// Revalidation while typing
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_input_revalidates_invalid_field_after_pause() {
    let form = customer_form();
    form.validate_field("email", "ana");
    assert!(form.error("email").is_some());

    form.input("email", "ana@emp");
    form.input("email", "ana@empresa.com");
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(form.error("email").is_some());

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(form.error("email").is_none());
}

#[tokio::test(start_paused = true)]
async fn test_input_ignored_for_valid_field() {
    let form = customer_form();
    form.input("email", "ana");
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(form.error("email").is_none());
}
