//! Field Validation Example
//!
//! A small field-rule layer on top of the registry: each rule names a
//! predicate and its parameters, and a record is checked against every rule.
//! Includes the immutability check and a caller-registered predicate.
//!
//! Run with: cargo run --example field_validation

use serde_json::{json, Value};
use validex::testing::MockRecord;
use validex::{Param, Predicate, RecordLike, Registry, ValidatorError};

struct Rule {
    field: &'static str,
    predicate: &'static str,
    params: Vec<Param>,
}

impl Rule {
    fn new(field: &'static str, predicate: &'static str, params: Vec<Param>) -> Self {
        Self {
            field,
            predicate,
            params,
        }
    }
}

#[derive(Debug)]
enum FieldError {
    Failed {
        field: &'static str,
        predicate: &'static str,
    },
    Unusable {
        field: &'static str,
        source: ValidatorError,
    },
}

fn check(registry: &Registry, rules: &[Rule], record: &MockRecord) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for rule in rules {
        let value = record.data_value(rule.field).unwrap_or(Value::Null);
        let result = match registry.signature(rule.predicate) {
            Some(validex::Signature::Instance) => registry.invoke_instance(
                rule.predicate,
                &value,
                &rule.params,
                rule.field,
                record,
            ),
            _ => {
                let subject = match &value {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                registry.invoke(rule.predicate, &subject, &rule.params)
            }
        };

        match result {
            Ok(true) => {}
            Ok(false) => errors.push(FieldError::Failed {
                field: rule.field,
                predicate: rule.predicate,
            }),
            Err(source) => errors.push(FieldError::Unusable {
                field: rule.field,
                source,
            }),
        }
    }

    errors
}

fn report(label: &str, errors: &[FieldError]) {
    if errors.is_empty() {
        println!("✓ {}: valid", label);
        return;
    }
    println!("✗ {}: {} problem(s)", label, errors.len());
    for error in errors {
        match error {
            FieldError::Failed { field, predicate } => {
                println!("  - {} failed {}", field, predicate)
            }
            FieldError::Unusable { field, source } => {
                println!("  - {} could not be checked: {}", field, source)
            }
        }
    }
}

fn main() {
    println!("=== Field Validation Example ===\n");

    let mut registry = Registry::standard();
    registry.extend(
        "isSku",
        Predicate::unary(|s| {
            s.len() == 8 && s.starts_with("SKU-") && s[4..].bytes().all(|b| b.is_ascii_digit())
        }),
    );

    let rules = vec![
        Rule::new("name", "notEmpty", vec![]),
        Rule::new("name", "len", vec![Param::from(2), Param::from(40)]),
        Rule::new("price", "isDecimal", vec![]),
        Rule::new("price", "min", vec![Param::from(0)]),
        Rule::new("homepage", "isUrl", vec![]),
        Rule::new("sku", "isSku", vec![]),
        Rule::new("sku", "isImmutable", vec![]),
        Rule::new("color", "notIn", vec![Param::from(vec!["beige", "taupe"])]),
    ];

    let draft = MockRecord::new_record()
        .with_field("name", json!("Lamp"), json!(null))
        .with_field("price", json!("19.99"), json!(null))
        .with_field("homepage", json!("https://example.com/lamp"), json!(null))
        .with_field("sku", json!("SKU-0001"), json!(null))
        .with_field("color", json!("teal"), json!(null));
    report("new product", &check(&registry, &rules, &draft));

    let mut saved = MockRecord::persisted()
        .with_field("name", json!("Lamp"), json!("Lamp"))
        .with_field("price", json!("19.99"), json!("19.99"))
        .with_field(
            "homepage",
            json!("https://example.com/lamp"),
            json!("https://example.com/lamp"),
        )
        .with_field("sku", json!("SKU-0001"), json!("SKU-0001"))
        .with_field("color", json!("teal"), json!("teal"));
    report("saved product", &check(&registry, &rules, &saved));

    saved.set("sku", json!("SKU-0002"));
    saved.set("price", json!("-4"));
    saved.set("color", json!("beige"));
    saved.set("name", json!("   "));
    report("edited product", &check(&registry, &rules, &saved));

    let broken = vec![Rule::new("name", "matches", vec![Param::from("([a-z]")])];
    report("broken rule", &check(&registry, &broken, &saved));
}
