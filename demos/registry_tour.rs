//! Registry Tour Example
//!
//! Walks the composed registry layer by layer: overrides, aliases, guards
//! and the extension hook. Composition and guard events are logged through
//! `tracing`.
//!
//! Run with: RUST_LOG=debug cargo run --example registry_tour --features tracing

use validex::{BaseLibrary, LocaleCatalog, Param, Predicate, Registry};

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Registry Tour ===\n");

    let registry = build_registry();
    println!("{} predicates registered\n", registry.len());

    overrides(&registry);
    aliases(&registry);
    patterns(&registry);
    guards(&registry);
    extension(registry);
}

/// A base library with a couple of locale-aware stand-ins so the guards have
/// something to wrap.
fn build_registry() -> Registry {
    let base = BaseLibrary::standard()
        .with_predicate("isVAT", Predicate::text(|s, cc| s.starts_with(cc)))
        .with_predicate(
            "isPostalCode",
            Predicate::text(|s, _| s.len() == 5 && s.bytes().all(|b| b.is_ascii_digit())),
        )
        .with_catalog(LocaleCatalog::new().with_postal_code(["US", "DE"]));

    Registry::from_library(&base)
}

fn show(registry: &Registry, name: &str, subject: &str, params: &[Param]) {
    match registry.invoke(name, subject, params) {
        Ok(result) => println!("  {}({:?}): {}", name, subject, result),
        Err(e) => println!("  {}({:?}): error: {}", name, subject, e),
    }
}

fn overrides(registry: &Registry) {
    println!("--- Overrides ---\n");

    show(registry, "notEmpty", "   \t", &[]); // false - whitespace only
    show(registry, "notEmpty", " a ", &[]);
    show(registry, "isDecimal", "", &[]); // false - empty is never decimal
    show(registry, "isDecimal", "-12e-3", &[]);
    show(registry, "min", "not-a-number", &[Param::from(5)]); // true - permissive
    show(registry, "min", "3", &[Param::from(5)]);
    show(registry, "contains", "hello", &[Param::from("")]); // false - empty needle
    show(registry, "isDate", "2024-02-29", &[]);
    println!();
}

fn aliases(registry: &Registry) {
    println!("--- Aliases ---\n");

    show(registry, "len", "hello", &[Param::from(2), Param::from(4)]);
    show(registry, "isUrl", "https://example.com", &[]);
    show(registry, "isIPv4", "192.168.0.1", &[]);
    show(registry, "isIPv6", "192.168.0.1", &[]);
    show(registry, "notIn", "red", &[Param::from(vec!["green", "blue"])]);
    show(registry, "isNull", "", &[]);
    println!(
        "  notNull(None): {:?}",
        registry.invoke_nullable("notNull", None, &[])
    );
    println!();
}

fn patterns(registry: &Registry) {
    println!("--- Patterns ---\n");

    show(registry, "is", "ABC-123", &[Param::from("^[a-z]+-\\d+$"), Param::from("i")]);
    show(registry, "not", "ABC-123", &[Param::from("^[a-z]+-\\d+$")]);
    show(registry, "regex", "x", &[Param::from("(")]); // error - malformed
    println!();
}

fn guards(registry: &Registry) {
    println!("--- Guards ---\n");

    show(registry, "isVAT", "GB123456789", &[Param::from("GB")]);
    show(registry, "isVAT", "FR123456789", &[Param::from("FR")]); // rejected
    show(registry, "isPostalCode", "10115", &[Param::from("DE")]);
    show(registry, "isPostalCode", "10115", &[Param::from("FR")]); // rejected
    show(registry, "isISBN", "0306406152", &[]); // not installed: no delegate
    println!();
}

fn extension(mut registry: Registry) {
    println!("--- Extension ---\n");

    show(&registry, "isHexColor", "#ff0000", &[]);
    registry.extend(
        "isHexColor",
        Predicate::unary(|s| {
            s.strip_prefix('#').is_some_and(|hex| {
                matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
            })
        }),
    );
    show(&registry, "isHexColor", "#ff0000", &[]);
    show(&registry, "isHexColor", "ff0000", &[]);
}
