//! Declaration parser: recognition of annotated sites and lowering into
//! declarations and invocations.

mod common;

use stylegen::ast::{AccessLevel, ArgumentValue, DeclarationKind, MacroName};
use stylegen::errors::{ErrorCategory, SourceContext, StyleGenError, ValidationContext};
use stylegen::syntax::{lower_site, parse_str, LoweredSite};

fn lower_all(text: &str) -> Vec<Result<LoweredSite, StyleGenError>> {
    let parsed = parse_str(text).expect("file parses");
    let ctx = ValidationContext::new(SourceContext::from_file("test.swift", text), "lower");
    parsed.sites.iter().map(|site| lower_site(site, &ctx)).collect()
}

fn lower_one(text: &str) -> Result<LoweredSite, StyleGenError> {
    let mut sites = lower_all(text);
    assert_eq!(sites.len(), 1, "expected exactly one site in {:?}", text);
    sites.remove(0)
}

#[test]
fn fixture_sites_are_found_in_order() {
    let text = common::fixture_text("client.swift");
    let names: Vec<_> = lower_all(&text)
        .into_iter()
        .map(|site| site.unwrap().declaration.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "MyStyle",
            "MyComponentStyle",
            "EnvironmentValues",
            "MyComponent",
            "View"
        ]
    );
}

#[test]
fn attributes_in_comments_and_strings_are_ignored() {
    let text = r#"
// @Style(subViews: ["A"])
/* @UIComponent
   /* nested @RegisterStyle("X") */ */
let a = "@UIComponent struct S {}"
let b = """
@Style(subViews: [])
protocol P {}
"""
"#;
    assert!(parse_str(text).unwrap().sites.is_empty());
}

#[test]
fn declaration_inside_unannotated_type_is_found() {
    let site = lower_one("enum Namespace {\n    @UIComponent\n    struct Card<Title: View> {}\n}\n")
        .unwrap();
    assert_eq!(site.declaration.name, "Card");
    assert_eq!(site.declaration.generic_parameters, vec!["Title"]);
}

#[test]
fn unknown_attributes_are_kept_out_of_invocations() {
    let site = lower_one(
        "@MainActor @UIComponent\n@available(iOS 17, *)\npublic struct Row<Leading: View, Trailing: View>: View where Leading: Sendable {}",
    )
    .unwrap();
    assert_eq!(site.invocations.len(), 1);
    assert_eq!(site.invocations[0].name, MacroName::UIComponent);
    assert_eq!(site.declaration.kind, DeclarationKind::StructType);
    assert_eq!(site.declaration.access, Some(AccessLevel::Public));
    assert_eq!(
        site.declaration.generic_parameters,
        vec!["Leading", "Trailing"]
    );
}

#[test]
fn several_macros_on_one_declaration_keep_attribute_order() {
    let site = lower_one(
        "@ConvenienceModifierForStyle(\"A\")\n@RegisterStyle(\"B\")\nextension View {}",
    )
    .unwrap();
    let names: Vec<_> = site.invocations.iter().map(|i| i.name).collect();
    assert_eq!(
        names,
        vec![MacroName::ConvenienceModifierForStyle, MacroName::RegisterStyle]
    );
    assert_eq!(
        site.declaration.kind,
        DeclarationKind::ExtensionOfType("View".into())
    );
}

#[test]
fn array_argument_comes_from_parsed_structure() {
    let site = lower_one(
        "@Style(subViews: [\"Title\", \"Leading, Icon\", \"Trailing\",])\nprotocol P {}",
    )
    .unwrap();
    assert_eq!(site.invocations[0].arguments[0].label.as_deref(), Some("subViews"));
    assert_eq!(
        site.invocations[0].arguments[0].value,
        ArgumentValue::StringList(vec![
            "Title".into(),
            "Leading, Icon".into(),
            "Trailing".into()
        ])
    );
}

#[test]
fn qualified_extension_keeps_the_written_name() {
    let site = lower_one("@ConvenienceModifierForStyle(\"S\")\nextension SwiftUI.View {}").unwrap();
    assert_eq!(
        site.declaration.kind,
        DeclarationKind::ExtensionOfType("SwiftUI.View".into())
    );
}

#[test]
fn class_and_actor_declarations_are_classified() {
    let kinds: Vec<_> = lower_all("@UIComponent\nfinal class A {}\n@UIComponent\nactor B {}\n@UIComponent\nenum C {}")
        .into_iter()
        .map(|site| site.unwrap().declaration.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            DeclarationKind::ClassType,
            DeclarationKind::ActorType,
            DeclarationKind::EnumType
        ]
    );
}

#[test]
fn interpolated_string_is_a_malformed_argument() {
    let err = lower_one("@RegisterStyle(\"\\(prefix)Style\")\nextension EnvironmentValues {}")
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Argument);
    assert!(err.message().contains("interpolation"));
}

#[test]
fn nested_array_is_a_malformed_argument() {
    let err = lower_one("@Style(subViews: [[\"A\"]])\nprotocol P {}").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Argument);
    assert!(err.message().contains("nested arrays"));
}

#[test]
fn non_string_element_is_a_malformed_argument() {
    let err = lower_one("@Style(subViews: [Title])\nprotocol P {}").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Argument);
    assert_eq!(err.message(), "expected a string literal, found `Title`.");
}

#[test]
fn macro_on_a_function_is_a_malformed_declaration() {
    let err = lower_one("@Style(subViews: [])\npublic func make() {}").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert_eq!(
        err.message(),
        "@Style must be attached to a type or extension declaration, found `func`."
    );
}

#[test]
fn unterminated_body_is_a_parse_error() {
    let err = lower_one("@Style(subViews: [])\nprotocol P {\n").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Parse);
}

#[test]
fn broken_argument_list_is_a_parse_error() {
    let err = lower_one("@RegisterStyle(\"A\"\nextension EnvironmentValues {}").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Parse);
    assert_eq!(err.diagnostic_info.error_code, "stylegen::lower::parse");
}

#[test]
fn detached_argument_list_is_a_parse_error() {
    let err = lower_one("@Style (subViews: [\"A\"])\nprotocol P {}").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Parse);
}

#[test]
fn unicode_identifiers_are_declaration_names() {
    let site = lower_one("@UIComponent\nstruct Café<Überschrift: View>: View {}").unwrap();
    assert_eq!(site.declaration.name, "Café");
    assert_eq!(site.declaration.generic_parameters, vec!["Überschrift"]);
}

#[test]
fn where_clause_does_not_consume_the_body() {
    let site = lower_one(
        "@UIComponent\npublic struct Card<Title: View>: View where Title: Equatable {\n    let id: Int\n}\nlet after = 1\n",
    )
    .unwrap();
    assert_eq!(site.declaration.name, "Card");
    assert_eq!(site.declaration.generic_parameters, vec!["Title"]);
}
