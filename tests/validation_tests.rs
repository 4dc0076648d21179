//! Applicability, arity and naming rules, checked through the public
//! `expand` entry point and through whole source files.

mod common;

use stylegen::ast::{ArgumentValue, Declaration, MacroArgument, MacroInvocation, MacroName};
use stylegen::engine::{expand, ExpansionContext};
use stylegen::errors::{ErrorCategory, SourceContext, StyleGenError};
use stylegen::validation::Targets;

fn context() -> ExpansionContext {
    ExpansionContext::new(SourceContext::from_file("test.swift", ""))
}

fn expand_err(invocation: MacroInvocation, declaration: Declaration) -> StyleGenError {
    expand(&invocation, &declaration, &context()).unwrap_err()
}

#[test]
fn style_requires_a_protocol() {
    let err = expand_err(
        MacroInvocation::style(["Title"]),
        Declaration::structure("NotAProtocol"),
    );
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert_eq!(
        err.message(),
        "@Style can only be applied to protocol declarations."
    );
    assert_eq!(err.diagnostic_info.error_code, "stylegen::validate::validation");
}

#[test]
fn style_requires_a_string_list() {
    let invocation = MacroInvocation::new(
        MacroName::Style,
        vec![MacroArgument::labeled(
            "subViews",
            ArgumentValue::String("Title".into()),
        )],
    );
    let err = expand_err(invocation, Declaration::protocol("S"));
    assert_eq!(
        err.message(),
        "@Style macro expects one argument to be passed as `[String]`."
    );
}

#[test]
fn style_without_arguments_is_rejected() {
    let invocation = MacroInvocation::new(MacroName::Style, Vec::new());
    let err = expand_err(invocation, Declaration::protocol("S"));
    assert!(err.message().contains("`[String]`"));
}

#[test]
fn style_accepts_an_unlabeled_list() {
    let invocation = MacroInvocation::new(
        MacroName::Style,
        vec![MacroArgument::unlabeled(ArgumentValue::StringList(vec![
            "Title".into(),
        ]))],
    );
    let generated = expand(&invocation, &Declaration::protocol("S"), &context()).unwrap();
    assert_eq!(generated.len(), 7);
}

#[test]
fn sub_view_names_must_be_identifiers() {
    let err = expand_err(
        MacroInvocation::style(["Title", "Leading Icon"]),
        Declaration::protocol("S"),
    );
    assert_eq!(err.message(), "`Leading Icon` is not a valid sub-view name.");
}

#[test]
fn lowercase_sub_view_name_gets_a_suggestion() {
    let err = expand_err(MacroInvocation::style(["title"]), Declaration::protocol("S"));
    assert_eq!(
        err.message(),
        "sub-view name `title` must start with an uppercase letter."
    );
    assert!(err
        .diagnostic_info
        .help
        .as_deref()
        .unwrap()
        .contains("`Title`"));
}

#[test]
fn register_style_requires_an_environment_extension() {
    let err = expand_err(
        MacroInvocation::register_style("CardStyle"),
        Declaration::protocol("CardStyle"),
    );
    assert_eq!(
        err.message(),
        "@RegisterStyle can only be applied to extension declarations."
    );

    let err = expand_err(
        MacroInvocation::register_style("CardStyle"),
        Declaration::extension("View"),
    );
    assert_eq!(
        err.message(),
        "@RegisterStyle can only be applied to an `EnvironmentValues` extension declaration."
    );
}

#[test]
fn register_style_rejects_a_list() {
    let invocation = MacroInvocation::new(
        MacroName::RegisterStyle,
        vec![MacroArgument::unlabeled(ArgumentValue::StringList(vec![
            "CardStyle".into(),
        ]))],
    );
    let err = expand_err(invocation, Declaration::extension("EnvironmentValues"));
    assert_eq!(
        err.message(),
        "@RegisterStyle macro expects one argument to be passed as `String`."
    );
    assert_eq!(
        err.diagnostic_info.help.as_deref(),
        Some("usage: @RegisterStyle(String)")
    );
}

#[test]
fn register_style_rejects_two_arguments() {
    let invocation = MacroInvocation::new(
        MacroName::RegisterStyle,
        vec![
            MacroArgument::unlabeled(ArgumentValue::String("A".into())),
            MacroArgument::unlabeled(ArgumentValue::String("B".into())),
        ],
    );
    let err = expand_err(invocation, Declaration::extension("EnvironmentValues"));
    assert!(err.message().contains("expects one argument"));
}

#[test]
fn style_name_must_be_an_identifier() {
    let err = expand_err(
        MacroInvocation::register_style("Card-Style"),
        Declaration::extension("EnvironmentValues"),
    );
    assert_eq!(err.message(), "`Card-Style` is not a valid style name.");
}

#[test]
fn convenience_modifier_requires_a_view_extension() {
    let err = expand_err(
        MacroInvocation::convenience_modifier("CardStyle"),
        Declaration::extension("String"),
    );
    assert_eq!(
        err.message(),
        "@ConvenienceModifierForStyle can only be applied to a `View` extension declaration."
    );
}

#[test]
fn qualified_view_extension_does_not_match() {
    let err = expand_err(
        MacroInvocation::convenience_modifier("CardStyle"),
        Declaration::extension("SwiftUI.View"),
    );
    assert_eq!(err.category(), ErrorCategory::Validation);
}

#[test]
fn ui_component_requires_a_struct() {
    let err = expand_err(MacroInvocation::ui_component(), Declaration::protocol("Card"));
    assert_eq!(
        err.message(),
        "@UIComponent can only be applied to struct declarations."
    );
}

#[test]
fn ui_component_takes_no_arguments() {
    let invocation = MacroInvocation::new(
        MacroName::UIComponent,
        vec![MacroArgument::unlabeled(ArgumentValue::String("x".into()))],
    );
    let err = expand_err(invocation, Declaration::structure("Card"));
    assert_eq!(
        err.message(),
        "@UIComponent macro does not take any arguments."
    );
}

#[test]
fn configured_target_types_are_honoured() {
    let ctx = context().with_targets(Targets {
        environment_type: "Registry".into(),
        view_type: "Widget".into(),
    });

    let generated = expand(
        &MacroInvocation::register_style("CardStyle"),
        &Declaration::extension("Registry"),
        &ctx,
    )
    .unwrap();
    assert_eq!(generated.len(), 1);

    let err = expand(
        &MacroInvocation::register_style("CardStyle"),
        &Declaration::extension("EnvironmentValues"),
        &ctx,
    )
    .unwrap_err();
    assert!(err.message().contains("`Registry`"));
}

#[test]
fn failures_in_source_files_point_at_the_attribute() {
    let text = "@Style(subViews: [\"Title\"])\nstruct NotAProtocol {}\n";
    let expansion = common::expand_text(text);
    let site = &expansion.sites[0];

    assert!(site.generated.is_empty());
    assert_eq!(site.errors.len(), 1);
    let span = site.errors[0].source_info.primary_span;
    assert_eq!(span.offset(), 0);
    assert_eq!(span.len(), "@Style(subViews: [\"Title\"])".len());
}
