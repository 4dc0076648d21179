//! `@Style(subViews: [...])` on a protocol.
//!
//! Adds the body-builder requirements to the protocol and emits the four
//! peers every style needs: the configuration bundle, a default style, the
//! type-erased wrapper and the environment key.

use crate::ast::GeneratedDeclaration;
use crate::macros::utils::with_first_character_lowercased;
use crate::macros::writer::{CodeWriter, Indent};

/// Members first, then peers in declaration order.
pub fn expand(style_name: &str, sub_views: &[String], indent: &Indent) -> Vec<GeneratedDeclaration> {
    let mut generated = members(style_name);
    generated.push(GeneratedDeclaration::peer(configuration(
        style_name, sub_views, indent,
    )));
    generated.push(GeneratedDeclaration::peer(default_style(
        style_name, sub_views, indent,
    )));
    generated.push(GeneratedDeclaration::peer(type_erased_style(
        style_name, indent,
    )));
    generated.push(GeneratedDeclaration::peer(environment_key(
        style_name, indent,
    )));
    generated
}

fn members(style_name: &str) -> Vec<GeneratedDeclaration> {
    vec![
        GeneratedDeclaration::member("associatedtype Body: View"),
        GeneratedDeclaration::member(format!(
            "typealias Configuration = {}Configuration",
            style_name
        )),
        GeneratedDeclaration::member(
            "@ViewBuilder func makeBody(configuration: Self.Configuration) -> Self.Body",
        ),
    ]
}

fn configuration(style_name: &str, sub_views: &[String], indent: &Indent) -> String {
    let header = format!("public struct {}Configuration", style_name);
    if sub_views.is_empty() {
        return format!("{} {{}}", header);
    }

    let mut w = CodeWriter::new(indent);
    w.block(header, |w| {
        for name in sub_views {
            w.block(format!("public struct {}: View", name), |w| {
                w.line("public var body: AnyView");
                w.blank();
                w.block("public init<Content: View>(content: Content)", |w| {
                    w.line("body = AnyView(content)");
                });
            });
        }
        w.blank();
        for name in sub_views {
            w.line(format!(
                "public var {}: Self.{}",
                with_first_character_lowercased(name),
                name
            ));
        }
    });
    w.finish()
}

fn default_style(style_name: &str, sub_views: &[String], indent: &Indent) -> String {
    let mut w = CodeWriter::new(indent);
    w.block(
        format!("public struct Default{}: {}", style_name, style_name),
        |w| {
            w.line("public init() {}");
            w.blank();
            w.block(
                "public func makeBody(configuration: Configuration) -> some View",
                |w| {
                    if sub_views.is_empty() {
                        w.line("VStack {}");
                    } else {
                        w.block("VStack", |w| {
                            for name in sub_views {
                                w.line(format!(
                                    "configuration.{}",
                                    with_first_character_lowercased(name)
                                ));
                            }
                        });
                    }
                },
            );
        },
    );
    w.finish()
}

fn type_erased_style(style_name: &str, indent: &Indent) -> String {
    let mut w = CodeWriter::new(indent);
    w.block(format!("struct Any{}: {}", style_name, style_name), |w| {
        w.line("private var _makeBody: (Configuration) -> AnyView");
        w.blank();
        w.block(format!("init(style: some {})", style_name), |w| {
            w.open("_makeBody = { configuration in");
            w.line("AnyView(style.makeBody(configuration: configuration))");
            w.close("}");
        });
        w.blank();
        w.block("func makeBody(configuration: Configuration) -> some View", |w| {
            w.line("_makeBody(configuration)");
        });
    });
    w.finish()
}

fn environment_key(style_name: &str, indent: &Indent) -> String {
    let mut w = CodeWriter::new(indent);
    w.block(format!("struct {}Key: EnvironmentKey", style_name), |w| {
        w.line(format!(
            "static let defaultValue = Any{}(style: Default{}())",
            style_name, style_name
        ));
    });
    w.finish()
}
