//! `@RegisterStyle("S")` on an `EnvironmentValues` extension.

use crate::ast::GeneratedDeclaration;
use crate::macros::utils::with_first_character_lowercased;
use crate::macros::writer::{CodeWriter, Indent};

/// One computed property reading and writing the `SKey` slot.
pub fn expand(style_name: &str, indent: &Indent) -> Vec<GeneratedDeclaration> {
    let key = format!("{}Key", style_name);
    let mut w = CodeWriter::new(indent);
    w.block(
        format!(
            "var {}: Any{}",
            with_first_character_lowercased(style_name),
            style_name
        ),
        |w| {
            w.block("get", |w| {
                w.line(format!("self[{}.self]", key));
            });
            w.block("set", |w| {
                w.line(format!("self[{}.self] = newValue", key));
            });
        },
    );
    vec![GeneratedDeclaration::member(w.finish())]
}
