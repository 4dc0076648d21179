//! `@ConvenienceModifierForStyle("S")` on a `View` extension.

use crate::ast::GeneratedDeclaration;
use crate::macros::utils::with_first_character_lowercased;
use crate::macros::writer::{CodeWriter, Indent};

/// One modifier installing `AnyS(style:)` under the `s` environment key.
pub fn expand(style_name: &str, indent: &Indent) -> Vec<GeneratedDeclaration> {
    let property = with_first_character_lowercased(style_name);
    let mut w = CodeWriter::new(indent);
    w.block(
        format!(
            "public func {}(_ style: some {}) -> some View",
            property, style_name
        ),
        |w| {
            w.line(format!(
                "environment(\\.{}, Any{}(style: style))",
                property, style_name
            ));
        },
    );
    vec![GeneratedDeclaration::member(w.finish())]
}
