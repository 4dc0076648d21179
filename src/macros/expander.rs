//! Dispatch from a validated invocation to its expansion rule.

use tracing::trace;

use crate::ast::{Declaration, GeneratedDeclaration};
use crate::macros::writer::Indent;
use crate::macros::{convenience_modifier, register_style, style, ui_component};
use crate::validation::ValidatedInvocation;

/// Expands an invocation that already passed validation. Cannot fail.
pub fn expand_validated(
    declaration: &Declaration,
    invocation: &ValidatedInvocation,
    indent: &Indent,
) -> Vec<GeneratedDeclaration> {
    let generated = match invocation {
        ValidatedInvocation::Style { sub_views } => {
            style::expand(&declaration.name, sub_views, indent)
        }
        ValidatedInvocation::RegisterStyle { style_name } => {
            register_style::expand(style_name, indent)
        }
        ValidatedInvocation::ConvenienceModifierForStyle { style_name } => {
            convenience_modifier::expand(style_name, indent)
        }
        ValidatedInvocation::UIComponent => ui_component::expand(declaration, indent),
    };

    for decl in &generated {
        trace!(
            declaration = %declaration.name,
            role = ?decl.role,
            "{}",
            decl.source_text.lines().next().unwrap_or_default()
        );
    }

    generated
}
