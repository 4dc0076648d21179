//! Lowering of raw sites into declarations and macro invocations.
//!
//! This is where a site stops being text: the declaration keyword is
//! classified, modifiers become an access level, and every macro argument is
//! reduced to a string or a list of strings. Anything that cannot be reduced
//! fails the site with `MalformedDeclaration` or `MalformedArgument`.

use tracing::debug;

use crate::ast::{
    AccessLevel, ArgumentValue, Declaration, DeclarationKind, MacroArgument, MacroInvocation,
    MacroName, Span,
};
use crate::errors::{ErrorReporting, StyleGenError};
use crate::syntax::parser::{
    RawArgument, RawAttribute, RawExpression, RawExpressionKind, RawSite, RawTarget,
};

/// A site reduced to the engine's data model.
#[derive(Debug, Clone, PartialEq)]
pub struct LoweredSite {
    pub declaration: Declaration,
    /// Macro invocations in attribute order.
    pub invocations: Vec<MacroInvocation>,
}

/// Lowers one site. The first failing attribute aborts the whole site.
pub fn lower_site(site: &RawSite, ctx: &impl ErrorReporting) -> Result<LoweredSite, StyleGenError> {
    let first_macro = site
        .macro_attributes()
        .next()
        .and_then(|a| MacroName::from_attribute(&a.name))
        .ok_or_else(|| ctx.parse_error("site without a macro attribute", site.span))?;

    if let Some(attribute) = site.macro_attributes().find(|a| a.malformed_arguments) {
        let span = Span::new(attribute.span.end, attribute.span.end + 1);
        return Err(ctx
            .parse_error(
                &format!("malformed argument list for @{}", attribute.name),
                span,
            )
            .with_help("arguments must be string literals or arrays of string literals"));
    }

    let declaration = lower_declaration(site, first_macro, ctx)?;

    let invocations = site
        .macro_attributes()
        .map(|attribute| lower_attribute(attribute, ctx))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        declaration = %declaration.name,
        kind = %declaration.kind,
        invocations = invocations.len(),
        "lowered site"
    );

    Ok(LoweredSite {
        declaration,
        invocations,
    })
}

fn lower_declaration(
    site: &RawSite,
    macro_name: MacroName,
    ctx: &impl ErrorReporting,
) -> Result<Declaration, StyleGenError> {
    let decl = match &site.target {
        Some(RawTarget::Declaration(decl)) => decl,
        Some(RawTarget::Unsupported { word, span })
            if DeclarationKind::from_keyword(word, "").is_some() =>
        {
            return Err(ctx
                .parse_error(&format!("incomplete `{}` declaration", word), *span)
                .with_help("a declaration needs a name and a body in balanced braces"));
        }
        Some(RawTarget::Unsupported { word, span }) => {
            return Err(ctx.malformed_declaration(
                macro_name,
                &format!(
                    "{} must be attached to a type or extension declaration, found `{}`.",
                    macro_name, word
                ),
                *span,
            ));
        }
        None => {
            return Err(ctx.malformed_declaration(
                macro_name,
                &format!(
                    "{} must be attached to a type or extension declaration.",
                    macro_name
                ),
                site.span,
            ));
        }
    };

    let kind = DeclarationKind::from_keyword(&decl.keyword, &decl.name).ok_or_else(|| {
        ctx.malformed_declaration(
            macro_name,
            &format!("cannot classify `{}` declaration.", decl.keyword),
            decl.span,
        )
    })?;

    let access = decl
        .modifiers
        .iter()
        .find_map(|modifier| AccessLevel::from_keyword(modifier));

    Ok(Declaration {
        name: decl.name.clone(),
        kind,
        generic_parameters: decl
            .generic_parameters
            .iter()
            .map(|p| p.name.clone())
            .collect(),
        access,
        span: decl.span,
    })
}

fn lower_attribute(
    attribute: &RawAttribute,
    ctx: &impl ErrorReporting,
) -> Result<MacroInvocation, StyleGenError> {
    let name = MacroName::from_attribute(&attribute.name).ok_or_else(|| {
        ctx.parse_error(
            &format!("unknown macro `@{}`", attribute.name),
            attribute.span,
        )
    })?;

    let arguments = attribute
        .arguments
        .iter()
        .flatten()
        .map(|argument| lower_argument(name, argument, ctx))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MacroInvocation {
        name,
        arguments,
        span: attribute.span,
    })
}

fn lower_argument(
    name: MacroName,
    argument: &RawArgument,
    ctx: &impl ErrorReporting,
) -> Result<MacroArgument, StyleGenError> {
    let expression = argument.value.as_ref().ok_or_else(|| {
        ctx.malformed_argument(name, "argument has no value.", argument.span)
    })?;

    Ok(MacroArgument {
        label: argument.label.clone(),
        value: reduce_expression(name, expression, ctx)?,
        span: argument.span,
    })
}

/// Reduces an expression to a string or a flat list of strings.
fn reduce_expression(
    name: MacroName,
    expression: &RawExpression,
    ctx: &impl ErrorReporting,
) -> Result<ArgumentValue, StyleGenError> {
    match &expression.kind {
        RawExpressionKind::String { .. } => {
            literal_string(name, expression, ctx).map(ArgumentValue::String)
        }
        RawExpressionKind::Array(elements) => elements
            .iter()
            .map(|element| literal_string(name, element, ctx))
            .collect::<Result<Vec<_>, _>>()
            .map(ArgumentValue::StringList),
        RawExpressionKind::Other(text) => Err(ctx.malformed_argument(
            name,
            &format!(
                "expected a string literal or an array of string literals, found `{}`.",
                text
            ),
            expression.span,
        )),
    }
}

fn literal_string(
    name: MacroName,
    expression: &RawExpression,
    ctx: &impl ErrorReporting,
) -> Result<String, StyleGenError> {
    match &expression.kind {
        RawExpressionKind::String {
            interpolated: true,
            ..
        } => Err(ctx.malformed_argument(
            name,
            "string interpolation is not allowed in macro arguments.",
            expression.span,
        )),
        RawExpressionKind::String { value, .. } => Ok(value.clone()),
        RawExpressionKind::Array(_) => Err(ctx.malformed_argument(
            name,
            "nested arrays are not supported; expected a string literal.",
            expression.span,
        )),
        RawExpressionKind::Other(text) => Err(ctx.malformed_argument(
            name,
            &format!("expected a string literal, found `{}`.", text),
            expression.span,
        )),
    }
}
