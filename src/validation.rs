//! # Validator
//!
//! Checks that a macro is attached to a declaration it accepts and that its
//! arguments have the right arity, shape and label, before anything is
//! expanded. Success yields a [`ValidatedInvocation`] carrying the typed
//! arguments, so the expansion rules never look at raw arguments again.
//!
//! Diagnostics point at the attribute, or at the offending argument when
//! there is one.

use std::collections::HashSet;

use tracing::debug;

use crate::ast::{ArgumentValue, Declaration, DeclarationKind, MacroArgument, MacroInvocation, MacroName};
use crate::errors::{ErrorReporting, StyleGenError};
use crate::macros::registry::MacroRegistry;
use crate::macros::utils::{
    indefinite_article, is_identifier, with_first_character_lowercased,
    with_first_character_uppercased,
};

/// Names of the host types the extension macros must be attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Targets {
    pub environment_type: String,
    pub view_type: String,
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            environment_type: "EnvironmentValues".to_string(),
            view_type: "View".to_string(),
        }
    }
}

/// An invocation whose declaration kind and arguments have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedInvocation {
    Style { sub_views: Vec<String> },
    RegisterStyle { style_name: String },
    ConvenienceModifierForStyle { style_name: String },
    UIComponent,
}

/// Validates one invocation against its declaration.
pub fn validate(
    invocation: &MacroInvocation,
    declaration: &Declaration,
    targets: &Targets,
    ctx: &impl ErrorReporting,
) -> Result<ValidatedInvocation, StyleGenError> {
    let validator = Validator {
        invocation,
        declaration,
        ctx,
    };

    let validated = match invocation.name {
        MacroName::Style => validator.style()?,
        MacroName::RegisterStyle => {
            validator.require_extension_of(&targets.environment_type)?;
            ValidatedInvocation::RegisterStyle {
                style_name: validator.single_style_name()?,
            }
        }
        MacroName::ConvenienceModifierForStyle => {
            validator.require_extension_of(&targets.view_type)?;
            ValidatedInvocation::ConvenienceModifierForStyle {
                style_name: validator.single_style_name()?,
            }
        }
        MacroName::UIComponent => validator.ui_component()?,
    };

    debug!(
        name = %invocation.name,
        declaration = %declaration.name,
        "invocation validated"
    );
    Ok(validated)
}

struct Validator<'a, C> {
    invocation: &'a MacroInvocation,
    declaration: &'a Declaration,
    ctx: &'a C,
}

impl<C: ErrorReporting> Validator<'_, C> {
    fn name(&self) -> MacroName {
        self.invocation.name
    }

    fn fail(&self, message: String) -> StyleGenError {
        self.ctx
            .validation_error(self.name(), &message, self.invocation.span)
    }

    fn fail_at(&self, argument: &MacroArgument, message: String) -> StyleGenError {
        let span = if argument.span.is_empty() {
            self.invocation.span
        } else {
            argument.span
        };
        self.ctx.validation_error(self.name(), &message, span)
    }

    fn shape_error(&self, shape: &str) -> StyleGenError {
        let error = self.fail(format!(
            "{} macro expects one argument to be passed as {}.",
            self.name(),
            shape
        ));
        match MacroRegistry::builtin().lookup(self.name()) {
            Some(def) => error.with_help(format!("usage: {}", def.signature)),
            None => error,
        }
    }

    fn style(&self) -> Result<ValidatedInvocation, StyleGenError> {
        if self.declaration.kind != DeclarationKind::Protocol {
            return Err(self.fail(format!(
                "{} can only be applied to protocol declarations.",
                self.name()
            )));
        }

        let argument = match self.invocation.arguments.as_slice() {
            [argument] => argument,
            _ => return Err(self.shape_error("`[String]`")),
        };

        if let Some(label) = argument.label.as_deref().filter(|l| *l != "subViews") {
            return Err(self
                .fail_at(
                    argument,
                    format!(
                        "{} expects the argument label `subViews`, found `{}`.",
                        self.name(),
                        label
                    ),
                )
                .with_help("write the sub-view names as `subViews: [\"Title\", \"Icon\"]`"));
        }

        let ArgumentValue::StringList(sub_views) = &argument.value else {
            return Err(self.shape_error("`[String]`"));
        };

        let mut seen = HashSet::new();
        for name in sub_views {
            if !is_identifier(name) {
                return Err(self.fail_at(
                    argument,
                    format!("`{}` is not a valid sub-view name.", name),
                ));
            }
            if with_first_character_lowercased(name) == *name {
                return Err(self
                    .fail_at(
                        argument,
                        format!(
                            "sub-view name `{}` must start with an uppercase letter.",
                            name
                        ),
                    )
                    .with_help(format!(
                        "the wrapper type and its property would both be named `{}`; use `{}`",
                        name,
                        with_first_character_uppercased(name)
                    )));
            }
            if !seen.insert(with_first_character_lowercased(name)) {
                return Err(self.fail_at(
                    argument,
                    format!("sub-view `{}` is declared more than once.", name),
                ));
            }
        }

        Ok(ValidatedInvocation::Style {
            sub_views: sub_views.clone(),
        })
    }

    fn require_extension_of(&self, type_name: &str) -> Result<(), StyleGenError> {
        match &self.declaration.kind {
            kind if kind.is_extension_of(type_name) => Ok(()),
            DeclarationKind::ExtensionOfType(_) => Err(self.fail(format!(
                "{} can only be applied to {} `{}` extension declaration.",
                self.name(),
                indefinite_article(type_name),
                type_name
            ))),
            _ => Err(self.fail(format!(
                "{} can only be applied to extension declarations.",
                self.name()
            ))),
        }
    }

    fn single_style_name(&self) -> Result<String, StyleGenError> {
        let argument = match self.invocation.arguments.as_slice() {
            [argument] if argument.label.is_none() => argument,
            _ => return Err(self.shape_error("`String`")),
        };

        let ArgumentValue::String(style_name) = &argument.value else {
            return Err(self.shape_error("`String`"));
        };

        if !is_identifier(style_name) {
            return Err(self.fail_at(
                argument,
                format!("`{}` is not a valid style name.", style_name),
            ));
        }

        Ok(style_name.clone())
    }

    fn ui_component(&self) -> Result<ValidatedInvocation, StyleGenError> {
        if self.declaration.kind != DeclarationKind::StructType {
            return Err(self.fail(format!(
                "{} can only be applied to struct declarations.",
                self.name()
            )));
        }

        if !self.invocation.arguments.is_empty() {
            return Err(self.fail(format!(
                "{} macro does not take any arguments.",
                self.name()
            )));
        }

        Ok(ValidatedInvocation::UIComponent)
    }
}
