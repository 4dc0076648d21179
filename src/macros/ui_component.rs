//! `@UIComponent` on a generic struct.
//!
//! Every generic parameter `P` becomes a content closure `p: () -> P`, and
//! `body` hands the evaluated closures to the style registered under
//! `componentNameStyle`. The configuration initialiser is called with the
//! parameters in declaration order, so they must match the sub-views of the
//! paired `@Style` in name and order.

use crate::ast::{AccessLevel, Declaration, GeneratedDeclaration};
use crate::macros::utils::with_first_character_lowercased;
use crate::macros::writer::{CodeWriter, Indent};

pub fn expand(declaration: &Declaration, indent: &Indent) -> Vec<GeneratedDeclaration> {
    let access = AccessLevel::prefix(declaration.access);
    let component = &declaration.name;

    let mut generated = vec![
        GeneratedDeclaration::member(format!(
            "@Environment(\\.{}Style) {}var style",
            with_first_character_lowercased(component),
            access
        )),
        GeneratedDeclaration::member(format!(
            "{}typealias Configuration = {}StyleConfiguration",
            access, component
        )),
    ];

    generated.extend(declaration.generic_parameters.iter().map(|parameter| {
        GeneratedDeclaration::member(format!(
            "{}let {}: () -> {}",
            access,
            with_first_character_lowercased(parameter),
            parameter
        ))
    }));

    let arguments = declaration
        .generic_parameters
        .iter()
        .map(|parameter| {
            let field = with_first_character_lowercased(parameter);
            format!("{}: Configuration.{}(content: {}())", field, parameter, field)
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut w = CodeWriter::new(indent);
    w.block(format!("{}var body: some View", access), |w| {
        w.line(format!(
            "style.makeBody(configuration: Configuration({}))",
            arguments
        ));
    });
    generated.push(GeneratedDeclaration::member(w.finish()));

    generated
}
