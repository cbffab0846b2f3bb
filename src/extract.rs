//! Descriptor extraction.
//!
//! Locates the sole default-exported object literal in the parsed module
//! and derives the class name from its `name` field.

use oxc_ast::ast::{
    ExportDefaultDeclarationKind, Expression, ObjectExpression, ObjectPropertyKind, Program,
    PropertyKey, Statement,
};

use crate::error::{CompileError, Result};
use crate::naming::to_camel_case;

pub const FALLBACK_COMPONENT_NAME: &str = "MyComponent";

#[derive(Debug)]
pub struct ComponentExport {
    /// Index of the export statement in the program body. The assembler
    /// removes it and emits a synthesized export in its place.
    pub index: usize,
    pub name: String,
}

pub fn find_component_export(program: &Program) -> Result<ComponentExport> {
    for (index, statement) in program.body.iter().enumerate() {
        let Statement::ExportDefaultDeclaration(export) = statement else {
            continue;
        };
        let ExportDefaultDeclarationKind::ObjectExpression(descriptor) = &export.declaration
        else {
            return Err(CompileError::malformed(
                "default export is not an object literal descriptor",
            ));
        };
        return Ok(ComponentExport {
            index,
            name: component_name(descriptor),
        });
    }
    Err(CompileError::malformed(
        "module has no default-exported descriptor",
    ))
}

/// Re-resolve the descriptor object behind a statement already located by
/// [`find_component_export`].
pub fn descriptor_object<'a, 'b>(statement: &'b Statement<'a>) -> &'b ObjectExpression<'a> {
    let Statement::ExportDefaultDeclaration(export) = statement else {
        unreachable!("descriptor statement was located by find_component_export");
    };
    let ExportDefaultDeclarationKind::ObjectExpression(descriptor) = &export.declaration else {
        unreachable!("descriptor statement was located by find_component_export");
    };
    descriptor
}

fn component_name(descriptor: &ObjectExpression) -> String {
    let mut name = None;
    for property in &descriptor.properties {
        let ObjectPropertyKind::ObjectProperty(property) = property else {
            continue;
        };
        if static_key_name(&property.key) != Some("name") {
            continue;
        }
        if let Expression::StringLiteral(label) = &property.value {
            let normalized = to_camel_case(label.value.as_str());
            if !normalized.is_empty() {
                name = Some(normalized);
            }
        }
    }
    name.unwrap_or_else(|| FALLBACK_COMPONENT_NAME.to_string())
}

/// Statically known property key text. Computed keys have none.
pub fn static_key_name<'a>(key: &PropertyKey<'a>) -> Option<&'a str> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.as_str()),
        PropertyKey::StringLiteral(literal) => Some(literal.value.as_str()),
        _ => None,
    }
}
