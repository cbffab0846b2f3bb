//! Prop schema synthesis.
//!
//! Derives the `defaultProps` and `propTypes` static assignments from the
//! descriptor's prop schema. A nested `{type, default, required}` shape
//! yields independent validator and default entries; a bare type yields a
//! validator entry only. Default expressions are spliced verbatim, never
//! re-evaluated.

use oxc_allocator::{Box as oxc_box, CloneIn};
use oxc_ast::ast::{
    ArrayExpression, ArrayExpressionElement, Argument, AssignmentOperator, AssignmentTarget,
    Expression, ObjectExpression, ObjectPropertyKind, PropertyKind, SimpleAssignmentTarget,
    Statement, TSTypeParameterInstantiation,
};
use oxc_ast::AstBuilder;
use oxc_span::SPAN;

use crate::extract::static_key_name;

pub struct PropsOutput<'a> {
    /// Present iff at least one prop declared a default.
    pub default_props: Option<Statement<'a>>,
    /// Present iff at least one prop was declared at all. Its presence is
    /// also what pulls in the validator-library import.
    pub prop_types: Option<Statement<'a>>,
}

pub fn synthesize<'a>(
    ast: AstBuilder<'a>,
    class_name: &str,
    descriptor: &ObjectExpression<'a>,
) -> PropsOutput<'a> {
    let mut default_entries = ast.vec();
    let mut validator_entries = ast.vec();

    for property in &descriptor.properties {
        let ObjectPropertyKind::ObjectProperty(property) = property else {
            continue;
        };
        if static_key_name(&property.key) != Some("props") {
            continue;
        }
        let Expression::ObjectExpression(schema) = &property.value else {
            tracing::debug!("props section is not an object literal; skipped");
            continue;
        };
        for prop in &schema.properties {
            let ObjectPropertyKind::ObjectProperty(prop) = prop else {
                continue;
            };
            let label = static_key_name(&prop.key).unwrap_or("<computed>");
            let shape = split_prop_shape(&prop.value);

            if let Some(default) = shape.default {
                default_entries.push(ast.object_property_kind_object_property(
                    SPAN,
                    PropertyKind::Init,
                    prop.key.clone_in(ast.allocator),
                    default.clone_in(ast.allocator),
                    false,
                    false,
                    false,
                ));
            }

            let validator = with_required(
                ast,
                validator_expression(ast, label, shape.r#type),
                required_flag(shape.required),
            );
            validator_entries.push(ast.object_property_kind_object_property(
                SPAN,
                PropertyKind::Init,
                prop.key.clone_in(ast.allocator),
                validator,
                false,
                false,
                false,
            ));
        }
    }

    let default_props = if default_entries.is_empty() {
        None
    } else {
        Some(static_assignment(
            ast,
            class_name,
            "defaultProps",
            default_entries,
        ))
    };
    let prop_types = if validator_entries.is_empty() {
        None
    } else {
        Some(static_assignment(
            ast,
            class_name,
            "propTypes",
            validator_entries,
        ))
    };

    PropsOutput {
        default_props,
        prop_types,
    }
}

struct PropShape<'p, 'a> {
    r#type: Option<&'p Expression<'a>>,
    default: Option<&'p Expression<'a>>,
    required: Option<&'p Expression<'a>>,
}

fn split_prop_shape<'p, 'a>(value: &'p Expression<'a>) -> PropShape<'p, 'a> {
    if let Expression::ObjectExpression(shape) = value {
        let mut r#type = None;
        let mut default = None;
        let mut required = None;
        for entry in &shape.properties {
            let ObjectPropertyKind::ObjectProperty(entry) = entry else {
                continue;
            };
            match static_key_name(&entry.key) {
                Some("type") => r#type = Some(&entry.value),
                Some("default") => default = Some(&entry.value),
                Some("required") => required = Some(&entry.value),
                _ => {}
            }
        }
        PropShape {
            r#type,
            default,
            required,
        }
    } else {
        PropShape {
            r#type: Some(value),
            default: None,
            required: None,
        }
    }
}

/// The fixed primitive vocabulary.
fn primitive_token(name: &str) -> Option<&'static str> {
    match name {
        "String" => Some("string"),
        "Boolean" => Some("bool"),
        "Function" => Some("func"),
        "Number" => Some("number"),
        "Object" => Some("object"),
        "Array" => Some("array"),
        "Symbol" => Some("symbol"),
        _ => None,
    }
}

fn validator_expression<'a>(
    ast: AstBuilder<'a>,
    label: &str,
    r#type: Option<&Expression<'a>>,
) -> Expression<'a> {
    let Some(type_expr) = r#type else {
        return any_validator(ast, label);
    };
    match type_expr {
        Expression::Identifier(ident) => match primitive_token(ident.name.as_str()) {
            Some(token) => prop_types_member(ast, token),
            None => instance_of_validator(ast, type_expr),
        },
        Expression::StaticMemberExpression(_) => instance_of_validator(ast, type_expr),
        Expression::ArrayExpression(list) => one_of_validator(ast, label, list),
        _ => any_validator(ast, label),
    }
}

fn any_validator<'a>(ast: AstBuilder<'a>, label: &str) -> Expression<'a> {
    tracing::warn!(
        prop = label,
        "unrecognized prop type; degrading to the any validator"
    );
    prop_types_member(ast, "any")
}

fn prop_types_member<'a>(ast: AstBuilder<'a>, token: &'static str) -> Expression<'a> {
    Expression::from(ast.member_expression_static(
        SPAN,
        ast.expression_identifier(SPAN, "PropTypes"),
        ast.identifier_name(SPAN, token),
        false,
    ))
}

fn instance_of_validator<'a>(ast: AstBuilder<'a>, r#type: &Expression<'a>) -> Expression<'a> {
    let callee = prop_types_member(ast, "instanceOf");
    let mut args = ast.vec();
    args.push(Argument::from(r#type.clone_in(ast.allocator)));
    ast.expression_call(
        SPAN,
        callee,
        None::<oxc_box<TSTypeParameterInstantiation>>,
        args,
        false,
    )
}

fn one_of_validator<'a>(
    ast: AstBuilder<'a>,
    label: &str,
    list: &ArrayExpression<'a>,
) -> Expression<'a> {
    let mut elements = ast.vec();
    for element in &list.elements {
        let validator = match element.as_expression() {
            Some(entry @ Expression::Identifier(ident)) => match primitive_token(ident.name.as_str())
            {
                Some(token) => prop_types_member(ast, token),
                None => instance_of_validator(ast, entry),
            },
            _ => any_validator(ast, label),
        };
        elements.push(ArrayExpressionElement::from(validator));
    }
    let callee = prop_types_member(ast, "oneOfType");
    let mut args = ast.vec();
    args.push(Argument::from(ast.expression_array(SPAN, elements)));
    ast.expression_call(
        SPAN,
        callee,
        None::<oxc_box<TSTypeParameterInstantiation>>,
        args,
        false,
    )
}

/// A `required` key marks the validator required. Boolean literals are
/// honored; any other expression cannot be evaluated statically, so its
/// presence wins.
fn required_flag(required: Option<&Expression>) -> bool {
    match required {
        None => false,
        Some(Expression::BooleanLiteral(literal)) => literal.value,
        Some(_) => true,
    }
}

fn with_required<'a>(ast: AstBuilder<'a>, validator: Expression<'a>, required: bool) -> Expression<'a> {
    if required {
        Expression::from(ast.member_expression_static(
            SPAN,
            validator,
            ast.identifier_name(SPAN, "isRequired"),
            false,
        ))
    } else {
        validator
    }
}

fn static_assignment<'a>(
    ast: AstBuilder<'a>,
    class_name: &str,
    field: &'static str,
    properties: oxc_allocator::Vec<'a, ObjectPropertyKind<'a>>,
) -> Statement<'a> {
    let class_ident = ast.expression_identifier(SPAN, ast.allocator.alloc_str(class_name));
    let target = SimpleAssignmentTarget::from(ast.member_expression_static(
        SPAN,
        class_ident,
        ast.identifier_name(SPAN, field),
        false,
    ));
    let object = ast.expression_object(SPAN, properties);
    let assignment = ast.expression_assignment(
        SPAN,
        AssignmentOperator::Assign,
        AssignmentTarget::from(target),
        object,
    );
    ast.statement_expression(SPAN, assignment)
}
