//! Class synthesis and lifecycle mapping.
//!
//! Builds the output class skeleton (constructor plus the fixed support
//! members), then maps every descriptor section onto it:
//!
//! - create-phase hooks become constructor fragments in fixed pass order
//!   (willCreate, state, didCreate), each inside its own IIFE scope;
//! - the remaining lifecycle hooks, `methods.*` and `render` become
//!   instance methods, `computed.*` become getters, with params and body
//!   transplanted as tree splices.
//!
//! Member names collide last-wins: a later member replaces an earlier one
//! of the same name, support members included.

use oxc_allocator::{Allocator, CloneIn};
use oxc_ast::ast::{
    ArrowFunctionExpression, ClassElement, Expression, Function, MethodDefinitionKind,
    ObjectExpression, ObjectPropertyKind, Statement,
};

use crate::extract::static_key_name;
use crate::hooks::{ConstructorPass, Hook};
use crate::snippets;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberKind {
    Method,
    Getter,
}

#[derive(Clone, Copy)]
enum MemberSource<'p, 'a> {
    Support(&'static str),
    Descriptor(&'p Function<'a>),
}

struct MemberPlan<'p, 'a> {
    name: String,
    kind: MemberKind,
    source: MemberSource<'p, 'a>,
}

/// Synthesize the complete class declaration for `descriptor`.
pub fn build_class<'a>(
    allocator: &'a Allocator,
    name: &str,
    descriptor: &ObjectExpression<'a>,
) -> Statement<'a> {
    let mut members: Vec<MemberPlan> = snippets::SUPPORT_MEMBERS
        .iter()
        .copied()
        .map(|(member_name, text)| MemberPlan {
            name: member_name.to_string(),
            kind: if member_name == "dispatchEvent" {
                MemberKind::Method
            } else {
                MemberKind::Getter
            },
            source: MemberSource::Support(text),
        })
        .collect();

    let mut will_create: Vec<&Function> = Vec::new();
    let mut state: Option<&Function> = None;
    let mut did_create: Vec<&Function> = Vec::new();

    for property in &descriptor.properties {
        let ObjectPropertyKind::ObjectProperty(property) = property else {
            continue;
        };
        let Some(key) = static_key_name(&property.key) else {
            continue;
        };
        match Hook::from_key(key) {
            Some(hook) => {
                let Some(function) = function_value(&property.value) else {
                    tracing::debug!(hook = key, "hook value is not a function; skipped");
                    continue;
                };
                match hook.constructor_pass() {
                    Some(ConstructorPass::WillCreate) => will_create.push(function),
                    // Object-literal semantics: the last state entry wins,
                    // so exactly one state fragment is emitted.
                    Some(ConstructorPass::State) => state = Some(function),
                    Some(ConstructorPass::DidCreate) => did_create.push(function),
                    None => push_member(&mut members, key, MemberKind::Method, function),
                }
            }
            None => match key {
                "methods" => collect_section(&property.value, MemberKind::Method, &mut members),
                "computed" => collect_section(&property.value, MemberKind::Getter, &mut members),
                // name/props are handled elsewhere; unknown sections have
                // no class counterpart.
                _ => {}
            },
        }
    }

    let source = class_skeleton_source(name, &members);
    let mut statement = snippets::parse_statement(allocator, &source);
    let Statement::ClassDeclaration(class) = &mut statement else {
        unreachable!("class skeleton parses to a class declaration");
    };

    for element in class.body.body.iter_mut() {
        let ClassElement::MethodDefinition(method) = element else {
            continue;
        };
        if matches!(method.kind, MethodDefinitionKind::Constructor) {
            let constructor_body = method
                .value
                .body
                .as_mut()
                .expect("skeleton constructor has a body");
            for hook in &will_create {
                if let Some(fragment) = discarded_fragment(allocator, hook) {
                    constructor_body.statements.push(fragment);
                }
            }
            if let Some(hook) = state {
                if let Some(fragment) = state_fragment(allocator, hook) {
                    constructor_body.statements.push(fragment);
                }
            }
            for hook in &did_create {
                if let Some(fragment) = discarded_fragment(allocator, hook) {
                    constructor_body.statements.push(fragment);
                }
            }
            continue;
        }
        let Some(member_name) = static_key_name(&method.key) else {
            continue;
        };
        if let Some(function) = descriptor_function(&members, member_name) {
            method.value.params = function.params.clone_in(allocator);
            method.value.body = function.body.clone_in(allocator);
        }
    }

    statement
}

fn push_member<'p, 'a>(
    members: &mut Vec<MemberPlan<'p, 'a>>,
    name: &str,
    kind: MemberKind,
    function: &'p Function<'a>,
) {
    members.retain(|member| member.name != name);
    members.push(MemberPlan {
        name: name.to_string(),
        kind,
        source: MemberSource::Descriptor(function),
    });
}

fn collect_section<'p, 'a>(
    value: &'p Expression<'a>,
    kind: MemberKind,
    members: &mut Vec<MemberPlan<'p, 'a>>,
) {
    let Expression::ObjectExpression(section) = value else {
        return;
    };
    for property in &section.properties {
        let ObjectPropertyKind::ObjectProperty(property) = property else {
            continue;
        };
        let Some(name) = static_key_name(&property.key) else {
            continue;
        };
        if let Some(function) = function_value(&property.value) {
            push_member(members, name, kind, function);
        }
    }
}

fn function_value<'p, 'a>(value: &'p Expression<'a>) -> Option<&'p Function<'a>> {
    match value {
        Expression::FunctionExpression(function) if function.body.is_some() => Some(&**function),
        _ => None,
    }
}

fn descriptor_function<'p, 'a>(
    members: &[MemberPlan<'p, 'a>],
    name: &str,
) -> Option<&'p Function<'a>> {
    members.iter().find_map(|member| match member.source {
        MemberSource::Descriptor(function) if member.name == name => Some(function),
        _ => None,
    })
}

/// The only textual substitutions in the skeleton are names: the class
/// name and the member stub names. Stub bodies stay empty; descriptor
/// content arrives via tree splices afterwards.
fn class_skeleton_source(name: &str, members: &[MemberPlan]) -> String {
    let mut source = String::new();
    source.push_str("class ");
    source.push_str(name);
    source.push_str(" extends React.Component {\n");
    source.push_str("  constructor(props) {\n    super(props);\n  }\n");
    for member in members {
        match member.source {
            MemberSource::Support(text) => {
                source.push_str(text);
                source.push('\n');
            }
            MemberSource::Descriptor(_) => {
                match member.kind {
                    MemberKind::Method => {
                        source.push_str("  ");
                        source.push_str(&member.name);
                        source.push_str("() {}\n");
                    }
                    MemberKind::Getter => {
                        source.push_str("  get ");
                        source.push_str(&member.name);
                        source.push_str("() {}\n");
                    }
                }
            }
        }
    }
    source.push('}');
    source
}

fn discarded_fragment<'a>(allocator: &'a Allocator, hook: &Function<'a>) -> Option<Statement<'a>> {
    let body = hook.body.as_ref()?;
    let mut statement = snippets::parse_statement(allocator, snippets::DISCARDED_FRAGMENT);
    {
        let Statement::ExpressionStatement(expression_statement) = &mut statement else {
            return None;
        };
        let Expression::CallExpression(call) = &mut expression_statement.expression else {
            return None;
        };
        let arrow = arrow_target(&mut call.callee)?;
        for inner in &body.statements {
            arrow.body.statements.push(inner.clone_in(allocator));
        }
    }
    Some(statement)
}

fn state_fragment<'a>(allocator: &'a Allocator, hook: &Function<'a>) -> Option<Statement<'a>> {
    let body = hook.body.as_ref()?;
    let mut statement = snippets::parse_statement(allocator, snippets::STATE_FRAGMENT);
    {
        let Statement::ExpressionStatement(expression_statement) = &mut statement else {
            return None;
        };
        let Expression::AssignmentExpression(assignment) = &mut expression_statement.expression
        else {
            return None;
        };
        let Expression::CallExpression(call) = &mut assignment.right else {
            return None;
        };
        let arrow = arrow_target(&mut call.callee)?;
        for inner in &body.statements {
            arrow.body.statements.push(inner.clone_in(allocator));
        }
    }
    Some(statement)
}

fn arrow_target<'b, 'a>(
    expression: &'b mut Expression<'a>,
) -> Option<&'b mut ArrowFunctionExpression<'a>> {
    match expression {
        Expression::ParenthesizedExpression(paren) => arrow_target(&mut paren.expression),
        Expression::ArrowFunctionExpression(arrow) => Some(&mut **arrow),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{descriptor_object, find_component_export};
    use oxc_ast::ast::Program;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn parse<'a>(allocator: &'a Allocator, source: &'a str) -> Program<'a> {
        let ret = Parser::new(
            allocator,
            source,
            SourceType::default().with_module(true),
        )
        .parse();
        assert!(ret.errors.is_empty(), "fixture must parse");
        ret.program
    }

    fn build<'a>(allocator: &'a Allocator, program: &Program<'a>) -> Statement<'a> {
        let export = find_component_export(program).unwrap();
        let descriptor = descriptor_object(&program.body[export.index]);
        build_class(allocator, &export.name, descriptor)
    }

    fn class_member_count(statement: &Statement) -> usize {
        let Statement::ClassDeclaration(class) = statement else {
            panic!("expected a class declaration");
        };
        class.body.body.len()
    }

    fn constructor_statement_count(statement: &Statement) -> usize {
        let Statement::ClassDeclaration(class) = statement else {
            panic!("expected a class declaration");
        };
        for element in &class.body.body {
            if let ClassElement::MethodDefinition(method) = element {
                if matches!(method.kind, MethodDefinitionKind::Constructor) {
                    return method.value.body.as_ref().unwrap().statements.len();
                }
            }
        }
        panic!("class has no constructor");
    }

    #[test]
    fn empty_descriptor_keeps_constructor_and_support_members() {
        let allocator = Allocator::default();
        let program = parse(&allocator, "export default { name: 'bare' };");
        let statement = build(&allocator, &program);
        // constructor + dispatchEvent + children + parent + el
        assert_eq!(class_member_count(&statement), 5);
        // super(props) only
        assert_eq!(constructor_statement_count(&statement), 1);
    }

    #[test]
    fn create_phase_hooks_become_three_ordered_fragments() {
        let allocator = Allocator::default();
        let program = parse(
            &allocator,
            "export default {
              componentDidCreate() { this.b = 2; },
              state() { return { x: 1 }; },
              componentWillCreate() { this.a = 1; },
            };",
        );
        let statement = build(&allocator, &program);
        assert_eq!(constructor_statement_count(&statement), 4);

        let Statement::ClassDeclaration(class) = &statement else {
            unreachable!();
        };
        let ClassElement::MethodDefinition(constructor) = &class.body.body[0] else {
            panic!("first member is the constructor");
        };
        let statements = &constructor.value.body.as_ref().unwrap().statements;
        // super, willCreate IIFE, state assignment, didCreate IIFE,
        // regardless of descriptor order.
        assert!(matches!(&statements[1], Statement::ExpressionStatement(s)
            if matches!(&s.expression, Expression::CallExpression(_))));
        assert!(matches!(&statements[2], Statement::ExpressionStatement(s)
            if matches!(&s.expression, Expression::AssignmentExpression(_))));
        assert!(matches!(&statements[3], Statement::ExpressionStatement(s)
            if matches!(&s.expression, Expression::CallExpression(_))));
    }

    #[test]
    fn methods_computed_and_lifecycle_become_members() {
        let allocator = Allocator::default();
        let program = parse(
            &allocator,
            "export default {
              render() { return null; },
              componentDidMount() { this.x = 1; },
              computed: { total() { return 3; } },
              methods: { refresh(force) { this.load(force); } },
            };",
        );
        let statement = build(&allocator, &program);
        // 5 skeleton members + render + componentDidMount + total + refresh
        assert_eq!(class_member_count(&statement), 9);

        let Statement::ClassDeclaration(class) = &statement else {
            unreachable!();
        };
        let mut found_getter = false;
        let mut found_refresh_param = false;
        for element in &class.body.body {
            let ClassElement::MethodDefinition(method) = element else {
                continue;
            };
            match static_key_name(&method.key) {
                Some("total") => {
                    found_getter = matches!(method.kind, MethodDefinitionKind::Get);
                }
                Some("refresh") => {
                    found_refresh_param = method.value.params.items.len() == 1;
                }
                _ => {}
            }
        }
        assert!(found_getter, "computed entry compiles to a getter");
        assert!(found_refresh_param, "method params are transplanted");
    }

    #[test]
    fn descriptor_member_replaces_a_support_member_of_the_same_name() {
        let allocator = Allocator::default();
        let program = parse(
            &allocator,
            "export default { methods: { dispatchEvent() { this.custom = true; } } };",
        );
        let statement = build(&allocator, &program);
        // Still one dispatchEvent: the descriptor version took its place.
        assert_eq!(class_member_count(&statement), 5);
    }

    #[test]
    fn later_member_wins_a_name_collision() {
        let allocator = Allocator::default();
        let program = parse(
            &allocator,
            "export default {
              render() { return 1; },
              methods: { render() { return 2; } },
            };",
        );
        let statement = build(&allocator, &program);
        let Statement::ClassDeclaration(class) = &statement else {
            unreachable!();
        };
        let render_members = class
            .body
            .body
            .iter()
            .filter(|element| {
                matches!(element, ClassElement::MethodDefinition(m)
                    if static_key_name(&m.key) == Some("render"))
            })
            .count();
        assert_eq!(render_members, 1);
    }
}
