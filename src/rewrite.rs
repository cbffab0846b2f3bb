//! Render tree rewriting.
//!
//! Walks the whole synthesized output tree and rewrites every
//! element-creation call that carries a props argument. A call whose tag
//! is the literal `"slot"` becomes a slot-resolver call; every other
//! matched call gets its props argument wrapped in the attribute
//! normalization helper. The two rules are mutually exclusive per call
//! site, and the walk reaches nested call sites at any depth, including
//! callback bodies.
//!
//! Bookkeeping lives in an explicit [`RewriteContext`] owned by the
//! compile call, so concurrent compiles never share state.

use oxc_allocator::{Box as oxc_box, CloneIn};
use oxc_ast::ast::{
    Argument, CallExpression, Expression, ObjectPropertyKind, TSTypeParameterInstantiation,
};
use oxc_ast::AstBuilder;
use oxc_ast_visit::walk_mut::walk_expression;
use oxc_ast_visit::VisitMut;
use oxc_span::SPAN;

use crate::extract::static_key_name;

pub const SLOT_RESOLVER_NAME: &str = "__getReactComponentSlot";
pub const PROPS_NORMALIZER_NAME: &str = "__transformReactJSXProps";

const DEFAULT_SLOT: &str = "default";

#[derive(Debug, Default)]
pub struct RewriteContext {
    /// Set when at least one slot rewrite occurred; drives the
    /// slot-resolver helper emission.
    pub slots_used: bool,
}

pub struct ElementCallRewriter<'a, 'ctx> {
    ast: AstBuilder<'a>,
    ctx: &'ctx mut RewriteContext,
}

impl<'a, 'ctx> ElementCallRewriter<'a, 'ctx> {
    pub fn new(ast: AstBuilder<'a>, ctx: &'ctx mut RewriteContext) -> Self {
        Self { ast, ctx }
    }

    /// `React.createElement('slot', props, children?)` becomes
    /// `__getReactComponentSlot(this, name, children?)`, with the slot
    /// name read from the props literal's `name` field.
    fn build_slot_call(&self, call: &CallExpression<'a>) -> Expression<'a> {
        let name = slot_name(call);
        let mut args = self.ast.vec();
        args.push(Argument::from(self.ast.expression_this(SPAN)));
        args.push(Argument::from(
            self.ast
                .expression_string_literal(SPAN, self.ast.allocator.alloc_str(name), None),
        ));
        if let Some(children) = call.arguments.get(2) {
            args.push(children.clone_in(self.ast.allocator));
        }
        let callee = self.ast.expression_identifier(SPAN, SLOT_RESOLVER_NAME);
        self.ast.expression_call(
            SPAN,
            callee,
            None::<oxc_box<TSTypeParameterInstantiation>>,
            args,
            false,
        )
    }

    fn wrap_props_argument(&self, call: &mut CallExpression<'a>) {
        let Some(props) = call.arguments.get(1).and_then(|arg| arg.as_expression()) else {
            return;
        };
        let props = props.clone_in(self.ast.allocator);
        let callee = self.ast.expression_identifier(SPAN, PROPS_NORMALIZER_NAME);
        let mut args = self.ast.vec();
        args.push(Argument::from(props));
        let wrapped = self.ast.expression_call(
            SPAN,
            callee,
            None::<oxc_box<TSTypeParameterInstantiation>>,
            args,
            false,
        );
        call.arguments[1] = Argument::from(wrapped);
    }
}

impl<'a, 'ctx> VisitMut<'a> for ElementCallRewriter<'a, 'ctx> {
    fn visit_expression(&mut self, expr: &mut Expression<'a>) {
        let mut slot_replacement = None;
        if let Expression::CallExpression(call) = &mut *expr {
            if is_element_creation(call) && call.arguments.len() >= 2 {
                if is_slot_marker(call) {
                    slot_replacement = Some(self.build_slot_call(call));
                } else {
                    self.wrap_props_argument(call);
                }
            }
        }
        if let Some(replacement) = slot_replacement {
            *expr = replacement;
            self.ctx.slots_used = true;
        }
        // Keep descending: children and props values may hold further
        // element-creation calls of their own.
        walk_expression(self, expr);
    }
}

/// The well-known callee shape: a static member access
/// `React.createElement`.
fn is_element_creation(call: &CallExpression) -> bool {
    let Expression::StaticMemberExpression(member) = &call.callee else {
        return false;
    };
    if member.property.name != "createElement" {
        return false;
    }
    matches!(&member.object, Expression::Identifier(ident) if ident.name == "React")
}

fn is_slot_marker(call: &CallExpression) -> bool {
    matches!(
        call.arguments.first().and_then(|arg| arg.as_expression()),
        Some(Expression::StringLiteral(tag)) if tag.value == "slot"
    )
}

/// Slot name from the props literal's `name` field; `"default"` when the
/// props are not an object literal, the field is absent, or its value is
/// not a string literal.
fn slot_name<'a>(call: &CallExpression<'a>) -> &'a str {
    let Some(Expression::ObjectExpression(props)) =
        call.arguments.get(1).and_then(|arg| arg.as_expression())
    else {
        return DEFAULT_SLOT;
    };
    for property in &props.properties {
        let ObjectPropertyKind::ObjectProperty(property) = property else {
            continue;
        };
        if static_key_name(&property.key) != Some("name") {
            continue;
        }
        if let Expression::StringLiteral(value) = &property.value {
            return value.value.as_str();
        }
    }
    DEFAULT_SLOT
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_codegen::Codegen;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn rewrite(source: &str) -> (String, bool) {
        let allocator = Allocator::default();
        let ret = Parser::new(
            &allocator,
            allocator.alloc_str(source),
            SourceType::default().with_module(true),
        )
        .parse();
        assert!(ret.errors.is_empty(), "fixture must parse");
        let mut program = ret.program;
        let mut ctx = RewriteContext::default();
        let mut rewriter = ElementCallRewriter::new(AstBuilder::new(&allocator), &mut ctx);
        rewriter.visit_program(&mut program);
        (Codegen::new().build(&program).code, ctx.slots_used)
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn named_slot_marker_becomes_a_resolver_call() {
        let (code, slots_used) =
            rewrite("React.createElement('slot', { name: 'header' });");
        assert!(slots_used);
        assert!(code.contains("__getReactComponentSlot(this, \"header\")"));
        assert!(!code.contains("createElement"));
    }

    #[test]
    fn unnamed_slot_resolves_to_the_default_slot() {
        let (code, slots_used) = rewrite("React.createElement('slot', {});");
        assert!(slots_used);
        assert!(code.contains("__getReactComponentSlot(this, \"default\")"));
    }

    #[test]
    fn slot_children_pass_through_unchanged() {
        let (code, _) = rewrite(
            "React.createElement('slot', {}, React.createElement('em', { id: 'fallback' }));",
        );
        // The fallback child is itself an element-creation call, so it is
        // normalized on its own, inside the resolver call.
        assert!(code.contains("__getReactComponentSlot(this, \"default\", React.createElement"));
        assert!(code.contains("__transformReactJSXProps({"));
    }

    #[test]
    fn non_slot_calls_get_their_props_wrapped_exactly_once() {
        let (code, slots_used) = rewrite("React.createElement('div', { class: 'a' });");
        assert!(!slots_used);
        assert_eq!(count(&code, "__transformReactJSXProps("), 1);
        assert!(!code.contains("__transformReactJSXProps(__transformReactJSXProps"));
    }

    #[test]
    fn calls_without_a_props_argument_are_untouched() {
        let (code, slots_used) = rewrite("React.createElement('br');");
        assert!(!slots_used);
        assert_eq!(count(&code, "__transformReactJSXProps("), 0);
        assert!(code.contains("React.createElement("));
        assert!(code.contains("br"));
    }

    #[test]
    fn unrelated_calls_are_untouched() {
        let (code, _) = rewrite("Other.createElement('div', { a: 1 }); create('div', {});");
        assert_eq!(count(&code, "__transformReactJSXProps("), 0);
    }

    #[test]
    fn every_nested_call_site_is_rewritten() {
        let (code, _) = rewrite(
            "React.createElement('ul', { class: 'list' },
               items.map(item => React.createElement('li', { key: item },
                 React.createElement('b', { bold: true }))));",
        );
        assert_eq!(count(&code, "__transformReactJSXProps("), 3);
    }
}
