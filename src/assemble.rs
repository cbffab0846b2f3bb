//! Output assembly.
//!
//! Owns the `compile` entry point and the fixed anchor ordering of the
//! output module:
//!
//! 1. base framework import
//! 2. validator-library import, iff any validator entry exists
//! 3. passthrough statements from the input module
//! 4. attribute normalization helper
//! 5. slot resolver helper, iff a slot rewrite occurred
//! 6. class declaration
//! 7. `defaultProps` / `propTypes` assignments, iff present
//! 8. synthesized default export, replacing the descriptor's export
//!
//! The tree is printed exactly once at the end.

use std::mem;

use oxc_allocator::Allocator;
use oxc_ast::AstBuilder;
use oxc_ast_visit::VisitMut;
use oxc_codegen::Codegen;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::class_builder;
use crate::error::{CompileError, Result};
use crate::extract;
use crate::props;
use crate::rewrite::{ElementCallRewriter, RewriteContext};
use crate::snippets;

/// Compile one descriptor module into its class-convention counterpart.
///
/// Pure and synchronous: one arena, one pass, no shared state between
/// calls.
pub fn compile(source: &str) -> Result<String> {
    let allocator = Allocator::default();
    let ast = AstBuilder::new(&allocator);

    let text = allocator.alloc_str(source);
    let ret = Parser::new(&allocator, text, module_source_type()).parse();
    if let Some(error) = ret.errors.first() {
        return Err(CompileError::UnderlyingParseFailure {
            message: error.to_string(),
        });
    }
    let mut program = ret.program;

    let export = extract::find_component_export(&program)?;
    tracing::debug!(component = export.name.as_str(), "compiling descriptor");

    let (class_statement, props_output) = {
        let descriptor = extract::descriptor_object(&program.body[export.index]);
        let class_statement = class_builder::build_class(&allocator, &export.name, descriptor);
        let props_output = props::synthesize(ast, &export.name, descriptor);
        (class_statement, props_output)
    };
    let needs_validator_import = props_output.prop_types.is_some();

    // Pass one: imports first, input statements pass through minus the
    // descriptor export, then normalizer, class and static assignments.
    let original_body = mem::replace(&mut program.body, ast.vec());
    let mut body = ast.vec();
    body.push(snippets::parse_statement(&allocator, snippets::BASE_IMPORT));
    if needs_validator_import {
        body.push(snippets::parse_statement(
            &allocator,
            snippets::VALIDATOR_IMPORT,
        ));
    }
    for (index, statement) in original_body.into_iter().enumerate() {
        if index != export.index {
            body.push(statement);
        }
    }
    body.push(snippets::parse_statement(
        &allocator,
        snippets::PROPS_NORMALIZER,
    ));
    let class_index = body.len();
    body.push(class_statement);
    if let Some(statement) = props_output.default_props {
        body.push(statement);
    }
    if let Some(statement) = props_output.prop_types {
        body.push(statement);
    }
    program.body = body;

    // Rewrite pass over the whole synthesized tree. The slots flag lives
    // in a context owned by this call.
    let mut rewrite_ctx = RewriteContext::default();
    let mut rewriter = ElementCallRewriter::new(ast, &mut rewrite_ctx);
    rewriter.visit_program(&mut program);

    // Pass two: slot resolver immediately before the class when needed,
    // synthesized export last.
    let assembled_body = mem::replace(&mut program.body, ast.vec());
    let mut body = ast.vec();
    for (index, statement) in assembled_body.into_iter().enumerate() {
        if index == class_index && rewrite_ctx.slots_used {
            body.push(snippets::parse_statement(&allocator, snippets::SLOT_RESOLVER));
        }
        body.push(statement);
    }
    body.push(snippets::parse_statement(
        &allocator,
        &snippets::export_default(&export.name),
    ));
    program.body = body;

    Ok(Codegen::new().build(&program).code)
}

fn module_source_type() -> SourceType {
    SourceType::default().with_module(true)
}
