//! Canonical runtime support source.
//!
//! Everything here is fixed output-side JavaScript: it is parsed into the
//! compile arena and spliced into the output tree verbatim. The only
//! textual substitution anywhere in the compiler is a component name;
//! descriptor content always travels as tree splices.

use oxc_allocator::Allocator;
use oxc_ast::ast::Statement;
use oxc_parser::Parser;
use oxc_span::SourceType;

pub const BASE_IMPORT: &str = "import React from 'react';";

pub const VALIDATOR_IMPORT: &str = "import PropTypes from 'prop-types';";

/// Scope-isolated constructor fragment whose result is discarded.
pub const DISCARDED_FRAGMENT: &str = "(() => {})();";

/// Constructor fragment whose result is the sole source of instance
/// state.
pub const STATE_FRAGMENT: &str = "this.state = (() => {})();";

/// Attribute normalization helper wrapped around every non-slot props
/// argument.
pub const PROPS_NORMALIZER: &str = r#"function __transformReactJSXProps(props) {
  if (!props) return props;

  Object.keys(props).forEach(propName => {
    let newPropName;

    if (propName === 'class') {
      newPropName = 'className';
    } else {
      newPropName = propName;
    }

    if (propName !== newPropName) {
      props[newPropName] = props[propName];
      delete props[propName];
    }
  });

  return props;
}"#;

/// Content-projection resolver emitted when at least one slot marker was
/// rewritten.
pub const SLOT_RESOLVER: &str = r#"function __getReactComponentSlot(self, name, defaultChildren) {
  if (!self.props.children) {
    return defaultChildren;
  }

  let slotChildren;
  if (Array.isArray(self.props.children)) {
    slotChildren = [];
    self.props.children.forEach(child => {
      const slotName = child.props.slot || 'default';
      if (slotName === name) {
        slotChildren.push(child);
      }
    });

    if (slotChildren.length === 1) return slotChildren[0];
    if (slotChildren.length > 1) return slotChildren;
  } else if (self.props.children.props && self.props.children.props.slot === name) {
    return self.props.children;
  } else if (self.props.children.props && !self.props.children.props.slot && name === 'default') {
    return self.props.children;
  }

  return defaultChildren;
}"#;

/// Fixed support members carried by every synthesized class, keyed by
/// member name so a descriptor member of the same name can take their
/// place.
pub const SUPPORT_MEMBERS: [(&str, &str); 4] = [
    (
        "dispatchEvent",
        r#"  dispatchEvent(event, ...args) {
    const self = this;
    if (!event || !event.trim().length) return;
    const eventName = (event || '')
      .trim()
      .split(/[ \-_:]/)
      .map(word => word[0].toUpperCase() + word.substring(1))
      .join('');
    const propName = 'on' + eventName;
    if (self.props[propName]) self.props[propName](...args);
  }"#,
    ),
    (
        "children",
        r#"  get children() {
    const self = this;
    const children = [];
    let child = self._reactInternalFiber && self._reactInternalFiber.child;
    function findChildren(node) {
      if (node.type && typeof node.type === 'function') {
        children.push(node.stateNode);
      } else if (node.child) {
        findChildren(node.child);
      }
      if (node.sibling) findChildren(node.sibling);
    }
    if (child) findChildren(child);
    return children;
  }"#,
    ),
    (
        "parent",
        r#"  get parent() {
    const self = this;
    const el = self.el;
    let parent;
    let reactProp;
    function checkParentNode(node) {
      if (!node) return;
      if (!reactProp) {
        for (let propName in node) {
          if (propName.indexOf('__reactInternalInstance') >= 0) reactProp = propName;
        }
      }
      if (
        node[reactProp] &&
        node[reactProp]._debugOwner &&
        typeof node[reactProp]._debugOwner.type === 'function' &&
        node[reactProp]._debugOwner.stateNode &&
        node[reactProp]._debugOwner.stateNode !== self
      ) {
        parent = node[reactProp]._debugOwner.stateNode;
        return;
      }
      checkParentNode(node.parentNode);
    }
    if (self._reactInternalFiber._debugOwner) return self._reactInternalFiber._debugOwner.stateNode;
    else if (el) checkParentNode(el);
    return parent;
  }"#,
    ),
    (
        "el",
        r#"  get el() {
    const self = this;
    let el;
    let child = self._reactInternalFiber.child;
    while (!el && child) {
      if (child.stateNode && child.stateNode instanceof window.HTMLElement) {
        el = child.stateNode;
      } else {
        child = child.child;
      }
    }
    return el;
  }"#,
    ),
];

pub fn export_default(name: &str) -> String {
    format!("export default {};", name)
}

fn module_source_type() -> SourceType {
    SourceType::default().with_module(true)
}

/// Parse a canonical snippet into the compile arena. Snippets are fixed
/// source owned by this module; failing to parse one is a compiler bug,
/// not an input condition.
pub fn parse_statements<'a>(
    allocator: &'a Allocator,
    source: &str,
) -> oxc_allocator::Vec<'a, Statement<'a>> {
    let text = allocator.alloc_str(source);
    let ret = Parser::new(allocator, text, module_source_type()).parse();
    assert!(
        ret.errors.is_empty(),
        "canonical snippet failed to parse: {}",
        source
    );
    ret.program.body
}

pub fn parse_statement<'a>(allocator: &'a Allocator, source: &str) -> Statement<'a> {
    parse_statements(allocator, source)
        .into_iter()
        .next()
        .expect("canonical snippet yields a statement")
}
