//! Fixed lifecycle hook table.
//!
//! Every descriptor key with special treatment is a variant here, so the
//! dispatch in the class builder is a single exhaustive match instead of
//! scattered string comparisons.

/// Constructor fragment passes, in emission order. Fragments from
/// different passes never interleave; fragments within a pass keep
/// descriptor order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorPass {
    WillCreate,
    State,
    DidCreate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    WillCreate,
    State,
    DidCreate,
    WillMount,
    DidMount,
    WillUpdate,
    DidUpdate,
    WillUnmount,
    Render,
}

impl Hook {
    /// Both the short hook spelling and its `component`-prefixed alias
    /// are part of the fixed vocabulary. Method-hook members always keep
    /// the descriptor's own spelling in the output class.
    pub fn from_key(key: &str) -> Option<Hook> {
        match key {
            "willCreate" | "componentWillCreate" => Some(Hook::WillCreate),
            "state" => Some(Hook::State),
            "didCreate" | "componentDidCreate" => Some(Hook::DidCreate),
            "willMount" | "componentWillMount" => Some(Hook::WillMount),
            "didMount" | "componentDidMount" => Some(Hook::DidMount),
            "willUpdate" | "componentWillUpdate" => Some(Hook::WillUpdate),
            "didUpdate" | "componentDidUpdate" => Some(Hook::DidUpdate),
            "willUnmount" | "componentWillUnmount" => Some(Hook::WillUnmount),
            "render" => Some(Hook::Render),
            _ => None,
        }
    }

    /// Pass for hooks that compile into constructor fragments; `None` for
    /// hooks transplanted as instance methods.
    pub fn constructor_pass(&self) -> Option<ConstructorPass> {
        match self {
            Hook::WillCreate => Some(ConstructorPass::WillCreate),
            Hook::State => Some(ConstructorPass::State),
            Hook::DidCreate => Some(ConstructorPass::DidCreate),
            Hook::WillMount
            | Hook::DidMount
            | Hook::WillUpdate
            | Hook::DidUpdate
            | Hook::WillUnmount
            | Hook::Render => None,
        }
    }
}
