//! Which optional prompts a property node gets.

use crate::catalog::{Kind, Mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ask {
    Reference,
    Format,
    Required,
    Nullable,
    Example,
}

/// Everything the gate table looks at for one node.
#[derive(Debug, Clone, Copy)]
pub struct Gate {
    pub mode: Mode,
    /// Not known yet when the reference question is asked.
    pub kind: Option<Kind>,
    pub has_parent: bool,
    /// API builds only collect examples when the user opted in.
    pub examples_enabled: bool,
}

pub fn asks(ask: Ask, gate: &Gate) -> bool {
    match ask {
        Ask::Reference => gate.mode != Mode::Model,
        Ask::Format => gate.kind.is_some_and(|k| k.is_formattable()),
        Ask::Required => gate.has_parent && gate.mode != Mode::Model,
        Ask::Nullable => gate.mode != Mode::Api,
        Ask::Example => {
            gate.kind.is_some_and(|k| k.is_examplable())
                && (gate.mode != Mode::Api || gate.examples_enabled)
        }
    }
}
