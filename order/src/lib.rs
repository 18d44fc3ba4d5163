pub mod decompile;
pub mod detect;
pub mod emit;
pub mod extract;
pub mod node;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::Node;

pub use decompile::decompile;
pub use detect::looks_like_order;
pub use emit::compile;
pub use extract::{extract, extract_order, read_mandatory};

/// A structured interview order plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewOrderAst {
    /// Block identifier, written as the `id:` line of the block.
    pub id: String,
    /// Whether the block is marked `mandatory`.
    pub mandatory: bool,
    /// Top-level steps in execution order.
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl InterviewOrderAst {
    pub fn new(id: impl Into<String>, nodes: Vec<Node>) -> Self {
        InterviewOrderAst {
            id: id.into(),
            mandatory: true,
            nodes,
        }
    }
}

impl fmt::Display for InterviewOrderAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", compile(self))
    }
}
