pub mod flag;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use flag::derive_flag;

/// A single step of an interview order.
///
/// Branching variants own their child sequences; an empty sequence is still
/// a sequence and compiles to a `pass` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Bare reference to a value that should be resolved next.
    Ask { var: String },
    /// Entry into a named navigation section.
    Section { name: String },
    /// Completion percentage. Rounded when compiled, never clamped.
    Progress { value: f64 },
    /// Collection of a repeated-item list.
    Gather { list: String },
    /// Conditional with an optional else branch.
    If {
        cond: String,
        #[serde(default)]
        then: Vec<Node>,
        #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
        otherwise: Option<Vec<Node>>,
    },
    /// Loop over `iter`, binding each element to `item`.
    For {
        item: String,
        iter: String,
        #[serde(default)]
        body: Vec<Node>,
    },
    /// Runs `name` at most once, guarded by `flag`.
    RunOnce {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flag: Option<String>,
    },
    /// Persist the current answers.
    StoreSnapshot { args: SnapshotArgs },
}

impl Node {
    /// Short lowercase tag, matching the serialized `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Ask { .. } => "ask",
            Node::Section { .. } => "section",
            Node::Progress { .. } => "progress",
            Node::Gather { .. } => "gather",
            Node::If { .. } => "if",
            Node::For { .. } => "for",
            Node::RunOnce { .. } => "run_once",
            Node::StoreSnapshot { .. } => "store_snapshot",
        }
    }

    pub fn ask(var: impl Into<String>) -> Self {
        Node::Ask { var: var.into() }
    }

    pub fn run_once(name: impl Into<String>) -> Self {
        Node::RunOnce {
            name: name.into(),
            flag: None,
        }
    }

    /// The flag guarding a RUN_ONCE node: explicit when given, otherwise
    /// derived from the name. `None` for every other variant.
    pub fn guard_flag(&self) -> Option<String> {
        match self {
            Node::RunOnce { name, flag } => Some(
                flag.as_deref()
                    .filter(|f| !f.trim().is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| derive_flag(name)),
            ),
            _ => None,
        }
    }
}

/// Arguments of a `store_variables_snapshot(...)` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotArgs {
    pub persistent: bool,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Default for SnapshotArgs {
    fn default() -> Self {
        SnapshotArgs {
            persistent: true,
            data: Map::new(),
        }
    }
}
