pub mod value;

use crate::InterviewOrderAst;
use crate::node::{Node, SnapshotArgs};

pub use value::format_value;
use value::{bool_literal, format_float, quote};

/// Decorative first line of every compiled order block.
pub const BANNER: &str = "#################### Interview order #####################";

/// Statement emitted for an empty branch so the text stays parseable.
pub const PLACEHOLDER: &str = "pass";

/// Header introducing the scripted payload of the block.
pub const CODE_HEADER: &str = "code: |";

const STEP: usize = 2;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compile a complete order block: banner, `id`, `mandatory`, and the code
/// payload indented by two spaces.
pub fn compile(ast: &InterviewOrderAst) -> String {
    let mut lines = vec![
        BANNER.to_string(),
        format!("id: {}", ast.id),
        format!("mandatory: {}", bool_literal(ast.mandatory)),
        CODE_HEADER.to_string(),
    ];
    lines.extend(emit_branch(&ast.nodes, STEP));
    lines.join("\n")
}

/// Render a node sequence as lines, each prefixed by `indent` spaces.
pub fn emit(nodes: &[Node], indent: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for node in nodes {
        emit_node(node, indent, &mut lines);
    }
    lines
}

// ---------------------------------------------------------------------------
// Node rendering
// ---------------------------------------------------------------------------

fn emit_node(node: &Node, indent: usize, out: &mut Vec<String>) {
    let pad = " ".repeat(indent);
    match node {
        Node::Ask { var } => out.push(format!("{pad}{var}")),
        Node::Section { name } => out.push(format!("{pad}nav.set_section({})", quote(name))),
        Node::Progress { value } => {
            out.push(format!("{pad}set_progress({})", format_float(value.round())));
        }
        Node::Gather { list } => out.push(format!("{pad}{list}.gather()")),
        Node::If {
            cond,
            then,
            otherwise,
        } => {
            out.push(format!("{pad}if {cond}:"));
            out.extend(emit_branch(then, indent + STEP));
            if let Some(otherwise) = otherwise.as_ref().filter(|o| !o.is_empty()) {
                out.push(format!("{pad}else:"));
                out.extend(emit(otherwise, indent + STEP));
            }
        }
        Node::For { item, iter, body } => {
            out.push(format!("{pad}for {item} in {iter}:"));
            out.extend(emit_branch(body, indent + STEP));
        }
        Node::RunOnce { name, .. } => {
            let flag = node.guard_flag().unwrap_or_default();
            let inner = " ".repeat(indent + STEP);
            out.push(format!(
                "{pad}if not defined({}) or not {flag}:",
                quote(&flag)
            ));
            out.push(format!("{inner}{name}"));
            out.push(format!("{inner}{flag} = {}", bool_literal(true)));
        }
        Node::StoreSnapshot { args } => emit_snapshot(args, indent, out),
    }
}

/// Emit a child sequence, falling back to the placeholder when it is empty.
fn emit_branch(nodes: &[Node], indent: usize) -> Vec<String> {
    if nodes.is_empty() {
        vec![format!("{}{PLACEHOLDER}", " ".repeat(indent))]
    } else {
        emit(nodes, indent)
    }
}

fn emit_snapshot(args: &SnapshotArgs, indent: usize, out: &mut Vec<String>) {
    let pad = " ".repeat(indent);
    let arg_pad = " ".repeat(indent + STEP);
    let entry_pad = " ".repeat(indent + 2 * STEP);

    out.push(format!("{pad}store_variables_snapshot("));
    out.push(format!(
        "{arg_pad}persistent={},",
        bool_literal(args.persistent)
    ));
    if args.data.is_empty() {
        out.push(format!("{arg_pad}data={{}},"));
    } else {
        out.push(format!("{arg_pad}data={{"));
        for (key, value) in &args.data {
            out.push(format!(
                "{entry_pad}{}: {},",
                quote(key),
                format_value(value)
            ));
        }
        out.push(format!("{arg_pad}}},"));
    }
    out.push(format!("{pad})"));
}
