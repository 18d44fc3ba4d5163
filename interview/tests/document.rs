use interview::{BlockLanguage, IssueLevel, analyze_blocks, validate_document};
use order::node::Node;
use order::{InterviewOrderAst, compile};

const DOCUMENT: &str = "\
metadata:
  title: Intake interview
---
question: |
  What is your name?
  Please use your legal name.
fields:
  - Name: user.name.first
---
#################### Interview order #####################
id: main_order
mandatory: True
code: |
  nav.set_section(\"intro\")
  user.name.first
  # comment lines are not order items
  set_progress(50)
---
def: greeting
mako: Hello
";

#[test]
fn analyzes_every_block() {
    let blocks = analyze_blocks(DOCUMENT).expect("valid document");
    assert_eq!(blocks.len(), 4);

    assert_eq!(blocks[0].id, "metadata-0");
    assert_eq!(blocks[0].label.as_deref(), Some("Intake interview"));

    assert_eq!(blocks[1].id, "question-1");
    assert_eq!(blocks[1].label.as_deref(), Some("What is your name?"));
    assert!(!blocks[1].is_order);

    assert_eq!(blocks[3].block_type, "def");
    assert_eq!(blocks[3].language, BlockLanguage::Markdown);
}

#[test]
fn order_block_carries_its_plan() {
    let blocks = analyze_blocks(DOCUMENT).expect("valid document");
    let order_block = &blocks[2];

    assert_eq!(order_block.id, "code-2");
    assert_eq!(order_block.language, BlockLanguage::Python);
    assert_eq!(order_block.label.as_deref(), Some("Interview Order"));
    assert!(order_block.is_order);
    assert!(order_block.is_mandatory);
    assert_eq!(
        order_block.order_items,
        vec!["nav.set_section(\"intro\")", "user.name.first", "set_progress(50)"]
    );

    let plan = order_block.order.as_ref().expect("extracted plan");
    assert_eq!(plan.id, "main_order");
    let kinds: Vec<&str> = plan.nodes.iter().map(Node::kind).collect();
    assert_eq!(kinds, vec!["section", "ask", "progress"]);
}

#[test]
fn nested_interview_order_mapping() {
    let doc = "interview_order:\n  mandatory: yes\n  code: |\n    a.b\n    c.d\n";
    let blocks = analyze_blocks(doc).expect("valid document");
    assert_eq!(blocks[0].label.as_deref(), Some("Interview Order"));
    assert!(blocks[0].is_mandatory);
    assert_eq!(blocks[0].order_items, vec!["a.b", "c.d"]);
    assert_eq!(
        blocks[0].order.as_ref().map(|o| o.nodes.clone()),
        Some(vec![Node::ask("a.b"), Node::ask("c.d")])
    );
}

#[test]
fn invalid_yaml_is_an_error() {
    let err = analyze_blocks("a: 1\n---\nkey: [unclosed").expect_err("bad yaml");
    assert!(err.to_string().contains("segment at index 1"), "{err}");
}

#[test]
fn yaml_error_diagnostic_points_at_its_segment() {
    let doc = "a: 1\n---\nkey: [unclosed";
    let err = analyze_blocks(doc).expect_err("bad yaml");
    let diagnostic = err.to_diagnostic(0);
    assert_eq!(diagnostic.labels.len(), 1);
    assert!(doc[diagnostic.labels[0].range.clone()].starts_with("key:"));
}

#[test]
fn summary_serializes_like_the_editor_expects() {
    let blocks = analyze_blocks(DOCUMENT).expect("valid document");
    let json = serde_json::to_value(&blocks[2]).expect("serializable");
    assert_eq!(json["type"], "code");
    assert_eq!(json["language"], "python");
    assert_eq!(json["isMandatory"], true);
    assert_eq!(json["order"]["nodes"][0]["type"], "section");
}

#[test]
fn valid_document_has_no_issues() {
    assert!(validate_document(DOCUMENT).is_empty());
}

#[test]
fn second_mandatory_order_is_rejected() {
    let first = compile(&InterviewOrderAst::new("main_order", vec![Node::ask("a")]));
    let second = compile(&InterviewOrderAst::new("backup_order", vec![Node::ask("b")]));
    let doc = format!("{first}\n---\n{second}\n");

    let issues = validate_document(&doc);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].level, IssueLevel::Error);
    assert_eq!(issues[0].block_id.as_deref(), Some("code-1"));
    assert_eq!(
        issues[0].message,
        "Only one mandatory interview_order block is allowed."
    );
    let span = issues[0].span.clone().expect("span");
    assert!(doc[span].starts_with("####"));
}

#[test]
fn optional_orders_do_not_conflict() {
    let mut optional = InterviewOrderAst::new("side_order", vec![Node::ask("b")]);
    optional.mandatory = false;
    let first = compile(&InterviewOrderAst::new("main_order", vec![Node::ask("a")]));
    let doc = format!("{first}\n---\n{}\n", compile(&optional));
    assert!(validate_document(&doc).is_empty());
}

#[test]
fn yaml_errors_become_issues() {
    let issues = validate_document("a: 1\n---\nkey: [unclosed");
    assert_eq!(issues.len(), 1);
    assert!(issues[0].is_error());
    assert!(issues[0].span.is_some());
}
