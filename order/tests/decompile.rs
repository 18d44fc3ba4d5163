use order::decompile;
use order::emit::emit;
use order::node::{Node, SnapshotArgs, derive_flag};

fn kinds(nodes: &[Node]) -> Vec<&'static str> {
    nodes.iter().map(Node::kind).collect()
}

#[test]
fn approximate_round_trip() {
    let nodes = vec![
        Node::ask("user.name.full"),
        Node::If {
            cond: "user.age < 18".into(),
            then: vec![Node::ask("guardian.name.full")],
            otherwise: Some(Vec::new()),
        },
    ];
    let parsed = decompile(&emit(&nodes, 0).join("\n"));

    assert_eq!(kinds(&parsed), vec!["ask", "if"]);
    assert_eq!(parsed[0], Node::ask("user.name.full"));
    match &parsed[1] {
        Node::If {
            cond,
            then,
            otherwise,
        } => {
            assert_eq!(cond, "user.age < 18");
            assert_eq!(then, &vec![Node::ask("guardian.name.full")]);
            assert!(otherwise.as_ref().is_none_or(Vec::is_empty));
        }
        other => panic!("expected if, got {other:?}"),
    }
}

#[test]
fn every_simple_kind() {
    let text = "nav.set_section('intro')\n\
                set_progress(40)\n\
                children.gather()\n\
                client.name.first";
    assert_eq!(
        decompile(text),
        vec![
            Node::Section {
                name: "intro".into()
            },
            Node::Progress { value: 40.0 },
            Node::Gather {
                list: "children".into()
            },
            Node::ask("client.name.first"),
        ]
    );
}

#[test]
fn escaped_section_name() {
    let nodes = decompile(r#"nav.set_section("say \"hi\"")"#);
    assert_eq!(
        nodes,
        vec![Node::Section {
            name: r#"say "hi""#.into()
        }]
    );
}

#[test]
fn placeholders_never_leak() {
    let text = "if a:\n  pass\nelse:\n  pass\nfor c in children:\n  pass\nafter";
    let nodes = decompile(text);
    assert_eq!(kinds(&nodes), vec!["if", "for", "ask"]);
    assert_eq!(
        nodes[0],
        Node::If {
            cond: "a".into(),
            then: Vec::new(),
            otherwise: Some(Vec::new()),
        }
    );
    assert_eq!(nodes[2], Node::ask("after"));
}

#[test]
fn blank_and_comment_lines_are_ignored() {
    let text = "# leading comment\n\nfirst\n  # indented comment\n\nsecond";
    assert_eq!(
        decompile(text),
        vec![Node::ask("first"), Node::ask("second")]
    );
}

#[test]
fn over_indented_lines_are_skipped() {
    let text = "first\n      stray.deep\nsecond";
    assert_eq!(
        decompile(text),
        vec![Node::ask("first"), Node::ask("second")]
    );
}

#[test]
fn nested_blocks_close_on_dedent() {
    let text = "for child in children:\n  if child.age < 5:\n    child.daycare\n  child.school\ndone";
    let nodes = decompile(text);
    assert_eq!(kinds(&nodes), vec!["for", "ask"]);
    let Node::For { item, iter, body } = &nodes[0] else {
        panic!("expected for");
    };
    assert_eq!(item, "child");
    assert_eq!(iter, "children");
    assert_eq!(kinds(body), vec!["if", "ask"]);
}

#[test]
fn run_once_recovers_derived_flag() {
    let nodes = vec![Node::run_once("send_email()")];
    let parsed = decompile(&emit(&nodes, 0).join("\n"));
    assert_eq!(
        parsed,
        vec![Node::RunOnce {
            name: "send_email()".into(),
            flag: Some(derive_flag("send_email()")),
        }]
    );
    assert_eq!(parsed[0].guard_flag(), nodes[0].guard_flag());
}

#[test]
fn run_once_skips_comments_and_drops_the_rest() {
    let text = "if not defined('intro_done') or not intro_done:\n\
                \x20 # show the intro\n\
                \x20 intro_screen\n\
                \x20 extra_step\n\
                \x20 intro_done = True\n\
                next";
    assert_eq!(
        decompile(text),
        vec![
            Node::RunOnce {
                name: "intro_screen".into(),
                flag: Some("intro_done".into()),
            },
            Node::ask("next"),
        ]
    );
}

#[test]
fn guard_without_a_step_is_a_plain_if() {
    let text = "if not defined('x') or not x:\n  x = True";
    let nodes = decompile(text);
    assert_eq!(kinds(&nodes), vec!["if"]);
}

#[test]
fn other_guard_phrasings_stay_plain_if() {
    let text = "if not x:\n  do_it\n  x = True";
    let nodes = decompile(text);
    assert_eq!(kinds(&nodes), vec!["if"]);
}

#[test]
fn snapshot_call_is_consumed_whole() {
    let text = "store_variables_snapshot(\n  persistent=False,\n  data={\n    \"k\": \"(v\",\n  },\n)\nafter";
    assert_eq!(
        decompile(text),
        vec![
            Node::StoreSnapshot {
                args: SnapshotArgs::default()
            },
            Node::ask("after"),
        ]
    );
}

#[test]
fn single_line_snapshot() {
    let nodes = decompile("store_variables_snapshot(persistent=True)\nnext");
    assert_eq!(kinds(&nodes), vec!["store_snapshot", "ask"]);
}

#[test]
fn unknown_header_falls_back_to_ask() {
    let nodes = decompile("while True:\n  loop_body\nend");
    assert_eq!(nodes, vec![Node::ask("while True:"), Node::ask("end")]);
}

#[test]
fn indented_text_uses_shallowest_statement_as_top_level() {
    let nodes = decompile(emit(&[Node::ask("a"), Node::ask("b")], 2).join("\n").as_str());
    assert_eq!(nodes, vec![Node::ask("a"), Node::ask("b")]);
}

#[test]
fn over_indented_first_line_does_not_end_the_plan() {
    assert_eq!(
        decompile("    stray\nfirst\nsecond"),
        vec![Node::ask("first"), Node::ask("second")]
    );
}

#[test]
fn explicit_flag_need_not_be_an_identifier() {
    let nodes = vec![Node::RunOnce {
        name: "notify".into(),
        flag: Some("done-flag".into()),
    }];
    assert_eq!(decompile(&emit(&nodes, 0).join("\n")), nodes);
}
