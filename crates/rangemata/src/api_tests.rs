use indoc::indoc;

use crate::{
    Automaton, Error, Interval, ModuleError, Node, RuntimeError, accepts, complement, concat,
    decode, determinize, encode, find_matches, from_node, intersect, minimize, minus, plus, repeat,
    star, union,
};

fn compile(node: &Node) -> Automaton {
    from_node(node).unwrap()
}

#[test]
fn identifier_like_words() {
    let g = compile(&Node::concatenation(
        Node::range('a', 'z'),
        Node::star(Node::range('0', '9')),
    ));

    assert!(accepts(&g, "a"));
    assert!(accepts(&g, "a123"));
    assert!(!accepts(&g, "1a"));
}

#[test]
fn duplicate_alternatives_collapse() {
    let g = minimize(&compile(&Node::alternation(Node::char('a'), Node::char('a'))));

    assert_eq!(g.len(), 2);
    assert_eq!(g, minimize(&compile(&Node::char('a'))));
    insta::assert_snapshot!(g.dump(), @r"
    S0 (initial)
      a → S1
    S1 (accept)
    ");
}

#[test]
fn overlapping_ranges_intersect() {
    let g = intersect(
        &compile(&Node::range('a', 'm')),
        &compile(&Node::range('g', 'z')),
    );

    for c in 'a'..='z' {
        assert_eq!(accepts(&g, &c.to_string()), ('g'..='m').contains(&c), "{c}");
    }
    assert!(!accepts(&g, ""));
    assert!(!accepts(&g, "gg"));
    insta::assert_snapshot!(g.dump(), @r"
    S0 (initial)
      g-m → S1
    S1 (accept)
    ");
}

#[test]
fn bounded_repetition() {
    let g = repeat(&compile(&Node::char('x')), 2, Some(4)).unwrap();

    assert!(accepts(&g, "xx"));
    assert!(accepts(&g, "xxx"));
    assert!(accepts(&g, "xxxx"));
    assert!(!accepts(&g, "x"));
    assert!(!accepts(&g, "xxxxx"));
}

#[test]
fn combinators_compose() {
    let digit = compile(&Node::range('0', '9'));
    let sign = compile(&Node::char('-'));
    let number = concat(&union(&sign, &Automaton::empty_string()), &plus(&digit));
    let list = concat(&number, &star(&concat(&compile(&Node::char(',')), &number)));
    let dfa = minimize(&list);

    assert!(accepts(&dfa, "1,-23,4"));
    assert!(accepts(&dfa, "-0"));
    assert!(!accepts(&dfa, "1,,2"));
    assert!(!accepts(&dfa, "--1"));
    assert_eq!(
        find_matches(&dfa, "x 1,2 y -3").unwrap().collect::<Vec<_>>(),
        [(2, 5), (8, 10)]
    );
}

#[test]
fn complement_and_minus() {
    let a_star = compile(&Node::star(Node::char('a')));
    let not_a_star = complement(&a_star);

    assert!(!accepts(&not_a_star, ""));
    assert!(!accepts(&not_a_star, "aaa"));
    assert!(accepts(&not_a_star, "ab"));
    assert!(accepts(&not_a_star, "é"));

    let short = minus(&a_star, &compile(&Node::repeat(Node::char('a'), 2, None)));
    assert!(accepts(&short, ""));
    assert!(accepts(&short, "a"));
    assert!(!accepts(&short, "aa"));
}

#[test]
fn accepts_nondeterministic_input() {
    let g = union(&compile(&Node::string("ab")), &compile(&Node::string("ac")));

    assert!(!g.is_deterministic());
    assert!(accepts(&g, "ab"));
    assert!(accepts(&g, "ac"));
    assert!(!accepts(&g, "a"));
    assert!(accepts(&determinize(&g), "ac"));
}

#[test]
fn find_matches_needs_determinism() {
    let g = union(&compile(&Node::string("ab")), &compile(&Node::string("ac")));

    let err = find_matches(&g, "ab").unwrap_err();

    assert_eq!(err, Error::Runtime(RuntimeError::NotDeterministic));
    assert_eq!(err.to_string(), "matcher requires a deterministic automaton");
}

#[test]
fn invalid_repetition_bounds() {
    let err = from_node(&Node::repeat(Node::char('a'), 3, Some(1))).unwrap_err();

    assert_eq!(err.to_string(), "invalid repetition bounds {3,1}");
    assert!(repeat(&compile(&Node::char('a')), 2, Some(1)).is_err());
}

#[test]
fn oversized_repetition_is_an_error() {
    let err = repeat(&compile(&Node::char('a')), u32::MAX, None).unwrap_err();

    assert!(matches!(
        err,
        Error::Compile(rangemata_compiler::Error::StateLimitExceeded { .. })
    ));
}

#[test]
fn long_literal_compiles() {
    let text = "ab".repeat(10_000);

    let g = compile(&Node::string(&text));

    assert!(accepts(&g, &text));
    assert_eq!(find_matches(&g, &text).unwrap().count(), 1);
}

#[test]
fn inverted_range_is_empty() {
    let g = compile(&Node::range('z', 'a'));

    assert!(!accepts(&g, "a"));
    assert!(!accepts(&g, "z"));
    assert!(!accepts(&g, ""));
}

#[test]
fn tree_from_json() {
    let json = serde_json::json!({
        "kind": "concatenation",
        "left": { "kind": "char", "value": "a" },
        "right": { "kind": "star", "node": { "kind": "range", "start": "0", "end": "9" } },
    });
    let node = Node::from_json(&json.to_string()).unwrap();
    let g = minimize(&compile(&node));

    assert!(accepts(&g, "a42"));
    assert!(!accepts(&g, "b42"));
    assert_eq!(g.dump(), indoc! {"
        S0 (initial)
          a → S1
        S1 (accept)
          0-9 → S1
    "});
}

#[test]
fn bytes_round_trip() {
    let samples = [
        compile(&Node::string("héllo")),
        union(&compile(&Node::string("ab")), &compile(&Node::string("ac"))),
        minimize(&compile(&Node::plus(Node::range('0', '9')))),
        Automaton::interval(Interval::new(0, 0x10FFFF)),
    ];
    for g in samples {
        let back = decode(&encode(&g)).unwrap();

        assert_eq!(back, g);
        assert_eq!(back.is_minimal(), g.is_minimal());
    }
}

#[test]
fn decode_reports_module_errors() {
    let err = decode(&[1, 2, 3]).unwrap_err();

    assert_eq!(err, Error::Module(ModuleError::FileTooSmall(3)));
}
