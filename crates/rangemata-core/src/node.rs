//! Regular-expression syntax trees.
//!
//! Trees are produced by an external parser and handed over either as values
//! or as JSON (`{"kind": "char", "value": "a"}`). They are immutable once
//! built; construction only reads them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A node of a regular-expression syntax tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// A single character.
    Char { value: char },
    /// Any character in `[start, end]`. Empty when `start > end`.
    Range { start: char, end: char },
    Alternation { left: Box<Node>, right: Box<Node> },
    Concatenation { left: Box<Node>, right: Box<Node> },
    /// Zero or more repetitions.
    Star { node: Box<Node> },
    /// One or more repetitions.
    Plus { node: Box<Node> },
    /// Between `min` and `max` repetitions; `max: None` is unbounded.
    Repeat {
        node: Box<Node>,
        min: u32,
        max: Option<u32>,
    },
    Intersection { left: Box<Node>, right: Box<Node> },
    Complement { node: Box<Node> },
    AnyChar,
    /// The empty language.
    Empty,
    /// The language containing only the empty string.
    EmptyString,
}

impl Node {
    pub fn char(value: char) -> Self {
        Node::Char { value }
    }

    pub fn range(start: char, end: char) -> Self {
        Node::Range { start, end }
    }

    pub fn alternation(left: Node, right: Node) -> Self {
        Node::Alternation {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn concatenation(left: Node, right: Node) -> Self {
        Node::Concatenation {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn star(node: Node) -> Self {
        Node::Star {
            node: Box::new(node),
        }
    }

    pub fn plus(node: Node) -> Self {
        Node::Plus {
            node: Box::new(node),
        }
    }

    pub fn repeat(node: Node, min: u32, max: Option<u32>) -> Self {
        Node::Repeat {
            node: Box::new(node),
            min,
            max,
        }
    }

    pub fn intersection(left: Node, right: Node) -> Self {
        Node::Intersection {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn complement(node: Node) -> Self {
        Node::Complement {
            node: Box::new(node),
        }
    }

    /// Concatenation of the characters of `s`, or `EmptyString` for `""`.
    ///
    /// Characters are paired level by level, so the tree is balanced and its
    /// depth grows with the logarithm of the length.
    pub fn string(s: &str) -> Self {
        let mut level: Vec<Node> = s.chars().map(Node::char).collect();
        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            let mut items = level.into_iter();
            while let Some(left) = items.next() {
                next.push(match items.next() {
                    Some(right) => Node::concatenation(left, right),
                    None => left,
                });
            }
            level = next;
        }
        level.pop().unwrap_or(Node::EmptyString)
    }

    /// Direct children, left to right.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        let (first, second): (Option<&Node>, Option<&Node>) = match self {
            Node::Alternation { left, right }
            | Node::Concatenation { left, right }
            | Node::Intersection { left, right } => (Some(&**left), Some(&**right)),
            Node::Star { node }
            | Node::Plus { node }
            | Node::Repeat { node, .. }
            | Node::Complement { node } => (Some(&**node), None),
            Node::Char { .. }
            | Node::Range { .. }
            | Node::AnyChar
            | Node::Empty
            | Node::EmptyString => (None, None),
        };
        first.into_iter().chain(second)
    }

    /// Number of nodes on the longest path from this node to a leaf.
    ///
    /// Walks an explicit stack, so arbitrarily deep trees are measured safely.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children().map(|child| (child, depth + 1)));
        }
        deepest
    }

    /// Parse a tree from its JSON form.
    pub fn from_json(json: &str) -> Result<Node, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("syntax trees always serialize")
    }

    /// The one string this node denotes, if its language is a single string.
    ///
    /// Conservative: `None` does not prove the language has other members.
    pub fn singleton(&self) -> Option<String> {
        match self {
            Node::Char { value } => Some(value.to_string()),
            Node::Range { start, end } if start == end => Some(start.to_string()),
            Node::EmptyString => Some(String::new()),
            Node::Concatenation { left, right } => {
                let mut s = left.singleton()?;
                s.push_str(&right.singleton()?);
                Some(s)
            }
            Node::Alternation { left, right } => {
                let s = left.singleton()?;
                (right.singleton()? == s).then_some(s)
            }
            Node::Repeat {
                node,
                min,
                max: Some(max),
            } if min == max => Some(node.singleton()?.repeat(*min as usize)),
            _ => None,
        }
    }
}

const META: &[char] = &[
    '|', '&', '~', '*', '+', '?', '{', '}', '(', ')', '[', ']', '.', '\\', '#', '-', '"',
];

fn write_char(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    if META.contains(&c) {
        write!(f, "\\{c}")
    } else if c.is_ascii_graphic() || c == ' ' {
        write!(f, "{c}")
    } else {
        write!(f, "\\u{{{:x}}}", c as u32)
    }
}

/// Compact notation: `#` is the empty language, `()` the empty string,
/// `~` complement and `&` intersection.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Char { value } => write_char(f, *value),
            Node::Range { start, end } => {
                f.write_str("[")?;
                write_char(f, *start)?;
                f.write_str("-")?;
                write_char(f, *end)?;
                f.write_str("]")
            }
            Node::Alternation { left, right } => write!(f, "({left}|{right})"),
            Node::Concatenation { left, right } => write!(f, "{left}{right}"),
            Node::Star { node } => write!(f, "({node})*"),
            Node::Plus { node } => write!(f, "({node})+"),
            Node::Repeat { node, min, max } => match max {
                Some(max) => write!(f, "({node}){{{min},{max}}}"),
                None => write!(f, "({node}){{{min},}}"),
            },
            Node::Intersection { left, right } => write!(f, "({left}&{right})"),
            Node::Complement { node } => write!(f, "~({node})"),
            Node::AnyChar => f.write_str("."),
            Node::Empty => f.write_str("#"),
            Node::EmptyString => f.write_str("()"),
        }
    }
}
