//! Matching primitives shared by the declaration and call extractors.
//!
//! Both extractors look for the same shape, an identifier followed by a
//! parenthesized list, and differ only in what must come after the closing
//! parenthesis (`{` for a definition, `;` for a call statement).
//!
//! Parentheses are paired once per text with a stack, so nested calls such
//! as `printf("%d", add(1, 2));` are seen whole. Parentheses inside `"..."`
//! and `'...'` literals are ignored; a literal ends at its closing quote or
//! at the end of the line. Comments are not understood.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

lazy_static! {
    /// Identifier immediately followed (modulo whitespace) by `(`.
    static ref INVOCATION_HEAD: Regex = Regex::new(r"\b(\w+)\s*\(").unwrap();
}

/// Control-flow keywords that take the same textual shape as calls and
/// definitions.
pub const DEFAULT_EXCLUDED_KEYWORDS: &[&str] = &["if", "while", "for", "switch", "else", "return"];

/// C type names and operators that precede `(` in casts, function pointer
/// types and `sizeof` expressions. Never calls.
pub const TYPE_OPERATORS: &[&str] = &[
    "void", "char", "short", "int", "long", "float", "double", "signed", "unsigned", "const",
    "volatile", "struct", "union", "enum", "sizeof", "_Alignof", "alignof",
];

pub fn is_type_operator(name: &str) -> bool {
    TYPE_OPERATORS.contains(&name)
}

/// Exact-name filter for keyword false positives.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    words: HashSet<String>,
}

impl KeywordFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_keyword(&self, name: &str) -> bool {
        self.words.contains(name)
    }
}

impl Default for KeywordFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_KEYWORDS.iter().copied())
    }
}

/// An `identifier(...)` span with balanced parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub name: &'a str,
    /// Text between the outer parentheses.
    pub args: &'a str,
    /// Byte offset of the opening parenthesis.
    pub open: usize,
    /// Byte offset just past the closing parenthesis.
    pub end: usize,
}

impl Invocation<'_> {
    /// Whether the first non-whitespace character after the closing
    /// parenthesis in `text` is `terminator`.
    pub fn followed_by(&self, text: &str, terminator: char) -> bool {
        text[self.end..].trim_start().starts_with(terminator)
    }
}

/// A text with every code parenthesis paired to its partner.
#[derive(Debug)]
pub struct ParenIndex<'a> {
    text: &'a str,
    /// Offset of each matched `(` to the offset of its `)`.
    closes: HashMap<usize, usize>,
}

impl<'a> ParenIndex<'a> {
    /// Pair parentheses in one pass. Unmatched ones are left out.
    pub fn new(text: &'a str) -> Self {
        let bytes = text.as_bytes();
        let mut closes = HashMap::new();
        let mut stack = Vec::new();
        let mut quote: Option<u8> = None;
        let mut i = 0;

        while i < bytes.len() {
            let byte = bytes[i];
            match quote {
                Some(q) => match byte {
                    b'\\' => i += 1,
                    b'\n' => quote = None,
                    _ if byte == q => quote = None,
                    _ => {}
                },
                None => match byte {
                    b'"' | b'\'' => quote = Some(byte),
                    b'(' => stack.push(i),
                    b')' => {
                        if let Some(open) = stack.pop() {
                            closes.insert(open, i);
                        }
                    }
                    _ => {}
                },
            }
            i += 1;
        }

        Self { text, closes }
    }

    /// Find the first invocation whose head starts at or after `from` and
    /// whose parentheses close before `limit`.
    ///
    /// Heads whose `(` is unmatched or sits inside a literal are skipped.
    pub fn next_invocation(&self, from: usize, limit: usize) -> Option<Invocation<'a>> {
        let text = self.text;
        let window = &text[..limit];
        let mut pos = from;

        while pos <= window.len() {
            let caps = INVOCATION_HEAD.captures_at(window, pos)?;
            let (Some(head), Some(name)) = (caps.get(0), caps.get(1)) else {
                return None;
            };
            let open = head.end() - 1;
            match self.closes.get(&open) {
                Some(&close) if close < limit => {
                    return Some(Invocation {
                        name: name.as_str(),
                        args: &text[open + 1..close],
                        open,
                        end: close + 1,
                    })
                }
                _ => pos = head.end(),
            }
        }
        None
    }

    /// Invocations nested directly in `outer`'s argument list, in order.
    pub fn nested(&self, outer: &Invocation<'_>) -> Nested<'_, 'a> {
        Nested {
            index: self,
            pos: outer.open + 1,
            limit: outer.end - 1,
        }
    }
}

/// Iterator over the invocations directly inside one argument list.
pub struct Nested<'i, 'a> {
    index: &'i ParenIndex<'a>,
    pos: usize,
    limit: usize,
}

impl<'a> Iterator for Nested<'_, 'a> {
    type Item = Invocation<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let inv = self.index.next_invocation(self.pos, self.limit)?;
        self.pos = inv.end;
        Some(inv)
    }
}
