//! Extraction of function definitions from C source text.

use super::patterns::{KeywordFilter, ParenIndex};
use super::DeclarationSet;

/// Collect the names of every definition-shaped span in `text`.
///
/// A definition is an identifier, a balanced parameter list and an opening
/// brace, with any whitespace (newlines included) in between. This is a
/// heuristic: a control construct whose keyword is not in `keywords`, or a
/// matching shape inside a comment, is reported as a definition.
pub fn extract_declarations(text: &str, keywords: &KeywordFilter) -> DeclarationSet {
    let mut found = DeclarationSet::new();
    let index = ParenIndex::new(text);
    let mut pos = 0;

    while let Some(inv) = index.next_invocation(pos, text.len()) {
        if inv.followed_by(text, '{') {
            if !keywords.is_keyword(inv.name) {
                found.insert(inv.name.to_string());
            }
            pos = inv.end;
        } else {
            pos = inv.open + 1;
        }
    }

    found
}
