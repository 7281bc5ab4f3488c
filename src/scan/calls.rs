//! Extraction of call sites from C source text.
//!
//! Lines are scanned independently. A call statement is an identifier, a
//! balanced argument list and a `;`. Every call nested in the argument list
//! of a statement is recorded at the same line. An argument list that is not
//! closed on its own line is not captured at all.
//!
//! Casts and `sizeof` share the call shape (`(void (*)(int))f`,
//! `sizeof(int)`); type names and those operators are never recorded.

use super::patterns::{is_type_operator, Invocation, KeywordFilter, ParenIndex};
use super::{CallLocation, CallRecord, SourceFile};

/// Collect every call site in `text`, attributed to `file`.
pub fn extract_calls(file: &SourceFile, text: &str, keywords: &KeywordFilter) -> CallRecord {
    let mut record = CallRecord::new();
    let file_str = file.to_string();

    for (line_num, line) in text.lines().enumerate() {
        let location = CallLocation::new(file_str.as_str(), line_num + 1);
        let index = ParenIndex::new(line);
        let mut pos = 0;

        while let Some(inv) = index.next_invocation(pos, line.len()) {
            if !inv.followed_by(line, ';') {
                pos = inv.open + 1;
                continue;
            }
            record_call(&index, &inv, &location, keywords, &mut record);
            pos = inv.end;
        }
    }

    record
}

/// Record `inv` and every call inside its arguments, depth first.
fn record_call(
    index: &ParenIndex<'_>,
    inv: &Invocation<'_>,
    location: &CallLocation,
    keywords: &KeywordFilter,
    record: &mut CallRecord,
) {
    if !keywords.is_keyword(inv.name) && !is_type_operator(inv.name) {
        record.push(inv.name, location.clone());
    }
    for nested in index.nested(inv) {
        record_call(index, &nested, location, keywords, record);
    }
}
