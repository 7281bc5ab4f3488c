//! Whole-tree reduction and internal/external classification.

use super::calls::extract_calls;
use super::declarations::extract_declarations;
use super::patterns::KeywordFilter;
use super::{CallRecord, ClassifiedReport, DeclarationSet, SourceFile};

/// Everything extracted from a single file.
#[derive(Debug, Clone)]
pub struct FileScan {
    pub file: SourceFile,
    pub declarations: DeclarationSet,
    pub calls: CallRecord,
}

impl FileScan {
    /// Run both extractors over one file's text.
    pub fn from_source(file: SourceFile, text: &str, keywords: &KeywordFilter) -> Self {
        let declarations = extract_declarations(text, keywords);
        let calls = extract_calls(&file, text, keywords);
        Self {
            file,
            declarations,
            calls,
        }
    }
}

/// Declarations and calls of the whole tree.
#[derive(Debug, Clone, Default)]
pub struct TreeModel {
    pub declarations: DeclarationSet,
    pub calls: CallRecord,
    pub files_scanned: usize,
}

impl TreeModel {
    /// Fold per-file scans, in discovery order, into one model.
    pub fn fold<I>(scans: I) -> Self
    where
        I: IntoIterator<Item = FileScan>,
    {
        scans.into_iter().fold(Self::default(), Self::absorb)
    }

    fn absorb(mut self, scan: FileScan) -> Self {
        self.declarations.extend(scan.declarations);
        self.calls.merge(scan.calls);
        self.files_scanned += 1;
        self
    }
}

/// Partition every called name by membership in the declaration set.
///
/// Resolution is by name only: a call resolves to any definition anywhere
/// in the tree, regardless of file, scope or `static`.
pub fn classify(model: TreeModel) -> ClassifiedReport {
    let TreeModel {
        declarations,
        calls,
        files_scanned,
    } = model;

    let (internal, external): (Vec<_>, Vec<_>) = calls
        .into_entries()
        .into_iter()
        .partition(|entry| declarations.contains(&entry.name));

    ClassifiedReport {
        internal,
        external,
        files_scanned,
        declarations: declarations.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(path: &str, text: &str) -> FileScan {
        FileScan::from_source(SourceFile::new(path), text, &KeywordFilter::default())
    }

    #[test]
    fn test_single_file_scenario() {
        let src = "\
int add(int a, int b) {
    return a + b;
}

int main(void) {
    add(1, 2);
    printf(\"%d\", add(1,2));
}
";
        let model = TreeModel::fold([scan("a.c", src)]);
        assert!(model.declarations.contains("add"));
        assert_eq!(model.calls.get("add").map(|l| l.len()), Some(2));
        assert_eq!(model.calls.get("printf").map(|l| l.len()), Some(1));

        let report = classify(model);
        assert_eq!(report.internal_count(), 2);
        assert_eq!(report.external_count(), 1);
        assert_eq!(report.total(), 3);
        assert!(report.internal_call("add").is_some());
        assert!(report.external_call("printf").is_some());
    }

    #[test]
    fn test_cross_file_resolution() {
        let caller = scan("main.c", "int main(void)\n{\n    helper(3);\n}\n");
        let callee = scan("helper.c", "void helper(int n)\n{\n    write(1, \"x\", n);\n}\n");

        let report = classify(TreeModel::fold([caller, callee]));
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.declarations, 2);
        assert!(report.internal_call("helper").is_some());
        assert!(report.external_call("write").is_some());
    }

    #[test]
    fn test_locations_follow_file_order() {
        let first = scan("a.c", "free(p);\n");
        let second = scan("b.c", "\n\nfree(q);\n");
        let report = classify(TreeModel::fold([first, second]));

        let free = report.external_call("free").unwrap();
        let files: Vec<_> = free.locations.iter().map(|l| l.file.as_str()).collect();
        assert_eq!(files, vec!["a.c", "b.c"]);
        assert_eq!(free.locations[1].line, 3);
    }

    #[test]
    fn test_partition_is_complete_and_disjoint() {
        let scans = vec![
            scan("a.c", "int f(void) {\n    g();\n    h(f());\n}\n"),
            scan("b.c", "int g(void) {\n    f();\n    puts(\"x\");\n    h(1);\n}\n"),
        ];
        let model = TreeModel::fold(scans);
        let declarations = model.declarations.clone();
        let merged_names: Vec<String> = model.calls.names().map(String::from).collect();
        let merged_count = model.calls.location_count();

        let report = classify(model);

        for entry in &report.internal {
            assert!(declarations.contains(&entry.name));
            assert!(report.external_call(&entry.name).is_none());
        }
        for entry in &report.external {
            assert!(!declarations.contains(&entry.name));
        }

        let mut reported: Vec<String> = report
            .internal
            .iter()
            .chain(report.external.iter())
            .map(|e| e.name.clone())
            .collect();
        let mut expected = merged_names;
        reported.sort();
        expected.sort();
        assert_eq!(reported, expected);
        assert_eq!(report.total(), merged_count);
    }

    #[test]
    fn test_declared_but_uncalled_is_absent() {
        let report = classify(TreeModel::fold([scan("a.c", "static void unused(void) {\n}\n")]));
        assert_eq!(report.declarations, 1);
        assert!(report.internal.is_empty());
        assert!(report.external.is_empty());
    }

    #[test]
    fn test_empty_tree() {
        let report = classify(TreeModel::fold(Vec::new()));
        assert_eq!(report.files_scanned, 0);
        assert_eq!(report.total(), 0);
    }
}
