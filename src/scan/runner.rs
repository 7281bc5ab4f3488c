//! Scan runner that drives discovery, extraction and classification.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::Config;

use super::classify::{classify, FileScan, TreeModel};
use super::files::TreeScanner;
use super::patterns::KeywordFilter;
use super::{ClassifiedReport, ScanError, SourceFile};

/// Executes a full scan of one tree.
pub struct Runner {
    root: PathBuf,
    scanner: TreeScanner,
    keywords: KeywordFilter,
}

impl Runner {
    /// Create a runner with the default configuration.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self::with_config(root, &Config::default())
    }

    pub fn with_config<P: AsRef<Path>>(root: P, config: &Config) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            scanner: config.tree_scanner(),
            keywords: config.keyword_filter(),
        }
    }

    /// Scan the tree and classify every call found in it.
    pub fn run(&self) -> Result<ClassifiedReport, ScanError> {
        let model = self.build_model()?;

        if model.files_scanned == 0 {
            warn!("no source files found under {}", self.root.display());
        }
        info!(
            files = model.files_scanned,
            declarations = model.declarations.len(),
            calls = model.calls.location_count(),
            "scan complete"
        );

        Ok(classify(model))
    }

    /// Read and extract every file, then fold the results.
    ///
    /// Stops at the first file that cannot be discovered or read.
    pub fn build_model(&self) -> Result<TreeModel, ScanError> {
        let scans = self
            .scanner
            .walk(&self.root)
            .map(|file| self.scan_file(file?))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TreeModel::fold(scans))
    }

    fn scan_file(&self, file: SourceFile) -> Result<FileScan, ScanError> {
        let bytes = std::fs::read(file.path()).map_err(|source| ScanError::Read {
            path: file.path().to_path_buf(),
            source,
        })?;
        // C sources are not always UTF-8; a stray Latin-1 comment should not
        // abort the scan.
        let text = String::from_utf8_lossy(&bytes);

        let scan = FileScan::from_source(file, &text, &self.keywords);
        debug!(
            file = %scan.file,
            declarations = scan.declarations.len(),
            calls = scan.calls.location_count(),
            "scanned file"
        );
        Ok(scan)
    }
}
