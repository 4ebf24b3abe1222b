//! Front-end configuration for multi-file runs.

use adorad_syntax::parser::ParseOptions;

/// Front-end configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontendConfig {
    /// Worker threads for parsing files; 0 uses rayon's global pool, 1 parses sequentially
    pub jobs: usize,
    /// Error-recovery settings applied to every file
    pub parse: ParseOptions,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            jobs: 0,
            parse: ParseOptions::default(),
        }
    }
}

impl FrontendConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of parser threads
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Replace the per-file parse options
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Keep parsing a file after a grammar violation
    pub fn with_recover(mut self, recover: bool) -> Self {
        self.parse = self.parse.with_recover(recover);
        self
    }

    /// Cap the diagnostics reported per file (0 = unlimited)
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.parse = self.parse.with_max_errors(max_errors);
        self
    }

    pub(crate) fn is_sequential(&self) -> bool {
        self.jobs == 1
    }
}
