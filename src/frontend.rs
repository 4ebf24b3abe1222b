//! Multi-file front end: parse many token streams, one parser per file, in parallel.
//!
//! ## Notes
//! - Each worker owns its file's parser and diagnostics; nothing is shared between files.
//! - Results come back in input order, and within a file diagnostics stay in source order.
//! - A file that fails to parse never affects the others.

use std::path::{Path, PathBuf};

use adorad_syntax::ast::AstFile;
use adorad_syntax::diagnostics::ParseError;
use adorad_syntax::parser;
use adorad_syntax::token::{self, Token};
use miette::Diagnostic;
use rayon::prelude::*;
use thiserror::Error;

use crate::config::FrontendConfig;

/// One file's token stream, ready to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub tokens: Vec<Token>,
}

impl SourceUnit {
    pub fn new(path: impl Into<PathBuf>, tokens: Vec<Token>) -> Self {
        Self {
            path: path.into(),
            tokens,
        }
    }

    /// Build a unit from whitespace-separated words (see [`token::from_words`]), naming tokens after the path.
    pub fn from_words(path: impl Into<PathBuf>, source: &str) -> Self {
        let path = path.into();
        let tokens = token::from_words(&path.display().to_string(), source);
        Self { path, tokens }
    }
}

/// Every diagnostic reported for one file, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiagnostics {
    pub path: PathBuf,
    pub errors: Vec<ParseError>,
}

impl FileDiagnostics {
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Failure to set up a front-end run.
#[derive(Debug, Error, Diagnostic)]
pub enum FrontendError {
    #[error("failed to start a parser thread pool with {jobs} threads")]
    #[diagnostic(code(adorad::frontend::thread_pool), help("try a smaller `jobs` value, or 0 for the default"))]
    ThreadPool {
        jobs: usize,
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}

/// Per-file outcomes of a multi-file parse, in input order.
#[derive(Debug)]
pub struct ParseReport {
    pub results: Vec<Result<AstFile, FileDiagnostics>>,
}

impl ParseReport {
    /// Files that parsed cleanly.
    pub fn files(&self) -> impl Iterator<Item = &AstFile> {
        self.results.iter().filter_map(|r| r.as_ref().ok())
    }

    /// Diagnostics of files that failed.
    pub fn diagnostics(&self) -> impl Iterator<Item = &FileDiagnostics> {
        self.results.iter().filter_map(|r| r.as_ref().err())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics().map(FileDiagnostics::len).sum()
    }

    pub fn is_success(&self) -> bool {
        self.results.iter().all(Result::is_ok)
    }
}

/// Parses batches of files with a shared configuration.
#[derive(Debug)]
pub struct Frontend {
    config: FrontendConfig,
    pool: Option<rayon::ThreadPool>,
}

impl Frontend {
    /// Create a front end, building a dedicated thread pool when `config.jobs > 1`.
    ///
    /// ## Errors
    /// [`FrontendError::ThreadPool`] if the pool cannot be started.
    pub fn new(config: FrontendConfig) -> Result<Self, FrontendError> {
        let pool = if config.jobs > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.jobs)
                .thread_name(|i| format!("adorad-parse-{i}"))
                .build()
                .map_err(|source| FrontendError::ThreadPool {
                    jobs: config.jobs,
                    source,
                })?;
            Some(pool)
        } else {
            None
        };
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    /// Parse a single file.
    pub fn parse_unit(&self, unit: &SourceUnit) -> Result<AstFile, FileDiagnostics> {
        parse_tokens(&unit.path, &unit.tokens, &self.config)
    }

    /// Parse every unit, concurrently unless configured for one job.
    pub fn parse_files(&self, units: &[SourceUnit]) -> ParseReport {
        let _span = tracing::info_span!("parse_files", files = units.len(), jobs = self.config.jobs).entered();

        let parse_all = || -> Vec<Result<AstFile, FileDiagnostics>> {
            units.par_iter().map(|unit| self.parse_unit(unit)).collect()
        };
        let results = if units.len() <= 1 || self.config.is_sequential() {
            units.iter().map(|unit| self.parse_unit(unit)).collect()
        } else {
            match &self.pool {
                Some(pool) => pool.install(parse_all),
                None => parse_all(),
            }
        };

        let report = ParseReport { results };
        tracing::info!(
            parsed = report.files().count(),
            failed = report.diagnostics().count(),
            errors = report.error_count(),
            "parse finished"
        );
        report
    }
}

fn parse_tokens(path: &Path, tokens: &[Token], config: &FrontendConfig) -> Result<AstFile, FileDiagnostics> {
    parser::parse_file(path, tokens, config.parse).map_err(|errors| {
        tracing::debug!(path = %path.display(), errors = errors.len(), "file has parse errors");
        FileDiagnostics {
            path: path.to_path_buf(),
            errors,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units() -> Vec<SourceUnit> {
        vec![
            SourceUnit::from_words("a.ad", "module a ; x = 1 ;"),
            SourceUnit::from_words("b.ad", "y = ) ;"),
            SourceUnit::from_words("test_c.ad", "func test_c ( ) { }"),
        ]
    }

    #[test]
    fn test_results_keep_input_order() {
        let frontend = Frontend::new(FrontendConfig::new().with_jobs(2)).unwrap();
        let report = frontend.parse_files(&units());
        assert_eq!(report.results.len(), 3);
        assert_eq!(report.results[0].as_ref().unwrap().module, "a");
        assert_eq!(report.results[1].as_ref().unwrap_err().path, PathBuf::from("b.ad"));
        assert!(report.results[2].as_ref().unwrap().is_test);
    }

    #[test]
    fn test_failed_file_does_not_affect_others() {
        let frontend = Frontend::new(FrontendConfig::default()).unwrap();
        let report = frontend.parse_files(&units());
        assert!(!report.is_success());
        assert_eq!(report.files().count(), 2);
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let sequential = Frontend::new(FrontendConfig::new().with_jobs(1)).unwrap();
        let parallel = Frontend::new(FrontendConfig::new().with_jobs(3)).unwrap();
        let units = units();
        let a = sequential.parse_files(&units);
        let b = parallel.parse_files(&units);
        assert_eq!(a.results, b.results);
    }

    #[test]
    fn test_unterminated_stream_is_a_file_diagnostic() {
        let mut unit = SourceUnit::from_words("d.ad", "x = 1 ;");
        unit.tokens.pop();
        let frontend = Frontend::new(FrontendConfig::default()).unwrap();
        let diagnostics = frontend.parse_unit(&unit).unwrap_err();
        assert_eq!(diagnostics.errors, [ParseError::MissingEndOfInput]);
    }

    #[test]
    fn test_empty_batch() {
        let frontend = Frontend::new(FrontendConfig::default()).unwrap();
        let report = frontend.parse_files(&[]);
        assert!(report.results.is_empty());
        assert!(report.is_success());
    }
}
