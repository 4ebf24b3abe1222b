//! Source positions attached to tokens and AST nodes.

use std::fmt;
use std::sync::Arc;

/// A point in a source file.
///
/// ## Notes
/// - `line` is 1-based, `column` is 0-based (both as reported by the scanner).
/// - The file name is shared, so cloning a location never copies the path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: Arc<str>,
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(file: Arc<str>, offset: u32, line: u32, column: u32) -> Self {
        Self {
            file,
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_file_line_column() {
        let loc = Location::new(Arc::from("src/main.ad"), 42, 3, 7);
        assert_eq!(loc.to_string(), "src/main.ad:3:7");
    }

    #[test]
    fn clones_share_the_file_name() {
        let loc = Location::new(Arc::from("a.ad"), 0, 1, 0);
        let copy = loc.clone();
        assert!(Arc::ptr_eq(&loc.file, &copy.file));
        assert_eq!(loc, copy);
    }
}
