//! Exclusion rules: compiled glob patterns over absolute file-system paths.
//!
//! Patterns are written relative to the working directory. `*` and `?` stay
//! within one path segment, `**` spans any number of segments. Matching runs on
//! normalized forward-slash paths, so `bin\sub` and `bin/sub` behave the same.

use crate::error::{PackError, Result};
use crate::opc::packuri::normalize_path;
use glob::{MatchOptions, Pattern};
use std::path::Path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// One compiled exclusion pattern.
#[derive(Debug, Clone)]
pub struct ExclusionRule {
    pattern: Pattern,
}

impl ExclusionRule {
    /// Compile `pattern` relative to `working_dir`.
    ///
    /// # Errors
    ///
    /// Blank or whitespace-only patterns are rejected with [`PackError::InvalidPath`];
    /// malformed globs with [`PackError::InvalidPattern`].
    pub fn compile(working_dir: &Path, pattern: &str) -> Result<Self> {
        if pattern.trim().is_empty() {
            return Err(PackError::InvalidPath(format!(
                "exclusion pattern must not be blank (got {pattern:?})"
            )));
        }

        let pattern_path = Path::new(pattern);
        let full = if pattern_path.is_absolute() || pattern.starts_with(['/', '\\']) {
            normalize_path(pattern)
        } else {
            let base = normalize_path(&absolute(working_dir));
            let mut joined = Pattern::escape(&base);
            if !joined.ends_with('/') {
                joined.push('/');
            }
            joined.push_str(pattern);
            normalize_path(&joined)
        };

        let compiled = Pattern::new(&full).map_err(|source| PackError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern: compiled })
    }

    /// Test an already normalized absolute path.
    #[inline]
    pub fn matches(&self, normalized: &str) -> bool {
        self.pattern.matches_with(normalized, MATCH_OPTIONS)
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

/// All exclusion rules of one package; a path is excluded if any rule matches.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    rules: Vec<ExclusionRule>,
}

impl ExclusionSet {
    /// Compile every pattern relative to `working_dir`.
    pub fn compile<I, S>(working_dir: &Path, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .map(|p| ExclusionRule::compile(working_dir, p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Whether `path` (file or directory) matches any rule.
    ///
    /// The path is made absolute and normalized before matching.
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.rules.is_empty() {
            return false;
        }
        let normalized = normalize_path(&absolute(path));
        self.rules.iter().any(|rule| rule.matches(&normalized))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Absolute form of `path` as a string, without touching symlinks.
fn absolute(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_pattern_rejected() {
        let wd = Path::new("/work");
        assert!(matches!(
            ExclusionRule::compile(wd, ""),
            Err(PackError::InvalidPath(_))
        ));
        assert!(matches!(
            ExclusionRule::compile(wd, "   \t"),
            Err(PackError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_malformed_pattern_rejected() {
        assert!(matches!(
            ExclusionRule::compile(Path::new("/work"), "bin/[a"),
            Err(PackError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_pattern_resolved_against_working_dir() {
        let rule = ExclusionRule::compile(Path::new("/work"), r"bin\sub").unwrap();
        assert_eq!(rule.as_str(), "/work/bin/sub");
        assert!(rule.matches("/work/bin/sub"));
        assert!(!rule.matches("/work/bin/sub/b.txt"));
        assert!(!rule.matches("/other/bin/sub"));
    }

    #[test]
    fn test_star_stays_in_segment() {
        let rule = ExclusionRule::compile(Path::new("/work"), "bin/*.pdb").unwrap();
        assert!(rule.matches("/work/bin/a.pdb"));
        assert!(!rule.matches("/work/bin/x/a.pdb"));

        let rule = ExclusionRule::compile(Path::new("/work"), "**/*.pdb").unwrap();
        assert!(rule.matches("/work/a.pdb"));
        assert!(rule.matches("/work/bin/x/a.pdb"));
    }

    #[test]
    fn test_working_dir_glob_chars_are_literal() {
        let rule = ExclusionRule::compile(Path::new("/w[1]"), "a.txt").unwrap();
        assert!(rule.matches("/w[1]/a.txt"));
        assert!(!rule.matches("/w1/a.txt"));
    }

    #[test]
    fn test_set_is_or_across_rules() {
        let set = ExclusionSet::compile(Path::new("/work"), ["*.pdb", "obj"]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.is_excluded(Path::new("/work/a.pdb")));
        assert!(set.is_excluded(Path::new("/work/obj")));
        assert!(set.is_excluded(Path::new("/work/x/../obj")));
        assert!(!set.is_excluded(Path::new("/work/a.dll")));
    }

    #[test]
    fn test_empty_set_excludes_nothing() {
        let set = ExclusionSet::compile(Path::new("/work"), Vec::<String>::new()).unwrap();
        assert!(set.is_empty());
        assert!(!set.is_excluded(Path::new("/work/anything")));
    }

    #[test]
    fn test_one_blank_pattern_fails_whole_set() {
        assert!(ExclusionSet::compile(Path::new("/work"), ["a", " "]).is_err());
    }
}
