//! Deny-list management module
//!
//! Holds the set of common passwords rejected by [`NotCommon`](crate::NotCommon).
//! A small built-in list is always available; a replacement list can be
//! loaded from a file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use thiserror::Error;

/// Environment variable naming a replacement deny-list file.
pub const DENYLIST_PATH_ENV: &str = "PWD_DENYLIST_PATH";

const BUILTIN_ENTRIES: &[&str] = &["password", "123456", "qwerty", "letmein", "admin", "welcome"];

static BUILTIN: LazyLock<Arc<DenyList>> =
    LazyLock::new(|| Arc::new(DenyList::from_entries(BUILTIN_ENTRIES.iter().copied())));

#[derive(Error, Debug)]
pub enum DenyListError {
    #[error("Deny-list file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read deny-list file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Deny-list file is empty")]
    EmptyFile,
}

/// A case-insensitive set of disallowed passwords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenyList {
    entries: HashSet<String>,
}

impl DenyList {
    /// Returns the shared built-in list.
    pub fn builtin() -> Arc<DenyList> {
        Arc::clone(&*BUILTIN)
    }

    /// Builds a list from arbitrary entries. Entries are lowercased; blank
    /// entries are dropped.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { entries }
    }

    /// Loads a list from a file with one password per line.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File does not exist
    /// - File cannot be read
    /// - File has no non-blank line
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DenyListError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Deny-list load FAILED: file not found {}", path.display());
            return Err(DenyListError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let list = Self::from_entries(content.lines());

        if list.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!("Deny-list load FAILED: empty file {}", path.display());
            return Err(DenyListError::EmptyFile);
        }

        #[cfg(feature = "tracing")]
        tracing::info!("Deny-list loaded: {} passwords from {:?}", list.len(), path);

        Ok(list)
    }

    /// Returns `true` if the whole password matches an entry, ignoring case.
    pub fn contains(&self, password: &str) -> bool {
        self.entries.contains(&password.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Returns the deny-list path from `PWD_DENYLIST_PATH`, if set and non-empty.
pub fn denylist_path_from_env() -> Option<PathBuf> {
    std::env::var_os(DENYLIST_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to safely set env var in tests
    fn set_env(key: &str, value: &str) {
        // SAFETY: tests touching the environment are marked #[serial]
        unsafe {
            std::env::set_var(key, value);
        }
    }

    /// Helper to safely remove env var in tests
    fn remove_env(key: &str) {
        // SAFETY: tests touching the environment are marked #[serial]
        unsafe {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_builtin_contains_common_passwords() {
        let list = DenyList::builtin();
        assert_eq!(list.len(), 6);
        for pwd in ["password", "123456", "qwerty", "letmein", "admin", "welcome"] {
            assert!(list.contains(pwd), "{pwd} should be denied");
        }
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(Arc::ptr_eq(&DenyList::builtin(), &DenyList::builtin()));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let list = DenyList::builtin();
        assert!(list.contains("PASSWORD"));
        assert!(list.contains("LetMeIn"));
    }

    #[test]
    fn test_contains_is_exact_match() {
        let list = DenyList::builtin();
        assert!(!list.contains("password1"));
        assert!(!list.contains("mypassword"));
        assert!(!list.contains(" password"));
        assert!(!list.contains(""));
    }

    #[test]
    fn test_from_entries_normalizes() {
        let list = DenyList::from_entries(["  Hunter2 ", "", "   ", "HUNTER2"]);
        assert_eq!(list.len(), 1);
        assert!(list.contains("hunter2"));
    }

    #[test]
    fn test_from_path_file_not_found() {
        let result = DenyList::from_path("/nonexistent/path/denylist.txt");
        assert!(matches!(result, Err(DenyListError::FileNotFound(_))));
    }

    #[test]
    fn test_from_path_empty_file() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(temp_file, "\n   \n").expect("Failed to write");

        let result = DenyList::from_path(temp_file.path());
        assert!(matches!(result, Err(DenyListError::EmptyFile)));
    }

    #[test]
    fn test_from_path_success() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(temp_file, "password123").expect("Failed to write");
        writeln!(temp_file, "Qwerty").expect("Failed to write");

        let list = DenyList::from_path(temp_file.path()).expect("list should load");
        assert_eq!(list.len(), 2);
        assert!(list.contains("PASSWORD123"));
        assert!(list.contains("qwerty"));
        assert!(!list.contains("admin"));
    }

    #[test]
    #[serial]
    fn test_path_from_env_unset() {
        remove_env(DENYLIST_PATH_ENV);
        assert_eq!(denylist_path_from_env(), None);
    }

    #[test]
    #[serial]
    fn test_path_from_env_set() {
        set_env(DENYLIST_PATH_ENV, "/custom/path/denylist.txt");
        assert_eq!(
            denylist_path_from_env(),
            Some(PathBuf::from("/custom/path/denylist.txt"))
        );
        remove_env(DENYLIST_PATH_ENV);
    }

    #[test]
    #[serial]
    fn test_path_from_env_empty_is_ignored() {
        set_env(DENYLIST_PATH_ENV, "");
        assert_eq!(denylist_path_from_env(), None);
        remove_env(DENYLIST_PATH_ENV);
    }
}
