//! Executable lookup on a search path.
//!
//! The search path is injected rather than read from the process
//! environment, so callers (and tests) decide where tools are looked up.

use std::ffi::OsString;
use std::path::PathBuf;

/// Finds external programs by name.
pub trait ToolLocator {
    /// Returns the path of the first runnable match, or `None` when the
    /// program cannot be found. A missing tool is not an error.
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

/// Looks programs up on a `PATH`-style list of directories.
///
/// A program name containing a path separator is treated as a direct path
/// and is present iff it names an existing executable file. Otherwise each
/// directory is tried in order and the first executable match wins.
#[derive(Debug, Clone, Default)]
pub struct PathSearch {
    search_path: Option<OsString>,
    cwd: Option<PathBuf>,
}

impl PathSearch {
    /// Creates a locator over the given search path value.
    pub fn new(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
            cwd: None,
        }
    }

    /// Creates a locator over the current process `PATH`.
    pub fn from_env() -> Self {
        Self {
            search_path: std::env::var_os("PATH"),
            cwd: None,
        }
    }

    /// Sets the directory that relative direct paths resolve against.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

impl ToolLocator for PathSearch {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        let cwd = match &self.cwd {
            Some(cwd) => cwd.clone(),
            None => std::env::current_dir().ok()?,
        };
        // An unset PATH still allows direct paths; `which_in` rejects `None`.
        let search_path = self.search_path.clone().unwrap_or_default();

        match which::which_in(program, Some(search_path), cwd) {
            Ok(path) => {
                log::debug!("located {} at {}", program, path.display());
                Some(path)
            }
            Err(err) => {
                log::debug!("{} not found: {}", program, err);
                None
            }
        }
    }
}

impl<T: ToolLocator + ?Sized> ToolLocator for &T {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        (**self).locate(program)
    }
}
