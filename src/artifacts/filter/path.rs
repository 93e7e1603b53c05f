use crate::artifacts::filter::{CommitFilter, FilterError, IncludeDecision};
use crate::artifacts::objects::commit::Commit;
use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Component, Path, PathBuf};

/// Includes commits that touch at least one of a set of paths
///
/// A filter path matches a changed file when it names that file or one of
/// its parent directories. Commits carrying no changed-path data are
/// excluded.
#[derive(Debug, Clone)]
pub struct PathFilter {
    path_trie: Trie<String>,
    paths: Vec<PathBuf>,
    stop: bool,
}

impl PathFilter {
    pub fn new(paths: Vec<PathBuf>) -> Result<Self, FilterError> {
        let mut trie = Trie::new();
        for path in &paths {
            let components = Self::components(path);
            if components.is_empty() {
                return Err(FilterError::InvalidConfiguration(format!(
                    "path filter entry {} names no file or directory",
                    path.display()
                )));
            }
            trie.insert(&components);
        }

        if paths.is_empty() {
            return Err(FilterError::InvalidConfiguration(
                "path filter needs at least one path".to_string(),
            ));
        }

        Ok(Self {
            path_trie: trie,
            paths,
            stop: false,
        })
    }

    pub fn with_stop(mut self, stop: bool) -> Self {
        self.stop = stop;
        self
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Whether a slash-separated repository path is selected by this filter
    pub fn matches_path(&self, path: &str) -> bool {
        let components = path
            .split('/')
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();

        self.path_trie.contains_prefix_of(&components)
    }

    fn components(path: &Path) -> Vec<String> {
        path.components()
            .filter_map(|comp| match comp {
                Component::Normal(part) => Some(part.to_string_lossy().to_string()),
                _ => None,
            })
            .collect()
    }
}

impl CommitFilter for PathFilter {
    fn evaluate(&mut self, commit: &Commit) -> IncludeDecision {
        let touched = commit
            .changed_paths()
            .is_some_and(|paths| paths.iter().any(|path| self.matches_path(path)));

        IncludeDecision::from_match(touched, self.stop)
    }

    fn reset(&mut self) {}
}

/// Path components of the filter, matched component by component
#[derive(Debug, Clone, PartialEq, Eq)]
struct Trie<T: Hash + Eq + Clone> {
    is_matching: bool,
    children: HashMap<T, Trie<T>>,
}

impl<T: Hash + Eq + Clone> Trie<T> {
    fn new() -> Self {
        Trie {
            is_matching: false,
            children: HashMap::new(),
        }
    }

    fn insert(&mut self, path: &[T]) {
        let mut node = self;
        for part in path {
            node = node.children.entry(part.clone()).or_insert_with(Trie::new);
        }
        node.is_matching = true;
    }

    /// Whether some inserted path equals `path` or is a prefix of it
    fn contains_prefix_of(&self, path: &[T]) -> bool {
        let mut node = self;
        for part in path {
            if node.is_matching {
                return true;
            }
            match node.children.get(part) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.is_matching
    }
}
