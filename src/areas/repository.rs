use crate::areas::database::Database;
use crate::areas::refs::{HEAD_REF_NAME, Refs};
use crate::artifacts::graph::{CommitGraph, GraphError};
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Abbreviated ids shorter than this are never resolved
const MIN_ABBREV_LENGTH: usize = 4;

/// Namespaces tried, in order, for a short ref name
const REF_NAMESPACES: [&str; 3] = ["refs/heads/", "refs/tags/", "refs/remotes/"];

/// An existing repository, read through its loose objects and refs
///
/// Immutable after opening, so one handle can serve parallel walks.
#[derive(Debug)]
pub struct Repository {
    git_path: Box<Path>,
    database: Database,
    refs: Refs,
    changed_paths: bool,
}

impl Repository {
    /// Open the repository whose work tree contains `start`
    pub fn discover(start: &Path) -> anyhow::Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("cannot access {}", start.display()))?;

        let git_path = start
            .ancestors()
            .map(|dir| dir.join(".git"))
            .find(|candidate| candidate.is_dir())
            .with_context(|| {
                format!(
                    "not a git repository (or any of the parent directories): {}",
                    start.display()
                )
            })?;

        Self::open(&git_path)
    }

    /// Open a git directory (`.git` or a bare repository)
    pub fn open(git_path: &Path) -> anyhow::Result<Self> {
        let git_path = git_path
            .canonicalize()
            .with_context(|| format!("cannot access {}", git_path.display()))?;

        if !git_path.join("objects").is_dir() || !git_path.join(HEAD_REF_NAME).is_file() {
            anyhow::bail!("not a git directory: {}", git_path.display());
        }
        debug!(path = %git_path.display(), "opened repository");

        Ok(Repository {
            database: Database::new(git_path.join("objects").into_boxed_path()),
            refs: Refs::new(git_path.clone().into_boxed_path()),
            git_path: git_path.into_boxed_path(),
            changed_paths: false,
        })
    }

    /// Attach changed paths to every loaded commit (needed by path filters)
    pub fn with_changed_paths(mut self, enabled: bool) -> Self {
        self.changed_paths = enabled;
        self
    }

    pub fn git_path(&self) -> &Path {
        &self.git_path
    }

    pub(crate) fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Resolve a revision to a commit id
    ///
    /// Accepts `HEAD`, full ids, abbreviated ids, full ref names and short
    /// names under `refs/heads/`, `refs/tags/` and `refs/remotes/`. Tags are
    /// peeled to the commit they point at.
    pub fn resolve_revision(&self, revision: &str) -> anyhow::Result<ObjectId> {
        let oid = self.resolve_object(revision)?;

        match self.database.peel(&oid) {
            Ok(peeled) => {
                self.validate_oid_is_commit(&peeled)?;
                Ok(peeled)
            }
            // a missing full id is reported by the walk itself
            Err(GraphError::NotFound(_)) => Ok(oid),
            Err(err) => Err(err.into()),
        }
    }

    fn resolve_object(&self, revision: &str) -> anyhow::Result<ObjectId> {
        if revision == HEAD_REF_NAME {
            return self
                .refs
                .read_head()?
                .context("HEAD does not point to a commit yet");
        }

        if revision.len() == OBJECT_ID_LENGTH && Self::is_hex(revision) {
            return ObjectId::try_parse(revision.to_string());
        }

        let full_names = std::iter::once(revision.to_string()).chain(
            REF_NAMESPACES
                .iter()
                .map(|namespace| format!("{namespace}{revision}")),
        );
        for name in full_names {
            if let Some(oid) = self.refs.read_ref(&name)? {
                return Ok(oid);
            }
        }

        if revision.len() >= MIN_ABBREV_LENGTH && Self::is_hex(revision) {
            return self.resolve_abbreviated_oid(revision);
        }

        anyhow::bail!("ambiguous argument '{revision}': unknown revision")
    }

    fn resolve_abbreviated_oid(&self, oid_str: &str) -> anyhow::Result<ObjectId> {
        let matches = self.database.find_objects_by_prefix(oid_str)?;

        // only commits and tags are valid candidates
        let candidates = matches
            .into_iter()
            .filter(|oid| {
                self.database
                    .get_object_type(oid)
                    .is_ok_and(|object_type| {
                        matches!(object_type, ObjectType::Commit | ObjectType::Tag)
                    })
            })
            .collect::<Vec<_>>();

        match candidates.as_slice() {
            [] => anyhow::bail!("ambiguous argument '{oid_str}': unknown revision"),
            [oid] => Ok(oid.clone()),
            _ => {
                let mut error_msg = format!(
                    "short SHA1 {} is ambiguous\nhint: The candidates are:",
                    oid_str
                );
                for oid in &candidates {
                    error_msg.push_str(&format!("\nhint:   {}", oid.to_short_oid()));
                }
                anyhow::bail!(error_msg)
            }
        }
    }

    fn validate_oid_is_commit(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let obj_type = self
            .database
            .get_object_type(oid)
            .with_context(|| format!("object {} not found", oid))?;

        if obj_type != ObjectType::Commit {
            anyhow::bail!(
                "object {} is a {}, not a commit",
                oid.to_short_oid(),
                obj_type
            );
        }

        Ok(())
    }

    fn is_hex(value: &str) -> bool {
        value.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl CommitGraph for Repository {
    fn commit(&self, oid: &ObjectId) -> Result<Commit, GraphError> {
        let commit = self.database.parse_commit(oid)?;

        if !self.changed_paths {
            return Ok(commit);
        }

        match self.database.changed_paths(&commit)? {
            Some(paths) => Ok(commit.with_changed_paths(paths)),
            None => Ok(commit),
        }
    }

    fn parents(&self, oid: &ObjectId) -> Result<Vec<ObjectId>, GraphError> {
        Ok(self.database.parse_commit(oid)?.parents().to_vec())
    }

    /// Refs peeled to commits; refs to other objects are left out
    fn refs(&self) -> Result<BTreeMap<String, ObjectId>, GraphError> {
        let mut refs = BTreeMap::new();

        for (name, oid) in self.refs.list_refs()? {
            let peeled = match self.database.peel(&oid) {
                Ok(peeled) => peeled,
                Err(GraphError::NotFound(missing)) => {
                    warn!(reference = %name, object = %missing, "ref points to a missing object");
                    continue;
                }
                Err(err) => return Err(err),
            };

            if self.database.get_object_type(&peeled)? == ObjectType::Commit {
                refs.insert(name, peeled);
            }
        }

        Ok(refs)
    }
}
