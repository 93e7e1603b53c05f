//! Git references (branches, HEAD, tags)
//!
//! References are human-readable names pointing to objects, read-only here.
//! They can be:
//! - Direct: containing a commit SHA-1
//! - Symbolic: pointing to another reference (e.g., HEAD -> refs/heads/master)
//!
//! ## Sources
//!
//! - `HEAD`: current branch (symbolic) or a detached commit
//! - loose refs: one file per ref under `refs/`
//! - `packed-refs`: `<oid> <name>` lines written by `git pack-refs`; a loose
//!   ref shadows a packed one of the same name

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Component, Path};
use tracing::warn;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Symbolic refs pointing at symbolic refs give up after this many hops
const MAX_SYMREF_DEPTH: usize = 8;

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the git directory (typically `.git`)
    path: Box<Path>,
}

/// Internal representation of a reference value
#[derive(Debug, Clone, PartialEq, Eq)]
enum SymRefOrOid {
    /// Symbolic reference pointing to another ref
    SymRef { sym_ref_name: String },
    /// Direct object ID
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn parse(content: &str) -> anyhow::Result<Option<SymRefOrOid>> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef {
                sym_ref_name: symref_match[1].to_string(),
            }))
        } else {
            Ok(Some(SymRefOrOid::Oid(ObjectId::try_parse(
                content.to_string(),
            )?)))
        }
    }

    fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;

        Self::parse(&content).with_context(|| format!("invalid ref file at {:?}", path))
    }
}

impl Refs {
    /// The ref HEAD points to, or `HEAD` itself when detached
    pub fn current_ref(&self) -> anyhow::Result<String> {
        let mut current = HEAD_REF_NAME.to_string();

        for _ in 0..MAX_SYMREF_DEPTH {
            match SymRefOrOid::read_symref_or_oid(&self.path.join(&current))? {
                Some(SymRefOrOid::SymRef { sym_ref_name }) => current = sym_ref_name,
                Some(SymRefOrOid::Oid(_)) | None => return Ok(current),
            }
        }

        Ok(current)
    }

    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_ref(HEAD_REF_NAME)
    }

    /// Resolve a full ref name (`HEAD`, `refs/heads/main`, ...) to an id
    ///
    /// Symbolic refs are followed; `None` when the name, or the branch a
    /// symbolic ref points to, does not exist yet.
    pub fn read_ref(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        if !Self::is_safe_ref_name(name) {
            return Ok(None);
        }

        let mut current = name.to_string();
        for _ in 0..MAX_SYMREF_DEPTH {
            match SymRefOrOid::read_symref_or_oid(&self.path.join(&current))? {
                Some(SymRefOrOid::SymRef { sym_ref_name }) => current = sym_ref_name,
                Some(SymRefOrOid::Oid(oid)) => return Ok(Some(oid)),
                None => return Ok(self.packed_refs()?.remove(&current)),
            }
        }

        anyhow::bail!("symbolic ref {name} nests too deeply")
    }

    /// Every ref with the id it points to: `HEAD`, loose and packed refs
    ///
    /// Refs that cannot be read are skipped with a warning.
    pub fn list_refs(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        let mut refs = self.packed_refs()?;

        for name in self.list_loose_refs() {
            match SymRefOrOid::read_symref_or_oid(&self.path.join(&name)) {
                Ok(Some(SymRefOrOid::Oid(oid))) => {
                    refs.insert(name, oid);
                }
                Ok(Some(SymRefOrOid::SymRef { .. })) => match self.read_ref(&name) {
                    Ok(Some(oid)) => {
                        refs.insert(name, oid);
                    }
                    Ok(None) => {}
                    Err(err) => warn!(reference = %name, error = %err, "skipping ref"),
                },
                Ok(None) => {}
                Err(err) => warn!(reference = %name, error = %err, "skipping ref"),
            }
        }

        if let Some(head) = self.read_head()? {
            refs.insert(HEAD_REF_NAME.to_string(), head);
        }

        Ok(refs)
    }

    fn list_loose_refs(&self) -> Vec<String> {
        WalkDir::new(self.refs_path())
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(self.path.as_ref()).ok()?;
                let components = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>();
                Some(components.join("/"))
            })
            .collect()
    }

    fn packed_refs(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        let packed_path = self.path.join("packed-refs");
        if !packed_path.is_file() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&packed_path)
            .with_context(|| format!("failed to read {:?}", packed_path))?;

        let mut refs = BTreeMap::new();
        for line in content.lines() {
            // comments carry capabilities, `^` lines carry peeled tag targets
            if line.starts_with('#') || line.starts_with('^') || line.trim().is_empty() {
                continue;
            }

            let (oid, name) = line
                .split_once(' ')
                .with_context(|| format!("invalid packed-refs line {line:?}"))?;
            refs.insert(name.trim().to_string(), ObjectId::try_parse(oid.to_string())?);
        }

        Ok(refs)
    }

    /// Ref names never escape the git directory
    fn is_safe_ref_name(name: &str) -> bool {
        !name.is_empty()
            && Path::new(name)
                .components()
                .all(|component| matches!(component, Component::Normal(_)))
    }

    fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }
}
