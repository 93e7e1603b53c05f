use crate::artifacts::diff::tree_diff::{ChangedPaths, TreeDiff};
use crate::artifacts::graph::GraphError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{BufRead, Cursor, Read};
use std::path::Path;
use tracing::trace;

/// Tags pointing at tags pointing at ... give up after this many hops
const MAX_PEEL_DEPTH: usize = 16;

/// Read-only view of the loose objects of a repository
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

// TODO: read pack files so that gc'ed repositories can be walked
impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    /// Inflated object bytes, header included, verified against the id
    pub fn load(&self, object_id: &ObjectId) -> Result<Bytes, GraphError> {
        let object_path = self.path.join(object_id.to_path());

        let object_content = match std::fs::read(&object_path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(GraphError::NotFound(object_id.clone()));
            }
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!(
                        "Unable to read object file {}",
                        object_path.display()
                    ))
                    .into());
            }
        };

        let object_content =
            Self::decompress(object_content.into()).map_err(|err| GraphError::Corrupt {
                oid: object_id.clone(),
                reason: format!("{err:#}"),
            })?;

        let digest = ObjectId::from_digest(&Sha1::digest(&object_content))?;
        if &digest != object_id {
            return Err(GraphError::Corrupt {
                oid: object_id.clone(),
                reason: format!("content hashes to {digest}"),
            });
        }

        Ok(object_content)
    }

    pub fn get_object_type(&self, object_id: &ObjectId) -> Result<ObjectType, GraphError> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }

    pub fn parse_commit(&self, object_id: &ObjectId) -> Result<Commit, GraphError> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Commit::parse(object_id.clone(), object_reader)
                .map_err(|err| Self::corrupt(object_id, err)),
            other => Err(GraphError::Corrupt {
                oid: object_id.clone(),
                reason: format!("expected a commit, found a {other}"),
            }),
        }
    }

    pub fn parse_tree(&self, object_id: &ObjectId) -> Result<Tree, GraphError> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Tree => {
                Tree::parse(object_reader).map_err(|err| Self::corrupt(object_id, err))
            }
            other => Err(GraphError::Corrupt {
                oid: object_id.clone(),
                reason: format!("expected a tree, found a {other}"),
            }),
        }
    }

    /// Follow annotated tags until reaching a non-tag object
    pub fn peel(&self, object_id: &ObjectId) -> Result<ObjectId, GraphError> {
        let mut current = object_id.clone();

        for _ in 0..MAX_PEEL_DEPTH {
            let (object_type, object_reader) = self.parse_object_as_bytes(&current)?;
            if object_type != ObjectType::Tag {
                return Ok(current);
            }

            let target = Self::read_tag_target(object_reader)
                .map_err(|err| Self::corrupt(&current, err))?;
            trace!(tag = %current, target = %target, "peeled tag");
            current = target;
        }

        Err(GraphError::Corrupt {
            oid: object_id.clone(),
            reason: format!("tag chain longer than {MAX_PEEL_DEPTH}"),
        })
    }

    /// Paths changed by `commit` relative to its first parent
    ///
    /// A root commit changes every path of its tree. `None` when the commit
    /// has no tree or its first parent is missing.
    pub fn changed_paths(&self, commit: &Commit) -> Result<Option<ChangedPaths>, GraphError> {
        let Some(tree_oid) = commit.tree_oid() else {
            return Ok(None);
        };

        let parent_tree = match commit.parent() {
            None => None,
            Some(parent) => match self.parse_commit(parent) {
                Ok(parent) => parent.tree_oid().cloned(),
                Err(GraphError::NotFound(_)) => return Ok(None),
                Err(err) => return Err(err),
            },
        };

        let mut tree_diff = TreeDiff::new(self);
        tree_diff.compare_oids(parent_tree.as_ref(), Some(tree_oid), "")?;

        Ok(Some(tree_diff.into_changed_paths()))
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> Result<(ObjectType, Cursor<Bytes>), GraphError> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)
            .map_err(|err| Self::corrupt(object_id, err))?;

        Ok((object_type, object_reader))
    }

    fn read_tag_target(object_reader: impl BufRead) -> anyhow::Result<ObjectId> {
        for line in object_reader.lines() {
            let line = line?;
            if line.is_empty() {
                break;
            }
            if let Some(target) = line.strip_prefix("object ") {
                return ObjectId::try_parse(target.to_string());
            }
        }

        Err(anyhow::anyhow!("Invalid tag object: missing object line"))
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn corrupt(object_id: &ObjectId, err: anyhow::Error) -> GraphError {
        GraphError::Corrupt {
            oid: object_id.clone(),
            reason: format!("{err:#}"),
        }
    }

    /// Find all objects whose OID starts with the given prefix.
    ///
    /// Used to resolve abbreviated OIDs, which are at least four characters
    /// long. More than one match means the prefix is ambiguous.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let mut matches = Vec::new();

        let Some((dir_name, file_prefix)) = prefix.split_at_checked(2) else {
            anyhow::bail!("object id prefix {prefix} is too short");
        };
        let dir_path = self.path.join(dir_name);

        if dir_path.is_dir() {
            for entry in std::fs::read_dir(&dir_path)? {
                let file_name = entry?.file_name();
                let file_name = file_name.to_string_lossy();

                if file_name.starts_with(file_prefix)
                    && let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}"))
                {
                    matches.push(oid);
                }
            }
        }

        matches.sort();
        Ok(matches)
    }
}
