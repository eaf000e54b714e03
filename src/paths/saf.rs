//! Storage-Access-Framework path variant and its metadata snapshot.
//!
//! SAF locations are identified by a permission-granted tree-root URI plus
//! the segments below that root; the two parts together form the value's
//! identity.

use std::hash::{Hash, Hasher};
use std::time::SystemTime;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::system_time_serde;
use crate::{FileType, Ownership, PathType, Permissions, Segments, SweepError};

/// A location under a granted document-tree root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafPath {
    tree_root: String,
    segments: Segments,
}

impl SafPath {
    /// Construct from a tree-root URI and the segment sequence below it.
    /// Segments are taken literally as supplied.
    pub fn build<I>(tree_root: impl Into<String>, segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            tree_root: tree_root.into(),
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// The permission-granted tree-root URI.
    pub fn tree_root(&self) -> &str {
        &self.tree_root
    }

    /// The discriminator naming this variant's backend.
    pub fn path_type(&self) -> PathType {
        PathType::Saf
    }

    /// Deserializer plumbing for the discriminator slot; fails for any value
    /// other than [`PathType::Saf`] and leaves this value unchanged.
    pub fn set_path_type(&mut self, value: PathType) -> Result<(), SweepError> {
        match value {
            PathType::Saf => Ok(()),
            attempted => Err(SweepError::PathTypeFixed {
                current: PathType::Saf,
                attempted,
            }),
        }
    }

    /// The segments below the tree root, in order.
    pub fn segments(&self) -> Segments {
        self.segments.clone()
    }

    /// The final segment, if any.
    pub fn name(&self) -> Option<String> {
        self.segments.last().cloned()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct SafPathRepr {
    tree_root: String,
    segments: Segments,
    path_type: PathType,
}

impl Serialize for SafPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SafPathRepr {
            tree_root: self.tree_root.clone(),
            segments: self.segments.clone(),
            path_type: PathType::Saf,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SafPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = SafPathRepr::deserialize(deserializer)?;
        let mut path = SafPath::build(repr.tree_root, repr.segments);
        path.set_path_type(repr.path_type).map_err(D::Error::custom)?;
        Ok(path)
    }
}

/// Metadata snapshot of one [`SafPath`].
#[derive(Debug, Clone)]
pub struct SafPathLookup {
    looked_up: SafPath,
    file_type: FileType,
    size: u64,
    modified_at: SystemTime,
    ownership: Option<Ownership>,
    permissions: Option<Permissions>,
    target: Option<SafPath>,
}

impl SafPathLookup {
    /// Construct a snapshot with every field supplied by the resolving
    /// backend.
    pub fn new(
        looked_up: SafPath,
        file_type: FileType,
        size: u64,
        modified_at: SystemTime,
        ownership: Option<Ownership>,
        permissions: Option<Permissions>,
        target: Option<SafPath>,
    ) -> Self {
        Self {
            looked_up,
            file_type,
            size,
            modified_at,
            ownership,
            permissions,
            target,
        }
    }

    /// The path this snapshot describes.
    pub fn looked_up(&self) -> &SafPath {
        &self.looked_up
    }

    /// Entry kind at stat time.
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Size in bytes at stat time.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Modification time at stat time.
    pub fn modified_at(&self) -> SystemTime {
        self.modified_at
    }

    /// Owner and group, when resolved.
    pub fn ownership(&self) -> Option<Ownership> {
        self.ownership
    }

    /// Mode bits, when resolved.
    pub fn permissions(&self) -> Option<Permissions> {
        self.permissions
    }

    /// Symlink resolution, `None` for non-links.
    pub fn target(&self) -> Option<&SafPath> {
        self.target.as_ref()
    }
}

// Identity over (looked_up, file_type) only; metadata drift between stat
// calls must not break dedup or diffing. See LocalPathLookup.
impl PartialEq for SafPathLookup {
    fn eq(&self, other: &Self) -> bool {
        self.looked_up == other.looked_up && self.file_type == other.file_type
    }
}

impl Eq for SafPathLookup {}

impl Hash for SafPathLookup {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.looked_up.hash(state);
        self.file_type.hash(state);
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct SafPathLookupRepr {
    looked_up: SafPath,
    file_type: FileType,
    size: u64,
    #[serde(with = "system_time_serde")]
    modified_at: SystemTime,
    ownership: Option<Ownership>,
    permissions: Option<Permissions>,
    target: Option<SafPath>,
    path_type: PathType,
}

impl Serialize for SafPathLookup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SafPathLookupRepr {
            looked_up: self.looked_up.clone(),
            file_type: self.file_type,
            size: self.size,
            modified_at: self.modified_at,
            ownership: self.ownership,
            permissions: self.permissions,
            target: self.target.clone(),
            path_type: PathType::Saf,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SafPathLookup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = SafPathLookupRepr::deserialize(deserializer)?;
        if repr.path_type != PathType::Saf {
            return Err(D::Error::custom(SweepError::PathTypeFixed {
                current: PathType::Saf,
                attempted: repr.path_type,
            }));
        }
        Ok(Self {
            looked_up: repr.looked_up,
            file_type: repr.file_type,
            size: repr.size,
            modified_at: repr.modified_at,
            ownership: repr.ownership,
            permissions: repr.permissions,
            target: repr.target,
        })
    }
}
