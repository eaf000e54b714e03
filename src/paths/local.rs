//! Local-filesystem path variant and its metadata snapshot.

use std::hash::{Hash, Hasher};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::system_time_serde;
use crate::{FileType, Ownership, PathType, Permissions, Segments, SweepError};

/// A location on the device's local filesystem.
///
/// An immutable value type: no I/O, no filesystem access. The discriminator
/// is [`PathType::Local`] and is fixed for the value's lifetime.
///
/// # Equality
///
/// Value equality over `(path type, segments)`. Two `LocalPath`s naming the
/// same location compare equal regardless of whether they were built from a
/// segment list or from a native [`PathBuf`]:
///
/// ```rust
/// use sweep_core::LocalPath;
///
/// assert_eq!(LocalPath::build(["test", "file1"]), LocalPath::build(["test", "file1"]));
/// assert_ne!(LocalPath::build(["test", "file1"]), LocalPath::build(["test", "file2"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalPath {
    file: PathBuf,
}

impl LocalPath {
    /// Construct from an explicit, non-empty, order-preserving sequence of
    /// segment strings.
    ///
    /// Segments are taken literally as supplied; `.` and `..` are not
    /// normalized here.
    pub fn build<I>(segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let file: PathBuf = segments.into_iter().map(Into::into).collect();
        Self { file }
    }

    /// Construct from a native path handle.
    ///
    /// The caller is expected to have normalized the path already; this
    /// constructor stores it verbatim so equality and serialization stay
    /// backend-agnostic.
    pub fn from_path(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    /// The platform path this value names.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// The discriminator naming this variant's backend.
    pub fn path_type(&self) -> PathType {
        PathType::Local
    }

    /// Deserializer plumbing for the discriminator slot.
    ///
    /// The path type is fixed at construction; assigning the current value is
    /// a no-op, assigning any other value fails and leaves this value
    /// unchanged.
    pub fn set_path_type(&mut self, value: PathType) -> Result<(), SweepError> {
        match value {
            PathType::Local => Ok(()),
            attempted => Err(SweepError::PathTypeFixed {
                current: PathType::Local,
                attempted,
            }),
        }
    }

    /// The path's components, root-relative, in order.
    pub fn segments(&self) -> Segments {
        self.file
            .components()
            .filter_map(|c| match c {
                Component::RootDir | Component::Prefix(_) => None,
                other => Some(other.as_os_str().to_string_lossy().into_owned()),
            })
            .collect()
    }

    /// The final segment, if any.
    pub fn name(&self) -> Option<String> {
        self.file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }
}

/// Exact serialized field layout of a [`LocalPath`] record.
///
/// `deny_unknown_fields` pins the shape: a payload produced by another
/// variant fails to decode here even when its discriminator looks plausible.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct LocalPathRepr {
    file: PathBuf,
    path_type: PathType,
}

impl Serialize for LocalPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        LocalPathRepr {
            file: self.file.clone(),
            path_type: PathType::Local,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LocalPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = LocalPathRepr::deserialize(deserializer)?;
        let mut path = LocalPath::from_path(repr.file);
        path.set_path_type(repr.path_type).map_err(D::Error::custom)?;
        Ok(path)
    }
}

/// Metadata snapshot of one [`LocalPath`], produced by a backend stat call.
///
/// Immutable after construction; a re-scan supersedes a lookup with a fresh
/// value rather than mutating it.
#[derive(Debug, Clone)]
pub struct LocalPathLookup {
    looked_up: LocalPath,
    file_type: FileType,
    size: u64,
    modified_at: SystemTime,
    ownership: Option<Ownership>,
    permissions: Option<Permissions>,
    target: Option<LocalPath>,
}

impl LocalPathLookup {
    /// Construct a snapshot with every field supplied by the resolving
    /// backend. There is no partial construction.
    pub fn new(
        looked_up: LocalPath,
        file_type: FileType,
        size: u64,
        modified_at: SystemTime,
        ownership: Option<Ownership>,
        permissions: Option<Permissions>,
        target: Option<LocalPath>,
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
    pub fn looked_up(&self) -> &LocalPath {
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

    /// Owner and group, when the backend could resolve them.
    pub fn ownership(&self) -> Option<Ownership> {
        self.ownership
    }

    /// Mode bits, when the backend could resolve them.
    pub fn permissions(&self) -> Option<Permissions> {
        self.permissions
    }

    /// Symlink resolution, `None` for non-links.
    pub fn target(&self) -> Option<&LocalPath> {
        self.target.as_ref()
    }
}

// Identity is the logical entry, not the metadata snapshot: size, timestamps,
// ownership, permissions and symlink targets drift between two stat calls,
// and lookups for the same entry must keep comparing equal across that noise
// so result-set dedup and before/after scan diffs hold up. Only `looked_up`
// and `file_type` participate. Do not widen this to all fields.
impl PartialEq for LocalPathLookup {
    fn eq(&self, other: &Self) -> bool {
        self.looked_up == other.looked_up && self.file_type == other.file_type
    }
}

impl Eq for LocalPathLookup {}

impl Hash for LocalPathLookup {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.looked_up.hash(state);
        self.file_type.hash(state);
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct LocalPathLookupRepr {
    looked_up: LocalPath,
    file_type: FileType,
    size: u64,
    #[serde(with = "system_time_serde")]
    modified_at: SystemTime,
    ownership: Option<Ownership>,
    permissions: Option<Permissions>,
    target: Option<LocalPath>,
    path_type: PathType,
}

impl Serialize for LocalPathLookup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        LocalPathLookupRepr {
            looked_up: self.looked_up.clone(),
            file_type: self.file_type,
            size: self.size,
            modified_at: self.modified_at,
            ownership: self.ownership,
            permissions: self.permissions,
            target: self.target.clone(),
            path_type: PathType::Local,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LocalPathLookup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = LocalPathLookupRepr::deserialize(deserializer)?;
        if repr.path_type != PathType::Local {
            return Err(D::Error::custom(SweepError::PathTypeFixed {
                current: PathType::Local,
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
