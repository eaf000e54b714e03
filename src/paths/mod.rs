//! # Path Model
//!
//! A polymorphic, type-tagged representation of filesystem locations across
//! heterogeneous storage backends.
//!
//! ## Variants
//!
//! | Variant | Backend | Record shape |
//! |---------|---------|--------------|
//! | [`LocalPath`] | local filesystem | `{ "file": <path string>, "pathType": "LOCAL" }` |
//! | [`RawPath`] | shell-root listing | `{ "path": <string>, "pathType": "RAW" }` |
//! | [`SafPath`] | Storage Access Framework | `{ "treeRoot": <uri>, "segments": [...], "pathType": "SAF" }` |
//!
//! [`AnyPath`] is the polymorphic supertype over the three; [`AnyPathLookup`]
//! mirrors it for metadata snapshots.
//!
//! ## Codec
//!
//! Every record carries a `"pathType"` discriminator holding the variant's
//! enum name. Decoding into [`AnyPath`] / [`AnyPathLookup`] dispatches on that
//! field; decoding into a fixed concrete type additionally pins the variant's
//! exact field layout, so a payload produced by a different variant fails with
//! a data-format error instead of silently coercing. The discriminator itself
//! is fixed at construction and can never be reassigned to a different value.

mod local;
mod raw;
mod saf;

use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::system_time_serde;
use crate::{FileType, Ownership, Permissions, Segments, SweepError};

pub use local::{LocalPath, LocalPathLookup};
pub use raw::{RawPath, RawPathLookup};
pub use saf::{SafPath, SafPathLookup};

/// The closed discriminator naming which storage backend a path belongs to.
///
/// The tag set is closed: decoders reject anything outside it rather than
/// tolerate unknowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PathType {
    /// Local filesystem backend.
    Local,
    /// Shell-root backend.
    Raw,
    /// Storage-Access-Framework backend.
    Saf,
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PathType::Local => "LOCAL",
            PathType::Raw => "RAW",
            PathType::Saf => "SAF",
        })
    }
}

/// A filesystem location under any supported backend.
///
/// The polymorphic supertype of the concrete path variants. Equality is
/// structural over `(path type, segments)`; values of different variants are
/// never equal, even when their segments coincide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnyPath {
    /// A [`LocalPath`].
    Local(LocalPath),
    /// A [`RawPath`].
    Raw(RawPath),
    /// A [`SafPath`].
    Saf(SafPath),
}

impl AnyPath {
    /// The discriminator naming this value's backend.
    pub fn path_type(&self) -> PathType {
        match self {
            AnyPath::Local(p) => p.path_type(),
            AnyPath::Raw(p) => p.path_type(),
            AnyPath::Saf(p) => p.path_type(),
        }
    }

    /// Deserializer plumbing for the discriminator slot; fails unless `value`
    /// matches the variant this value was constructed as.
    pub fn set_path_type(&mut self, value: PathType) -> Result<(), SweepError> {
        match self {
            AnyPath::Local(p) => p.set_path_type(value),
            AnyPath::Raw(p) => p.set_path_type(value),
            AnyPath::Saf(p) => p.set_path_type(value),
        }
    }

    /// The path's components, root-relative, in order.
    pub fn segments(&self) -> Segments {
        match self {
            AnyPath::Local(p) => p.segments(),
            AnyPath::Raw(p) => p.segments(),
            AnyPath::Saf(p) => p.segments(),
        }
    }

    /// The final segment, if any.
    pub fn name(&self) -> Option<String> {
        match self {
            AnyPath::Local(p) => p.name(),
            AnyPath::Raw(p) => p.name(),
            AnyPath::Saf(p) => p.name(),
        }
    }
}

impl From<LocalPath> for AnyPath {
    fn from(path: LocalPath) -> Self {
        AnyPath::Local(path)
    }
}

impl From<RawPath> for AnyPath {
    fn from(path: RawPath) -> Self {
        AnyPath::Raw(path)
    }
}

impl From<SafPath> for AnyPath {
    fn from(path: SafPath) -> Self {
        AnyPath::Saf(path)
    }
}

impl Serialize for AnyPath {
    // Delegates to the concrete variant so the record is identical whether a
    // value is encoded directly or through the supertype.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AnyPath::Local(p) => p.serialize(serializer),
            AnyPath::Raw(p) => p.serialize(serializer),
            AnyPath::Saf(p) => p.serialize(serializer),
        }
    }
}

/// Tag-dispatching decode shape for [`AnyPath`]: the `pathType` field selects
/// which concrete variant's layout applies.
#[derive(Deserialize)]
#[serde(tag = "pathType")]
enum AnyPathRepr {
    #[serde(rename = "LOCAL")]
    Local { file: PathBuf },
    #[serde(rename = "RAW")]
    Raw { path: String },
    #[serde(rename = "SAF", rename_all = "camelCase")]
    Saf { tree_root: String, segments: Segments },
}

impl<'de> Deserialize<'de> for AnyPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match AnyPathRepr::deserialize(deserializer)? {
            AnyPathRepr::Local { file } => AnyPath::Local(LocalPath::from_path(file)),
            AnyPathRepr::Raw { path } => AnyPath::Raw(RawPath::from_string(path)),
            AnyPathRepr::Saf { tree_root, segments } => {
                AnyPath::Saf(SafPath::build(tree_root, segments))
            }
        })
    }
}

/// A metadata snapshot under any supported backend.
///
/// Mirrors [`AnyPath`] for lookup values. Identity follows the per-variant
/// rule: `(looked up path, file type)` only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnyPathLookup {
    /// A [`LocalPathLookup`].
    Local(LocalPathLookup),
    /// A [`RawPathLookup`].
    Raw(RawPathLookup),
    /// A [`SafPathLookup`].
    Saf(SafPathLookup),
}

impl AnyPathLookup {
    /// The discriminator of the looked-up path.
    pub fn path_type(&self) -> PathType {
        match self {
            AnyPathLookup::Local(_) => PathType::Local,
            AnyPathLookup::Raw(_) => PathType::Raw,
            AnyPathLookup::Saf(_) => PathType::Saf,
        }
    }

    /// The path this snapshot describes, as the polymorphic supertype.
    pub fn looked_up(&self) -> AnyPath {
        match self {
            AnyPathLookup::Local(l) => AnyPath::Local(l.looked_up().clone()),
            AnyPathLookup::Raw(l) => AnyPath::Raw(l.looked_up().clone()),
            AnyPathLookup::Saf(l) => AnyPath::Saf(l.looked_up().clone()),
        }
    }

    /// Entry kind at stat time.
    pub fn file_type(&self) -> FileType {
        match self {
            AnyPathLookup::Local(l) => l.file_type(),
            AnyPathLookup::Raw(l) => l.file_type(),
            AnyPathLookup::Saf(l) => l.file_type(),
        }
    }

    /// Size in bytes at stat time.
    pub fn size(&self) -> u64 {
        match self {
            AnyPathLookup::Local(l) => l.size(),
            AnyPathLookup::Raw(l) => l.size(),
            AnyPathLookup::Saf(l) => l.size(),
        }
    }

    /// Modification time at stat time.
    pub fn modified_at(&self) -> SystemTime {
        match self {
            AnyPathLookup::Local(l) => l.modified_at(),
            AnyPathLookup::Raw(l) => l.modified_at(),
            AnyPathLookup::Saf(l) => l.modified_at(),
        }
    }
}

impl From<LocalPathLookup> for AnyPathLookup {
    fn from(lookup: LocalPathLookup) -> Self {
        AnyPathLookup::Local(lookup)
    }
}

impl From<RawPathLookup> for AnyPathLookup {
    fn from(lookup: RawPathLookup) -> Self {
        AnyPathLookup::Raw(lookup)
    }
}

impl From<SafPathLookup> for AnyPathLookup {
    fn from(lookup: SafPathLookup) -> Self {
        AnyPathLookup::Saf(lookup)
    }
}

impl Serialize for AnyPathLookup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AnyPathLookup::Local(l) => l.serialize(serializer),
            AnyPathLookup::Raw(l) => l.serialize(serializer),
            AnyPathLookup::Saf(l) => l.serialize(serializer),
        }
    }
}

/// Tag-dispatching decode shape for [`AnyPathLookup`]. Each variant spells
/// out the full lookup layout over its own path type.
#[derive(Deserialize)]
#[serde(tag = "pathType")]
enum AnyPathLookupRepr {
    #[serde(rename = "LOCAL", rename_all = "camelCase")]
    Local {
        looked_up: LocalPath,
        file_type: FileType,
        size: u64,
        #[serde(with = "system_time_serde")]
        modified_at: SystemTime,
        ownership: Option<Ownership>,
        permissions: Option<Permissions>,
        target: Option<LocalPath>,
    },
    #[serde(rename = "RAW", rename_all = "camelCase")]
    Raw {
        looked_up: RawPath,
        file_type: FileType,
        size: u64,
        #[serde(with = "system_time_serde")]
        modified_at: SystemTime,
        ownership: Option<Ownership>,
        permissions: Option<Permissions>,
        target: Option<RawPath>,
    },
    #[serde(rename = "SAF", rename_all = "camelCase")]
    Saf {
        looked_up: SafPath,
        file_type: FileType,
        size: u64,
        #[serde(with = "system_time_serde")]
        modified_at: SystemTime,
        ownership: Option<Ownership>,
        permissions: Option<Permissions>,
        target: Option<SafPath>,
    },
}

impl<'de> Deserialize<'de> for AnyPathLookup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match AnyPathLookupRepr::deserialize(deserializer)? {
            AnyPathLookupRepr::Local {
                looked_up,
                file_type,
                size,
                modified_at,
                ownership,
                permissions,
                target,
            } => AnyPathLookup::Local(LocalPathLookup::new(
                looked_up, file_type, size, modified_at, ownership, permissions, target,
            )),
            AnyPathLookupRepr::Raw {
                looked_up,
                file_type,
                size,
                modified_at,
                ownership,
                permissions,
                target,
            } => AnyPathLookup::Raw(RawPathLookup::new(
                looked_up, file_type, size, modified_at, ownership, permissions, target,
            )),
            AnyPathLookupRepr::Saf {
                looked_up,
                file_type,
                size,
                modified_at,
                ownership,
                permissions,
                target,
            } => AnyPathLookup::Saf(SafPathLookup::new(
                looked_up, file_type, size, modified_at, ownership, permissions, target,
            )),
        })
    }
}
