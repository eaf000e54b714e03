//! Shell-root ("raw") path variant and its metadata snapshot.
//!
//! Raw paths come from elevated shell listings and carry an opaque,
//! slash-joined string instead of a platform path handle.

use std::hash::{Hash, Hasher};
use std::time::SystemTime;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::system_time_serde;
use crate::{FileType, Ownership, PathType, Permissions, Segments, SweepError};

/// A location reported by a shell-root backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawPath {
    path: String,
}

impl RawPath {
    /// Construct from an explicit, non-empty segment sequence, joined with
    /// `/`. Segments are taken literally as supplied.
    pub fn build<I>(segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let path = segments
            .into_iter()
            .map(Into::into)
            .collect::<Vec<_>>()
            .join("/");
        Self { path }
    }

    /// Construct from an already-joined shell path string.
    pub fn from_string(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The opaque shell path string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The discriminator naming this variant's backend.
    pub fn path_type(&self) -> PathType {
        PathType::Raw
    }

    /// Deserializer plumbing for the discriminator slot; fails for any value
    /// other than [`PathType::Raw`] and leaves this value unchanged.
    pub fn set_path_type(&mut self, value: PathType) -> Result<(), SweepError> {
        match value {
            PathType::Raw => Ok(()),
            attempted => Err(SweepError::PathTypeFixed {
                current: PathType::Raw,
                attempted,
            }),
        }
    }

    /// The path's components, in order.
    pub fn segments(&self) -> Segments {
        self.path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// The final segment, if any.
    pub fn name(&self) -> Option<String> {
        self.segments().pop()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawPathRepr {
    path: String,
    path_type: PathType,
}

impl Serialize for RawPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawPathRepr {
            path: self.path.clone(),
            path_type: PathType::Raw,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = RawPathRepr::deserialize(deserializer)?;
        let mut path = RawPath::from_string(repr.path);
        path.set_path_type(repr.path_type).map_err(D::Error::custom)?;
        Ok(path)
    }
}

/// Metadata snapshot of one [`RawPath`].
#[derive(Debug, Clone)]
pub struct RawPathLookup {
    looked_up: RawPath,
    file_type: FileType,
    size: u64,
    modified_at: SystemTime,
    ownership: Option<Ownership>,
    permissions: Option<Permissions>,
    target: Option<RawPath>,
}

impl RawPathLookup {
    /// Construct a snapshot with every field supplied by the resolving
    /// backend.
    pub fn new(
        looked_up: RawPath,
        file_type: FileType,
        size: u64,
        modified_at: SystemTime,
        ownership: Option<Ownership>,
        permissions: Option<Permissions>,
        target: Option<RawPath>,
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
    pub fn looked_up(&self) -> &RawPath {
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
    pub fn target(&self) -> Option<&RawPath> {
        self.target.as_ref()
    }
}

// Identity over (looked_up, file_type) only; metadata drift between stat
// calls must not break dedup or diffing. See LocalPathLookup.
impl PartialEq for RawPathLookup {
    fn eq(&self, other: &Self) -> bool {
        self.looked_up == other.looked_up && self.file_type == other.file_type
    }
}

impl Eq for RawPathLookup {}

impl Hash for RawPathLookup {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.looked_up.hash(state);
        self.file_type.hash(state);
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawPathLookupRepr {
    looked_up: RawPath,
    file_type: FileType,
    size: u64,
    #[serde(with = "system_time_serde")]
    modified_at: SystemTime,
    ownership: Option<Ownership>,
    permissions: Option<Permissions>,
    target: Option<RawPath>,
    path_type: PathType,
}

impl Serialize for RawPathLookup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawPathLookupRepr {
            looked_up: self.looked_up.clone(),
            file_type: self.file_type,
            size: self.size,
            modified_at: self.modified_at,
            ownership: self.ownership,
            permissions: self.permissions,
            target: self.target.clone(),
            path_type: PathType::Raw,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawPathLookup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = RawPathLookupRepr::deserialize(deserializer)?;
        if repr.path_type != PathType::Raw {
            return Err(D::Error::custom(SweepError::PathTypeFixed {
                current: PathType::Raw,
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

#[cfg(test)]
mod tests {
    use std::time::UNIX_EPOCH;

    use serde_json::json;

    use super::*;

    #[test]
    fn direct_serialization() {
        let original = RawPath::build(["test", "file"]);

        let value = serde_json::to_value(&original).unwrap();
        assert_eq!(
            value,
            json!({
                "path": "test/file",
                "pathType": "RAW",
            })
        );

        let back: RawPath = serde_json::from_value(value).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn fixed_type() {
        let mut path = RawPath::build(["test", "file"]);
        let err = path.set_path_type(PathType::Saf).unwrap_err();
        assert!(matches!(err, SweepError::PathTypeFixed { .. }));
        assert_eq!(path.path_type(), PathType::Raw);
    }

    #[test]
    fn force_typing_is_rejected() {
        let local = crate::LocalPath::build(["test", "file"]);
        let payload = serde_json::to_value(&local).unwrap();

        let result: Result<RawPath, _> = serde_json::from_value(payload);
        assert!(result.is_err());
    }

    #[test]
    fn segments_split_on_slash() {
        let path = RawPath::from_string("/system/app/Files.apk");
        assert_eq!(path.segments(), vec!["system", "app", "Files.apk"]);
        assert_eq!(path.name().as_deref(), Some("Files.apk"));
    }

    #[test]
    fn lookup_round_trip_and_identity() {
        let original = RawPathLookup::new(
            RawPath::build(["data", "pkg", "cache", "a.tmp"]),
            FileType::File,
            128,
            UNIX_EPOCH,
            Some(Ownership::new(0, 0)),
            Some(Permissions::from_mode(0o600)),
            None,
        );

        let value = serde_json::to_value(&original).unwrap();
        let back: RawPathLookup = serde_json::from_value(value).unwrap();
        assert_eq!(back, original);

        let resized = RawPathLookup::new(
            RawPath::build(["data", "pkg", "cache", "a.tmp"]),
            FileType::File,
            4096,
            UNIX_EPOCH,
            None,
            None,
            None,
        );
        assert_eq!(original, resized);
    }
}
