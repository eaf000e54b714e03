//! Core value types shared across the path model and the filters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path components relative to a storage area root, in order.
///
/// By convention `segments[0]` is the package's own directory under the area
/// root; deeper entries follow in traversal order.
pub type Segments = Vec<String>;

/// Build a [`Segments`] value from anything yielding string-likes.
///
/// ```rust
/// use sweep_core::segs;
///
/// let segments = segs(["pkg.name", "cache", "file.bin"]);
/// assert_eq!(segments.len(), 3);
/// ```
pub fn segs<I>(parts: I) -> Segments
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    parts.into_iter().map(Into::into).collect()
}

/// Type of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link.
    Symlink,
}

/// Logical grouping of package data a classification rule is evaluated
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataAreaType {
    /// App-private data (`/data/data`-style areas).
    PrivateData,
    /// App data on shared storage.
    PublicData,
    /// Media directories on shared storage.
    PublicMedia,
    /// The shared storage root itself.
    Sdcard,
}

/// Opaque package identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PkgId(String);

impl PkgId {
    /// Wrap a raw package name.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw package name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PkgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owner and group of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ownership {
    /// Numeric owner id.
    pub user_id: u32,
    /// Numeric group id.
    pub group_id: u32,
}

impl Ownership {
    /// Create an ownership pair.
    pub const fn new(user_id: u32, group_id: u32) -> Self {
        Self { user_id, group_id }
    }
}

/// Unix-style permissions stored as a mode bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permissions {
    /// The raw mode bits (rwxrwxrwx plus setuid/setgid/sticky).
    pub mode: u32,
}

impl Permissions {
    /// Create permissions from a Unix mode (e.g., 0o755).
    #[inline]
    pub const fn from_mode(mode: u32) -> Self {
        Self {
            mode: mode & 0o7777,
        }
    }

    /// Returns `true` if these permissions deny writing.
    #[inline]
    pub const fn readonly(&self) -> bool {
        (self.mode & 0o222) == 0
    }
}

/// Serde support for `SystemTime` as a `(secs, nanos)` pair since the epoch.
pub(crate) mod system_time_serde {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let duration = time.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
        (duration.as_secs(), duration.subsec_nanos()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SystemTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (secs, nanos): (u64, u32) = Deserialize::deserialize(deserializer)?;
        Ok(UNIX_EPOCH + Duration::new(secs, nanos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segs_builds_owned_segments() {
        let s = segs(["a", "b"]);
        assert_eq!(s, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn file_type_serializes_as_enum_name() {
        assert_eq!(serde_json::to_string(&FileType::File).unwrap(), "\"FILE\"");
        assert_eq!(
            serde_json::to_string(&FileType::Directory).unwrap(),
            "\"DIRECTORY\""
        );
        assert_eq!(
            serde_json::to_string(&FileType::Symlink).unwrap(),
            "\"SYMLINK\""
        );
    }

    #[test]
    fn data_area_type_serializes_as_enum_name() {
        assert_eq!(
            serde_json::to_string(&DataAreaType::PrivateData).unwrap(),
            "\"PRIVATE_DATA\""
        );
        assert_eq!(
            serde_json::to_string(&DataAreaType::Sdcard).unwrap(),
            "\"SDCARD\""
        );
    }

    #[test]
    fn pkg_id_is_transparent() {
        let id = PkgId::new("eu.example.app");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"eu.example.app\"");
        assert_eq!(id.as_str(), "eu.example.app");
    }

    #[test]
    fn permissions_from_mode_masks_extra_bits() {
        let p = Permissions::from_mode(0o100755);
        assert_eq!(p.mode, 0o755);
    }

    #[test]
    fn permissions_readonly() {
        assert!(Permissions::from_mode(0o444).readonly());
        assert!(!Permissions::from_mode(0o644).readonly());
    }

    #[test]
    fn types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FileType>();
        assert_send_sync::<DataAreaType>();
        assert_send_sync::<PkgId>();
        assert_send_sync::<Ownership>();
        assert_send_sync::<Permissions>();
    }
}
