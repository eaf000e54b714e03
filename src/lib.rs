//! # sweep-core
//!
//! Core path model and expendables classification for a device-storage
//! cleaner.
//!
//! This crate provides the two tightly-coupled subsystems a package-data scan
//! is built on: a polymorphic, type-tagged **path model** that represents
//! filesystem locations and their metadata snapshots uniformly across
//! heterogeneous storage backends, and the extensible **expendables filter
//! protocol** that decides, from a path's segments alone, whether a file
//! under a package's data area is disposable cache content.
//!
//! The concrete storage backends that list and stat files, the deletion
//! executor, settings persistence and the UI all live in the host
//! application; this crate only defines the model those collaborators resolve
//! into and the classification contract they drive.
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`AnyPath`] | Polymorphic, backend-tagged filesystem location |
//! | [`LocalPath`], [`RawPath`], [`SafPath`] | Concrete per-backend path variants |
//! | [`AnyPathLookup`] (and per-variant lookups) | Immutable metadata snapshot bound to one path |
//! | [`ExpendablesFilter`] | One classification rule over path segments |
//! | [`ExpendablesFilterFactory`] | Enablement gate + lazy instantiation for a filter |
//! | [`FilterRegistry`] | Host-owned factory list; builds the per-scan active set |
//! | [`SweepError`] | Crate error type with contextual variants |
//!
//! ---
//!
//! ## Path records
//!
//! Every path and lookup value serializes to a record carrying a `"pathType"`
//! discriminator. Decoding into [`AnyPath`] dispatches on that field; decoding
//! into a fixed concrete type also pins the exact field layout, so payloads
//! of a different variant are rejected instead of coerced:
//!
//! ```rust
//! use sweep_core::{AnyPath, LocalPath, RawPath};
//!
//! let path = LocalPath::build(["pkg.name", "code_cache", "file.bin"]);
//! let json = serde_json::to_string(&path).unwrap();
//!
//! // round-trips through the polymorphic supertype
//! let back: AnyPath = serde_json::from_str(&json).unwrap();
//! assert_eq!(back, AnyPath::from(path));
//!
//! // but never into a different concrete variant
//! assert!(serde_json::from_str::<RawPath>(&json).is_err());
//! ```
//!
//! ## Classifying a scan
//!
//! The host assembles its factories once, activates them per scan, and feeds
//! every candidate path through the active set; a path is expendable when any
//! enabled filter says so:
//!
//! ```rust
//! use std::sync::Arc;
//! use sweep_core::{
//!     CodeCacheFilterFactory, DataAreaType, FilterRegistry, PkgId, ScanSettings,
//!     StorageEnvironment, segs,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let settings = Arc::new(ScanSettings::new());
//! let environment = Arc::new(StorageEnvironment::default());
//!
//! let registry = FilterRegistry::new(vec![Arc::new(CodeCacheFilterFactory::new(
//!     settings,
//!     environment,
//! ))]);
//!
//! let active = registry.activate().await;
//! let verdict = active
//!     .is_expendable(
//!         &PkgId::new("pkg.name"),
//!         DataAreaType::PrivateData,
//!         &segs(["pkg.name", "code_cache", "file.bin"]),
//!     )
//!     .await;
//! assert!(verdict);
//! # }
//! ```
//!
//! ---
//!
//! ## Thread Safety
//!
//! Filters require `Send + Sync` and take `&self`; configuration is resolved
//! up front and read-only afterwards, so one instance can serve concurrent
//! classification calls across paths without locking. Path and lookup values
//! are plain immutable data.

// Private modules
mod environment;
mod error;
mod filter;
mod paths;
mod settings;
mod types;

// Public re-exports - error type
pub use error::SweepError;

// Public re-exports - core value types
pub use types::{DataAreaType, FileType, Ownership, Permissions, PkgId, Segments, segs};

// Public re-exports - path model
pub use paths::{
    AnyPath, AnyPathLookup, LocalPath, LocalPathLookup, PathType, RawPath, RawPathLookup, SafPath,
    SafPathLookup,
};

// Public re-exports - filter protocol and host registry
pub use filter::{
    ActiveFilters, CodeCacheFilter, CodeCacheFilterFactory, DefaultCachesFilter,
    DefaultCachesFilterFactory, ExpendablesFilter, ExpendablesFilterFactory, FilterRegistry,
};

// Public re-exports - collaborator edges
pub use environment::StorageEnvironment;
pub use settings::ScanSettings;
