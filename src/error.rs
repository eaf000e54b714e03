//! Error types for the sweep core.

use crate::PathType;

/// Crate-wide error type with contextual variants.
///
/// All variants include the context needed to act on the failure (the
/// offending discriminator values, the filter or setting involved).
/// Uses `#[non_exhaustive]` for forward compatibility.
///
/// # Examples
///
/// ```rust
/// use sweep_core::{PathType, SweepError};
///
/// let err = SweepError::PathTypeFixed {
///     current: PathType::Local,
///     attempted: PathType::Raw,
/// };
/// assert_eq!(err.to_string(), "path type is fixed at LOCAL, cannot reassign to RAW");
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    /// Attempt to reassign a path's discriminator after construction.
    ///
    /// The discriminator is set exactly once when the value is built; the
    /// original value is left unchanged when this error is returned.
    #[error("path type is fixed at {current}, cannot reassign to {attempted}")]
    PathTypeFixed {
        /// The discriminator the value was constructed with.
        current: PathType,
        /// The discriminator the caller tried to assign.
        attempted: PathType,
    },

    /// A filter operation was invoked before `initialize` completed.
    #[error("filter not initialized: {filter}")]
    NotInitialized {
        /// Name of the filter that rejected the call.
        filter: &'static str,
    },

    /// A configuration value could not be read.
    #[error("configuration unreadable: {setting} ({reason})")]
    Config {
        /// The setting that could not be resolved.
        setting: String,
        /// Why the read failed.
        reason: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_type_fixed_display() {
        let err = SweepError::PathTypeFixed {
            current: PathType::Saf,
            attempted: PathType::Local,
        };
        assert_eq!(
            err.to_string(),
            "path type is fixed at SAF, cannot reassign to LOCAL"
        );
    }

    #[test]
    fn not_initialized_display() {
        let err = SweepError::NotInitialized { filter: "CodeCache" };
        assert_eq!(err.to_string(), "filter not initialized: CodeCache");
    }

    #[test]
    fn config_display_includes_setting_and_reason() {
        let err = SweepError::Config {
            setting: "filter_code_cache_enabled".into(),
            reason: "store unreachable".into(),
        };
        assert!(err.to_string().contains("filter_code_cache_enabled"));
        assert!(err.to_string().contains("store unreachable"));
    }
}
