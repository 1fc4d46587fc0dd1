//! Name validation for argument declarations.
//!
//! Catches names that the invocation grammar could never reach (a full name
//! without the `--` prefix, a short name with two dashes) before they are
//! inserted into the registry.
//!
//! # Examples
//!
//! ```
//! use typed_cmdline_core::{ArgError, validate_names};
//!
//! assert!(validate_names("--verbose", Some("-v")).is_ok());
//! assert_eq!(
//!     validate_names("verbose", None),
//!     Err(ArgError::InvalidFullName("verbose".to_string())),
//! );
//! ```

use crate::error::{ArgError, Result};

/// Validates a full name and an optional short name.
///
/// A full name must start with `--` and have at least one character after
/// it. A short name must start with a single `-` and have at least one
/// character after it.
///
/// # Errors
///
/// Returns [`ArgError::InvalidFullName`] or [`ArgError::InvalidShortName`]
/// for the first offending name.
pub fn validate_names(full_name: &str, short_name: Option<&str>) -> Result<()> {
    if !full_name.starts_with("--") || full_name.len() < 3 {
        return Err(ArgError::InvalidFullName(full_name.to_string()));
    }
    if full_name.contains('=') {
        return Err(ArgError::InvalidFullName(full_name.to_string()));
    }

    if let Some(short) = short_name {
        if !short.starts_with('-') || short.starts_with("--") || short.len() < 2 {
            return Err(ArgError::InvalidShortName(short.to_string()));
        }
        if short.contains('=') {
            return Err(ArgError::InvalidShortName(short.to_string()));
        }
    }

    Ok(())
}
