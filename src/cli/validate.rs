#![forbid(unsafe_code)]

//! Positional argument validation
//!
//! Turns the raw `<url> <type>` pair into an [`Invocation`]. Nothing is
//! spawned until this succeeds.

use crate::error::Error;
use crate::types::{Invocation, Mode};

/// Validate the positional arguments
///
/// # Errors
///
/// - [`Error::Usage`] if either argument is missing
/// - [`Error::InvalidMode`] if the type is not `mirror` or `page`
pub fn validate(url: Option<&str>, mode: Option<&str>) -> Result<Invocation, Error> {
    let (Some(url), Some(mode)) = (url, mode) else {
        return Err(Error::Usage);
    };

    let mode: Mode = mode
        .parse()
        .map_err(|_| Error::InvalidMode(mode.to_string()))?;

    Ok(Invocation::new(url, mode))
}
