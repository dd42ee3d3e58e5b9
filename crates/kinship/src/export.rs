//! Export of laid-out family trees.
//!
//! # Pipeline Position
//!
//! ```text
//! FamilyStore
//!     ↓ layout
//! LayoutResult
//!     ↓ export (this module)
//! Output document
//! ```
//!
//! Exporters only ever see a [`LayoutResult`]; they never read the store.
//! Export operations return [`Error`], which converts into
//! [`KinshipError::Export`] at the crate boundary.
//!
//! [`KinshipError::Export`]: crate::KinshipError::Export

/// SVG export backend.
pub mod svg;

use std::io;

use crate::layout::LayoutResult;

/// Abstraction for export backends.
pub trait Exporter {
    /// Writes `layout` to `output` in the backend's format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted, or
    /// [`Error::Io`] if writing fails.
    fn export_layout(&self, layout: &LayoutResult, output: &mut dyn io::Write)
    -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
