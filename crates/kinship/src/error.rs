//! Error types for Kinship operations.
//!
//! This module provides the main error type [`KinshipError`], which wraps the
//! errors of each stage: store validation, layout and export.

use std::io;

use thiserror::Error;

use crate::{layout::LayoutError, store::StoreError};

/// The main error type for Kinship operations.
#[derive(Debug, Error)]
pub enum KinshipError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for KinshipError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl KinshipError {
    /// Returns the message to show an end user.
    ///
    /// Validation errors explain what was wrong with the request. Layout
    /// failures only happen on corrupted data, so they get a generic message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Store(err) => err.to_string(),
            Self::Layout(_) => "the family tree cannot be displayed".to_string(),
            Self::Io(err) => format!("I/O error: {err}"),
            Self::Export(err) => format!("the family tree could not be exported: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use kinship_core::identifier::PersonId;

    use super::*;

    #[test]
    fn test_store_errors_keep_their_message() {
        let err = KinshipError::from(StoreError::NoParent(PersonId::new(1)));
        assert_eq!(err.user_message(), err.to_string());
    }

    #[test]
    fn test_layout_errors_are_generic_for_users() {
        let err = KinshipError::from(LayoutError::CycleDetected(PersonId::new(4)));
        assert_eq!(err.user_message(), "the family tree cannot be displayed");
        assert!(err.to_string().contains("#4"));
    }
}
