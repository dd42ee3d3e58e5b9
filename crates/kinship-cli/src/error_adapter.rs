//! Error adapter for converting KinshipError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use kinship::KinshipError;

/// Adapter presenting a [`KinshipError`] as a miette diagnostic.
///
/// The message is the user-facing one; for layout failures the detailed cause
/// is shown as help instead.
pub struct ErrorAdapter<'a>(pub &'a KinshipError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.user_message())
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            KinshipError::Store(err) => err.code(),
            KinshipError::Layout(_) => "kinship::layout",
            KinshipError::Io(_) => "kinship::io",
            KinshipError::Export(_) => "kinship::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            KinshipError::Store(err) => err
                .help()
                .map(|help| Box::new(help) as Box<dyn fmt::Display>),
            KinshipError::Layout(err) => Some(Box::new(err) as Box<dyn fmt::Display + 'a>),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wrap a [`KinshipError`] for rendering by miette.
pub fn to_reportable(err: &KinshipError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}

#[cfg(test)]
mod tests {
    use kinship::{identifier::PersonId, layout::LayoutError, store::StoreError};

    use super::*;

    #[test]
    fn test_store_error_carries_code_and_help() {
        let err = KinshipError::from(StoreError::DuplicateRoot(PersonId::new(1)));
        let reportable = to_reportable(&err);

        assert_eq!(reportable.to_string(), "the tree already has a root (#1)");
        assert_eq!(
            reportable.code().map(|code| code.to_string()),
            Some("kinship::store::duplicate_root".to_string())
        );
        assert!(reportable.help().is_some());
    }

    #[test]
    fn test_layout_error_is_generic_with_detailed_help() {
        let err = KinshipError::from(LayoutError::CycleDetected(PersonId::new(3)));
        let reportable = to_reportable(&err);

        assert_eq!(reportable.to_string(), "the family tree cannot be displayed");
        let help = reportable.help().map(|help| help.to_string()).unwrap();
        assert!(help.contains("#3"));
    }

    #[test]
    fn test_io_error_has_no_help() {
        let err = KinshipError::Io(std::io::Error::other("disk full"));
        let reportable = to_reportable(&err);

        assert_eq!(
            reportable.code().map(|code| code.to_string()),
            Some("kinship::io".to_string())
        );
        assert!(reportable.help().is_none());
    }
}
