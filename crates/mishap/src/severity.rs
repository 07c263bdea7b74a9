// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Log-level hint carried alongside an error.

use std::fmt;

/// Severity with which an error should be logged.
///
/// This enum is owned by the library and deliberately decoupled from any
/// logging framework's level type; [`From<Severity>`] conversions bridge to
/// the surrounding logging stack. An error with no severity set anywhere in
/// its chain resolves to [`Severity::Error`], since an unclassified failure
/// is by definition unexpected.
///
/// # Examples
///
/// ```rust
/// use mishap::Severity;
///
/// assert_eq!(Severity::default(), Severity::Error);
/// assert_eq!(tracing::Level::from(Severity::Warn), tracing::Level::WARN);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Severity {
    /// Diagnostic detail, not actionable on its own.
    Debug,
    /// An expected condition worth recording.
    Info,
    /// A suspicious condition that did not fail the operation outright.
    Warn,
    /// A failure requiring attention. This is the resolution default.
    #[default]
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(text)
    }
}

impl From<Severity> for tracing::Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Debug => Self::DEBUG,
            Severity::Info => Self::INFO,
            Severity::Warn => Self::WARN,
            Severity::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn display() {
        assert_eq!(Severity::Debug.to_string(), "debug");
        assert_eq!(Severity::Info.to_string(), "info");
        assert_eq!(Severity::Warn.to_string(), "warn");
        assert_eq!(Severity::Error.to_string(), "error");
    }

    #[test]
    fn tracing_levels() {
        assert_eq!(tracing::Level::from(Severity::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(Severity::Info), tracing::Level::INFO);
        assert_eq!(tracing::Level::from(Severity::Warn), tracing::Level::WARN);
        assert_eq!(tracing::Level::from(Severity::Error), tracing::Level::ERROR);
    }
}
