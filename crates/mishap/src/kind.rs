// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The closed classification taxonomy shared by HTTP and RPC boundaries.

use std::fmt;

use http::StatusCode;

/// Classification of an error into a small closed set of categories.
///
/// Each kind corresponds to a standard HTTP status code, so HTTP-facing
/// boundaries can choose a response status directly and gRPC-facing
/// boundaries can reuse the same classification. An error with no kind set
/// anywhere in its chain resolves to [`Kind::Unexpected`].
///
/// # Examples
///
/// ```rust
/// use mishap::Kind;
///
/// assert_eq!(Kind::NotFound.status(), http::StatusCode::NOT_FOUND);
/// assert_eq!(Kind::NotFound.text(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    /// The requested entity does not exist.
    NotFound,
    /// The request was malformed or otherwise invalid.
    BadRequest,
    /// An unexpected internal failure. This is the resolution default for
    /// unclassified errors.
    #[default]
    Unexpected,
    /// The entity being created already exists.
    AlreadyExists,
    /// The caller has exceeded its request quota.
    RateLimit,
    /// The requested operation is not implemented.
    NotImplemented,
    /// The resource has moved and the caller should be redirected.
    Redirect,
}

impl Kind {
    /// Returns the HTTP status code this kind maps onto.
    #[must_use]
    pub fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            Self::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            Self::Redirect => StatusCode::MOVED_PERMANENTLY,
        }
    }

    /// Returns the kind for an HTTP status code, if one of the seven
    /// classification codes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use http::StatusCode;
    /// use mishap::Kind;
    ///
    /// assert_eq!(Kind::from_status(StatusCode::CONFLICT), Some(Kind::AlreadyExists));
    /// assert_eq!(Kind::from_status(StatusCode::IM_A_TEAPOT), None);
    /// ```
    #[must_use]
    pub fn from_status(status: StatusCode) -> Option<Self> {
        match status.as_u16() {
            404 => Some(Self::NotFound),
            400 => Some(Self::BadRequest),
            500 => Some(Self::Unexpected),
            409 => Some(Self::AlreadyExists),
            429 => Some(Self::RateLimit),
            501 => Some(Self::NotImplemented),
            301 => Some(Self::Redirect),
            _ => None,
        }
    }

    /// Returns the canonical human-readable label for this kind, taken from
    /// the standard HTTP status-text table. Display only, carries no
    /// protocol meaning.
    #[must_use]
    pub fn text(self) -> &'static str {
        self.status().canonical_reason().unwrap_or("Unknown")
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Kind::NotFound, 404, "Not Found")]
    #[case(Kind::BadRequest, 400, "Bad Request")]
    #[case(Kind::Unexpected, 500, "Internal Server Error")]
    #[case(Kind::AlreadyExists, 409, "Conflict")]
    #[case(Kind::RateLimit, 429, "Too Many Requests")]
    #[case(Kind::NotImplemented, 501, "Not Implemented")]
    #[case(Kind::Redirect, 301, "Moved Permanently")]
    fn status_mapping(#[case] kind: Kind, #[case] code: u16, #[case] text: &str) {
        assert_eq!(kind.status().as_u16(), code);
        assert_eq!(kind.text(), text);
        assert_eq!(kind.to_string(), text);
        assert_eq!(Kind::from_status(kind.status()), Some(kind));
    }

    #[test]
    fn unmapped_status() {
        assert_eq!(Kind::from_status(StatusCode::OK), None);
        assert_eq!(Kind::from_status(StatusCode::FORBIDDEN), None);
    }

    #[test]
    fn default_is_unexpected() {
        assert_eq!(Kind::default(), Kind::Unexpected);
    }
}
