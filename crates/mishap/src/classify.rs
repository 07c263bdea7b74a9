// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Classification over type-erased errors.
//!
//! Transport and logging boundaries often hold a `&dyn Error` rather than a
//! structured [`Error`]. The functions here downcast and resolve through the
//! chain, returning the documented defaults for anything that is not a
//! structured error: [`Kind::Unexpected`], [`Severity::Error`], absent
//! identifiers, and no wire status.
//!
//! # Examples
//!
//! ```rust
//! use mishap::{classify, Error, Kind};
//!
//! let err = Error::builder().op("load").kind(Kind::NotFound).cause("gone").build();
//! assert_eq!(classify::kind(&err), Kind::NotFound);
//! assert!(classify::is(&err, Kind::NotFound));
//!
//! let foreign = std::io::Error::other("disk gone");
//! assert_eq!(classify::kind(&foreign), Kind::Unexpected);
//! ```

use std::error::Error as StdError;

use tonic::{Code, Status};

use crate::context::{CustomerId, OrderId};
use crate::kind::Kind;
use crate::severity::Severity;
use crate::Error;

/// Returns the resolved kind, or [`Kind::Unexpected`] for a non-structured
/// error.
#[must_use]
pub fn kind(err: &(dyn StdError + 'static)) -> Kind {
    err.downcast_ref::<Error>().map_or_else(Kind::default, Error::kind)
}

/// Returns the canonical label of the resolved kind.
#[must_use]
pub fn kind_text(err: &(dyn StdError + 'static)) -> &'static str {
    kind(err).text()
}

/// Shorthand for checking an error against a kind.
#[must_use]
pub fn is(err: &(dyn StdError + 'static), expected: Kind) -> bool {
    kind(err) == expected
}

/// Returns the resolved severity, or [`Severity::Error`] for a
/// non-structured error.
#[must_use]
pub fn severity(err: &(dyn StdError + 'static)) -> Severity {
    err.downcast_ref::<Error>().map_or_else(Severity::default, Error::severity)
}

/// Returns [`Severity::Info`] when the error resolves to one of the
/// expected kinds, [`Severity::Error`] otherwise.
///
/// Lets a caller log anticipated failures quietly while everything else
/// stays loud:
///
/// ```rust
/// use mishap::{classify, Error, Kind, Severity};
///
/// let err = Error::builder().kind(Kind::NotFound).cause("gone").build();
/// assert_eq!(classify::expect_severity(&err, &[Kind::NotFound]), Severity::Info);
/// assert_eq!(classify::expect_severity(&err, &[Kind::RateLimit]), Severity::Error);
/// ```
#[must_use]
pub fn expect_severity(err: &(dyn StdError + 'static), expected: &[Kind]) -> Severity {
    if expected.contains(&kind(err)) {
        Severity::Info
    } else {
        Severity::Error
    }
}

/// Returns the resolved customer identifier, if any.
#[must_use]
pub fn customer_id<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a CustomerId> {
    err.downcast_ref::<Error>().and_then(Error::customer_id)
}

/// Returns the resolved order identifier, if any.
#[must_use]
pub fn order_id<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a OrderId> {
    err.downcast_ref::<Error>().and_then(Error::order_id)
}

/// Returns the resolved wire-status code, if any.
#[must_use]
pub fn grpc_code(err: &(dyn StdError + 'static)) -> Option<Code> {
    err.downcast_ref::<Error>().and_then(Error::grpc_code)
}

/// Returns the resolved wire-status message, if any.
#[must_use]
pub fn grpc_msg<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a str> {
    err.downcast_ref::<Error>().and_then(Error::grpc_msg)
}

/// Converts the resolved wire-status fields into a gRPC status; `None`
/// unless some link set both the code and the message, so the transport
/// falls back to its default conversion.
#[must_use]
pub fn grpc_status(err: &(dyn StdError + 'static)) -> Option<Status> {
    err.downcast_ref::<Error>().and_then(Error::grpc_status)
}
