// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::panic::Location;
use std::path::Path;

use tonic::Code;

use crate::cause::Cause;
use crate::context::{CustomerId, Op, OrderId};
use crate::error::Inner;
use crate::kind::Kind;
use crate::severity::Severity;
use crate::stack::{Frame, Stack};
use crate::Error;

/// Builder for assembling an [`Error`].
///
/// Context arguments may be supplied in any order; each setter asserts one
/// field and everything left unset falls through to the cause chain at
/// resolution time. [`build`](Builder::build) applies the synthesis rules:
/// a missing cause becomes a synthetic terminal message citing the call
/// site, a missing operation label is derived from the call site, and
/// wrapping a structured error retains that chain's innermost stack
/// capture.
///
/// # Examples
///
/// ```rust
/// use mishap::{Error, Kind, Severity};
///
/// let err = Error::builder()
///     .op("orders.create")
///     .kind(Kind::AlreadyExists)
///     .severity(Severity::Warn)
///     .customer_id("cust-42")
///     .cause("order o-7 already placed")
///     .build();
///
/// assert_eq!(err.kind(), Kind::AlreadyExists);
/// assert_eq!(err.to_string(), "order o-7 already placed");
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    kind: Option<Kind>,
    op: Option<Op>,
    customer_id: Option<CustomerId>,
    order_id: Option<OrderId>,
    severity: Option<Severity>,
    grpc_code: Option<Code>,
    grpc_msg: Option<String>,
    cause: Option<Cause>,
    no_stack: bool,
}

impl Builder {
    /// Creates a builder with nothing set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation label. When not supplied, a label is derived
    /// from the construction site.
    #[must_use]
    pub fn op(mut self, op: impl Into<Op>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Asserts the classification kind.
    #[must_use]
    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Asserts the log severity.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Attaches a customer identifier for diagnostic correlation.
    #[must_use]
    pub fn customer_id(mut self, id: impl Into<CustomerId>) -> Self {
        self.customer_id = Some(id.into());
        self
    }

    /// Attaches an order identifier for diagnostic correlation.
    #[must_use]
    pub fn order_id(mut self, id: impl Into<OrderId>) -> Self {
        self.order_id = Some(id.into());
        self
    }

    /// Sets the wire-status code. A status is only produced when the
    /// message is also set somewhere in the chain.
    #[must_use]
    pub fn grpc_code(mut self, code: Code) -> Self {
        self.grpc_code = Some(code);
        self
    }

    /// Sets the wire-status message. A status is only produced when the
    /// code is also set somewhere in the chain.
    #[must_use]
    pub fn grpc_msg(mut self, msg: impl Into<String>) -> Self {
        self.grpc_msg = Some(msg.into());
        self
    }

    /// Sets the cause: a message, any ordinary error, or another [`Error`]
    /// which continues the chain. At most one cause is kept; a later call
    /// replaces the earlier one.
    #[must_use]
    pub fn cause<E>(mut self, cause: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        self.cause = Some(Cause::from_boxed(cause.into()));
        self
    }

    /// Suppresses stack capture for this value. Wrapping a structured
    /// error still retains that chain's innermost capture.
    #[must_use]
    pub fn no_stack(mut self) -> Self {
        self.no_stack = true;
        self
    }

    /// Builds the error.
    ///
    /// When no cause was supplied, a synthetic terminal message naming the
    /// caller's file and line is generated; the result is never treated as
    /// "no error".
    #[track_caller]
    #[must_use]
    pub fn build(self) -> Error {
        let location = Location::caller();

        let cause = self.cause.unwrap_or_else(|| {
            let msg = format!("error constructed with no cause - {}:{}", location.file(), location.line());
            Cause::from_boxed(msg.into())
        });

        // innermost capture wins across the chain; a wrap site's own
        // capture is only taken when the chain starts here
        let (stack, captured_here) = match &cause {
            Cause::Chained(inner) => (inner.stack().clone(), false),
            Cause::Terminal(_) if self.no_stack => (Stack::empty(), false),
            Cause::Terminal(_) => (Stack::capture(), true),
        };

        let op = match self.op {
            Some(op) => op,
            None if captured_here => derived_op(&stack, location),
            None => file_line_op(location),
        };

        Error {
            data: Box::new(Inner {
                kind: self.kind,
                op,
                customer_id: self.customer_id,
                order_id: self.order_id,
                severity: self.severity,
                grpc_code: self.grpc_code,
                grpc_msg: self.grpc_msg,
                cause,
                stack,
            }),
        }
    }
}

/// Derives an operation label from the innermost captured frame that is
/// not part of this library or the capture machinery, in the form
/// `function:line`. Falls back to `file:line` when symbols are missing.
fn derived_op(stack: &Stack, location: &Location<'_>) -> Op {
    const INTERNAL: [&str; 2] = ["backtrace::", "mishap::"];

    let function = stack
        .frames()
        .filter_map(Frame::name)
        .find(|name| !INTERNAL.iter().any(|prefix| name.starts_with(prefix)))
        .map(|name| name.rsplit("::").next().unwrap_or_default().to_owned());

    match function {
        Some(function) if !function.is_empty() => Op::from(format!("{function}:{}", location.line())),
        _ => file_line_op(location),
    }
}

/// The degraded label used when no usable frame is available: source file
/// basename and line of the construction site.
fn file_line_op(location: &Location<'_>) -> Op {
    let file = Path::new(location.file()).file_name().map_or_else(
        || location.file().to_owned(),
        |name| name.to_string_lossy().into_owned(),
    );
    Op::from(format!("{file}:{}", location.line()))
}
