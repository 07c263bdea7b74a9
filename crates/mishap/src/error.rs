// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::fmt;

use tonic::{Code, Status};

use crate::cause::Cause;
use crate::context::{CustomerId, Op, OrderId};
use crate::kind::Kind;
use crate::severity::Severity;
use crate::stack::Stack;

/// Internal error data, boxed to keep the `Err` variant of `Result` small.
#[derive(Debug, Clone)]
pub(crate) struct Inner {
    pub(crate) kind: Option<Kind>,
    pub(crate) op: Op,
    pub(crate) customer_id: Option<CustomerId>,
    pub(crate) order_id: Option<OrderId>,
    pub(crate) severity: Option<Severity>,
    pub(crate) grpc_code: Option<Code>,
    pub(crate) grpc_msg: Option<String>,
    pub(crate) cause: Cause,
    pub(crate) stack: Stack,
}

/// A structured service error: a classification kind, an operation label,
/// optional correlation identifiers, an optional severity and wire status,
/// a captured stack, and the wrapped cause.
///
/// Values are immutable once constructed; every layer that adds context
/// wraps the previous error into a new value rather than mutating it, so
/// the full causal chain is retained until a boundary renders it. Shared
/// state is reference counted, which makes cloning cheap and concurrent
/// reads safe without locking.
///
/// The classification accessors ([`kind`](Error::kind),
/// [`severity`](Error::severity), [`customer_id`](Error::customer_id),
/// [`order_id`](Error::order_id), [`grpc_code`](Error::grpc_code),
/// [`grpc_msg`](Error::grpc_msg)) resolve outer-to-inner: the value set
/// closest to the boundary wins, and an unset field falls through to the
/// next link of the chain.
///
/// # Examples
///
/// ```rust
/// use mishap::{Error, Kind};
///
/// let read = Error::wrap("read_config", "file missing");
/// let load = Error::builder()
///     .op("load_settings")
///     .kind(Kind::NotFound)
///     .cause(read)
///     .build();
///
/// assert_eq!(load.kind(), Kind::NotFound);
/// assert_eq!(load.ops_text(), "load_settings: read_config");
/// assert_eq!(load.to_string(), "file missing");
/// ```
#[derive(Clone)]
pub struct Error {
    pub(crate) data: Box<Inner>,
}

impl Error {
    /// Creates a new [`Builder`](crate::Builder) for assembling an error.
    #[must_use]
    pub fn builder() -> crate::Builder {
        crate::Builder::new()
    }

    /// Wraps a cause with a derived operation label.
    ///
    /// Accepts a message, any ordinary error, or another [`Error`] (which
    /// continues the chain).
    #[track_caller]
    #[must_use]
    pub fn new<E>(cause: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self::builder().cause(cause).build()
    }

    /// Wraps a cause under an explicit operation label. The dominant call
    /// shape in service code.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mishap::Error;
    ///
    /// let err = Error::wrap("orders.load", "row not found");
    /// assert_eq!(err.op().as_str(), "orders.load");
    /// ```
    #[track_caller]
    #[must_use]
    pub fn wrap<E>(op: impl Into<Op>, cause: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self::builder().op(op).cause(cause).build()
    }

    /// Walks the chain outer-to-inner and returns the first explicitly set
    /// value of one field.
    fn resolve<'a, T>(&'a self, field: impl Fn(&'a Inner) -> Option<T>) -> Option<T> {
        let mut current = self;
        loop {
            if let Some(value) = field(&current.data) {
                return Some(value);
            }
            match &current.data.cause {
                Cause::Chained(next) => current = next.as_ref(),
                Cause::Terminal(_) => return None,
            }
        }
    }

    /// Returns the terminal error the chain ends at.
    fn terminal(&self) -> &(dyn StdError + 'static) {
        let mut current = self;
        loop {
            match &current.data.cause {
                Cause::Chained(next) => current = next.as_ref(),
                Cause::Terminal(err) => return err.as_ref(),
            }
        }
    }

    /// Returns the resolved classification kind: the outermost explicitly
    /// set kind, or [`Kind::Unexpected`] when none is set in the chain.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.resolve(|data| data.kind).unwrap_or_default()
    }

    /// Returns the canonical label for the resolved kind, from the standard
    /// HTTP status-text table.
    #[must_use]
    pub fn kind_text(&self) -> &'static str {
        self.kind().text()
    }

    /// Returns the resolved severity, defaulting to [`Severity::Error`]
    /// when none is set in the chain.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.resolve(|data| data.severity).unwrap_or_default()
    }

    /// Returns the resolved customer identifier, if set anywhere in the
    /// chain.
    #[must_use]
    pub fn customer_id(&self) -> Option<&CustomerId> {
        self.resolve(|data| data.customer_id.as_ref())
    }

    /// Returns the resolved order identifier, if set anywhere in the chain.
    #[must_use]
    pub fn order_id(&self) -> Option<&OrderId> {
        self.resolve(|data| data.order_id.as_ref())
    }

    /// Returns the resolved wire-status code, if set anywhere in the chain.
    #[must_use]
    pub fn grpc_code(&self) -> Option<Code> {
        self.resolve(|data| data.grpc_code)
    }

    /// Returns the resolved wire-status message, if set anywhere in the
    /// chain.
    #[must_use]
    pub fn grpc_msg(&self) -> Option<&str> {
        self.resolve(|data| data.grpc_msg.as_deref())
    }

    /// Converts the resolved wire-status fields into a gRPC status.
    ///
    /// Returns `None` unless some link of the chain set **both** the code
    /// and the message, letting the transport fall back to its default
    /// error conversion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mishap::Error;
    /// use tonic::Code;
    ///
    /// let plain = Error::wrap("load", "boom");
    /// assert!(plain.grpc_status().is_none());
    ///
    /// let tagged = Error::builder()
    ///     .grpc_code(Code::NotFound)
    ///     .grpc_msg("order does not exist")
    ///     .cause(plain)
    ///     .build();
    /// let status = tagged.grpc_status().unwrap();
    /// assert_eq!(status.code(), Code::NotFound);
    /// ```
    #[must_use]
    pub fn grpc_status(&self) -> Option<Status> {
        let code = self.grpc_code()?;
        let msg = self.grpc_msg()?;
        Some(Status::new(code, msg))
    }

    /// Returns this value's own operation label.
    ///
    /// Unlike the classification accessors this does not resolve across the
    /// chain; every wrap keeps its own label. Use [`ops`](Error::ops) for
    /// the full trail.
    #[must_use]
    pub fn op(&self) -> &Op {
        &self.data.op
    }

    /// Collects the operation labels across the whole chain, outermost
    /// first, stopping at the terminal link.
    #[must_use]
    pub fn ops(&self) -> Vec<&Op> {
        let mut ops = vec![&self.data.op];
        let mut current = self;
        while let Cause::Chained(next) = &current.data.cause {
            ops.push(&next.data.op);
            current = next.as_ref();
        }
        ops
    }

    /// Renders the operation trail joined with `": "`, outermost first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mishap::Error;
    ///
    /// let inner = Error::wrap("read", "file missing");
    /// let outer = Error::wrap("load", inner);
    /// assert_eq!(outer.ops_text(), "load: read");
    /// ```
    #[must_use]
    pub fn ops_text(&self) -> String {
        let ops: Vec<&str> = self.ops().iter().map(|op| op.as_str()).collect();
        ops.join(": ")
    }

    /// Returns the terminal message of the chain, the same text `Display`
    /// produces.
    #[must_use]
    pub fn message(&self) -> String {
        self.terminal().to_string()
    }

    /// Returns this value's cause link.
    #[must_use]
    pub fn cause(&self) -> &Cause {
        &self.data.cause
    }

    /// Returns the retained stack snapshot: the innermost capture in the
    /// whole chain, pointing at the original failure site.
    #[must_use]
    pub fn stack(&self) -> &Stack {
        &self.data.stack
    }
}

impl fmt::Display for Error {
    /// Writes the cause chain's terminal message, never a concatenation of
    /// every wrap. The alternate form (`{:#}`) appends the retained stack.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.terminal(), f)?;
        if f.alternate() && !self.data.stack.is_empty() {
            write!(f, "\n\nStack:{}", self.data.stack)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.data.kind)
            .field("op", &self.data.op)
            .field("customer_id", &self.data.customer_id)
            .field("order_id", &self.data.order_id)
            .field("severity", &self.data.severity)
            .field("grpc_code", &self.data.grpc_code)
            .field("grpc_msg", &self.data.grpc_msg)
            .field("cause", &self.data.cause)
            .field("stack", &self.data.stack)
            .finish()
    }
}

impl StdError for Error {
    /// Delegates to the terminal error's own source. The structured chain
    /// is traversed through [`cause`](Error::cause) instead; this keeps
    /// generic reporters from printing the terminal message once per wrap.
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.terminal().source()
    }
}
