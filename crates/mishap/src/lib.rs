// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Structured error classification and context for service boundaries.
//!
//! Mishap lets every layer of a service wrap a failure with the context it
//! knows about — an operation label, a classification kind, a severity, a
//! customer or order identifier, a wire status — without losing the
//! original cause. Boundaries then resolve that context back out: HTTP
//! handlers pick a response status from the [`Kind`], gRPC transports
//! build a [`tonic::Status`] from the wire fields, and logging middleware
//! attaches the operation trail and identifiers as structured fields.
//!
//! # Key Features
//!
//! - [**`Error`**](Error): immutable error value carrying classification,
//!   context, a captured stack, and the wrapped cause
//! - [**`Builder`**](Builder): order-independent construction with
//!   call-site derivation for everything left unset
//! - [**Classification accessors**](Error::kind): outer-to-inner chain
//!   resolution, the wrap closest to the boundary wins
//! - [**`classify`**](classify): the same lookups over type-erased
//!   `&dyn Error` values, with documented defaults
//! - [**`Stack`**](Stack): bounded call-stack snapshots that survive
//!   re-wrapping, always pointing at the original failure site
//!
//! # Quick Start
//!
//! ```rust
//! use mishap::{Error, Kind, Severity};
//!
//! fn read_order(id: &str) -> Result<String, Error> {
//!     Err(Error::wrap("orders.read", format!("order {id} not in store")))
//! }
//!
//! fn load_order(id: &str) -> Result<String, Error> {
//!     read_order(id).map_err(|e| {
//!         Error::builder()
//!             .op("orders.load")
//!             .kind(Kind::NotFound)
//!             .severity(Severity::Info)
//!             .order_id(id)
//!             .cause(e)
//!             .build()
//!     })
//! }
//!
//! let err = load_order("o-7").unwrap_err();
//! assert_eq!(err.kind(), Kind::NotFound);
//! assert_eq!(err.kind_text(), "Not Found");
//! assert_eq!(err.ops_text(), "orders.load: orders.read");
//! assert_eq!(err.to_string(), "order o-7 not in store");
//! ```
//!
//! # Resolution Rules
//!
//! Classification fields are additive. A layer sets only the fields it
//! wants to assert; an unset field is transparent and falls through to the
//! next link of the chain. The outermost explicit setting always wins, so
//! context added close to the boundary is authoritative. The retained
//! stack snapshot works the other way around: it is the innermost capture
//! in the chain, preserving the original failure site across re-wraps.
//!
//! # Wire Status
//!
//! A layer that sets both [`Builder::grpc_code`] and [`Builder::grpc_msg`]
//! makes [`Error::grpc_status`] produce a ready-made [`tonic::Status`];
//! otherwise the accessor returns `None` and the transport applies its own
//! default conversion.
//!
//! Mishap performs no I/O, owns no logger, and never decides retry policy;
//! it only tags and classifies.

mod builder;
mod cause;
mod context;
mod error;
mod kind;
mod severity;
mod stack;

pub mod classify;

pub use builder::Builder;
pub use cause::Cause;
pub use context::{CustomerId, Op, OrderId};
pub use error::Error;
pub use kind::Kind;
pub use severity::Severity;
pub use stack::{Frame, Stack};
