// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Diagnostic context carried by errors: the operation label and the opaque
//! correlation identifiers.

use std::fmt;

macro_rules! context_string {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Returns the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

context_string! {
    /// Label identifying the logical operation or call site that produced or
    /// re-wrapped an error.
    ///
    /// A chain of wraps yields a trail of these labels, readable as a coarse
    /// stack trace of the request's path through the service. See
    /// [`Error::ops`](crate::Error::ops).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mishap::Op;
    ///
    /// let op = Op::from("billing.create_invoice");
    /// assert_eq!(op.as_str(), "billing.create_invoice");
    /// ```
    Op
}

context_string! {
    /// Opaque customer identifier attached to an error for diagnostic
    /// correlation.
    ///
    /// The library assigns no meaning to the contents; it is threaded through
    /// the chain so logging middleware can emit it as a structured field.
    CustomerId
}

context_string! {
    /// Opaque order identifier attached to an error for diagnostic
    /// correlation.
    OrderId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        let op = Op::from("svc.new_order");
        assert_eq!(op.as_str(), "svc.new_order");
        assert_eq!(op, Op::from(String::from("svc.new_order")));

        let customer = CustomerId::from("cust-1234");
        assert_eq!(customer.as_ref(), "cust-1234");
    }

    #[test]
    fn display() {
        assert_eq!(Op::from("load").to_string(), "load");
        assert_eq!(CustomerId::from("c1").to_string(), "c1");
        assert_eq!(OrderId::from("o1").to_string(), "o1");
    }
}
