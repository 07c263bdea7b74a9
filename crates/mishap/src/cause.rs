// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::sync::Arc;

use crate::Error;

/// One link of a cause chain: either another structured [`Error`] or the
/// terminal error the chain ends at.
///
/// Every [`Error`] carries exactly one `Cause`; the chain is never empty.
/// Links are shared, so cloning an error anywhere in the chain is cheap and
/// the chain stays immutable.
#[derive(Debug, Clone)]
pub enum Cause {
    /// The chain continues with another structured error.
    Chained(Arc<Error>),
    /// The chain ends at an ordinary error or message.
    Terminal(Arc<dyn StdError + Send + Sync>),
}

impl Cause {
    /// Classifies a boxed error into the right link variant. A boxed
    /// [`Error`] continues the chain; anything else terminates it.
    pub(crate) fn from_boxed(err: Box<dyn StdError + Send + Sync>) -> Self {
        match err.downcast::<Error>() {
            Ok(chained) => Self::Chained(Arc::new(*chained)),
            Err(terminal) => Self::Terminal(Arc::from(terminal)),
        }
    }

    /// Returns the next structured error in the chain, if this link is not
    /// terminal.
    #[must_use]
    pub fn as_chained(&self) -> Option<&Error> {
        match self {
            Self::Chained(next) => Some(next),
            Self::Terminal(_) => None,
        }
    }
}

impl From<Error> for Cause {
    fn from(err: Error) -> Self {
        Self::Chained(Arc::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxed_plain_error_terminates() {
        let io = std::io::Error::other("disk gone");
        let cause = Cause::from_boxed(Box::new(io));
        assert!(cause.as_chained().is_none());
        assert!(matches!(cause, Cause::Terminal(_)));
    }

    #[test]
    fn boxed_structured_error_chains() {
        let inner = Error::builder().op("inner").cause("boom").build();
        let cause = Cause::from_boxed(Box::new(inner));
        let chained = cause.as_chained().expect("structured cause must chain");
        assert_eq!(chained.op().as_str(), "inner");
    }

    #[test]
    fn boxed_message_terminates() {
        let cause = Cause::from_boxed(Box::from("just a message"));
        match cause {
            Cause::Terminal(err) => assert_eq!(err.to_string(), "just a message"),
            Cause::Chained(_) => panic!("message must not chain"),
        }
    }
}
