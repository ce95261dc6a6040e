//! Error taxonomy for single-expression evaluation.

use thiserror::Error;

/// Every way a single expression can fail to produce a number.
///
/// These are local, recoverable failures. The batch entry points turn all of
/// them into blank results; [`evaluate`](super::evaluate) hands them to the
/// caller unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The input was blank after trimming.
    #[error("expression cannot be empty")]
    EmptyExpression,

    /// The input is not a well-formed expression.
    #[error("invalid expression: {0}")]
    InvalidExpression(String),

    /// The input uses syntax that the calculator grammar does not allow.
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// The operator is not present in the active configuration.
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// A bare name that is not one of the configured constants.
    #[error("unknown identifier: {0}")]
    UnknownIdentifier(String),

    /// A call target that is not one of the configured functions.
    #[error("unsupported function: {0}")]
    UnsupportedFunction(String),

    /// A configured function rejected the arguments it was given.
    #[error("invalid arguments for {function}: {reason}")]
    InvalidArguments {
        /// Name of the function that was called.
        function: String,
        /// Why the function refused the call.
        reason: String,
    },
}

impl EvalError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidExpression(message.into())
    }

    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedExpression(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        assert_eq!(
            EvalError::UnknownIdentifier("x".into()).to_string(),
            "unknown identifier: x"
        );
        let err = EvalError::InvalidArguments {
            function: "abs".into(),
            reason: "expected exactly one argument, got 2".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid arguments for abs: expected exactly one argument, got 2"
        );
    }
}
