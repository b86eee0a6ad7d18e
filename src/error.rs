// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Exit code of a delivered message.
///
/// Codes below [`ExitCode::FIRST_USER_EXIT_CODE`] are raised by the ledger itself,
/// the rest by actor code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExitCode(u32);

impl ExitCode {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    pub const fn is_system_error(self) -> bool {
        self.0 != 0 && self.0 < Self::FIRST_USER_EXIT_CODE
    }

    pub const OK: ExitCode = ExitCode::new(0);

    /// The recipient does not exist and the message did not carry a deployment.
    pub const SYS_INVALID_RECEIVER: ExitCode = ExitCode::new(5);
    /// The sender cannot cover the value it tried to move.
    pub const SYS_INSUFFICIENT_FUNDS: ExitCode = ExitCode::new(6);
    /// The actor misbehaved: a bad deployment or a broken caller-validation contract.
    pub const SYS_ILLEGAL_ACTOR: ExitCode = ExitCode::new(9);

    pub const FIRST_USER_EXIT_CODE: u32 = 16;

    pub const USR_ILLEGAL_ARGUMENT: ExitCode = ExitCode::new(16);
    pub const USR_NOT_FOUND: ExitCode = ExitCode::new(17);
    pub const USR_FORBIDDEN: ExitCode = ExitCode::new(18);
    pub const USR_INSUFFICIENT_FUNDS: ExitCode = ExitCode::new(19);
    pub const USR_ILLEGAL_STATE: ExitCode = ExitCode::new(20);
    pub const USR_SERIALIZATION: ExitCode = ExitCode::new(21);
    pub const USR_UNHANDLED_MESSAGE: ExitCode = ExitCode::new(22);

    fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::OK => "Ok",
            Self::SYS_INVALID_RECEIVER => "SysErrInvalidReceiver",
            Self::SYS_INSUFFICIENT_FUNDS => "SysErrInsufficientFunds",
            Self::SYS_ILLEGAL_ACTOR => "SysErrIllegalActor",
            Self::USR_ILLEGAL_ARGUMENT => "ErrIllegalArgument",
            Self::USR_NOT_FOUND => "ErrNotFound",
            Self::USR_FORBIDDEN => "ErrForbidden",
            Self::USR_INSUFFICIENT_FUNDS => "ErrInsufficientFunds",
            Self::USR_ILLEGAL_STATE => "ErrIllegalState",
            Self::USR_SERIALIZATION => "ErrSerialization",
            Self::USR_UNHANDLED_MESSAGE => "ErrUnhandledMessage",
            _ => return None,
        })
    }
}

impl Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}({})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

impl fmt::Debug for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExitCode({self})")
    }
}

/// The error type returned by actor method calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("ActorError(exit_code: {exit_code}, msg: {msg})")]
pub struct ActorError {
    exit_code: ExitCode,
    msg: String,
}

impl ActorError {
    /// Creates a new ActorError with any exit code, including system ones.
    pub fn unchecked(code: ExitCode, msg: String) -> Self {
        Self {
            exit_code: code,
            msg,
        }
    }

    pub fn illegal_argument(msg: String) -> Self {
        Self::unchecked(ExitCode::USR_ILLEGAL_ARGUMENT, msg)
    }
    pub fn not_found(msg: String) -> Self {
        Self::unchecked(ExitCode::USR_NOT_FOUND, msg)
    }
    pub fn forbidden(msg: String) -> Self {
        Self::unchecked(ExitCode::USR_FORBIDDEN, msg)
    }
    pub fn insufficient_funds(msg: String) -> Self {
        Self::unchecked(ExitCode::USR_INSUFFICIENT_FUNDS, msg)
    }
    pub fn illegal_state(msg: String) -> Self {
        Self::unchecked(ExitCode::USR_ILLEGAL_STATE, msg)
    }
    pub fn serialization(msg: String) -> Self {
        Self::unchecked(ExitCode::USR_SERIALIZATION, msg)
    }
    pub fn unhandled_message(msg: String) -> Self {
        Self::unchecked(ExitCode::USR_UNHANDLED_MESSAGE, msg)
    }
    pub fn illegal_actor(msg: String) -> Self {
        Self::unchecked(ExitCode::SYS_ILLEGAL_ACTOR, msg)
    }

    /// Returns the exit code of the error.
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    /// Error message of the actor error.
    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// Prefix error message with a string message.
    pub fn wrap(mut self, msg: impl AsRef<str>) -> Self {
        self.msg = format!("{}: {}", msg.as_ref(), self.msg);
        self
    }
}

/// Converts a raw encoding error into an ErrSerialization.
impl From<fvm_ipld_encoding::Error> for ActorError {
    fn from(e: fvm_ipld_encoding::Error) -> Self {
        Self::serialization(e.to_string())
    }
}

/// Convenience macro for generating Actor Errors
#[macro_export]
macro_rules! actor_error {
    // Error with only one stringable expression
    ( $code:ident; $msg:expr ) => { $crate::error::ActorError::$code($msg.to_string()) };

    // String with positional arguments
    ( $code:ident; $msg:literal $(, $ex:expr)+ ) => {
        $crate::error::ActorError::$code(format!($msg, $($ex,)*))
    };

    // Error with only one stringable expression, with comma separator
    ( $code:ident, $msg:expr ) => { $crate::actor_error!($code; $msg) };

    // String with positional arguments, with comma separator
    ( $code:ident, $msg:literal $(, $ex:expr)+ ) => {
        $crate::actor_error!($code; $msg $(, $ex)*)
    };
}
