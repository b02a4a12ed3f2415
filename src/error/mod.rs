mod constants;
mod store;

pub use constants::*;

use reqwest::StatusCode;
use std::fmt;

/// Which part of the taxonomy an error belongs to.
///
/// Only [`Kind::Persistence`] failures make the batch exit non-zero;
/// [`Kind::Validation`] failures skip the affected season and are logged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Configuration,
    Persistence,
    Validation,
}

#[derive(Clone, Copy, Debug)]
pub struct Error {
    kind: Kind,
    status: Option<StatusCode>,
    code: &'static str,
    message: &'static str,
}

pub type Result<T = ()> = std::result::Result<T, Error>;

impl Error {
    #[inline]
    const fn new(kind: Kind, code: &'static str, message: &'static str) -> Error {
        Self {
            kind,
            status: None,
            code,
            message,
        }
    }

    /// Attaches the status code the store answered with.
    #[inline]
    pub const fn with_status(mut self, status: StatusCode) -> Error {
        self.status = Some(status);
        self
    }

    #[inline]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    #[inline]
    pub const fn status(&self) -> Option<StatusCode> {
        self.status
    }

    #[inline]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    #[inline]
    pub fn is_persistence(&self) -> bool {
        self.kind == Kind::Persistence
    }

    #[inline]
    pub fn is_validation(&self) -> bool {
        self.kind == Kind::Validation
    }
}

/// Two errors are the same error when their codes match, regardless of the
/// status that was attached.
impl PartialEq for Error {
    fn eq(&self, other: &Error) -> bool {
        self.code == other.code
    }
}

impl Eq for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;

        if let Some(status) = self.status {
            write!(f, " ({status})")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

macro_rules! const_error {
    (
        #[error($code:literal, $msg:literal)]
        #[kind($kind:ident)]
        const $name:ident;
    ) => {
        pub const $name: $crate::error::Error =
            $crate::error::Error::new($crate::error::Kind::$kind, $code, $msg);
    };
}

#[allow(clippy::useless_attribute)]
#[allow(clippy::needless_pub_self)]
pub(self) use const_error;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status() {
        let error = STORE_RESPONSE.with_status(StatusCode::UNAUTHORIZED);

        assert_eq!(
            error.to_string(),
            "E101: the store rejected the request (401 Unauthorized)"
        );
        assert_eq!(error.kind(), Kind::Persistence);
    }

    #[test]
    fn status_does_not_change_identity() {
        let error = STORE_RESPONSE.with_status(StatusCode::BAD_GATEWAY);

        assert_eq!(error, STORE_RESPONSE);
        assert_ne!(error, STORE_DECODE);
    }
}
