use super::{Error, STORE_DECODE, STORE_REQUEST};

impl From<reqwest::Error> for Error {
    #[inline]
    fn from(error: reqwest::Error) -> Self {
        error!("store request error: {:?}", error);

        match error.status() {
            Some(status) => STORE_REQUEST.with_status(status),
            None => STORE_REQUEST,
        }
    }
}

impl From<serde_json::Error> for Error {
    #[inline]
    fn from(error: serde_json::Error) -> Self {
        error!("failed to decode store rows: {:?}", error);
        STORE_DECODE
    }
}
