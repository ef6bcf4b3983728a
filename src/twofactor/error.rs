use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("not a trusted-device cookie: {name}")]
    MalformedTokenCookie { name: String },
}
