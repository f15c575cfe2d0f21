use std::str::FromStr;

use crate::domain::RawReply;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("reply is missing field #{index}")]
    MissingField { index: usize },

    #[error("reply field #{index} is not valid: {value:?}")]
    InvalidField { index: usize, value: String },
}

/// Split a `fmt=1` reply body into its fields, verbatim.
pub fn split_reply(body: &str) -> RawReply {
    RawReply::new(body.split(',').map(str::to_owned).collect())
}

pub(super) fn field<'a>(reply: &'a RawReply, index: usize) -> Result<&'a str, TransportError> {
    reply
        .get(index)
        .map(str::trim)
        .ok_or(TransportError::MissingField { index })
}

pub(super) fn number<T: FromStr>(reply: &RawReply, index: usize) -> Result<T, TransportError> {
    let value = field(reply, index)?;
    value.parse().map_err(|_| TransportError::InvalidField {
        index,
        value: value.to_owned(),
    })
}
