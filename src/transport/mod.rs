//! Transport layer: wire-format details of the `fmt=1` protocol (query encoding, reply splitting).

mod encoding;
mod reply;
mod send;
mod status;

pub use encoding::quote;
pub use reply::split_reply;
pub use send::{SendReply, decode_send_reply, encode_send_query};
pub use status::{StatusReply, decode_status_reply, encode_status_query, reassemble_status_reply};
