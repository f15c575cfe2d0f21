//! Typed Rust client for the SMSC.RU HTTP gateway.
//!
//! Two operations are exposed: sending a message over one of the gateway channels (SMS, flash,
//! viber, telegram, voice call, ...) and querying its delivery status. Requests go to the primary
//! host first and fall back to the numbered mirrors on transport failure.
//!
//! The crate is split into a domain layer of validated types, a private transport layer for the
//! `fmt=1` wire format, and a small client layer orchestrating requests.
//!
//! ```rust,no_run
//! use smsc::{CheckStatus, Credentials, MessageText, RawPhoneNumber, SendSms, SmscClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsc::SmscError> {
//!     let client = SmscClient::new(Credentials::api_key("...")?);
//!     let phone = RawPhoneNumber::new("79991234567")?;
//!     let receipt = client
//!         .send(SendSms::one(phone.clone(), MessageText::new("hello")?))
//!         .await?;
//!     let _report = client.status(CheckStatus::new(receipt.id, phone)).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    ClientConfig, ClientSettings, ConfigError, Credentials, GatewayHost, SmscClient,
    SmscClientBuilder, SmscError,
};
pub use domain::{
    ApiKey, Charset, CheckStatus, DeliveryStatus, DeliveryTime, ErrorCode, ExtraQuery, HlrReply,
    KnownDeliveryStatus, KnownSendError, KnownStatusError, Login, MessageCategory, MessageId,
    MessageStatus, MessageText, Password, PhoneNumber, RawPhoneNumber, RawReply, SendOptions,
    SendReceipt, SendSms, SenderName, StatusDetails, StatusReport, Translit, UnixTimestamp,
    ValidationError,
};
