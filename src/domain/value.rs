use chrono::{DateTime, Local};
use phonenumber::country;

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// SMSC.RU API key (`apikey`).
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// Query field name used by SMSC.RU (`apikey`).
    pub const FIELD: &'static str = "apikey";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMSC.RU account login.
///
/// Invariant: non-empty after trimming.
pub struct Login(String);

impl Login {
    /// Query field name used by SMSC.RU (`login`).
    pub const FIELD: &'static str = "login";

    /// Create a validated [`Login`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated login.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// SMSC.RU account password (`psw`).
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Query field name used by SMSC.RU (`psw`).
    pub const FIELD: &'static str = "psw";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender name, or bot name when sending through [`MessageCategory::Bot`].
///
/// Invariant: non-empty after trimming. The value must be registered in your SMSC.RU account.
///
/// [`MessageCategory::Bot`]: crate::MessageCategory::Bot
pub struct SenderName(String);

impl SenderName {
    /// Query field name used by SMSC.RU (`sender`).
    pub const FIELD: &'static str = "sender";
    /// Query field name used for bot messages (`bot`).
    pub const BOT_FIELD: &'static str = "bot";

    /// Create a validated [`SenderName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message text (`mes`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Query field name used by SMSC.RU (`mes`).
    pub const FIELD: &'static str = "mes";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Caller-supplied or gateway-assigned message id (`id`).
///
/// Invariant: `1..=2147483647`.
pub struct MessageId(u32);

impl MessageId {
    /// Query field name used by SMSC.RU (`id`).
    pub const FIELD: &'static str = "id";

    /// Minimum allowed id.
    pub const MIN: u32 = 1;
    /// Maximum allowed id.
    pub const MAX: u32 = 2_147_483_647;

    /// Create a validated message id.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::MessageIdOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Parse a message id as it appears in a gateway reply.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| ValidationError::InvalidMessageId {
                input: trimmed.to_owned(),
            })?;
        let value = u32::try_from(value).map_err(|_| ValidationError::MessageIdOutOfRange {
            min: Self::MIN,
            max: Self::MAX,
            actual: value,
        })?;
        Self::new(value)
    }

    /// Get the underlying id.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number as sent to SMSC.RU.
///
/// Invariant: non-empty after trimming and free of `,` (the gateway's list separator).
/// This type does not normalize; if you want E.164 normalization, parse into
/// [`PhoneNumber`] and convert it into [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Query field name used by SMSC.RU in `send` (`phones`).
    pub const FIELD: &'static str = "phones";
    /// Query field name used by SMSC.RU in `status` (`phone`).
    pub const STATUS_FIELD: &'static str = "phone";

    /// Create a validated raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if trimmed.contains(',') {
            return Err(ValidationError::ContainsSeparator {
                field: Self::FIELD,
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to SMSC.RU.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number to a normalized raw value (E.164).
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Delivery time (`time`) in one of the gateway formats.
///
/// Passed through verbatim. SMSC.RU accepts `DDMMYYhhmm`, `h1-h2`, `0ts` and `+m`.
pub struct DeliveryTime(String);

impl DeliveryTime {
    /// Query field name used by SMSC.RU (`time`).
    pub const FIELD: &'static str = "time";

    /// Create a validated [`DeliveryTime`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Send at an absolute unix time (`0ts` form).
    pub fn at(timestamp: UnixTimestamp) -> Self {
        Self(format!("0{}", timestamp.value()))
    }

    /// Send after a delay in minutes (`+m` form).
    pub fn after_minutes(minutes: u32) -> Self {
        Self(format!("+{minutes}"))
    }

    /// Borrow the raw value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Extra raw query parameters appended to a `send` request (`valid=01:00&maxsms=3`).
///
/// Appended verbatim, without percent-encoding.
pub struct ExtraQuery(String);

impl ExtraQuery {
    /// Create a validated fragment. A leading `&` is stripped.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim().trim_start_matches('&');
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "query" });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the fragment.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unix timestamp in seconds.
pub struct UnixTimestamp(u64);

impl UnixTimestamp {
    /// Create a timestamp value (no range validation is performed).
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the underlying timestamp in seconds.
    pub fn value(self) -> u64 {
        self.0
    }

    /// Wall-clock time in the local timezone, if representable.
    pub fn to_local(self) -> Option<DateTime<Local>> {
        let secs = i64::try_from(self.0).ok()?;
        DateTime::from_timestamp(secs, 0).map(|utc| utc.with_timezone(&Local))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Vendor error code reported as a negative number in a reply.
///
/// Stored without the sign. The taxonomy depends on the command, see
/// [`ErrorCode::send_kind`] and [`ErrorCode::status_kind`].
pub struct ErrorCode(i32);

impl ErrorCode {
    /// Construct an error code from its (positive) integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Interpret the code as a `send` error.
    pub fn send_kind(self) -> Option<KnownSendError> {
        KnownSendError::from_code(self.0)
    }

    /// Interpret the code as a `status` error.
    pub fn status_kind(self) -> Option<KnownStatusError> {
        KnownStatusError::from_code(self.0)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known error codes for `send`.
pub enum KnownSendError {
    InvalidParameters,
    InvalidCredentials,
    InsufficientFunds,
    IpBlocked,
    InvalidDateFormat,
    MessageForbidden,
    InvalidPhoneFormat,
    Undeliverable,
    TooManyRequests,
}

impl KnownSendError {
    /// Convert a raw error code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            1 => Self::InvalidParameters,
            2 => Self::InvalidCredentials,
            3 => Self::InsufficientFunds,
            4 => Self::IpBlocked,
            5 => Self::InvalidDateFormat,
            6 => Self::MessageForbidden,
            7 => Self::InvalidPhoneFormat,
            8 => Self::Undeliverable,
            9 => Self::TooManyRequests,
            _ => return None,
        })
    }

    /// Whether repeating the same request later may succeed.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::IpBlocked | Self::TooManyRequests)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known error codes for `status`.
pub enum KnownStatusError {
    InvalidParameters,
    InvalidCredentials,
    MessageNotFound,
    IpBlocked,
    DeleteFailed,
    TooManyRequests,
}

impl KnownStatusError {
    /// Convert a raw error code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            1 => Self::InvalidParameters,
            2 => Self::InvalidCredentials,
            3 => Self::MessageNotFound,
            4 => Self::IpBlocked,
            5 => Self::DeleteFailed,
            9 => Self::TooManyRequests,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Delivery status code returned by `status`.
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct DeliveryStatus(i32);

impl DeliveryStatus {
    /// Construct a status from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by SMSC.RU.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known status, if one exists.
    pub fn known_kind(self) -> Option<KnownDeliveryStatus> {
        KnownDeliveryStatus::from_code(self.0)
    }

    /// Returns `true` if the gateway will not change this status anymore.
    pub fn is_final(self) -> bool {
        matches!(self.known_kind(), Some(kind) if kind.is_final())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known delivery statuses.
pub enum KnownDeliveryStatus {
    NotFound,
    Pending,
    TransferredToOperator,
    Delivered,
    Read,
    Expired,
    LinkClicked,
    Undeliverable,
    InvalidNumber,
    Forbidden,
    InsufficientFunds,
    UnavailableNumber,
}

impl KnownDeliveryStatus {
    /// Convert a raw status code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            -3 => Self::NotFound,
            -1 => Self::Pending,
            0 => Self::TransferredToOperator,
            1 => Self::Delivered,
            2 => Self::Read,
            3 => Self::Expired,
            4 => Self::LinkClicked,
            20 => Self::Undeliverable,
            22 => Self::InvalidNumber,
            23 => Self::Forbidden,
            24 => Self::InsufficientFunds,
            25 => Self::UnavailableNumber,
            _ => return None,
        })
    }

    pub fn is_final(self) -> bool {
        !matches!(
            self,
            Self::NotFound | Self::Pending | Self::TransferredToOperator
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let key = ApiKey::new("  key ").unwrap();
        assert_eq!(key.as_str(), "key");
        assert!(ApiKey::new("  ").is_err());

        let login = Login::new(" user ").unwrap();
        assert_eq!(login.as_str(), "user");
        assert!(Login::new("").is_err());

        let password = Password::new(" secret ").unwrap();
        assert_eq!(password.as_str(), " secret ");
        assert!(Password::new("").is_err());

        let sender = SenderName::new(" shop ").unwrap();
        assert_eq!(sender.as_str(), "shop");

        let msg = MessageText::new(" hi ").unwrap();
        assert_eq!(msg.as_str(), " hi ");
        assert!(MessageText::new("  ").is_err());

        let query = ExtraQuery::new("&valid=01:00&maxsms=3").unwrap();
        assert_eq!(query.as_str(), "valid=01:00&maxsms=3");
        assert!(ExtraQuery::new("&").is_err());
    }

    #[test]
    fn secrets_debug_is_redacted() {
        let password = Password::new("hunter2").unwrap();
        assert_eq!(format!("{password:?}"), "Password(***)");

        let key = ApiKey::new("sk-live-123").unwrap();
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
    }

    #[test]
    fn raw_phone_number_rejects_list_separator() {
        let raw = RawPhoneNumber::new(" +79251234567 ").unwrap();
        assert_eq!(raw.raw(), "+79251234567");
        assert!(RawPhoneNumber::new("").is_err());
        assert!(matches!(
            RawPhoneNumber::new("79251234567,79251234568"),
            Err(ValidationError::ContainsSeparator { .. })
        ));
    }

    #[test]
    fn phone_number_parsing_and_equality_use_e164() {
        let p1 = PhoneNumber::parse(None, "+79251234567").unwrap();
        let p2 = PhoneNumber::parse(None, "+7 925 123-45-67").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+79251234567");

        let raw: RawPhoneNumber = p2.into();
        assert_eq!(raw.raw(), "+79251234567");
        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
    }

    #[test]
    fn message_id_enforces_range() {
        assert!(MessageId::new(MessageId::MIN).is_ok());
        assert!(MessageId::new(MessageId::MAX).is_ok());
        assert!(MessageId::new(0).is_err());
        assert!(MessageId::new(MessageId::MAX + 1).is_err());

        assert_eq!(MessageId::parse(" 42 ").unwrap().value(), 42);
        assert!(matches!(
            MessageId::parse("-5"),
            Err(ValidationError::MessageIdOutOfRange { actual: -5, .. })
        ));
        assert!(matches!(
            MessageId::parse("abc"),
            Err(ValidationError::InvalidMessageId { .. })
        ));
    }

    #[test]
    fn delivery_time_helpers_use_vendor_forms() {
        assert_eq!(
            DeliveryTime::at(UnixTimestamp::new(1_600_000_000)).as_str(),
            "01600000000"
        );
        assert_eq!(DeliveryTime::after_minutes(30).as_str(), "+30");
        assert_eq!(DeliveryTime::new(" 10-18 ").unwrap().as_str(), "10-18");
    }

    #[test]
    fn error_code_taxonomy_depends_on_command() {
        let code = ErrorCode::new(3);
        assert_eq!(code.send_kind(), Some(KnownSendError::InsufficientFunds));
        assert_eq!(code.status_kind(), Some(KnownStatusError::MessageNotFound));
        assert!(ErrorCode::new(9).send_kind().unwrap().is_retryable());
        assert_eq!(ErrorCode::new(77).send_kind(), None);
    }

    #[test]
    fn delivery_status_known_mapping() {
        assert_eq!(
            DeliveryStatus::new(1).known_kind(),
            Some(KnownDeliveryStatus::Delivered)
        );
        assert!(DeliveryStatus::new(1).is_final());
        assert!(!DeliveryStatus::new(-1).is_final());
        assert!(!DeliveryStatus::new(999).is_final());
    }

    #[test]
    fn unix_timestamp_converts_to_local_time() {
        let local = UnixTimestamp::new(1_600_000_000).to_local().unwrap();
        assert_eq!(local.timestamp(), 1_600_000_000);
    }
}
