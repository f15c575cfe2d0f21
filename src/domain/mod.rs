//! Domain layer: strong types with validation and invariants (no I/O).

mod category;
mod charset;
mod request;
mod response;
mod validation;
mod value;

pub use category::MessageCategory;
pub use charset::Charset;
pub use request::{CheckStatus, SendOptions, SendSms, Translit};
pub use response::{HlrReply, MessageStatus, RawReply, SendReceipt, StatusDetails, StatusReport};
pub use validation::ValidationError;
pub use value::{
    ApiKey, DeliveryStatus, DeliveryTime, ErrorCode, ExtraQuery, KnownDeliveryStatus,
    KnownSendError, KnownStatusError, Login, MessageId, MessageText, Password, PhoneNumber,
    RawPhoneNumber, SenderName, UnixTimestamp,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_rejects_empty() {
        assert!(matches!(
            ApiKey::new("   "),
            Err(ValidationError::Empty {
                field: ApiKey::FIELD
            })
        ));
    }

    #[test]
    fn phone_number_parses_with_region_and_trims() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::RU), " 79251234567 ").unwrap();
        assert_eq!(pn.raw(), "79251234567");
    }

    #[test]
    fn send_requires_recipients() {
        let msg = MessageText::new("hi").unwrap();
        let err = SendSms::new(Vec::new(), msg, SendOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Empty {
                field: RawPhoneNumber::FIELD
            }
        ));
    }

    #[test]
    fn check_status_is_plain_unless_extended() {
        let id = MessageId::new(7).unwrap();
        let phone = RawPhoneNumber::new("79251234567").unwrap();
        let request = CheckStatus::new(id, phone.clone());
        assert!(!request.is_extended());
        assert!(CheckStatus::new(id, phone).extended().is_extended());
    }

    #[test]
    fn translit_modes_map_to_vendor_values() {
        assert_eq!(Translit::Off.value(), 0);
        assert_eq!(Translit::Latin.value(), 1);
        assert_eq!(Translit::Mpaksms.value(), 2);
    }
}
