use crate::domain::validation::ValidationError;
use crate::domain::value::{
    DeliveryTime, ExtraQuery, MessageId, MessageText, RawPhoneNumber, SenderName,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Transliteration of non-Latin text before sending (`translit`).
pub enum Translit {
    #[default]
    Off,
    /// Plain Latin transliteration (`translit=1`).
    Latin,
    /// "mpaksms" style transliteration (`translit=2`).
    Mpaksms,
}

impl Translit {
    /// Query field name used by SMSC.RU (`translit`).
    pub const FIELD: &'static str = "translit";

    /// Numeric mode sent to the gateway.
    pub fn value(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Latin => 1,
            Self::Mpaksms => 2,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub translit: Translit,
    pub time: Option<DeliveryTime>,
    pub id: Option<MessageId>,
    pub sender: Option<SenderName>,
    pub query: Option<ExtraQuery>,
}

#[derive(Debug, Clone)]
pub struct SendSms {
    recipients: Vec<RawPhoneNumber>,
    message: MessageText,
    options: SendOptions,
}

impl SendSms {
    pub fn new(
        recipients: Vec<RawPhoneNumber>,
        message: MessageText,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }
        Ok(Self {
            recipients,
            message,
            options,
        })
    }

    pub fn one(recipient: RawPhoneNumber, message: MessageText) -> Self {
        Self {
            recipients: vec![recipient],
            message,
            options: SendOptions::default(),
        }
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

#[derive(Debug, Clone)]
pub struct CheckStatus {
    id: MessageId,
    phone: RawPhoneNumber,
    extended: bool,
}

impl CheckStatus {
    pub fn new(id: MessageId, phone: RawPhoneNumber) -> Self {
        Self {
            id,
            phone,
            extended: false,
        }
    }

    /// Also ask for send time, phone, cost, sender, status name and message text (`all=1`).
    pub fn extended(mut self) -> Self {
        self.extended = true;
        self
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn phone(&self) -> &RawPhoneNumber {
        &self.phone
    }

    pub fn is_extended(&self) -> bool {
        self.extended
    }
}
