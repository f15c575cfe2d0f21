use std::str::FromStr;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Delivery channel of a `send` request.
///
/// Each channel except [`MessageCategory::Sms`] and [`MessageCategory::Bot`] adds a flag to the
/// query. [`MessageCategory::Bot`] instead moves the sender name under the `bot` parameter.
pub enum MessageCategory {
    #[default]
    Sms,
    Flash,
    Push,
    Hlr,
    Binary,
    BinaryHex,
    Ping,
    Mms,
    Mail,
    Call,
    Viber,
    Social,
    Bot,
    Telegram,
}

impl MessageCategory {
    const ALL: [Self; 14] = [
        Self::Sms,
        Self::Flash,
        Self::Push,
        Self::Hlr,
        Self::Binary,
        Self::BinaryHex,
        Self::Ping,
        Self::Mms,
        Self::Mail,
        Self::Call,
        Self::Viber,
        Self::Social,
        Self::Bot,
        Self::Telegram,
    ];

    /// Look up a channel by the gateway's numeric sending type (`0` = SMS ... `13` = Telegram).
    pub fn from_index(index: u8) -> Result<Self, ValidationError> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(ValidationError::UnknownCategory { index })
    }

    /// Numeric sending type of this channel.
    pub fn index(self) -> u8 {
        match self {
            Self::Sms => 0,
            Self::Flash => 1,
            Self::Push => 2,
            Self::Hlr => 3,
            Self::Binary => 4,
            Self::BinaryHex => 5,
            Self::Ping => 6,
            Self::Mms => 7,
            Self::Mail => 8,
            Self::Call => 9,
            Self::Viber => 10,
            Self::Social => 11,
            Self::Bot => 12,
            Self::Telegram => 13,
        }
    }

    /// Lowercase name, accepted back by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Flash => "flash",
            Self::Push => "push",
            Self::Hlr => "hlr",
            Self::Binary => "bin",
            Self::BinaryHex => "bin-hex",
            Self::Ping => "ping",
            Self::Mms => "mms",
            Self::Mail => "mail",
            Self::Call => "call",
            Self::Viber => "viber",
            Self::Social => "soc",
            Self::Bot => "bot",
            Self::Telegram => "tg",
        }
    }

    /// Channel flag appended to a `send` query, if any.
    pub fn query_flag(self) -> Option<&'static str> {
        match self {
            Self::Sms | Self::Bot => None,
            Self::Flash => Some("flash=1"),
            Self::Push => Some("push=1"),
            Self::Hlr => Some("hlr=1"),
            Self::Binary => Some("bin=1"),
            Self::BinaryHex => Some("bin=2"),
            Self::Ping => Some("ping=1"),
            Self::Mms => Some("mms=1"),
            Self::Mail => Some("mail=1"),
            Self::Call => Some("call=1"),
            Self::Viber => Some("viber=1"),
            Self::Social => Some("soc=1"),
            Self::Telegram => Some("tg=1"),
        }
    }

    /// Query field that carries the sender name for this channel.
    pub fn sender_field(self) -> &'static str {
        match self {
            Self::Bot => crate::domain::SenderName::BOT_FIELD,
            _ => crate::domain::SenderName::FIELD,
        }
    }
}

impl FromStr for MessageCategory {
    type Err = ValidationError;

    /// Accepts either a channel name (`viber`, `tg`, ...) or its numeric sending type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<u8>() {
            return Self::from_index(index);
        }
        let lower = trimmed.to_ascii_lowercase();
        let alias = match lower.as_str() {
            "telegram" => "tg",
            "social" => "soc",
            "binary" => "bin",
            other => other,
        };
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.name() == alias)
            .ok_or(ValidationError::UnknownCategoryName { name: lower })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_every_channel() {
        for category in MessageCategory::ALL {
            assert_eq!(
                MessageCategory::from_index(category.index()).unwrap(),
                category
            );
        }
        assert!(matches!(
            MessageCategory::from_index(14),
            Err(ValidationError::UnknownCategory { index: 14 })
        ));
    }

    #[test]
    fn flags_follow_gateway_sending_types() {
        assert_eq!(MessageCategory::Sms.query_flag(), None);
        assert_eq!(
            MessageCategory::from_index(1).unwrap().query_flag(),
            Some("flash=1")
        );
        assert_eq!(
            MessageCategory::from_index(10).unwrap().query_flag(),
            Some("viber=1")
        );
        assert_eq!(MessageCategory::Bot.query_flag(), None);
        assert_eq!(MessageCategory::Telegram.query_flag(), Some("tg=1"));
    }

    #[test]
    fn bot_moves_sender_under_bot_field() {
        assert_eq!(MessageCategory::Bot.sender_field(), "bot");
        assert_eq!(MessageCategory::Viber.sender_field(), "sender");
    }

    #[test]
    fn parses_names_aliases_and_indexes() {
        assert_eq!(
            "Telegram".parse::<MessageCategory>().unwrap(),
            MessageCategory::Telegram
        );
        assert_eq!(
            "12".parse::<MessageCategory>().unwrap(),
            MessageCategory::Bot
        );
        assert_eq!(
            "bin-hex".parse::<MessageCategory>().unwrap(),
            MessageCategory::BinaryHex
        );
        assert!("fax".parse::<MessageCategory>().is_err());
    }
}
