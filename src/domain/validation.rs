use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    ContainsSeparator { field: &'static str, input: String },
    InvalidPhoneNumber { input: String },
    MessageIdOutOfRange { min: u32, max: u32, actual: i64 },
    InvalidMessageId { input: String },
    UnknownCategory { index: u8 },
    UnknownCategoryName { name: String },
    UnknownCharset { name: String },
    InvalidHost { host: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::ContainsSeparator { field, input } => {
                write!(f, "{field} must not contain ',': {input}")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::MessageIdOutOfRange { min, max, actual } => {
                write!(
                    f,
                    "message id out of range: {actual} (expected {min}..={max})"
                )
            }
            Self::InvalidMessageId { input } => write!(f, "invalid message id: {input}"),
            Self::UnknownCategory { index } => write!(f, "unknown message category: {index}"),
            Self::UnknownCategoryName { name } => {
                write!(f, "unknown message category: {name}")
            }
            Self::UnknownCharset { name } => write!(f, "unsupported charset: {name}"),
            Self::InvalidHost { host } => write!(f, "invalid gateway host: {host}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "phones" };
        assert_eq!(err.to_string(), "phones must not be empty");

        let err = ValidationError::ContainsSeparator {
            field: "phones",
            input: "1,2".to_owned(),
        };
        assert_eq!(err.to_string(), "phones must not contain ',': 1,2");

        let err = ValidationError::MessageIdOutOfRange {
            min: 1,
            max: 10,
            actual: 11,
        };
        assert_eq!(
            err.to_string(),
            "message id out of range: 11 (expected 1..=10)"
        );

        let err = ValidationError::UnknownCharset {
            name: "latin-9".to_owned(),
        };
        assert_eq!(err.to_string(), "unsupported charset: latin-9");
    }
}
