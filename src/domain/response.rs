use crate::domain::value::{DeliveryStatus, MessageId, UnixTimestamp};

/// Reply fields exactly as the gateway returned them, split on `,`.
///
/// Field meaning depends on the command and request flags. When every attempt failed this holds a
/// single empty field, see [`RawReply::is_unreachable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply(Vec<String>);

impl RawReply {
    pub fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    /// Placeholder reply used when no attempt produced a body.
    pub fn unreachable() -> Self {
        Self(vec![String::new()])
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self.0.as_slice(), [only] if only.is_empty())
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_fields(self) -> Vec<String> {
        self.0
    }

    /// Rejoin the fields into the reply line.
    pub fn to_line(&self) -> String {
        self.0.join(",")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    pub id: MessageId,
    pub sms_count: u32,
    /// Cost as printed by the gateway.
    pub cost: String,
    /// Remaining balance as printed by the gateway.
    pub balance: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageStatus {
    pub status: DeliveryStatus,
    /// `None` when the gateway reports `0`.
    pub changed_at: Option<UnixTimestamp>,
    /// Per-part error code reported alongside the status.
    pub error_code: i32,
    pub details: Option<StatusDetails>,
}

/// Extra fields returned for extended (`all=1`) status requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDetails {
    pub sent_at: Option<UnixTimestamp>,
    pub phone: String,
    pub cost: String,
    pub sender: String,
    pub status_name: String,
    /// Message text; may contain commas.
    pub message: String,
}

/// HLR lookup reply. The leading status fields are parsed; the rest is kept raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HlrReply {
    pub status: MessageStatus,
    pub fields: RawReply,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusReport {
    Message(MessageStatus),
    Hlr(HlrReply),
}

impl StatusReport {
    /// Status fields common to both reply shapes.
    pub fn status(&self) -> &MessageStatus {
        match self {
            Self::Message(status) => status,
            Self::Hlr(hlr) => &hlr.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_reply_is_single_empty_field() {
        let reply = RawReply::unreachable();
        assert!(reply.is_unreachable());
        assert_eq!(reply.len(), 1);
        assert_eq!(reply.get(0), Some(""));

        let reply = RawReply::new(vec![String::new(), String::new()]);
        assert!(!reply.is_unreachable());
    }

    #[test]
    fn to_line_rejoins_fields() {
        let reply = RawReply::new(vec!["1".to_owned(), "-3".to_owned()]);
        assert_eq!(reply.to_line(), "1,-3");
        assert_eq!(reply.into_fields(), vec!["1", "-3"]);
    }
}
