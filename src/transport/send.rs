use super::encoding::quote;
use super::reply::{TransportError, field, number};
use crate::domain::{
    Charset, DeliveryTime, ErrorCode, MessageCategory, MessageId, MessageText, RawPhoneNumber,
    RawReply, SendReceipt, SendSms, Translit,
};

/// Decoded `send` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendReply {
    Sent(SendReceipt),
    Rejected {
        code: ErrorCode,
        id: Option<MessageId>,
    },
}

/// Build the command-specific part of a `send` query.
///
/// `cost=3` asks the gateway to answer with `id,sms_count,cost,balance`.
pub fn encode_send_query(request: &SendSms, category: MessageCategory, charset: Charset) -> String {
    let phones = request
        .recipients()
        .iter()
        .map(RawPhoneNumber::raw)
        .collect::<Vec<_>>()
        .join(",");

    let mut query = format!(
        "cost=3&{}={}&{}={}",
        RawPhoneNumber::FIELD,
        quote(&phones, charset),
        MessageText::FIELD,
        quote(request.message().as_str(), charset),
    );

    let options = request.options();
    if options.translit != Translit::Off {
        push_pair(&mut query, Translit::FIELD, &options.translit.value().to_string());
    }
    if let Some(id) = options.id {
        push_pair(&mut query, MessageId::FIELD, &id.to_string());
    }
    if let Some(flag) = category.query_flag() {
        query.push('&');
        query.push_str(flag);
    }
    if let Some(sender) = options.sender.as_ref() {
        push_pair(
            &mut query,
            category.sender_field(),
            &quote(sender.as_str(), charset),
        );
    }
    if let Some(time) = options.time.as_ref() {
        push_pair(&mut query, DeliveryTime::FIELD, &quote(time.as_str(), charset));
    }
    if let Some(extra) = options.query.as_ref() {
        query.push('&');
        query.push_str(extra.as_str());
    }

    query
}

fn push_pair(query: &mut String, key: &str, encoded_value: &str) {
    query.push('&');
    query.push_str(key);
    query.push('=');
    query.push_str(encoded_value);
}

/// Interpret `id,sms_count,cost,balance` or `id,-error`.
pub fn decode_send_reply(reply: &RawReply) -> Result<SendReply, TransportError> {
    let second: i64 = number(reply, 1)?;

    if second < 0 {
        let code = i32::try_from(-second).map_err(|_| TransportError::InvalidField {
            index: 1,
            value: second.to_string(),
        })?;
        let id = field(reply, 0).ok().and_then(|raw| MessageId::parse(raw).ok());
        return Ok(SendReply::Rejected {
            code: ErrorCode::new(code),
            id,
        });
    }

    let sms_count = u32::try_from(second)
        .ok()
        .filter(|count| *count > 0)
        .ok_or_else(|| TransportError::InvalidField {
            index: 1,
            value: second.to_string(),
        })?;
    let raw_id = field(reply, 0)?;
    let id = MessageId::parse(raw_id).map_err(|_| TransportError::InvalidField {
        index: 0,
        value: raw_id.to_owned(),
    })?;

    Ok(SendReply::Sent(SendReceipt {
        id,
        sms_count,
        cost: field(reply, 2)?.to_owned(),
        balance: field(reply, 3)?.to_owned(),
    }))
}
