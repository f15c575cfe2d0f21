use super::encoding::quote;
use super::reply::{TransportError, field, number};
use crate::domain::{
    CheckStatus, Charset, DeliveryStatus, ErrorCode, HlrReply, MessageId, MessageStatus,
    RawPhoneNumber, RawReply, StatusDetails, StatusReport, UnixTimestamp,
};

/// Field count of an extended status reply; the last one is the message text.
const EXTENDED_FIELDS: usize = 9;
/// Position of the `HLR` marker in HLR lookup replies.
const HLR_MARKER_INDEX: usize = 14;
const HLR_MARKER: &str = "HLR";

/// Decoded `status` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusReply {
    Report(StatusReport),
    Rejected { code: ErrorCode },
}

pub fn encode_status_query(request: &CheckStatus, charset: Charset) -> String {
    format!(
        "{}={}&{}={}&all={}",
        RawPhoneNumber::STATUS_FIELD,
        quote(request.phone().raw(), charset),
        MessageId::FIELD,
        request.id(),
        u8::from(request.is_extended()),
    )
}

/// Undo the split of commas inside the trailing message text of an extended reply.
///
/// HLR replies carry more than nine fields by design and are left untouched.
pub fn reassemble_status_reply(reply: RawReply, extended: bool) -> RawReply {
    let fields = reply.fields();
    let needs_rejoin = extended
        && fields.len() > EXTENDED_FIELDS
        && fields
            .get(HLR_MARKER_INDEX)
            .is_none_or(|marker| marker != HLR_MARKER);
    if !needs_rejoin {
        return reply;
    }

    let line = reply.to_line();
    RawReply::new(
        line.splitn(EXTENDED_FIELDS, ',')
            .map(str::to_owned)
            .collect(),
    )
}

fn is_hlr(reply: &RawReply) -> bool {
    reply
        .get(HLR_MARKER_INDEX)
        .is_some_and(|marker| marker == HLR_MARKER)
}

fn timestamp(reply: &RawReply, index: usize) -> Result<Option<UnixTimestamp>, TransportError> {
    let secs: u64 = number(reply, index)?;
    Ok((secs > 0).then(|| UnixTimestamp::new(secs)))
}

/// Interpret `status,change_time,error[,...]` or `0,-error`.
///
/// Expects a reply already passed through [`reassemble_status_reply`].
pub fn decode_status_reply(
    request: &CheckStatus,
    reply: &RawReply,
) -> Result<StatusReply, TransportError> {
    let second: i64 = number(reply, 1)?;
    if second < 0 {
        let code = i32::try_from(-second).map_err(|_| TransportError::InvalidField {
            index: 1,
            value: second.to_string(),
        })?;
        return Ok(StatusReply::Rejected {
            code: ErrorCode::new(code),
        });
    }

    let mut status = MessageStatus {
        status: DeliveryStatus::new(number(reply, 0)?),
        changed_at: timestamp(reply, 1)?,
        error_code: number(reply, 2)?,
        details: None,
    };

    if is_hlr(reply) {
        return Ok(StatusReply::Report(StatusReport::Hlr(HlrReply {
            status,
            fields: reply.clone(),
        })));
    }

    if request.is_extended() && reply.len() >= EXTENDED_FIELDS {
        let message = reply
            .get(EXTENDED_FIELDS - 1)
            .unwrap_or_default()
            .trim_end_matches(['\r', '\n']);
        status.details = Some(StatusDetails {
            sent_at: timestamp(reply, 3)?,
            phone: field(reply, 4)?.to_owned(),
            cost: field(reply, 5)?.to_owned(),
            sender: field(reply, 6)?.to_owned(),
            status_name: field(reply, 7)?.to_owned(),
            message: message.to_owned(),
        });
    }

    Ok(StatusReply::Report(StatusReport::Message(status)))
}
