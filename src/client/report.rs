//! Human-readable reports of gateway replies, emitted when `debug` is enabled.

use crate::domain::{CheckStatus, RawReply, StatusReport};
use crate::transport::{SendReply, StatusReply, decode_send_reply, decode_status_reply};

pub(super) fn send(reply: &RawReply) {
    match decode_send_reply(reply) {
        Ok(SendReply::Sent(receipt)) => tracing::info!(
            id = receipt.id.value(),
            sms_count = receipt.sms_count,
            cost = %receipt.cost,
            balance = %receipt.balance,
            "message sent: id {}, {} sms, cost {}, balance {}",
            receipt.id,
            receipt.sms_count,
            receipt.cost,
            receipt.balance,
        ),
        Ok(SendReply::Rejected { code, id: Some(id) }) => tracing::warn!(
            code = code.as_i32(),
            id = id.value(),
            "send failed: error {code}, id {id}"
        ),
        Ok(SendReply::Rejected { code, id: None }) => {
            tracing::warn!(code = code.as_i32(), "send failed: error {code}")
        }
        Err(err) => tracing::warn!(reply = %reply.to_line(), "unexpected send reply: {err}"),
    }
}

pub(super) fn status(request: &CheckStatus, reply: &RawReply) {
    match decode_status_reply(request, reply) {
        Ok(StatusReply::Report(report)) => {
            let hlr = matches!(report, StatusReport::Hlr(_));
            let status = report.status();
            match status.changed_at.and_then(|at| at.to_local()) {
                Some(changed_at) => tracing::info!(
                    status = status.status.as_i32(),
                    hlr,
                    "status {}, changed at {}",
                    status.status.as_i32(),
                    changed_at.format("%Y-%m-%d %H:%M:%S"),
                ),
                None => tracing::info!(
                    status = status.status.as_i32(),
                    hlr,
                    "status {}",
                    status.status.as_i32()
                ),
            }
        }
        Ok(StatusReply::Rejected { code }) => {
            tracing::warn!(code = code.as_i32(), "status failed: error {code}")
        }
        Err(err) => tracing::warn!(reply = %reply.to_line(), "unexpected status reply: {err}"),
    }
}
