//! Message Parser, request side: validates the header, walks the question section strictly, and
//! stores one [`Transaction`] per request.

use crate::cursor::Cursor;
use crate::error::{DecodeError, FrameResult};
use crate::events::DecoderEvent;
use crate::header::DnsHeader;
use crate::name::Strictness;
use crate::question::{read_question, Query};
use crate::transaction::{FlowDnsState, Transaction};

/// Opcodes `3..=15` are reserved for future use (RFC 1035 section 4.1.1).
fn opcode_reserved(opcode: u8) -> bool {
    opcode >= 3
}

/// Validates the header and walks every question, without touching any [`FlowDnsState`]. Shared
/// by the stateful parse below and by the pure validation helper used for dry-run parsing.
fn validate(data: &[u8]) -> Result<(DnsHeader, Vec<Query>), DecodeError> {
    let mut cursor = Cursor::new(data);
    let header = DnsHeader::parse(&mut cursor)?;
    if header.is_response {
        return Err(DecodeError::WrongDirection);
    }
    if opcode_reserved(header.opcode) {
        return Err(DecodeError::ReservedOpCode);
    }
    if header.qdcount == 0 {
        return Err(DecodeError::NoQuestions);
    }
    let mut queries = Vec::with_capacity(header.qdcount as usize);
    for _ in 0..header.qdcount {
        queries.push(read_question(&mut cursor, Strictness::Strict)?);
    }
    Ok((header, queries))
}

/// Parses one complete request record (`data` is exactly one record's DNS message, header
/// already stripped of its 2-byte TCP length prefix by the framer) and records a new
/// [`Transaction`] in `state`. Answer/authority sections, if present, are ignored — they are not
/// expected in a request and are not even scanned past the question section.
///
/// A failure of any kind — malformed header fields or a bad question section — raises
/// `MalformedRequestHeader` and creates no transaction, matching the original: both its header
/// validation and its question-walk failures fall through to the same "bad request" outcome.
pub fn parse_request(state: &mut FlowDnsState, data: &[u8]) -> FrameResult {
    match validate(data) {
        Ok((header, queries)) => {
            if header.z != 0 {
                state.events.raise(DecoderEvent::ZFlagSet);
            }
            let mut tx = Transaction::new(header.id);
            tx.queries = queries;
            state.insert_transaction(tx);
            FrameResult::Ok
        }
        Err(_) => {
            state.events.raise(DecoderEvent::MalformedRequestHeader);
            FrameResult::Malformed
        }
    }
}
