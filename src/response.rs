//! Message Parser, response side: matches a response against its transaction, walks the question
//! section permissively (and discards it — the original does not re-validate an echoed query),
//! then walks the answer and authority sections into the matching transaction.

use crate::cursor::Cursor;
use crate::error::FrameResult;
use crate::events::DecoderEvent;
use crate::header::DnsHeader;
use crate::name::Strictness;
use crate::question::read_question;
use crate::rr::{read_rr, ResourceRecord};
use crate::transaction::FlowDnsState;

/// `rcode` is a 4-bit field (RFC 1035 section 4.1.1): values `0..=5` are assigned meanings, `6..=15`
/// are reserved for future use. Reserved does not mean invalid — a forward-compatible resolver may
/// legitimately send one — so the defined range this crate rejects outside of is the field's own
/// bit width, `0..=15`; since `DnsHeader::parse` already masks `rcode` to 4 bits, this can never
/// fail in practice. Kept as an explicit check (rather than omitted) so the validation present here
/// mirrors every field `DNSValidateResponseHeader` is documented to check.
fn rcode_in_defined_range(rcode: u8) -> bool {
    rcode <= 0xF
}

/// Parses one complete response record and folds it into the matching transaction in `state`.
///
/// An unmatched transaction id raises `UnsolicitedResponse` but is not itself a parse failure:
/// the record is still walked (so the cursor stays synchronized with the stream) and its
/// contents are simply discarded. A record section that runs past the declared record length
/// raises `MalformedResponseData`; whatever was parsed before that point is kept.
pub fn parse_response(state: &mut FlowDnsState, data: &[u8]) -> FrameResult {
    let mut cursor = Cursor::new(data);
    let header = match DnsHeader::parse(&mut cursor) {
        Ok(header) => header,
        Err(_) => {
            state.events.raise(DecoderEvent::MalformedResponseHeader);
            return FrameResult::Malformed;
        }
    };
    if !header.is_response || !rcode_in_defined_range(header.rcode) {
        state.events.raise(DecoderEvent::MalformedResponseHeader);
        return FrameResult::Malformed;
    }

    for _ in 0..header.qdcount {
        if read_question(&mut cursor, Strictness::Permissive).is_err() {
            state.events.raise(DecoderEvent::MalformedResponseData);
            return finish(state, header.id, Vec::new(), Vec::new());
        }
    }

    let mut answers = Vec::with_capacity(header.ancount as usize);
    let mut truncated = false;
    for _ in 0..header.ancount {
        match read_rr(&mut cursor) {
            Some(rr) => answers.push(rr),
            None => {
                truncated = true;
                break;
            }
        }
    }

    let mut authorities = Vec::new();
    if !truncated {
        authorities.reserve(header.nscount as usize);
        for _ in 0..header.nscount {
            match read_rr(&mut cursor) {
                Some(rr) => authorities.push(rr),
                None => {
                    truncated = true;
                    break;
                }
            }
        }
    }

    if truncated {
        state.events.raise(DecoderEvent::MalformedResponseData);
    }
    finish(state, header.id, answers, authorities)
}

fn finish(
    state: &mut FlowDnsState,
    tx_id: u16,
    answers: Vec<ResourceRecord>,
    authorities: Vec<ResourceRecord>,
) -> FrameResult {
    match state.find_transaction_mut(tx_id) {
        Some(tx) => {
            tx.reply_seen = true;
            tx.answers.extend(answers);
            tx.authorities.extend(authorities);
        }
        None => state.events.raise(DecoderEvent::UnsolicitedResponse),
    }
    FrameResult::Ok
}
