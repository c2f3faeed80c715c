//! Probing Classifier: decides, from the first bytes of a new TCP flow, whether this looks like
//! DNS-over-TCP traffic at all — run once per flow, before any [`crate::transaction::FlowDnsState`]
//! exists.
//!
//! Grounded directly in the original's dedicated probe routine, which is deliberately looser than
//! the real request parser: it walks the question section for structural soundness (bounds, label
//! length) but does not validate `QR`, opcode, or `qdcount`, since a probe's job is "could this be
//! DNS", not "is this a well-formed request".

use crate::cursor::Cursor;
use crate::error::{DecodeError, FrameResult};
use crate::header::DnsHeader;
use crate::name::Strictness;
use crate::question::read_question;

/// Above this many buffered bytes with no contradicting evidence, the classifier gives up
/// waiting for the rest of a record and commits to `DnsTcp`. Mirrors the original's probe giving
/// up after a size threshold rather than buffering indefinitely for traffic that merely looks
/// plausible so far.
const GIVE_UP_THRESHOLD: usize = 512;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProbeResult {
    DnsTcp,
    NotDns,
    NeedMore,
}

/// Classifies `data`, the bytes seen so far on a new flow in one direction.
///
/// A declared record length below the 12-byte DNS header size can never hold a real message, so
/// it is rejected as `NotDns` immediately, before any attempt to parse the rest of the buffer.
pub fn classify(data: &[u8]) -> ProbeResult {
    if data.len() < 2 {
        return ProbeResult::NeedMore;
    }
    let declared = u16::from_be_bytes([data[0], data[1]]) as usize;
    if declared < DnsHeader::SIZE {
        return ProbeResult::NotDns;
    }
    let available = &data[2..];
    if available.len() >= declared {
        return match probe_request(&available[..declared]) {
            FrameResult::Ok => ProbeResult::DnsTcp,
            FrameResult::Malformed | FrameResult::NeedMore => ProbeResult::NotDns,
        };
    }
    match probe_request(available) {
        FrameResult::Malformed => ProbeResult::NotDns,
        FrameResult::Ok | FrameResult::NeedMore => {
            if data.len() > GIVE_UP_THRESHOLD {
                ProbeResult::DnsTcp
            } else {
                ProbeResult::NeedMore
            }
        }
    }
}

/// Bounds-and-label-length-only validation of a request's header and question section: no `QR`,
/// opcode, or `qdcount` checks. A truncated read reports `NeedMore` (this slice may simply be
/// short, not bad); an oversized label length reports `Malformed` (no amount of buffering fixes
/// that).
fn probe_request(data: &[u8]) -> FrameResult {
    let mut cursor = Cursor::new(data);
    let header = match DnsHeader::parse(&mut cursor) {
        Ok(header) => header,
        Err(_) => return FrameResult::NeedMore,
    };
    for _ in 0..header.qdcount {
        match read_question(&mut cursor, Strictness::Strict) {
            Ok(_) => {}
            Err(DecodeError::Truncated) => return FrameResult::NeedMore,
            Err(_) => return FrameResult::Malformed,
        }
    }
    FrameResult::Ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_one_request() -> Vec<u8> {
        vec![
            0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, b'w',
            b'w', b'w', 0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm',
            0x00, 0x00, 0x01, 0x00, 0x01,
        ]
    }

    fn framed(record: &[u8]) -> Vec<u8> {
        let mut out = (record.len() as u16).to_be_bytes().to_vec();
        out.extend_from_slice(record);
        out
    }

    #[test]
    fn too_short_for_prefix_needs_more() {
        assert_eq!(ProbeResult::NeedMore, classify(&[0x00]));
    }

    #[test]
    fn zero_length_record_is_not_dns() {
        assert_eq!(ProbeResult::NotDns, classify(&[0x00, 0x00, 0xff]));
    }

    #[test]
    fn declared_length_below_header_size_is_not_dns() {
        // declared length 5 is below the 12-byte DNS header and no more bytes follow.
        assert_eq!(ProbeResult::NotDns, classify(&[0x00, 0x05]));
    }

    #[test]
    fn complete_well_formed_request_is_dns_tcp() {
        assert_eq!(ProbeResult::DnsTcp, classify(&framed(&scenario_one_request())));
    }

    #[test]
    fn complete_record_with_bad_label_is_not_dns() {
        let mut record = scenario_one_request();
        record[12] = 0x40;
        assert_eq!(ProbeResult::NotDns, classify(&framed(&record)));
    }

    #[test]
    fn partial_record_with_bad_label_is_not_dns() {
        let mut record = scenario_one_request();
        record[12] = 0x40;
        let stream = framed(&record);
        assert_eq!(ProbeResult::NotDns, classify(&stream[..20]));
    }

    #[test]
    fn partial_plausible_record_needs_more_below_threshold() {
        let stream = framed(&scenario_one_request());
        assert_eq!(ProbeResult::NeedMore, classify(&stream[..20]));
    }

    #[test]
    fn partial_plausible_record_past_threshold_commits_to_dns_tcp() {
        let mut record = scenario_one_request();
        record.extend(std::iter::repeat(0).take(600));
        let stream = framed(&record);
        assert_eq!(ProbeResult::DnsTcp, classify(&stream[..550]));
    }
}
