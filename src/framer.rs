//! The Record Framer: turns a stream of arbitrarily-chunked TCP bytes into whole DNS-over-TCP
//! records (`u16_be length | message`) and hands each one to the matching [`crate::request`] or
//! [`crate::response`] parser.
//!
//! Expressed as a loop rather than the original's `goto next_record:` jump, since one call's
//! worth of input can contain any number of complete records back to back, plus at most one
//! trailing partial record that gets staged for the next call.

use crate::buffer;
use crate::direction::Direction;
use crate::events::DecoderEvent;
use crate::header::DnsHeader;
use crate::request::parse_request;
use crate::response::parse_response;
use crate::transaction::FlowDnsState;

/// Feeds `data`, one direction's worth of newly-arrived TCP bytes, into `state`.
///
/// Every complete record found is dispatched to the request or response parser according to
/// `direction`; a trailing partial record (or a partial 2-byte length prefix) is staged in
/// `state` for the next call. A declared record length below the 12-byte DNS header size is
/// rejected as soon as the 2-byte prefix is known — raising `MalformedRequestHeader` or
/// `MalformedResponseHeader` per `direction` without ever staging or dispatching the bogus
/// record — instead of buffering it and letting the header parser discover the same thing later.
/// A record whose declared length would overflow the 65 535-byte maximum raises `RecordOverflow`
/// and discards everything staged for the direction so far — the stream cannot be resynchronized,
/// so framing of this flow's remaining input stops. In both cases the flow itself is left alone:
/// bytes arriving on a later call are treated as a fresh record attempt.
pub fn accept(state: &mut FlowDnsState, direction: Direction, mut data: &[u8]) {
    loop {
        if data.is_empty() {
            return;
        }

        if state.record_len == 0 {
            if state.prefix_len < 2 {
                let want = 2 - state.prefix_len as usize;
                let take = want.min(data.len());
                state.prefix_buf[state.prefix_len as usize..state.prefix_len as usize + take]
                    .copy_from_slice(&data[..take]);
                state.prefix_len += take as u8;
                data = &data[take..];
                if state.prefix_len < 2 {
                    return;
                }
            }

            let declared = u16::from_be_bytes(state.prefix_buf);
            state.prefix_len = 0;
            if (declared as usize) < DnsHeader::SIZE {
                let event = match direction {
                    Direction::ToServer => DecoderEvent::MalformedRequestHeader,
                    Direction::ToClient => DecoderEvent::MalformedResponseHeader,
                };
                state.events.raise(event);
                return;
            }
            if data.len() >= declared as usize {
                let (record, tail) = data.split_at(declared as usize);
                dispatch(state, direction, record);
                data = tail;
                continue;
            }
            state.record_len = declared;
            if !buffer::append(&mut state.buffer, data) {
                overflow(state);
                return;
            }
            return;
        }

        let need = state.record_len as usize - state.offset();
        if data.len() >= need {
            let (chunk, tail) = data.split_at(need);
            if !buffer::append(&mut state.buffer, chunk) {
                overflow(state);
                return;
            }
            let record_len = state.record_len as usize;
            let assembled = state.buffer.take().expect("buffer populated above");
            state.record_len = 0;
            dispatch(state, direction, &assembled.readable()[..record_len]);
            data = tail;
            continue;
        }
        if !buffer::append(&mut state.buffer, data) {
            overflow(state);
            return;
        }
        return;
    }
}

fn dispatch(state: &mut FlowDnsState, direction: Direction, record: &[u8]) {
    match direction {
        Direction::ToServer => {
            parse_request(state, record);
        }
        Direction::ToClient => {
            parse_response(state, record);
        }
    }
}

fn overflow(state: &mut FlowDnsState) {
    state.events.raise(DecoderEvent::RecordOverflow);
    state.buffer = None;
    state.record_len = 0;
    state.prefix_len = 0;
}
