//! End-to-end scenarios from the framing/transaction contract: arbitrary chunkings of the same
//! byte stream must produce the same transactions, and cross-direction matching must behave
//! sensibly under the partial-failure conditions the spec calls out.

use dns_tcp::direction::Direction;
use dns_tcp::events::DecoderEvent;
use dns_tcp::framer;
use dns_tcp::probe::{self, ProbeResult};
use dns_tcp::transaction::FlowDnsState;

fn scenario_one_request() -> Vec<u8> {
    vec![
        0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, b'w', b'w',
        b'w', 0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00, 0x00,
        0x01, 0x00, 0x01,
    ]
}

fn framed(record: &[u8]) -> Vec<u8> {
    let mut out = (record.len() as u16).to_be_bytes().to_vec();
    out.extend_from_slice(record);
    out
}

fn feed_in_chunks(stream: &[u8], chunk_sizes: &[usize]) -> FlowDnsState {
    let mut state = FlowDnsState::new();
    let mut pos = 0;
    for &size in chunk_sizes {
        let end = (pos + size).min(stream.len());
        framer::accept(&mut state, Direction::ToServer, &stream[pos..end]);
        pos = end;
    }
    if pos < stream.len() {
        framer::accept(&mut state, Direction::ToServer, &stream[pos..]);
    }
    state
}

#[test]
fn single_query_single_record_single_chunk() {
    let stream = framed(&scenario_one_request());
    let mut state = FlowDnsState::new();
    framer::accept(&mut state, Direction::ToServer, &stream);
    assert_eq!(1, state.transactions().len());
    let tx = &state.transactions()[0];
    assert_eq!(0x1234, tx.tx_id);
    assert_eq!(1, tx.queries.len());
    assert_eq!("www.example.com", tx.queries[0].name);
    assert_eq!(1, tx.queries[0].qtype);
    assert_eq!(1, tx.queries[0].qclass);
}

#[test]
fn query_split_across_three_chunks() {
    let stream = framed(&scenario_one_request());
    let state = feed_in_chunks(&stream, &[1, 1, 29]);
    assert_eq!(1, state.transactions().len());
    assert_eq!("www.example.com", state.transactions()[0].queries[0].name);
}

#[test]
fn two_records_in_one_chunk() {
    let mut stream = framed(&scenario_one_request());
    stream.extend_from_slice(&framed(&scenario_one_request()));
    let mut state = FlowDnsState::new();
    framer::accept(&mut state, Direction::ToServer, &stream);
    assert_eq!(2, state.transactions().len());
    for tx in state.transactions() {
        assert_eq!(0x1234, tx.tx_id);
        assert_eq!("www.example.com", tx.queries[0].name);
    }
}

#[test]
fn response_with_unmatched_id_leaves_original_transaction_unreplied() {
    let mut state = FlowDnsState::new();
    framer::accept(&mut state, Direction::ToServer, &framed(&scenario_one_request()));
    assert_eq!(1, state.transactions().len());

    let mut response = vec![
        0xff, 0xff, 0x81, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    response.extend_from_slice(&[]); // no questions, no answers
    let record = framed(&response);
    framer::accept(&mut state, Direction::ToClient, &record);

    assert!(state.events.contains(DecoderEvent::UnsolicitedResponse));
    assert_eq!(1, state.transactions().len());
    assert!(!state.transactions()[0].reply_seen);
}

#[test]
fn malformed_label_length_yields_no_transaction_and_resets_framer() {
    let mut record = scenario_one_request();
    record[12] = 0x40; // corrupt the first label length byte to 64
    let mut state = FlowDnsState::new();
    framer::accept(&mut state, Direction::ToServer, &framed(&record));
    assert!(state.transactions().is_empty());
    assert!(state.events.contains(DecoderEvent::MalformedRequestHeader));
    assert_eq!(0, state.offset());
    assert_eq!(0, state.record_len());

    // The flow is not torn down: a subsequent well-formed record still parses.
    framer::accept(&mut state, Direction::ToServer, &framed(&scenario_one_request()));
    assert_eq!(1, state.transactions().len());
}

#[test]
fn declared_length_below_header_size_is_not_dns_by_probe_and_malformed_by_parser() {
    let short = [0x00, 0x05];
    assert_eq!(ProbeResult::NotDns, probe::classify(&short));

    let mut state = FlowDnsState::new();
    framer::accept(&mut state, Direction::ToServer, &short);
    assert!(state.transactions().is_empty());
    assert!(state.events.contains(DecoderEvent::MalformedRequestHeader));
}

#[test]
fn framing_invariance_across_arbitrary_chunkings() {
    let mut stream = framed(&scenario_one_request());
    stream.extend_from_slice(&framed(&scenario_one_request()));
    stream.extend_from_slice(&framed(&scenario_one_request()));

    let chunkings: &[&[usize]] = &[
        &[stream.len()],
        &[1; 200],
        &[7, 13, 1, 50, 100, 1000],
        &[2, 30, 1, 1, 1, 1, 1, 1, 1000],
    ];

    let baseline = feed_in_chunks(&stream, chunkings[0]);
    let baseline_names: Vec<_> = baseline
        .transactions()
        .iter()
        .map(|tx| tx.queries[0].name.clone())
        .collect();
    assert_eq!(3, baseline_names.len());

    for chunking in &chunkings[1..] {
        let state = feed_in_chunks(&stream, chunking);
        let names: Vec<_> = state
            .transactions()
            .iter()
            .map(|tx| tx.queries[0].name.clone())
            .collect();
        assert_eq!(baseline_names, names, "chunking {chunking:?} diverged");
    }
}

#[test]
fn boundedness_holds_after_partial_feeds() {
    let stream = framed(&scenario_one_request());
    let state = feed_in_chunks(&stream, &[3, 5]);
    assert!(state.offset() <= state.record_len() as usize);
    assert!(state.record_len() <= 65_535);
}

#[test]
fn reap_is_idempotent() {
    let mut state = FlowDnsState::new();
    framer::accept(&mut state, Direction::ToServer, &framed(&scenario_one_request()));
    state.mark_done(0x1234);
    // Not replied to yet: nothing is reaped regardless of the watermark.
    state.reap();
    let after_first = state.transactions().len();
    state.reap();
    assert_eq!(after_first, state.transactions().len());
}

#[test]
fn transaction_counters_never_decrease() {
    let mut state = FlowDnsState::new();
    let mut stream = framed(&scenario_one_request());
    stream.extend_from_slice(&framed(&scenario_one_request()));
    framer::accept(&mut state, Direction::ToServer, &stream);
    assert_eq!(2, state.transaction_cnt());
    state.mark_done(10);
    state.mark_done(3);
    assert_eq!(10, state.transaction_done());
}
