//! Data-only descriptors for the "register this parser with the pipeline" interface.
//!
//! The enclosing application-protocol registry (port-probing dispatch table, parser-function
//! table, transaction-id bookkeeping) is out of scope for this crate — see the Purpose section in
//! `SPEC_FULL.md`. What this crate does own is the *shape* of the data such a registry needs, so
//! the embedding application can build its table entries directly out of these descriptors instead
//! of re-deriving the constants by hand.

use crate::direction::Direction;

/// Transport the probing parser listens on. Only `Tcp` is meaningful here; the variant exists so
/// a registry keying probes by transport can match on it without a crate-specific enum.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Transport {
    Tcp,
}

/// Relative priority among probing parsers registered on the same port, highest wins ties.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProbingPriority {
    Low,
    Medium,
    High,
}

/// Descriptor for registering [`crate::probe::classify`] against a port and direction.
///
/// Mirrors the original's `AppLayerRegisterProbingParser(53, IPPROTO_TCP, "dnstcp",
/// ALPROTO_DNS_TCP, 0, sizeof(DNSTcpHeader), STREAM_TOSERVER, PRIORITY_HIGH, ...)` call: the
/// well-known DNS port, the 2-byte minimum needed before the probe can even read the length
/// prefix, and the direction probing always starts on (queries arrive before replies).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProbingRegistration {
    pub port: u16,
    pub transport: Transport,
    pub min_bytes: usize,
    pub direction: Direction,
    pub priority: ProbingPriority,
}

impl ProbingRegistration {
    #[must_use]
    pub const fn default_dns_tcp() -> Self {
        Self {
            port: 53,
            transport: Transport::Tcp,
            min_bytes: 2,
            direction: Direction::ToServer,
            priority: ProbingPriority::High,
        }
    }
}

/// Per-direction parser function pointer, matching the original's `AppLayerRegisterProto` pair:
/// one registration for `STREAM_TOSERVER` (request parsing), one for `STREAM_TOCLIENT` (response
/// parsing).
pub type ParserFn = fn(&mut crate::transaction::FlowDnsState, &[u8]) -> crate::error::FrameResult;

/// Descriptor for registering the request/response parser pair, state lifecycle, and transaction
/// bookkeeping callbacks under a protocol name. Fields intentionally stay as plain function
/// pointers and a `&'static str` name rather than trait objects: the embedding registry is
/// expected to store one static instance of this struct per protocol, the same way the original's
/// registration call is a single, one-time function invocation at startup.
pub struct ParserRegistration {
    pub proto_name: &'static str,
    pub to_server: ParserFn,
    pub to_client: ParserFn,
    /// Allocates a fresh, idle [`crate::transaction::FlowDnsState`] for a new flow.
    pub state_alloc: fn() -> crate::transaction::FlowDnsState,
    /// Advances `*external_id` to the flow's `transaction_cnt` if it has progressed further.
    /// Matches the original's `DNSStateUpdateTransactionId`.
    pub update_transaction_id: fn(&crate::transaction::FlowDnsState, &mut u16),
    /// Marks transactions up to and including `id` as safe to reap. Matches the original's
    /// `DNSStateTransactionFree`, which records the watermark but defers the actual removal to
    /// the next `reap()` pass, exactly as `crate::transaction::FlowDnsState::mark_done` does.
    pub free_transaction: fn(&mut crate::transaction::FlowDnsState, u16),
}

/// Ready-made registration for this crate's request/response parsers, for an embedding registry
/// to install under the `"dnstcp"` protocol name.
pub const fn dns_tcp_registration() -> ParserRegistration {
    ParserRegistration {
        proto_name: "dnstcp",
        to_server: crate::request::parse_request,
        to_client: crate::response::parse_response,
        state_alloc: crate::transaction::FlowDnsState::new,
        update_transaction_id: crate::transaction::FlowDnsState::transaction_progress,
        free_transaction: crate::transaction::FlowDnsState::mark_done,
    }
}
