//! Per-flow state: the transaction store (TS) and the [`FlowDnsState`] it lives in.
//!
//! `FlowDnsState` is owned by the enclosing flow table, which holds a per-flow lock covering
//! every entry point into this crate (framing, both parser sides, and the transaction-store
//! operations below). That lock is a precondition this crate relies on, not a property it
//! enforces — see the concurrency notes in `SPEC_FULL.md` for why no internal `Mutex` wraps this
//! struct.

use crate::events::EventSet;
use crate::question::Query;
use crate::rr::ResourceRecord;

/// A request, and (once seen) its matching response.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transaction {
    pub tx_id: u16,
    pub queries: Vec<Query>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub reply_seen: bool,
}

impl Transaction {
    #[must_use]
    pub fn new(tx_id: u16) -> Self {
        Self {
            tx_id,
            queries: Vec::new(),
            answers: Vec::new(),
            authorities: Vec::new(),
            reply_seen: false,
        }
    }
}

/// Per-flow reassembly and transaction-matching state. One instance is shared by both
/// directions of a flow.
#[derive(Debug, Default)]
pub struct FlowDnsState {
    /// Staging buffer for a record that has not fully arrived yet. `None` when idle (matches
    /// the invariant "buffer is allocated whenever offset > 0": the allocation happens on first
    /// use in `BufferAssembler::append`, see `crate::buffer`).
    pub(crate) buffer: Option<crate::buffer::BufferAssembler>,
    /// Declared length of the record currently being assembled; `0` when idle.
    pub(crate) record_len: u16,
    /// Holds a 2-byte length prefix that arrived split across TCP segments (e.g. one byte per
    /// `read()`), so the framer can reassemble it before it even knows `record_len`.
    pub(crate) prefix_buf: [u8; 2],
    pub(crate) prefix_len: u8,
    transactions: Vec<Transaction>,
    transaction_cnt: u16,
    transaction_done: u16,
    pub events: EventSet,
}

impl FlowDnsState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes currently staged for the in-progress record; `0` when idle.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.buffer.as_ref().map_or(0, crate::buffer::BufferAssembler::len)
    }

    /// Declared length of the record currently being assembled; `0` when idle.
    #[must_use]
    pub fn record_len(&self) -> u16 {
        self.record_len
    }

    #[must_use]
    pub fn transaction_cnt(&self) -> u16 {
        self.transaction_cnt
    }

    #[must_use]
    pub fn transaction_done(&self) -> u16 {
        self.transaction_done
    }

    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Appends a freshly-parsed request's transaction and bumps `transaction_cnt`.
    pub(crate) fn insert_transaction(&mut self, tx: Transaction) {
        self.transaction_cnt = self.transaction_cnt.wrapping_add(1);
        self.transactions.push(tx);
    }

    /// Linear scan by transaction id; depth is bounded by in-flight pipelined queries,
    /// typically small, so a hash index would not pay for itself (see DESIGN.md).
    pub(crate) fn find_transaction_mut(&mut self, tx_id: u16) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|tx| tx.tx_id == tx_id)
    }

    /// Records that the consumer has finished with every transaction up to and including `id`.
    pub fn mark_done(&mut self, id: u16) {
        self.transaction_done = self.transaction_done.max(id);
    }

    /// Removes every transaction that is both acknowledged done and has seen its reply.
    /// Idempotent: a second call with no new transactions removes nothing further.
    pub fn reap(&mut self) {
        self.transactions
            .retain(|tx| !(tx.tx_id <= self.transaction_done && tx.reply_seen));
    }

    /// If this flow has created more transactions than `*external_id` reflects, advances
    /// `*external_id` to `transaction_cnt`. This is how the enclosing pipeline learns how far
    /// parsing has progressed.
    pub fn transaction_progress(&self, external_id: &mut u16) {
        if self.transaction_cnt > *external_id {
            *external_id = self.transaction_cnt;
        }
    }
}
