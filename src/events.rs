//! Decoder events: anomaly tags raised on a flow for downstream rule engines to act on.
//!
//! Raising an event is never fatal on its own — see [`crate::error`] for how events relate to
//! parse failures.

/// One anomaly tag. Mirrors the original's `DNS_DECODER_EVENT_*` constants one-for-one.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DecoderEvent {
    /// A response arrived whose transaction id does not match any outstanding request.
    UnsolicitedResponse,
    /// The request header failed structural validation (bad `QR`, reserved opcode, `qdcount ==
    /// 0`).
    MalformedRequestHeader,
    /// The response header failed structural validation (`QR` indicates a query).
    MalformedResponseHeader,
    /// An answer or authority resource record could not be parsed from the response.
    MalformedResponseData,
    /// Appending to the per-record buffer would exceed the 65 535 byte maximum DNS-TCP record.
    RecordOverflow,
    /// The header's reserved `Z` bits were non-zero.
    ZFlagSet,
}

/// The set of decoder events raised so far on a flow.
///
/// A flow rarely raises more than one or two distinct events; a `Vec` with linear
/// contains/dedup-on-insert is simpler and faster at this size than a `HashSet`, matching this
/// crate's general preference (see [`crate::transaction`]) for linear scans over small
/// collections.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EventSet(Vec<DecoderEvent>);

impl EventSet {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Records `event`, deduplicating against events already raised.
    pub fn raise(&mut self, event: DecoderEvent) {
        if !self.0.contains(&event) {
            log::debug!("dns-tcp: decoder event raised: {event:?}");
            self.0.push(event);
        }
    }

    #[must_use]
    pub fn contains(&self, event: DecoderEvent) -> bool {
        self.0.contains(&event)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[DecoderEvent] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_deduplicates() {
        let mut events = EventSet::new();
        events.raise(DecoderEvent::ZFlagSet);
        events.raise(DecoderEvent::ZFlagSet);
        events.raise(DecoderEvent::UnsolicitedResponse);
        assert_eq!(2, events.as_slice().len());
        assert!(events.contains(DecoderEvent::ZFlagSet));
        assert!(events.contains(DecoderEvent::UnsolicitedResponse));
        assert!(!events.contains(DecoderEvent::RecordOverflow));
    }
}
