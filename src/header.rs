//! The 12-byte DNS message header (RFC 1035 section 4.1.1), shared by the request and response
//! parsers. Each side layers its own validation on top — see [`crate::request`] and
//! [`crate::response`].

use crate::cursor::Cursor;
use crate::error::DecodeError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DnsHeader {
    pub id: u16,
    pub is_response: bool,
    pub opcode: u8,
    pub authoritative_answer: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    /// Reserved bits. A well-formed message sets these to zero.
    pub z: u8,
    pub rcode: u8,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl DnsHeader {
    pub const SIZE: usize = 12;

    /// Parses the fixed 12-byte header. Performs no semantic validation (opcode range, QR
    /// direction, question count) — that is the caller's job, since request and response
    /// validate different things.
    pub fn parse(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        let id = cursor.read_u16_be()?;
        let flags = cursor.read_u16_be()?;
        let qdcount = cursor.read_u16_be()?;
        let ancount = cursor.read_u16_be()?;
        let nscount = cursor.read_u16_be()?;
        let arcount = cursor.read_u16_be()?;
        Ok(Self {
            id,
            is_response: (flags >> 15) & 1 == 1,
            opcode: ((flags >> 11) & 0xF) as u8,
            authoritative_answer: (flags >> 10) & 1 == 1,
            truncated: (flags >> 9) & 1 == 1,
            recursion_desired: (flags >> 8) & 1 == 1,
            recursion_available: (flags >> 7) & 1 == 1,
            z: ((flags >> 4) & 0x7) as u8,
            rcode: (flags & 0xF) as u8,
            qdcount,
            ancount,
            nscount,
            arcount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scenario_one_header() {
        let bytes = [
            0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        let mut cursor = Cursor::new(&bytes);
        let header = DnsHeader::parse(&mut cursor).unwrap();
        assert_eq!(0x1234, header.id);
        assert!(!header.is_response);
        assert_eq!(0, header.opcode);
        assert!(header.recursion_desired);
        assert_eq!(1, header.qdcount);
        assert_eq!(0, header.ancount);
        assert_eq!(12, cursor.position());
    }

    #[test]
    fn truncated_header_errs() {
        let bytes = [0x12, 0x34, 0x01, 0x00, 0x00, 0x01];
        let mut cursor = Cursor::new(&bytes);
        assert_eq!(DecodeError::Truncated, DnsHeader::parse(&mut cursor).unwrap_err());
    }
}
