//! The question section: `QNAME QTYPE QCLASS`, repeated `qdcount` times.

use crate::cursor::Cursor;
use crate::error::DecodeError;
use crate::name::{read_name, Strictness};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Query {
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
}

/// Reads one question: a name followed by the 4-byte `qtype`/`qclass` trailer.
pub fn read_question(cursor: &mut Cursor<'_>, strictness: Strictness) -> Result<Query, DecodeError> {
    let name = read_name(cursor, strictness)?;
    let qtype = cursor.read_u16_be()?;
    let qclass = cursor.read_u16_be()?;
    Ok(Query { name, qtype, qclass })
}
