//! The minimal resource-record walker standing in for the "shared DNS message-layer library"
//! collaborator named in the purpose section: it advances a cursor past one answer or authority
//! RR and returns its fields, opaque to the rest of this crate. It does not interpret `rdata` by
//! type and does not follow name-compression pointers — see the Non-goals.

use crate::cursor::Cursor;
use crate::error::DecodeError;
use crate::name::{read_name, Strictness};

/// One resource record from an answer or authority section. `rdata` is kept as opaque bytes;
/// interpreting it by `rtype` (an A record's address, a CNAME's target, ...) is outside this
/// crate's scope.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResourceRecord {
    pub name: String,
    pub rtype: u16,
    pub rclass: u16,
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

/// Reads one RR: `NAME TYPE CLASS TTL RDLENGTH RDATA`. Returns `None` (mapped by the caller to
/// `MalformedResponseData`) when the record runs past the end of the input, mirroring the
/// original's `DNSReponseParse` returning a null cursor on insufficient data.
pub fn read_rr(cursor: &mut Cursor<'_>) -> Option<ResourceRecord> {
    let name = read_name(cursor, Strictness::Permissive).ok()?;
    let rtype = cursor.read_u16_be().ok()?;
    let rclass = cursor.read_u16_be().ok()?;
    let ttl = cursor.read_u32_be().ok()?;
    let rdlength = cursor.read_u16_be().ok()?;
    let rdata = cursor.read_bytes(rdlength as usize).ok()?.to_vec();
    Some(ResourceRecord {
        name,
        rtype,
        rclass,
        ttl,
        rdata,
    })
}
