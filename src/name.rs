//! Name walking for the question section.
//!
//! Two modes share this one walker, matching the two call sites in the original:
//! - [`Strictness::Strict`] (request side, and the probing dry-run): a label length byte greater
//!   than 63 is malformed.
//! - [`Strictness::Permissive`] (response side): a label length byte greater than 63 is tolerated
//!   and treated like any other label length, so a servers echo quirk does not drop an otherwise
//!   useful response. See the Open Questions in `SPEC_FULL.md`.
//!
//! Neither mode follows DNS name-compression pointers (top two bits `11`); that is out of scope
//! here (see Non-goals) and a pointer byte is simply treated as an oversized label length, which
//! strict mode rejects and permissive mode still bounds-checks against the remaining input.

use crate::cursor::Cursor;
use crate::error::DecodeError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strictness {
    Strict,
    Permissive,
}

/// Maximum size of the dot-joined name buffer (RFC 1035 section 3.1: domain names are limited to
/// 255 octets).
const MAX_NAME_LEN: usize = 255;
const MAX_LABEL_LEN: u8 = 63;

/// Walks one name: a sequence of length-prefixed labels terminated by a zero-length label.
/// Returns the dot-separated name with no trailing dot, e.g. `"www.example.com"`.
pub fn read_name(cursor: &mut Cursor<'_>, strictness: Strictness) -> Result<String, DecodeError> {
    let mut name = String::new();
    loop {
        let len = cursor.read_u8()?;
        if len == 0 {
            break;
        }
        if len > MAX_LABEL_LEN && strictness == Strictness::Strict {
            return Err(DecodeError::InvalidLabel);
        }
        let label_bytes = cursor.read_bytes(len as usize)?;
        if !name.is_empty() {
            name.push('.');
        }
        // The DNS wire format does not guarantee UTF-8; labels that aren't valid UTF-8 are kept
        // byte-faithful via the lossy conversion rather than rejected, since a malformed label
        // here is still useful intelligence for the rule engine consuming this transaction.
        name.push_str(&String::from_utf8_lossy(label_bytes));
        if name.len() > MAX_NAME_LEN {
            return Err(DecodeError::NameTooLong);
        }
    }
    Ok(name)
}
