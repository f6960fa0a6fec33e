pub mod cmap;
pub mod glyf;
pub mod head;
pub mod hhea;
pub mod loca;
pub mod maxp;

use std::io::{self, Cursor};

/// One named table of a font file.
///
/// `unpack` reads from a cursor positioned at the table's first byte,
/// bounded to the table's byte range by the directory. `Dep` carries
/// already-parsed tables a table needs to interpret its own bytes (`loca`
/// needs `head` and `maxp`, `glyf` needs `loca`).
pub trait FontTable<'a>: Sized {
    type Dep;

    fn unpack(rd: &mut Cursor<&[u8]>, dep: Self::Dep) -> Result<Self, io::Error>;
}

/// Advance a cursor past `n` bytes it has no use for.
pub(crate) fn skip(rd: &mut Cursor<&[u8]>, n: u64) {
    rd.set_position(rd.position() + n);
}
