use std::io::{self, Cursor};

use super::{skip, FontTable};
use byteorder::{BigEndian, ReadBytesExt};

/// Global font header. Only the two fields the engine consumes are kept;
/// revision, checksum, timestamps and style bits are skipped over.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/head
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6head.html
#[derive(Debug, PartialEq)]
pub struct HeadTable {
    /// Design units per em square.
    pub(crate) units_per_em: u16,
    /// 0 for short (2-byte, doubled) `loca` offsets, 1 for long (4-byte).
    pub(crate) index_to_loc_format: i16,
}

impl<'a> FontTable<'a> for HeadTable {
    type Dep = ();

    fn unpack(rd: &mut Cursor<&[u8]>, _: Self::Dep) -> Result<Self, io::Error> {
        // version, revision, check sum adjustment, magic number, flags
        skip(rd, 18);
        let units_per_em = rd.read_u16::<BigEndian>()?;
        // created/modified timestamps, bounding box, mac style,
        // lowest rec ppem, font direction hint
        skip(rd, 30);
        let index_to_loc_format = rd.read_i16::<BigEndian>()?;

        if index_to_loc_format != 0 && index_to_loc_format != 1 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unknown loca offset format {}", index_to_loc_format),
            ));
        }

        Ok(HeadTable {
            units_per_em,
            index_to_loc_format,
        })
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;
    use byteorder::WriteBytesExt;
    use pretty_assertions::assert_eq;

    fn head_bytes(units_per_em: u16, index_to_loc_format: i16) -> Vec<u8> {
        let mut data = vec![0u8; 18];
        data.write_u16::<BigEndian>(units_per_em).unwrap();
        data.resize(50, 0);
        data.write_i16::<BigEndian>(index_to_loc_format).unwrap();
        data.write_i16::<BigEndian>(0).unwrap(); // glyph data format
        data
    }

    #[test]
    fn test_head_table_decode() {
        let data = head_bytes(1000, 1);
        let table = HeadTable::unpack(&mut Cursor::new(&data[..]), ()).unwrap();
        assert_eq!(
            table,
            HeadTable {
                units_per_em: 1000,
                index_to_loc_format: 1,
            }
        );
    }

    #[test]
    fn test_head_table_rejects_unknown_loca_format() {
        let data = head_bytes(1000, 2);
        assert!(HeadTable::unpack(&mut Cursor::new(&data[..]), ()).is_err());
    }
}
