//! Legacy wire encoding: little-endian integers and compact-size prefixed vectors.

use std::io::{self, Write};

/// Types with a canonical consensus encoding
pub trait Encodable {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()>;

    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.encode(&mut buf);
        buf
    }
}

pub fn write_compact_size<W: Write>(writer: &mut W, n: u64) -> io::Result<()> {
    match n {
        0..=0xfc => writer.write_all(&[n as u8]),
        0xfd..=0xffff => {
            writer.write_all(&[0xfd])?;
            writer.write_all(&(n as u16).to_le_bytes())
        }
        0x1_0000..=0xffff_ffff => {
            writer.write_all(&[0xfe])?;
            writer.write_all(&(n as u32).to_le_bytes())
        }
        _ => {
            writer.write_all(&[0xff])?;
            writer.write_all(&n.to_le_bytes())
        }
    }
}

pub fn write_var_bytes<W: Write>(writer: &mut W, bytes: &[u8]) -> io::Result<()> {
    write_compact_size(writer, bytes.len() as u64)?;
    writer.write_all(bytes)
}

impl<T: Encodable> Encodable for Vec<T> {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_compact_size(writer, self.len() as u64)?;
        for item in self {
            item.encode(writer)?;
        }
        Ok(())
    }
}
