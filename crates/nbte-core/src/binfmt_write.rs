use std::io::Write as _;

use flate2::write::{GzEncoder, ZlibEncoder};

use crate::binfmt::Compression;
use crate::error::{NbtError, Result};
use crate::tag::{Compound, Tag, TagKind};

/// Serialize a named root compound and wrap it in the requested envelope.
pub fn encode_document(
    root_name: &str,
    root: &Compound,
    compression: Compression,
) -> Result<Vec<u8>> {
    let mut w = Writer::new();
    w.push(TagKind::Compound.id());
    w.write_string(root_name)?;
    w.compound_payload(root)?;
    wrap_envelope(w.out, compression)
}

fn wrap_envelope(bytes: Vec<u8>, compression: Compression) -> Result<Vec<u8>> {
    match compression {
        Compression::None => Ok(bytes),
        Compression::Gzip => {
            let mut enc = GzEncoder::new(
                Vec::with_capacity(bytes.len() / 2),
                flate2::Compression::default(),
            );
            enc.write_all(&bytes)?;
            Ok(enc.finish()?)
        }
        Compression::Zlib => {
            let mut enc = ZlibEncoder::new(
                Vec::with_capacity(bytes.len() / 2),
                flate2::Compression::default(),
            );
            enc.write_all(&bytes)?;
            Ok(enc.finish()?)
        }
    }
}

struct Writer {
    out: Vec<u8>,
}

impl Writer {
    fn new() -> Self {
        Self {
            out: Vec::with_capacity(1024),
        }
    }

    fn push(&mut self, b: u8) {
        self.out.push(b);
    }

    fn write_i16(&mut self, v: i16) {
        self.out.extend_from_slice(&v.to_be_bytes());
    }

    fn write_i32(&mut self, v: i32) {
        self.out.extend_from_slice(&v.to_be_bytes());
    }

    fn write_i64(&mut self, v: i64) {
        self.out.extend_from_slice(&v.to_be_bytes());
    }

    fn write_f32(&mut self, v: f32) {
        self.out.extend_from_slice(&v.to_bits().to_be_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.out.extend_from_slice(&v.to_bits().to_be_bytes());
    }

    fn write_string(&mut self, s: &str) -> Result<()> {
        if s.len() > u16::MAX as usize {
            return Err(NbtError::Validation(format!(
                "string too long for tag encoding: {} bytes",
                s.len()
            )));
        }
        self.out.extend_from_slice(&(s.len() as u16).to_be_bytes());
        self.out.extend_from_slice(s.as_bytes());
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        if len > i32::MAX as usize {
            return Err(NbtError::Validation(format!("sequence too long: {len}")));
        }
        self.write_i32(len as i32);
        Ok(())
    }

    fn compound_payload(&mut self, c: &Compound) -> Result<()> {
        for (key, value) in c.iter() {
            self.push(value.kind().id());
            self.write_string(key)?;
            self.payload(value)?;
        }
        self.push(TagKind::End.id());
        Ok(())
    }

    fn payload(&mut self, tag: &Tag) -> Result<()> {
        match tag {
            Tag::Byte(v) => self.push(*v as u8),
            Tag::Short(v) => self.write_i16(*v),
            Tag::Int(v) => self.write_i32(*v),
            Tag::Long(v) => self.write_i64(*v),
            Tag::Float(v) => self.write_f32(*v),
            Tag::Double(v) => self.write_f64(*v),
            Tag::String(s) => self.write_string(s)?,
            Tag::ByteArray(v) => {
                self.write_len(v.len())?;
                self.out.extend(v.iter().map(|b| *b as u8));
            }
            Tag::IntArray(v) => {
                self.write_len(v.len())?;
                for x in v {
                    self.write_i32(*x);
                }
            }
            Tag::LongArray(v) => {
                self.write_len(v.len())?;
                for x in v {
                    self.write_i64(*x);
                }
            }
            Tag::List(l) => {
                self.push(l.elem().id());
                self.write_len(l.len())?;
                for item in l.iter() {
                    self.payload(item)?;
                }
            }
            Tag::Compound(c) => self.compound_payload(c)?,
        }
        Ok(())
    }
}
