// Big-endian tagged binary reader with transparent envelope detection
use std::borrow::Cow;
use std::io::Read as _;

use flate2::read::{GzDecoder, ZlibDecoder};

use crate::error::{NbtError, Result};
use crate::tag::{Compound, NbtList, Tag, TagKind};

/// Outer byte-level wrapping of a serialized document. Detected on load and
/// reproduced on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Zlib,
}

/// Decode a full document from bytes: sniff the envelope, decompress if
/// needed, and parse the root compound. Returns the detected envelope, the
/// root tag's name, and the root compound.
pub fn parse_document(data: &[u8]) -> Result<(Compression, String, Compound)> {
    let compression = sniff_envelope(data)?;
    let bytes: Cow<'_, [u8]> = match compression {
        Compression::None => Cow::Borrowed(data),
        Compression::Gzip => {
            let mut out = Vec::new();
            GzDecoder::new(data)
                .read_to_end(&mut out)
                .map_err(|e| NbtError::Format(format!("invalid gzip stream: {e}")))?;
            Cow::Owned(out)
        }
        Compression::Zlib => {
            let mut out = Vec::new();
            ZlibDecoder::new(data)
                .read_to_end(&mut out)
                .map_err(|e| NbtError::Format(format!("invalid zlib stream: {e}")))?;
            Cow::Owned(out)
        }
    };
    let mut parser = Parser::new(&bytes);
    let (name, root) = parser.parse_root()?;
    Ok((compression, name, root))
}

fn sniff_envelope(data: &[u8]) -> Result<Compression> {
    match data.first().copied() {
        None => Err(NbtError::Format("empty data".to_string())),
        Some(0x1f) if data.get(1) == Some(&0x8b) => Ok(Compression::Gzip),
        Some(0x78) => Ok(Compression::Zlib),
        Some(id) if id == TagKind::Compound.id() => Ok(Compression::None),
        Some(other) => Err(NbtError::Format(format!(
            "unrecognized header byte {other:#04x}: not a raw compound, gzip, or zlib stream"
        ))),
    }
}

#[derive(Debug)]
pub struct Parser<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Read the root record: a named compound tag. Trailing bytes after the
    /// closing End are ignored.
    pub fn parse_root(&mut self) -> Result<(String, Compound)> {
        let id = self.read_u8()?;
        if id != TagKind::Compound.id() {
            return Err(NbtError::Format(format!(
                "expected Compound root (0x0a), found {id:#04x} at {:#x}",
                self.pos - 1
            )));
        }
        let name = self.read_string()?;
        let root = self.read_compound_payload()?;
        Ok((name, root))
    }

    fn read_compound_payload(&mut self) -> Result<Compound> {
        let mut out = Compound::new();
        loop {
            let id = self.read_u8()?;
            if id == TagKind::End.id() {
                break;
            }
            let kind = TagKind::from_id(id).ok_or_else(|| {
                NbtError::Format(format!("unknown tag id {id:#04x} at {:#x}", self.pos - 1))
            })?;
            let name = self.read_string()?;
            let value = self.read_payload(kind)?;
            out.insert(name, value);
        }
        Ok(out)
    }

    fn read_payload(&mut self, kind: TagKind) -> Result<Tag> {
        let tag = match kind {
            TagKind::End => {
                return Err(NbtError::Format(format!(
                    "End tag has no payload (at {:#x})",
                    self.pos
                )));
            }
            TagKind::Byte => Tag::Byte(self.read_i8()?),
            TagKind::Short => Tag::Short(self.read_i16()?),
            TagKind::Int => Tag::Int(self.read_i32()?),
            TagKind::Long => Tag::Long(self.read_i64()?),
            TagKind::Float => Tag::Float(self.read_f32()?),
            TagKind::Double => Tag::Double(self.read_f64()?),
            TagKind::String => Tag::String(self.read_string()?),
            TagKind::ByteArray => {
                let len = self.read_len()?;
                let raw = self.read_slice(len)?;
                Tag::ByteArray(raw.iter().map(|b| *b as i8).collect())
            }
            TagKind::IntArray => {
                let len = self.read_len()?;
                let mut out = Vec::with_capacity(len);
                for _ in 0..len {
                    out.push(self.read_i32()?);
                }
                Tag::IntArray(out)
            }
            TagKind::LongArray => {
                let len = self.read_len()?;
                let mut out = Vec::with_capacity(len);
                for _ in 0..len {
                    out.push(self.read_i64()?);
                }
                Tag::LongArray(out)
            }
            TagKind::List => {
                let elem_id = self.read_u8()?;
                let elem = TagKind::from_id(elem_id).ok_or_else(|| {
                    NbtError::Format(format!(
                        "unknown list element id {elem_id:#04x} at {:#x}",
                        self.pos - 1
                    ))
                })?;
                let len = self.read_len()?;
                if elem == TagKind::End && len > 0 {
                    return Err(NbtError::Format(format!(
                        "non-empty list with End element type at {:#x}",
                        self.pos
                    )));
                }
                let mut list = NbtList::with_elem(elem);
                for _ in 0..len {
                    let value = self.read_payload(elem)?;
                    list.push(value)?;
                }
                Tag::List(list)
            }
            TagKind::Compound => Tag::Compound(self.read_compound_payload()?),
        };
        Ok(tag)
    }

    fn read_len(&mut self) -> Result<usize> {
        let n = self.read_i32()?;
        if n < 0 {
            return Err(NbtError::Format(format!(
                "negative length {n} at {:#x}",
                self.pos - 4
            )));
        }
        Ok(n as usize)
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let raw = self.read_slice(len)?;
        let s = std::str::from_utf8(raw).map_err(|_| {
            NbtError::Format(format!("invalid utf8 in string at {:#x}", self.pos - len))
        })?;
        Ok(s.to_string())
    }

    // Low-level utilities (big-endian)
    fn eof(&self) -> NbtError {
        NbtError::Format(format!("unexpected end of data at {:#x}", self.pos))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let b = self.data.get(self.pos).copied().ok_or_else(|| self.eof())?;
        self.pos += 1;
        Ok(b)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        if self.pos + 2 > self.data.len() {
            return Err(self.eof());
        }
        let b = u16::from_be_bytes([self.data[self.pos], self.data[self.pos + 1]]);
        self.pos += 2;
        Ok(b)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        if self.pos + 4 > self.data.len() {
            return Err(self.eof());
        }
        let b = u32::from_be_bytes([
            self.data[self.pos],
            self.data[self.pos + 1],
            self.data[self.pos + 2],
            self.data[self.pos + 3],
        ]);
        self.pos += 4;
        Ok(b)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        if self.pos + 8 > self.data.len() {
            return Err(self.eof());
        }
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.data[self.pos..self.pos + 8]);
        self.pos += 8;
        Ok(u64::from_be_bytes(buf))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_u64()? as i64)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.pos + len > self.data.len() {
            return Err(self.eof());
        }
        let s = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(s)
    }
}
