//! Bounds-checked reads over a byte slice.
use byteorder::{BigEndian, ByteOrder, LittleEndian};

pub fn slice(data: &[u8], offset: usize, len: usize) -> Option<&[u8]> {
    data.get(offset..offset.checked_add(len)?)
}

pub fn u8_at(data: &[u8], offset: usize) -> Option<u8> {
    data.get(offset).copied()
}

pub fn be_u16(data: &[u8], offset: usize) -> Option<u16> {
    slice(data, offset, 2).map(BigEndian::read_u16)
}

pub fn be_u32(data: &[u8], offset: usize) -> Option<u32> {
    slice(data, offset, 4).map(BigEndian::read_u32)
}

pub fn be_u64(data: &[u8], offset: usize) -> Option<u64> {
    slice(data, offset, 8).map(BigEndian::read_u64)
}

pub fn le_u16(data: &[u8], offset: usize) -> Option<u16> {
    slice(data, offset, 2).map(LittleEndian::read_u16)
}

pub fn le_u32(data: &[u8], offset: usize) -> Option<u32> {
    slice(data, offset, 4).map(LittleEndian::read_u32)
}

pub fn le_u64(data: &[u8], offset: usize) -> Option<u64> {
    slice(data, offset, 8).map(LittleEndian::read_u64)
}

/// Four-character code as text, trailing spaces removed.
pub fn fourcc(code: &[u8]) -> String {
    String::from_utf8_lossy(code).trim_end().to_owned()
}

/// Iterates `(type, payload)` pairs of ISO base media boxes. Stops at the first
/// box whose size does not fit the remaining data.
pub struct Boxes<'a> {
    data: &'a [u8],
}

impl<'a> Boxes<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl<'a> Iterator for Boxes<'a> {
    type Item = ([u8; 4], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let size = be_u32(self.data, 0)? as u64;
        let kind: [u8; 4] = slice(self.data, 4, 4)?.try_into().ok()?;
        let (header, size) = match size {
            0 => (8, self.data.len() as u64),
            1 => (16, be_u64(self.data, 8)?),
            n => (8, n),
        };
        let size = usize::try_from(size).ok()?;
        if size < header || size > self.data.len() {
            self.data = &[];
            return None;
        }
        let payload = &self.data[header..size];
        self.data = &self.data[size..];
        Some((kind, payload))
    }
}

/// Payload of the first child box of type `kind`.
pub fn find_box<'a>(data: &'a [u8], kind: &[u8; 4]) -> Option<&'a [u8]> {
    Boxes::new(data).find(|(k, _)| k == kind).map(|(_, p)| p)
}
