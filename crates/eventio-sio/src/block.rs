//! Block primitives: little-endian scalars, length-prefixed strings,
//! vectors and map-like sequences of key/value pairs.

use crate::errors::SioError;

/// Growable buffer that block data is written into.
#[derive(Debug, Default)]
pub struct WriteDevice {
    buf: Vec<u8>,
}

impl WriteDevice {
    /// Creates an empty device.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one value.
    pub fn data<T: BlockWrite + ?Sized>(&mut self, value: &T) {
        value.write(self);
    }

    /// Writes anything that iterates like a map: a count, then key/value pairs.
    pub fn map_like<'a, K, V, I>(&mut self, entries: I)
    where
        K: BlockWrite + 'a + ?Sized,
        V: BlockWrite + 'a + ?Sized,
        I: IntoIterator<Item = (&'a K, &'a V)>,
        I::IntoIter: ExactSizeIterator,
    {
        let entries = entries.into_iter();
        self.data(&(entries.len() as u32));
        for (key, value) in entries {
            self.data(key);
            self.data(value);
        }
    }

    /// Writes bytes as they are, without a length prefix.
    pub fn fixed(&mut self, bytes: &[u8]) {
        self.put(bytes);
    }

    fn put(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing was written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the device, returning the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over encoded block data.
#[derive(Debug)]
pub struct ReadDevice<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ReadDevice<'a> {
    /// Creates a device reading from the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Reads one value.
    pub fn data<T: BlockRead>(&mut self) -> Result<T, SioError> {
        T::read(self)
    }

    /// Reads a map-like sequence written by [`WriteDevice::map_like`].
    pub fn map_like<K, V, M>(&mut self) -> Result<M, SioError>
    where
        K: BlockRead,
        V: BlockRead,
        M: FromIterator<(K, V)>,
    {
        let count = self.count()?;
        (0..count)
            .map(|_| -> Result<(K, V), SioError> { Ok((self.data()?, self.data()?)) })
            .collect()
    }

    /// Reads an element count, rejecting counts that cannot fit in the remaining bytes.
    fn count(&mut self) -> Result<usize, SioError> {
        let count = self.data::<u32>()? as usize;
        if count > self.remaining() {
            return Err(self.error(format!(
                "count {} exceeds remaining {} bytes",
                count,
                self.remaining()
            )));
        }
        Ok(count)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], SioError> {
        if n > self.remaining() {
            return Err(self.error(format!(
                "need {} bytes, {} remaining",
                n,
                self.remaining()
            )));
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads `N` bytes written by [`WriteDevice::fixed`].
    pub fn fixed<const N: usize>(&mut self) -> Result<[u8; N], SioError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn error(&self, reason: String) -> SioError {
        SioError::Decode {
            offset: self.pos,
            reason,
        }
    }

    /// Current offset into the block data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Fails if any bytes are left unread.
    pub fn finish(self) -> Result<(), SioError> {
        if self.remaining() != 0 {
            return Err(self.error(format!("{} trailing bytes", self.remaining())));
        }
        Ok(())
    }
}

/// Values that can be encoded into a block.
pub trait BlockWrite {
    /// Appends the encoding of `self`.
    fn write(&self, device: &mut WriteDevice);
}

/// Values that can be decoded from a block.
pub trait BlockRead: Sized {
    /// Decodes one value.
    fn read(device: &mut ReadDevice<'_>) -> Result<Self, SioError>;
}

macro_rules! le_scalar {
    ($ty:ty) => {
        impl BlockWrite for $ty {
            fn write(&self, device: &mut WriteDevice) {
                device.put(&self.to_le_bytes());
            }
        }

        impl BlockRead for $ty {
            fn read(device: &mut ReadDevice<'_>) -> Result<Self, SioError> {
                Ok(<$ty>::from_le_bytes(device.fixed()?))
            }
        }
    };
}

le_scalar!(u8);
le_scalar!(u16);
le_scalar!(u32);
le_scalar!(i32);
le_scalar!(f32);
le_scalar!(f64);

impl BlockWrite for str {
    fn write(&self, device: &mut WriteDevice) {
        device.data(&(self.len() as u32));
        device.put(self.as_bytes());
    }
}

impl BlockWrite for String {
    fn write(&self, device: &mut WriteDevice) {
        self.as_str().write(device);
    }
}

impl BlockRead for String {
    fn read(device: &mut ReadDevice<'_>) -> Result<Self, SioError> {
        let len = device.data::<u32>()? as usize;
        let bytes = device.take(len)?;
        Ok(std::str::from_utf8(bytes)?.to_string())
    }
}

impl<T: BlockWrite> BlockWrite for Vec<T> {
    fn write(&self, device: &mut WriteDevice) {
        self.as_slice().write(device);
    }
}

impl<T: BlockRead> BlockRead for Vec<T> {
    fn read(device: &mut ReadDevice<'_>) -> Result<Self, SioError> {
        let count = device.count()?;
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(device.data::<T>()?);
        }
        Ok(out)
    }
}

impl<T: BlockWrite> BlockWrite for [T] {
    fn write(&self, device: &mut WriteDevice) {
        device.data(&(self.len() as u32));
        for item in self {
            device.data(item);
        }
    }
}

impl<A: BlockWrite, B: BlockWrite> BlockWrite for (A, B) {
    fn write(&self, device: &mut WriteDevice) {
        device.data(&self.0);
        device.data(&self.1);
    }
}

impl<A: BlockRead, B: BlockRead> BlockRead for (A, B) {
    fn read(device: &mut ReadDevice<'_>) -> Result<Self, SioError> {
        Ok((device.data::<A>()?, device.data::<B>()?))
    }
}
