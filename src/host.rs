use std::collections::BTreeMap;

use tracing::warn;

/// Bound on NUL-terminated string reads.
pub(crate) const MAX_C_STRING_LEN: usize = 4096;

/// Services the exploration engine provides to JNI handlers.
pub(crate) trait Host {
    fn pointer_bits(&self) -> u32;

    /// Read `len` bytes at `address`, or `None` when any byte is unmapped.
    fn read_bytes(&self, address: u64, len: usize) -> Option<Vec<u8>>;

    /// Allocate a handle that aliases no previous one.
    fn fresh_handle(&mut self, bits: u32) -> u64;

    fn pointer_bytes(&self) -> usize {
        (self.pointer_bits() / 8) as usize
    }

    /// Decode a NUL-terminated string (lossy UTF-8) of at most `MAX_C_STRING_LEN` bytes.
    ///
    /// Longer strings are unreadable rather than truncated.
    fn read_c_string(&self, address: u64) -> Option<String> {
        let mut bytes = Vec::new();
        for offset in 0..=MAX_C_STRING_LEN as u64 {
            let byte = self.read_bytes(address.checked_add(offset)?, 1)?[0];
            if byte == 0 {
                return Some(String::from_utf8_lossy(&bytes).into_owned());
            }
            bytes.push(byte);
        }
        warn!("string at {address:#x} exceeds {MAX_C_STRING_LEN} bytes");
        None
    }

    /// Read one little-endian pointer-width word.
    fn read_pointer(&self, address: u64) -> Option<u64> {
        let width = self.pointer_bytes();
        let bytes = self.read_bytes(address, width)?;
        let mut word = [0u8; 8];
        word[..width.min(8)].copy_from_slice(&bytes[..width.min(8)]);
        Some(u64::from_le_bytes(word))
    }
}

/// Byte-region memory plus a monotonically increasing handle counter.
#[derive(Clone, Debug)]
pub(crate) struct MemoryHost {
    pointer_bits: u32,
    regions: BTreeMap<u64, Vec<u8>>,
    next_handle: u64,
    /// Counter for values narrower than 32 bits, wrapped to the requested width.
    next_scalar: u64,
}

const FIRST_HANDLE: u64 = 0x7000_0000;

impl MemoryHost {
    pub(crate) fn new(pointer_bits: u32) -> Self {
        Self {
            pointer_bits,
            regions: BTreeMap::new(),
            next_handle: FIRST_HANDLE,
            next_scalar: 1,
        }
    }

    pub(crate) fn map(&mut self, address: u64, bytes: Vec<u8>) {
        self.regions.insert(address, bytes);
    }

    pub(crate) fn map_c_string(&mut self, address: u64, value: &str) {
        let mut bytes = value.as_bytes().to_vec();
        bytes.push(0);
        self.map(address, bytes);
    }

    /// Map pointer-width little-endian words.
    pub(crate) fn map_words(&mut self, address: u64, words: &[u64]) {
        let width = (self.pointer_bits / 8) as usize;
        let bytes = words
            .iter()
            .flat_map(|word| word.to_le_bytes().into_iter().take(width))
            .collect();
        self.map(address, bytes);
    }
}

impl Host for MemoryHost {
    fn pointer_bits(&self) -> u32 {
        self.pointer_bits
    }

    fn read_bytes(&self, address: u64, len: usize) -> Option<Vec<u8>> {
        let (start, bytes) = self.regions.range(..=address).next_back()?;
        let offset = usize::try_from(address - start).ok()?;
        let end = offset.checked_add(len)?;
        bytes.get(offset..end).map(<[u8]>::to_vec)
    }

    fn fresh_handle(&mut self, bits: u32) -> u64 {
        if bits >= 32 {
            let handle = self.next_handle;
            self.next_handle += 1;
            return handle;
        }
        let mask = (1u64 << bits) - 1;
        let handle = self.next_scalar & mask;
        self.next_scalar += 1;
        handle
    }
}
