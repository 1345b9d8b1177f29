//! A hasher which just proxies for the integer it's given. Handy for integer
//! keys in a [`HashTable`](crate::HashTable), where it makes it trivial to
//! reason about which bucket a key lands in.

use std::hash::{BuildHasher, Hasher};

/// Proxies integers for themselves. `write_u16` through `write_u64` (and the
/// signed writes) assign the value outright. Raw bytes given to `write` are
/// read little-endian, so `[1, 2]` becomes `0x0201` and only the leading
/// eight bytes survive a longer slice. `write_u8` shifts its byte in at the
/// low end, so a run of them reads big-endian. Don't use this for anything
/// but integer keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHasher(u64);

impl Hasher for NullHasher {
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.0 = (self.0 << 8) | *byte as u64;
        }
    }

    // folds like `write`, so a str's trailing 0xff marker doesn't clobber
    // the bytes before it.
    fn write_u8(&mut self, i: u8) {
        self.0 = (self.0 << 8) | i as u64;
    }

    fn write_u16(&mut self, i: u16) {
        self.0 = i as u64;
    }

    fn write_u32(&mut self, i: u32) {
        self.0 = i as u64;
    }

    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    fn write_usize(&mut self, i: usize) {
        self.0 = i as u64;
    }

    // the default signed writes cast to the unsigned width, which would lose
    // the sign of narrow integers; extend them to 64 bits first.
    fn write_i8(&mut self, i: i8) {
        self.0 = i as i64 as u64;
    }

    fn write_i16(&mut self, i: i16) {
        self.0 = i as i64 as u64;
    }

    fn write_i32(&mut self, i: i32) {
        self.0 = i as i64 as u64;
    }

    fn write_isize(&mut self, i: isize) {
        self.0 = i as i64 as u64;
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Builds new NullHashers on demand.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildNullHasher;

impl BuildHasher for BuildNullHasher {
    type Hasher = NullHasher;

    fn build_hasher(&self) -> Self::Hasher {
        NullHasher(0)
    }
}
