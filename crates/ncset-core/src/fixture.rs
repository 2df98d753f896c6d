//! Synthetic dump builder shared by the unit tests.

use crate::blob::ByteBlob;
use crate::blob::layout::{header, section};
use crate::checksum;

/// 203 KiB, the size of a first-generation dump.
pub const Z5_LEN: usize = 203 * 1024;
/// 359 KiB, the size of a second-generation dump.
pub const Z5II_LEN: usize = 359 * 1024;

/// 7 known IDs, 3 empty slots and 2 unlisted IDs (69, 82).
pub fn typical_slots() -> [u8; 12] {
    [21, 22, 0, 69, 24, 11, 0, 36, 82, 15, 0, 27]
}

/// Deterministic generator so fixtures never change between runs.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    pub fn next_u8(&mut self) -> u8 {
        (self.next_u32() >> 16) as u8
    }

    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (1u64 << 31) as f64
    }
}

pub struct DumpBuilder {
    len: usize,
    density: f64,
    seed: u64,
    sections: Vec<(usize, u8, [u8; 12])>,
    patches: Vec<(usize, Vec<u8>)>,
}

impl DumpBuilder {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            density: 0.2,
            seed: 1,
            sections: Vec::new(),
            patches: Vec::new(),
        }
    }

    /// Fraction of bytes set to non-zero filler. Filler values are 0x40 and
    /// above, so they never collide with a mode code.
    pub fn filler_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Lay down a slot table and mode byte at `offset`.
    pub fn section(mut self, offset: usize, mode_code: u8, slots: [u8; 12]) -> Self {
        self.sections.push((offset, mode_code, slots));
        self
    }

    pub fn bytes(mut self, offset: usize, data: &[u8]) -> Self {
        self.patches.push((offset, data.to_vec()));
        self
    }

    pub fn build(self) -> ByteBlob {
        let mut rng = Lcg::new(self.seed);
        let mut bytes: Vec<u8> = (0..self.len)
            .map(|_| {
                if rng.next_f64() < self.density {
                    0x40 + rng.next_u8() % 0xC0
                } else {
                    0
                }
            })
            .collect();

        write_field(&mut bytes, header::MODEL, header::MODEL_LEN, b"NIKON Z 5");
        write_field(&mut bytes, header::FIRMWARE, header::FIRMWARE_LEN, b"01.30");

        for (offset, code, slots) in &self.sections {
            for (index, id) in slots.iter().enumerate() {
                let at = offset + section::slot(index);
                bytes[at..at + section::WORD].copy_from_slice(&[*id, 0, 0, 0]);
            }
            bytes[offset + section::MODE_ID] = *code;
        }
        for (offset, data) in &self.patches {
            bytes[*offset..*offset + data.len()].copy_from_slice(data);
        }
        if bytes.len() >= 2 {
            let _ = checksum::repair_in_place(&mut bytes);
        }

        ByteBlob::new(bytes)
    }
}

fn write_field(bytes: &mut [u8], offset: usize, len: usize, text: &[u8]) {
    if bytes.len() < offset + len {
        return;
    }
    let field = &mut bytes[offset..offset + len];
    field.fill(0);
    field[..text.len()].copy_from_slice(text);
}
