const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a digest over card pixels.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PixelDigest {
    state: u64,
}

impl Default for PixelDigest {
    fn default() -> Self {
        Self { state: FNV_OFFSET }
    }
}

impl PixelDigest {
    pub(crate) fn update(&mut self, bytes: &[u8]) {
        self.state = bytes.iter().fold(self.state, |h, &b| {
            (h ^ u64::from(b)).wrapping_mul(FNV_PRIME)
        });
    }

    pub(crate) fn digest(self) -> u64 {
        self.state
    }
}

/// `channel * coverage / 255`, rounded to nearest.
pub(crate) fn scale_by_coverage(channel: u8, coverage: u8) -> u8 {
    ((u32::from(channel) * u32::from(coverage) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
