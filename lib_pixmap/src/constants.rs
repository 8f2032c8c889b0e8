/// The eight bytes every PNG stream starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Maximum number of entries an indexed image can carry.
pub const MAX_PALETTE_SIZE: usize = 256;

