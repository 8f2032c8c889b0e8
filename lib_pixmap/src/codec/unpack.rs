/// Appends `count` samples from a packed row to `out`, one byte per sample.
///
/// Sub-byte samples are read most significant bits first and keep their raw value,
/// so a 2-bit sample lands in `0..=3`. Depth 8 rows are copied as they are.
pub fn unpack_row(row: &[u8], bit_depth: u8, count: usize, out: &mut Vec<u8>) {
    match bit_depth {
        1 | 2 | 4 => {
            let per_byte = (8 / bit_depth) as usize;
            let mask = (1u8 << bit_depth) - 1;
            out.extend((0..count).map(|i| {
                let byte = row[i / per_byte];
                let shift = 8 - bit_depth * (1 + (i % per_byte) as u8);
                (byte >> shift) & mask
            }));
        }
        _ => out.extend_from_slice(&row[..count]),
    }
}
