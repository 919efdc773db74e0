//! Random text generator.

use rand::Rng;

/// Alphabet random text is drawn from.
pub const TEXT_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

/// Length of every random text value, excluding quotes.
pub const TEXT_LEN: usize = 42;

/// Fill `scratch` with a single-quoted random string and append it to `out`.
///
/// `scratch` is cleared first; its capacity is reused across calls.
pub fn write_text<R: Rng>(rng: &mut R, scratch: &mut String, out: &mut String) {
    scratch.clear();
    scratch.push('\'');
    for _ in 0..TEXT_LEN {
        let idx = rng.gen_range(0..TEXT_CHARS.len());
        scratch.push(TEXT_CHARS[idx] as char);
    }
    scratch.push('\'');
    out.push_str(scratch);
}
