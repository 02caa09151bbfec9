//! Miscellaneous hashing helpers.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A trait for floats that need to take part in hashing.
pub trait HashableFloat {
    /// Returns the mantissa-exponent-sign triplet for a float.
    ///
    /// Both signed zeros decode to the same triplet so that values comparing equal also hash
    /// equally.
    ///
    /// Reference: <https://stackoverflow.com/questions/39638363/how-can-i-use-a-hashmap-with-f64-as-key-in-rust>
    ///
    /// # Returns
    ///
    /// The corresponding mantissa-exponent-sign triplet.
    fn integer_decode(self) -> (u64, i16, i8);
}

impl HashableFloat for f64 {
    fn integer_decode(self) -> (u64, i16, i8) {
        let bits = if self == 0.0 { 0u64 } else { self.to_bits() };
        let sign: i8 = if bits >> 63 == 0 { 1 } else { -1 };
        let mut exponent: i16 = ((bits >> 52) & 0x7ff) as i16;
        let mantissa = if exponent == 0 {
            (bits & 0xfffffffffffff) << 1
        } else {
            (bits & 0xfffffffffffff) | 0x10000000000000
        };

        exponent -= 1023 + 52;
        (mantissa, exponent, sign)
    }
}

/// Returns the hash value of a hashable struct.
///
/// # Arguments
///
/// * `t` - A struct of a hashable type.
///
/// # Returns
///
/// The hash value.
pub fn calculate_hash<T: Hash + ?Sized>(t: &T) -> u64 {
    let mut s = DefaultHasher::new();
    t.hash(&mut s);
    s.finish()
}
