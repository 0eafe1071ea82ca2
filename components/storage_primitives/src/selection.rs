use crate::unit::{Scaled, StorageUnit};

/// Pick the largest unit of `U` not exceeding the magnitude of `bytes`.
///
/// Selection is by threshold, not by rounding: exactly 1024 bytes is
/// `1.0 KiB`, 1023 bytes stays in bytes. Negative counts select by magnitude
/// and keep their sign in the returned value. Zero maps to the byte unit.
///
/// # Examples
/// ```
/// # use storage_primitives::{best_unit, BinaryUnit};
/// let best = best_unit::<BinaryUnit>(1_536);
/// assert_eq!(best.unit, BinaryUnit::Kibibyte);
/// assert_eq!(best.value, 1.5);
/// ```
pub fn best_unit<U: StorageUnit>(bytes: i64) -> Scaled<U> {
    let magnitude = bytes.unsigned_abs();
    let unit = U::ALL
        .iter()
        .rev()
        .copied()
        .find(|unit| magnitude >= unit.bytes().unsigned_abs())
        .unwrap_or(U::BYTE);

    Scaled::new(bytes as f64 / unit.bytes() as f64, unit)
}
