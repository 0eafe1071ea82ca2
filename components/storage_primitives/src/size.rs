use crate::decimal::DecimalRepr;
use crate::error::{Result, StorageSizeError};
use crate::locale::{self, Locale};
use crate::selection::best_unit;
use crate::unit::{BinaryUnit, DecimalUnit, Scaled, StorageUnit};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A signed number of bytes
///
/// The byte count is the only state; every other view (binary or decimal
/// value, rendered string) is computed on demand. Equality and ordering are
/// by byte count.
///
/// Arithmetic is checked. The operators panic on overflow and on division by
/// zero; the `checked_*` methods return an error instead.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StorageSize(i64);

impl StorageSize {
    pub const ZERO: Self = Self(0);
    pub const MIN: Self = Self(i64::MIN);
    pub const MAX: Self = Self(i64::MAX);

    // ========================================================================
    // Constructors
    // ========================================================================

    /// Wrap an exact byte count
    pub const fn from_bytes(bytes: i64) -> Self {
        Self(bytes)
    }

    /// `value` whole units, multiplied exactly
    ///
    /// # Examples
    /// ```
    /// # use storage_primitives::{BinaryUnit, StorageSize, StorageSizeError};
    /// let size = StorageSize::from_units(3, BinaryUnit::Kibibyte)?;
    /// assert_eq!(size.bytes(), 3_072);
    /// assert!(StorageSize::from_units(8, BinaryUnit::Exbibyte).is_err());
    /// # Ok::<(), StorageSizeError>(())
    /// ```
    pub fn from_units<U: StorageUnit>(value: i64, unit: U) -> Result<Self> {
        value
            .checked_mul(unit.bytes())
            .map(Self)
            .ok_or(StorageSizeError::Overflow)
    }

    /// A fractional number of units that must land on a whole byte count
    ///
    /// The value is taken at its shortest decimal representation, so
    /// `0.1 kB` is exactly 100 bytes. Anything that would need rounding is a
    /// [`StorageSizeError::Precision`] error.
    ///
    /// # Examples
    /// ```
    /// # use storage_primitives::{BinaryUnit, StorageSize, StorageSizeError};
    /// let size = StorageSize::from_fractional_units(1.5, BinaryUnit::Kibibyte)?;
    /// assert_eq!(size.bytes(), 1_536);
    /// assert!(StorageSize::from_fractional_units(0.5, BinaryUnit::Byte).is_err());
    /// # Ok::<(), StorageSizeError>(())
    /// ```
    pub fn from_fractional_units<U: StorageUnit>(value: f64, unit: U) -> Result<Self> {
        let repr = DecimalRepr::from_f64(value).ok_or(StorageSizeError::NotFinite { value })?;
        repr.times_exact(unit.bytes(), value, unit.symbol())
            .map(Self)
    }

    const fn from_const_units(value: i64, multiplier: i64) -> Self {
        match value.checked_mul(multiplier) {
            Some(bytes) => Self(bytes),
            None => panic!("overflow when constructing StorageSize"),
        }
    }

    /// Create from kibibytes (1 KiB = 1,024 bytes)
    ///
    /// # Panics
    /// If the byte count does not fit in an `i64`. Use [`Self::from_units`]
    /// for a fallible version; the same holds for every named constructor.
    pub const fn kibibytes(value: i64) -> Self {
        Self::from_const_units(value, BinaryUnit::Kibibyte.bytes())
    }

    /// Create from mebibytes (1 MiB = 2^20 bytes)
    pub const fn mebibytes(value: i64) -> Self {
        Self::from_const_units(value, BinaryUnit::Mebibyte.bytes())
    }

    /// Create from gibibytes (1 GiB = 2^30 bytes)
    pub const fn gibibytes(value: i64) -> Self {
        Self::from_const_units(value, BinaryUnit::Gibibyte.bytes())
    }

    /// Create from tebibytes (1 TiB = 2^40 bytes)
    pub const fn tebibytes(value: i64) -> Self {
        Self::from_const_units(value, BinaryUnit::Tebibyte.bytes())
    }

    /// Create from pebibytes (1 PiB = 2^50 bytes)
    pub const fn pebibytes(value: i64) -> Self {
        Self::from_const_units(value, BinaryUnit::Pebibyte.bytes())
    }

    /// Create from exbibytes (1 EiB = 2^60 bytes)
    pub const fn exbibytes(value: i64) -> Self {
        Self::from_const_units(value, BinaryUnit::Exbibyte.bytes())
    }

    /// Create from kilobytes (1 kB = 1,000 bytes, decimal not binary)
    pub const fn kilobytes(value: i64) -> Self {
        Self::from_const_units(value, DecimalUnit::Kilobyte.bytes())
    }

    /// Create from megabytes (1 MB = 1,000,000 bytes)
    pub const fn megabytes(value: i64) -> Self {
        Self::from_const_units(value, DecimalUnit::Megabyte.bytes())
    }

    /// Create from gigabytes (1 GB = 1,000,000,000 bytes)
    pub const fn gigabytes(value: i64) -> Self {
        Self::from_const_units(value, DecimalUnit::Gigabyte.bytes())
    }

    /// Create from terabytes (1 TB = 1,000,000,000,000 bytes)
    pub const fn terabytes(value: i64) -> Self {
        Self::from_const_units(value, DecimalUnit::Terabyte.bytes())
    }

    /// Create from petabytes (1 PB = 10^15 bytes)
    pub const fn petabytes(value: i64) -> Self {
        Self::from_const_units(value, DecimalUnit::Petabyte.bytes())
    }

    /// Create from exabytes (1 EB = 10^18 bytes)
    pub const fn exabytes(value: i64) -> Self {
        Self::from_const_units(value, DecimalUnit::Exabyte.bytes())
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    /// Get the raw byte count
    pub const fn bytes(&self) -> i64 {
        self.0
    }

    /// Value in `unit` as a float; very large counts lose precision
    pub fn to_value<U: StorageUnit>(&self, unit: U) -> f64 {
        self.0 as f64 / unit.bytes() as f64
    }

    pub fn to_binary(&self, unit: BinaryUnit) -> f64 {
        self.to_value(unit)
    }

    pub fn to_decimal(&self, unit: DecimalUnit) -> f64 {
        self.to_value(unit)
    }

    /// The largest binary unit not exceeding this size, see [`best_unit`]
    pub fn best_binary_unit(&self) -> Scaled<BinaryUnit> {
        best_unit(self.0)
    }

    /// The largest decimal unit not exceeding this size, see [`best_unit`]
    pub fn best_decimal_unit(&self) -> Scaled<DecimalUnit> {
        best_unit(self.0)
    }

    // ========================================================================
    // Formatting
    // ========================================================================

    /// Render the best decimal unit with two fraction digits in `locale`
    ///
    /// # Examples
    /// ```
    /// # use storage_primitives::{Locale, StorageSize};
    /// let size = StorageSize::from_bytes(2_359_296);
    /// assert_eq!(size.format_with(&Locale::new("en-US")), "2.36 MB");
    /// assert_eq!(size.format_with(&Locale::new("de-DE")), "2,36 MB");
    /// ```
    pub fn format_with(&self, locale: &Locale) -> String {
        self.best_decimal_unit().format_with(locale)
    }

    /// Same as [`Self::format_with`] using the ambient default locale.
    ///
    /// Unlike every other method this reads process-wide state, so the output
    /// can change between calls; see [`default_locale`](crate::default_locale).
    pub fn default_string(&self) -> String {
        self.format_with(&locale::default_locale())
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    pub fn checked_add(self, other: StorageSize) -> Result<StorageSize> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(StorageSizeError::Overflow)
    }

    pub fn checked_sub(self, other: StorageSize) -> Result<StorageSize> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(StorageSizeError::Overflow)
    }

    pub fn checked_mul(self, factor: i64) -> Result<StorageSize> {
        self.0
            .checked_mul(factor)
            .map(Self)
            .ok_or(StorageSizeError::Overflow)
    }

    /// Divide, truncating toward zero
    pub fn checked_div(self, divisor: i64) -> Result<StorageSize> {
        if divisor == 0 {
            return Err(StorageSizeError::DivisionByZero);
        }
        // only i64::MIN / -1 remains
        self.0
            .checked_div(divisor)
            .map(Self)
            .ok_or(StorageSizeError::Overflow)
    }
}

/// Renders with the ambient default locale, see [`StorageSize::default_string`]
impl fmt::Display for StorageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.default_string())
    }
}

impl From<i64> for StorageSize {
    fn from(bytes: i64) -> Self {
        StorageSize(bytes)
    }
}

impl From<StorageSize> for i64 {
    fn from(size: StorageSize) -> Self {
        size.0
    }
}

impl TryFrom<u64> for StorageSize {
    type Error = StorageSizeError;

    fn try_from(bytes: u64) -> Result<Self> {
        i64::try_from(bytes)
            .map(Self)
            .map_err(|_| StorageSizeError::Overflow)
    }
}

impl Add for StorageSize {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(
            self.0
                .checked_add(other.0)
                .unwrap_or_else(|| panic!("overflow when adding storage sizes")),
        )
    }
}

impl Sub for StorageSize {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(
            self.0
                .checked_sub(other.0)
                .unwrap_or_else(|| panic!("overflow when subtracting storage sizes")),
        )
    }
}

impl AddAssign for StorageSize {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl SubAssign for StorageSize {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Mul<i64> for StorageSize {
    type Output = Self;

    fn mul(self, factor: i64) -> Self {
        Self(
            self.0
                .checked_mul(factor)
                .unwrap_or_else(|| panic!("overflow when multiplying storage size by scalar")),
        )
    }
}

impl Mul<StorageSize> for i64 {
    type Output = StorageSize;

    fn mul(self, size: StorageSize) -> StorageSize {
        size * self
    }
}

impl Div<i64> for StorageSize {
    type Output = Self;

    fn div(self, divisor: i64) -> Self {
        if divisor == 0 {
            panic!("attempt to divide storage size by zero");
        }
        Self(
            self.0
                .checked_div(divisor)
                .unwrap_or_else(|| panic!("overflow when dividing storage size by scalar")),
        )
    }
}

impl Neg for StorageSize {
    type Output = Self;

    fn neg(self) -> Self {
        Self(
            self.0
                .checked_neg()
                .unwrap_or_else(|| panic!("overflow when negating storage size")),
        )
    }
}

impl Sum for StorageSize {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(StorageSize::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a StorageSize> for StorageSize {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    #[test]
    fn test_named_constructors() {
        assert_eq!(StorageSize::kilobytes(1).bytes(), 1_000);
        assert_eq!(StorageSize::megabytes(1).bytes(), 1_000_000);
        assert_eq!(StorageSize::gigabytes(3).bytes(), 3_000_000_000);
        assert_eq!(StorageSize::terabytes(1).bytes(), 1_000_000_000_000);
        assert_eq!(StorageSize::petabytes(1).bytes(), 1_000_000_000_000_000);
        assert_eq!(StorageSize::exabytes(1).bytes(), 1_000_000_000_000_000_000);

        assert_eq!(StorageSize::kibibytes(1).bytes(), 1_024);
        assert_eq!(StorageSize::mebibytes(1).bytes(), 1_048_576);
        assert_eq!(StorageSize::gibibytes(1).bytes(), 1_073_741_824);
        assert_eq!(StorageSize::tebibytes(1).bytes(), 1_099_511_627_776);
        assert_eq!(StorageSize::pebibytes(1).bytes(), 1_125_899_906_842_624);
        assert_eq!(StorageSize::exbibytes(1).bytes(), 1 << 60);
    }

    #[test]
    #[should_panic(expected = "overflow when constructing StorageSize")]
    fn named_constructor_panics_on_overflow() {
        let _ = StorageSize::exbibytes(8);
    }

    #[rstest]
    fn binary_units_round_trip(
        #[values(
            BinaryUnit::Byte,
            BinaryUnit::Kibibyte,
            BinaryUnit::Mebibyte,
            BinaryUnit::Gibibyte,
            BinaryUnit::Tebibyte,
            BinaryUnit::Pebibyte,
            BinaryUnit::Exbibyte
        )]
        unit: BinaryUnit,
    ) {
        let size = StorageSize::from_units(1, unit).unwrap();
        assert_eq!(size.bytes(), unit.bytes());
        assert_eq!(size.to_binary(unit), 1.0);
    }

    #[rstest]
    fn decimal_units_round_trip(
        #[values(
            DecimalUnit::Byte,
            DecimalUnit::Kilobyte,
            DecimalUnit::Megabyte,
            DecimalUnit::Gigabyte,
            DecimalUnit::Terabyte,
            DecimalUnit::Petabyte,
            DecimalUnit::Exabyte
        )]
        unit: DecimalUnit,
    ) {
        let size = StorageSize::from_units(1, unit).unwrap();
        assert_eq!(size.bytes(), unit.bytes());
        assert_eq!(size.to_decimal(unit), 1.0);
    }

    #[test]
    fn converts_into_next_larger_unit() {
        for unit in &DecimalUnit::ALL[..DecimalUnit::ALL.len() - 1] {
            let next = unit.next_larger_unit().unwrap();
            let size = StorageSize::from_units(1, *unit).unwrap();
            assert_eq!(size.to_decimal(next), 0.001);
        }

        for unit in &BinaryUnit::ALL[..BinaryUnit::ALL.len() - 1] {
            let next = unit.next_larger_unit().unwrap();
            let size = StorageSize::from_units(1, *unit).unwrap();
            assert_eq!(
                size.to_binary(next),
                unit.bytes() as f64 / next.bytes() as f64
            );
        }
    }

    #[test]
    fn from_units_overflow() {
        assert_matches!(
            StorageSize::from_units(8, BinaryUnit::Exbibyte),
            Err(StorageSizeError::Overflow)
        );
        assert_matches!(
            StorageSize::from_units(-10, DecimalUnit::Exabyte),
            Err(StorageSizeError::Overflow)
        );
        assert_eq!(
            StorageSize::from_units(-8, BinaryUnit::Exbibyte).unwrap(),
            StorageSize::MIN
        );
    }

    #[test]
    fn fractional_units_are_exact() {
        let size = StorageSize::from_fractional_units(1.5, BinaryUnit::Kibibyte).unwrap();
        assert_eq!(size.bytes(), 1_536);

        let size = StorageSize::from_fractional_units(0.1, DecimalUnit::Kilobyte).unwrap();
        assert_eq!(size.bytes(), 100);

        let size = StorageSize::from_fractional_units(2.3, DecimalUnit::Gigabyte).unwrap();
        assert_eq!(size.bytes(), 2_300_000_000);

        let size = StorageSize::from_fractional_units(-0.25, BinaryUnit::Mebibyte).unwrap();
        assert_eq!(size.bytes(), -262_144);
    }

    #[test]
    fn fractional_units_never_truncate() {
        assert_matches!(
            StorageSize::from_fractional_units(1536.5, BinaryUnit::Byte),
            Err(StorageSizeError::Precision { unit: "B", .. })
        );
        assert_matches!(
            StorageSize::from_fractional_units(1.0000001, BinaryUnit::Kibibyte),
            Err(StorageSizeError::Precision { unit: "KiB", .. })
        );
        assert_matches!(
            StorageSize::from_fractional_units(f64::NAN, DecimalUnit::Megabyte),
            Err(StorageSizeError::NotFinite { .. })
        );
        assert_matches!(
            StorageSize::from_fractional_units(9.5, DecimalUnit::Exabyte),
            Err(StorageSizeError::Overflow)
        );
    }

    #[test]
    fn arithmetic_keeps_byte_precision() {
        let total = StorageSize::mebibytes(2) + StorageSize::kibibytes(512)
            - StorageSize::kibibytes(256);
        let expected = (2i64 << 20) + (512i64 << 10) - (256i64 << 10);
        assert_eq!(total.bytes(), expected);
        assert_eq!(total.bytes(), 2_359_296);
    }

    #[test]
    fn scalar_arithmetic() {
        let size = StorageSize::kibibytes(3);
        assert_eq!((size * 4).bytes(), 12_288);
        assert_eq!((4 * size).bytes(), 12_288);
        assert_eq!((size / 2).bytes(), 1_536);
        assert_eq!((StorageSize::from_bytes(7) / 2).bytes(), 3);
        assert_eq!((StorageSize::from_bytes(-7) / 2).bytes(), -3);
        assert_eq!((-size).bytes(), -3_072);

        let mut running = StorageSize::ZERO;
        running += size;
        running += size;
        running -= StorageSize::kibibytes(1);
        assert_eq!(running, StorageSize::kibibytes(5));
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let one = StorageSize::from_bytes(1);
        assert_matches!(StorageSize::MAX.checked_add(one), Err(StorageSizeError::Overflow));
        assert_matches!(StorageSize::MIN.checked_sub(one), Err(StorageSizeError::Overflow));
        assert_matches!(StorageSize::MAX.checked_mul(2), Err(StorageSizeError::Overflow));
        assert_matches!(StorageSize::MIN.checked_div(-1), Err(StorageSizeError::Overflow));
        assert_matches!(one.checked_div(0), Err(StorageSizeError::DivisionByZero));

        assert_eq!(one.checked_add(one).unwrap().bytes(), 2);
        assert_eq!(StorageSize::from_bytes(-9).checked_div(4).unwrap().bytes(), -2);
    }

    #[test]
    #[should_panic(expected = "overflow when adding storage sizes")]
    fn add_panics_on_overflow() {
        let _ = StorageSize::MAX + StorageSize::from_bytes(1);
    }

    #[test]
    #[should_panic(expected = "overflow when subtracting storage sizes")]
    fn sub_panics_on_overflow() {
        let _ = StorageSize::MIN - StorageSize::from_bytes(1);
    }

    #[test]
    #[should_panic(expected = "divide storage size by zero")]
    fn div_panics_on_zero() {
        let _ = StorageSize::kibibytes(1) / 0;
    }

    #[test]
    fn ordering_is_by_bytes() {
        assert!(StorageSize::megabytes(100) < StorageSize::gigabytes(1));
        assert!(StorageSize::kibibytes(1) > StorageSize::kilobytes(1));
        assert!(StorageSize::from_bytes(-1) < StorageSize::ZERO);
        assert_eq!(StorageSize::kilobytes(1_024), StorageSize::kibibytes(1_000));
        assert!(StorageSize::kibibytes(1) >= StorageSize::from_bytes(1_024));
    }

    #[test]
    fn value_equality() {
        let a = StorageSize::from_bytes(42);
        let b = StorageSize::from(42);
        assert_eq!(a, b);
        assert_eq!(a.bytes(), b.bytes());
        assert_eq!(i64::from(a), 42);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(-1)]
    #[case(i64::MAX)]
    #[case(i64::MIN)]
    fn bytes_round_trip(#[case] bytes: i64) {
        assert_eq!(StorageSize::from_bytes(bytes).bytes(), bytes);
    }

    #[test]
    fn try_from_unsigned() {
        assert_eq!(StorageSize::try_from(1_024u64).unwrap(), StorageSize::kibibytes(1));
        assert_matches!(
            StorageSize::try_from(u64::MAX),
            Err(StorageSizeError::Overflow)
        );
    }

    #[test]
    fn best_units() {
        let best = StorageSize::from_bytes(1_536).best_binary_unit();
        assert_eq!(best.unit, BinaryUnit::Kibibyte);
        assert_eq!(best.value, 1.5);

        let best = StorageSize::from_bytes(2_300_000_000).best_decimal_unit();
        assert_eq!(best.unit, DecimalUnit::Gigabyte);
        assert_eq!(best.value, 2.3);

        let total = StorageSize::kilobytes(900) + StorageSize::kilobytes(123);
        let binary = total.best_binary_unit();
        assert_eq!(binary.unit, BinaryUnit::Kibibyte);
        assert_eq!(binary.value, 999.0234375);
        let decimal = total.best_decimal_unit();
        assert_eq!(decimal.unit, DecimalUnit::Megabyte);
        assert_eq!(decimal.value, 1.023);
    }

    #[test]
    fn format_with_explicit_locale() {
        let total = StorageSize::mebibytes(2) + StorageSize::kibibytes(512)
            - StorageSize::kibibytes(256);
        assert_eq!(total.format_with(&Locale::new("en-US")), "2.36 MB");
        assert_eq!(total.format_with(&Locale::new("de-DE")), "2,36 MB");
        assert_eq!(total.format_with(&Locale::new("fr-FR")), "2,36 MB");
        assert_eq!(total.format_with(&Locale::new("ja-JP")), "2.36 MB");

        let root = Locale::root();
        assert_eq!(StorageSize::ZERO.format_with(&root), "0.00 B");
        assert_eq!(StorageSize::from_bytes(1_005).format_with(&root), "1.01 kB");
        assert_eq!(StorageSize::from_bytes(999_995).format_with(&root), "1000.00 kB");
        assert_eq!(StorageSize::from_bytes(-1_500).format_with(&root), "-1.50 kB");
    }

    #[test]
    fn sum_of_sizes() {
        let sizes = [
            StorageSize::kibibytes(1),
            StorageSize::kibibytes(2),
            StorageSize::from_bytes(3),
        ];
        assert_eq!(sizes.iter().sum::<StorageSize>().bytes(), 3_075);
        assert_eq!(sizes.into_iter().sum::<StorageSize>().bytes(), 3_075);
    }

    #[test]
    fn test_serialization() {
        let size = StorageSize::kibibytes(1);
        let json = serde_json::to_string(&size).unwrap();
        assert_eq!(json, "1024");

        let decoded: StorageSize = serde_json::from_str("-42").unwrap();
        assert_eq!(decoded, StorageSize::from_bytes(-42));
    }
}
