use crate::error::{Result, StorageSizeError};
use crate::locale::{self, Locale};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed table of storage units ordered by strictly increasing multiplier.
///
/// Implemented by [`BinaryUnit`] and [`DecimalUnit`]; everything generic over
/// units in this crate is statically dispatched through this trait.
pub trait StorageUnit: Copy + Eq + fmt::Debug + 'static {
    /// The one-byte unit every table starts with
    const BYTE: Self;

    /// Every unit of the table, smallest first
    const ALL: &'static [Self];

    /// Short symbol such as `"KiB"` or `"MB"`
    fn symbol(self) -> &'static str;

    /// Exact number of bytes in one of this unit
    fn bytes(self) -> i64;

    /// The unit directly above this one in its table
    ///
    /// # Examples
    /// ```
    /// # use storage_primitives::{BinaryUnit, StorageUnit, StorageSizeError};
    /// assert_eq!(BinaryUnit::Kibibyte.next_larger_unit()?, BinaryUnit::Mebibyte);
    /// assert!(BinaryUnit::Exbibyte.next_larger_unit().is_err());
    /// # Ok::<(), StorageSizeError>(())
    /// ```
    fn next_larger_unit(self) -> Result<Self> {
        Self::ALL
            .iter()
            .position(|unit| *unit == self)
            .and_then(|index| Self::ALL.get(index + 1))
            .copied()
            .ok_or(StorageSizeError::NoLargerUnit {
                unit: self.symbol(),
            })
    }
}

/// Units scaled by powers of 1024
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BinaryUnit {
    Byte,
    Kibibyte,
    Mebibyte,
    Gibibyte,
    Tebibyte,
    Pebibyte,
    Exbibyte,
}

impl BinaryUnit {
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryUnit::Byte => "B",
            BinaryUnit::Kibibyte => "KiB",
            BinaryUnit::Mebibyte => "MiB",
            BinaryUnit::Gibibyte => "GiB",
            BinaryUnit::Tebibyte => "TiB",
            BinaryUnit::Pebibyte => "PiB",
            BinaryUnit::Exbibyte => "EiB",
        }
    }

    pub const fn bytes(self) -> i64 {
        match self {
            BinaryUnit::Byte => 1,
            BinaryUnit::Kibibyte => 1 << 10,
            BinaryUnit::Mebibyte => 1 << 20,
            BinaryUnit::Gibibyte => 1 << 30,
            BinaryUnit::Tebibyte => 1 << 40,
            BinaryUnit::Pebibyte => 1 << 50,
            // 2^70 would not fit in i64
            BinaryUnit::Exbibyte => 1 << 60,
        }
    }
}

impl StorageUnit for BinaryUnit {
    const BYTE: Self = BinaryUnit::Byte;

    const ALL: &'static [Self] = &[
        BinaryUnit::Byte,
        BinaryUnit::Kibibyte,
        BinaryUnit::Mebibyte,
        BinaryUnit::Gibibyte,
        BinaryUnit::Tebibyte,
        BinaryUnit::Pebibyte,
        BinaryUnit::Exbibyte,
    ];

    fn symbol(self) -> &'static str {
        BinaryUnit::symbol(self)
    }

    fn bytes(self) -> i64 {
        BinaryUnit::bytes(self)
    }
}

/// Units scaled by powers of 1000
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DecimalUnit {
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte,
    Terabyte,
    Petabyte,
    Exabyte,
}

impl DecimalUnit {
    pub const fn symbol(self) -> &'static str {
        match self {
            DecimalUnit::Byte => "B",
            DecimalUnit::Kilobyte => "kB",
            DecimalUnit::Megabyte => "MB",
            DecimalUnit::Gigabyte => "GB",
            DecimalUnit::Terabyte => "TB",
            DecimalUnit::Petabyte => "PB",
            DecimalUnit::Exabyte => "EB",
        }
    }

    pub const fn bytes(self) -> i64 {
        match self {
            DecimalUnit::Byte => 1,
            DecimalUnit::Kilobyte => 1_000,
            DecimalUnit::Megabyte => 1_000_000,
            DecimalUnit::Gigabyte => 1_000_000_000,
            DecimalUnit::Terabyte => 1_000_000_000_000,
            DecimalUnit::Petabyte => 1_000_000_000_000_000,
            DecimalUnit::Exabyte => 1_000_000_000_000_000_000,
        }
    }
}

impl StorageUnit for DecimalUnit {
    const BYTE: Self = DecimalUnit::Byte;

    const ALL: &'static [Self] = &[
        DecimalUnit::Byte,
        DecimalUnit::Kilobyte,
        DecimalUnit::Megabyte,
        DecimalUnit::Gigabyte,
        DecimalUnit::Terabyte,
        DecimalUnit::Petabyte,
        DecimalUnit::Exabyte,
    ];

    fn symbol(self) -> &'static str {
        DecimalUnit::symbol(self)
    }

    fn bytes(self) -> i64 {
        DecimalUnit::bytes(self)
    }
}

impl fmt::Display for BinaryUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for DecimalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A value expressed in some unit, e.g. `1.5 KiB`
///
/// Produced by conversions and best-unit selection; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scaled<U> {
    pub value: f64,
    pub unit: U,
}

impl<U: StorageUnit> Scaled<U> {
    pub fn new(value: f64, unit: U) -> Self {
        Self { value, unit }
    }

    /// Render with two fraction digits using the given locale
    pub fn format_with(&self, locale: &Locale) -> String {
        locale::format_scaled(self.value, self.unit.symbol(), locale)
    }
}

/// Uses the ambient default locale, see [`default_locale`](crate::default_locale).
impl<U: StorageUnit> fmt::Display for Scaled<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(&locale::default_locale()))
    }
}
