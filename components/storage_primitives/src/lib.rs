//! Storage size primitives
//!
//! This component provides a type-safe byte count with:
//! - Binary (KiB, MiB, …) and decimal (kB, MB, …) unit tables
//! - Exact construction from whole and fractional unit values
//! - Checked arithmetic and ordering by byte count
//! - "Best unit" selection and locale-aware display
//!
//! # Examples
//!
//! ```
//! use storage_primitives::{BinaryUnit, DecimalUnit, Locale, StorageSize};
//!
//! let total = StorageSize::mebibytes(2) + StorageSize::kibibytes(512)
//!     - StorageSize::kibibytes(256);
//! assert_eq!(total.bytes(), 2_359_296);
//!
//! let best = total.best_binary_unit();
//! assert_eq!(best.unit, BinaryUnit::Mebibyte);
//! assert_eq!(best.value, 2.25);
//!
//! assert_eq!(total.best_decimal_unit().unit, DecimalUnit::Megabyte);
//! assert_eq!(total.format_with(&Locale::new("de-DE")), "2,36 MB");
//! println!("{}", total); // ambient locale, e.g. "2.36 MB"
//! ```

mod decimal;
mod error;
mod ext;
mod fs;
mod locale;
mod selection;
mod size;
mod unit;

pub use error::{Result, StorageSizeError};
pub use ext::StorageSizeExt;
pub use locale::{
    clear_default_locale, default_locale, format_scaled, override_default_locale,
    set_default_locale, Locale, LocaleOverride, LOCALE_ENV_VARS,
};
pub use selection::best_unit;
pub use size::StorageSize;
pub use unit::{BinaryUnit, DecimalUnit, Scaled, StorageUnit};
