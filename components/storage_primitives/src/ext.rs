//! Unit shorthands on plain integers.
//!
//! ```
//! use storage_primitives::StorageSizeExt;
//!
//! let total = 2.mib() + 512.kib() - 256.kib();
//! assert_eq!(total.bytes(), 2_359_296);
//! assert_eq!(3.gb().bytes(), 3_000_000_000);
//! ```

use crate::size::StorageSize;

/// Build a [`StorageSize`] from an integer count of some unit
///
/// Every method panics if the byte count does not fit in an `i64`, like the
/// named constructors on [`StorageSize`].
pub trait StorageSizeExt {
    fn to_storage_size(self) -> StorageSize;

    fn kib(self) -> StorageSize;
    fn mib(self) -> StorageSize;
    fn gib(self) -> StorageSize;
    fn tib(self) -> StorageSize;
    fn pib(self) -> StorageSize;
    fn eib(self) -> StorageSize;

    fn kb(self) -> StorageSize;
    fn mb(self) -> StorageSize;
    fn gb(self) -> StorageSize;
    fn tb(self) -> StorageSize;
    fn pb(self) -> StorageSize;
    fn eb(self) -> StorageSize;
}

macro_rules! impl_storage_size_ext {
    ($($int:ty),*) => {
        $(
            impl StorageSizeExt for $int {
                fn to_storage_size(self) -> StorageSize {
                    StorageSize::from_bytes(i64::from(self))
                }

                fn kib(self) -> StorageSize {
                    StorageSize::kibibytes(i64::from(self))
                }

                fn mib(self) -> StorageSize {
                    StorageSize::mebibytes(i64::from(self))
                }

                fn gib(self) -> StorageSize {
                    StorageSize::gibibytes(i64::from(self))
                }

                fn tib(self) -> StorageSize {
                    StorageSize::tebibytes(i64::from(self))
                }

                fn pib(self) -> StorageSize {
                    StorageSize::pebibytes(i64::from(self))
                }

                fn eib(self) -> StorageSize {
                    StorageSize::exbibytes(i64::from(self))
                }

                fn kb(self) -> StorageSize {
                    StorageSize::kilobytes(i64::from(self))
                }

                fn mb(self) -> StorageSize {
                    StorageSize::megabytes(i64::from(self))
                }

                fn gb(self) -> StorageSize {
                    StorageSize::gigabytes(i64::from(self))
                }

                fn tb(self) -> StorageSize {
                    StorageSize::terabytes(i64::from(self))
                }

                fn pb(self) -> StorageSize {
                    StorageSize::petabytes(i64::from(self))
                }

                fn eb(self) -> StorageSize {
                    StorageSize::exabytes(i64::from(self))
                }
            }
        )*
    };
}

impl_storage_size_ext!(i32, i64, u32);
