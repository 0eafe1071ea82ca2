use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageSizeError {
    #[error("{value} {unit} is not a whole number of bytes")]
    Precision { value: f64, unit: &'static str },

    #[error("{value} is not a finite number")]
    NotFinite { value: f64 },

    #[error("Storage size overflowed the 64-bit byte range")]
    Overflow,

    #[error("Cannot divide a storage size by zero")]
    DivisionByZero,

    #[error("{unit} is the largest unit in its table")]
    NoLargerUnit { unit: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = StorageSizeError> = std::result::Result<T, E>;
