use crate::error::Result;
use crate::size::StorageSize;
use std::path::Path;

impl StorageSize {
    /// Size of the file at `path` as reported by its metadata
    ///
    /// I/O errors (missing file, permissions) come back unchanged as
    /// [`StorageSizeError::Io`](crate::StorageSizeError::Io).
    pub fn of_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Reading size of {:?}", path);

        let len = std::fs::metadata(path)?.len();
        // lengths above i64::MAX surface as Overflow
        Self::try_from(len)
    }
}
