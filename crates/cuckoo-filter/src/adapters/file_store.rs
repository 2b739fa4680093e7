use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::CuckooError;
use crate::ports::outbound::ImageStore;

/// File-backed image store.
///
/// Writes go through a temporary sibling file that is synced and then
/// renamed over the target, so a crash never leaves a half-written image.
#[derive(Debug, Clone)]
pub struct FileImageStore {
    path: PathBuf,
}

impl FileImageStore {
    /// Create a store for the given path. Nothing is touched on disk yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the image is written to before the rename.
    ///
    /// Appends to the full file name, so targets differing only in
    /// extension never share it and a `.tmp` target never collides with it.
    fn temp_path(&self) -> Result<PathBuf, CuckooError> {
        let mut name = self
            .path
            .file_name()
            .ok_or_else(|| {
                CuckooError::Io(std::io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("not a file path: {}", self.path.display()),
                ))
            })?
            .to_os_string();
        name.push(".tmp");
        Ok(self.path.with_file_name(name))
    }
}

impl ImageStore for FileImageStore {
    fn write_image(&mut self, image: &[u8]) -> Result<(), CuckooError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.temp_path()?;
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(image)?;
        file.sync_all()?;
        std::fs::rename(&temp_path, &self.path)?;

        info!(
            "[cuckoo] 💾 Wrote filter image: {} ({} bytes)",
            self.path.display(),
            image.len()
        );
        Ok(())
    }

    fn read_image(&self) -> Result<Vec<u8>, CuckooError> {
        let mut file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("[cuckoo] 📁 No filter image at {}", self.path.display());
                return Err(CuckooError::ImageNotFound {
                    location: self.location(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let expected = file.metadata().map(|m| m.len() as usize).unwrap_or(0);
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(expected)
            .map_err(|_| CuckooError::AllocationFailed { bytes: expected })?;
        file.read_to_end(&mut bytes)?;

        info!(
            "[cuckoo] 💾 Read filter image: {} ({} bytes)",
            self.path.display(),
            bytes.len()
        );
        Ok(bytes)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
