//! File-based storage backend for persistent storage.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// A file-based storage backend.
///
/// This backend provides persistent storage using OS file APIs.
/// Data survives process restarts.
///
/// # Durability
///
/// - `flush()` calls `File::flush()` to push data to the OS
/// - `sync()` calls `File::sync_all()` to ensure data is on disk
///
/// # Handle lifetime
///
/// The backend exclusively owns one open handle. [`StorageBackend::reset`]
/// closes it, removes the file, creates an empty one and reopens it. If
/// that last step fails the backend stays closed.
///
/// # Example
///
/// ```no_run
/// use binlist_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let mut backend = FileBackend::open(Path::new("list.bin")).unwrap();
/// let offset = backend.append(b"persistent data").unwrap();
/// backend.sync().unwrap();  // Ensure data is durable
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    file: RwLock<Option<File>>,
    size: RwLock<u64>,
}

impl FileBackend {
    /// Opens or creates a file backend at the given path.
    ///
    /// If the file exists, it is opened for reading and writing without
    /// truncation. If it doesn't exist, a new empty file is created.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let file = open_file(path)?;
        let size = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            file: RwLock::new(Some(file)),
            size: RwLock::new(size),
        })
    }

    /// Opens or creates a file backend, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or file cannot be opened.
    pub fn open_with_create_dirs(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::open(path)
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` while the backend holds an open handle.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.file.read().is_some()
    }
}

fn open_file(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
}

impl StorageBackend for FileBackend {
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        let size = *self.size.read();
        let end = offset.saturating_add(len as u64);

        if offset > size || end > size {
            return Err(StorageError::ReadPastEnd { offset, len, size });
        }

        let mut guard = self.file.write();
        let file = guard.as_mut().ok_or(StorageError::Closed)?;

        if len == 0 {
            return Ok(Vec::new());
        }

        file.seek(SeekFrom::Start(offset))?;

        let mut buffer = vec![0u8; len];
        file.read_exact(&mut buffer)?;

        Ok(buffer)
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()> {
        let size = *self.size.read();
        let end = offset.saturating_add(data.len() as u64);

        if offset > size || end > size {
            return Err(StorageError::WritePastEnd {
                offset,
                len: data.len(),
                size,
            });
        }

        let mut guard = self.file.write();
        let file = guard.as_mut().ok_or(StorageError::Closed)?;

        if data.is_empty() {
            return Ok(());
        }

        file.seek(SeekFrom::Start(offset))?;
        file.write_all(data)?;

        Ok(())
    }

    fn append(&mut self, data: &[u8]) -> StorageResult<u64> {
        let mut guard = self.file.write();
        let file = guard.as_mut().ok_or(StorageError::Closed)?;
        let mut size = self.size.write();

        if data.is_empty() {
            return Ok(*size);
        }

        let offset = *size;
        file.seek(SeekFrom::End(0))?;
        file.write_all(data)?;
        *size += data.len() as u64;

        Ok(offset)
    }

    fn flush(&mut self) -> StorageResult<()> {
        let mut guard = self.file.write();
        let file = guard.as_mut().ok_or(StorageError::Closed)?;
        file.flush()?;
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        if !self.is_open() {
            return Err(StorageError::Closed);
        }
        Ok(*self.size.read())
    }

    fn sync(&mut self) -> StorageResult<()> {
        let guard = self.file.write();
        let file = guard.as_ref().ok_or(StorageError::Closed)?;
        file.sync_all()?;
        Ok(())
    }

    fn truncate(&mut self, new_size: u64) -> StorageResult<()> {
        let mut guard = self.file.write();
        let file = guard.as_mut().ok_or(StorageError::Closed)?;
        let mut size = self.size.write();

        if new_size > *size {
            return Err(StorageError::TruncateBeyondEnd {
                requested: new_size,
                size: *size,
            });
        }

        file.set_len(new_size)?;
        file.sync_all()?;
        *size = new_size;

        Ok(())
    }

    fn reset(&mut self) -> StorageResult<()> {
        let mut guard = self.file.write();
        let mut size = self.size.write();

        // Close before removing; some platforms refuse to unlink open files.
        drop(guard.take());
        *size = 0;

        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let file = open_file(&self.path)?;
        *guard = Some(file);

        Ok(())
    }
}
