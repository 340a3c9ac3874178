//! Chunked file encryption with crash-safe output.

use crate::crypto::ChaCha20;
use anyhow::{Context, Result};
use getrandom::fill;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Size of the chunks streamed through the keystream.
pub const CHUNK_LEN: usize = 64 * 1024;

/// A destination file that is only replaced once its new contents are
/// fully written.
#[derive(Clone)]
pub struct OutputFile {
    path: PathBuf,
}

impl OutputFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the destination through `write` using an atomic replace.
    ///
    /// `write` receives a buffered temporary file in the same directory.
    /// After it returns the file is flushed and synced, renamed over the
    /// destination and the parent directory is synced. On any error the
    /// temporary file is removed and the destination is left untouched.
    ///
    /// Creates parent directories if they don't exist.
    pub fn write_with<F, T>(&self, write: F) -> Result<T>
    where
        F: FnOnce(&mut BufWriter<File>) -> Result<T>,
    {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.random_tmp_path()?;

        // fail if the temporary name is already taken
        let tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .context("failed to create temporary file")?;

        let result = (|| {
            let mut writer = BufWriter::new(tmp_file);
            let value = write(&mut writer)?;
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
            Ok::<T, anyhow::Error>(value)
        })();

        let value = match result {
            Ok(v) => v,
            Err(e) => {
                let _ = fs::remove_file(&tmp_path);
                return Err(e);
            }
        };

        if let Err(e) = self.atomic_replace(&tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let dir = File::open(parent)?;
            dir.sync_all()?;
        }

        Ok(value)
    }

    /// `filename.tmp.<randomhex>` next to the destination.
    fn random_tmp_path(&self) -> Result<PathBuf> {
        let mut buf = [0u8; 8];
        fill(&mut buf)?;

        let rand_string = buf.iter().map(|b| format!("{:02x}", b)).collect::<String>();

        let file_name = self
            .path
            .file_name()
            .context("output path has no file name")?
            .to_string_lossy();

        Ok(self
            .path
            .with_file_name(format!("{}.tmp.{}", file_name, rand_string)))
    }

    /// Replaces the destination with `ReplaceFileW` and write-through so the
    /// swap is persisted.
    #[cfg(target_os = "windows")]
    fn atomic_replace(&self, tmp_path: &Path) -> Result<()> {
        use std::ffi::OsStr;
        use std::os::windows::ffi::OsStrExt;
        use windows_sys::Win32::Storage::FileSystem::{REPLACEFILE_WRITE_THROUGH, ReplaceFileW};

        if !self.path.exists() {
            fs::rename(tmp_path, &self.path)?;
            return Ok(());
        }

        fn to_wide(s: &OsStr) -> Vec<u16> {
            s.encode_wide().chain(std::iter::once(0)).collect()
        }

        let target_w = to_wide(self.path.as_os_str());
        let tmp_w = to_wide(tmp_path.as_os_str());

        // SAFETY:
        // - Strings are valid UTF-16 and null-terminated
        // - Pointers remain valid during the call
        // - Windows does not retain the pointers after return
        let result = unsafe {
            ReplaceFileW(
                target_w.as_ptr(),
                tmp_w.as_ptr(),
                std::ptr::null(),
                REPLACEFILE_WRITE_THROUGH,
                std::ptr::null(),
                std::ptr::null(),
            )
        };

        if result == 0 {
            let err = std::io::Error::last_os_error();
            return Err(err).context("atomic replace failed");
        }

        Ok(())
    }

    /// `rename()` is atomic when both paths are on the same filesystem.
    #[cfg(not(target_os = "windows"))]
    fn atomic_replace(&self, tmp_path: &Path) -> Result<()> {
        fs::rename(tmp_path, &self.path)?;
        Ok(())
    }
}

/// Streams `input` through the ChaCha20 keystream into `output`,
/// [`CHUNK_LEN`] bytes at a time. Returns the number of bytes processed.
///
/// Encryption and decryption are the same operation.
pub fn apply_chacha20(cipher: &ChaCha20, input: &Path, output: &OutputFile) -> Result<u64> {
    let file = File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
    let mut reader = BufReader::new(file);

    let total = output.write_with(|writer| {
        let mut stream = cipher.keystream();
        let mut buf = vec![0u8; CHUNK_LEN];
        let mut total = 0u64;
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            stream.apply(&mut buf[..n]);
            writer.write_all(&buf[..n])?;
            total += n as u64;
        }
        Ok(total)
    })?;

    debug!(
        bytes = total,
        counter = cipher.counter(),
        output = %output.path().display(),
        "file processed"
    );
    Ok(total)
}
