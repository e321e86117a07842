//! Filesystem helpers.
//!
//! Everything stymie writes is owner-only. Ciphertext is replaced
//! atomically; plaintext only ever touches disk through [`ScratchFile`],
//! which erases itself when dropped.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::constants::{DIR_MODE, FILE_MODE, SCRATCH_PREFIX};

/// How a file was erased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Erasure {
    /// Overwritten in multiple passes by `shred`, then unlinked.
    Shredded,
    /// `shred` unavailable or failed: zeroed once in-process, then unlinked.
    Fallback,
}

/// Create a directory readable only by its owner.
pub fn create_private_dir(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path)
}

/// Open (creating if needed) a file readable only by its owner.
pub fn open_private(path: &Path, create_new: bool) -> io::Result<fs::File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if create_new {
        options.create_new(true);
    } else {
        options.create(true).truncate(true);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path)
}

/// Write `bytes` to `path` with owner-only permissions.
pub fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = open_private(path, false)?;
    file.write_all(bytes)?;
    file.sync_all()?;

    // `mode` only applies on creation; tighten a pre-existing file too.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(FILE_MODE))?;
    }
    Ok(())
}

/// Replace `path` with `bytes` so readers see either the old or the new
/// content, never a partial write.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let temp = path.with_file_name(format!(".{}.tmp-{}", name, std::process::id()));

    if let Err(e) = write_private(&temp, bytes) {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }
    rename_with_fallback(&temp, path)
}

/// Rename `temp_path` over `destination`.
///
/// Unix `rename` replaces the target atomically. Windows refuses an
/// existing target, so only there is the target removed and the rename
/// retried. On failure the temp file is cleaned up.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    let result = fs::rename(temp_path, destination);

    #[cfg(windows)]
    let result = result.or_else(|initial_err| {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            io::Error::new(
                retry_err.kind(),
                format!("initial: {}, retry: {}", initial_err, retry_err),
            )
        })
    });

    result.map_err(|e| {
        let _ = fs::remove_file(temp_path);
        io::Error::new(e.kind(), format!("atomic rename failed: {}", e))
    })
}

/// Erase and unlink a file.
///
/// Prefers `shred --zero --remove`. Without `shred`, or if it fails, the
/// file is overwritten with zeros once and removed; the caller is told via
/// [`Erasure::Fallback`] so it can warn the user.
pub fn secure_delete(path: &Path) -> io::Result<Erasure> {
    if let Ok(shred) = which::which("shred") {
        let status = Command::new(shred)
            .args(["--zero", "--remove"])
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(s) if s.success() => {
                debug!(path = %path.display(), "shredded");
                return Ok(Erasure::Shredded);
            }
            Ok(s) => warn!(code = ?s.code(), "shred failed, overwriting in-process"),
            Err(e) => warn!(error = %e, "could not run shred, overwriting in-process"),
        }
    } else {
        debug!("shred not found, overwriting in-process");
    }

    zero_fill(path)?;
    fs::remove_file(path)?;
    Ok(Erasure::Fallback)
}

const ZERO_CHUNK: usize = 64 * 1024;

fn zero_fill(path: &Path) -> io::Result<()> {
    let mut remaining = fs::metadata(path)?.len();
    if remaining == 0 {
        return Ok(());
    }
    let mut file = OpenOptions::new().write(true).open(path)?;
    let zeros = [0u8; ZERO_CHUNK];
    while remaining > 0 {
        let n = remaining.min(ZERO_CHUNK as u64) as usize;
        file.write_all(&zeros[..n])?;
        remaining -= n as u64;
    }
    file.sync_all()
}

/// Securely erase scratch files a crashed process left in `dir`.
///
/// Only call while holding the lock that guards scratch creation.
pub fn sweep_scratch(dir: &Path) -> io::Result<usize> {
    let mut swept = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let is_scratch = entry
            .file_name()
            .to_str()
            .is_some_and(|n| n.starts_with(SCRATCH_PREFIX));
        if is_scratch && entry.file_type()?.is_file() {
            warn!(path = %entry.path().display(), "erasing stale plaintext left by an interrupted edit");
            secure_delete(&entry.path())?;
            swept += 1;
        }
    }
    Ok(swept)
}

static SCRATCH_SEQ: AtomicU64 = AtomicU64::new(0);

/// A plaintext file that exists only for the duration of one operation.
///
/// Created owner-only with a fresh name; erased via [`secure_delete`] when
/// dropped, on success and error paths alike.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Create an empty scratch file inside `dir`.
    pub fn create(dir: &Path) -> io::Result<Self> {
        let name = format!(
            "{}{}-{}-{}",
            SCRATCH_PREFIX,
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0),
            SCRATCH_SEQ.fetch_add(1, Ordering::Relaxed)
        );
        let path = dir.join(name);
        open_private(&path, true)?;
        debug!(path = %path.display(), "scratch file created");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, bytes: &[u8]) -> io::Result<()> {
        write_private(&self.path, bytes)
    }

    pub fn read(&self) -> io::Result<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(fs::read(&self.path)?))
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        match secure_delete(&self.path) {
            Ok(Erasure::Shredded) => {}
            Ok(Erasure::Fallback) => {
                warn!("shred unavailable: scratch plaintext was zeroed once and unlinked")
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to erase scratch plaintext");
                let _ = fs::remove_file(&self.path);
            }
        }
    }
}
