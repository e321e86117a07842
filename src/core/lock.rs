//! Advisory transaction locks.
//!
//! Concurrent invocations would otherwise both decrypt, both mutate and
//! the last writer would silently win. Each transaction holds a `flock`
//! on a dedicated lock file; ciphertext files cannot carry the lock
//! because atomic replacement swaps their inode.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use tracing::{debug, info};

/// Lock strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Readers; any number may hold it together.
    Shared,
    /// A decrypt → mutate → persist transaction.
    Exclusive,
}

/// A held lock, released when dropped.
#[derive(Debug)]
pub struct Lock {
    #[allow(dead_code)]
    file: File,
}

impl Lock {
    /// Acquire `mode` on `path`, creating the lock file if needed.
    ///
    /// Blocks while another process holds a conflicting lock.
    pub fn acquire(path: &Path, mode: LockMode) -> io::Result<Self> {
        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true).truncate(false);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(crate::core::constants::FILE_MODE);
        }
        let file = options.open(path)?;

        #[cfg(unix)]
        flock(&file, mode, path)?;

        debug!(path = %path.display(), ?mode, "lock acquired");
        Ok(Self { file })
    }
}

#[cfg(unix)]
fn flock(file: &File, mode: LockMode, path: &Path) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;

    let op = match mode {
        LockMode::Shared => libc::LOCK_SH,
        LockMode::Exclusive => libc::LOCK_EX,
    };
    let fd = file.as_raw_fd();

    if unsafe { libc::flock(fd, op | libc::LOCK_NB) } == 0 {
        return Ok(());
    }
    let err = io::Error::last_os_error();
    if err.raw_os_error() != Some(libc::EWOULDBLOCK) {
        return Err(err);
    }

    info!(path = %path.display(), "waiting for another stymie process to finish");
    loop {
        if unsafe { libc::flock(fd, op) } == 0 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}
