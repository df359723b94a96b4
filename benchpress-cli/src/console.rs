//! Console Silencing
//!
//! Benches often print. While a batch is measured, the process-level stdout
//! and stderr descriptors are pointed at the null device so that output
//! neither pollutes the report nor skews timings. The original descriptors
//! come back when the guard drops, whether the batch succeeded or not.

use std::io::{self, Write};

/// RAII guard that discards everything written to stdout and stderr
#[derive(Debug)]
pub struct OutputSilencer {
    #[cfg(unix)]
    saved: Vec<(libc::c_int, libc::c_int)>,
}

impl OutputSilencer {
    /// Redirect stdout and stderr until the guard is dropped
    #[cfg(unix)]
    pub fn engage() -> io::Result<Self> {
        use std::os::fd::AsRawFd;

        flush_std();
        let null = std::fs::OpenOptions::new().write(true).open("/dev/null")?;

        let mut saved = Vec::with_capacity(2);
        for fd in [libc::STDOUT_FILENO, libc::STDERR_FILENO] {
            // SAFETY: duplicating a standard descriptor has no memory-safety preconditions
            let copy = unsafe { libc::dup(fd) };
            if copy < 0 {
                let err = io::Error::last_os_error();
                restore(&saved);
                return Err(err);
            }
            // SAFETY: both descriptors are open for the duration of the call
            if unsafe { libc::dup2(null.as_raw_fd(), fd) } < 0 {
                let err = io::Error::last_os_error();
                // SAFETY: `copy` was returned by dup above and is owned here
                unsafe { libc::close(copy) };
                restore(&saved);
                return Err(err);
            }
            saved.push((fd, copy));
        }

        Ok(Self { saved })
    }

    /// No-op on platforms without descriptor redirection
    #[cfg(not(unix))]
    pub fn engage() -> io::Result<Self> {
        Ok(Self {})
    }
}

impl Drop for OutputSilencer {
    fn drop(&mut self) {
        // buffered bench output belongs to the null device
        flush_std();
        #[cfg(unix)]
        restore(&self.saved);
    }
}

fn flush_std() {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
}

#[cfg(unix)]
fn restore(saved: &[(libc::c_int, libc::c_int)]) {
    for &(fd, copy) in saved.iter().rev() {
        // SAFETY: `copy` is an owned duplicate of `fd` made by `engage`
        unsafe {
            libc::dup2(copy, fd);
            libc::close(copy);
        }
    }
}

/// Serializes tests that redirect the process-wide descriptors
#[cfg(all(test, unix))]
pub(crate) static DESCRIPTOR_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// `(st_dev, st_ino)` of whatever `fd` currently points at
#[cfg(all(test, unix))]
pub(crate) fn descriptor_identity(fd: libc::c_int) -> (u64, u64) {
    let mut stat: libc::stat = unsafe { std::mem::zeroed() };
    assert_eq!(unsafe { libc::fstat(fd, &mut stat) }, 0, "fstat({fd}) failed");
    (stat.st_dev as u64, stat.st_ino as u64)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_guard_redirects_and_restores() {
        let _lock = DESCRIPTOR_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let stdout = descriptor_identity(libc::STDOUT_FILENO);
        let stderr = descriptor_identity(libc::STDERR_FILENO);
        let null = {
            let file = std::fs::File::open("/dev/null").unwrap();
            descriptor_identity(std::os::fd::AsRawFd::as_raw_fd(&file))
        };

        {
            let _guard = OutputSilencer::engage().unwrap();
            println!("this line is discarded");
            assert_eq!(descriptor_identity(libc::STDOUT_FILENO), null);
            assert_eq!(descriptor_identity(libc::STDERR_FILENO), null);
        }

        assert_eq!(descriptor_identity(libc::STDOUT_FILENO), stdout);
        assert_eq!(descriptor_identity(libc::STDERR_FILENO), stderr);
    }
}
