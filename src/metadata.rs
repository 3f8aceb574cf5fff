//! CLI-only filesystem metadata handling: restoring the modification time
//! recovered from a gzip header onto the decompressed output file, while
//! preserving its access time. Not part of the inflation engine itself.

use crate::error::{Error, Result};
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Set `path`'s modification time to `mtime` (seconds since the Unix
/// epoch, as recovered from the gzip header), leaving its access time
/// at whatever the filesystem currently reports.
pub fn set_mtime(path: &Path, mtime: u32) -> Result<()> {
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| Error::Internal("output path contains a NUL byte".into()))?;

    let mut st: libc::stat = unsafe { std::mem::zeroed() };
    if unsafe { libc::stat(c_path.as_ptr(), &mut st) } < 0 {
        return Err(Error::Io(std::io::Error::last_os_error()));
    }

    let times = libc::utimbuf { actime: st.st_atime, modtime: mtime as libc::time_t };

    if unsafe { libc::utime(c_path.as_ptr(), &times) } < 0 {
        return Err(Error::Io(std::io::Error::last_os_error()));
    }

    Ok(())
}
