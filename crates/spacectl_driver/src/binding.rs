//! Statically declared binding to the SpaceControl controller library.
//!
//! The vendor ships `spc_ctrlr_32.dll` / `spc_ctrlr_64.dll` exposing a small
//! C API. The four entry points used here are resolved once at load time and
//! held for the lifetime of the library handle.

use std::os::raw::{c_char, c_int, c_long};

use libloading::Library;
#[cfg(unix)]
use libloading::os::unix::Symbol;
#[cfg(windows)]
use libloading::os::windows::Symbol;

// int scConnect2(bool useDaemon, const char* applicationName)
pub type ScConnect2 = unsafe extern "C" fn(bool, *const c_char) -> c_int;

// int scDisconnect()
pub type ScDisconnect = unsafe extern "C" fn() -> c_int;

// int scGetDevNum(int* numAll, int* numUsb, int* numOther)
pub type ScGetDevNum = unsafe extern "C" fn(*mut c_int, *mut c_int, *mut c_int) -> c_int;

// int scFetchStdData(int devId,
//                    short* x, short* y, short* z,
//                    short* a, short* b, short* c,
//                    int* wheel, int* buttons, int* event,
//                    long* tvSec, long* tvUsec)
pub type ScFetchStdData = unsafe extern "C" fn(
    c_int,
    *mut i16,
    *mut i16,
    *mut i16,
    *mut i16,
    *mut i16,
    *mut i16,
    *mut c_int,
    *mut c_int,
    *mut c_int,
    *mut c_long,
    *mut c_long,
) -> c_int;

/// Resolved entry points of the SpaceControl controller library.
pub struct SpaceControlLibrary {
    _lib: Library,
    pub connect: Symbol<ScConnect2>,
    pub disconnect: Symbol<ScDisconnect>,
    pub get_dev_num: Symbol<ScGetDevNum>,
    pub fetch_std_data: Symbol<ScFetchStdData>,
}

impl SpaceControlLibrary {
    /// Load the vendor library and resolve all entry points.
    ///
    /// # Safety
    ///
    /// Loading a foreign library runs its initialization routines; the
    /// caller must trust the binary at [`library_path`].
    pub unsafe fn load() -> Result<SpaceControlLibrary, libloading::Error> {
        let lib = Library::new(library_path())?;
        let connect = lib.get::<ScConnect2>(b"scConnect2\0")?.into_raw();
        let disconnect = lib.get::<ScDisconnect>(b"scDisconnect\0")?.into_raw();
        let get_dev_num = lib.get::<ScGetDevNum>(b"scGetDevNum\0")?.into_raw();
        let fetch_std_data = lib.get::<ScFetchStdData>(b"scFetchStdData\0")?.into_raw();

        Ok(SpaceControlLibrary {
            _lib: lib,
            connect,
            disconnect,
            get_dev_num,
            fetch_std_data,
        })
    }
}

/// Path of the vendor binary for the current architecture.
pub fn library_path() -> &'static str {
    if cfg!(target_pointer_width = "32") {
        "spc_ctrlr_32.dll"
    } else {
        r"C:\Program Files (x86)\SpaceControl\libs\win64\spc_ctrlr_64.dll"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_path_names_the_vendor_binary() {
        let path = library_path();
        assert!(path.contains("spc_ctrlr"));
        assert!(path.ends_with(".dll"));
    }
}
