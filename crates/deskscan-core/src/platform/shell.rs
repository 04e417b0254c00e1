//! Shell-automation session backed by COM.
//!
//! # Platform Behavior
//! - **Windows**: initializes a single-threaded COM apartment for the
//!   lifetime of the session and resolves shortcuts through
//!   `IShellLinkW` / `IPersistFile`.
//! - **Other platforms**: opening a session fails with `Unsupported`.

#[cfg(windows)]
pub use self::windows::ShellSession;

#[cfg(not(windows))]
pub use self::unsupported::ShellSession;

#[cfg(windows)]
#[allow(unsafe_code)]
mod windows {
    use crate::error::{DeskscanError, Result};
    use crate::shortcut::{ShellAutomation, ShortcutLink};
    use std::ffi::c_void;
    use std::marker::PhantomData;
    use std::os::windows::ffi::OsStrExt;
    use std::path::{Path, PathBuf};
    use std::ptr::{self, NonNull};
    use tracing::{debug, warn};
    use windows_sys::core::{GUID, HRESULT, PCWSTR, PWSTR};
    use windows_sys::Win32::Foundation::RPC_E_CHANGED_MODE;
    use windows_sys::Win32::Storage::FileSystem::WIN32_FIND_DATAW;
    use windows_sys::Win32::System::Com::{
        CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_INPROC_SERVER,
        COINIT_APARTMENTTHREADED, COINIT_DISABLE_OLE1DDE, STGM, STGM_READ,
    };

    const CLSID_SHELL_LINK: GUID = GUID {
        data1: 0x0002_1401,
        data2: 0x0000,
        data3: 0x0000,
        data4: [0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x46],
    };
    const IID_ISHELL_LINK_W: GUID = GUID {
        data1: 0x0002_14F9,
        data2: 0x0000,
        data3: 0x0000,
        data4: [0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x46],
    };
    const IID_IPERSIST_FILE: GUID = GUID {
        data1: 0x0000_010B,
        data2: 0x0000,
        data3: 0x0000,
        data4: [0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x46],
    };

    /// Long-path capacity for `GetPath`, in UTF-16 units.
    const TARGET_BUFFER_LEN: usize = 32_768;

    #[repr(C)]
    #[allow(dead_code)]
    struct IUnknownVtbl {
        query_interface:
            unsafe extern "system" fn(*mut c_void, *const GUID, *mut *mut c_void) -> HRESULT,
        add_ref: unsafe extern "system" fn(*mut c_void) -> u32,
        release: unsafe extern "system" fn(*mut c_void) -> u32,
    }

    // Only the slots up to the last method called are declared.
    #[repr(C)]
    struct IShellLinkWVtbl {
        base: IUnknownVtbl,
        get_path: unsafe extern "system" fn(
            *mut c_void,
            PWSTR,
            i32,
            *mut WIN32_FIND_DATAW,
            u32,
        ) -> HRESULT,
    }

    #[repr(C)]
    #[allow(dead_code)]
    struct IPersistFileVtbl {
        base: IUnknownVtbl,
        get_class_id: unsafe extern "system" fn(*mut c_void, *mut GUID) -> HRESULT,
        is_dirty: unsafe extern "system" fn(*mut c_void) -> HRESULT,
        load: unsafe extern "system" fn(*mut c_void, PCWSTR, STGM) -> HRESULT,
        save: unsafe extern "system" fn(*mut c_void, PCWSTR, i32) -> HRESULT,
    }

    /// Owned COM interface pointer, released on drop.
    struct ComPtr<V> {
        raw: NonNull<c_void>,
        _vtbl: PhantomData<V>,
    }

    impl<V> ComPtr<V> {
        /// # Safety
        ///
        /// `raw` must be null or an owned reference to a COM object whose
        /// vtable layout starts with `V`.
        unsafe fn from_raw(raw: *mut c_void) -> Option<Self> {
            NonNull::new(raw).map(|raw| Self {
                raw,
                _vtbl: PhantomData,
            })
        }

        fn as_raw(&self) -> *mut c_void {
            self.raw.as_ptr()
        }

        fn vtbl(&self) -> &V {
            // SAFETY: a COM object pointer points at its vtable pointer, and
            // `from_raw` guarantees the vtable starts with `V`.
            unsafe { &**(self.raw.as_ptr() as *const *const V) }
        }
    }

    impl<V> Drop for ComPtr<V> {
        fn drop(&mut self) {
            // SAFETY: every COM vtable begins with the IUnknown slots and we
            // own exactly one reference.
            unsafe {
                let unknown = &**(self.raw.as_ptr() as *const *const IUnknownVtbl);
                (unknown.release)(self.raw.as_ptr());
            }
        }
    }

    fn to_wide(path: &Path) -> Vec<u16> {
        path.as_os_str()
            .encode_wide()
            .chain(std::iter::once(0))
            .collect()
    }

    fn check(operation: &str, hr: HRESULT) -> Result<()> {
        if hr < 0 {
            Err(DeskscanError::shell(operation, hr))
        } else {
            Ok(())
        }
    }

    /// A COM apartment for the calling thread.
    ///
    /// Open one per scan and pass it to the resolver. Dropping it
    /// uninitializes COM. The session is tied to the thread that opened it.
    pub struct ShellSession {
        owns_apartment: bool,
        _not_send: PhantomData<*const ()>,
    }

    impl ShellSession {
        /// Initialize COM on the current thread.
        pub fn open() -> Result<Self> {
            // SAFETY: reserved pointer must be null; flags are valid COINIT values.
            let hr = unsafe {
                CoInitializeEx(
                    ptr::null(),
                    (COINIT_APARTMENTTHREADED | COINIT_DISABLE_OLE1DDE) as u32,
                )
            };

            if hr == RPC_E_CHANGED_MODE {
                // Someone already set up a multithreaded apartment; use it but
                // leave teardown to them.
                warn!("COM already initialized with a different concurrency model");
                return Ok(Self {
                    owns_apartment: false,
                    _not_send: PhantomData,
                });
            }
            check("CoInitializeEx", hr)?;
            debug!("COM apartment initialized");

            Ok(Self {
                owns_apartment: true,
                _not_send: PhantomData,
            })
        }
    }

    impl Drop for ShellSession {
        fn drop(&mut self) {
            if self.owns_apartment {
                // SAFETY: balanced with the successful CoInitializeEx in `open`
                // on this same thread (the session is !Send).
                unsafe { CoUninitialize() };
                debug!("COM apartment released");
            }
        }
    }

    impl ShellAutomation for ShellSession {
        fn open_shortcut(&self, path: &Path) -> Result<Box<dyn ShortcutLink + '_>> {
            let mut raw_link: *mut c_void = ptr::null_mut();
            // SAFETY: valid CLSID/IID pointers and out-pointer; COM is
            // initialized for the lifetime of `self`.
            let hr = unsafe {
                CoCreateInstance(
                    &CLSID_SHELL_LINK,
                    ptr::null_mut(),
                    CLSCTX_INPROC_SERVER,
                    &IID_ISHELL_LINK_W,
                    &mut raw_link,
                )
            };
            check("CoCreateInstance(ShellLink)", hr)?;
            // SAFETY: CoCreateInstance succeeded for IID_IShellLinkW.
            let link = unsafe { ComPtr::<IShellLinkWVtbl>::from_raw(raw_link) }
                .ok_or_else(|| DeskscanError::shell("CoCreateInstance(ShellLink)", hr))?;

            let mut raw_file: *mut c_void = ptr::null_mut();
            // SAFETY: `link` is a live IShellLinkW.
            let hr = unsafe {
                (link.vtbl().base.query_interface)(link.as_raw(), &IID_IPERSIST_FILE, &mut raw_file)
            };
            check("QueryInterface(IPersistFile)", hr)?;
            // SAFETY: QueryInterface succeeded for IID_IPersistFile.
            let file = unsafe { ComPtr::<IPersistFileVtbl>::from_raw(raw_file) }
                .ok_or_else(|| DeskscanError::shell("QueryInterface(IPersistFile)", hr))?;

            let wide = to_wide(path);
            // SAFETY: `wide` is NUL-terminated and outlives the call.
            let hr = unsafe { (file.vtbl().load)(file.as_raw(), wide.as_ptr(), STGM_READ) };
            check("IPersistFile::Load", hr)?;

            Ok(Box::new(ShellLinkHandle {
                path: path.to_path_buf(),
                link,
                _file: file,
            }))
        }
    }

    struct ShellLinkHandle {
        path: PathBuf,
        link: ComPtr<IShellLinkWVtbl>,
        _file: ComPtr<IPersistFileVtbl>,
    }

    impl ShortcutLink for ShellLinkHandle {
        fn target_path(&self) -> Result<String> {
            let mut buffer = vec![0u16; TARGET_BUFFER_LEN];
            // SAFETY: WIN32_FIND_DATAW is plain old data; all-zero is valid.
            let mut find_data: WIN32_FIND_DATAW = unsafe { std::mem::zeroed() };

            // SAFETY: buffer length matches the capacity passed; the link was
            // loaded in `open_shortcut`.
            let hr = unsafe {
                (self.link.vtbl().get_path)(
                    self.link.as_raw(),
                    buffer.as_mut_ptr(),
                    buffer.len() as i32,
                    &mut find_data,
                    0,
                )
            };
            check("IShellLinkW::GetPath", hr)?;

            // S_FALSE leaves the buffer empty: the link has no file-system target.
            let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
            String::from_utf16(&buffer[..len]).map_err(|_| DeskscanError::UnreadableTarget {
                path: self.path.clone(),
            })
        }
    }

}

#[cfg(not(windows))]
mod unsupported {
    use crate::error::{DeskscanError, Result};
    use crate::shortcut::{ShellAutomation, ShortcutLink};
    use std::path::Path;

    /// Placeholder session; shell automation only exists on Windows.
    pub struct ShellSession {
        _private: (),
    }

    impl ShellSession {
        pub fn open() -> Result<Self> {
            Err(DeskscanError::unsupported("Shell automation"))
        }
    }

    impl ShellAutomation for ShellSession {
        fn open_shortcut(&self, _path: &Path) -> Result<Box<dyn ShortcutLink + '_>> {
            Err(DeskscanError::unsupported("Shell automation"))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_open_is_unsupported() {
            assert!(matches!(
                ShellSession::open(),
                Err(DeskscanError::Unsupported { .. })
            ));
        }
    }
}
