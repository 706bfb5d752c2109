//! Native backend handles and the backend table
//!
//! Each native backend is described by one [`BackendEntry`] record: where its
//! shared library lives on each platform, which symbols control its thread
//! pool, and what to tell the user when it is missing. Loading any backend
//! is the same generic step over that record.

use std::ffi::c_int;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;

use natla_core::BackendKind;

/// How a backend exposes its threading controls
#[derive(Debug, Clone, Copy)]
pub enum ThreadingAbi {
    /// `void set(int threads)` / `int get(void)` thread-count pair
    ThreadCount {
        set: &'static [u8],
        get: &'static [u8],
    },
    /// Accelerate's `BLASSetThreading` / `BLASGetThreading` mode pair
    Mode {
        set: &'static [u8],
        get: &'static [u8],
    },
}

/// Static description of one native backend
#[derive(Debug)]
pub struct BackendEntry {
    pub kind: BackendKind,
    /// Candidate library names, tried in order
    pub libraries: &'static [&'static str],
    pub threading: ThreadingAbi,
    /// Environment variable that overrides the candidate list
    pub library_var: &'static str,
    /// Shown when an explicitly requested backend is missing
    pub remediation: &'static str,
}

#[cfg(target_os = "linux")]
const MKL_LIBRARIES: &[&str] = &["libmkl_rt.so.2", "libmkl_rt.so"];
#[cfg(target_os = "macos")]
const MKL_LIBRARIES: &[&str] = &["libmkl_rt.2.dylib", "libmkl_rt.dylib"];
#[cfg(target_os = "windows")]
const MKL_LIBRARIES: &[&str] = &["mkl_rt.2.dll", "mkl_rt.dll"];
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const MKL_LIBRARIES: &[&str] = &[];

#[cfg(target_os = "linux")]
const OPENBLAS_LIBRARIES: &[&str] = &["libopenblas.so.0", "libopenblas.so"];
#[cfg(target_os = "macos")]
const OPENBLAS_LIBRARIES: &[&str] = &["libopenblas.0.dylib", "libopenblas.dylib"];
#[cfg(target_os = "windows")]
const OPENBLAS_LIBRARIES: &[&str] = &["libopenblas.dll", "openblas.dll"];
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const OPENBLAS_LIBRARIES: &[&str] = &["libopenblas.so"];

#[cfg(target_os = "macos")]
const ACCELERATE_LIBRARIES: &[&str] =
    &["/System/Library/Frameworks/Accelerate.framework/Accelerate"];
#[cfg(not(target_os = "macos"))]
const ACCELERATE_LIBRARIES: &[&str] = &[];

/// One record per native backend kind
pub static BACKENDS: [BackendEntry; 3] = [
    BackendEntry {
        kind: BackendKind::Accelerate,
        libraries: ACCELERATE_LIBRARIES,
        threading: ThreadingAbi::Mode {
            set: b"BLASSetThreading\0",
            get: b"BLASGetThreading\0",
        },
        library_var: "NATLA_ACCELERATE_LIB",
        remediation: "Accelerate ships with macOS; this backend can only be selected on a macOS host.",
    },
    BackendEntry {
        kind: BackendKind::Mkl,
        libraries: MKL_LIBRARIES,
        threading: ThreadingAbi::ThreadCount {
            set: b"MKL_Set_Num_Threads\0",
            get: b"MKL_Get_Max_Threads\0",
        },
        library_var: "NATLA_MKL_LIB",
        remediation: "Install Intel oneAPI MKL so that libmkl_rt is visible to the dynamic loader, \
                      or point NATLA_MKL_LIB at the library.",
    },
    BackendEntry {
        kind: BackendKind::OpenBlas,
        libraries: OPENBLAS_LIBRARIES,
        threading: ThreadingAbi::ThreadCount {
            set: b"openblas_set_num_threads\0",
            get: b"openblas_get_num_threads\0",
        },
        library_var: "NATLA_OPENBLAS_LIB",
        remediation: "Install OpenBLAS (for example the libopenblas0 package) \
                      or point NATLA_OPENBLAS_LIB at the library.",
    },
];

/// Look up the table record for a native kind
pub fn entry(kind: BackendKind) -> Option<&'static BackendEntry> {
    BACKENDS.iter().find(|entry| entry.kind == kind)
}

type SetThreading = Box<dyn Fn(bool) + Send + Sync>;
type GetThreading = Box<dyn Fn() -> bool + Send + Sync>;

/// Enable/disable and query multithreading of a backend
pub struct ThreadingHooks {
    set: SetThreading,
    get: GetThreading,
}

impl ThreadingHooks {
    pub fn new(
        set: impl Fn(bool) + Send + Sync + 'static,
        get: impl Fn() -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            set: Box::new(set),
            get: Box::new(get),
        }
    }

    /// Hooks that only remember the last setting, for backends without
    /// runtime thread control
    pub fn in_memory(initial: bool) -> Self {
        let state = Arc::new(AtomicBool::new(initial));
        let reader = state.clone();
        Self::new(
            move |enabled| state.store(enabled, Ordering::SeqCst),
            move || reader.load(Ordering::SeqCst),
        )
    }

    /// Hooks over a thread-count pair.
    ///
    /// Enabling hands over `available()` threads, disabling hands over one.
    /// While the library still reports the count last handed over, the
    /// query answers with the last request, so enabling on a single-core
    /// host reads back as enabled. A count changed behind our back is
    /// judged on its own: more than one thread means multithreaded.
    fn thread_count(
        set: impl Fn(c_int) + Send + Sync + 'static,
        get: impl Fn() -> c_int + Send + Sync + 'static,
        available: fn() -> c_int,
    ) -> Self {
        let handed = Arc::new(AtomicI32::new(0));
        let requested = Arc::new(AtomicBool::new(false));
        let (last, enabled) = (handed.clone(), requested.clone());
        Self::new(
            move |on| {
                let threads = if on { available() } else { 1 };
                handed.store(threads, Ordering::SeqCst);
                requested.store(on, Ordering::SeqCst);
                set(threads)
            },
            move || {
                let threads = get();
                if threads == last.load(Ordering::SeqCst) {
                    enabled.load(Ordering::SeqCst)
                } else {
                    threads > 1
                }
            },
        )
    }

    /// Resolve the threading symbols of a loaded library.
    ///
    /// # Safety
    ///
    /// The symbols named by `abi` must have the C signatures documented on
    /// [`ThreadingAbi`].
    unsafe fn from_library(
        library: &libloading::Library,
        abi: ThreadingAbi,
    ) -> Result<Self, libloading::Error> {
        match abi {
            ThreadingAbi::ThreadCount { set, get } => {
                let set: libloading::Symbol<unsafe extern "C" fn(c_int)> = library.get(set)?;
                let get: libloading::Symbol<unsafe extern "C" fn() -> c_int> = library.get(get)?;
                let (set, get) = (*set, *get);
                Ok(Self::thread_count(
                    // SAFETY: signature fixed by the backend table
                    move |threads| unsafe { set(threads) },
                    // SAFETY: signature fixed by the backend table
                    move || unsafe { get() },
                    native_thread_count,
                ))
            }
            ThreadingAbi::Mode { set, get } => {
                // BLAS_THREADING_MULTI_THREADED = 0, BLAS_THREADING_SINGLE_THREADED = 1
                let set: libloading::Symbol<unsafe extern "C" fn(c_int) -> c_int> =
                    library.get(set)?;
                let get: libloading::Symbol<unsafe extern "C" fn() -> c_int> = library.get(get)?;
                let (set, get) = (*set, *get);
                Ok(Self::new(
                    move |enabled| {
                        // SAFETY: signature fixed by the backend table
                        let status = unsafe { set(if enabled { 0 } else { 1 }) };
                        if status != 0 {
                            tracing::warn!("BLASSetThreading rejected the request ({status})");
                        }
                    },
                    move || {
                        // SAFETY: signature fixed by the backend table
                        let mode = unsafe { get() };
                        mode == 0
                    },
                ))
            }
        }
    }
}

/// Thread count handed to a native library when multithreading is enabled
fn native_thread_count() -> c_int {
    c_int::try_from(rayon::current_num_threads().max(1)).unwrap_or(c_int::MAX)
}

/// A bound native library: the capability every engine of one backend shares
pub struct NativeBackend {
    kind: BackendKind,
    origin: String,
    hooks: ThreadingHooks,
    // Dropped last; the hooks may point into it
    _library: Option<libloading::Library>,
}

impl NativeBackend {
    /// Backend whose library is already linked into the process
    pub fn new(kind: BackendKind, origin: impl Into<String>, hooks: ThreadingHooks) -> Self {
        Self {
            kind,
            origin: origin.into(),
            hooks,
            _library: None,
        }
    }

    /// Load `name` and bind the threading symbols described by `entry`
    pub fn load(entry: &BackendEntry, name: &str) -> Result<Self, libloading::Error> {
        tracing::debug!("Attempting to load {} from: {}", entry.kind, name);

        // SAFETY: loading runs the library initialisers of a well-known BLAS
        // distribution; the threading symbols have the signatures in the table.
        unsafe {
            let library = libloading::Library::new(name)?;
            let hooks = match ThreadingHooks::from_library(&library, entry.threading) {
                Ok(hooks) => hooks,
                // Older Accelerate releases have no threading controls
                Err(e) if matches!(entry.threading, ThreadingAbi::Mode { .. }) => {
                    tracing::warn!("{} has no threading controls: {e}", entry.kind);
                    ThreadingHooks::in_memory(true)
                }
                Err(e) => return Err(e),
            };

            tracing::info!("Successfully loaded {} library: {}", entry.kind, name);
            Ok(Self {
                kind: entry.kind,
                origin: name.to_string(),
                hooks,
                _library: Some(library),
            })
        }
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Library path or description the backend came from
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn set_threading(&self, enabled: bool) {
        (self.hooks.set)(enabled)
    }

    pub fn threading(&self) -> bool {
        (self.hooks.get)()
    }
}

impl fmt::Debug for NativeBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeBackend")
            .field("kind", &self.kind)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}
