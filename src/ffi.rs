// C-compatible FFI bindings for native host plugins (Swift, JNI, C++).
//
// The native engine is supplied by the host as a table of C callbacks
// (`EventAudioEngineVTable`). The runtime owns scheduling and the instance
// registry; the host only forwards calls.
//
// Safety requirements:
// - All pointers must be non-null unless documented otherwise
// - All handles must be created by this module and not fabricated
// - String parameters must be valid null-terminated UTF-8
// - Engine callbacks may be invoked from the runtime's update thread,
//   never concurrently with each other
// - Caller must call `eventaudio_runtime_destroy` for each `_create`
// - `eventaudio_initialize`, `eventaudio_release` and
//   `eventaudio_runtime_destroy` must not run concurrently with any other
//   call on the same runtime. Every other call may come from any thread.

use std::ffi::{CStr, CString, c_char, c_void};
use std::time::Duration;

use crate::binding::{
    BankHandle, EngineBinding, EngineError, EventDescription, InstanceHandle, SessionHandle,
    StopMode,
};
use crate::config::{
    DEFAULT_MAX_VIRTUAL_CHANNELS, DEFAULT_UPDATE_HZ, RuntimeConfig, clamp_interval,
};
use crate::error::RuntimeError;
use crate::runtime::Runtime;

use log::warn;
#[cfg(feature = "ios")]
use log::LevelFilter;
#[cfg(feature = "ios")]
use oslog::OsLogger;

/// Call succeeded (or the engine failure was absorbed and logged).
pub const EVENTAUDIO_OK: i32 = 0;
/// Null handle, null/invalid string or empty path.
pub const EVENTAUDIO_INVALID_ARGS: i32 = -1;

// Engine callback result for success.
const ENGINE_OK: i32 = 0;

#[cfg(feature = "ios")]
const LOG_SUBSYSTEM: &str = "com.eventaudio.engine";

// ═══════════════════════════════════════════════════════════════════════════
// Logger Initialization
// ═══════════════════════════════════════════════════════════════════════════

/// Initialize the oslog logger.
///
/// Call once at application startup, before any other FFI function.
#[cfg(feature = "ios")]
#[unsafe(no_mangle)]
pub extern "C" fn eventaudio_init_logger() {
    OsLogger::new(LOG_SUBSYSTEM)
        .level_filter(LevelFilter::Debug)
        .init()
        .ok();
}

// ═══════════════════════════════════════════════════════════════════════════
// Engine Callback Table
// ═══════════════════════════════════════════════════════════════════════════

/// Native engine entry points. Every callback receives `user_data` first.
///
/// Callbacks returning `i32` use 0 for success and any other value as the
/// engine's error code. Handles are opaque 64-bit values chosen by the host.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct EventAudioEngineVTable {
    pub user_data: *mut c_void,
    pub create_session:
        extern "C" fn(user_data: *mut c_void, max_virtual_channels: u32, out_session: *mut u64) -> i32,
    pub load_bank: extern "C" fn(
        user_data: *mut c_void,
        session: u64,
        data: *const u8,
        len: usize,
        out_bank: *mut u64,
    ) -> i32,
    pub resolve_event: extern "C" fn(
        user_data: *mut c_void,
        session: u64,
        path: *const c_char,
        out_description: *mut u64,
    ) -> i32,
    pub create_instance:
        extern "C" fn(user_data: *mut c_void, description: u64, out_instance: *mut u64) -> i32,
    pub start: extern "C" fn(user_data: *mut c_void, instance: u64) -> i32,
    /// `mode`: 0 = allow fade-out, 1 = immediate.
    pub stop: extern "C" fn(user_data: *mut c_void, instance: u64, mode: u32) -> i32,
    pub set_parameter:
        extern "C" fn(user_data: *mut c_void, instance: u64, name: *const c_char, value: f32) -> bool,
    pub set_paused: extern "C" fn(user_data: *mut c_void, instance: u64, paused: bool) -> bool,
    pub set_volume: extern "C" fn(user_data: *mut c_void, instance: u64, volume: f32) -> bool,
    pub set_master_paused: extern "C" fn(user_data: *mut c_void, session: u64, paused: bool) -> bool,
    pub release: extern "C" fn(user_data: *mut c_void, instance: u64) -> i32,
    pub tick: extern "C" fn(user_data: *mut c_void, session: u64),
    pub shutdown: extern "C" fn(user_data: *mut c_void, session: u64),
}

/// [`EngineBinding`] over a host callback table.
pub struct ForeignEngine {
    vtable: EventAudioEngineVTable,
}

// The host guarantees its callbacks may be called from any one thread at a
// time; the runtime serializes every call.
unsafe impl Send for ForeignEngine {}

fn check(code: i32, what: &str) -> Result<(), EngineError> {
    if code == ENGINE_OK {
        Ok(())
    } else {
        Err(EngineError::new(code, format!("{} failed", what)))
    }
}

fn c_string(value: &str, what: &str) -> Result<CString, EngineError> {
    CString::new(value)
        .map_err(|_| EngineError::new(EVENTAUDIO_INVALID_ARGS, format!("{} contains NUL", what)))
}

impl EngineBinding for ForeignEngine {
    fn create_session(&mut self, max_virtual_channels: u32) -> Result<SessionHandle, EngineError> {
        let mut out = 0u64;
        let v = &self.vtable;
        check(
            (v.create_session)(v.user_data, max_virtual_channels, &mut out),
            "create_session",
        )?;
        Ok(SessionHandle(out))
    }

    fn load_bank_from_memory(
        &mut self,
        session: SessionHandle,
        bytes: &[u8],
    ) -> Result<BankHandle, EngineError> {
        let mut out = 0u64;
        let v = &self.vtable;
        check(
            (v.load_bank)(v.user_data, session.0, bytes.as_ptr(), bytes.len(), &mut out),
            "load_bank",
        )?;
        Ok(BankHandle(out))
    }

    fn resolve_event(
        &mut self,
        session: SessionHandle,
        path: &str,
    ) -> Result<EventDescription, EngineError> {
        let path = c_string(path, "event path")?;
        let mut out = 0u64;
        let v = &self.vtable;
        check(
            (v.resolve_event)(v.user_data, session.0, path.as_ptr(), &mut out),
            "resolve_event",
        )?;
        Ok(EventDescription(out))
    }

    fn create_instance(
        &mut self,
        description: EventDescription,
    ) -> Result<InstanceHandle, EngineError> {
        let mut out = 0u64;
        let v = &self.vtable;
        check(
            (v.create_instance)(v.user_data, description.0, &mut out),
            "create_instance",
        )?;
        Ok(InstanceHandle(out))
    }

    fn start(&mut self, instance: InstanceHandle) -> Result<(), EngineError> {
        let v = &self.vtable;
        check((v.start)(v.user_data, instance.0), "start")
    }

    fn stop(&mut self, instance: InstanceHandle, mode: StopMode) -> Result<(), EngineError> {
        let v = &self.vtable;
        check((v.stop)(v.user_data, instance.0, mode as u32), "stop")
    }

    fn set_parameter(&mut self, instance: InstanceHandle, name: &str, value: f32) -> bool {
        let Ok(name) = CString::new(name) else {
            return false;
        };
        let v = &self.vtable;
        (v.set_parameter)(v.user_data, instance.0, name.as_ptr(), value)
    }

    fn set_paused(&mut self, instance: InstanceHandle, paused: bool) -> bool {
        let v = &self.vtable;
        (v.set_paused)(v.user_data, instance.0, paused)
    }

    fn set_volume(&mut self, instance: InstanceHandle, volume: f32) -> bool {
        let v = &self.vtable;
        (v.set_volume)(v.user_data, instance.0, volume)
    }

    fn set_master_paused(&mut self, session: SessionHandle, paused: bool) -> bool {
        let v = &self.vtable;
        (v.set_master_paused)(v.user_data, session.0, paused)
    }

    fn release(&mut self, instance: InstanceHandle) -> Result<(), EngineError> {
        let v = &self.vtable;
        check((v.release)(v.user_data, instance.0), "release")
    }

    fn tick(&mut self, session: SessionHandle) {
        let v = &self.vtable;
        (v.tick)(v.user_data, session.0)
    }

    fn shutdown(&mut self, session: SessionHandle) {
        let v = &self.vtable;
        (v.shutdown)(v.user_data, session.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════════

/// Configuration for creating a runtime.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct EventAudioConfig {
    /// Virtual channel capacity of the engine session (e.g., 512).
    pub max_virtual_channels: u32,
    /// Period between engine updates in microseconds (16_666 for 60 Hz).
    pub update_interval_us: u64,
    /// Start the background update thread on initialize.
    pub autostart_updates: bool,
}

impl Default for EventAudioConfig {
    fn default() -> Self {
        Self {
            max_virtual_channels: DEFAULT_MAX_VIRTUAL_CHANNELS,
            update_interval_us: 1_000_000 / DEFAULT_UPDATE_HZ as u64,
            autostart_updates: true,
        }
    }
}

impl From<EventAudioConfig> for RuntimeConfig {
    fn from(c: EventAudioConfig) -> Self {
        RuntimeConfig {
            max_virtual_channels: c.max_virtual_channels,
            update_interval: clamp_interval(Duration::from_micros(c.update_interval_us)),
            autostart_scheduler: c.autostart_updates,
        }
    }
}

/// Get the default configuration values.
#[unsafe(no_mangle)]
pub extern "C" fn eventaudio_default_config() -> EventAudioConfig {
    EventAudioConfig::default()
}

// ═══════════════════════════════════════════════════════════════════════════
// Runtime Creation
// ═══════════════════════════════════════════════════════════════════════════

/// Opaque handle to a runtime.
pub struct EventAudioRuntime {
    inner: Runtime<ForeignEngine>,
}

/// Create a runtime over the host engine.
///
/// Returns NULL when `vtable` is NULL. `config` may be NULL for defaults.
///
/// # Safety
/// - `vtable` must point to a fully populated callback table
/// - `config` must be NULL or point to a valid `EventAudioConfig`
#[unsafe(no_mangle)]
pub unsafe extern "C" fn eventaudio_runtime_create(
    vtable: *const EventAudioEngineVTable,
    config: *const EventAudioConfig,
) -> *mut EventAudioRuntime {
    if vtable.is_null() {
        return std::ptr::null_mut();
    }
    let engine = ForeignEngine {
        vtable: unsafe { std::ptr::read(vtable) },
    };
    let cfg = if config.is_null() {
        EventAudioConfig::default()
    } else {
        unsafe { std::ptr::read(config) }
    };

    Box::into_raw(Box::new(EventAudioRuntime {
        inner: Runtime::with_config(engine, cfg.into()),
    }))
}

/// Destroy a runtime. Releases engine resources first.
///
/// # Safety
/// `runtime` must be NULL or a pointer returned by `eventaudio_runtime_create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn eventaudio_runtime_destroy(runtime: *mut EventAudioRuntime) {
    if !runtime.is_null() {
        unsafe { drop(Box::from_raw(runtime)) };
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Lifecycle
// ═══════════════════════════════════════════════════════════════════════════

/// # Safety
/// `runtime` must be NULL or a valid runtime handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn eventaudio_initialize(runtime: *mut EventAudioRuntime) -> bool {
    if runtime.is_null() {
        return false;
    }
    unsafe { (*runtime).inner.initialize() }
}

/// # Safety
/// `runtime` must be NULL or a valid runtime handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn eventaudio_release(runtime: *mut EventAudioRuntime) {
    if runtime.is_null() {
        return;
    }
    unsafe { (*runtime).inner.release() };
}

/// Tick the engine once, for hosts driving their own frame loop.
///
/// # Safety
/// `runtime` must be NULL or a valid runtime handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn eventaudio_update(runtime: *mut EventAudioRuntime) {
    if runtime.is_null() {
        return;
    }
    unsafe { &(*runtime).inner }.update();
}

// ═══════════════════════════════════════════════════════════════════════════
// Banks
// ═══════════════════════════════════════════════════════════════════════════

/// A bank already read into memory by the host.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct EventAudioBuffer {
    pub data: *const u8,
    pub len: usize,
}

/// Load `count` banks. True only when all of them loaded.
///
/// # Safety
/// - `runtime` must be NULL or a valid runtime handle
/// - `banks` must point to `count` buffers, each valid for `len` bytes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn eventaudio_load_banks(
    runtime: *mut EventAudioRuntime,
    banks: *const EventAudioBuffer,
    count: usize,
) -> bool {
    if runtime.is_null() || (banks.is_null() && count > 0) {
        return false;
    }
    let buffers: &[EventAudioBuffer] = if count == 0 {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(banks, count) }
    };

    let slices = buffers.iter().map(|b| {
        if b.data.is_null() {
            &[][..]
        } else {
            unsafe { std::slice::from_raw_parts(b.data, b.len) }
        }
    });
    unsafe { &(*runtime).inner }.load_banks(slices)
}

// ═══════════════════════════════════════════════════════════════════════════
// Event Control
// ═══════════════════════════════════════════════════════════════════════════

/// Borrow a C string as an event path. NULL, non-UTF-8 and empty are rejected.
unsafe fn event_path<'a>(ptr: *const c_char) -> Result<&'a str, RuntimeError> {
    if ptr.is_null() {
        return Err(RuntimeError::InvalidArguments("Event path required".into()));
    }
    let path = unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| RuntimeError::InvalidArguments("Event path must be UTF-8".into()))?;
    if path.is_empty() {
        return Err(RuntimeError::InvalidArguments("Event path required".into()));
    }
    Ok(path)
}

/// Run `f` on a validated runtime and path, mapping bad input to a status.
///
/// Only a shared borrow is taken: control calls may overlap across host
/// threads, and the runtime serializes them internally.
unsafe fn with_path(
    runtime: *mut EventAudioRuntime,
    path: *const c_char,
    f: impl FnOnce(&Runtime<ForeignEngine>, &str),
) -> i32 {
    if runtime.is_null() {
        return EVENTAUDIO_INVALID_ARGS;
    }
    match unsafe { event_path(path) } {
        Ok(path) => {
            f(unsafe { &(*runtime).inner }, path);
            EVENTAUDIO_OK
        }
        Err(e) => {
            warn!("{}", e);
            EVENTAUDIO_INVALID_ARGS
        }
    }
}

/// # Safety
/// `runtime` must be NULL or valid; `path` must be NULL or a C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn eventaudio_play_event(
    runtime: *mut EventAudioRuntime,
    path: *const c_char,
) -> i32 {
    unsafe { with_path(runtime, path, |rt, path| rt.play_event(path)) }
}

/// # Safety
/// `runtime` must be NULL or valid; `path` must be NULL or a C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn eventaudio_stop_event(
    runtime: *mut EventAudioRuntime,
    path: *const c_char,
) -> i32 {
    unsafe { with_path(runtime, path, |rt, path| rt.stop_event(path)) }
}

/// # Safety
/// `runtime` must be NULL or valid; `path` and `name` must be NULL or C strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn eventaudio_set_parameter(
    runtime: *mut EventAudioRuntime,
    path: *const c_char,
    name: *const c_char,
    value: f32,
) -> i32 {
    if name.is_null() {
        return EVENTAUDIO_INVALID_ARGS;
    }
    let Ok(name) = (unsafe { CStr::from_ptr(name) }).to_str() else {
        return EVENTAUDIO_INVALID_ARGS;
    };
    unsafe { with_path(runtime, path, |rt, path| rt.set_parameter(path, name, value)) }
}

/// # Safety
/// `runtime` must be NULL or valid; `path` must be NULL or a C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn eventaudio_set_paused(
    runtime: *mut EventAudioRuntime,
    path: *const c_char,
    paused: bool,
) -> i32 {
    unsafe { with_path(runtime, path, |rt, path| rt.set_paused(path, paused)) }
}

/// # Safety
/// `runtime` must be NULL or valid; `path` must be NULL or a C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn eventaudio_set_volume(
    runtime: *mut EventAudioRuntime,
    path: *const c_char,
    volume: f32,
) -> i32 {
    unsafe { with_path(runtime, path, |rt, path| rt.set_volume(path, volume)) }
}

/// Pause or resume the master bus.
///
/// # Safety
/// `runtime` must be NULL or a valid runtime handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn eventaudio_set_master_paused(
    runtime: *mut EventAudioRuntime,
    paused: bool,
) -> bool {
    if runtime.is_null() {
        return false;
    }
    unsafe { &(*runtime).inner }.set_master_paused(paused)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_engine::{MemoryBank, MemoryEngine};

    // Host callbacks that forward to a MemoryEngine behind `user_data`.

    fn engine<'a>(user_data: *mut c_void) -> &'a mut MemoryEngine {
        unsafe { &mut *(user_data as *mut MemoryEngine) }
    }

    fn code<T>(result: Result<T, EngineError>, out: *mut u64, f: impl FnOnce(T) -> u64) -> i32 {
        match result {
            Ok(v) => {
                unsafe { *out = f(v) };
                ENGINE_OK
            }
            Err(e) => e.code,
        }
    }

    extern "C" fn create_session(ud: *mut c_void, max: u32, out: *mut u64) -> i32 {
        code(engine(ud).create_session(max), out, |s| s.0)
    }
    extern "C" fn load_bank(ud: *mut c_void, s: u64, data: *const u8, len: usize, out: *mut u64) -> i32 {
        let bytes = unsafe { std::slice::from_raw_parts(data, len) };
        code(engine(ud).load_bank_from_memory(SessionHandle(s), bytes), out, |b| b.0)
    }
    extern "C" fn resolve_event(ud: *mut c_void, s: u64, path: *const c_char, out: *mut u64) -> i32 {
        let path = unsafe { CStr::from_ptr(path) }.to_str().unwrap();
        code(engine(ud).resolve_event(SessionHandle(s), path), out, |d| d.0)
    }
    extern "C" fn create_instance(ud: *mut c_void, d: u64, out: *mut u64) -> i32 {
        code(engine(ud).create_instance(EventDescription(d)), out, |i| i.0)
    }
    extern "C" fn start(ud: *mut c_void, i: u64) -> i32 {
        engine(ud).start(InstanceHandle(i)).map_or_else(|e| e.code, |_| ENGINE_OK)
    }
    extern "C" fn stop(ud: *mut c_void, i: u64, mode: u32) -> i32 {
        let mode = if mode == 0 { StopMode::AllowFadeout } else { StopMode::Immediate };
        engine(ud).stop(InstanceHandle(i), mode).map_or_else(|e| e.code, |_| ENGINE_OK)
    }
    extern "C" fn set_parameter(ud: *mut c_void, i: u64, name: *const c_char, value: f32) -> bool {
        let name = unsafe { CStr::from_ptr(name) }.to_str().unwrap();
        engine(ud).set_parameter(InstanceHandle(i), name, value)
    }
    extern "C" fn set_paused(ud: *mut c_void, i: u64, paused: bool) -> bool {
        engine(ud).set_paused(InstanceHandle(i), paused)
    }
    extern "C" fn set_volume(ud: *mut c_void, i: u64, volume: f32) -> bool {
        engine(ud).set_volume(InstanceHandle(i), volume)
    }
    extern "C" fn set_master_paused(ud: *mut c_void, s: u64, paused: bool) -> bool {
        engine(ud).set_master_paused(SessionHandle(s), paused)
    }
    extern "C" fn release(ud: *mut c_void, i: u64) -> i32 {
        engine(ud).release(InstanceHandle(i)).map_or_else(|e| e.code, |_| ENGINE_OK)
    }
    extern "C" fn tick(ud: *mut c_void, s: u64) {
        engine(ud).tick(SessionHandle(s))
    }
    extern "C" fn shutdown(ud: *mut c_void, s: u64) {
        engine(ud).shutdown(SessionHandle(s))
    }

    fn vtable(user_data: *mut MemoryEngine) -> EventAudioEngineVTable {
        EventAudioEngineVTable {
            user_data: user_data as *mut c_void,
            create_session,
            load_bank,
            resolve_event,
            create_instance,
            start,
            stop,
            set_parameter,
            set_paused,
            set_volume,
            set_master_paused,
            release,
            tick,
            shutdown,
        }
    }

    #[test]
    fn test_ffi_end_to_end() {
        let mut memory = Box::new(MemoryEngine::new());
        let probe = memory.probe();
        let table = vtable(&mut *memory);
        let config = EventAudioConfig {
            autostart_updates: false,
            ..EventAudioConfig::default()
        };

        unsafe {
            let rt = eventaudio_runtime_create(&table, &config);
            assert!(!rt.is_null());
            assert!(eventaudio_initialize(rt));

            let bank = MemoryBank::new().event("event:/Music/Theme").to_bytes();
            let buffers = [EventAudioBuffer {
                data: bank.as_ptr(),
                len: bank.len(),
            }];
            assert!(eventaudio_load_banks(rt, buffers.as_ptr(), buffers.len()));

            let path = CString::new("event:/Music/Theme").unwrap();
            assert_eq!(eventaudio_play_event(rt, path.as_ptr()), EVENTAUDIO_OK);
            assert_eq!(probe.live_instances(), 1);

            eventaudio_update(rt);
            assert_eq!(probe.tick_count(), 1);

            assert_eq!(eventaudio_stop_event(rt, path.as_ptr()), EVENTAUDIO_OK);
            assert_eq!(probe.live_instances(), 0);

            eventaudio_runtime_destroy(rt);
        }
        assert!(!probe.session_live());
    }

    #[test]
    fn test_ffi_control_calls_from_many_threads() {
        let mut memory = Box::new(MemoryEngine::new());
        let probe = memory.probe();
        let table = vtable(&mut *memory);
        let config = EventAudioConfig {
            update_interval_us: 1_000,
            ..EventAudioConfig::default()
        };

        let rt = unsafe { eventaudio_runtime_create(&table, &config) };
        assert!(unsafe { eventaudio_initialize(rt) });
        let bank = MemoryBank::new().event("event:/Music/Theme").to_bytes();
        let buffers = [EventAudioBuffer {
            data: bank.as_ptr(),
            len: bank.len(),
        }];
        assert!(unsafe { eventaudio_load_banks(rt, buffers.as_ptr(), buffers.len()) });

        // Raw pointers are not Send; hand the address to each thread.
        let addr = rt as usize;
        let threads: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let rt = addr as *mut EventAudioRuntime;
                    let path = CString::new("event:/Music/Theme").unwrap();
                    for _ in 0..25 {
                        unsafe {
                            assert_eq!(eventaudio_play_event(rt, path.as_ptr()), EVENTAUDIO_OK);
                            eventaudio_set_volume(rt, path.as_ptr(), i as f32 / 4.0);
                            eventaudio_update(rt);
                        }
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        assert_eq!(probe.live_instances(), 1);
        unsafe { eventaudio_runtime_destroy(rt) };
        assert_eq!(probe.live_instances(), 0);
        assert!(!probe.session_live());
    }

    #[test]
    fn test_ffi_rejects_invalid_arguments() {
        let mut memory = Box::new(MemoryEngine::new());
        let table = vtable(&mut *memory);

        unsafe {
            assert!(eventaudio_runtime_create(std::ptr::null(), std::ptr::null()).is_null());

            let rt = eventaudio_runtime_create(&table, std::ptr::null());
            let empty = CString::new("").unwrap();
            assert_eq!(
                eventaudio_play_event(rt, std::ptr::null()),
                EVENTAUDIO_INVALID_ARGS
            );
            assert_eq!(eventaudio_set_volume(rt, empty.as_ptr(), 0.5), EVENTAUDIO_INVALID_ARGS);
            assert_eq!(
                eventaudio_play_event(std::ptr::null_mut(), empty.as_ptr()),
                EVENTAUDIO_INVALID_ARGS
            );
            assert!(!eventaudio_set_master_paused(std::ptr::null_mut(), true));
            eventaudio_runtime_destroy(rt);
        }
    }
}
