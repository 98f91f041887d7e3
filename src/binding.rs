// src/binding.rs
//
// Contract with the native audio-event engine.
//
// The engine owns banks, event descriptions and instances. This crate only
// ever sees opaque handles. Implementations are not required to be
// reentrant: the runtime guarantees that every call below is made from one
// serialized context (see `runtime.rs`).

use thiserror::Error;

/// Live engine session (one per runtime).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(pub u64);

/// A bank registered with the session. The runtime never keeps these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BankHandle(pub u64);

/// Resolved event definition, used to spawn instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventDescription(pub u64);

/// A live, playable occurrence of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceHandle(pub u64);

/// How an instance should stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum StopMode {
    /// Let authored fade-outs / release tails play.
    AllowFadeout = 0,
    /// Cut immediately.
    Immediate = 1,
}

/// Failure reported by the engine for a single call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("engine error {code}: {message}")]
pub struct EngineError {
    pub code: i32,
    pub message: String,
}

impl EngineError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Capability set of the native engine.
///
/// All calls are expected to return promptly.
pub trait EngineBinding: Send {
    fn create_session(&mut self, max_virtual_channels: u32) -> Result<SessionHandle, EngineError>;

    fn load_bank_from_memory(
        &mut self,
        session: SessionHandle,
        bytes: &[u8],
    ) -> Result<BankHandle, EngineError>;

    fn resolve_event(
        &mut self,
        session: SessionHandle,
        path: &str,
    ) -> Result<EventDescription, EngineError>;

    fn create_instance(
        &mut self,
        description: EventDescription,
    ) -> Result<InstanceHandle, EngineError>;

    fn start(&mut self, instance: InstanceHandle) -> Result<(), EngineError>;

    fn stop(&mut self, instance: InstanceHandle, mode: StopMode) -> Result<(), EngineError>;

    fn set_parameter(&mut self, instance: InstanceHandle, name: &str, value: f32) -> bool;

    fn set_paused(&mut self, instance: InstanceHandle, paused: bool) -> bool;

    fn set_volume(&mut self, instance: InstanceHandle, volume: f32) -> bool;

    /// Pause or resume the master bus.
    fn set_master_paused(&mut self, session: SessionHandle, paused: bool) -> bool;

    fn release(&mut self, instance: InstanceHandle) -> Result<(), EngineError>;

    /// One engine update. Required for streaming and state progression.
    fn tick(&mut self, session: SessionHandle);

    fn shutdown(&mut self, session: SessionHandle);

    /// Event paths known to the session, for diagnostics only.
    fn event_paths(&mut self, _session: SessionHandle) -> Vec<String> {
        Vec::new()
    }
}
