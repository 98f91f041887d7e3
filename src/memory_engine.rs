// src/memory_engine.rs
//
// In-process engine binding.
//
// Stands in for the native engine in tests, in the demo binary, and on hosts
// that have no native engine linked. Banks use a small text format:
//
//   EVBANK1
//   event:/Music/Theme Intensity Mood
//   event:/UI/Click
//
// One event per line, followed by the names of the parameters it accepts.
// A `MemoryProbe` shares the engine state so callers can inspect it after
// the engine has been moved into a runtime.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::binding::{
    BankHandle, EngineBinding, EngineError, EventDescription, InstanceHandle, SessionHandle,
    StopMode,
};

const BANK_MAGIC: &str = "EVBANK1";

// Error codes, loosely modelled on native engine result codes.
const ERR_INIT: i32 = 1;
const ERR_INVALID_HANDLE: i32 = 30;
const ERR_BANK_FORMAT: i32 = 19;
const ERR_EVENT_NOT_FOUND: i32 = 74;
const ERR_INJECTED: i32 = 99;

/// Builder for bank bytes in the in-memory format.
#[derive(Debug, Default, Clone)]
pub struct MemoryBank {
    events: Vec<(String, Vec<String>)>,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(mut self, path: &str) -> Self {
        self.events.push((path.to_string(), Vec::new()));
        self
    }

    pub fn event_with_params(mut self, path: &str, params: &[&str]) -> Self {
        self.events.push((
            path.to_string(),
            params.iter().map(|p| p.to_string()).collect(),
        ));
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut text = String::from(BANK_MAGIC);
        for (path, params) in &self.events {
            text.push('\n');
            text.push_str(path);
            for p in params {
                text.push(' ');
                text.push_str(p);
            }
        }
        text.into_bytes()
    }

    fn parse(bytes: &[u8]) -> Result<Vec<(String, Vec<String>)>, EngineError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| EngineError::new(ERR_BANK_FORMAT, "bank is not valid UTF-8"))?;
        let mut lines = text.lines();
        if lines.next() != Some(BANK_MAGIC) {
            return Err(EngineError::new(ERR_BANK_FORMAT, "missing bank header"));
        }

        let mut events = Vec::new();
        for line in lines {
            let mut fields = line.split_whitespace();
            let Some(path) = fields.next() else { continue };
            if !path.starts_with("event:/") {
                return Err(EngineError::new(
                    ERR_BANK_FORMAT,
                    format!("malformed event path '{}'", path),
                ));
            }
            events.push((path.to_string(), fields.map(str::to_string).collect()));
        }
        Ok(events)
    }
}

/// Engine-side state of one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryInstance {
    pub path: String,
    pub playing: bool,
    pub paused: bool,
    pub volume: f32,
    pub params: HashMap<String, f32>,
}

/// Operation log entry, in call order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineOp {
    CreateSession,
    LoadBank,
    Start(InstanceHandle),
    Stop(InstanceHandle, StopMode),
    Release(InstanceHandle),
    Tick,
    Shutdown,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    session: Option<SessionHandle>,
    /// event path -> accepted parameter names
    catalog: BTreeMap<String, Vec<String>>,
    descriptions: HashMap<EventDescription, String>,
    instances: HashMap<InstanceHandle, MemoryInstance>,
    master_paused: bool,
    ticks: u64,
    stale_ticks: u64,
    catalog_queries: u64,
    ops: Vec<EngineOp>,
    fail_init: bool,
    fail_start: bool,
    fail_release: bool,
}

impl MemoryState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_session(&self, session: SessionHandle) -> Result<(), EngineError> {
        if self.session == Some(session) {
            Ok(())
        } else {
            Err(EngineError::new(ERR_INVALID_HANDLE, "invalid session handle"))
        }
    }

    fn instance_mut(
        &mut self,
        instance: InstanceHandle,
    ) -> Result<&mut MemoryInstance, EngineError> {
        self.instances
            .get_mut(&instance)
            .ok_or_else(|| EngineError::new(ERR_INVALID_HANDLE, "invalid instance handle"))
    }

    fn accepts_param(&self, path: &str, name: &str) -> bool {
        self.catalog
            .get(path)
            .is_some_and(|params| params.iter().any(|p| p == name))
    }
}

fn lock(state: &Mutex<MemoryState>) -> MutexGuard<'_, MemoryState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory implementation of [`EngineBinding`].
#[derive(Debug, Default)]
pub struct MemoryEngine {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_session` fail.
    pub fn with_init_failure(self) -> Self {
        lock(&self.state).fail_init = true;
        self
    }

    /// Make every `start` call fail.
    pub fn with_start_failure(self) -> Self {
        lock(&self.state).fail_start = true;
        self
    }

    /// Make every `release` call fail.
    pub fn with_release_failure(self) -> Self {
        lock(&self.state).fail_release = true;
        self
    }

    /// Shared view of this engine's state.
    pub fn probe(&self) -> MemoryProbe {
        MemoryProbe {
            state: Arc::clone(&self.state),
        }
    }
}

impl EngineBinding for MemoryEngine {
    fn create_session(&mut self, _max_virtual_channels: u32) -> Result<SessionHandle, EngineError> {
        let mut state = lock(&self.state);
        if state.fail_init {
            return Err(EngineError::new(ERR_INIT, "output device unavailable"));
        }
        let session = SessionHandle(state.next_id());
        state.session = Some(session);
        state.ops.push(EngineOp::CreateSession);
        Ok(session)
    }

    fn load_bank_from_memory(
        &mut self,
        session: SessionHandle,
        bytes: &[u8],
    ) -> Result<BankHandle, EngineError> {
        let mut state = lock(&self.state);
        state.check_session(session)?;
        let events = MemoryBank::parse(bytes)?;
        for (path, params) in events {
            state.catalog.insert(path, params);
        }
        state.ops.push(EngineOp::LoadBank);
        Ok(BankHandle(state.next_id()))
    }

    fn resolve_event(
        &mut self,
        session: SessionHandle,
        path: &str,
    ) -> Result<EventDescription, EngineError> {
        let mut state = lock(&self.state);
        state.check_session(session)?;
        if !state.catalog.contains_key(path) {
            return Err(EngineError::new(ERR_EVENT_NOT_FOUND, "event not found"));
        }
        let description = EventDescription(state.next_id());
        state.descriptions.insert(description, path.to_string());
        Ok(description)
    }

    fn create_instance(
        &mut self,
        description: EventDescription,
    ) -> Result<InstanceHandle, EngineError> {
        let mut state = lock(&self.state);
        let path = state
            .descriptions
            .get(&description)
            .cloned()
            .ok_or_else(|| EngineError::new(ERR_INVALID_HANDLE, "invalid event description"))?;
        let instance = InstanceHandle(state.next_id());
        state.instances.insert(
            instance,
            MemoryInstance {
                path,
                playing: false,
                paused: false,
                volume: 1.0,
                params: HashMap::new(),
            },
        );
        Ok(instance)
    }

    fn start(&mut self, instance: InstanceHandle) -> Result<(), EngineError> {
        let mut state = lock(&self.state);
        if state.fail_start {
            return Err(EngineError::new(ERR_INJECTED, "start failed"));
        }
        state.instance_mut(instance)?.playing = true;
        state.ops.push(EngineOp::Start(instance));
        Ok(())
    }

    fn stop(&mut self, instance: InstanceHandle, mode: StopMode) -> Result<(), EngineError> {
        let mut state = lock(&self.state);
        state.instance_mut(instance)?.playing = false;
        state.ops.push(EngineOp::Stop(instance, mode));
        Ok(())
    }

    fn set_parameter(&mut self, instance: InstanceHandle, name: &str, value: f32) -> bool {
        let mut state = lock(&self.state);
        let Some(path) = state.instances.get(&instance).map(|i| i.path.clone()) else {
            return false;
        };
        if !state.accepts_param(&path, name) {
            return false;
        }
        match state.instance_mut(instance) {
            Ok(inst) => {
                inst.params.insert(name.to_string(), value);
                true
            }
            Err(_) => false,
        }
    }

    fn set_paused(&mut self, instance: InstanceHandle, paused: bool) -> bool {
        let mut state = lock(&self.state);
        match state.instance_mut(instance) {
            Ok(inst) => {
                inst.paused = paused;
                true
            }
            Err(_) => false,
        }
    }

    fn set_volume(&mut self, instance: InstanceHandle, volume: f32) -> bool {
        let mut state = lock(&self.state);
        match state.instance_mut(instance) {
            Ok(inst) => {
                inst.volume = volume;
                true
            }
            Err(_) => false,
        }
    }

    fn set_master_paused(&mut self, session: SessionHandle, paused: bool) -> bool {
        let mut state = lock(&self.state);
        if state.check_session(session).is_err() {
            return false;
        }
        state.master_paused = paused;
        true
    }

    fn release(&mut self, instance: InstanceHandle) -> Result<(), EngineError> {
        let mut state = lock(&self.state);
        if state.fail_release {
            return Err(EngineError::new(ERR_INJECTED, "release failed"));
        }
        state
            .instances
            .remove(&instance)
            .ok_or_else(|| EngineError::new(ERR_INVALID_HANDLE, "invalid instance handle"))?;
        state.ops.push(EngineOp::Release(instance));
        Ok(())
    }

    fn tick(&mut self, session: SessionHandle) {
        let mut state = lock(&self.state);
        state.ops.push(EngineOp::Tick);
        if state.check_session(session).is_ok() {
            state.ticks += 1;
        } else {
            state.stale_ticks += 1;
        }
    }

    fn shutdown(&mut self, session: SessionHandle) {
        let mut state = lock(&self.state);
        if state.check_session(session).is_err() {
            return;
        }
        state.session = None;
        state.catalog.clear();
        state.descriptions.clear();
        state.master_paused = false;
        state.ops.push(EngineOp::Shutdown);
    }

    fn event_paths(&mut self, session: SessionHandle) -> Vec<String> {
        let mut state = lock(&self.state);
        state.catalog_queries += 1;
        if state.check_session(session).is_err() {
            return Vec::new();
        }
        state.catalog.keys().cloned().collect()
    }
}

/// Read-only window onto a [`MemoryEngine`].
#[derive(Debug, Clone)]
pub struct MemoryProbe {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryProbe {
    /// Instances created and not yet released.
    pub fn live_instances(&self) -> usize {
        lock(&self.state).instances.len()
    }

    pub fn instances_for(&self, path: &str) -> Vec<MemoryInstance> {
        lock(&self.state)
            .instances
            .values()
            .filter(|i| i.path == path)
            .cloned()
            .collect()
    }

    pub fn tick_count(&self) -> u64 {
        lock(&self.state).ticks
    }

    /// Ticks that arrived without a live session.
    pub fn stale_tick_count(&self) -> u64 {
        lock(&self.state).stale_ticks
    }

    /// How many times the event catalog was listed.
    pub fn catalog_queries(&self) -> u64 {
        lock(&self.state).catalog_queries
    }

    pub fn session_live(&self) -> bool {
        lock(&self.state).session.is_some()
    }

    pub fn master_paused(&self) -> bool {
        lock(&self.state).master_paused
    }

    pub fn knows_event(&self, path: &str) -> bool {
        lock(&self.state).catalog.contains_key(path)
    }

    pub fn ops(&self) -> Vec<EngineOp> {
        lock(&self.state).ops.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_parse_rejects_garbage() {
        let mut engine = MemoryEngine::new();
        let session = engine.create_session(512).unwrap();

        assert!(engine.load_bank_from_memory(session, b"RIFF....").is_err());
        assert!(engine.load_bank_from_memory(session, &[0xff, 0xfe]).is_err());
        assert!(
            engine
                .load_bank_from_memory(session, b"EVBANK1\nMusic/NoPrefix")
                .is_err()
        );
    }

    #[test]
    fn test_instance_lifecycle() {
        let mut engine = MemoryEngine::new();
        let probe = engine.probe();
        let session = engine.create_session(512).unwrap();
        let bank = MemoryBank::new()
            .event_with_params("event:/Music/Theme", &["Intensity"])
            .to_bytes();
        engine.load_bank_from_memory(session, &bank).unwrap();

        let desc = engine.resolve_event(session, "event:/Music/Theme").unwrap();
        let inst = engine.create_instance(desc).unwrap();
        engine.start(inst).unwrap();
        assert_eq!(probe.live_instances(), 1);
        assert!(probe.instances_for("event:/Music/Theme")[0].playing);

        assert!(engine.set_parameter(inst, "Intensity", 0.7));
        assert!(!engine.set_parameter(inst, "Unknown", 0.7));

        engine.stop(inst, StopMode::AllowFadeout).unwrap();
        engine.release(inst).unwrap();
        assert_eq!(probe.live_instances(), 0);
        assert!(engine.release(inst).is_err());
    }

    #[test]
    fn test_tick_after_shutdown_is_stale() {
        let mut engine = MemoryEngine::new();
        let probe = engine.probe();
        let session = engine.create_session(512).unwrap();

        engine.tick(session);
        engine.shutdown(session);
        engine.tick(session);

        assert_eq!(probe.tick_count(), 1);
        assert_eq!(probe.stale_tick_count(), 1);
        assert!(!probe.session_live());
    }
}
