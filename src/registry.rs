// src/registry.rs
//
// Event instance registry.
//
// Maps an event path to the single engine instance currently playing for it.
// Every per-event control call goes through here. The registry never holds
// more than one instance per path: `play` on a registered path replaces the
// old instance (stop + release) before a new one is created.

use std::collections::{BTreeMap, HashMap};

use log::{debug, info, warn};

use crate::binding::{EngineBinding, InstanceHandle, SessionHandle, StopMode};
use crate::error::{Result, RuntimeError};

/// State of a registered path. Unregistered paths are "absent".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    Active,
    Paused,
}

#[derive(Debug, Clone, Copy)]
struct RegisteredInstance {
    handle: InstanceHandle,
    state: InstanceState,
}

/// Owned table of live event instances.
#[derive(Debug, Default)]
pub struct EventRegistry {
    instances: HashMap<String, RegisteredInstance>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh instance of `path`, replacing any registered one.
    pub fn play<B>(
        &mut self,
        binding: &mut B,
        session: SessionHandle,
        path: &str,
    ) -> Result<InstanceHandle>
    where
        B: EngineBinding + ?Sized,
    {
        if let Some(previous) = self.instances.remove(path) {
            debug!("Restarting already registered event: {}", path);
            Self::teardown(binding, path, previous.handle, StopMode::Immediate);
        }

        let description =
            binding
                .resolve_event(session, path)
                .map_err(|_| RuntimeError::EventNotFound {
                    path: path.to_string(),
                })?;

        let handle = binding
            .create_instance(description)
            .map_err(|_| RuntimeError::EngineCallFailed {
                path: path.to_string(),
                op: "create_instance",
            })?;

        if let Err(e) = binding.start(handle) {
            warn!("Failed to start {}: {}", path, e);
            if let Err(e) = binding.release(handle) {
                warn!("Failed to release unstarted instance of {}: {}", path, e);
            }
            return Err(RuntimeError::EngineCallFailed {
                path: path.to_string(),
                op: "start",
            });
        }

        self.instances.insert(
            path.to_string(),
            RegisteredInstance {
                handle,
                state: InstanceState::Active,
            },
        );
        info!("Started event: {}", path);
        Ok(handle)
    }

    /// Stop and release the instance for `path`.
    ///
    /// Returns `false` when nothing was registered.
    pub fn stop<B>(&mut self, binding: &mut B, path: &str) -> bool
    where
        B: EngineBinding + ?Sized,
    {
        let Some(entry) = self.instances.remove(path) else {
            return false;
        };
        Self::teardown(binding, path, entry.handle, StopMode::AllowFadeout);
        info!("Stopped event: {}", path);
        true
    }

    pub fn set_parameter<B>(
        &mut self,
        binding: &mut B,
        path: &str,
        name: &str,
        value: f32,
    ) -> Result<()>
    where
        B: EngineBinding + ?Sized,
    {
        let entry = self.lookup(path)?;
        if binding.set_parameter(entry.handle, name, value) {
            Ok(())
        } else {
            Err(RuntimeError::ParameterRejected {
                path: path.to_string(),
                name: name.to_string(),
            })
        }
    }

    pub fn set_paused<B>(&mut self, binding: &mut B, path: &str, paused: bool) -> Result<()>
    where
        B: EngineBinding + ?Sized,
    {
        let entry = self.lookup(path)?;
        if !binding.set_paused(entry.handle, paused) {
            return Err(RuntimeError::EngineCallFailed {
                path: path.to_string(),
                op: "set_paused",
            });
        }
        if let Some(entry) = self.instances.get_mut(path) {
            entry.state = if paused {
                InstanceState::Paused
            } else {
                InstanceState::Active
            };
        }
        Ok(())
    }

    /// Forward `volume` unmodified. Values outside [0, 1] are the engine's call.
    pub fn set_volume<B>(&mut self, binding: &mut B, path: &str, volume: f32) -> Result<()>
    where
        B: EngineBinding + ?Sized,
    {
        let entry = self.lookup(path)?;
        if binding.set_volume(entry.handle, volume) {
            Ok(())
        } else {
            Err(RuntimeError::EngineCallFailed {
                path: path.to_string(),
                op: "set_volume",
            })
        }
    }

    /// Stop and release every instance, then clear the table.
    ///
    /// Engine failures are logged and skipped. Returns how many occurred.
    pub fn release_all<B>(&mut self, binding: &mut B, mode: StopMode) -> usize
    where
        B: EngineBinding + ?Sized,
    {
        let mut failures = 0;
        for (path, entry) in self.instances.drain() {
            failures += Self::teardown(binding, &path, entry.handle, mode);
        }
        failures
    }

    pub fn state(&self, path: &str) -> Option<InstanceState> {
        self.instances.get(path).map(|e| e.state)
    }

    /// Sorted copy of the current path -> state table.
    pub fn snapshot(&self) -> BTreeMap<String, InstanceState> {
        self.instances
            .iter()
            .map(|(path, e)| (path.clone(), e.state))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    fn lookup(&self, path: &str) -> Result<RegisteredInstance> {
        self.instances
            .get(path)
            .copied()
            .ok_or_else(|| RuntimeError::InstanceNotFound {
                path: path.to_string(),
            })
    }

    fn teardown<B>(binding: &mut B, path: &str, handle: InstanceHandle, mode: StopMode) -> usize
    where
        B: EngineBinding + ?Sized,
    {
        let mut failures = 0;
        if let Err(e) = binding.stop(handle, mode) {
            warn!("Failed to stop {}: {}", path, e);
            failures += 1;
        }
        if let Err(e) = binding.release(handle) {
            warn!("Failed to release {}: {}", path, e);
            failures += 1;
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_engine::{EngineOp, MemoryBank, MemoryEngine, MemoryProbe};

    const THEME: &str = "event:/Music/Theme";

    fn setup(engine: MemoryEngine) -> (MemoryEngine, MemoryProbe, SessionHandle) {
        let mut engine = engine;
        let probe = engine.probe();
        let session = engine.create_session(512).unwrap();
        let bank = MemoryBank::new()
            .event_with_params(THEME, &["Intensity"])
            .event("event:/UI/Click")
            .to_bytes();
        engine.load_bank_from_memory(session, &bank).unwrap();
        (engine, probe, session)
    }

    #[test]
    fn test_play_registers_active_instance() {
        let (mut engine, probe, session) = setup(MemoryEngine::new());
        let mut registry = EventRegistry::new();

        registry.play(&mut engine, session, THEME).unwrap();

        assert_eq!(registry.state(THEME), Some(InstanceState::Active));
        assert_eq!(probe.live_instances(), 1);
    }

    #[test]
    fn test_replay_replaces_instance() {
        let (mut engine, probe, session) = setup(MemoryEngine::new());
        let mut registry = EventRegistry::new();

        let first = registry.play(&mut engine, session, THEME).unwrap();
        let second = registry.play(&mut engine, session, THEME).unwrap();

        assert_ne!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(probe.live_instances(), 1);
        assert!(probe.ops().contains(&EngineOp::Release(first)));
    }

    #[test]
    fn test_unknown_event_registers_nothing() {
        let (mut engine, probe, session) = setup(MemoryEngine::new());
        let mut registry = EventRegistry::new();

        let err = registry
            .play(&mut engine, session, "event:/Missing")
            .unwrap_err();

        assert_eq!(
            err,
            RuntimeError::EventNotFound {
                path: "event:/Missing".into()
            }
        );
        assert!(registry.is_empty());
        assert_eq!(probe.live_instances(), 0);
    }

    #[test]
    fn test_start_failure_releases_instance() {
        let (mut engine, probe, session) = setup(MemoryEngine::new().with_start_failure());
        let mut registry = EventRegistry::new();

        assert!(registry.play(&mut engine, session, THEME).is_err());
        assert!(registry.is_empty());
        assert_eq!(probe.live_instances(), 0);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut engine, probe, session) = setup(MemoryEngine::new());
        let mut registry = EventRegistry::new();
        let handle = registry.play(&mut engine, session, THEME).unwrap();

        assert!(registry.stop(&mut engine, THEME));
        assert!(!registry.stop(&mut engine, THEME));

        assert!(registry.is_empty());
        assert_eq!(probe.live_instances(), 0);
        assert!(
            probe
                .ops()
                .contains(&EngineOp::Stop(handle, StopMode::AllowFadeout))
        );
    }

    #[test]
    fn test_controls_on_absent_path() {
        let (mut engine, _probe, _session) = setup(MemoryEngine::new());
        let mut registry = EventRegistry::new();

        assert!(matches!(
            registry.set_volume(&mut engine, "event:/DoesNotExist", 0.5),
            Err(RuntimeError::InstanceNotFound { .. })
        ));
        assert!(registry.set_paused(&mut engine, THEME, true).is_err());
        assert!(registry.set_parameter(&mut engine, THEME, "Intensity", 1.0).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_pause_transitions_state() {
        let (mut engine, probe, session) = setup(MemoryEngine::new());
        let mut registry = EventRegistry::new();
        registry.play(&mut engine, session, THEME).unwrap();

        registry.set_paused(&mut engine, THEME, true).unwrap();
        assert_eq!(registry.state(THEME), Some(InstanceState::Paused));
        assert!(probe.instances_for(THEME)[0].paused);

        registry.set_paused(&mut engine, THEME, false).unwrap();
        assert_eq!(registry.state(THEME), Some(InstanceState::Active));
    }

    #[test]
    fn test_volume_passed_through_unclamped() {
        let (mut engine, probe, session) = setup(MemoryEngine::new());
        let mut registry = EventRegistry::new();
        registry.play(&mut engine, session, THEME).unwrap();

        registry.set_volume(&mut engine, THEME, 1.5).unwrap();
        assert_eq!(probe.instances_for(THEME)[0].volume, 1.5);
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let (mut engine, probe, session) = setup(MemoryEngine::new());
        let mut registry = EventRegistry::new();
        registry.play(&mut engine, session, THEME).unwrap();

        registry
            .set_parameter(&mut engine, THEME, "Intensity", 0.25)
            .unwrap();
        assert_eq!(
            probe.instances_for(THEME)[0].params.get("Intensity"),
            Some(&0.25)
        );

        assert_eq!(
            registry.set_parameter(&mut engine, THEME, "Tempo", 1.0),
            Err(RuntimeError::ParameterRejected {
                path: THEME.into(),
                name: "Tempo".into()
            })
        );
    }

    #[test]
    fn test_release_all_completes_despite_failures() {
        let (mut engine, _probe, session) = setup(MemoryEngine::new().with_release_failure());
        let mut registry = EventRegistry::new();
        registry.play(&mut engine, session, THEME).unwrap();
        registry.play(&mut engine, session, "event:/UI/Click").unwrap();

        let failures = registry.release_all(&mut engine, StopMode::Immediate);

        assert_eq!(failures, 2);
        assert!(registry.is_empty());
    }
}
