// src/runtime.rs
//
// Runtime facade: the only surface the host plugin layer talks to.
//
// The engine binding, the live session and the instance registry sit behind
// one mutex. Control calls from the host and ticks from the update thread
// both take that lock, so the engine only ever sees one caller at a time.
//
// Teardown order matters: `release` stops (and joins) the update thread
// before it touches any instance or the session.

use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, error, info, warn};

use crate::bank_loader::{self, BankLoadReport};
use crate::binding::{EngineBinding, SessionHandle, StopMode};
use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::registry::{EventRegistry, InstanceState};
use crate::scheduler::UpdateScheduler;

/// Everything that must only be touched from one context at a time.
struct Core<B> {
    binding: B,
    session: Option<SessionHandle>,
    registry: EventRegistry,
}

impl<B: EngineBinding> Core<B> {
    fn session(&self) -> Result<SessionHandle> {
        self.session.ok_or(RuntimeError::NotInitialized)
    }

    fn tick(&mut self) {
        if let Some(session) = self.session {
            self.binding.tick(session);
        }
    }
}

fn lock<B>(core: &Mutex<Core<B>>) -> MutexGuard<'_, Core<B>> {
    core.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Audio event runtime over an engine binding `B`.
pub struct Runtime<B: EngineBinding + 'static> {
    core: Arc<Mutex<Core<B>>>,
    scheduler: UpdateScheduler,
    config: RuntimeConfig,
}

impl<B: EngineBinding + 'static> Runtime<B> {
    pub fn new(binding: B) -> Self {
        Self::with_config(binding, RuntimeConfig::default())
    }

    pub fn with_config(binding: B, config: RuntimeConfig) -> Self {
        Self {
            core: Arc::new(Mutex::new(Core {
                binding,
                session: None,
                registry: EventRegistry::new(),
            })),
            scheduler: UpdateScheduler::new(),
            config,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lifecycle
    // ═══════════════════════════════════════════════════════════════════

    /// Create the engine session and start the update scheduler.
    ///
    /// Calling this on a live runtime releases the old session first.
    pub fn initialize(&mut self) -> bool {
        if self.is_initialized() {
            debug!("Runtime already initialized, releasing previous session");
            self.release();
        }

        {
            let mut core = lock(&self.core);
            match core.binding.create_session(self.config.max_virtual_channels) {
                Ok(session) => core.session = Some(session),
                Err(e) => {
                    let err = RuntimeError::EngineInitFailure {
                        reason: e.to_string(),
                    };
                    error!("{}", err);
                    return false;
                }
            }
        }

        if self.config.autostart_scheduler {
            if let Err(e) = self.start_updates() {
                error!("Failed to start update thread: {}", e);
                self.release();
                return false;
            }
        }

        info!(
            "Engine initialized ({} virtual channels)",
            self.config.max_virtual_channels
        );
        true
    }

    /// Stop updates, release every instance, then shut the session down.
    ///
    /// Safe to call at any time, including before `initialize`.
    pub fn release(&mut self) {
        self.scheduler.stop();

        let mut core = lock(&self.core);
        let Some(session) = core.session.take() else {
            return;
        };

        let Core {
            binding, registry, ..
        } = &mut *core;
        let failures = registry.release_all(binding, StopMode::Immediate);
        if failures > 0 {
            warn!("{} engine calls failed while releasing instances", failures);
        }
        binding.shutdown(session);
        info!("Released engine resources");
    }

    /// Start the periodic update thread. No-op when already running.
    pub fn start_updates(&mut self) -> io::Result<()> {
        let core = Arc::clone(&self.core);
        self.scheduler
            .start(self.config.update_interval, move || lock(&core).tick())
    }

    /// Stop the periodic update thread. The host must then call `update`.
    pub fn stop_updates(&mut self) {
        self.scheduler.stop();
    }

    pub fn is_initialized(&self) -> bool {
        lock(&self.core).session.is_some()
    }

    pub fn is_updating(&self) -> bool {
        self.scheduler.is_running()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Banks
    // ═══════════════════════════════════════════════════════════════════

    /// Load bank buffers. True only when every bank loaded.
    pub fn load_banks<I>(&self, buffers: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        match self.load_banks_report(buffers) {
            Ok(report) => report.all_loaded(),
            Err(e) => {
                warn!("Cannot load banks: {}", e);
                false
            }
        }
    }

    /// Like [`load_banks`](Self::load_banks), with the per-bank outcomes.
    pub fn load_banks_report<I>(&self, buffers: I) -> Result<BankLoadReport>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut core = lock(&self.core);
        let session = core.session()?;
        Ok(bank_loader::load_banks(&mut core.binding, session, buffers))
    }

    /// Load banks the host resolved itself; `Err(reason)` marks one it could not read.
    pub fn load_resolved_banks_report<I, T>(&self, entries: I) -> Result<BankLoadReport>
    where
        I: IntoIterator<Item = std::result::Result<T, String>>,
        T: AsRef<[u8]>,
    {
        let mut core = lock(&self.core);
        let session = core.session()?;
        Ok(bank_loader::load_resolved_banks(
            &mut core.binding,
            session,
            entries,
        ))
    }

    /// Event paths known to the live session.
    pub fn available_events(&self) -> Vec<String> {
        let mut core = lock(&self.core);
        let session = core.session;
        match session {
            Some(session) => core.binding.event_paths(session),
            None => Vec::new(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Event control
    // ═══════════════════════════════════════════════════════════════════

    pub fn play_event(&self, path: &str) {
        let result = self.with_core(|core| {
            let session = core.session()?;
            let Core {
                binding, registry, ..
            } = core;
            registry.play(binding, session, path).map(|_| ())
        });
        report("play", path, result);
    }

    pub fn stop_event(&self, path: &str) {
        let result = self.with_core(|core| {
            core.session()?;
            let Core {
                binding, registry, ..
            } = core;
            if registry.stop(binding, path) {
                Ok(())
            } else {
                Err(RuntimeError::InstanceNotFound {
                    path: path.to_string(),
                })
            }
        });
        report("stop", path, result);
    }

    pub fn set_parameter(&self, path: &str, name: &str, value: f32) {
        let result = self.with_core(|core| {
            core.session()?;
            let Core {
                binding, registry, ..
            } = core;
            registry.set_parameter(binding, path, name, value)
        });
        report("set parameter on", path, result);
    }

    pub fn set_paused(&self, path: &str, paused: bool) {
        let result = self.with_core(|core| {
            core.session()?;
            let Core {
                binding, registry, ..
            } = core;
            registry.set_paused(binding, path, paused)
        });
        report("set paused on", path, result);
    }

    pub fn set_volume(&self, path: &str, volume: f32) {
        let result = self.with_core(|core| {
            core.session()?;
            let Core {
                binding, registry, ..
            } = core;
            registry.set_volume(binding, path, volume)
        });
        report("set volume on", path, result);
    }

    /// Pause or resume the master bus. Returns the engine's answer.
    pub fn set_master_paused(&self, paused: bool) -> bool {
        let mut core = lock(&self.core);
        let Some(session) = core.session else {
            warn!("Cannot set master paused: {}", RuntimeError::NotInitialized);
            return false;
        };
        let ok = core.binding.set_master_paused(session, paused);
        if ok {
            info!("Master bus paused = {}", paused);
        } else {
            warn!("Engine rejected master paused = {}", paused);
        }
        ok
    }

    /// Tick the engine once. For hosts driving their own frame loop.
    pub fn update(&self) {
        lock(&self.core).tick();
    }

    // ═══════════════════════════════════════════════════════════════════
    // Readback
    // ═══════════════════════════════════════════════════════════════════

    pub fn instance_state(&self, path: &str) -> Option<InstanceState> {
        lock(&self.core).registry.state(path)
    }

    pub fn instance_states(&self) -> BTreeMap<String, InstanceState> {
        lock(&self.core).registry.snapshot()
    }

    fn with_core<T>(&self, f: impl FnOnce(&mut Core<B>) -> Result<T>) -> Result<T> {
        let mut core = lock(&self.core);
        f(&mut core)
    }
}

impl<B: EngineBinding + 'static> Drop for Runtime<B> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Engine-level failures never reach the caller; log them and move on.
fn report(action: &str, path: &str, result: Result<()>) {
    match result {
        Ok(()) => {}
        Err(RuntimeError::InstanceNotFound { .. }) => {
            debug!("Cannot {} {}: no instance registered", action, path)
        }
        Err(e) => warn!("Failed to {} {}: {}", action, path, e),
    }
}
