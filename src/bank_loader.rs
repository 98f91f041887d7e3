// src/bank_loader.rs
//
// Registers raw bank buffers with the engine session.
//
// Loading is best-effort: one bad bank does not stop the rest. The caller
// only learns the aggregate outcome, plus per-bank errors for diagnostics.

use log::{debug, error, info};

use crate::binding::{EngineBinding, SessionHandle};
use crate::error::RuntimeError;

/// Outcome of one `load_banks` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BankLoadReport {
    /// One entry per input buffer, in input order.
    pub outcomes: Vec<Result<(), RuntimeError>>,
}

impl BankLoadReport {
    /// True when every bank loaded. Vacuously true for an empty input.
    pub fn all_loaded(&self) -> bool {
        self.outcomes.iter().all(Result::is_ok)
    }

    pub fn loaded_count(&self) -> usize {
        self.outcomes.iter().filter(|r| r.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &RuntimeError> {
        self.outcomes.iter().filter_map(|r| r.as_ref().err())
    }
}

/// Load every buffer into `session`.
pub fn load_banks<B, I>(binding: &mut B, session: SessionHandle, buffers: I) -> BankLoadReport
where
    B: EngineBinding + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    load_resolved_banks(binding, session, buffers.into_iter().map(Ok))
}

/// Load banks whose bytes the host may have failed to read.
///
/// An `Err(reason)` entry counts as a failed bank at its own index, so
/// indices always follow the caller's list and the catalog is only dumped
/// when every entry was read and loaded.
pub fn load_resolved_banks<B, I, T>(
    binding: &mut B,
    session: SessionHandle,
    entries: I,
) -> BankLoadReport
where
    B: EngineBinding + ?Sized,
    I: IntoIterator<Item = std::result::Result<T, String>>,
    T: AsRef<[u8]>,
{
    let mut report = BankLoadReport::default();

    for (index, entry) in entries.into_iter().enumerate() {
        let outcome = match entry {
            Ok(buffer) => {
                let bytes = buffer.as_ref();
                debug!("Loading bank #{} ({} bytes)", index, bytes.len());
                binding
                    .load_bank_from_memory(session, bytes)
                    .map(|_| ())
                    .map_err(|e| RuntimeError::BankLoadFailure {
                        index,
                        reason: e.to_string(),
                    })
            }
            Err(reason) => Err(RuntimeError::BankLoadFailure { index, reason }),
        };

        match &outcome {
            Ok(()) => debug!("Loaded bank #{}", index),
            Err(e) => error!("{}", e),
        }
        report.outcomes.push(outcome);
    }

    if report.all_loaded() {
        log_available_events(binding, session);
    }

    report
}

/// Dump the session's event catalog to the log.
pub fn log_available_events<B>(binding: &mut B, session: SessionHandle)
where
    B: EngineBinding + ?Sized,
{
    let paths = binding.event_paths(session);
    if paths.is_empty() {
        debug!("No events loaded");
        return;
    }

    info!("=== Available events ({}) ===", paths.len());
    for path in &paths {
        info!("  {}", path);
    }
}
