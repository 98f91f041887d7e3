// src/command.rs
//
// Host method-call boundary.
//
// Host plugin layers deliver calls as a method name plus a loosely typed
// argument map. This module validates them into a `Command` and applies it
// to a `Runtime`. Missing or mistyped arguments become
// `RuntimeError::InvalidArguments`, kept apart from engine failures, which
// the runtime already absorbs.

use std::collections::HashMap;

use log::{debug, warn};

use crate::binding::EngineBinding;
use crate::error::{Result, RuntimeError};
use crate::runtime::Runtime;

/// One argument value as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ArgValue>),
}

/// Named arguments of one method call.
pub type CallArgs = HashMap<String, ArgValue>;

/// A validated call from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Initialize,
    LoadBanks { banks: Vec<String> },
    PlayEvent { path: String },
    StopEvent { path: String },
    SetParameter { path: String, parameter: String, value: f32 },
    SetPaused { path: String, paused: bool },
    SetVolume { path: String, volume: f32 },
    SetMasterPaused { paused: bool },
    Update,
    Release,
}

/// What the host gets back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// Method returns nothing.
    Done,
    Bool(bool),
    /// Unknown method name.
    NotImplemented,
}

/// Resolves bank identifiers (asset names) to raw bytes.
///
/// Reading the bytes is the host's job; the runtime never touches disk.
pub trait BankSource {
    fn bank_bytes(&self, id: &str) -> Option<Vec<u8>>;
}

impl BankSource for HashMap<String, Vec<u8>> {
    fn bank_bytes(&self, id: &str) -> Option<Vec<u8>> {
        self.get(id).cloned()
    }
}

impl Command {
    /// Parse a host call. `Ok(None)` means the method is not known.
    pub fn from_method_call(method: &str, args: &CallArgs) -> Result<Option<Command>> {
        let command = match method {
            "initialize" => Command::Initialize,
            "loadBanks" => Command::LoadBanks {
                banks: string_list(args, "banks", "Banks list required")?,
            },
            "playEvent" => Command::PlayEvent {
                path: path(args, "Event path required")?,
            },
            "stopEvent" => Command::StopEvent {
                path: path(args, "Event path required")?,
            },
            "setParameter" => {
                const MSG: &str = "Path, parameter, and value required";
                Command::SetParameter {
                    path: path(args, MSG)?,
                    parameter: string(args, "parameter", MSG)?,
                    value: number(args, "value", MSG)?,
                }
            }
            "setPaused" => {
                const MSG: &str = "Path and paused state required";
                Command::SetPaused {
                    path: path(args, MSG)?,
                    paused: boolean(args, "paused", MSG)?,
                }
            }
            "setVolume" => {
                const MSG: &str = "Path and volume required";
                Command::SetVolume {
                    path: path(args, MSG)?,
                    volume: number(args, "volume", MSG)?,
                }
            }
            "setMasterPaused" => Command::SetMasterPaused {
                paused: boolean(args, "paused", "Paused state required")?,
            },
            "update" => Command::Update,
            "release" => Command::Release,
            _ => return Ok(None),
        };
        Ok(Some(command))
    }

    /// Apply this command to `runtime`.
    pub fn apply<B>(self, runtime: &mut Runtime<B>, source: &dyn BankSource) -> CommandResult
    where
        B: EngineBinding + 'static,
    {
        match self {
            Command::Initialize => CommandResult::Bool(runtime.initialize()),
            Command::LoadBanks { banks } => {
                debug!("Loading {} banks...", banks.len());
                let entries = banks.iter().map(|id| {
                    source
                        .bank_bytes(id)
                        .ok_or_else(|| format!("failed to read bank {}", id))
                });
                match runtime.load_resolved_banks_report(entries) {
                    Ok(report) => CommandResult::Bool(report.all_loaded()),
                    Err(e) => {
                        warn!("Cannot load banks: {}", e);
                        CommandResult::Bool(false)
                    }
                }
            }
            Command::PlayEvent { path } => {
                runtime.play_event(&path);
                CommandResult::Done
            }
            Command::StopEvent { path } => {
                runtime.stop_event(&path);
                CommandResult::Done
            }
            Command::SetParameter {
                path,
                parameter,
                value,
            } => {
                runtime.set_parameter(&path, &parameter, value);
                CommandResult::Done
            }
            Command::SetPaused { path, paused } => {
                runtime.set_paused(&path, paused);
                CommandResult::Done
            }
            Command::SetVolume { path, volume } => {
                runtime.set_volume(&path, volume);
                CommandResult::Done
            }
            Command::SetMasterPaused { paused } => {
                CommandResult::Bool(runtime.set_master_paused(paused))
            }
            Command::Update => {
                runtime.update();
                CommandResult::Done
            }
            Command::Release => {
                runtime.release();
                CommandResult::Done
            }
        }
    }
}

/// Parse and apply one host call.
pub fn handle_method_call<B>(
    runtime: &mut Runtime<B>,
    method: &str,
    args: &CallArgs,
    source: &dyn BankSource,
) -> Result<CommandResult>
where
    B: EngineBinding + 'static,
{
    match Command::from_method_call(method, args)? {
        Some(command) => Ok(command.apply(runtime, source)),
        None => Ok(CommandResult::NotImplemented),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Argument extraction
// ─────────────────────────────────────────────────────────────────────

fn invalid(msg: &str) -> RuntimeError {
    RuntimeError::InvalidArguments(msg.to_string())
}

fn string(args: &CallArgs, key: &str, msg: &str) -> Result<String> {
    match args.get(key) {
        Some(ArgValue::Str(s)) => Ok(s.clone()),
        _ => Err(invalid(msg)),
    }
}

fn path(args: &CallArgs, msg: &str) -> Result<String> {
    let path = string(args, "path", msg)?;
    if path.is_empty() {
        return Err(invalid(msg));
    }
    Ok(path)
}

fn number(args: &CallArgs, key: &str, msg: &str) -> Result<f32> {
    match args.get(key) {
        Some(ArgValue::Float(v)) => Ok(*v as f32),
        Some(ArgValue::Int(v)) => Ok(*v as f32),
        _ => Err(invalid(msg)),
    }
}

fn boolean(args: &CallArgs, key: &str, msg: &str) -> Result<bool> {
    match args.get(key) {
        Some(ArgValue::Bool(b)) => Ok(*b),
        _ => Err(invalid(msg)),
    }
}

fn string_list(args: &CallArgs, key: &str, msg: &str) -> Result<Vec<String>> {
    let Some(ArgValue::List(items)) = args.get(key) else {
        return Err(invalid(msg));
    };
    items
        .iter()
        .map(|item| match item {
            ArgValue::Str(s) => Ok(s.clone()),
            _ => Err(invalid(msg)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;
    use crate::memory_engine::{MemoryBank, MemoryEngine};
    use crate::registry::InstanceState;

    fn args(pairs: &[(&str, ArgValue)]) -> CallArgs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn str_arg(s: &str) -> ArgValue {
        ArgValue::Str(s.to_string())
    }

    #[test]
    fn test_missing_path_is_invalid_arguments() {
        let err = Command::from_method_call("playEvent", &CallArgs::new()).unwrap_err();
        assert_eq!(err, RuntimeError::InvalidArguments("Event path required".into()));

        let err =
            Command::from_method_call("stopEvent", &args(&[("path", str_arg(""))])).unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGS");
    }

    #[test]
    fn test_mistyped_arguments() {
        let call = args(&[("path", str_arg("event:/A")), ("volume", str_arg("loud"))]);
        assert!(matches!(
            Command::from_method_call("setVolume", &call),
            Err(RuntimeError::InvalidArguments(_))
        ));

        let call = args(&[("banks", ArgValue::List(vec![ArgValue::Int(3)]))]);
        assert!(Command::from_method_call("loadBanks", &call).is_err());
    }

    #[test]
    fn test_integer_value_accepted_as_number() {
        let call = args(&[
            ("path", str_arg("event:/A")),
            ("parameter", str_arg("Intensity")),
            ("value", ArgValue::Int(2)),
        ]);
        assert_eq!(
            Command::from_method_call("setParameter", &call).unwrap(),
            Some(Command::SetParameter {
                path: "event:/A".into(),
                parameter: "Intensity".into(),
                value: 2.0,
            })
        );
    }

    #[test]
    fn test_unknown_method() {
        let mut runtime = Runtime::new(MemoryEngine::new());
        let source: HashMap<String, Vec<u8>> = HashMap::new();
        let result = handle_method_call(&mut runtime, "getVersion", &CallArgs::new(), &source);
        assert_eq!(result, Ok(CommandResult::NotImplemented));
    }

    #[test]
    fn test_method_calls_drive_runtime() {
        let config = RuntimeConfig::default().with_autostart(false);
        let mut runtime = Runtime::with_config(MemoryEngine::new(), config);
        let mut source = HashMap::new();
        source.insert(
            "assets/Master.bank".to_string(),
            MemoryBank::new().event("event:/Music/Theme").to_bytes(),
        );

        let init = handle_method_call(&mut runtime, "initialize", &CallArgs::new(), &source);
        assert_eq!(init, Ok(CommandResult::Bool(true)));

        let load = args(&[(
            "banks",
            ArgValue::List(vec![str_arg("assets/Master.bank")]),
        )]);
        assert_eq!(
            handle_method_call(&mut runtime, "loadBanks", &load, &source),
            Ok(CommandResult::Bool(true))
        );

        let play = args(&[("path", str_arg("event:/Music/Theme"))]);
        assert_eq!(
            handle_method_call(&mut runtime, "playEvent", &play, &source),
            Ok(CommandResult::Done)
        );
        assert_eq!(
            runtime.instance_state("event:/Music/Theme"),
            Some(InstanceState::Active)
        );
    }

    #[test]
    fn test_unresolvable_bank_fails_aggregate() {
        let config = RuntimeConfig::default().with_autostart(false);
        let engine = MemoryEngine::new();
        let probe = engine.probe();
        let mut runtime = Runtime::with_config(engine, config);
        runtime.initialize();
        let mut source = HashMap::new();
        source.insert(
            "a.bank".to_string(),
            MemoryBank::new().event("event:/A").to_bytes(),
        );

        let result = Command::LoadBanks {
            banks: vec!["missing.bank".into(), "a.bank".into()],
        }
        .apply(&mut runtime, &source);

        assert_eq!(result, CommandResult::Bool(false));
        assert!(probe.knows_event("event:/A"));
        // No catalog dump on an aggregate failure.
        assert_eq!(probe.catalog_queries(), 0);
    }
}
