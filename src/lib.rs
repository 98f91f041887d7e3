// src/lib.rs
//
// Library entry point for Rust consumers and native host plugins (FFI).

mod bank_loader;
mod binding;
mod command;
mod config;
mod error;
mod memory_engine;
mod registry;
mod runtime;
mod scheduler;

pub mod ffi;

// Re-export key types for Rust consumers
pub use bank_loader::BankLoadReport;
pub use binding::{
    BankHandle, EngineBinding, EngineError, EventDescription, InstanceHandle, SessionHandle,
    StopMode,
};
pub use command::{ArgValue, BankSource, CallArgs, Command, CommandResult, handle_method_call};
pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use memory_engine::{EngineOp, MemoryBank, MemoryEngine, MemoryInstance, MemoryProbe};
pub use registry::InstanceState;
pub use runtime::Runtime;
pub use scheduler::UpdateScheduler;
