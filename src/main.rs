// src/main.rs
//
// Runtime sanity run against the in-memory engine.

use std::thread;
use std::time::Duration;

use eventaudio::{MemoryBank, MemoryEngine, Runtime, RuntimeConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let engine = MemoryEngine::new();
    let probe = engine.probe();
    let mut runtime = Runtime::with_config(engine, RuntimeConfig::default());

    // --------------------------------
    // Session + banks
    // --------------------------------

    if !runtime.initialize() {
        eprintln!("Engine failed to initialize");
        std::process::exit(1);
    }

    let master = MemoryBank::new()
        .event_with_params("event:/Music/MainTheme", &["Intensity"])
        .event("event:/UI/Click")
        .to_bytes();
    let broken = b"not a bank".to_vec();

    println!("All banks loaded: {}", runtime.load_banks([&master]));
    println!(
        "With a broken bank: {}",
        runtime.load_banks([&master, &broken])
    );

    // --------------------------------
    // Events
    // --------------------------------

    runtime.play_event("event:/Music/MainTheme");
    runtime.play_event("event:/Music/MainTheme");
    runtime.set_parameter("event:/Music/MainTheme", "Intensity", 0.8);
    runtime.set_volume("event:/Music/MainTheme", 0.5);
    runtime.play_event("event:/UI/Click");
    runtime.play_event("event:/Does/Not/Exist");

    thread::sleep(Duration::from_millis(100));

    println!("Registered: {:?}", runtime.instance_states());
    println!("Live engine instances: {}", probe.live_instances());
    println!("Ticks so far: {}", probe.tick_count());

    runtime.set_master_paused(true);
    runtime.stop_event("event:/UI/Click");
    runtime.stop_event("event:/UI/Click");

    // --------------------------------
    // Teardown
    // --------------------------------

    runtime.release();
    println!(
        "After release: {} live instances, session live = {}",
        probe.live_instances(),
        probe.session_live()
    );
}
