//! Headless session: runs an input script through the simulation and prints
//! the final snapshot as JSON.
//!
//! Usage: `jailbreak-headless [config.json] [script.json]`

use std::error::Error;
use std::fs;

use jailbreak_core::{SimConfig, SimEvent};
use jailbreak_runner::{GameRunner, Script, DEFAULT_FIXED_DT};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimConfig::from_json(&fs::read_to_string(path)?)?,
        None => SimConfig::default(),
    };
    let script = match args.next() {
        Some(path) => Script::from_json(&fs::read_to_string(path)?)?,
        None => Script::demo(),
    };

    log::info!(
        "jailbreak headless: {} frames, {} scripted inputs",
        script.frames,
        script.steps.len()
    );

    let mut runner = GameRunner::new(config)?;
    let events = script.run(&mut runner, DEFAULT_FIXED_DT);

    for event in &events {
        match event {
            SimEvent::GameOver | SimEvent::DoorUnlocked { .. } => log::info!("{:?}", event),
            _ => log::debug!("{:?}", event),
        }
    }

    let snapshot = runner.snapshot();
    log::info!(
        "finished at {:.0}ms: {} events, game_over={}, victory={}",
        snapshot.now_ms,
        events.len(),
        snapshot.game_over,
        snapshot.victory
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
