//! geoarena - headless pillar arena match on the inside of a geosphere.

mod config;
mod occupants;
mod session;
mod shooter;

use anyhow::Result;
use arena::ArenaConfig;
use std::time::Duration;

use config::MatchConfig;
use session::Session;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let arena_config = ArenaConfig::load();
    let match_config = MatchConfig::load();

    println!("╔══════════════════════════════════════════════════╗");
    println!("║                    geoarena                      ║");
    println!("╠══════════════════════════════════════════════════╣");
    println!(
        "║  R = {:<8.1} N = {:<3} bots = {:<4} seed = {:<8}║",
        arena_config.topology.sphere_radius,
        arena_config.topology.subdivisions,
        match_config.bot_count,
        match_config.seed
    );
    println!("╚══════════════════════════════════════════════════╝");

    let mut session = Session::new(&arena_config, &match_config)?;
    let summary = session.arena.topology().summary();
    log::info!(
        "Lattice: {} tiles, {} pentagons, {} planes, per degree {:?}",
        summary.tiles,
        summary.pentagons,
        summary.planes,
        summary.per_degree
    );

    let frame = Duration::from_secs_f64(1.0 / arena_config.tick_rate);
    let mut next_report = 1.0;
    while session.simulated_seconds() < match_config.duration_seconds {
        session.advance(frame);
        if session.simulated_seconds() >= next_report {
            next_report += 1.0;
            let s = session.stats();
            log::info!(
                "t={:>5.1}s hits={} launches={} locked={} destroyed={}",
                session.simulated_seconds(),
                s.hits,
                s.launches,
                s.locked,
                s.destroyed
            );
        }
    }

    let s = session.stats();
    log::info!(
        "Match over after {} ticks: {} shots ({} missed), {} hits ({} discarded), {} launches, {} locked, {} destroyed, {} respawns, {} rounds",
        s.ticks,
        s.shots,
        s.misses,
        s.hits,
        s.discarded,
        s.launches,
        s.locked,
        s.destroyed,
        s.respawns,
        s.rounds
    );
    Ok(())
}
