//! Terminal runner (default binary).
//!
//! Embeds the engine in a crossterm terminal: keys become intents, the loop
//! issues gravity ticks at the level's cadence, and [`TerminalHost`] draws
//! whatever the engine reports.
//!
//! Environment: `NANOTRIS_ROWS`, `NANOTRIS_COLUMNS`, `NANOTRIS_SPAWN` and
//! `NANOTRIS_SEED` (random seed, defaults to the clock).

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use nanotris::core::{gravity_interval_ms, Game, GameConfig};
use nanotris::input::{handle_key_event, should_quit};
use nanotris::term::TerminalHost;
use nanotris::types::Intent;

fn seed_from_env() -> u32 {
    std::env::var("NANOTRIS_SEED")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
}

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    let seed = seed_from_env();

    let mut host = TerminalHost::new(&config, seed);
    host.enter()?;

    let result = run(&mut host, config);

    // Always try to restore terminal state.
    let _ = host.exit();

    let (score, lines) = result?;
    eprintln!("[Demo] seed {}", seed);
    eprintln!("[Demo] final score {}, lines {}", score, lines);
    Ok(())
}

fn run(host: &mut TerminalHost, config: GameConfig) -> Result<(u32, u32)> {
    host.draw_frame();

    let mut game = Game::new(host, config);
    let mut level = game.start();
    let mut last_tick = Instant::now();

    loop {
        let (lvl, score, lines) = (game.level(), game.score(), game.lines());
        game.host_mut().draw_stats(lvl, score, lines);
        game.host_mut().flush()?;

        let interval = Duration::from_millis(gravity_interval_ms(level) as u64);
        let timeout = interval
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if should_quit(key) {
                    return Ok((game.score(), game.lines()));
                }

                if game.is_game_over() {
                    // Any key restarts after a game over.
                    game.host_mut().show_message("");
                    level = game.start();
                    last_tick = Instant::now();
                    continue;
                }

                if let Some(intent) = handle_key_event(key) {
                    game.apply(intent);
                    match intent {
                        Intent::Pause if game.is_paused() => {
                            game.host_mut().show_message("PAUSED  p to resume");
                        }
                        Intent::Pause | Intent::Start => {
                            game.host_mut().show_message("");
                            last_tick = Instant::now();
                        }
                        _ => {}
                    }
                    level = game.level();
                }
            }
        }

        if last_tick.elapsed() >= interval {
            if let Some(lvl) = game.tick() {
                level = lvl;
            }
            last_tick = Instant::now();
        }
    }
}
