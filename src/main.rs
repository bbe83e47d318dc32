//! Terminal runner (default binary).
//!
//! Drives a [`GameState`] at a fixed timestep, feeds it keyboard input through
//! the DAS/ARR [`InputHandler`] and draws every frame with the framebuffer
//! renderer.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};

use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{handle_key_event, should_quit, InputHandler};
use blockfall::term::{restore_terminal, FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, TICK_MS};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the piece randomizer. The same seed deals the same pieces.
    /// A random seed is used when omitted.
    /// Example: `blockfall --seed 42` or `blockfall -s 42`.
    #[arg(short, long)]
    seed: Option<u32>,
    /// Write log output to this file (the terminal is busy drawing the game).
    /// The level filter is read from `RUST_LOG` and defaults to `info`.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let seed = args.seed.unwrap_or_else(rand::random);

    // A panic would otherwise leave the terminal in raw mode on the alternate screen.
    std::panic::set_hook(Box::new(|panic_info| {
        restore_terminal();
        eprint!("{panic_info}\n\n");
    }));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to install logger")?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, seed: u32) -> Result<()> {
    let mut game = GameState::new(seed);
    info!("starting: seed={}", game.seed());
    let view = GameView::default();

    let mut input = InputHandler::new();
    if term.key_releases() {
        // Releases are reported, so a held key never needs to time out.
        input = input.with_key_release_timeout_ms(u32::MAX);
    }

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            info!("quit: score={} level={} lines={}", game.score(), game.level(), game.lines());
                            return Ok(());
                        }

                        if let Some(action) = input.handle_key_press(key.code) {
                            apply(&mut game, &mut input, action);
                        } else if key.kind == KeyEventKind::Press {
                            match handle_key_event(key) {
                                // Held keys are handled by the input handler above.
                                Some(GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDropPressed) | None => {}
                                Some(action) => apply(&mut game, &mut input, action),
                            }
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(action) = input.handle_key_release(key.code) {
                            apply(&mut game, &mut input, action);
                        }
                    }
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for action in input.update(TICK_MS) {
                apply(&mut game, &mut input, action);
            }
            game.tick();
            if let Some(event) = game.take_last_event() {
                debug!("lock: lines={} points={}", event.lines_cleared, event.points);
                input.piece_locked();
            }
        }
    }
}

fn apply(game: &mut GameState, input: &mut InputHandler, action: GameAction) {
    let accepted = game.apply_action(action);
    debug!("action {} accepted={}", action.as_str(), accepted);

    if accepted && action == GameAction::Reset {
        input.reset();
    }
}
