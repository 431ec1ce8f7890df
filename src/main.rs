//! Stack Builder headless runner
//!
//! Plays a number of games with a simple bot, feeding the results through the
//! player profile exactly like the game screen would: stats, session log,
//! skin purchases and ad pacing. Useful for balancing tuning files.

use std::path::{Path, PathBuf};

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use stack_builder::Profile;
use stack_builder::audio::{AudioManager, LogSink};
use stack_builder::consts::SIM_DT;
use stack_builder::monetization::{InterstitialPacing, NoAds, request_continue};
use stack_builder::persistence::{JsonStore, MemoryStore, Store};
use stack_builder::platform::FrameClock;
use stack_builder::sim::{Command, Session, SessionEvent, SessionState};
use stack_builder::tuning::Tuning;

/// Safety net so a bot that never misses still finishes
const MAX_TICKS_PER_GAME: u64 = 60 * 60 * 10;

/// Headless autoplay for balancing tuning files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON save to load and update (in-memory when omitted)
    #[arg(long = "save")]
    save_path: Option<PathBuf>,
    /// Tuning overrides as JSON
    #[arg(long = "tuning")]
    tuning_path: Option<PathBuf>,
    /// RNG seed for block colours and the bot
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Games to play
    #[arg(short, long, default_value_t = 5)]
    games: u32,
    /// Bot aim error in play-area units; larger misses sooner
    #[arg(long, default_value_t = 6.0, value_parser = parse_spread)]
    spread: f32,
}

fn parse_spread(s: &str) -> Result<f32, String> {
    let spread: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if !spread.is_finite() || spread < 0.0 {
        return Err(format!("expected a finite, non-negative number, got {s}"));
    }
    Ok(spread)
}

fn load_tuning(cli: &Cli) -> Result<Tuning, Box<dyn std::error::Error>> {
    match &cli.tuning_path {
        Some(path) => {
            let tuning = Tuning::from_json(&std::fs::read_to_string(path)?)?;
            log::info!("Loaded tuning from {}", path.display());
            Ok(tuning)
        }
        None => Ok(Tuning::default()),
    }
}

/// Open the save file, or `None` (with a warning) when it cannot be used, so
/// the run carries on in memory
fn open_store(path: &Path) -> Option<JsonStore> {
    match JsonStore::open(path) {
        Ok(store) => Some(store),
        Err(e) => {
            log::warn!("Cannot open save {}: {e}; playing without saving", path.display());
            None
        }
    }
}

/// Aims at the top block with some error and drops when lined up
struct Bot {
    rng: Pcg32,
    spread: f32,
    /// (active block id, x to drop at)
    target: Option<(u64, f32)>,
}

impl Bot {
    fn new(seed: u64, spread: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
            spread: if spread.is_finite() { spread.abs() } else { 0.0 },
            target: None,
        }
    }

    fn wants_drop(&mut self, state: &SessionState, play_width: f32) -> bool {
        let Some(top) = state.top_block() else {
            return true;
        };
        let active = &state.active;
        let target_x = match self.target {
            Some((id, x)) if id == active.id => x,
            _ => {
                let reach = (play_width - active.width).max(0.0);
                let x = (top.x + self.rng.random_range(-self.spread..=self.spread)).clamp(0.0, reach);
                self.target = Some((active.id, x));
                x
            }
        };
        (active.x - target_x).abs() <= active.speed * 0.5
    }
}

#[derive(Debug, Default)]
struct Summary {
    games: u32,
    best: u64,
    total: u64,
    interstitials: u32,
    /// Sessions in the store's log after the run
    logged: usize,
}

fn play<S: Store>(cli: &Cli, tuning: Tuning, mut profile: Profile<S>) -> Result<Summary, Box<dyn std::error::Error>> {
    let audio = AudioManager::new(profile.settings());
    let mut sink = LogSink;
    let mut pacing = InterstitialPacing::default();
    let mut bot = Bot::new(cli.seed, cli.spread);
    let mut clock = FrameClock::new();
    let mut session: Session = profile.new_session(tuning, cli.seed);
    let mut summary = Summary::default();

    for game in 1..=cli.games {
        let mut events = session.apply(Command::Start)?;

        loop {
            for event in &events {
                audio.handle(event, &mut sink);
                if let SessionEvent::LevelUp { level } = event {
                    log::debug!("Game {game}: level {level}");
                }
            }
            if session.state().is_game_over() {
                break;
            }
            if session.state().time_ticks >= MAX_TICKS_PER_GAME {
                log::warn!("Game {game} hit the tick limit at score {}", session.state().score);
                break;
            }

            clock.run_frame(&mut session, SIM_DT);
            events = if bot.wants_drop(session.state(), session.tuning().play_width) {
                session.apply(Command::Drop)?
            } else {
                Vec::new()
            };
        }

        if let Err(e) = session.apply(request_continue(&mut NoAds)) {
            log::debug!("No continue: {e}");
        }

        let report = profile.record_game_over(session.state());
        log::info!(
            "Game {game}: score {} level {} perfect {} combo {} ({}s)",
            report.record.score,
            report.record.level,
            report.record.perfect_hits,
            report.record.combo,
            report.record.duration_seconds
        );
        summary.games += 1;
        summary.best = summary.best.max(report.record.score);
        summary.total += report.record.score;

        if pacing.on_game_over(profile.settings().ads_enabled) {
            summary.interstitials += 1;
            log::info!("Interstitial due after game {game}");
        }

        // Spend points on the cheapest skin still locked
        let cheapest = profile
            .skins()
            .iter()
            .filter(|s| !s.unlocked && s.price <= profile.stats().total_score)
            .min_by_key(|s| s.price)
            .map(|s| s.id.clone());
        if let Some(id) = cheapest {
            profile.purchase_skin(&id)?;
            session.set_palette(profile.active_palette());
        }

        session.apply(Command::Reset)?;
        session.apply(Command::SetHighScore(report.high_score))?;
    }

    summary.logged = profile.session_history().len();
    Ok(summary)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let tuning = load_tuning(&cli)?;
    log::info!("Stack Builder (headless) starting, seed {}", cli.seed);

    let store = cli.save_path.as_deref().and_then(open_store);
    let summary = match store {
        Some(store) => play(&cli, tuning, Profile::load(store))?,
        None => play(&cli, tuning, Profile::load(MemoryStore::new()))?,
    };

    let average = if summary.games > 0 {
        summary.total as f64 / f64::from(summary.games)
    } else {
        0.0
    };
    println!(
        "{} games, best {}, average {:.1}, {} interstitials, {} sessions logged",
        summary.games, summary.best, average, summary.interstitials, summary.logged
    );
    Ok(())
}
