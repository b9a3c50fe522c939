mod settings;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use handsign_core::capture::domain::frame_source::FrameSource;
use handsign_core::capture::infrastructure::image_sequence_source::{is_image, ImageSequenceSource};
use handsign_core::game::domain::choice::Choice;
use handsign_core::game::domain::game_state::GameState;
use handsign_core::game::domain::opponent::Opponent;
use handsign_core::game::domain::round::Round;
use handsign_core::game::infrastructure::random_opponent::RandomOpponent;
use handsign_core::gesture::domain::gesture_classifier::GestureClassifier;
use handsign_core::gesture::domain::gesture_label::GestureLabel;
use handsign_core::gesture::infrastructure::skin_ratio_classifier::SkinRatioClassifier;
use handsign_core::pipeline::capture_executor::{CaptureExecutor, EventFn};
use handsign_core::pipeline::capture_session::CaptureEvent;
use handsign_core::pipeline::gesture_game_use_case::GestureGameUseCase;
use handsign_core::pipeline::infrastructure::sequential_capture_executor::SequentialCaptureExecutor;
use handsign_core::pipeline::infrastructure::threaded_capture_executor::ThreadedCaptureExecutor;
use handsign_core::pipeline::play_round_use_case::PlayRoundUseCase;
use handsign_core::pipeline::session_logger::StdoutSessionLogger;
use handsign_core::shared::constants::IDLE_PROMPT;

use settings::Settings;

/// Rock-paper-scissors against the computer, played by hand gesture.
#[derive(Parser)]
#[command(name = "handsign")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play rounds with explicit moves (rock, paper, scissors, or reset).
    Play {
        #[arg(required = true)]
        moves: Vec<String>,

        /// Seed the computer's choices for a reproducible game.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Report the gesture detected in each image.
    Classify {
        /// Image files or directories of images.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Print one JSON object per frame.
        #[arg(long)]
        json: bool,
    },

    /// Play a round for every gesture found in an image sequence or video.
    Watch {
        /// Image, directory of images, or video file (video needs the `ffmpeg` feature).
        input: PathBuf,

        #[arg(long)]
        seed: Option<u64>,

        /// Frames to ignore recognised gestures for after each round.
        #[arg(long)]
        cooldown: Option<usize>,

        /// Decode frames on a separate thread.
        #[arg(long)]
        threaded: bool,

        /// Drop frames instead of waiting when the classifier falls behind (implies --threaded).
        #[arg(long)]
        drop_late_frames: bool,

        /// Frames buffered between capture and classification.
        #[arg(long)]
        queue_capacity: Option<usize>,

        /// Print events and the final report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show or update the persisted settings.
    Settings {
        #[arg(long)]
        seed: Option<u64>,

        /// Clear a stored seed.
        #[arg(long, conflicts_with = "seed")]
        clear_seed: bool,

        #[arg(long)]
        cooldown: Option<usize>,

        #[arg(long)]
        queue_capacity: Option<usize>,

        #[arg(long)]
        progress_every: Option<usize>,

        /// Restore the defaults before applying other flags.
        #[arg(long)]
        reset: bool,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = Settings::load();

    match cli.command {
        Command::Play { moves, seed } => run_play(&moves, seed.or(settings.seed)),
        Command::Classify { inputs, json } => run_classify(&inputs, json),
        Command::Watch {
            input,
            seed,
            cooldown,
            threaded,
            drop_late_frames,
            queue_capacity,
            json,
        } => {
            validate_input(&input)?;
            let executor: Box<dyn CaptureExecutor> = if threaded || drop_late_frames {
                let mut executor = ThreadedCaptureExecutor::new()
                    .with_capacity(queue_capacity.unwrap_or(settings.queue_capacity));
                if drop_late_frames {
                    executor = executor.dropping_late_frames();
                }
                Box::new(executor)
            } else {
                Box::new(SequentialCaptureExecutor::new())
            };
            run_watch(
                &input,
                seed.or(settings.seed),
                cooldown.unwrap_or(settings.cooldown_frames),
                settings.progress_every,
                executor,
                json,
            )
        }
        Command::Settings {
            seed,
            clear_seed,
            cooldown,
            queue_capacity,
            progress_every,
            reset,
        } => {
            let mut updated = if reset { Settings::default() } else { settings };
            let changed = reset
                || clear_seed
                || seed.is_some()
                || cooldown.is_some()
                || queue_capacity.is_some()
                || progress_every.is_some();
            if clear_seed {
                updated.seed = None;
            }
            if seed.is_some() {
                updated.seed = seed;
            }
            if let Some(frames) = cooldown {
                updated.cooldown_frames = frames;
            }
            if let Some(capacity) = queue_capacity {
                if capacity == 0 {
                    return Err("Queue capacity must be at least 1".into());
                }
                updated.queue_capacity = capacity;
            }
            if let Some(every) = progress_every {
                updated.progress_every = every;
            }
            if changed {
                let path = updated.save()?;
                log::info!("Settings written to {}", path.display());
            }
            println!("{}", serde_json::to_string_pretty(&updated)?);
            Ok(())
        }
    }
}

fn run_play(moves: &[String], seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let mut rounds = PlayRoundUseCase::new(build_opponent(seed));
    let mut state = GameState::new();
    println!("{IDLE_PROMPT}");

    for mv in moves {
        if mv.eq_ignore_ascii_case("reset") {
            state = state.reset();
            println!("{}", format_score(state));
            println!("{IDLE_PROMPT}");
            continue;
        }
        let choice: Choice = mv.parse()?;
        let (next, round) = rounds.execute(state, choice);
        state = next;
        println!("{}", format_round(&round));
        println!("{}", format_score(state));
    }
    Ok(())
}

fn run_classify(inputs: &[PathBuf], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let classifier = SkinRatioClassifier::new();

    for input in inputs {
        validate_input(input)?;
        let mut source = ImageSequenceSource::new();
        let metadata = source.open(input)?;
        log::debug!("{} frame(s) in {}", metadata.total_frames, input.display());

        let mut result = Ok(());
        for frame in source.frames() {
            let classified = frame.map_err(|e| -> Box<dyn std::error::Error> { e }).and_then(|frame| {
                let classification = classifier.classify(&frame)?;
                Ok((frame.index(), classification))
            });
            let (index, classification) = match classified {
                Ok(pair) => pair,
                Err(e) => {
                    result = Err(e);
                    break;
                }
            };

            if json {
                let line = serde_json::json!({
                    "input": input,
                    "frame_index": index,
                    "classification": classification,
                });
                println!("{line}");
            } else {
                println!(
                    "{}#{index}  {:<9} ratio {:.4} ({} skin px)  {}",
                    input.display(),
                    classification.label,
                    classification.skin_ratio,
                    classification.skin_pixels,
                    classification.label.status_message()
                );
            }
        }
        source.close();
        result?;
    }
    Ok(())
}

fn run_watch(
    input: &Path,
    seed: Option<u64>,
    cooldown_frames: usize,
    progress_every: usize,
    executor: Box<dyn CaptureExecutor>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = open_source(input)?;
    let metadata = source.open(input)?;

    let mut last_label: Option<GestureLabel> = None;
    let on_event: EventFn = Box::new(move |event: &CaptureEvent| {
        if json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(e) => log::warn!("Failed to serialize event: {e}"),
            }
            return true;
        }
        match event {
            CaptureEvent::Round {
                frame_index,
                round,
                state,
                ..
            } => {
                println!("[frame {frame_index}] {}", format_round(round));
                println!("{}", format_score(*state));
                last_label = None;
            }
            CaptureEvent::NoGesture { classification, .. }
            | CaptureEvent::Cooldown { classification, .. } => {
                if last_label != Some(classification.label) {
                    println!("{}", classification.label.status_message());
                    last_label = Some(classification.label);
                }
            }
        }
        true
    });

    let mut use_case = GestureGameUseCase::new(
        source,
        Box::new(SkinRatioClassifier::new()),
        PlayRoundUseCase::new(build_opponent(seed)),
        Box::new(StdoutSessionLogger::new(progress_every)),
        executor,
        Some(cooldown_frames),
        Some(on_event),
        None,
    );

    if !json {
        println!("{IDLE_PROMPT}");
    }
    let report = use_case.execute(&metadata, GameState::new())?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!(
            "{} round(s) over {} frame(s), {} dropped. Final {}",
            report.rounds.len(),
            report.frames_seen,
            report.frames_dropped,
            format_score(report.state)
        );
    }
    Ok(())
}

fn build_opponent(seed: Option<u64>) -> Box<dyn Opponent> {
    match seed {
        Some(seed) => {
            log::debug!("Seeding opponent with {seed}");
            Box::new(RandomOpponent::seeded(seed))
        }
        None => Box::new(RandomOpponent::from_entropy()),
    }
}

fn validate_input(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input not found: {}", input.display()).into());
    }
    Ok(())
}

fn open_source(input: &Path) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    if input.is_dir() || is_image(input) {
        Ok(Box::new(ImageSequenceSource::new()))
    } else {
        video_source()
    }
}

#[cfg(feature = "ffmpeg")]
fn video_source() -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    use handsign_core::capture::infrastructure::ffmpeg_source::FfmpegSource;
    Ok(Box::new(FfmpegSource::new()))
}

#[cfg(not(feature = "ffmpeg"))]
fn video_source() -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    Err("Video input needs a build with the `ffmpeg` feature".into())
}

fn format_round(round: &Round) -> String {
    format!(
        "You {} {} vs Computer {} {}  {}",
        round.player.emoji(),
        round.player,
        round.opponent.emoji(),
        round.opponent,
        round.outcome.message()
    )
}

fn format_score(state: GameState) -> String {
    format!(
        "Score: You {} - {} Computer",
        state.player_score, state.opponent_score
    )
}
