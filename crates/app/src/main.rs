use std::{
    io::Write,
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use clap::{Parser, Subcommand};
use morse_blink_core::{
    render_code, AppConfig, AudioSource, MorsePlayer, Panel, SimulatedAudio, Timeline,
};
use tracing_subscriber::EnvFilter;

fn main() -> morse_blink_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            source,
            auto_pause_after,
        } => run_play(&source.load()?, auto_pause_after),
        Commands::Schedule { source, output } => run_schedule(&source.load()?, output.as_deref()),
        Commands::Encode { source } => {
            let config = source.load()?;
            println!("{}", render_code(&config.message));
            Ok(())
        }
    }
}

fn run_play(config: &AppConfig, auto_pause_after: Option<f64>) -> morse_blink_core::Result<()> {
    let timeline = Timeline::from_message(&config.message, config.timing.unit_seconds);
    let audio = SimulatedAudio::new(timeline.total_duration_seconds());
    let mut player = MorsePlayer::from_config(config, audio, Panel::new());
    let poll_interval = config.timing.poll_interval();

    tracing::info!(
        message = %config.message,
        total_seconds = timeline.total_duration_seconds(),
        "starting playback"
    );

    let origin = Instant::now();
    let mut last = origin;
    let mut auto_pause = auto_pause_after.map(Duration::from_secs_f64);
    let mut stdout = std::io::stdout();

    player.press(Duration::ZERO);
    let mut drawn = draw(&mut stdout, &player, None)?;

    while player.is_playing() {
        thread::sleep(poll_interval);

        let now = Instant::now();
        player.audio_mut().advance((now - last).as_secs_f64());
        last = now;

        let elapsed = now - origin;
        player.pump_audio_events();
        player.tick(elapsed);

        if auto_pause.is_some_and(|after| elapsed >= after) {
            auto_pause = None;
            tracing::info!(?elapsed, "pausing on request");
            player.press(elapsed);
        }

        drawn = draw(&mut stdout, &player, Some(drawn))?;
    }

    writeln!(stdout)?;
    tracing::info!(
        position = player.audio().position_seconds(),
        "playback stopped"
    );
    Ok(())
}

/// Redraws the panel line when it changed and returns what is on screen.
fn draw(
    out: &mut impl Write,
    player: &MorsePlayer<SimulatedAudio, Panel>,
    previous: Option<String>,
) -> morse_blink_core::Result<String> {
    let line = player.panel().render_line();
    if previous.as_deref() != Some(line.as_str()) {
        write!(out, "\r{line}    ")?;
        out.flush()?;
    }
    Ok(line)
}

fn run_schedule(config: &AppConfig, output: Option<&Path>) -> morse_blink_core::Result<()> {
    let timeline = Timeline::from_message(&config.message, config.timing.unit_seconds);
    let json = timeline.to_json_pretty()?;

    match output {
        Some(path) => {
            tracing::info!(?path, intervals = timeline.intervals().len(), "writing schedule");
            std::fs::write(path, json)?;
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Blink a Morse message in time with its audio clip", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play the clip and blink the indicator in the terminal.
    Play {
        #[command(flatten)]
        source: MessageSource,
        /// Press pause after this many seconds instead of playing to the end.
        #[arg(long)]
        auto_pause_after: Option<f64>,
    },
    /// Print the light schedule as JSON intervals.
    Schedule {
        #[command(flatten)]
        source: MessageSource,
        /// Write the schedule to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the dot/dash rendering of the message.
    Encode {
        #[command(flatten)]
        source: MessageSource,
    },
}

#[derive(clap::Args, Debug)]
struct MessageSource {
    /// Optional JSON preset describing the clip.
    #[arg(short, long)]
    preset: Option<PathBuf>,
    /// Override the encoded message.
    #[arg(short, long)]
    message: Option<String>,
}

impl MessageSource {
    fn load(&self) -> morse_blink_core::Result<AppConfig> {
        let mut config = match &self.preset {
            Some(path) => AppConfig::from_json_file(path)?,
            None => AppConfig::default(),
        };
        if let Some(message) = &self.message {
            config.message = message.clone();
        }
        config.validate()?;
        Ok(config)
    }
}
