#![deny(unsafe_code)]
//! CLI binary for the landing-page motion components.
//!
//! Subcommands:
//! - `list`: print registered components and their parameter schemas
//! - `particles`: run the particle field for N frames, write a PNG
//! - `carousel`: replay auto-advance with hover windows, print the timeline
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use landing_motion_carousel::{featured_products, numbered_slides, CarouselConfig};
use landing_motion_core::{Component, DVec2, Viewport};
use landing_motion_particles::{ClickTarget, ParticleField};
use landing_motion_scene::timeline::{self, Cause, HoverWindow};
use landing_motion_scene::{snapshot, ComponentKind};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "landing-motion", about = "Landing page motion components, headless")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available components and their parameters.
    List,
    /// Run the particle field for N frames and write a PNG snapshot.
    Particles {
        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = 1280)]
        width: usize,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = 720)]
        height: usize,

        /// Number of animation frames to run.
        #[arg(short, long, default_value_t = 600)]
        frames: u64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Start in attracting mode, as if the background had been clicked.
        #[arg(long)]
        attract: bool,

        /// Pointer position as `X,Y`.
        #[arg(long, value_parser = parse_point)]
        pointer: Option<DVec2>,

        /// Output file path.
        #[arg(short, long, default_value = "particles.png")]
        output: PathBuf,

        /// Field parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Replay the product carousel and print when each slide shows.
    Carousel {
        /// Use N numbered slides instead of the featured products.
        #[arg(long)]
        items: Option<usize>,

        /// Total simulated time in milliseconds.
        #[arg(short, long, default_value_t = 16_000.0)]
        duration: f64,

        /// Pointer hover window as `START..END` in milliseconds. Repeatable.
        #[arg(long)]
        hover: Vec<HoverWindow>,

        /// Carousel parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

fn parse_point(s: &str) -> Result<DVec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad coordinate '{v}': {e}"))
    };
    Ok(DVec2::new(coord(x)?, coord(y)?))
}

fn parse_params(raw: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(raw).map_err(|source| CliError::Params {
        raw: raw.to_string(),
        source,
    })
}

fn cause_label(cause: Cause) -> &'static str {
    match cause {
        Cause::Mounted => "mounted",
        Cause::AutoAdvance => "advance",
        Cause::Paused => "paused",
        Cause::Resumed => "resumed",
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let unit = Viewport::new(1.0, 1.0)?;
            let components = ComponentKind::list_components()
                .iter()
                .map(|name| -> Result<_, CliError> {
                    let c = ComponentKind::from_name(name, unit, 0, &serde_json::json!({}))?;
                    Ok((*name, c.param_schema()))
                })
                .collect::<Result<Vec<_>, CliError>>()?;
            if cli.json {
                let info: serde_json::Map<String, serde_json::Value> = components
                    .into_iter()
                    .map(|(name, schema)| (name.to_string(), schema))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Components:");
                for (name, schema) in components {
                    let keys: Vec<&str> = schema
                        .as_object()
                        .map(|o| o.keys().map(String::as_str).collect())
                        .unwrap_or_default();
                    println!("  {name:<10} {}", keys.join(", "));
                }
            }
        }
        Command::Particles {
            width,
            height,
            frames,
            seed,
            attract,
            pointer,
            output,
            params,
        } => {
            let params = parse_params(&params)?;
            let viewport = Viewport::new(width as f64, height as f64)?;
            let mut field = ParticleField::from_json(viewport, seed, &params)?;
            if let Some(p) = pointer {
                field.set_pointer(p);
            }
            if attract {
                field.click(ClickTarget::Background);
            }

            let ran = timeline::run_frames(&mut field, frames);
            snapshot::write_field_png(&field, &output)?;
            tracing::info!(frames = ran, mode = ?field.mode(), "particle run finished");

            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "frames": ran,
                    "seed": seed,
                    "mode": field.mode(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered particles ({width}x{height}, {ran} frames, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
        Command::Carousel {
            items,
            duration,
            hover,
            params,
        } => {
            let params = parse_params(&params)?;
            let config = CarouselConfig::from_json(&params)?;
            let items = match items {
                Some(n) => numbered_slides(n),
                None => featured_products(),
            };
            let steps = timeline::simulate_carousel(items, config, duration, &hover)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&steps)?);
            } else {
                for step in &steps {
                    println!(
                        "{:>9.0} ms  {:<8} [{}] {}",
                        step.at_ms,
                        cause_label(step.cause),
                        step.index,
                        step.title
                    );
                }
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            eprintln!("{}", serde_json::to_string_pretty(&e.to_json()).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
