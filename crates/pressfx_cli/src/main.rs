//! PressFX CLI
//!
//! Validate press effect configs and replay gesture scripts headlessly.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pressfx_animation::{ControlPoints, CubicBezier, ACCURACY};
use pressfx_interaction::{PressConfig, PressPolicy};

mod script;
mod sim;

use sim::{Simulation, TraceEntry};

#[derive(Parser)]
#[command(name = "pressfx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Press feedback effect tooling", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a press config file
    Check {
        /// Path to a TOML config
        config: PathBuf,
    },

    /// Replay a gesture script against a demo card layout
    Simulate {
        /// Gesture script, e.g. "down, wait:120, up"
        #[arg(default_value = "down, wait:250, up")]
        script: String,

        /// Press config to use instead of the defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the configured policy
        #[arg(short, long)]
        policy: Option<PolicyArg>,

        /// Frame length in milliseconds
        #[arg(short, long, default_value = "16")]
        frame_ms: f32,

        /// Only print gesture steps and the final summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show defaults and curve presets
    Info,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Immediate,
    Deferred,
}

impl From<PolicyArg> for PressPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Immediate => PressPolicy::Immediate,
            PolicyArg::Deferred => PressPolicy::Deferred,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Check { config } => cmd_check(&config),

        Commands::Simulate {
            script,
            config,
            policy,
            frame_ms,
            quiet,
        } => cmd_simulate(&script, config.as_deref(), policy, frame_ms, quiet),

        Commands::Info => cmd_info(),
    }
}

fn load_config(path: &Path) -> Result<PressConfig> {
    PressConfig::load_from_path(path)
        .with_context(|| format!("Failed to load press config {}", path.display()))
}

fn cmd_check(path: &Path) -> Result<()> {
    let config = load_config(path)?;
    info!("{} is valid", path.display());

    println!("scale_ratio      {}", config.scale_ratio);
    println!(
        "press-in         {}ms {:?}",
        config.down_duration_ms,
        <[f32; 4]>::from(config.down_curve)
    );
    println!(
        "release-out      {}ms {:?}",
        config.up_duration_ms,
        <[f32; 4]>::from(config.up_curve)
    );
    println!("policy           {:?}", config.policy);
    println!("haptics          {}", config.haptics);
    if config.need_foreground {
        println!("overlay          {:?}", config.resolve_overlay());
    } else {
        println!("overlay          disabled");
    }

    Ok(())
}

fn cmd_simulate(
    script: &str,
    config_path: Option<&Path>,
    policy: Option<PolicyArg>,
    frame_ms: f32,
    quiet: bool,
) -> Result<()> {
    if !(frame_ms > 0.0 && frame_ms.is_finite()) {
        anyhow::bail!("Frame length must be a positive number, got {}", frame_ms);
    }

    let steps = script::parse(script).context("Invalid gesture script")?;
    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => PressConfig::default(),
    };
    if let Some(policy) = policy {
        config = config.with_policy(policy.into());
    }

    info!(
        "Replaying {} steps with {:?} policy at {}ms per frame",
        steps.len(),
        config.policy,
        frame_ms
    );

    let outcome = Simulation::new(config, frame_ms).run(&steps);
    for entry in &outcome.trace {
        match entry {
            TraceEntry::Step {
                time_ms,
                step,
                state,
            } => println!("{:>7.1}ms  {:<12} -> {:?}", time_ms, step.to_string(), state),
            TraceEntry::Frame {
                time_ms,
                state,
                alpha,
                members,
            } => {
                if quiet {
                    continue;
                }
                let members: Vec<String> = members
                    .iter()
                    .map(|m| {
                        format!(
                            "{} s={:.3} t=({:+.2},{:+.2})",
                            m.name, m.scale.x, m.translation.x, m.translation.y
                        )
                    })
                    .collect();
                println!(
                    "{:>7.1}ms  {:<24} a={:>3}  {}",
                    time_ms,
                    format!("{state:?}"),
                    alpha,
                    members.join("  ")
                );
            }
        }
    }

    println!();
    println!("final state   {:?}", outcome.final_state);
    println!("final alpha   {}", outcome.final_alpha);
    println!("haptic pulses {}", outcome.haptic_pulses);

    Ok(())
}

fn cmd_info() -> Result<()> {
    let defaults = PressConfig::default();

    println!("PressFX");
    println!("=======");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Defaults:");
    println!("  - scale_ratio: {}", defaults.scale_ratio);
    println!(
        "  - durations: {}ms / {}ms",
        defaults.down_duration_ms, defaults.up_duration_ms
    );
    println!("  - policy: {:?}", defaults.policy);
    println!("  - solver resolution: 1/{}", ACCURACY);
    println!();
    println!("Curve presets (eased value at 25% / 50% / 75%):");
    for name in ["standard", "linear", "ease", "ease-in", "ease-out", "ease-in-out"] {
        let Some(points) = ControlPoints::named(name) else {
            continue;
        };
        let curve = CubicBezier::new(points);
        println!(
            "  - {:<12} {:?}  {:.3} / {:.3} / {:.3}",
            name,
            <[f32; 4]>::from(points),
            curve.ease(0.25),
            curve.ease(0.5),
            curve.ease(0.75)
        );
    }

    Ok(())
}
