use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use infokit_core::{format_seconds, TimeStamp, TimingStyle, MAX_DECIMALS};
use infokit_hw::{scan_ports, BuildInfo, Camera, StopRule, V4l2Backend};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "infokit", about = "Host, camera and video library information")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the host operating system name
    Os,
    /// Report whether the video library was built with GStreamer
    Gstreamer {
        /// Read the build information from a file instead of running the library tool
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Print the `key: value` entries of the build information
    BuildInfo {
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Print the dump unparsed
        #[arg(long)]
        raw: bool,
    },
    /// Probe webcam ports from 0 upward
    Webcams {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Stop on total failures instead of consecutive ones
        #[arg(long)]
        total: bool,
    },
    /// List V4L2 capture devices
    Devices {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Format a duration in seconds, truncating extra digits
    FormatTime {
        seconds: f64,
        /// Fractional digits (default from config)
        #[arg(short, long)]
        decimal: Option<usize>,
    },
    /// Time a sleep and print the start/end/cost report
    TimingDemo {
        #[arg(long, default_value_t = 2.0)]
        secs: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Os => {
            println!("{}", infokit_core::current_os());
        }
        Commands::Gstreamer { file } => {
            let info = load_build_info(&config, file)?;
            println!("{}", if info.built_with_gstreamer() { "yes" } else { "no" });
        }
        Commands::BuildInfo { file, raw } => {
            let info = load_build_info(&config, file)?;
            if raw {
                print!("{}", info.text());
            } else {
                for (key, value) in info.entries() {
                    println!("{key}: {value}");
                }
            }
        }
        Commands::Webcams { json, total } => {
            let rule = if total {
                StopRule::Total(config.max_failures)
            } else {
                StopRule::Consecutive(config.max_failures)
            };
            let mut backend = V4l2Backend::new(config.device_prefix.clone());
            let scan = scan_ports(&mut backend, rule)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&scan)?);
            } else {
                println!("available:   {:?}", scan.available);
                println!("working:     {:?}", scan.working);
                println!("non-working: {:?}", scan.non_working);
            }
        }
        Commands::Devices { json } => {
            let devices = Camera::list_devices();
            if json {
                println!("{}", serde_json::to_string_pretty(&devices)?);
            } else if devices.is_empty() {
                println!("No capture devices found");
            } else {
                for dev in devices {
                    println!("{}  {} ({}, {})", dev.path, dev.name, dev.driver, dev.bus);
                }
            }
        }
        Commands::FormatTime { seconds, decimal } => {
            let decimal = decimal.unwrap_or(config.decimals);
            if decimal > MAX_DECIMALS {
                tracing::warn!(decimal, max = MAX_DECIMALS, "precision clamped");
            }
            println!("{}", format_seconds(seconds, decimal));
        }
        Commands::TimingDemo { secs } => {
            let duration = Duration::try_from_secs_f64(secs)
                .with_context(|| format!("invalid duration: {secs}"))?;
            TimeStamp::new("my_func", TimingStyle::TimeCost)
                .decimal(config.decimals)
                .run(|| std::thread::sleep(duration));
        }
    }

    Ok(())
}

fn load_build_info(config: &Config, file: Option<PathBuf>) -> Result<BuildInfo> {
    let info = match file {
        Some(path) => BuildInfo::from_file(path)?,
        None => BuildInfo::from_command(&config.build_info_cmd, &config.build_info_args)?,
    };
    Ok(info)
}
