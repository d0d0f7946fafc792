use chrono::NaiveTime;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{AccountNumber, ApiConfig, DEFAULT_ENDPOINT};
use crate::schedule::HourLabels;
use crate::voice::tts::{TtsConfig, DEFAULT_PROGRAM, DEFAULT_QUALITY, DEFAULT_VOICE};

/// Announce upcoming power outages and restorations for a utility account.
///
/// Meant to be run periodically (e.g. from cron every few minutes).
#[derive(Debug, Parser)]
#[command(name = "outage-alert", version)]
pub struct Cli {
    /// 8-digit account number
    pub account: AccountNumber,

    /// Outage-schedule endpoint
    #[arg(long, env = "OUTAGE_ALERT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// How API hour labels "1".."24" map to wall-clock hours: "wrapped" ("24" is
    /// midnight) or "one-based" ("1" is the 00:00-01:00 slot)
    #[arg(long, env = "OUTAGE_ALERT_HOUR_LABELS", default_value_t = HourLabels::Wrapped)]
    pub hour_labels: HourLabels,

    /// Evaluate at this local time (HH:MM) instead of now
    #[arg(long, value_parser = parse_time)]
    pub at: Option<NaiveTime>,

    /// Voice passed to `say -v`
    #[arg(long, env = "OUTAGE_ALERT_VOICE", default_value = DEFAULT_VOICE)]
    pub voice: String,

    /// Speech program
    #[arg(long, env = "OUTAGE_ALERT_TTS", default_value = DEFAULT_PROGRAM)]
    pub tts_program: PathBuf,

    /// Speech quality passed to `say --quality`
    #[arg(long, default_value_t = DEFAULT_QUALITY)]
    pub quality: u8,

    /// Log the advisory instead of speaking it
    #[arg(long)]
    pub mute: bool,
}

/// Exit status for a command line clap refused. Help and version output
/// exit 0; every other rejection, bad account numbers included, exits 1 like
/// any other failed run.
pub fn exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => 1,
    }
}

impl Cli {
    /// Parses `std::env::args`, printing clap's message and exiting with
    /// [`exit_code`] on failure.
    pub fn parse_or_exit() -> Self {
        Self::try_parse().unwrap_or_else(|e| {
            let _ = e.print();
            std::process::exit(exit_code(&e));
        })
    }
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM: {}", e))
}

/// Everything a run needs, resolved from the command line and environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub account: AccountNumber,
    pub api: ApiConfig,
    pub hour_labels: HourLabels,
    pub at: Option<NaiveTime>,
    pub tts: TtsConfig,
    pub mute: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let voice = Some(cli.voice).filter(|v| !v.trim().is_empty());
        Self {
            account: cli.account,
            api: ApiConfig {
                endpoint: cli.endpoint,
                timeout: Duration::from_secs(cli.timeout_secs),
            },
            hour_labels: cli.hour_labels,
            at: cli.at,
            tts: TtsConfig {
                program: cli.tts_program,
                voice,
                quality: cli.quality,
            },
            mute: cli.mute,
        }
    }
}
