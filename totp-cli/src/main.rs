#![deny(missing_docs)]
//! A command-line interface for generating and verifying time-based one-time passwords.

use clap::{Args, Parser, Subcommand};
use log::{error, info};
use std::error::Error;
use totp_core::{
    DEFAULT_DIGITS, DEFAULT_SECRET_LENGTH, DEFAULT_T0, DEFAULT_TIME_STEP, DEFAULT_WINDOW,
    OtpParameters, WINDOW_RANGE, generate, generate_secret, unix_now, verify,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "EXAMPLES:\n  \n# Create a new shared secret\ntotp-cli secret --length 20\n\n# Show the current code\ntotp-cli generate --secret JBSWY3DPEHPK3PXP\n\n# Show an 8-digit SHA-256 code at a fixed time, as JSON\ntotp-cli generate --secret JBSWY3DPEHPK3PXP --algorithm sha256 --digits 8 --timestamp 59 --json\n\n# Check a code, tolerating two steps of clock drift\nTOTP_SECRET=JBSWY3DPEHPK3PXP totp-cli verify --otp 123456 --window 2"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the code for the current time (or --timestamp)
    Generate {
        #[command(flatten)]
        params: OtpArgs,

        /// Print the code, counter, timestamp and remaining seconds as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a code against the secret and print `valid` or `invalid`
    Verify {
        #[command(flatten)]
        params: OtpArgs,

        /// The code to check
        #[arg(short, long)]
        otp: String,

        /// Number of time steps of clock drift tolerated on either side (0-10)
        #[arg(short, long, default_value_t = DEFAULT_WINDOW, allow_negative_numbers = true)]
        window: i64,
    },
    /// Generate a new random base32 secret
    Secret {
        /// Secret length in bytes
        #[arg(short, long, default_value_t = DEFAULT_SECRET_LENGTH)]
        length: usize,
    },
}

/// Parameters shared by `generate` and `verify`.
#[derive(Args)]
struct OtpArgs {
    /// Base32-encoded shared secret
    #[arg(short, long, env = "TOTP_SECRET", hide_env_values = true)]
    secret: String,

    /// Hash algorithm: sha1, sha256 or sha512
    #[arg(short, long, default_value = "sha1")]
    algorithm: String,

    /// Number of digits in a code (6-10)
    #[arg(short, long, default_value_t = i64::from(DEFAULT_DIGITS), allow_negative_numbers = true)]
    digits: i64,

    /// Length of a time step in seconds
    #[arg(long, default_value_t = DEFAULT_TIME_STEP, allow_negative_numbers = true)]
    time_step: i64,

    /// Unix time from which time steps are counted
    #[arg(long, default_value_t = DEFAULT_T0, allow_negative_numbers = true)]
    t0: i64,

    /// Unix timestamp to use instead of the current time
    #[arg(long, allow_negative_numbers = true)]
    timestamp: Option<i64>,
}

impl OtpArgs {
    fn parameters(&self) -> totp_core::Result<OtpParameters> {
        OtpParameters::new(
            &self.secret,
            &self.algorithm,
            self.digits,
            self.time_step,
            self.t0,
        )
    }

    fn now(&self) -> i64 {
        self.timestamp.unwrap_or_else(unix_now)
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli.command) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(command: &Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Generate { params, json } => {
            let parameters = params.parameters()?;
            let result = generate(&parameters, params.now())?;
            info!(
                "Generated code for counter {} at timestamp {}.",
                result.counter, result.timestamp
            );

            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.otp);
                println!("Expires in: {}s", result.time_remaining);
                println!("Counter: {}", result.counter);
            }
        }
        Commands::Verify {
            params,
            otp,
            window,
        } => {
            if !WINDOW_RANGE.contains(window) {
                return Err(format!(
                    "Window must be between {} and {}",
                    WINDOW_RANGE.start(),
                    WINDOW_RANGE.end()
                )
                .into());
            }
            let parameters = params.parameters()?;
            let valid = verify(&parameters, otp, *window, params.now())?;
            info!("Checked code against a window of ±{window} step(s).");
            println!("{}", if valid { "valid" } else { "invalid" });
        }
        Commands::Secret { length } => {
            let secret = generate_secret(*length)?;
            info!("Generated a new {length}-byte secret.");
            println!("{secret}");
        }
    }
    Ok(())
}
