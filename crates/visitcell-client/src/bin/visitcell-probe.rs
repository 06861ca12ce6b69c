//! visitcell-probe: fetch the edge session and print it.
//!
//! Exits non-zero with `Fault Detected: <message>` on the first failure.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use visitcell_client::{Probe, SessionClient};

#[derive(Debug, Parser)]
#[clap(name = "visitcell-probe", about = "Fetch the visitcell session and print the visit count")]
struct Args {
    /// Edge base URL.
    #[clap(long, default_value = "http://127.0.0.1:8080")]
    url: String,

    /// Number of visits to make.
    #[clap(long, default_value_t = 1)]
    count: u32,
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut probe = Probe::new(SessionClient::new(args.url));
    for _ in 0..args.count {
        match probe.connect().await {
            Ok(data) => println!("sessionId={} visitCount={}", data.session_id, data.visit_count),
            Err(e) => {
                eprintln!("Fault Detected: {e}");
                return ExitCode::FAILURE;
            }
        }
        if let Err(e) = probe.disconnect() {
            eprintln!("Fault Detected: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
