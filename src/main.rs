#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use gmx_speedtest::core::SweepConfig;
use gmx_speedtest::sweep_cmd::{self, SweepRequest};

#[derive(Parser, Debug)]
#[command(name = "gmx-speedtest")]
#[command(about = "Run gmx mdrun at 1..N-1 threads and report ns/day for each", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set GMX_SPEEDTEST_LOG)
    #[arg(long)]
    verbose: bool,

    /// gmx binary to benchmark
    #[arg(long, default_value = "gmx")]
    gmx: PathBuf,

    /// Run input file (must end with .tpr)
    tpr_file: PathBuf,

    /// PLUMED input file ("false" or empty to disable), then args passed to mdrun verbatim.
    ///
    /// Everything from the first of these on belongs to mdrun, including `--verbose`/`-h`.
    #[arg(value_name = "PLUMED_FILE [EXTRA_ARGS]...", trailing_var_arg = true, allow_hyphen_values = true)]
    rest: Vec<String>,
}

impl Cli {
    fn into_request(self) -> SweepRequest {
        let mut rest = self.rest.into_iter();
        SweepRequest {
            tpr_file: self.tpr_file,
            plumed_file: rest.next(),
            extra_args: rest.collect(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("GMX_SPEEDTEST_LOG").unwrap_or_else(|_| {
        if verbose { "gmx_speedtest=debug".to_string() } else { "gmx_speedtest=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::ACTIVE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let gmx = cli.gmx.clone();
    let request = cli.into_request();
    let result = SweepConfig::from_env()
        .map(|cfg| cfg.with_engine(gmx))
        .and_then(|cfg| sweep_cmd::run(cfg, request));

    if let Err(e) = result {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
