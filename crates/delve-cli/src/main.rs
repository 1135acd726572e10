use clap::Parser;
use delve::{Cli, LogLevel, run};
use tracing_subscriber::EnvFilter;

fn main() {
    // Reset SIGPIPE to default behavior to prevent panic on broken pipe
    // (e.g., when piping to `head` or `less` that exits early)
    #[cfg(unix)]
    reset_sigpipe();

    let cli = Cli::parse();
    init_tracing(cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `DELVE_LOG` takes precedence over `--log-level`. Logs go to stderr so
/// they never mix with command output.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_env("DELVE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("delve={0},delve_index={0},delve_runtime={0}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
