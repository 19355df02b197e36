use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use resolve_unc::{DriveMapper, MountTable, platform::SystemMounts};
use tracing_subscriber::EnvFilter;

mod launch;

/// Resolve UNC network paths to local drive letters, mapping shares on
/// demand.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Append diagnostics to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Verbose diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Resolve a path and start a terminal with it as the working directory
    Launch {
        /// Terminal executable; defaults to wezterm-gui from PATH
        #[arg(long)]
        terminal: Option<PathBuf>,
        path: String,
    },
    /// Resolve a path and report the mapping without launching anything
    Map { path: String },
}

fn init_tracing(cli: &Cli) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let fallback = if cli.verbose {
        "resolve_unc=debug"
    } else {
        "resolve_unc=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    match &cli.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let name = path.file_name().unwrap_or(OsStr::new("resolve_unc.log"));
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

fn run_map<T: MountTable>(mapper: &DriveMapper<T>, path: &str) -> Result<()> {
    let resolved = mapper.resolve(path)?;
    println!("{}", resolved.local_path);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing(&cli);

    let mapper = DriveMapper::new(SystemMounts);
    match &cli.command {
        Cmd::Launch { terminal, path } => launch::run(&mapper, terminal.as_deref(), path),
        Cmd::Map { path } => run_map(&mapper, path),
    }
}
