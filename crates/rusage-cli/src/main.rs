//! rusage CLI - run one command and report its resource usage to stderr.

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use rusage::{write_json, write_report, CommandSpec, DirectLauncher, Driver, ShellLauncher};

#[derive(Parser)]
#[command(name = "rusage")]
#[command(author, version, about = "Measure wall time and resource usage of a command")]
struct Cli {
    /// Run the command through `/bin/sh -c` instead of spawning it directly
    #[arg(short = 'c', long = "shell")]
    shell: bool,

    /// Discard the command's stdout and stderr
    #[arg(short, long)]
    quiet: bool,

    /// Prefix every report line with this string
    #[arg(long, default_value = "")]
    prefix: String,

    /// Write the report as JSON to this file instead of text to stderr
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Command to run, with its arguments
    #[arg(required = true, trailing_var_arg = true, value_name = "COMMAND")]
    command: Vec<OsString>,
}

impl Cli {
    fn spec(&self) -> CommandSpec {
        if self.shell {
            // Shell mode takes one command line; extra positionals are
            // joined so `rusage -c echo hi` does what it looks like.
            let line = self
                .command
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(" ");
            CommandSpec::shell(line)
        } else {
            CommandSpec::direct(
                PathBuf::from(&self.command[0]),
                self.command[1..].to_vec(),
            )
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let launcher: Box<dyn rusage::Launcher> = if cli.shell {
        Box::new(ShellLauncher::new().quiet(cli.quiet))
    } else {
        Box::new(DirectLauncher::new().quiet(cli.quiet))
    };

    let (measurement, disposition) = match Driver::new(launcher).measure(&cli.spec()) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("rusage: {err}");
            if let Some(disposition) = err.disposition() {
                eprintln!("Command {disposition}");
            }
            return ExitCode::from(err.exit_code());
        }
    };

    if let Err(err) = emit(&cli, &measurement) {
        eprintln!("rusage: writing report: {err}");
        return ExitCode::from(1);
    }

    if !disposition.success() {
        eprintln!("Command {disposition}");
    }

    // The measured program's own exit code is in the report, not forwarded.
    ExitCode::SUCCESS
}

fn emit(cli: &Cli, measurement: &rusage::Measurement) -> io::Result<()> {
    match &cli.json {
        Some(path) => {
            let mut file = File::create(path)?;
            write_json(&mut file, measurement)
        }
        None => {
            let stderr = io::stderr();
            let mut w = stderr.lock();
            if !cli.quiet {
                // Blank separator between the command's output and the report.
                writeln!(w)?;
            }
            write_report(&mut w, &cli.prefix, measurement)
        }
    }
}
