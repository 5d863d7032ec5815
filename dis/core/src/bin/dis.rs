use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use dis_core::{
    default_ring, parse_source, Machine, QuietLoopConfig, QuietLoopReport, StatusKind, StreamInput,
    StreamOutput,
};

/// Run a Dis program against stdin/stdout.
#[derive(Parser, Debug)]
#[command(name = "dis", about = "Dis virtual machine", version)]
struct Args {
    /// Program file: command characters, whitespace, and (comments).
    program: PathBuf,

    /// Treat the program file as a raw byte image instead of source text.
    #[arg(long)]
    raw: bool,

    /// Terminate with the no-I/O status after this many quiet steps.
    #[arg(long, value_name = "STEPS")]
    quiet_limit: Option<u64>,

    /// Print a JSON run report to stderr after termination.
    #[arg(long)]
    report_json: bool,
}

#[derive(Serialize)]
struct RunReport {
    status: StatusKind,
    steps: u64,
    bytes_read: u64,
    bytes_written: u64,
    a: u128,
    c: u128,
    d: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    quiet_loop: Option<QuietLoopReport>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("dis: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let raw = fs::read(&args.program)
        .with_context(|| format!("reading {}", args.program.display()))?;
    let program = if args.raw {
        raw
    } else {
        let text = std::str::from_utf8(&raw)
            .with_context(|| format!("{} is not valid UTF-8 source", args.program.display()))?;
        parse_source(text).with_context(|| format!("loading {}", args.program.display()))?
    };

    let mut machine = Machine::new(
        default_ring(),
        StreamInput::new(io::stdin().lock()),
        StreamOutput::new(io::stdout().lock()),
    )?;
    machine.load_image_bytes(&program)?;
    if let Some(limit) = args.quiet_limit {
        machine = machine.with_watchdog(QuietLoopConfig {
            max_quiet_steps: limit,
        });
    }

    let status = machine.run();
    machine.output_mut().flush()?;

    if args.report_json {
        let report = RunReport {
            status,
            steps: machine.steps(),
            bytes_read: machine.bytes_read(),
            bytes_written: machine.bytes_written(),
            a: u128::from(machine.a()),
            c: u128::from(machine.c()),
            d: u128::from(machine.d()),
            quiet_loop: machine.watchdog_report().cloned(),
        };
        let mut stderr = io::stderr().lock();
        serde_json::to_writer(&mut stderr, &report)?;
        writeln!(stderr)?;
    }

    Ok(match status {
        StatusKind::Halted | StatusKind::EofWrite => ExitCode::SUCCESS,
        _ => ExitCode::from(1),
    })
}
