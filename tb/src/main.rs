mod error;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use error::CliError;
use karambit_vm::host::StdHost;
use karambit_vm::{Memory, Processor};

/// Run a karambit BASIC program (`.tb`) or assembly file.
#[derive(Parser, Debug)]
#[command(name = "karambit", version, about)]
struct Cli {
    /// Source file: a `.tb` suffix is compiled through the BASIC front-end, anything else is
    /// assembled directly.
    source: PathBuf,

    /// Trace every executed instruction to stderr.
    #[arg(long)]
    debug: bool,

    /// Suppress info-level logging.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.debug { "debug" } else if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let text = fs::read_to_string(&cli.source)
        .map_err(|source| CliError::ReadInput { path: cli.source.clone(), source })?;

    let assembly = if cli.source.extension().and_then(|ext| ext.to_str()) == Some("tb") {
        karambit_basic::compile_basic(&text)
            .map_err(|source| CliError::Compile { path: cli.source.clone(), source })?
    } else {
        text
    };

    let (origin, blob, entry) = karambit_asm::assemble(&assembly)
        .map_err(|source| CliError::Assemble { path: cli.source.clone(), source })?;

    let mut memory = Memory::new();
    memory.load(origin, &blob);

    let mut processor = Processor::new(entry);
    if cli.debug {
        processor = processor.with_trace_sink(|trace| {
            eprintln!(
                "step {:>6} pc=0x{:04X} {:<4} bytes={:?} regs={:?} flag={}",
                trace.step, trace.pc, trace.mnemonic, trace.instruction_bytes, trace.registers, trace.flag
            );
        });
    }

    let mut host = StdHost::new();
    let result = processor.run(&mut memory, &mut host);

    if cli.debug {
        eprintln!(
            "halted: pc=0x{:04X} regs={:?} flag={}",
            processor.pc(),
            processor.registers(),
            processor.flag()
        );
    }

    result.map(|_| ()).map_err(|source| CliError::Execution { source })
}
