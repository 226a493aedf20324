use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use yat::{Expr, Interpreter, InterpreterConfig, PrettyPrinter, Scope};

#[derive(ClapParser, Debug)]
#[command(version, about = "yat expression language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,

    /// Deepest allowed chain of nested function calls
    #[arg(long, global = true, default_value_t = InterpreterConfig::default().max_call_depth)]
    max_call_depth: usize,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a JSON-encoded program against stdin/stdout
    Run { filename: PathBuf },

    /// Runs a JSON-encoded program and prints its final value
    Evaluate { filename: PathBuf },

    /// Pretty-prints a JSON-encoded program as yat source
    Print { filename: PathBuf },
}

/// Reads and decodes a program file: a JSON array of expressions.
fn load_program(filename: PathBuf) -> Result<Vec<Expr>> {
    info!("Reading file: {:?}", filename);
    let file = File::open(&filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    let program: Vec<Expr> = match serde_json::from_slice(&buf) {
        Ok(program) => program,

        Err(e) => {
            debug!("Decode debug: {}", e);
            eprintln!("Malformed program {:?}: {}", filename, e);
            std::process::exit(65);
        }
    };

    info!("Decoded {} top-level expressions", program.len());

    Ok(program)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("yat::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

/// Evaluates `program` in a fresh root scope, exiting with 70 on a runtime error.
fn execute(program: &[Expr], config: InterpreterConfig) -> Option<yat::Value> {
    let mut interpreter = Interpreter::stdio(config);
    let root = Scope::root();

    match interpreter.run(program, &root) {
        Ok(value) => {
            info!("Program executed successfully");
            value
        }

        Err(e) => {
            debug!("Runtime debug: {}", e);
            eprintln!("{}", e);
            std::process::exit(70);
        }
    }
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let config = InterpreterConfig {
        max_call_depth: args.max_call_depth,
    };

    match args.commands {
        Commands::Run { filename } => {
            info!("Running Run subcommand");
            let program = load_program(filename)?;
            execute(&program, config);
        }

        Commands::Evaluate { filename } => {
            info!("Running Evaluate subcommand");
            let program = load_program(filename)?;

            if let Some(value) = execute(&program, config) {
                debug!("Evaluated to: {}", value);
                println!("{}", value);
            }
        }

        Commands::Print { filename } => {
            info!("Running Print subcommand");
            let program = load_program(filename)?;
            print!("{}", PrettyPrinter::program(&program));
        }
    }

    Ok(())
}
