//! Command-line front door for the Natural-a-JSON translator.
//!
//! Reads one script file, runs the full pipeline, and prints the JSON
//! document on success or the error summary on failure. Debug views
//! (tokens, IR, symbols, generated Python) are opt-in flags.

use clap::Parser;
use natjson_compiler::pipeline;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "natjson",
    version,
    about = "Traduce comandos en lenguaje natural a JSON"
)]
struct Cli {
    /// Script de entrada (.txt)
    input: PathBuf,

    /// Escribe el JSON resultante en un archivo en vez de stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Muestra la lista de tokens reconocidos
    #[arg(long)]
    tokens: bool,

    /// Muestra la representación intermedia optimizada
    #[arg(long)]
    ir: bool,

    /// Muestra la tabla de símbolos
    #[arg(long)]
    symbols: bool,

    /// Muestra el código Python generado
    #[arg(long)]
    emit_python: bool,

    /// Muestra las estadísticas del análisis
    #[arg(long)]
    stats: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match pipeline::process_file(&cli.input) {
        Ok(result) => result,
        Err(error) => {
            log::error!("pipeline failed: {}", error);
            eprintln!("Error: {}", error);
            return ExitCode::FAILURE;
        }
    };

    if cli.tokens {
        println!("{}", result.token_listing);
    }

    if cli.symbols {
        match serde_json::to_string_pretty(&result.symbols) {
            Ok(view) => println!("{}", view),
            Err(error) => eprintln!("Error: {}", error),
        }
    }

    if cli.ir {
        match serde_json::to_string_pretty(&result.ir_records()) {
            Ok(records) => println!("{}", records),
            Err(error) => eprintln!("Error: {}", error),
        }
    }

    if cli.emit_python {
        if let Some(python) = &result.python_output {
            println!("{}", python);
        }
    }

    if cli.stats {
        match serde_json::to_string_pretty(&result.stats) {
            Ok(stats) => println!("{}", stats),
            Err(error) => eprintln!("Error: {}", error),
        }
    }

    if !result.is_clean() {
        eprintln!("{}", result.error_summary);
        return ExitCode::FAILURE;
    }

    match result.json_output {
        Some(json) => match cli.output {
            Some(path) => {
                if let Err(error) = std::fs::write(&path, json) {
                    eprintln!("Error: no se pudo escribir '{}': {}", path.display(), error);
                    return ExitCode::FAILURE;
                }
                ExitCode::SUCCESS
            }
            None => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
        },
        None => ExitCode::FAILURE,
    }
}
