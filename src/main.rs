mod repl;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use monkey_interpreter::{lexer::Lexer, new_interpreter, parse, token::Token};
use tracing_subscriber::{fmt::Layer, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// tracing filter, e.g. `debug` or `monkey_interpreter::parser=trace`
    #[arg(long, global = true, env = "MONKEY_LOG", default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// run a file
    Run {
        #[arg(name = "FILE")]
        file: PathBuf,
    },
    /// print the tokens of a file
    Tokens {
        #[arg(name = "FILE")]
        file: PathBuf,
    },
    /// print the parsed program of a file
    Ast {
        #[arg(name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log)
        .with_context(|| format!("invalid log filter {:?}", cli.log))?;
    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(Layer::new().with_writer(std::io::stderr).with_filter(filter)),
    )?;

    match cli.command {
        Some(Commands::Run { file }) => {
            let source = read_source(&file)?;
            let mut engine = new_interpreter();
            let result = engine.run(&source)?;
            println!("{}", result);
        }
        Some(Commands::Tokens { file }) => {
            let source = read_source(&file)?;
            let mut lexer = Lexer::new(&source);
            loop {
                let token = lexer.next_token();
                println!("{:<8} {}", token.kind().to_string(), token.literal());
                if token == Token::Eof {
                    break;
                }
            }
        }
        Some(Commands::Ast { file }) => {
            let source = read_source(&file)?;
            let (program, errors) = parse(&source);
            if !errors.is_empty() {
                bail!("parser errors:\n\t{}", errors.join("\n\t"));
            }
            for statement in &program.statements {
                println!("{}", statement);
            }
        }
        None => repl::start()?,
    }

    Ok(())
}

fn read_source(file: &Path) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("could not read {}", file.display()))
}
