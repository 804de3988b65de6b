/*!
Main binary for jsonast.
*/

use anyhow::{Context, Result, bail};
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::generate;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::{debug, info};
use std::io::stdout;
use std::io::{self};
use std::{
    fs::{self},
    io::{IsTerminal, Read},
    path::PathBuf,
};

use jsonast::parser::DEFAULT_MAX_DEPTH;
use jsonast::utils::{write_colored_document, write_tokens};
use jsonast::{ParserOptions, TokenKind, parse_with, tokenize};

/// Parse a JSON document into a syntax tree and report the first error with
/// its position.
#[derive(Parser)]
#[command(name = "jast", version, about, long_about = None, disable_help_subcommand = true)]
struct Args {
    /// Optional subcommands
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(value_name = "FILE")]
    /// Optional path to JSON file. If omitted, reads from STDIN
    input: Option<PathBuf>,
    /// What to print for the input
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Do not pretty-print the output, instead use compact
    #[arg(long, action = ArgAction::SetTrue)]
    compact: bool,
    /// Display nesting depth of the input document
    #[arg(long, action = ArgAction::SetTrue)]
    depth: bool,
    /// Maximum number of nested arrays accepted
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Disable colored output
    #[arg(long, action = ArgAction::SetTrue)]
    no_color: bool,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

/// Output formats for a parsed input.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// The parsed document rendered back as JSON
    Json,
    /// The syntax tree, tokens included, as JSON
    Ast,
    /// The token stream, one token per line
    Tokens,
}

/// Available subcommands for `jast`
#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    /// Generate shell completions
    Generate(GenerateCommand),
}

/// Generate shell completions
#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
}

/// Entry point for main binary.
///
/// Reads the input from a file or, when piped in, from STDIN, parses it and
/// prints the requested representation to STDOUT. Any parse error is
/// reported with its position and a non-zero exit code.
fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    if args.no_color || !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match &args.command {
        Some(Commands::Generate(GenerateCommand::Shell { shell })) => {
            let mut cmd = Args::command();
            generate(*shell, &mut cmd, "jast", &mut stdout().lock());
        }
        None => {
            let (source_name, input_content) = if let Some(path) = &args.input
            {
                let content = fs::read_to_string(path).with_context(|| {
                    format!("Failed to read file {}", path.display())
                })?;
                (path.display().to_string(), content)
            } else {
                if io::stdin().is_terminal() {
                    // No piped input and no file specified
                    let mut cmd = Args::command();
                    return Ok(cmd.print_help()?);
                }
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                ("<stdin>".to_string(), buffer)
            };
            info!("read {} bytes from {source_name}", input_content.len());

            match args.format {
                Format::Tokens => print_tokens(&source_name, &input_content)?,
                Format::Json | Format::Ast => {
                    print_document(&args, &source_name, &input_content)?;
                }
            }
        }
    }

    Ok(())
}

/// Print the token stream of the input, failing if it holds an illegal token.
fn print_tokens(source_name: &str, input: &str) -> Result<()> {
    let tokens = tokenize(input);
    write_tokens(&mut stdout().lock(), &tokens)?;
    if let Some(token) = tokens.last().filter(|t| t.is(TokenKind::Illegal)) {
        bail!(
            "Illegal token {} in {source_name} at {}",
            token.literal,
            token.position
        );
    }
    Ok(())
}

/// Parse the input and print the document in the requested format.
fn print_document(args: &Args, source_name: &str, input: &str) -> Result<()> {
    let options = ParserOptions {
        max_depth: args.max_depth,
    };
    let document = parse_with(input, options).map_err(|err| {
        let position = err.position();
        anyhow::Error::new(err)
            .context(format!("Failed to parse {source_name} at {position}"))
    })?;
    debug!("document depth is {}", document.depth());

    if args.depth {
        println!("Depth: {}", document.depth());
    }

    if args.format == Format::Ast {
        let output = if args.compact {
            serde_json::to_string(&document)?
        } else {
            serde_json::to_string_pretty(&document)?
        };
        println!("{output}");
    } else {
        write_colored_document(&mut stdout().lock(), &document, !args.compact)?;
    }

    Ok(())
}
