mod config;
mod test_runner;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use order::InterviewOrderAst;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "orderc", version, about = "Interview order compiler and decompiler")]
struct Cli {
    /// Disable colored diagnostics
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to ./order.toml when present)
    #[arg(long, global = true, env = "ORDER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a JSON order tree into block text
    Compile {
        /// JSON file holding the tree (`-` for stdin)
        file: String,
    },

    /// Decompile an order block into a JSON tree
    Extract {
        #[command(flatten)]
        block: BlockArgs,

        /// Extract even when the block does not look like an order block
        #[arg(long)]
        force: bool,
    },

    /// Report whether a block looks like the order block
    Detect {
        #[command(flatten)]
        block: BlockArgs,
    },

    /// Extract an order block and compile it back to canonical text
    Normalize {
        #[command(flatten)]
        block: BlockArgs,
    },

    /// Summarize every block of an interview document
    Analyze {
        /// Interview document (`-` for stdin)
        file: String,
    },

    /// Check document-wide rules
    Validate {
        /// Interview document (`-` for stdin)
        file: String,
    },

    /// Run .order.test fixture files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct BlockArgs {
    /// Raw text of a single block (`-` for stdin)
    file: String,

    /// Block identifier assigned by the document
    #[arg(long, default_value = "")]
    id: String,

    /// Display label of the block
    #[arg(long)]
    label: Option<String>,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .order.test file or a directory containing them
    path: String,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

/// Output settings resolved from flags and config.
struct Output {
    color: ColorChoice,
    pretty_json: bool,
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err:#}");
            process::exit(2);
        }
    };
    init_logging(cli.verbose, &config.log.level);

    let output = Output {
        color: if cli.no_color || !config.output.color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        },
        pretty_json: config.output.pretty_json,
    };

    match run(cli.command, &output) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            process::exit(2);
        }
    }
}

fn run(command: Command, output: &Output) -> Result<i32> {
    match command {
        Command::Compile { file } => {
            let json = read_input(&file)?;
            let ast: InterviewOrderAst = serde_json::from_str(&json)
                .with_context(|| format!("'{file}' is not a valid order tree"))?;
            println!("{}", order::compile(&ast));
            Ok(0)
        }
        Command::Extract { block, force } => {
            let text = read_input(&block.file)?;
            let ast = if force {
                order::extract(&text)
            } else {
                order::extract_order(&text, &block.id, block.label.as_deref())
            };
            match ast {
                Some(ast) => {
                    print_json(&ast, output)?;
                    Ok(0)
                }
                None => {
                    eprintln!("'{}' is not an extractable order block", block.file);
                    Ok(1)
                }
            }
        }
        Command::Detect { block } => {
            let text = read_input(&block.file)?;
            let found = order::looks_like_order(&text, &block.id, block.label.as_deref());
            println!("{found}");
            Ok(if found { 0 } else { 1 })
        }
        Command::Normalize { block } => {
            let text = read_input(&block.file)?;
            match order::extract_order(&text, &block.id, block.label.as_deref()) {
                Some(ast) => {
                    println!("{ast}");
                    Ok(0)
                }
                None => {
                    eprintln!("'{}' is not an extractable order block", block.file);
                    Ok(1)
                }
            }
        }
        Command::Analyze { file } => {
            let document = read_input(&file)?;
            match interview::analyze_blocks(&document) {
                Ok(blocks) => {
                    print_json(&blocks, output)?;
                    Ok(0)
                }
                Err(err) => {
                    let mut files = SimpleFiles::new();
                    let file_id = files.add(file.clone(), document);
                    emit_diagnostics(&files, [err.to_diagnostic(file_id)], output);
                    Ok(2)
                }
            }
        }
        Command::Validate { file } => {
            let document = read_input(&file)?;
            Ok(do_validate(&file, document, output))
        }
        Command::Test(args) => {
            let path = Path::new(&args.path);
            if args.list_categories {
                test_runner::list_categories(path);
                return Ok(0);
            }
            let no_color = matches!(output.color, ColorChoice::Never);
            Ok(test_runner::run_tests(path, no_color, &args.category))
        }
    }
}

fn do_validate(name: &str, document: String, output: &Output) -> i32 {
    let issues = interview::validate_document(&document);
    if issues.is_empty() {
        eprintln!("ok: {name} is valid");
        return 0;
    }

    let mut files = SimpleFiles::new();
    let file_id = files.add(name.to_string(), document);
    emit_diagnostics(
        &files,
        issues.iter().map(|issue| issue.to_diagnostic(file_id)),
        output,
    );

    if issues.iter().any(|issue| issue.is_error()) { 1 } else { 0 }
}

fn emit_diagnostics(
    files: &SimpleFiles<String, String>,
    diagnostics: impl IntoIterator<Item = Diagnostic<usize>>,
    output: &Output,
) {
    let writer = StandardStream::stderr(output.color);
    let config = term::Config::default();
    for diagnostic in diagnostics {
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, files, &diagnostic);
    }
}

fn init_logging(verbose: u8, configured: &str) {
    let level = match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Read a file, or stdin when the path is `-`.
fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("cannot read stdin")?;
        return Ok(text);
    }
    debug!(path, "reading input");
    std::fs::read_to_string(path).with_context(|| format!("cannot read '{path}'"))
}

fn print_json<T: Serialize>(value: &T, output: &Output) -> Result<()> {
    let json = if output.pretty_json {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
