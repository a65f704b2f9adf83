use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser as ClapParser, Subcommand, ValueEnum};

use cmdargs::logging::init_tracing;
use cmdargs::{
    ArgumentMetadata, CommandCatalog, CommandMetadata, ParseOutcome, Parser, ParserConfig, Usage,
};

/// Exit code of a command line the engine rejected.
const EXIT_PARSE_FAILURE: u8 = 2;

#[derive(ClapParser, Debug)]
#[command(
    name = "cmdargs",
    version,
    about = "Inspect and exercise command declarations of a toolkit",
    after_help = "Environment Variables:\n  CMDARGS_LOG=<path>   Write logs to <path>.<timestamp>.<pid>\n  RUST_LOG=<filter>    Log filter (default: info)"
)]
struct Cli {
    /// Parser configuration file (default: ~/.config/cmdargs/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Print the metadata of every command in a toolkit file
    Describe {
        /// TOML file of [[command]] tables
        toolkit: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Include hidden commands
        #[arg(long)]
        all: bool,
    },
    /// Parse arguments against one command and print the bound values as JSON
    Parse {
        /// TOML file of [[command]] tables
        toolkit: PathBuf,

        /// Command name
        command: String,

        /// Arguments for the command (use `--` before them)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ParserConfig::load_from(path)?,
        None => ParserConfig::load()?,
    };
    let parser = Parser::new(config);

    match cli.action {
        Action::Describe {
            toolkit,
            format,
            all,
        } => describe(&parser, &toolkit, format, all),
        Action::Parse {
            toolkit,
            command,
            args,
        } => parse(&parser, &toolkit, &command, args),
    }
}

fn describe(parser: &Parser, toolkit: &Path, format: Format, all: bool) -> anyhow::Result<ExitCode> {
    let catalog = CommandCatalog::load(toolkit)?;
    let metadata = catalog.metadata(parser.config(), parser.renderer(), all)?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&metadata)?),
        Format::Text => {
            for command in &metadata {
                print!("{}", render_command(command));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn parse(
    parser: &Parser,
    toolkit: &Path,
    command: &str,
    args: Vec<String>,
) -> anyhow::Result<ExitCode> {
    let catalog = CommandCatalog::load(toolkit)?;
    let descriptor = catalog
        .find(command)
        .with_context(|| format!("no command '{}' in {}", command, toolkit.display()))?;

    match parser.parse_values(descriptor, args)? {
        ParseOutcome::Success(values) => {
            println!("{}", serde_json::to_string_pretty(&values.to_json())?);
            Ok(ExitCode::SUCCESS)
        }
        ParseOutcome::Failure(failure) => {
            eprintln!("{}", failure.message());
            Ok(ExitCode::from(EXIT_PARSE_FAILURE))
        }
        ParseOutcome::HelpRequested(usage) => {
            print!("{}", render_usage(&usage));
            Ok(ExitCode::SUCCESS)
        }
        ParseOutcome::VersionRequested(version) => {
            println!("{}", version);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn render_command(command: &CommandMetadata) -> String {
    let mut out = command.name.clone();
    if let Some(group) = &command.group {
        out.push_str(&format!(" [{}]", group));
    }
    if command.hidden {
        out.push_str(" (hidden)");
    }
    out.push('\n');
    if !command.description_text.is_empty() {
        out.push_str(&format!("  {}\n", command.description_text));
    }
    for argument in &command.arguments {
        out.push_str(&format!("  {}\n", render_argument(argument)));
    }
    out.push('\n');
    out
}

fn render_usage(usage: &Usage) -> String {
    let mut out = format!("USAGE: {} [arguments]\n", usage.command);
    if !usage.description_text.is_empty() {
        out.push_str(&format!("\n{}\n", usage.description_text));
    }
    for section in &usage.sections {
        out.push_str(&format!("\n{}:\n", section.title));
        for argument in &section.arguments {
            out.push_str(&format!("  {}\n", render_argument(argument)));
        }
    }
    out
}

fn render_argument(argument: &ArgumentMetadata) -> String {
    let mut line = format!("--{}", argument.long_name);
    if let Some(short) = argument.short_name {
        line.push_str(&format!(", -{}", short));
    }
    line.push_str(&format!(" <{}>", argument.type_label));
    if argument.collection {
        let max = argument
            .max_elements
            .map(|m| m.to_string())
            .unwrap_or_else(|| "*".to_string());
        line.push_str(&format!(" [{}..{}]", argument.min_elements, max));
    }
    if !argument.default_values.is_empty() && !argument.special {
        line.push_str(&format!(" (default: {})", argument.default_values.join(", ")));
    }
    if !argument.choices.is_empty() {
        line.push_str(&format!(" {{{}}}", argument.choices.join("|")));
    }
    if !argument.mutually_exclusive.is_empty() {
        line.push_str(&format!(
            " (exclusive with: {})",
            argument.mutually_exclusive.join(", ")
        ));
    }
    if !argument.doc_text.is_empty() {
        line.push_str(&format!("  {}", argument.doc_text));
    }
    line
}
