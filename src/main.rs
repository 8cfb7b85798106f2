//! md2rich - Markdown to rich-text markup converter

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use md2rich::config::{load_config, load_config_from, save_config, Settings};
use md2rich::export::{export_to_markup_file, generate_output};
use md2rich::{Error, Result};

#[derive(Parser)]
#[command(name = "md2rich")]
#[command(version, about = "Convert Markdown to rich-text widget markup", long_about = None)]
#[command(after_help = "EXAMPLES:
    md2rich notes.md                    Print markup for notes.md
    md2rich notes.md -o notes.html      Write markup to a file
    echo '**hi**' | md2rich             Convert stdin
    md2rich notes.md --standalone       Wrap in a complete HTML document")]
struct Cli {
    /// Markdown file to convert ("-" or omitted reads stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Wrap the markup in a standalone HTML document
    #[arg(long)]
    standalone: bool,

    /// Title of the standalone document
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,

    /// Leave out the <style> prologue
    #[arg(long)]
    no_style: bool,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Persist the effective settings to the default config file
    #[arg(long)]
    save_config: bool,

    /// Log pipeline details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = effective_settings(cli)?;

    if cli.save_config {
        let path = save_config(&settings)?;
        info!("Saved settings to {}", path.display());
    }

    let input = stdin_or_path(cli.input.as_deref());
    let title = cli.title.as_deref();

    if let (Some(source), Some(output)) = (input, cli.output.as_deref()) {
        return export_to_markup_file(source, output, title, &settings);
    }

    let markdown = read_input(input)?;
    let title = title.or_else(|| input.and_then(|p| p.file_stem()).and_then(|s| s.to_str()));
    let markup = generate_output(&markdown, title, &settings);

    write_output(cli.output.as_deref(), &markup)
}

fn effective_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };

    if cli.standalone {
        settings.standalone = true;
    }
    if cli.no_style {
        settings.markup.emit_style_prologue = false;
    }

    debug!("Effective settings: {:?}", settings);
    Ok(settings)
}

/// `None` for stdin.
fn stdin_or_path(input: Option<&Path>) -> Option<&Path> {
    input.filter(|p| p.as_os_str() != "-")
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        }),
        None => {
            let mut markdown = String::new();
            io::stdin().read_to_string(&mut markdown)?;
            Ok(markdown)
        }
    }
}

fn write_output(output: Option<&Path>, markup: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, markup).map_err(|e| Error::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
            info!("Wrote markup to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{markup}")?;
        }
    }
    Ok(())
}
