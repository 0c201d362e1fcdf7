use std::fs;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use rulemark_engine::{DisplayMode, Parser};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "rulemark", version, about = "Convert markdown to HTML with regex transforms")]
struct Cli {
    /// Markdown input file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Write HTML here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List registered transforms in pipeline order
    #[arg(long)]
    list: bool,

    /// Emit --list output as JSON
    #[arg(long, requires = "list")]
    json: bool,

    /// Show documentation for one transform
    #[arg(long, value_name = "NAME", conflicts_with = "list")]
    describe: Option<String>,

    /// Plain help output, no terminal colors
    #[arg(long)]
    plain: bool,
}

/// Colored help only when requested conditions allow: never under `--plain`,
/// and never when stdout is not a terminal (piped or redirected output must
/// stay free of ANSI escapes).
fn display_mode(plain: bool, stdout_is_terminal: bool) -> DisplayMode {
    if plain || !stdout_is_terminal {
        DisplayMode::Plain
    } else {
        DisplayMode::Decorated
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mode = display_mode(cli.plain, std::io::stdout().is_terminal());
    let parser = Parser::new().with_display_mode(mode);

    if cli.list {
        if cli.json {
            let transforms: Vec<_> = parser.transforms().collect();
            println!("{}", serde_json::to_string_pretty(&transforms)?);
        } else {
            print!("{}", parser.help(None));
        }
        return Ok(());
    }

    if let Some(name) = cli.describe.as_deref() {
        print!("{}", parser.help(Some(name)));
        return Ok(());
    }

    let markdown = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    let html = parser.parse(&markdown)?;

    match &cli.output {
        Some(path) => fs::write(path, &html)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            print!("{html}");
            if !html.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piped_output_never_gets_ansi_escapes() {
        assert_eq!(display_mode(false, false), DisplayMode::Plain);
        assert_eq!(display_mode(true, false), DisplayMode::Plain);
    }

    #[test]
    fn plain_flag_wins_even_on_a_terminal() {
        assert_eq!(display_mode(true, true), DisplayMode::Plain);
    }

    #[test]
    fn terminal_without_plain_flag_is_decorated() {
        assert_eq!(display_mode(false, true), DisplayMode::Decorated);
    }
}
