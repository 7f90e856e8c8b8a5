use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use casetext::{CaseStore, Config, Locale};

const DEFAULT_CONFIG_FILE: &str = "casetext.toml";

#[derive(Parser)]
#[command(name = "casetext")]
#[command(about = "Render portfolio case descriptions")]
struct Cli {
    /// TOML config with spacing, page and font settings
    /// (defaults to ./casetext.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a file containing description markup
    Render {
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Output file (stdout for text formats when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render the description of a published case from a cases.json file
    Case {
        cases: PathBuf,

        slug: String,

        #[arg(short, long, default_value = "ru")]
        locale: Locale,

        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Typst,
    Html,
    Pdf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load(Path::new(DEFAULT_CONFIG_FILE)),
    };

    match cli.command {
        Command::Render {
            input,
            format,
            output,
        } => {
            let markup = fs::read_to_string(&input)
                .with_context(|| format!("Error reading {}", input.display()))?;
            let output = output.or_else(|| default_pdf_path(format, &input));
            emit(&markup, format, &config, output.as_deref())
        }
        Command::Case {
            cases,
            slug,
            locale,
            format,
            output,
        } => {
            let store = CaseStore::load(&cases)?;
            let Some(case) = store.find_published(&slug) else {
                let published: Vec<&str> = store
                    .cases()
                    .iter()
                    .filter(|c| c.published)
                    .map(|c| c.slug.as_str())
                    .collect();
                bail!(
                    "No published case with slug {slug:?} in {} (available: {})",
                    cases.display(),
                    published.join(", ")
                );
            };
            log::info!("rendering {:?} ({locale})", case.title_for(locale));
            let output = output.or_else(|| default_pdf_path(format, Path::new(&slug)));
            emit(case.description_for(locale), format, &config, output.as_deref())
        }
    }
}

/// PDF output defaults to the input name with a .pdf extension
fn default_pdf_path(format: Format, input: &Path) -> Option<PathBuf> {
    (format == Format::Pdf).then(|| input.with_extension("pdf"))
}

fn emit(markup: &str, format: Format, config: &Config, output: Option<&Path>) -> Result<()> {
    let bytes = match format {
        Format::Json => {
            let blocks = casetext::parse_blocks(markup);
            let mut json = serde_json::to_string_pretty(&blocks)?;
            json.push('\n');
            json.into_bytes()
        }
        Format::Typst => casetext::markup_to_typst(markup, config).into_bytes(),
        Format::Html => casetext::markup_to_html(markup, config).into_bytes(),
        Format::Pdf => casetext::markup_to_pdf(markup, config)?,
    };

    match output {
        Some(path) => {
            fs::write(path, bytes).with_context(|| format!("Error writing {}", path.display()))?;
            eprintln!("Created {}", path.display());
        }
        None => io::stdout().write_all(&bytes)?,
    }
    Ok(())
}
