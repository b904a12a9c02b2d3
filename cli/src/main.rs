//! wsgen CLI - written-submission generation tool
//!
//! Inputs are pre-extracted page-text files: one file per document, with
//! pages separated by form-feed characters. Prior-art entries are
//! supplied as a JSON array of `{label, abstract_text, summary, diagram}`
//! objects.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use wsgen::doc::Document;
use wsgen::{
    output_filename, AmendedClaims, FieldAssembler, GenerateRequest, Generator, PriorArtEntry,
    TranslateOptions,
};

#[derive(Parser)]
#[command(name = "wsgen")]
#[command(version)]
#[command(about = "Generate written-submission documents from hearing-notice extracts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the written submission
    Generate {
        /// Hearing-notice page text (pages separated by form feed)
        #[arg(long, value_name = "FILE")]
        notice: PathBuf,

        /// Specification page text
        #[arg(long, value_name = "FILE")]
        specification: PathBuf,

        /// Prior-art entries JSON array
        #[arg(long, value_name = "FILE")]
        prior_arts: PathBuf,

        /// Amended-claims text (optional)
        #[arg(long, value_name = "FILE")]
        amended_claims: Option<PathBuf>,

        /// Drawings page text, used to recover the agent name (optional)
        #[arg(long, value_name = "FILE")]
        drawings: Option<PathBuf>,

        /// Template document JSON (built-in master template if omitted)
        #[arg(long, value_name = "FILE")]
        template: Option<PathBuf>,

        /// Technical-solution diagram images (repeatable)
        #[arg(long = "solution-image", value_name = "FILE")]
        solution_images: Vec<PathBuf>,

        /// Patent-office city
        #[arg(long, default_value = "Chennai")]
        city: String,

        /// Filed-on date override
        #[arg(long)]
        filed_on: Option<String>,

        /// Agent-name override
        #[arg(long)]
        agent: Option<String>,

        /// Pin the generation date (dd-mm-yyyy) for reproducible output
        #[arg(long, value_name = "DATE")]
        date: Option<String>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Extract the field map without assembling a document
    Fields {
        /// Hearing-notice page text
        #[arg(long, value_name = "FILE")]
        notice: PathBuf,

        /// Specification page text
        #[arg(long, value_name = "FILE")]
        specification: PathBuf,

        /// Prior-art entries JSON array
        #[arg(long, value_name = "FILE")]
        prior_arts: PathBuf,
    },

    /// Extract an abstract from prior-art page text
    Abstract {
        /// Prior-art page text
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Disable the translation pass
        #[arg(long)]
        no_translate: bool,
    },

    /// Print the built-in master template as JSON
    Template {
        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Generate {
            notice,
            specification,
            prior_arts,
            amended_claims,
            drawings,
            template,
            solution_images,
            city,
            filed_on,
            agent,
            date,
            output,
        } => {
            let mut request = GenerateRequest::new(
                read_pages(&notice)?,
                read_pages(&specification)?,
                read_prior_arts(&prior_arts)?,
            )
            .with_city(city);
            if let Some(path) = amended_claims {
                request =
                    request.with_amended_claims(AmendedClaims::Text(fs::read_to_string(path)?));
            }
            if let Some(path) = drawings {
                request.drawings_pages = read_pages(&path)?;
            }
            request.solution_images = solution_images;
            request.filed_on = filed_on;
            request.agent_name = agent;
            if let Some(date) = date {
                request.generated_on =
                    Some(chrono::NaiveDate::parse_from_str(&date, "%d-%m-%Y")?);
            }

            let template_doc = match template {
                Some(path) => Document::from_json(&fs::read_to_string(path)?)?,
                None => wsgen::template::master_template(),
            };

            let submission = Generator::new().generate(&request, template_doc)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from("."));
            fs::create_dir_all(&out_dir)?;
            let out_path = out_dir.join(&submission.filename);
            fs::write(&out_path, &submission.bytes)?;

            println!("{} {}", "written".green().bold(), out_path.display());
            Ok(())
        }

        Commands::Fields {
            notice,
            specification,
            prior_arts,
        } => {
            let request = GenerateRequest::new(
                read_pages(&notice)?,
                read_pages(&specification)?,
                read_prior_arts(&prior_arts)?,
            );
            let (fields, _) = FieldAssembler::new().assemble(&request)?;
            println!("{}", serde_json::to_string_pretty(&fields)?);
            eprintln!(
                "{} {}",
                "output filename:".dimmed(),
                output_filename(fields.get_or_empty("APP_NO"))
            );
            Ok(())
        }

        Commands::Abstract { input, no_translate } => {
            let pages = read_pages(&input)?;
            let mut generator = Generator::new();
            if no_translate {
                generator = generator.with_translate_options(TranslateOptions::disabled());
            }
            let abstract_text = generator.extract_prior_art_abstract(&pages);
            if abstract_text.is_empty() {
                eprintln!("{}", "no abstract found".yellow());
            } else {
                println!("{abstract_text}");
            }
            Ok(())
        }

        Commands::Template { output } => {
            let bytes = wsgen::template::master_template().to_json_bytes()?;
            match output {
                Some(path) => fs::write(path, bytes)?,
                None => print!("{}", String::from_utf8_lossy(&bytes)),
            }
            Ok(())
        }
    }
}

/// Read a page-text file: pages are separated by form-feed characters.
fn read_pages(path: &Path) -> std::io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text.split('\u{000C}').map(|page| page.to_string()).collect())
}

/// Read a prior-art entries JSON array.
fn read_prior_arts(path: &Path) -> Result<Vec<PriorArtEntry>, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
