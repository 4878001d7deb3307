use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "cantoral-import-rust",
    version,
    about = "Import chord sheets into songbook records"
)]
struct Cli {
    /// Song sheet files to import (.txt, .docx, .pdf)
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Scan a directory for supported song sheets
    #[arg(short = 'd', long = "dir")]
    dir: Option<String>,

    /// Destination JSONL file for imported songs
    #[arg(short = 'o', long = "output", default_value = "songs.jsonl")]
    output: String,

    /// Parse and report without saving anything
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Print the batch report as JSON
    #[arg(long = "json")]
    json: bool,

    /// Suppress progress output
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Read extra settings from a local TOML file
    #[arg(short = 'r', long = "read-settings")]
    read_settings: Option<String>,

    /// Font family used to undo proportional spacing (e.g. Arial)
    #[arg(long = "font-family")]
    font_family: Option<String>,

    /// Point size for --font-family
    #[arg(long = "font-size")]
    font_size: Option<u32>,

    /// Enable verbose logging
    #[arg(long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cantoral_import_rust::logging::init(cli.verbose)?;

    let progress: Option<cantoral_import_rust::ProgressCallback> = if cli.quiet {
        None
    } else {
        Some(Box::new(|message, percent| match percent {
            Some(percent) => eprintln!("[{:>3}%] {}", percent, message),
            None => eprintln!("       {}", message),
        }))
    };

    let output = cantoral_import_rust::run(
        cantoral_import_rust::Config {
            files: cli.files,
            dir: cli.dir,
            output: cli.output,
            dry_run: cli.dry_run,
            json: cli.json,
            settings_path: cli.read_settings,
            font_family: cli.font_family,
            font_size: cli.font_size,
        },
        progress,
    )?;

    println!("{}", output);
    Ok(())
}
