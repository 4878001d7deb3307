use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use globset::{GlobBuilder, GlobMatcher};

pub mod align;
pub mod assemble;
pub mod chord;
pub mod classify;
pub mod data;
pub mod extract;
pub mod font;
pub mod import;
pub mod logging;
pub mod settings;
pub mod store;

pub use align::{AlignedLine, ChordAnchor, ChordToken};
pub use data::{DocumentFormat, SongRecord, SourceInfo};
pub use extract::LineSource;
pub use font::{FontDescriptor, WidthModel};
pub use import::{
    BatchReport, FileOutcome, ImportError, Importer, ProgressCallback, render_report,
};
pub use store::{JsonlStore, NullStore, SongStore};

#[derive(Debug, Clone)]
pub struct Config {
    pub files: Vec<String>,
    pub dir: Option<String>,
    pub output: String,
    pub dry_run: bool,
    pub json: bool,
    pub settings_path: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<u32>,
}

pub fn run(config: Config, progress: Option<ProgressCallback>) -> Result<String> {
    let settings_path = config.settings_path.as_deref().map(Path::new);
    let mut settings = settings::load_settings(settings_path)?;
    if let Some(family) = &config.font_family {
        settings.font_family = Some(family.clone());
    }
    if let Some(size) = config.font_size {
        settings.font_size = Some(size);
    }

    let files = collect_inputs(&config, &settings)?;
    if files.is_empty() {
        return Err(anyhow!("no input files (pass file paths or --dir)"));
    }

    let report = if config.dry_run {
        import_with(NullStore, settings, progress, &files)
    } else {
        import_with(
            JsonlStore::new(config.output.as_str()),
            settings,
            progress,
            &files,
        )
    };

    render_report(&report, config.json)
}

fn import_with<S: SongStore>(
    store: S,
    settings: settings::Settings,
    progress: Option<ProgressCallback>,
    files: &[PathBuf],
) -> BatchReport {
    let mut importer = Importer::new(store, settings);
    if let Some(progress) = progress {
        importer = importer.with_progress(progress);
    }
    importer.import_files(files)
}

fn collect_inputs(config: &Config, settings: &settings::Settings) -> Result<Vec<PathBuf>> {
    let ignore = build_ignore_matchers(&settings.ignore)?;
    let mut files: Vec<PathBuf> = config.files.iter().map(PathBuf::from).collect();

    if let Some(dir) = &config.dir {
        let entries =
            fs::read_dir(dir).with_context(|| format!("failed to read directory: {}", dir))?;
        let mut scanned = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| "failed to read directory entry")?;
            let path = entry.path();
            if !path.is_file() || !has_supported_extension(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                if ignore.iter().any(|matcher| matcher.is_match(name)) {
                    continue;
                }
            }
            scanned.push(path);
        }
        scanned.sort();
        files.extend(scanned);
    }

    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(DocumentFormat::from_extension)
        .is_some()
}

fn build_ignore_matchers(patterns: &[String]) -> Result<Vec<GlobMatcher>> {
    let mut matchers = Vec::new();
    for raw in patterns {
        let pattern = raw.trim();
        if pattern.is_empty() {
            continue;
        }
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .map_err(|err| anyhow!("invalid ignore pattern '{}': {}", raw, err))?
            .compile_matcher();
        matchers.push(matcher);
    }
    Ok(matchers)
}
