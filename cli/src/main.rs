use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use clap::{Args, Parser, Subcommand};
use gcode_catalog_core::{
    Catalog, CatalogPackage, MergeStrategy, merge_catalogs, validate_catalog, validate_package,
};
use gcode_catalog_parser::builder::DuplicatePolicy;
use gcode_catalog_parser::config::CatalogConfig;
use gcode_catalog_parser::dom::Document;
use gcode_catalog_parser::output::{OutputFormat, format_catalog, format_package};
use gcode_catalog_parser::registry::{self, DocumentationParser, PARSERS};
use gcode_catalog_parser::snapshot::{SnapshotStore, load_document};
use rayon::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(name = "gcode-catalog")]
#[command(about = "Offline G-code command catalog extraction from documentation pages")]
struct Cli {
    /// Log extraction details to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List registered documentation sources.
    Sources,
    /// Parse a documentation page from a file.
    ParseFile(ParseFileArgs),
    /// Parse a documentation page from stdin.
    ParseStdin(ParseStdinArgs),
    /// Copy a downloaded documentation page into the snapshot store.
    Import(ImportArgs),
    /// Build the merged catalog from the latest snapshot of every configured source.
    Build(BuildArgs),
    /// Parse several pages in parallel and write a hashed catalog package.
    Bundle(BundleArgs),
    /// Validate catalog or package JSON files.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct ParseFileArgs {
    /// Documentation source identifier (see `sources`).
    #[arg(long, default_value = "klipper")]
    source: String,
    /// Path to the HTML page.
    #[arg(long)]
    input: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Handling of command names documented more than once.
    #[arg(long, default_value = "last-wins")]
    duplicates: DuplicatePolicy,
}

#[derive(Debug, Args)]
struct ParseStdinArgs {
    /// Documentation source identifier (see `sources`).
    #[arg(long, default_value = "klipper")]
    source: String,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Handling of command names documented more than once.
    #[arg(long, default_value = "last-wins")]
    duplicates: DuplicatePolicy,
}

#[derive(Debug, Args)]
struct ImportArgs {
    /// Documentation source identifier (see `sources`).
    #[arg(long, default_value = "klipper")]
    source: String,
    /// Path to the downloaded HTML page.
    #[arg(long)]
    input: PathBuf,
    /// Snapshot store root (default: `docs`).
    #[arg(long)]
    snapshot_root: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// Path to a catalog YAML config.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Snapshot store root, overriding the config.
    #[arg(long)]
    snapshot_root: Option<PathBuf>,
    /// Write the catalog here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct BundleArgs {
    /// HTML pages to parse.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Documentation source identifier (see `sources`).
    #[arg(long, default_value = "klipper")]
    source: String,
    /// Output JSON package path.
    #[arg(long)]
    output: PathBuf,
    /// Optional package name metadata.
    #[arg(long)]
    name: Option<String>,
    /// Handling of command names documented more than once.
    #[arg(long, default_value = "last-wins")]
    duplicates: DuplicatePolicy,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Catalog or package JSON files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Sources => run_sources(),
        Command::ParseFile(args) => run_parse_file(args),
        Command::ParseStdin(args) => run_parse_stdin(args),
        Command::Import(args) => run_import(args),
        Command::Build(args) => run_build(args),
        Command::Bundle(args) => run_bundle(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_sources() -> Result<(), String> {
    for parser in PARSERS {
        println!("{}\t{}\t{}", parser.id(), parser.source(), parser.url());
    }
    Ok(())
}

fn run_parse_file(args: ParseFileArgs) -> Result<(), String> {
    let html = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    run_parse_html(&args.source, &html, args.format, args.duplicates)
}

fn run_parse_stdin(args: ParseStdinArgs) -> Result<(), String> {
    let mut html = String::new();
    std::io::stdin()
        .read_to_string(&mut html)
        .map_err(|err| format!("Failed to read stdin: {err}"))?;
    run_parse_html(&args.source, &html, args.format, args.duplicates)
}

fn run_parse_html(
    source: &str,
    html: &str,
    format: OutputFormat,
    duplicates: DuplicatePolicy,
) -> Result<(), String> {
    let parser = registry::parser_by_id(source).map_err(|e| e.to_string())?;
    let catalog = parse_page(parser, html, duplicates)?;
    print!("{}", with_trailing_newline(format_catalog(&catalog, format)?));
    Ok(())
}

fn run_import(args: ImportArgs) -> Result<(), String> {
    let parser = registry::parser_by_id(&args.source).map_err(|e| e.to_string())?;
    let root = args
        .snapshot_root
        .unwrap_or_else(|| CatalogConfig::default().snapshot_root);
    let store = SnapshotStore::new(root);

    let stored = store
        .import(parser, &args.input)
        .map_err(|err| format!("Failed to import '{}': {err}", args.input.display()))?;
    println!("Imported {} snapshot into '{}'.", parser.source(), stored.display());
    Ok(())
}

fn run_build(args: BuildArgs) -> Result<(), String> {
    let mut config = match &args.config {
        Some(path) => CatalogConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => CatalogConfig::default(),
    };
    if let Some(root) = args.snapshot_root {
        config.snapshot_root = root;
    }
    config.validate().map_err(|e| e.to_string())?;

    let store = SnapshotStore::new(&config.snapshot_root);
    let parsers = config.parsers().map_err(|e| e.to_string())?;
    let documents = parsers
        .iter()
        .map(|parser| {
            store
                .load_latest(*parser)
                .map_err(|err| format!("{}: {err}", parser.id()))
        })
        .collect::<Result<Vec<Document>, String>>()?;

    let catalog = registry::build_all(
        parsers.iter().copied().zip(documents.iter()),
        config.duplicates,
    )
    .map_err(|e| e.to_string())?;

    let raw = with_trailing_newline(format_catalog(&catalog, args.format)?);
    match &args.output {
        Some(path) => {
            write_output(path, &raw)?;
            println!(
                "Built {} command(s) from {} source(s) into '{}'.",
                catalog.len(),
                parsers.len(),
                path.display()
            );
        }
        None => print!("{raw}"),
    }
    Ok(())
}

fn run_bundle(args: BundleArgs) -> Result<(), String> {
    let parser = registry::parser_by_id(&args.source).map_err(|e| e.to_string())?;

    let catalogs = args
        .inputs
        .par_iter()
        .map(|path| {
            let html = fs::read_to_string(path)
                .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
            debug!(input = %path.display(), "parsing page");
            parse_page(parser, &html, args.duplicates)
                .map_err(|err| format!("{}: {err}", path.display()))
        })
        .collect::<Result<Vec<Catalog>, String>>()?;

    let catalog = catalogs.iter().fold(Catalog::new(), |merged, catalog| {
        merge_catalogs(&merged, catalog, MergeStrategy::Union)
    });

    let mut package = CatalogPackage::new(
        PACKAGE_VERSION,
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        catalog,
    )
    .with_bundle_hash();
    package.name = args.name;
    package.sources = vec![parser.info()];

    let raw = format_package(&package, OutputFormat::Json)?;
    write_output(&args.output, &with_trailing_newline(raw))?;

    info!(pages = args.inputs.len(), commands = package.command_count(), "bundle written");
    println!(
        "Bundled {} command(s) from {} page(s) into '{}'.",
        package.command_count(),
        args.inputs.len(),
        args.output.display()
    );
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut failures = 0usize;
    let mut commands = 0usize;

    for path in &args.inputs {
        let (count, errors) = validate_file(path)?;
        commands += count;
        for error in &errors {
            eprintln!("{}: {error}", path.display());
        }
        failures += errors.len();
    }

    if failures > 0 {
        return Err(format!("{failures} validation error(s) found"));
    }

    println!(
        "Validated {} file(s) with {} command(s).",
        args.inputs.len(),
        commands
    );
    Ok(())
}

/// Validates one JSON file holding either a bare catalog or a package.
/// Returns the number of commands and the validation errors found.
fn validate_file(path: &Path) -> Result<(usize, Vec<String>), String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))?;

    let (count, errors) = if is_package(&value) {
        let package: CatalogPackage = serde_json::from_value(value)
            .map_err(|err| format!("Invalid package '{}': {err}", path.display()))?;
        (package.command_count(), validate_package(&package))
    } else {
        let catalog: Catalog = serde_json::from_value(value)
            .map_err(|err| format!("Invalid catalog '{}': {err}", path.display()))?;
        (catalog.len(), validate_catalog(&catalog))
    };

    Ok((count, errors.iter().map(ToString::to_string).collect()))
}

fn is_package(value: &serde_json::Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.contains_key("catalog") && object.contains_key("version"))
}

fn parse_page(
    parser: &dyn DocumentationParser,
    html: &str,
    duplicates: DuplicatePolicy,
) -> Result<Catalog, String> {
    parser
        .builder()
        .with_duplicate_policy(duplicates)
        .build(&Document::parse(html))
        .map_err(|e| e.to_string())
}

fn write_output(path: &Path, raw: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }
    fs::write(path, raw).map_err(|err| format!("Failed to write '{}': {err}", path.display()))
}

fn with_trailing_newline(mut raw: String) -> String {
    if !raw.ends_with('\n') {
        raw.push('\n');
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_package_requires_catalog_and_version() {
        let package = serde_json::json!({"version": "0.1.0", "generated_at": "x", "catalog": {}});
        assert!(is_package(&package));

        let catalog = serde_json::json!({"G28": []});
        assert!(!is_package(&catalog));
        assert!(!is_package(&serde_json::json!([])));
    }

    #[test]
    fn test_with_trailing_newline_adds_once() {
        assert_eq!(with_trailing_newline("{}".to_string()), "{}\n");
        assert_eq!(with_trailing_newline("a\n".to_string()), "a\n");
    }

    #[test]
    fn test_parse_page_honors_duplicate_policy() {
        let parser = registry::parser_by_id("klipper").unwrap();
        let html = "<ul><li><code>G4 P&lt;ms&gt;</code></li><li><code>G4 [S]</code></li></ul>";

        let last = parse_page(parser, html, DuplicatePolicy::LastWins).unwrap();
        assert_eq!(last.get("G4").unwrap().len(), 1);
        assert_eq!(last.get("G4").unwrap()[0].parameters[0].tag, "S");

        let all = parse_page(parser, html, DuplicatePolicy::Accumulate).unwrap();
        assert_eq!(all.get("G4").unwrap().len(), 2);
    }
}
