//! Output formatting for catalogs and packages.

use gcode_catalog_core::{Catalog, CatalogPackage, CommandRecord};

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats a catalog in the requested output format.
pub fn format_catalog(catalog: &Catalog, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(catalog)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(catalog).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(catalog_to_markdown(catalog)),
        OutputFormat::Table => Ok(catalog_to_table(catalog)),
    }
}

/// Formats a package in the requested output format. Markdown and table
/// output render a metadata header followed by the catalog.
pub fn format_package(package: &CatalogPackage, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(package)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(package).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => {
            let mut out = String::new();
            out.push_str(&format!(
                "**Package:** {} {}\n\n",
                package.name.as_deref().unwrap_or("catalog"),
                package.version
            ));
            out.push_str(&format!("**Generated:** {}\n\n", package.generated_at));
            out.push_str(&catalog_to_markdown(&package.catalog));
            Ok(out)
        }
        OutputFormat::Table => {
            let mut out = format!(
                "Package: {}  Version: {}  Generated: {}\n",
                package.name.as_deref().unwrap_or("catalog"),
                package.version,
                package.generated_at
            );
            out.push_str(&catalog_to_table(&package.catalog));
            Ok(out)
        }
    }
}

fn signature(name: &str, record: &CommandRecord) -> String {
    let mut sig = name.to_string();
    for param in &record.parameters {
        sig.push(' ');
        sig.push_str(&param.label);
    }
    sig
}

fn catalog_to_markdown(catalog: &Catalog) -> String {
    let mut out = String::new();

    out.push_str("# Command catalog\n\n");
    out.push_str(&format!(
        "**Commands:** {}  **Records:** {}\n\n",
        catalog.len(),
        catalog.record_count()
    ));

    if catalog.is_empty() {
        return out;
    }

    out.push_str("| Command | Title | Source |\n");
    out.push_str("|---------|-------|--------|\n");
    for (name, records) in catalog.iter() {
        for record in records {
            out.push_str(&format!(
                "| `{}` | {} | [{}]({}) |\n",
                signature(name, record).replace('|', "\\|"),
                record.title.replace('|', "\\|"),
                record.source,
                record.url
            ));
        }
    }
    out.push('\n');

    out
}

fn catalog_to_table(catalog: &Catalog) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Commands: {}  Records: {}\n",
        catalog.len(),
        catalog.record_count()
    ));

    let rows: Vec<(String, &str)> = catalog
        .iter()
        .flat_map(|(name, records)| {
            records
                .iter()
                .map(move |record| (signature(name, record), record.title.as_str()))
        })
        .collect();

    let width = rows.iter().map(|(sig, _)| sig.len()).max().unwrap_or(7);
    for (sig, title) in rows {
        out.push_str(&format!("  {:<width$}  {title}\n", sig, width = width));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcode_catalog_core::ParameterRecord;

    fn sample() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(
            "M104",
            CommandRecord::new("M104", "Klipper", "https://www.klipper3d.org/G-Codes.html#g-code-commands")
                .with_title("Set extruder temperature")
                .with_parameter(ParameterRecord::new("S", "[S<temperature>]", true)),
        );
        catalog
    }

    #[test]
    fn test_json_is_plain_mapping() {
        let json = format_catalog(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["M104"][0]["parameters"][0]["label"], "[S<temperature>]");
    }

    #[test]
    fn test_yaml_round_trips() {
        let yaml = format_catalog(&sample(), OutputFormat::Yaml).unwrap();
        let back: Catalog = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_markdown_lists_signature_and_link() {
        let md = format_catalog(&sample(), OutputFormat::Markdown).unwrap();
        assert!(md.contains("| `M104 [S<temperature>]` | Set extruder temperature |"));
        assert!(md.contains("(https://www.klipper3d.org/G-Codes.html#g-code-commands)"));
    }

    #[test]
    fn test_table_aligns_titles() {
        let table = format_catalog(&sample(), OutputFormat::Table).unwrap();
        assert!(table.starts_with("Commands: 1  Records: 1\n"));
        assert!(table.contains("  M104 [S<temperature>]  Set extruder temperature\n"));
    }
}
