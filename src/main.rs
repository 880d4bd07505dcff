use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use serde_json::Value;

use xml_forge::{Cli, ConfigManager, Document, JsonElement, Output, RunSummary};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.verbosity().log_filter()),
    )
    .init();

    cli.validate().map_err(|e| anyhow!(e))?;
    let config = ConfigManager::load_config(&cli)
        .await
        .context("Failed to load configuration")?;
    debug!("Effective configuration: {:?}", config);

    let started = Instant::now();
    let output = Output::new(config.output.verbosity());

    let content = tokio::fs::read_to_string(&cli.input)
        .await
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", cli.input.display()))?;

    let mut doc = Document::with_declaration(&config.document.version, &config.document.encoding)?;
    let root = doc
        .map_object(&JsonElement::new(&cli.root, &value), None)
        .with_context(|| format!("Failed to map {}", cli.input.display()))?;
    doc.set_root(root)?;
    info!("Mapped {} into {} nodes", cli.input.display(), doc.node_count());

    let edits = if cli.has_edits() {
        apply_edits(&mut doc, &cli)?
    } else {
        0
    };

    let mut matches = 0;
    for query in &cli.queries {
        let found = doc.find_by_path(query);
        matches += found.len();
        eprint!("{}", output.format_query_results(&doc, query, &found));
    }

    match &cli.output {
        Some(path) => doc
            .save_to_file(path)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{doc}"),
    }

    let summary = RunSummary {
        node_count: doc.root().map_or(0, |root| doc.post_order(root).len()),
        edits,
        matches,
        destination: cli.output.clone(),
        duration: started.elapsed(),
    };
    eprint!("{}", output.format_summary(&summary));

    Ok(())
}

/// Renames first, then removals, in command-line order within each kind.
fn apply_edits(doc: &mut Document, cli: &Cli) -> Result<usize> {
    let mut edits = 0;
    for rename in &cli.rename_elements {
        edits += doc.rename_element_globally(&rename.from, &rename.to)?;
    }
    for rename in &cli.rename_attributes {
        edits += doc.rename_attribute_globally(&rename.from, &rename.to)?;
    }
    for tag in &cli.remove_elements {
        edits += doc.remove_element_globally(tag);
    }
    for name in &cli.remove_attributes {
        edits += doc.remove_attribute_globally(name);
    }
    Ok(edits)
}
