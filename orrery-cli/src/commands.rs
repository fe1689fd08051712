//! CLI command implementations.

use crate::config::{Config, OutputFormat, CONFIG_DIR};
use crate::DataArgs;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use orrery_core::{Dataset, EdgeRecord, EdgeSource, NodeDirectory, NodeRecord};
use orrery_graph::{Route, RoutePlanner, RouteStore, StoreStats};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Route data opened from either a dataset file or the store.
enum Backend {
    Dataset(Dataset),
    Store(RouteStore),
}

impl EdgeSource for Backend {
    fn list_edges(&self) -> orrery_core::Result<Vec<EdgeRecord>> {
        match self {
            Backend::Dataset(data) => data.list_edges(),
            Backend::Store(store) => store.list_edges(),
        }
    }
}

impl NodeDirectory for Backend {
    fn resolve_id_by_name(&self, name: &str) -> orrery_core::Result<Option<String>> {
        match self {
            Backend::Dataset(data) => data.resolve_id_by_name(name),
            Backend::Store(store) => store.resolve_id_by_name(name),
        }
    }

    fn list_all(&self) -> orrery_core::Result<Vec<NodeRecord>> {
        match self {
            Backend::Dataset(data) => data.list_all(),
            Backend::Store(store) => store.list_all(),
        }
    }
}

fn open_backend(args: &DataArgs, config: &Config, root: &Path) -> Result<Backend> {
    if let Some(file) = &args.data {
        return Ok(Backend::Dataset(Dataset::load(file)?));
    }

    let store_path = match &args.store {
        Some(path) => path.clone(),
        None => config.store_path(root),
    };
    if !store_path.exists() {
        return Err(format!(
            "No route store at {}. Run `orrery import <file>` first",
            store_path.display()
        )
        .into());
    }

    Ok(Backend::Store(RouteStore::open(store_path)?))
}

/// Initialize Orrery in a directory.
pub fn init(path: &Path) -> Result<()> {
    if Config::path(path).exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    Config::default().save(path)?;

    println!("{} Initialized Orrery in {}", "✓".green(), path.display());
    println!(
        "  Run {} to load route data",
        "orrery import <file>".cyan()
    );

    Ok(())
}

/// Import a dataset file into the route store.
pub fn import(file: &Path, store: Option<&Path>) -> Result<()> {
    let root = std::env::current_dir()?;
    let config = Config::load(&root)?;
    let store_path = match store {
        Some(path) => path.to_path_buf(),
        None => config.store_path(&root),
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(format!("Reading {}...", file.display()));

    let start = Instant::now();
    let stats = import_into(file, &store_path, &spinner)?;
    info!("Imported {} into {}", file.display(), store_path.display());

    println!(
        "{} Imported {} nodes and {} edges in {}ms",
        "✓".green(),
        stats.node_count.to_string().cyan(),
        stats.edge_count.to_string().cyan(),
        start.elapsed().as_millis()
    );

    Ok(())
}

/// Loads a dataset into the store. The spinner is cleared on every exit.
fn import_into(file: &Path, store_path: &Path, spinner: &ProgressBar) -> Result<StoreStats> {
    let outcome = (|| -> Result<StoreStats> {
        let dataset = Dataset::load(file)?;
        spinner.set_message("Writing route store...");
        let store = RouteStore::open(store_path)?;
        Ok(store.replace(&dataset)?)
    })();

    spinner.finish_and_clear();
    outcome
}

/// Find the shortest route between two named nodes.
pub fn route(from: &str, to: &str, args: &DataArgs, json: bool) -> Result<()> {
    let root = std::env::current_dir()?;
    let config = Config::load(&root)?;
    let backend = open_backend(args, &config, &root)?;

    let start = Instant::now();
    let planner = RoutePlanner::new(&backend, &backend);
    let route = planner.shortest_path(from, to)?;
    let elapsed = start.elapsed().as_millis();

    if json || config.format == OutputFormat::Json {
        let output = serde_json::json!({
            "from": from,
            "to": to,
            "labels": route.labels,
            "distance": route.distance,
            "reachable": route.is_reachable(),
            "query_time_ms": elapsed
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match route.distance {
        Some(distance) => {
            println!("{} {}", "Route:".bold(), format_path(&route, to).cyan());
            println!("  {} {}", "Distance:".dimmed(), distance);
            println!("  {} {}", "Hops:".dimmed(), route.labels.len());
        }
        None => {
            println!(
                "{} No route from {} to {}",
                "✗".red(),
                from.cyan(),
                to.cyan()
            );
        }
    }

    println!();
    println!("Query time: {}ms", elapsed);

    Ok(())
}

/// Joins the route's labels and the destination with arrows.
fn format_path(route: &Route, destination: &str) -> String {
    route
        .labels
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(destination))
        .collect::<Vec<_>>()
        .join(" → ")
}

/// List known nodes.
pub fn nodes(args: &DataArgs) -> Result<()> {
    let root = std::env::current_dir()?;
    let config = Config::load(&root)?;
    let backend = open_backend(args, &config, &root)?;

    let mut nodes = backend.list_all()?;
    nodes.sort_by(|a, b| a.name.cmp(&b.name));

    if nodes.is_empty() {
        println!("No nodes found");
        return Ok(());
    }

    println!("Found {} nodes:\n", nodes.len());
    for node in nodes {
        println!("  {} {}", node.name.cyan(), format!("({})", node.id).dimmed());
    }

    Ok(())
}

/// Show configuration and store statistics.
pub fn status(path: &Path) -> Result<()> {
    if !path.join(CONFIG_DIR).exists() {
        println!("{} Orrery not initialized in this directory", "✗".red());
        println!("  Run {} to initialize", "orrery init".cyan());
        return Ok(());
    }

    let config = Config::load(path)?;
    let store_path = config.store_path(path);

    println!("{}", "Orrery Status".cyan().bold());
    println!();
    println!("  {} {}", "Store:".dimmed(), store_path.display());
    println!("  {} {:?}", "Format:".dimmed(), config.format);

    if store_path.exists() {
        let stats = RouteStore::open(&store_path)?.stats();
        println!("  {} {}", "Nodes:".dimmed(), stats.node_count);
        println!("  {} {}", "Edges:".dimmed(), stats.edge_count);
    } else {
        println!("  {} not imported yet", "Data:".dimmed());
    }

    Ok(())
}
