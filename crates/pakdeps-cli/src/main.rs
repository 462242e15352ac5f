//! CLI binary for pakdeps: resolve, plan, and inspect package dependency closures.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pakdeps_core::closure::{Closure, ClosureResolver};
use pakdeps_core::config::PakdepsConfig;
use pakdeps_core::package::PackageId;
use pakdeps_core::registry::Registry;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pakdeps", about = "Package dependency-closure resolver")]
struct Cli {
    /// Project root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Registry snapshot to read (defaults to .pakdeps/registry.json)
    #[arg(short, long, global = true)]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Seed selection shared by the closure-based commands.
#[derive(Args)]
struct SeedArgs {
    /// Seed package ids, e.g. /Game/Props/Crate
    seeds: Vec<String>,

    /// Glob over registry package ids to add as seeds (repeatable)
    #[arg(long)]
    select: Vec<String>,

    /// Extra excluded prefix on top of the configured ones (repeatable)
    #[arg(long)]
    exclude_prefix: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the dependency closure of the seed packages
    Closure {
        #[command(flatten)]
        seeds: SeedArgs,

        /// Print the closure as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the migration report for the seed packages
    Plan {
        #[command(flatten)]
        seeds: SeedArgs,

        /// Content folder to migrate into (overrides config)
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Leave a package out of the migration (repeatable)
        #[arg(long)]
        skip: Vec<String>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the saved copies that would be made before export
    Copies {
        #[command(flatten)]
        seeds: SeedArgs,
    },

    /// Export the closure as DOT (Graphviz) or Mermaid flowchart
    Export {
        #[command(flatten)]
        seeds: SeedArgs,

        /// Output format: dot, mermaid
        #[arg(short, long, default_value = "dot")]
        format: String,
    },

    /// Show registry statistics
    Info,

    /// Report dependencies that have no registry entry
    Validate,
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = PakdepsConfig::load(&project_root)?;
    let registry = load_registry(&project_root, cli.registry.as_deref())?;

    match cli.command {
        Commands::Closure { seeds, json } => cmd_closure(&registry, &config, &seeds, json),
        Commands::Plan {
            seeds,
            destination,
            skip,
            json,
        } => cmd_plan(&registry, &config, &seeds, destination, &skip, json),
        Commands::Copies { seeds } => cmd_copies(&registry, &config, &seeds),
        Commands::Export { seeds, format } => cmd_export(&registry, &config, &seeds, &format),
        Commands::Info => cmd_info(&registry),
        Commands::Validate => cmd_validate(&registry),
    }
}

fn load_registry(project_root: &Path, explicit: Option<&Path>) -> Result<Registry> {
    match explicit {
        Some(path) => pakdeps_core::storage::load_from(path),
        None => {
            if !pakdeps_core::storage::registry_exists(project_root) {
                anyhow::bail!(
                    "No registry snapshot found at {}. Pass --registry or export one from the editor.",
                    pakdeps_core::storage::registry_file(project_root).display()
                );
            }
            pakdeps_core::storage::load(project_root)
        }
    }
}

/// Explicit seeds first, then glob selections, in registry order.
fn collect_seeds(registry: &Registry, args: &SeedArgs) -> Result<Vec<PackageId>> {
    let mut seeds: Vec<PackageId> = args
        .seeds
        .iter()
        .map(|s| PackageId::from(s.as_str()))
        .collect();
    for pattern in &args.select {
        let selected = registry.select(pattern)?;
        if selected.is_empty() {
            tracing::warn!("pattern {} matched no packages", pattern);
        }
        seeds.extend(selected);
    }
    if seeds.is_empty() {
        anyhow::bail!("No seed packages given. Pass package ids or --select <GLOB>.");
    }
    Ok(seeds)
}

fn resolve(registry: &Registry, config: &PakdepsConfig, args: &SeedArgs) -> Result<Closure> {
    use indicatif::{ProgressBar, ProgressStyle};

    let seeds = collect_seeds(registry, args)?;

    let policy = config.closure.policy_with(&args.exclude_prefix)?;

    let pb = ProgressBar::new(seeds.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Gathering dependencies [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("##-"),
    );

    let resolver = ClosureResolver::new(registry, policy);
    let closure = resolver.resolve_with_progress(seeds, |index, seed| {
        pb.set_position(index as u64);
        pb.set_message(seed.to_string());
    });
    pb.finish_and_clear();

    if !closure.skipped_lookups().is_empty() {
        eprintln!(
            "Warning: {} package(s) had no registry entry and were not expanded.",
            closure.skipped_lookups().len()
        );
    }

    Ok(closure)
}

fn cmd_closure(
    registry: &Registry,
    config: &PakdepsConfig,
    args: &SeedArgs,
    json: bool,
) -> Result<()> {
    let closure = resolve(registry, config, args)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&closure)?);
        return Ok(());
    }

    for seed in closure.seeds() {
        let deps = closure.dependencies_of(seed).map(|d| d.len()).unwrap_or(0);
        println!("{} ({} dependencies)", seed, deps);
        if let Some(deps) = closure.dependencies_of(seed) {
            for dep in deps {
                println!("  {}", dep);
            }
        }
    }
    eprintln!("\n{} package(s) in closure.", closure.len());

    Ok(())
}

fn cmd_plan(
    registry: &Registry,
    config: &PakdepsConfig,
    args: &SeedArgs,
    destination: Option<PathBuf>,
    skip: &[String],
    json: bool,
) -> Result<()> {
    let closure = resolve(registry, config, args)?;
    let destination = destination.unwrap_or_else(|| config.migration.destination_root.clone());

    let mut plan = pakdeps_core::migrate::MigrationPlan::from_closure(&closure, &destination)?;
    for package in skip {
        plan.exclude(&PackageId::from(package.as_str()))?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("The following packages will be migrated to {}:", destination.display());
    for entry in &plan.entries {
        let mark = if entry.migrate { "x" } else { " " };
        println!("  [{}] {} -> {}", mark, entry.package, entry.destination.display());
    }
    eprintln!(
        "\n{} of {} package(s) selected.",
        plan.selected_count(),
        plan.entries.len()
    );

    Ok(())
}

fn cmd_copies(registry: &Registry, config: &PakdepsConfig, args: &SeedArgs) -> Result<()> {
    let closure = resolve(registry, config, args)?;
    let mut planner = pakdeps_core::copies::CopyPlanner::new(config.migration.saved_suffix.clone());

    for copy in planner.plan_closure(&closure) {
        println!("{} -> {}", copy.source, copy.copy);
    }
    eprintln!("\n{} copies planned.", planner.copies().len());

    Ok(())
}

fn cmd_export(
    registry: &Registry,
    config: &PakdepsConfig,
    args: &SeedArgs,
    format: &str,
) -> Result<()> {
    let export_format = match format {
        "dot" | "graphviz" => pakdeps_core::export::ExportFormat::Dot,
        "mermaid" | "md" => pakdeps_core::export::ExportFormat::Mermaid,
        _ => anyhow::bail!("Unknown export format: {}. Use 'dot' or 'mermaid'.", format),
    };

    let closure = resolve(registry, config, args)?;
    let output = pakdeps_core::export::export(&closure, registry, export_format);
    print!("{}", output);

    Ok(())
}

fn cmd_info(registry: &Registry) -> Result<()> {
    println!("Registry v{}", registry.version);
    if let Some(source) = &registry.source {
        println!("Source: {}", source);
    }
    println!("Created: {}", registry.created_at);
    println!("Updated: {}", registry.updated_at);
    println!();
    println!("Packages: {}", registry.package_count());
    println!("Dependency edges: {}", registry.dependency_count());

    let roots = registry.roots();
    if !roots.is_empty() {
        println!("\nRoots:");
        for (root, count) in &roots {
            println!("  {} ({} packages)", root, count);
        }
    }

    Ok(())
}

fn cmd_validate(registry: &Registry) -> Result<()> {
    let dangling = registry.dangling_references();

    for (target, referrers) in &dangling {
        let names: Vec<&str> = referrers.iter().map(PackageId::as_str).collect();
        println!("WARN: dangling dependency {} (referenced by {})", target, names.join(", "));
    }

    if dangling.is_empty() {
        eprintln!("Registry is valid. No dangling dependencies found.");
        eprintln!(
            "  {} packages, {} dependency edges",
            registry.package_count(),
            registry.dependency_count()
        );
    } else {
        eprintln!("\nFound {} dangling dependency target(s).", dangling.len());
    }

    Ok(())
}
