//! Command execution handlers

use crate::application::{AppConfig, CliConfig, Commands, LayerReporter, TargetArgs};
use crate::depends::{
    BaseEnvironment, BaseTargetResolver, DependsFileLocator, EnvConfigBuiltins, GraphStore,
    SourceRequest, collapse_virtual, forward, reserve_kernel_projects, resolve_kernel_token,
    reverse, substitute_variables, traverse_source,
};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::{debug, info};

/// Execute the parsed command, writing results to stdout
pub fn execute_command(config: CliConfig) -> Result<()> {
    let Some(command) = config.command else {
        eprintln!("projdeps - project dependency resolution");
        eprintln!("Run 'projdeps --help' for usage information");
        return Ok(());
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute_command_with_writer(command, &config.app_config, &mut out)
}

/// Execute a specific command against an explicit output stream (for testing)
pub fn execute_command_with_writer(
    command: Commands,
    config: &AppConfig,
    out: &mut dyn Write,
) -> Result<()> {
    debug!(command = command.name(), root = ?config.root, "Executing command");
    match command {
        Commands::Order { depth, target } => handle_order(config, depth, &target, out),
        Commands::Rdepends { depth, target } => handle_rdepends(config, depth, &target, out),
        Commands::Source {
            platform,
            base,
            base_version,
            env_section,
            json,
            projects,
        } => {
            let options = SourceOptions {
                platform,
                include_base: base,
                base_version,
                env_section,
                json,
            };
            handle_source(config, &options, projects, out)
        }
    }
}

/// Graph with variables substituted and the request's kernel projects reserved
struct PreparedGraph {
    store: GraphStore,
    requested: Vec<String>,
    reserved: std::collections::BTreeSet<String>,
}

fn prepare_graph(config: &AppConfig, target: &TargetArgs) -> Result<PreparedGraph> {
    let tree = config.source_tree();
    let base_config = config.depends_file_path();
    let mut store = GraphStore::load(&tree, &base_config, target.section_platform())
        .with_context(|| format!("Failed to load dependencies of {}", tree.root().display()))?;

    let mut requested = target.projects.clone();
    let reserved = reserve_kernel_projects(&mut requested, &store.kernels);
    substitute_variables(&mut store.graph, &store.variables)?;

    Ok(PreparedGraph {
        store,
        requested,
        reserved,
    })
}

fn finish_list(
    projects: Vec<String>,
    prepared: &PreparedGraph,
    target: &TargetArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let resolved = resolve_kernel_token(
        projects,
        &prepared.store.kernels,
        &target.platforms,
        &prepared.reserved,
    )?;
    let collapsed = collapse_virtual(resolved);
    writeln!(out, "{}", collapsed.join(" "))?;
    Ok(())
}

fn handle_order(
    config: &AppConfig,
    depth: Option<usize>,
    target: &TargetArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let prepared = prepare_graph(config, target)?;
    let graph = &prepared.store.graph;

    let ordered = match depth {
        Some(depth) => forward::traverse(&prepared.requested, graph, depth)?,
        None => forward::reorder(&prepared.requested, graph)?,
    };
    info!(count = ordered.len(), "Ordered projects");
    finish_list(ordered, &prepared, target, out)
}

fn handle_rdepends(
    config: &AppConfig,
    depth: usize,
    target: &TargetArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let prepared = prepare_graph(config, target)?;
    let expanded: Vec<String> = reverse::expand(&prepared.requested, &prepared.store.graph, depth)
        .into_iter()
        .collect();
    info!(count = expanded.len(), "Expanded reverse dependencies");
    finish_list(expanded, &prepared, target, out)
}

struct SourceOptions {
    platform: String,
    include_base: bool,
    base_version: Option<String>,
    env_section: Option<String>,
    json: bool,
}

fn handle_source(
    config: &AppConfig,
    options: &SourceOptions,
    projects: Vec<String>,
    out: &mut dyn Write,
) -> Result<()> {
    let tree = config.source_tree();
    let mut store = GraphStore::load_base(&config.depends_file_path())?;

    let environment = match &options.base_version {
        Some(version) => BaseEnvironment::fixed(version.clone()),
        None => {
            let env_file = projects.first().and_then(|p| tree.depends_file(p));
            BaseEnvironment::load(env_file.as_deref(), options.env_section.as_deref())?
        }
    };
    let base_target = environment.resolve_base_target(&options.platform);
    let builtins = EnvConfigBuiltins::new(config.env_config_path());

    let request = SourceRequest::new(projects, options.platform.clone())
        .with_base_target(base_target)
        .with_include_base(options.include_base);

    let mut reporter = LayerReporter::new(out, options.json);
    let outcome = traverse_source(&request, &mut store, &tree, &builtins, Some(&mut reporter))?;
    info!(layers = reporter.layers(), "Source traversal complete");
    reporter.finish(&outcome, options.include_base)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    include!("commands.test.rs");
}
