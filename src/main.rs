use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

use docsift::domain::Kind;
use docsift::filter::{FilterAction, FilterState, apply_filter};
use docsift::index::{
    KindMode, SharedIndex, schedule_focus, schedule_kind_sync, schedule_text_filter,
};
use docsift::markup::{parse_entity_index, parse_member_page};
use docsift::order::{SortMode, reorder};
use docsift::scheduler::Scheduler;
use docsift::search::{
    HttpSearchClient, ScrollOutcome, ScrollPosition, SearchClient, SearchFragment, SearchPanel,
    parse_search_fragment,
};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docsift")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("docsift.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Filter {
            page,
            query,
            kind,
            show_all,
            hide_owner,
            abstract_only,
            concrete_only,
            sort,
            inherited,
        } => handle_filter_command(
            page,
            query,
            kind,
            *show_all,
            hide_owner,
            *abstract_only,
            *concrete_only,
            *sort,
            *inherited,
            config,
        ),
        Commands::Index {
            page,
            query,
            focus,
            packages_only,
        } => handle_index_command(page, query, focus.as_deref(), *packages_only),
        Commands::Search { base_url, query } => handle_search_command(base_url, query, config),
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_filter_command(
    page: &Path,
    query: &str,
    kinds: &[String],
    show_all: bool,
    hide_owners: &[String],
    abstract_only: bool,
    concrete_only: bool,
    sort: SortMode,
    inherited: bool,
    config: &Config,
) -> Result<()> {
    info!("Filtering member page: {}", page.display());
    let html = fs::read_to_string(page)
        .context(format!("Failed to read page {}", page.display()))?;
    let mut index = parse_member_page(&html)?;

    let mut state = FilterState::default()
        .apply(FilterAction::ExcludeOwners(
            config.filter.excluded_ancestors.clone(),
        ))
        .apply(FilterAction::SetQuery(query.to_string()))
        .apply(FilterAction::ExcludeOwners(hide_owners.to_vec()))
        .apply(FilterAction::SetSort(sort))
        .apply(FilterAction::SetInheritanceMode(inherited));

    if show_all || config.filter.show_all_visibility {
        state = state.apply(FilterAction::ShowAllVisibility);
    }
    if abstract_only {
        state = state.apply(FilterAction::ToggleConcrete);
    }
    if concrete_only {
        state = state.apply(FilterAction::ToggleAbstract);
    }
    if !kinds.is_empty() {
        let mut wanted = Vec::with_capacity(kinds.len());
        for k in kinds {
            wanted.push(k.parse::<Kind>().context(format!("bad --kind {k:?}"))?);
        }
        for kind in Kind::ALL {
            if !wanted.contains(&kind) {
                state = state.apply(FilterAction::ToggleKind(kind));
            }
        }
    }

    let visible = apply_filter(&mut index, &state);
    for group in &mut index.groups {
        reorder(&mut group.records, state.sort);
    }

    for group in &index.groups {
        if !group.visible {
            continue;
        }
        println!("{}", group.title.as_str().bold());
        for record in &group.records {
            if !record.visible {
                continue;
            }
            let date = record
                .date
                .map(|d| d.to_string())
                .unwrap_or_default();
            println!(
                "  {:12} {} {}",
                record.kind.to_string().cyan(),
                record.name,
                date.dimmed()
            );
        }
    }
    println!("{} {} member(s) visible", "Done:".green(), visible);
    Ok(())
}

fn handle_index_command(
    page: &Path,
    query: &str,
    focus: Option<&str>,
    packages_only: bool,
) -> Result<()> {
    info!("Filtering entity index: {}", page.display());
    let html = fs::read_to_string(page)
        .context(format!("Failed to read page {}", page.display()))?;
    let index: SharedIndex = Rc::new(RefCell::new(parse_entity_index(&html)?));
    if packages_only {
        index.borrow_mut().set_kind_mode(KindMode::PackagesOnly);
    }

    let mut scheduler = Scheduler::with_standard_labels();
    match focus {
        Some(target) => schedule_focus(&mut scheduler, &index, target)?,
        None => schedule_kind_sync(&mut scheduler, &index)?,
    }
    schedule_text_filter(&mut scheduler, &index, query)?;
    let executed = scheduler.run();
    info!("Index refresh ran {executed} task(s)");

    let index = index.borrow();
    if let Some(focused) = index.focused() {
        println!("{} {}", "Focused on".green(), focused.bold());
    }
    print_templates(&index.root.templates, 0);
    for package in &index.root.packages {
        print_package(package, 0);
    }
    println!("{} {} template(s) visible", "Done:".green(), index.visible_template_count());
    Ok(())
}

fn print_templates(templates: &[docsift::index::TemplateEntry], depth: usize) {
    for template in templates {
        if template.visible {
            let indent = "  ".repeat(depth + 1);
            println!("{indent}{} {}", template.kind.to_string().cyan(), template.name);
        }
    }
}

fn print_package(package: &docsift::index::PackageNode, depth: usize) {
    if !package.visible {
        return;
    }
    let indent = "  ".repeat(depth);
    println!("{indent}{}", package.name.as_str().bold());
    if package.header_visible {
        print_templates(&package.templates, depth);
    }
    for child in &package.packages {
        print_package(child, depth + 1);
    }
}

fn handle_search_command(base_url: &str, query: &str, config: &Config) -> Result<()> {
    info!("Searching {base_url} for {query:?}");
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(async {
        let client = HttpSearchClient::new(base_url, config.search.timeout_ms)?;
        let mut panel = SearchPanel::new(client, query, config.search.scroll_threshold_px);

        // page 1 ships with the panel in the browser; fetch it explicitly here
        let first = panel.client().fetch_page(query, 1).await?;
        match parse_search_fragment(&first)? {
            SearchFragment::Results(results) if !results.is_empty() => {
                print_results(&results, 1);
                panel.seed(results);
            }
            _ => {
                println!("{}", "No results".yellow());
                return Ok(());
            }
        }

        loop {
            let before = panel.results().len();
            match panel.on_scroll(ScrollPosition::bottom()).await {
                ScrollOutcome::Appended(_) => {
                    let page = panel.pager().next_page() - 1;
                    print_results(&panel.results()[before..], page);
                }
                ScrollOutcome::Exhausted | ScrollOutcome::Ignored => break,
            }
        }
        println!("{} {} result(s)", "Done:".green(), panel.results().len());
        Ok(())
    })
}

fn print_results(results: &[docsift::search::SearchResult], page: u32) {
    println!("{}", format!("-- page {page} --").dimmed());
    for result in results {
        println!("{}", result.definition.as_str().bold());
        if !result.signature.is_empty() {
            println!("  {}", result.signature);
        }
        if !result.comment.is_empty() {
            println!("  {}", result.comment.as_str().dimmed());
        }
    }
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
