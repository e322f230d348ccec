//! `coursekit` command-line entry point.
//!
//! # Responsibility
//! - Resolve and render course resources from a static site root.
//! - Restore and persist the last-used filter values.
//!
//! Exit status is non-zero on metadata, batch or validation failures.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use coursekit_core::db::open_db;
use coursekit_core::{
    default_log_level, init_logging, persist_filters, restore_filters, BrowseService,
    FilterError, FilterField, Fetcher, FsFetcher, LogTarget, SqlitePreferenceStore,
    StoredFilters, YearSem, YearSemMenu,
};
use log::info;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "coursekit", version, about = "Browse course resources from a static site root")]
struct Cli {
    /// Static site resources directory (or base URL with the `http` feature)
    #[arg(long, global = true, env = "COURSEKIT_ROOT", default_value = "./resources")]
    root: String,

    /// trace|debug|info|warn|error (default: debug builds `debug`, release `info`)
    #[arg(long, global = true, env = "COURSEKIT_LOG", value_name = "LEVEL")]
    log_level: Option<String>,

    /// Write rotating log files here instead of stderr
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// SQLite database remembering the last-used filters
    #[arg(long, global = true, value_name = "PATH")]
    prefs: Option<PathBuf>,

    /// Location query string, e.g. `?reg=R22&batch=2022-2026`
    #[arg(long, global = true, default_value = "")]
    query: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the regulations, batches and departments the site offers
    Metadata,
    /// Print the year/semester options for one cohort
    YearSems(CohortArgs),
    /// Render page fragments for the restored and given filters
    Render(RenderArgs),
}

#[derive(Debug, Args)]
struct CohortArgs {
    #[arg(long = "reg")]
    regulation: String,
    #[arg(long)]
    batch: String,
    #[arg(long = "dept")]
    department: String,
}

#[derive(Debug, Args)]
struct RenderArgs {
    #[arg(long = "reg")]
    regulation: Option<String>,
    #[arg(long)]
    batch: Option<String>,
    #[arg(long = "dept")]
    department: Option<String>,
    /// Term token such as `1-2`; empty for all semesters
    #[arg(long, value_name = "Y-S")]
    year_sem: Option<String>,
    /// Class id to show projects for
    #[arg(long = "class", value_name = "ID")]
    class_id: Option<String>,
    #[arg(long, value_enum, default_value_t = Section::All)]
    section: Section,
}

impl RenderArgs {
    /// Explicit flags replace restored values.
    fn overlay(&self, mut stored: StoredFilters) -> StoredFilters {
        if let Some(value) = &self.regulation {
            stored.regulation = value.trim().to_string();
        }
        if let Some(value) = &self.batch {
            stored.batch = value.trim().to_string();
        }
        if let Some(value) = &self.department {
            stored.department = value.trim().to_string();
        }
        if let Some(value) = &self.year_sem {
            stored.year_sem = value.trim().to_string();
        }
        stored
    }

    fn explicit_filters(&self) -> Vec<(FilterField, &str)> {
        [
            (FilterField::Regulation, self.regulation.as_deref()),
            (FilterField::Batch, self.batch.as_deref()),
            (FilterField::Department, self.department.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
        .collect()
    }

    /// Parses `--year-sem`; empty means all semesters.
    fn explicit_year_sem(&self) -> Result<Option<YearSem>, FilterError> {
        match self.year_sem.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(Some(YearSem::parse(token)?)),
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Section {
    All,
    Subjects,
    Projects,
    Filters,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    let target = match &cli.log_dir {
        Some(dir) if dir.is_absolute() => LogTarget::Directory(dir.clone()),
        Some(dir) => LogTarget::Directory(
            std::env::current_dir()
                .context("failed to resolve current directory")?
                .join(dir),
        ),
        None => LogTarget::Stderr,
    };
    init_logging(&level, &target).map_err(anyhow::Error::msg)?;

    #[cfg(feature = "http")]
    if cli.root.starts_with("http://") || cli.root.starts_with("https://") {
        let fetcher = coursekit_core::HttpFetcher::new(cli.root.clone())?;
        return run(&cli, fetcher);
    }

    run(&cli, FsFetcher::new(&cli.root))
}

fn run<F: Fetcher>(cli: &Cli, fetcher: F) -> Result<()> {
    let mut service = BrowseService::new(fetcher);
    service
        .load_metadata()
        .with_context(|| format!("failed to load site metadata from `{}`", cli.root))?;

    match &cli.command {
        Command::Metadata => print_metadata(&service),
        Command::YearSems(args) => print_year_sems(&mut service, args),
        Command::Render(args) => render(cli, &mut service, args),
    }
}

fn print_metadata<F: Fetcher>(service: &BrowseService<F>) -> Result<()> {
    let metadata = service
        .metadata()
        .context("site metadata has not been loaded")?;
    println!("regulations: {}", metadata.regulations.join(", "));
    println!("batches: {}", metadata.batches.join(", "));
    println!("departments: {}", metadata.departments.join(", "));
    Ok(())
}

fn print_year_sems<F: Fetcher>(service: &mut BrowseService<F>, args: &CohortArgs) -> Result<()> {
    service.change_filter(FilterField::Regulation, &args.regulation)?;
    service.change_filter(FilterField::Batch, &args.batch)?;
    service.change_filter(FilterField::Department, &args.department)?;

    match service.view().year_sem_menu {
        YearSemMenu::NoData => println!("No Data"),
        YearSemMenu::Options { options, .. } => {
            for term in options {
                println!("{}\t{}", term.token(), term.label());
            }
        }
    }
    Ok(())
}

fn render<F: Fetcher>(
    cli: &Cli,
    service: &mut BrowseService<F>,
    args: &RenderArgs,
) -> Result<()> {
    if let Some(metadata) = service.metadata() {
        for (field, value) in args.explicit_filters() {
            metadata.check_value(field, value)?;
        }
    }
    args.explicit_year_sem()?;

    let conn = cli.prefs.as_deref().map(open_db).transpose()?;
    let query = StoredFilters::from_query(&cli.query);
    let restored = match &conn {
        Some(conn) => restore_filters(&query, &SqlitePreferenceStore::new(conn))?,
        None => query,
    };
    let restored = args.overlay(restored);
    info!(
        "event=cli_render module=cli status=start query={}",
        restored.to_query()
    );

    let mut failure = service.restore(&restored).err();
    if failure.is_none() {
        if let Some(class_id) = &args.class_id {
            failure = service.select_class(class_id).err();
        }
    }

    let page = service.render_page()?;
    match args.section {
        Section::All => {
            print_filters(&page);
            print_fragment("subjects", &page.subjects);
            print_fragment("projects", &page.projects);
        }
        Section::Subjects => print_fragment("subjects", &page.subjects),
        Section::Projects => print_fragment("projects", &page.projects),
        Section::Filters => print_filters(&page),
    }

    if let Some(conn) = &conn {
        persist_filters(&mut SqlitePreferenceStore::new(conn), service.filter())?;
    }

    match failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn print_filters(page: &coursekit_core::RenderedPage) {
    print_fragment("status", &page.status);
    print_fragment("regulation", &page.regulation_options);
    print_fragment("batch", &page.batch_options);
    print_fragment("department", &page.department_options);
    print_fragment("yearSem", &page.year_sem.html);
    if !page.classes.hidden {
        print_fragment("class", &page.classes.html);
    }
}

fn print_fragment(name: &str, html: &str) {
    println!("<!-- {name} -->");
    println!("{}", html.trim_end());
}
