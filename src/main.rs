use anyhow::Result;
use bitwalk::CommitDisplayFormat;
use bitwalk::areas::repository::Repository;
use bitwalk::artifacts::filter::DateField;
use bitwalk::commands::porcelain::count::CountOptions;
use bitwalk::commands::porcelain::log::LogOptions;
use bitwalk::commands::porcelain::rev_options::{FilterOptions, RevisionOptions};
use clap::{Args, Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "bitwalk",
    version = "0.1.0",
    about = "Filtered walks over git commit history",
    long_about = "This tool walks the commit history of an existing git repository, \
    selecting commits with composable filters. \
    Filters can stop the walk along a branch as soon as they exclude a commit.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "GIT_DIR",
        help = "Path to the git directory instead of discovering it"
    )]
    git_dir: Option<PathBuf>,
    #[arg(short, long, global = true, help = "Log walk progress to stderr")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "log",
        about = "Show commit logs",
        long_about = "This command shows the commits reachable from the given revisions \
        (HEAD by default) that every given filter accepts."
    )]
    Log {
        #[command(flatten)]
        revisions: RevisionArgs,
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, help = "Shorthand for --format=oneline --abbrev-commit")]
        oneline: bool,
        #[arg(long, help = "Show abbreviated commit ids")]
        abbrev_commit: bool,
        #[arg(long, value_enum, default_value_t = CommitDisplayFormat::Medium)]
        format: CommitDisplayFormat,
    },
    #[command(
        name = "count",
        about = "Count the commits a log would show",
        long_about = "This command prints the number of commits selected by the same \
        revisions and filters as log."
    )]
    Count {
        #[command(flatten)]
        revisions: RevisionArgs,
        #[command(flatten)]
        filters: FilterArgs,
    },
    #[command(
        name = "refs",
        about = "List refs",
        long_about = "This command prints every ref with the commit it points to."
    )]
    Refs,
}

#[derive(Args, Debug, Clone)]
struct RevisionArgs {
    #[arg(help = "Revisions to start from (HEAD by default)")]
    revisions: Vec<String>,
    #[arg(long, help = "Start from every ref")]
    all: bool,
    #[arg(long, help = "Show no parent before all of its children")]
    topo_order: bool,
    #[arg(last = true, help = "Only commits touching these paths")]
    paths: Vec<PathBuf>,
}

impl From<&RevisionArgs> for RevisionOptions {
    fn from(args: &RevisionArgs) -> Self {
        RevisionOptions {
            revisions: args.revisions.clone(),
            all: args.all,
            topo_order: args.topo_order,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    #[arg(long, help = "Only commits by this author name")]
    author: Option<String>,
    #[arg(long, help = "Only commits by this author email")]
    author_email: Option<String>,
    #[arg(long, help = "Only commits by this committer name")]
    committer: Option<String>,
    #[arg(long, help = "Only commits by this committer email")]
    committer_email: Option<String>,
    #[arg(long, help = "Only commits whose message matches this regex")]
    grep: Option<String>,
    #[arg(long, requires = "grep", help = "Only commits whose message does not match")]
    invert_grep: bool,
    #[arg(long, help = "Only commits dated at or after this date")]
    since: Option<String>,
    #[arg(long, help = "Only commits dated at or before this date")]
    until: Option<String>,
    #[arg(long, value_enum, default_value_t = DateField::Committer)]
    date_field: DateField,
    #[arg(long, conflicts_with = "no_merges", help = "Only merge commits")]
    merges: bool,
    #[arg(long, help = "Only commits with at most one parent")]
    no_merges: bool,
    #[arg(short = 'n', long, help = "Stop after this many commits")]
    max_count: Option<usize>,
    #[arg(long, help = "Stop walking a branch at its first excluded commit")]
    stop_on_exclude: bool,
}

impl FilterArgs {
    fn to_options(&self, paths: &[PathBuf]) -> FilterOptions {
        FilterOptions {
            author: self.author.clone(),
            author_email: self.author_email.clone(),
            committer: self.committer.clone(),
            committer_email: self.committer_email.clone(),
            grep: self.grep.clone(),
            invert_grep: self.invert_grep,
            since: self.since.clone(),
            until: self.until.clone(),
            date_field: self.date_field,
            merges: self.merges,
            no_merges: self.no_merges,
            max_count: self.max_count,
            stop_on_exclude: self.stop_on_exclude,
            paths: paths.to_vec(),
        }
    }
}

fn open_repository(git_dir: Option<&Path>) -> Result<Repository> {
    match git_dir {
        Some(git_dir) => Repository::open(git_dir),
        None => Repository::discover(&std::env::current_dir()?),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let repository = open_repository(cli.git_dir.as_deref())?;
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Commands::Log {
            revisions,
            filters,
            oneline,
            abbrev_commit,
            format,
        } => {
            let opts = LogOptions {
                revisions: revisions.into(),
                filters: filters.to_options(&revisions.paths),
                oneline: *oneline,
                abbrev_commit: *abbrev_commit,
                format: *format,
            };
            let repository = repository.with_changed_paths(opts.filters.needs_changed_paths());

            repository.log(&opts, &mut stdout)?
        }
        Commands::Count { revisions, filters } => {
            let opts = CountOptions::new(revisions.into(), filters.to_options(&revisions.paths));
            let repository = repository.with_changed_paths(opts.filters.needs_changed_paths());

            repository.count(&opts, &mut stdout)?;
        }
        Commands::Refs => repository.show_refs(&mut stdout)?,
    }

    Ok(())
}
