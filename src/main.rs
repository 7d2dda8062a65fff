use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use changeset_check::changesets::ChangesetResolver;
use changeset_check::cli::{run_check, Collaborators};
use changeset_check::config;
use changeset_check::git::GitChangeDetector;
use changeset_check::github::{
    ActionsPlatform, GithubActions, TerminalPlatform, INPUT_BASE_BRANCH, INPUT_REPOSITORY_PATH,
};
use changeset_check::telemetry;
use changeset_check::ui;
use changeset_check::workspace::NodeWorkspace;

#[derive(clap::Parser)]
#[command(
    name = "changeset-check",
    version,
    about = "Report changed monorepo packages that have no changeset"
)]
struct Args {
    #[arg(short = 'p', long, help = "Repository root (overrides the repository_path input)")]
    repository_path: Option<String>,

    #[arg(short, long, help = "Base branch to compare against (overrides the base_branch input)")]
    base_branch: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Print results for a terminal even inside GitHub Actions")]
    local: bool,

    #[arg(short, long, help = "Enable debug diagnostics on stderr")]
    verbose: bool,
}

fn with_overrides<P: ActionsPlatform>(
    mut platform: P,
    args: &Args,
    set: impl Fn(P, &str, &str) -> P,
) -> P {
    if let Some(path) = &args.repository_path {
        platform = set(platform, INPUT_REPOSITORY_PATH, path);
    }
    if let Some(branch) = &args.base_branch {
        platform = set(platform, INPUT_BASE_BRANCH, branch);
    }
    platform
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let collaborators = Collaborators {
        resolver: ChangesetResolver::new(&config.changeset_dir),
        enumerator: NodeWorkspace::new(),
        detector: GitChangeDetector::new(),
    };

    if GithubActions::is_available() && !args.local {
        let mut platform = with_overrides(GithubActions::from_env(), &args, |p, name, value| {
            p.with_input(name, value)
        });
        run_check(&mut platform, &collaborators, &config.summary)?;
    } else {
        let mut platform = with_overrides(TerminalPlatform::new(), &args, |p, name, value| {
            p.with_input(name, value)
        });
        run_check(&mut platform, &collaborators, &config.summary)?;
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    telemetry::init_tracing(if args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    });

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
