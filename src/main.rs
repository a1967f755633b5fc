use clap::{App, Arg};
use std::env;
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

use gh_repokit::api::GitHubClient;
use gh_repokit::git::{self, GitCli};
use gh_repokit::menu::{enter_directory, run_menu, Exit, Menu};
use gh_repokit::report::print_lines;
use gh_repokit::util::TerminalPrompter;
use gh_repokit::{Config, CredentialStore, Session, Workflow};

fn clap<'a, 'b>() -> App<'a, 'b> {
    App::new("gh-repokit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Create, delete, clone and push a GitHub repository from an interactive menu")
        .arg(
            Arg::with_name("credentials")
                .long("credentials")
                .value_name("FILE")
                .takes_value(true)
                .help("Credential file to use instead of ~/.git_credentials.json"),
        )
        .arg(
            Arg::with_name("verbose")
                .long("verbose")
                .short("v")
                .multiple(true)
                .help("Log more detail to stderr. Pass multiple times for more"),
        )
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let matches = clap().get_matches();
    init_logging(matches.occurrences_of("verbose"));

    let config = Config::load(matches.value_of("credentials").map(PathBuf::from))?;
    let workdir = env::current_dir()?;
    let menu = Menu::new(git::is_repository_root(&workdir));

    let mut session = Session::new(CredentialStore::new(&config.credentials_path));
    let client = GitHubClient::new(&config.api_base);
    let runner = GitCli;
    let mut prompter = TerminalPrompter;

    let mut workflow = Workflow::new(
        &config,
        &mut session,
        &client,
        &runner,
        &mut prompter,
        workdir,
    );

    match run_menu(menu, &mut workflow, print_lines).await? {
        Exit::Quit => {}
        Exit::EnterDirectory(dir) => print_lines(&enter_directory(&dir)),
    }

    Ok(())
}
