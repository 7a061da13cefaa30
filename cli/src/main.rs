//! `instashare`: headless client for the InstaShare document service.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drives the same Service Layer, session store and page actions as the web
//! client, over reqwest instead of the browser fetch API. The session lives
//! in a JSON file so consecutive invocations share one login. Success output
//! goes to stdout, diagnostics and prompts to stderr.

mod commands;
mod error;
mod output;
mod persistence;
mod transport;

use std::path::PathBuf;
use std::sync::Arc;

use api::config::{self, Endpoints};
use api::{ApiClient, AuthContext, AuthServiceStore};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::persistence::{FilePersistence, default_session_path};
use crate::transport::ReqwestTransport;

pub type CliStore = AuthServiceStore<ReqwestTransport, FilePersistence>;
pub type CliApi = ApiClient<ReqwestTransport, CliStore>;

#[derive(Parser, Debug)]
#[command(name = "instashare", about = "InstaShare document service CLI")]
struct Cli {
    #[arg(long, env = config::API_URL_VAR)]
    api_url: Option<String>,

    #[arg(long, env = config::AUTH_URL_VAR)]
    auth_url: Option<String>,

    #[arg(long, env = config::AUTH_KEY_VAR, hide_env_values = true)]
    auth_key: Option<String>,

    /// Where the session is kept between invocations.
    #[arg(long, env = "INSTASHARE_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Answer yes to every confirmation prompt.
    #[arg(long, short = 'y', global = true, default_value_t = false)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "INSTASHARE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Print the provider sign-in URL for a browser OAuth round trip.
    OauthUrl {
        #[arg(long)]
        provider: String,
        /// Origin the provider redirects back to (`{origin}/dashboard`).
        #[arg(long, default_value = "http://localhost:3000")]
        origin: String,
    },
    /// Finish an OAuth round trip from the URL the browser landed on.
    CompleteLogin {
        /// Full redirect URL or just its `#access_token=...` fragment.
        redirect: String,
    },
    Logout,
    Whoami,
    Users(UsersCommand),
    /// Record a role event for a user.
    RoleEvent {
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        event: String,
        #[arg(long)]
        description: Option<String>,
    },
    Docs(DocsCommand),
}

#[derive(Args, Debug)]
pub struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersSubcommand {
    List,
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        responsibility: String,
        #[arg(long, env = "INSTASHARE_NEW_PASSWORD", hide_env_values = true)]
        password: String,
        /// Defaults to `--password`.
        #[arg(long)]
        confirm_password: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        responsibility: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    Delete {
        id: i64,
    },
    /// Documents uploaded by a user.
    Documents {
        id: i64,
    },
    AssignRole {
        id: i64,
        #[arg(long)]
        role: String,
    },
}

#[derive(Args, Debug)]
pub struct DocsCommand {
    #[command(subcommand)]
    command: DocsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DocsSubcommand {
    List,
    /// Documents uploaded by the signed-in user.
    Mine,
    Get {
        id: i64,
    },
    Upload {
        path: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        file_type: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        file_type: Option<String>,
    },
    Delete {
        id: i64,
    },
    /// Users a document is shared with.
    Shares {
        id: i64,
    },
    Compress {
        id: i64,
    },
    Share {
        id: i64,
        #[arg(long)]
        user_id: Option<i64>,
    },
}

/// Handles every command needs.
pub struct Services {
    pub auth: AuthContext<CliStore>,
    pub store: Arc<CliStore>,
    pub api: CliApi,
    pub assume_yes: bool,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_env_filter(filter).init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let services = build_services(&cli);
    match cli.command {
        Command::Login { email, password } => commands::login(&services, &email, &password).await,
        Command::OauthUrl { provider, origin } => commands::oauth_url(&services, &provider, &origin).await,
        Command::CompleteLogin { redirect } => commands::complete_login(&services, &redirect).await,
        Command::Logout => commands::logout(&services).await,
        Command::Whoami => commands::whoami(&services).await,
        Command::Users(users) => commands::users(&services, users.command).await,
        Command::RoleEvent { user_id, event, description } => {
            commands::role_event(&services, user_id, event, description).await
        }
        Command::Docs(docs) => commands::docs(&services, docs.command).await,
    }
}

fn build_services(cli: &Cli) -> Services {
    let (endpoints, missing) = Endpoints::from_lookup(|var| match var {
        config::API_URL_VAR => cli.api_url.clone(),
        config::AUTH_URL_VAR => cli.auth_url.clone(),
        config::AUTH_KEY_VAR => cli.auth_key.clone(),
        _ => None,
    });
    // Commands that need a missing key fail when they reach it.
    for err in &missing {
        tracing::error!("config: {err}");
    }

    let session_path = cli
        .session_file
        .clone()
        .unwrap_or_else(|| default_session_path(std::env::var("HOME").ok().as_deref()));
    tracing::debug!(path = %session_path.display(), "session file");

    let store = Arc::new(
        AuthServiceStore::new(ReqwestTransport::new(), FilePersistence::new(session_path), &endpoints).with_redirect(
            |url| {
                println!("{url}");
                Ok(())
            },
        ),
    );
    let auth = AuthContext::new(Arc::clone(&store), |state| {
        tracing::debug!(phase = ?state.phase, "auth state");
    });
    let api = ApiClient::new(ReqwestTransport::new(), Arc::clone(&store), endpoints.api_url);
    Services { auth, store, api, assume_yes: cli.yes }
}
