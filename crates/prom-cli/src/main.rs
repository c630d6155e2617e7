mod draft;
mod interactive;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use prom_api::{ApiClient, ClientConfig, delete_account, load_picture, load_summary};
use prom_core::dashboard::{DELETED_MESSAGE, load_failure_notice};
use prom_core::wizard::{CREATE_FAILED_MESSAGE, CREATED_MESSAGE};
use prom_core::{AuthContext, DeletionGuard, Notice, Session, SwipeIntent, WizardError};

#[derive(Parser)]
#[command(name = "prom", about = "Swipe-to-match client for the prom matching backend")]
struct Cli {
    /// Act as this user (else PROM_USER_ID, else user_id in config.toml)
    #[arg(long, global = true)]
    user: Option<String>,

    /// Override the backend base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether the signed-in user has a profile
    Check,

    /// Show match statistics and the match list
    Dashboard,

    /// Swipe through recommendations interactively
    Deck,

    /// Submit a single swipe
    Swipe {
        /// User id of the candidate
        target: String,

        /// like, pass or super
        action: String,
    },

    /// Manage the user's profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Permanently delete the signed-in account
    DeleteAccount {
        /// Must be exactly DELETE
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Create a profile from a TOML draft
    Create {
        /// Draft file
        draft: PathBuf,

        /// Profile picture (png, jpeg, gif or webp, under 5MB)
        #[arg(long)]
        picture: Option<PathBuf>,
    },
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(None).context("failed to load config")?;
    config
        .apply_overrides(cli.api_url.as_deref(), cli.user.as_deref())
        .context("invalid command-line override")?;
    Ok(config)
}

/// Client plus a session signed in as the configured user.
fn connect(cli: &Cli) -> Result<(ApiClient, Session)> {
    let config = load_config(cli)?;
    let client = ApiClient::new(&config).context("failed to build HTTP client")?;
    let mut session = Session::new();
    let Some(user) = config.user_id.as_deref() else {
        bail!("no user given: pass --user or set PROM_USER_ID");
    };
    if session.sign_in(user).is_none() {
        bail!("user id must not be blank");
    }
    tracing::debug!("signed in as {user} against {}", client.base_url());
    Ok((client, session))
}

fn signed_in(session: &Session) -> Result<AuthContext> {
    session
        .auth()
        .cloned()
        .context("not signed in")
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Check => cmd_check(&cli).await,
        Commands::Dashboard => cmd_dashboard(&cli).await,
        Commands::Deck => cmd_deck(&cli).await,
        Commands::Swipe { target, action } => cmd_swipe(&cli, target, action).await,
        Commands::Profile {
            command: ProfileCommands::Create { draft, picture },
        } => cmd_profile_create(&cli, draft, picture.as_deref()).await,
        Commands::DeleteAccount { confirm } => cmd_delete_account(&cli, confirm).await,
    }
}

async fn cmd_check(cli: &Cli) -> Result<()> {
    let (client, session) = connect(cli)?;
    let auth = signed_in(&session)?;
    let exists = client
        .check_profile(auth.user_id())
        .await
        .context("failed to check profile")?;
    if exists {
        println!("profile: present");
    } else {
        println!("profile: missing - run `prom profile create`");
    }
    Ok(())
}

async fn cmd_dashboard(cli: &Cli) -> Result<()> {
    let (client, session) = connect(cli)?;
    let auth = signed_in(&session)?;

    let (exists, summary) = tokio::join!(
        client.check_profile(auth.user_id()),
        load_summary(&client, &auth)
    );
    let exists = exists.unwrap_or_else(|e| {
        tracing::warn!("profile check failed: {e}");
        true
    });

    let summary = match summary {
        Ok(summary) => summary,
        Err(e) => match load_failure_notice(exists) {
            Some(message) => return Err(e).context(message),
            None => {
                tracing::debug!("load failed without a profile: {e}");
                println!("profile: missing - run `prom profile create`");
                return Ok(());
            }
        },
    };
    if !exists {
        println!("profile: missing - run `prom profile create`");
        return Ok(());
    }

    print!("{}", render::dashboard(&summary));
    Ok(())
}

async fn cmd_deck(cli: &Cli) -> Result<()> {
    let (client, session) = connect(cli)?;
    let auth = signed_in(&session)?;
    tracing::info!("starting deck for {}", auth.user_id());
    interactive::run(client, auth).await
}

async fn cmd_swipe(cli: &Cli, target: &str, action: &str) -> Result<()> {
    let Some(intent) = SwipeIntent::parse(action) else {
        bail!("unknown action '{action}': expected like, pass or super");
    };
    let (client, session) = connect(cli)?;
    let auth = signed_in(&session)?;
    let response = client
        .swipe(auth.user_id(), target, intent)
        .await
        .context(prom_core::controller::SWIPE_FAILED_MESSAGE)?;

    if response.match_created {
        println!("{}", render::notice(&Notice::matched(response.is_super_match)));
    } else {
        println!("{intent} recorded for {target}");
    }
    Ok(())
}

async fn cmd_profile_create(cli: &Cli, path: &Path, picture: Option<&Path>) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file = draft::parse(&content)?;
    let picture = picture
        .map(|p| load_picture(p).with_context(|| format!("failed to load {}", p.display())))
        .transpose()?;
    let mut wizard = draft::into_wizard(file, picture)?;

    let (client, session) = connect(cli)?;
    let auth = signed_in(&session)?;
    match wizard.submit(&auth, &client).await {
        Ok(()) => {
            println!("{}", render::notice(&Notice::success(CREATED_MESSAGE)));
            Ok(())
        }
        Err(WizardError::Validation(e)) => bail!("{e}"),
        Err(e) => Err(anyhow::Error::new(e).context(CREATE_FAILED_MESSAGE)),
    }
}

async fn cmd_delete_account(cli: &Cli, confirm: &str) -> Result<()> {
    let mut guard = DeletionGuard::new();
    guard.type_text(confirm);
    if let Err(e) = guard.confirm() {
        bail!("{e}");
    }

    let (client, mut session) = connect(cli)?;
    match delete_account(&client, &guard, &mut session).await {
        Ok(deleted) => {
            tracing::info!("signed out {}", deleted.user_id());
            println!("{}", render::notice(&Notice::success(DELETED_MESSAGE)));
            Ok(())
        }
        Err(e) => {
            tracing::warn!("delete failed: {e}");
            bail!("{}", e.notice())
        }
    }
}
