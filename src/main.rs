use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use club_portal::client::{ApiClient, ResourceClient};
use club_portal::domain::{
    Activity, Club, EntityId, Member, Payment, Permission, Property, Resource, ResourceKind,
    Role, Sponsor, User,
};
use club_portal::i18n::{t, Locale, MessageKey};
use club_portal::{config::Config, server, telemetry};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "club-portal", version, about = "Club management gateway and CLI")]
struct Cli {
    /// Language for messages (es, en); defaults to DEFAULT_LOCALE
    #[arg(long, global = true)]
    lang: Option<Locale>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP gateway (default)
    Serve,
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        /// Read from CLUB_PORTAL_PASSWORD when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Drop the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Check that the backend answers
    Health,
    /// List records, e.g. `list members --query clubId=2`
    List {
        resource: ResourceKind,
        #[arg(long)]
        query: Option<String>,
    },
    /// Show one record
    Get { resource: ResourceKind, id: EntityId },
    /// Create a record from a JSON document
    Create {
        resource: ResourceKind,
        #[arg(long)]
        data: String,
    },
    /// Update a record from a JSON document with the changed fields
    Update {
        resource: ResourceKind,
        id: EntityId,
        #[arg(long)]
        data: String,
    },
    /// Delete a record
    Delete { resource: ResourceKind, id: EntityId },
}

enum ResourceAction {
    List(Option<String>),
    Get(EntityId),
    Create(String),
    Update(EntityId, String),
    Delete(EntityId),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;
    let locale = cli.lang.unwrap_or(config.default_locale);

    let command = cli.command.unwrap_or(Command::Serve);
    let serving = matches!(command, Command::Serve);
    let metrics_handle = telemetry::init(&config.telemetry, serving);

    match command {
        Command::Serve => server::run(config, metrics_handle).await,
        other => run_client(other, &config, locale).await,
    }
}

async fn run_client(command: Command, config: &Config, locale: Locale) -> Result<()> {
    let api = ApiClient::from_config(config)?;
    match command {
        Command::Serve => {}
        Command::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => std::env::var("CLUB_PORTAL_PASSWORD")
                    .context("Pass --password or set CLUB_PORTAL_PASSWORD")?,
            };
            let profile = api
                .login(&email, &password)
                .await
                .map_err(|e| anyhow::anyhow!(e.localized(locale)))?;
            println!("{}", t(locale, MessageKey::LoggedIn));
            print_json(&profile)?;
        }
        Command::Logout => {
            api.logout().await?;
            println!("{}", t(locale, MessageKey::LoggedOut));
        }
        Command::Whoami => match api.restore_session().await? {
            Some(profile) => print_json(&profile)?,
            None => anyhow::bail!(t(locale, MessageKey::SessionExpired)),
        },
        Command::Health => {
            let health = api.health().await;
            print_json(&health)?;
            if !health.reachable {
                anyhow::bail!(t(locale, MessageKey::BackendUnavailable));
            }
        }
        Command::List { resource, query } => {
            run_resource(&api, resource, ResourceAction::List(query), locale).await?
        }
        Command::Get { resource, id } => {
            run_resource(&api, resource, ResourceAction::Get(id), locale).await?
        }
        Command::Create { resource, data } => {
            run_resource(&api, resource, ResourceAction::Create(data), locale).await?
        }
        Command::Update { resource, id, data } => {
            run_resource(&api, resource, ResourceAction::Update(id, data), locale).await?
        }
        Command::Delete { resource, id } => {
            run_resource(&api, resource, ResourceAction::Delete(id), locale).await?
        }
    }
    Ok(())
}

async fn run_resource(
    api: &ApiClient,
    kind: ResourceKind,
    action: ResourceAction,
    locale: Locale,
) -> Result<()> {
    if !api.session().restore().await? {
        anyhow::bail!(t(locale, MessageKey::MissingToken));
    }
    match kind {
        ResourceKind::Club => perform::<Club>(api, action, locale).await,
        ResourceKind::User => perform::<User>(api, action, locale).await,
        ResourceKind::Member => perform::<Member>(api, action, locale).await,
        ResourceKind::Sponsor => perform::<Sponsor>(api, action, locale).await,
        ResourceKind::Payment => perform::<Payment>(api, action, locale).await,
        ResourceKind::Role => perform::<Role>(api, action, locale).await,
        ResourceKind::Permission => perform::<Permission>(api, action, locale).await,
        ResourceKind::Property => perform::<Property>(api, action, locale).await,
        ResourceKind::Activity => perform::<Activity>(api, action, locale).await,
    }
}

async fn perform<R: Resource>(api: &ApiClient, action: ResourceAction, locale: Locale) -> Result<()> {
    let client: ResourceClient<R, _> = ResourceClient::new(api.clone());
    let label = R::KIND.label(locale);
    let localized = |e: club_portal::AppError| anyhow::anyhow!(e.localized(locale));

    match action {
        ResourceAction::List(query) => {
            let items = client.list(query.as_deref()).await.map_err(localized)?;
            print_json(&items)?;
        }
        ResourceAction::Get(id) => {
            let item = client.get(id).await.map_err(localized)?;
            print_json(&item)?;
        }
        ResourceAction::Create(data) => {
            let input: R::Create =
                serde_json::from_str(&data).context("--data is not a valid record")?;
            let item = client.create(&input).await.map_err(localized)?;
            println!("{}: {}", label, t(locale, MessageKey::Created));
            print_json(&item)?;
        }
        ResourceAction::Update(id, data) => {
            let input: R::Update =
                serde_json::from_str(&data).context("--data is not a valid update")?;
            let item = client.update(id, &input).await.map_err(localized)?;
            println!("{}: {}", label, t(locale, MessageKey::Updated));
            print_json(&item)?;
        }
        ResourceAction::Delete(id) => {
            client.delete(id).await.map_err(localized)?;
            println!("{}: {}", label, t(locale, MessageKey::Deleted));
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
