mod config;
mod error;
mod seed;
mod target;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use conference::{AccessError, Authorizer, ResourceKind, Target, User};
use serde::Serialize;
use storage::ConferenceStore;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use error::{Error, Result};
use seed::Fixture;

const CONFIG_FILE: &str = "eventos.toml";

#[derive(Parser)]
#[command(name = "eventos-authz")]
#[command(about = "Inspect and exercise conference authorization rules", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Database path, overriding the configuration
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database
    Init,
    /// Load users, events and registrations from a TOML fixture
    Seed {
        /// Fixture file
        fixture: PathBuf,
    },
    /// Decide whether a user may perform an action
    Check {
        /// Acting username; anonymous when omitted
        #[arg(short, long)]
        user: Option<String>,
        /// Resource kind, e.g. event or activity_registration
        #[arg(short, long)]
        resource: String,
        /// Action name, e.g. update or metadata
        #[arg(short, long)]
        action: String,
        /// Target object as kind:path, e.g. activity:sbes/keynote
        #[arg(short, long)]
        target: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective action maps and capability table
    Rules,
    /// Validate the configuration
    Validate,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let database = cli.database.unwrap_or_else(|| config.database_path());
    debug!(
        config = %cli.config.display(),
        database = %database.display(),
        "starting"
    );

    match cli.command {
        Commands::Init => cmd_init(&database),
        Commands::Seed { fixture } => cmd_seed(&database, &fixture),
        Commands::Check {
            user,
            resource,
            action,
            target,
            json,
        } => cmd_check(
            &config,
            &database,
            user.as_deref(),
            &resource,
            &action,
            target.as_deref(),
            json,
        ),
        Commands::Rules => cmd_rules(&config),
        Commands::Validate => cmd_validate(&config),
    }
}

fn cmd_init(database: &Path) -> Result<()> {
    if let Some(parent) = database.parent() {
        std::fs::create_dir_all(parent)?;
    }
    ConferenceStore::open(database)?;
    println!("Database ready at {}", database.display());
    Ok(())
}

fn cmd_seed(database: &Path, fixture: &Path) -> Result<()> {
    let store = open_store(database)?;
    let report = Fixture::load(fixture)?.apply(&store)?;

    println!(
        "Seeded {} users, {} events, {} registrations.",
        report.users, report.events, report.registrations
    );
    for (title, id) in &report.submissions {
        println!("submission {id}  {title}");
    }
    for (title, reviewer, id) in &report.reviews {
        println!("review     {id}  {title} ({reviewer})");
    }
    Ok(())
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    user: Option<&'a str>,
    resource: &'a str,
    action: &'a str,
    target: Option<&'a str>,
    allowed: bool,
    status: u16,
    reason: Option<String>,
}

fn cmd_check(
    config: &Config,
    database: &Path,
    username: Option<&str>,
    resource: &str,
    action: &str,
    target: Option<&str>,
    json: bool,
) -> Result<()> {
    let kind: ResourceKind = resource.parse()?;
    let authz = Authorizer::with_overrides(&config.resources)?;
    let store = Arc::new(open_store(database)?);

    let user = match username {
        Some(name) => store.load_user(name).map_err(|e| match e {
            storage::Error::NotFound(_) => Error::UserNotFound(name.to_string()),
            other => Error::Storage(other),
        })?,
        None => User::anonymous(),
    };
    let resolved = target
        .map(|spec| target::resolve(&store, spec).map(|object| Target::new(object, store.clone())))
        .transpose()?;

    let outcome = authz.enforce(kind, Some(action), &user, resolved.as_ref());

    if json {
        let (status, reason) = match &outcome {
            Ok(()) => (200, None),
            Err(AccessError::Forbidden { reason, .. }) => (403, Some(reason.clone())),
            Err(e) => (e.status(), Some(e.to_string())),
        };
        let output = CheckOutput {
            user: username,
            resource,
            action,
            target,
            allowed: outcome.is_ok(),
            status,
            reason,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match outcome {
        Ok(()) => println!("allowed"),
        Err(AccessError::Unauthenticated) => println!("unauthenticated (401)"),
        Err(AccessError::Forbidden { reason, .. }) => println!("forbidden (403): {reason}"),
    }
    Ok(())
}

fn cmd_rules(config: &Config) -> Result<()> {
    let authz = Authorizer::with_overrides(&config.resources)?;

    println!("{:<24}  {:<30}  REQUIRES", "RESOURCE", "ACTION");
    println!("{}", "-".repeat(80));
    for declaration in authz.declarations() {
        println!(
            "{:<24}  {:<30}  {}",
            declaration.resource.name(),
            declaration.action,
            declaration.spec
        );
    }

    println!();
    println!("{:<40}  PREDICATE", "CAPABILITY");
    println!("{}", "-".repeat(80));
    for (name, predicate) in authz.registry().entries() {
        let predicate = predicate
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| "authenticated".to_string());
        println!("{name:<40}  {predicate}");
    }
    Ok(())
}

fn cmd_validate(config: &Config) -> Result<()> {
    let authz = Authorizer::with_overrides(&config.resources)?;
    println!(
        "ok: {} resources, {} actions, {} capabilities",
        ResourceKind::ALL.len(),
        authz.declarations().len(),
        authz.registry().len()
    );
    Ok(())
}

fn open_store(database: &Path) -> Result<ConferenceStore> {
    if !database.exists() {
        return Err(Error::DatabaseNotFound {
            path: database.to_path_buf(),
        });
    }
    Ok(ConferenceStore::open(database)?)
}
