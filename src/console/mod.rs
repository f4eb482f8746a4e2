//! Terminal front end for the registrar.
//!
//! [`run_interactive`] wires the production adapters into a
//! [`Registrar`](crate::application::controller::Registrar) and drives it
//! from a line-based [`Repl`]. [`run_check`] is the non-interactive
//! availability check.

mod input;
mod prompts;
mod render;
mod repl;

pub use input::ConsoleInput;
pub use prompts::{ConsoleCredentialPrompt, ConsoleFolderPicker};
pub use render::{render_notice, render_view};
pub use repl::Repl;

use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;

use crate::application::controller::{
    DynAvailabilityService, DynPreferenceService, Registrar, RegistrarDeps,
};
use crate::application::services::{
    AuthService, AvailabilityService, DynRegistrationService, PreferenceService,
    RegistrationService,
};
use crate::config::Config;
use crate::domain::entities::Availability;
use crate::domain::repositories::{
    AvailabilityProbe, Filesystem, HostingRepository, LocalKeyValueStore, TokenRepository,
};
use crate::infrastructure::http::HttpAvailabilityProbe;
use crate::infrastructure::identity::TokenIdentityProvider;
use crate::infrastructure::kv::{self, FileKeyValueStore};
use crate::infrastructure::persistence::{self, PgHostingRepository, PgTokenRepository};
use crate::infrastructure::storage::LocalFilesystem;

fn availability_service(config: &Config) -> Result<DynAvailabilityService> {
    let probe: Arc<dyn AvailabilityProbe> = Arc::new(HttpAvailabilityProbe::new(
        config.probe_timeout(),
    )?);
    Ok(AvailabilityService::new(probe, config.site_address()))
}

/// Runs the interactive registrar until the user quits.
///
/// `token`, when given, signs in before the first prompt.
///
/// # Errors
///
/// Returns an error if the database or signing secret is missing, or a
/// required adapter cannot be initialized.
pub async fn run_interactive(config: Config, token: Option<String>) -> Result<()> {
    let signing_secret = config.require_signing_secret()?.to_string();
    let pool = Arc::new(
        persistence::connect(config.require_database_url()?, config.db_max_connections).await?,
    );

    let input = Arc::new(ConsoleInput::stdin());

    let tokens: Arc<dyn TokenRepository> = Arc::new(PgTokenRepository::new(pool.clone()));
    let has_preset = token.is_some();
    let identity = TokenIdentityProvider::new(
        AuthService::new(tokens, signing_secret),
        Arc::new(ConsoleCredentialPrompt::new(input.clone())),
    )
    .with_preset_token(token);

    let local: Arc<dyn LocalKeyValueStore> = Arc::new(
        FileKeyValueStore::open(&config.local_store_path)
            .context("Failed to open local preference store")?,
    );
    let remote = kv::connect_remote(config.redis_url.as_deref()).await;
    let preferences: DynPreferenceService = PreferenceService::new(remote, local);

    let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new(&config.storage_root));
    let hosting: Arc<dyn HostingRepository> = Arc::new(PgHostingRepository::new(pool));
    let registration: DynRegistrationService =
        RegistrationService::new(filesystem, hosting, config.site_address());

    let deps = RegistrarDeps {
        identity: Arc::new(identity),
        picker: Arc::new(ConsoleFolderPicker::new(input.clone())),
        preferences: Arc::new(preferences),
        availability: Arc::new(availability_service(&config)?),
        registration: Arc::new(registration),
    };

    let mut registrar = Registrar::new(deps, config.debounce_window());
    if has_preset {
        registrar.sign_in().await;
    }

    Repl::new(registrar, input).run().await?;
    Ok(())
}

/// Checks one name and prints the verdict.
///
/// # Errors
///
/// Returns an error if the name is invalid or the probe cannot be built.
pub async fn run_check(config: &Config, name: &str) -> Result<()> {
    let service = availability_service(config)?;
    let verdict = service.check_candidate(name).await?;
    let host = service.address().host(&verdict.name);

    if let Some(failure) = &verdict.failure {
        println!("{} {}", "❌ Error checking availability:".red(), failure);
        return Ok(());
    }

    match verdict.availability {
        Availability::Available => println!("✅ {}", format!("{host} is available!").green()),
        _ => println!("⛔ {}", format!("{host} is already taken").red()),
    }

    Ok(())
}
