mod cache;
mod config;
mod env;
mod notify;
mod probe;
mod reconcile;
mod registry;
mod session;

use tracing::info;

const NONINTERACTIVE_ENV: &str = "GSDK_NONINTERACTIVE";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    gsdk_util::init_tracing()?;

    let mut registry = registry::FileRegistry::open_default();
    info!("Validating {} registered SDK entries", registry.len());

    let probe = probe::HostProbe;
    let sink = notify::TracingSink;
    let environment = env::SystemEnvironment;
    let interactive = std::env::var(NONINTERACTIVE_ENV).is_err();

    let session = session::ValidatorSession::new(&probe, &sink, &environment, interactive);
    session.initialize(&mut registry)?;
    session.startup_complete();
    session.shutdown();

    Ok(())
}
