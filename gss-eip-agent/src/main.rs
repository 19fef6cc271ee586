use std::{path::Path, process::exit};

use anyhow::{anyhow, Context};
use clap::Parser;
use gss_eip_core::{
    network::manager::AnnotationNetworkManager,
    options::GssOptions,
    plugin::registry::{create_default_registry, PluginRegistry},
};
use kube::Client;
use log::{error, info, LevelFilter};
use tokio::signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};

use crate::{
    cli::Cli,
    controller::{reconciler::context::ReconcilerContext, start_pod_controller},
};

mod cli;
mod controller;
mod helpers;

#[tokio::main()]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    configure_logger(&cli);

    let options = match load_options(cli.options.as_deref())? {
        Some(options) => options,
        None => {
            info!("Provider is disabled, idling until shutdown...");
            return wait_for_shutdown_signal().await;
        }
    };
    let registry = create_registry(&options)?;
    let client = create_client().await;

    let context = ReconcilerContext {
        client,
        registry,
        network_manager: AnnotationNetworkManager,
        namespace: cli.namespace,
    };

    start_pod_controller(context.into()).await;

    Ok(())
}

/// Returns `None` when the options explicitly disable the provider.
fn load_options(path: Option<&Path>) -> anyhow::Result<Option<GssOptions>> {
    let path = match path {
        Some(path) => path,
        None => {
            return Ok(Some(GssOptions {
                enable: true,
                ..Default::default()
            }))
        }
    };

    let options = GssOptions::load(path)
        .with_context(|| format!("Couldn't load provider options from {path:?}!"))?;

    if !options.enabled() {
        return Ok(None);
    }

    if !options.valid() {
        return Err(anyhow!("Provider options in {path:?} are invalid!"));
    }

    Ok(Some(options))
}

// kept alive while disabled so the deployment doesn't crash-loop
async fn wait_for_shutdown_signal() -> anyhow::Result<()> {
    let mut terminate =
        signal(SignalKind::terminate()).context("Couldn't listen for SIGTERM!")?;

    tokio::select! {
        result = ctrl_c() => result.context("Couldn't listen for SIGINT!")?,
        _ = terminate.recv() => (),
    }

    info!("Shutting down!");

    Ok(())
}

fn create_registry(options: &GssOptions) -> anyhow::Result<PluginRegistry> {
    let registry = create_default_registry().context("Couldn't register network plugins!")?;

    registry
        .init_all(options)
        .context("Couldn't initialize network plugins!")?;

    Ok(registry)
}

async fn create_client() -> Client {
    match Client::try_default().await {
        Ok(client) => client,
        Err(error) => {
            error!("Couldn't create client! {error:?}");
            exit(6)
        }
    }
}

fn configure_logger(cli: &Cli) {
    env_logger::builder()
        .default_format()
        .format_module_path(false)
        .filter_level(match cli.verbose_logging {
            true => LevelFilter::Debug,
            false => LevelFilter::Info,
        })
        .init()
}
