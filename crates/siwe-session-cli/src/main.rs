/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Session status, sign-in/sign-out results on stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use siwe_session_adapter::Providers;
use siwe_session_cli::commands::{
    describe_config, error_hint, load_config, run_nonce, run_sign_in, run_sign_out, run_status, run_watch,
};
use siwe_session_cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = load_config(args.config_path.as_deref())?;
    info!(
        backend = %config.backend.base_url,
        chains = config.chains.len(),
        "configuration loaded"
    );

    let mut stdout = std::io::stdout();

    if args.dry_run {
        describe_config(&config, &mut stdout)?;
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let providers = Providers::new(&config).context("build providers")?;

    if let Err(err) = dispatch(args.command, providers, &mut stdout).await {
        if let Some(hint) = error_hint(&err) {
            warn!(hint, "command failed");
        }
        return Err(err);
    }

    Ok(())
}

async fn dispatch(
    command: Command,
    mut providers: Providers,
    stdout: &mut std::io::Stdout,
) -> Result<()> {
    match command {
        Command::Status => {
            run_status(&providers, stdout).await?;
        }
        Command::Nonce => {
            run_nonce(&providers, stdout).await?;
        }
        Command::SignIn {
            private_key,
            chain_id,
        } => {
            let verified = run_sign_in(&providers, &private_key, chain_id, stdout).await?;
            if !verified {
                return Err(anyhow!("backend rejected the signature"));
            }
        }
        Command::SignOut => {
            run_sign_out(&providers, stdout).await?;
        }
        Command::Watch => {
            let shutdown = CancellationToken::new();
            setup_signal_handlers(shutdown.clone());
            let stdin = BufReader::new(tokio::io::stdin());
            run_watch(&mut providers, stdin, shutdown, stdout).await?;
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
