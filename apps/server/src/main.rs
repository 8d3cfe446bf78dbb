use anyhow::Context;
use recap::domain::config::ApiConfig;
use recap::kernel::config::{load_config, load_secrets};
use recap_runtime::{RuntimeConfig, build_runtime_with_config};
use recap_server::{Server, init_logger};

fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let mut runtime = RuntimeConfig::service();
    if let Some(threads) = cfg.runtime.worker_threads {
        runtime = runtime.with_worker_threads(threads);
    }

    build_runtime_with_config(&runtime)?.block_on(async move {
        let _log = init_logger(env!("CARGO_PKG_NAME"), &cfg.logging)?;
        let secrets = load_secrets(Some(cfg.security.secrets_file.as_path()))
            .context("Critical: Secrets file is malformed")?;

        Server::builder().config(cfg).secrets(secrets).build()?.run().await
    })
}
