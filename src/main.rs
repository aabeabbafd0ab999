use std::process::ExitCode;
use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&format!("Server failed to start: {e}"));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::ServerConfig::from_cwd()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr();

    // Bind failure is fatal: log it and let main exit non-zero.
    let listener = match server::create_listener(addr) {
        Ok(l) => l,
        Err(e) => {
            logger::log_bind_failed(&addr, &e);
            return Err(e.into());
        }
    };

    logger::log_server_start(&addr, &cfg);

    server::run(listener, Arc::new(cfg)).await
}
