pub mod config;

/// Installs the fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "zyntra=debug,zyntra_migrate=debug,zyntra_server=debug,zyntra_api=debug,zyntra_db=info,tower_http=debug"
                    .into()
            }),
        )
        .init();
}
