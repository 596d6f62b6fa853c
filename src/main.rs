use std::net::TcpListener;

use env_logger::Env;
use mirador::{configuration::get_configuration, startup::run};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    log::info!(
        "Portal scraper listening on port {}",
        configuration.application.port
    );
    log::info!(
        "Portal login configured: {}",
        if configuration.portal.email.is_empty() {
            "no"
        } else {
            "yes"
        }
    );

    run(listener, configuration)?.await
}
