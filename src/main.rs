use bazaar_rs::config::ConfigLoader;
use bazaar_rs::logger::init_logger;
use bazaar_rs::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loader = ConfigLoader::new()?;
    let settings = loader.load()?;

    init_logger(&settings.logger)?;

    Server::new(settings).run().await
}
