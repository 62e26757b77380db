use galley_core::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    galley_api::telemetry::init_telemetry();

    let config = Config::from_env()?;
    config.validate()?;

    let (_state, router) = galley_api::setup::initialize_app(config.clone()).await?;

    galley_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
