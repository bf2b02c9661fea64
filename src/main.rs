use eventex::configuration::get_config;
use eventex::startup::Application;
use eventex::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber =
        get_subscriber("eventex".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    dotenvy::dotenv().ok();

    let settings = get_config()?;
    let app = Application::build(settings).await?;
    app.run_until_stop().await
}
