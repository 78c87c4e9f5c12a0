//! Headless overview: prints the dashboard counters and the first page of
//! users, using the same configuration as the console.

use dashboard::hooks::{use_dashboard_stats, use_users};
use dashboard::{Config, LogReporter, logs};
use payloads::session::LogNavigator;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logs::init_logging(logs::DEFAULT_FILTER);

    let config = Config::from_env()?;
    let client = Arc::new(
        config.build_client(config.token_store(), Arc::new(LogNavigator))?,
    );
    let reporter = Arc::new(LogReporter);

    let stats = use_dashboard_stats(client.clone(), reporter.clone()).await;
    if let Some(stats) = stats.data().into_option() {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }

    let users = use_users(client, config.default_query(), reporter).await;
    println!(
        "{} users on {} pages",
        users.total_items(),
        users.total_pages()
    );
    for user in users.items() {
        println!("{user}");
    }
    Ok(())
}
