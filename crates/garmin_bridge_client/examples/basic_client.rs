use garmin_bridge_client::{HealthDataSource, config::Config, http_client::ReqwestBridgeClient, utils};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example: reads GARMIN_BRIDGE_URL (and optional credentials) from env
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let client = ReqwestBridgeClient::from_config(&cfg);
    if client.session_expired().await {
        client.reauthenticate().await?;
    }
    let date = match std::env::args().nth(1) {
        Some(arg) => utils::parse_iso_date(&arg)?,
        None => chrono::Local::now().date_naive(),
    };
    let record = client.fetch_health_record(date).await?;
    println!(
        "{}: sleep score {:?}, {} exercises",
        record.date,
        record.sleep_score,
        record.exercises.len()
    );
    Ok(())
}
