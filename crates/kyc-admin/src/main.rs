use kyc_admin::config::AdminConfig;
use kyc_admin::lifecycle::{setup_tracing, AdminSystem};
use kyc_admin::model::KycCase;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = AdminConfig::from_env().map_err(|e| e.to_string())?;
    info!(api_url = %config.api_url, "Starting KYC admin");

    let system = AdminSystem::new(config).map_err(|e| e.to_string())?;

    let mut cases = system.list::<KycCase>();
    let span = tracing::info_span!("kyc_case_listing");
    cases
        .load()
        .instrument(span)
        .await
        .map_err(|e| e.to_string())?;

    for case in cases.items() {
        println!(
            "{:>8}  {:<16}  {:<18}  {:<9}  customer {}",
            case.id.map(|id| id.to_string()).unwrap_or_default(),
            case.kyc_ref.as_deref().unwrap_or("-"),
            case.status.map(|s| s.as_str()).unwrap_or("-"),
            case.channel.map(|c| c.as_str()).unwrap_or("-"),
            case.customer
                .as_ref()
                .and_then(|c| c.id)
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    info!(count = cases.items().len(), "Listing complete");
    Ok(())
}
