use opchain::OptionChainSource;
use std::sync::Arc;

#[must_use]
pub fn get_source() -> Arc<dyn OptionChainSource> {
    if std::env::var("OPCHAIN_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Source for CI) ---");
        Arc::new(opchain_mock::MockChainSource::new())
    } else {
        Arc::new(opchain_yahoo::YahooConnector::try_new_default().expect("yahoo connector"))
    }
}

pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("opchain=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
