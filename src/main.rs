use log::{error, info};

use contact_page::{browser, config};

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page scripts");
    if let Err(e) = browser::start() {
        error!("Failed to start page scripts: {}", e);
    }
}
