use log::{info, Level};
use site_scripts::App;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { Level::Debug } else { Level::Info };
    let _ = console_log::init_with_level(level);

    info!("Starting site scripts");
    if let Err(e) = App::start() {
        log::error!("Could not start page behaviours: {}", e);
    }
}
