//! Main application entry point (native).

fn main() {
    env_logger::init();
    log::info!("Starting PointerKit");

    let result = pointerkit_app::AppConfig::from_args(std::env::args().skip(1))
        .and_then(pointerkit_app::App::run);
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
