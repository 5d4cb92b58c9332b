//! Command-line entry point: runs an editing script and prints the scene.

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match vectorstage_app::AppConfig::load(path.as_ref()) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
        None => vectorstage_app::AppConfig::default(),
    };
    log::info!("Starting {}", config.title);

    match vectorstage_app::App::run(config) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}
