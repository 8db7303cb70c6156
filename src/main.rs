use agora::application::Application;

use log::LevelFilter;
use simple_logger::SimpleLogger;

fn main() {
    // WARN by default, RUST_LOG overrides it
    if let Err(e) = SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
    {
        eprintln!("Unable to initialize the logger: {}", e);
    }

    let mut application = Application::new();
    application.read_argv();
    application.run();
}
