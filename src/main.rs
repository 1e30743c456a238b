//! Knight Isolation GUI
//!
//! Play against the anytime alpha-beta agent.

use isolation::ui::IsolationApp;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("Knight Isolation"),
        ..Default::default()
    };

    eframe::run_native(
        "Isolation",
        options,
        Box::new(|cc| Ok(Box::new(IsolationApp::new(cc)))),
    )
}
