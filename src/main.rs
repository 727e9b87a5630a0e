mod ui;

use std::sync::{Arc, Mutex};

use pulse_charts::audio::LevelInput;
use pulse_charts::levels::LevelTap;
use pulse_charts::settings::{AppSettings, default_settings_path};
use ui::PulseApp;

/// Pending block levels kept while the UI is busy.
const TAP_CAPACITY: usize = 1024;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let settings_path = default_settings_path();
    let settings = AppSettings::load(&settings_path);

    let tap = Arc::new(Mutex::new(LevelTap::new(TAP_CAPACITY)));
    let input = LevelInput::new_with_device(Arc::clone(&tap), settings.input_device.as_deref())
        .or_else(|err| {
            log::warn!("configured input unavailable ({err}), trying default");
            LevelInput::new(Arc::clone(&tap))
        });

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Pulse",
        options,
        Box::new(move |cc| {
            Box::new(PulseApp::new(
                cc,
                Arc::clone(&tap),
                input,
                settings_path.clone(),
                settings.clone(),
            ))
        }),
    )
}
