//! rinex-stream test modules
mod nav;

use log::LevelFilter;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .init();
    });
}

/// Returns the path to a test resource
pub fn test_resource(path: &str) -> String {
    env!("CARGO_MANIFEST_DIR").to_owned() + "/test_resources/" + path
}
