use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Installs a logger for the test binary. Defaults to INFO; override with
/// RUST_LOG, e.g. `RUST_LOG=bucket_list=trace`.
pub fn init_test_logger() {
    INIT.call_once(|| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Info)
            .is_test(true)
            .format_timestamp_millis()
            .parse_default_env();

        // another test harness may have got there first
        let _ = builder.try_init();
    });
}
