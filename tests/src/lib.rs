#[macro_use]
mod macros;

pub mod fixtures;

use std::sync::Once;

/// Installs `env_logger` once per test binary. Set `RUST_LOG=quire_core=trace`
/// to see pipeline transitions and per-field rejections.
pub fn init_logging() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
