//! Kite compiler driver.
//!
//! Wires the passes together for one compilation unit. Each
//! [`CompilationUnit`] owns its declarations, its scope tree and its frame
//! map; units running side by side share only the string interner.

use std::sync::Once;

mod unit;

pub use unit::{CompilationUnit, UnitConfig, UnitReport};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `KITE_LOG=kite_resolve=debug` or `KITE_LOG=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter, Registry};

        // Only initialize if KITE_LOG is set
        if std::env::var("KITE_LOG").is_ok() {
            let filter = EnvFilter::from_env("KITE_LOG");
            let tree = tracing_tree::HierarchicalLayer::new(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree).init();
        }
    });
}
