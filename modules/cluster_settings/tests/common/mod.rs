//! Common test utilities

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Route `tracing` output to the test harness; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {}", test_name);
    println!("📋 PURPOSE: {}", purpose);
}

/// Shared counter handed to change hooks
#[derive(Clone, Default)]
pub struct HookCounter(Arc<AtomicUsize>);

impl HookCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A hook that bumps this counter
    pub fn hook(&self) -> impl Fn() + Send + Sync + 'static {
        let counter = self.0.clone();
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}
