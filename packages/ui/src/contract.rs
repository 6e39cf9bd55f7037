//! Shared registry constructor for all platforms.
//!
//! Returns a [`registry::RegistryContract`] backed by the appropriate wallet:
//! - **Web** (WASM + `web` feature): the injected browser wallet via [`registry::Eip1193Registry`]
//! - **Native**: a process-wide [`registry::MemoryRegistry`]

use std::sync::OnceLock;
use std::time::Duration;

use registry::RegistryConfig;

const REGISTRY_TOML: &str = include_str!("../registry.toml");

/// The bundled `registry.toml`, parsed once. Falls back to defaults when the
/// file does not parse.
pub fn registry_config() -> &'static RegistryConfig {
    static CONFIG: OnceLock<RegistryConfig> = OnceLock::new();
    CONFIG.get_or_init(|| {
        RegistryConfig::from_toml(REGISTRY_TOML).unwrap_or_else(|e| {
            tracing::warn!("Invalid {}: {e}; using defaults", RegistryConfig::filename());
            RegistryConfig::default()
        })
    })
}

/// Create a platform-appropriate contract handle.
pub fn make_registry() -> impl registry::RegistryContract {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        registry::Eip1193Registry::from_config(registry_config())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        static MEMORY: OnceLock<registry::MemoryRegistry> = OnceLock::new();
        MEMORY
            .get_or_init(|| registry::MemoryRegistry::with_accounts(vec![dev_account()]))
            .clone()
    }
}

/// First account of a local development node.
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
fn dev_account() -> registry::Address {
    registry::Address([
        0xf3, 0x9f, 0xd6, 0xe5, 0x1a, 0xad, 0x88, 0xf6, 0xf4, 0xce, 0x6a, 0xb8, 0x82, 0x72, 0x79,
        0xcf, 0xff, 0xb9, 0x22, 0x66,
    ])
}

/// Platform-aware async sleep.
pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}
