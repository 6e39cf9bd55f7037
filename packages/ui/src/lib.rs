//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod contract;
pub use contract::{make_registry, registry_config, sleep};

pub const UI_CSS: Asset = asset!("/assets/ui.css");

mod wallet;
pub use wallet::{refresh_wallet, use_wallet, ConnectWalletButton, WalletProvider, WalletState};

mod wallet_indicator;
pub use wallet_indicator::WalletIndicator;

mod banner;
pub use banner::{Banner, BannerKind, StatusBanners};

mod spinner;
pub use spinner::Spinner;

mod page;
pub use page::PageCard;

mod form;
pub use form::TextField;

pub mod activity_log;
pub use activity_log::{log_activity, log_submitted, use_activity_log, ActivityLog, LogLevel};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};
