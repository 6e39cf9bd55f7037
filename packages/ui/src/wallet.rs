//! Wallet context and hooks for the UI.

use dioxus::prelude::*;
use registry::{flows, Address};

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::make_registry;

/// Connection and registration state of the wallet account.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletState {
    pub account: Option<Address>,
    /// Whether the account is a registered registry user.
    pub registered: bool,
    /// Total lands registered in the contract.
    pub land_count: u64,
    /// Why the registration and land count could not be read.
    pub error: Option<String>,
    pub loading: bool,
}

impl Default for WalletState {
    fn default() -> Self {
        Self {
            account: None,
            registered: false,
            land_count: 0,
            error: None,
            loading: true,
        }
    }
}

/// Get the current wallet state.
/// Returns a signal that updates when the account connects or registers.
pub fn use_wallet() -> Signal<WalletState> {
    use_context::<Signal<WalletState>>()
}

/// Re-read the account, its registration and the land count.
///
/// Never prompts the wallet: an unauthorised page simply reads as disconnected.
pub async fn refresh_wallet(mut wallet: Signal<WalletState>) {
    let contract = make_registry();
    match flows::home_status(&contract).await {
        Ok(status) => wallet.set(WalletState {
            account: status.account,
            registered: status.registered,
            land_count: status.land_count,
            error: status.error,
            loading: false,
        }),
        Err(e) => {
            tracing::error!("Failed to load wallet status: {e}");
            wallet.set(WalletState {
                error: Some(e.to_string()),
                loading: false,
                ..WalletState::default()
            });
        }
    }
}

/// Provider component that tracks the wallet account.
/// Wrap your app with this component to enable [`use_wallet`].
#[component]
pub fn WalletProvider(children: Element) -> Element {
    let wallet = use_signal(WalletState::default);

    // Load the account status on mount
    let _ = use_resource(move || async move {
        refresh_wallet(wallet).await;
    });

    use_context_provider(|| wallet);

    rsx! {
        {children}
    }
}

/// Button that asks the wallet for account access.
#[component]
pub fn ConnectWalletButton(
    #[props(default = "Connect Wallet".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    /// Receives the error text when connecting fails.
    #[props(default)]
    on_error: EventHandler<String>,
) -> Element {
    let wallet = use_wallet();
    let mut log = use_activity_log();
    let mut connecting = use_signal(|| false);

    let onclick = move |_| async move {
        connecting.set(true);
        let contract = make_registry();
        match flows::connect_wallet(&contract).await {
            Ok(account) => {
                log_activity(&mut log, LogLevel::Success, &format!("Connected {account}"));
                refresh_wallet(wallet).await;
            }
            Err(e) => {
                tracing::error!("Failed to connect wallet: {e}");
                log_activity(&mut log, LogLevel::Error, &e.to_string());
                on_error.call(e.to_string());
            }
        }
        connecting.set(false);
    };

    rsx! {
        button {
            class: "{class}",
            disabled: connecting(),
            onclick: onclick,
            if connecting() {
                "Connecting..."
            } else {
                "{label}"
            }
        }
    }
}
