//! Account badge for the page header.

use dioxus::prelude::*;
use registry::units::short_address;

use crate::icons::{FaCircle, FaWallet};
use crate::wallet::{use_wallet, ConnectWalletButton};
use crate::Icon;

/// Shows the shortened connected account with a green dot, or a connect
/// button when no account is authorised.
#[component]
pub fn WalletIndicator(#[props(default)] on_error: EventHandler<String>) -> Element {
    let wallet = use_wallet();
    let state = wallet();

    if state.loading {
        return rsx! {};
    }

    match state.account {
        Some(account) => rsx! {
            span {
                class: "wallet-indicator",
                title: "{account}",
                Icon { icon: FaWallet, width: 14, height: 14 }
                span { class: "wallet-indicator__account", "{short_address(&account, 6, 4)}" }
                span {
                    class: "wallet-indicator__dot",
                    Icon { icon: FaCircle, width: 10, height: 10 }
                }
            }
        },
        None => rsx! {
            ConnectWalletButton {
                class: "btn btn-primary",
                on_error: on_error,
            }
        },
    }
}
