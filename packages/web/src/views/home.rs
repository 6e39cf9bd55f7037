//! Landing page: account status, registry totals and links to every action.

use dioxus::prelude::*;
use ui::{use_wallet, Spinner, StatusBanners, WalletIndicator};

use crate::Route;

#[component]
pub fn Home() -> Element {
    let wallet = use_wallet();
    let mut error = use_signal(|| Option::<String>::None);
    let state = wallet();

    rsx! {
        document::Title { "Land Registry DApp" }
        document::Meta { name: "description", content: "Decentralized Land Registry Application" }

        div {
            class: "home",

            header {
                class: "home-header",
                div {
                    class: "home-header__inner",
                    h1 { class: "home-brand", "Land Registry DApp" }
                    WalletIndicator { on_error: move |message: String| error.set(Some(message)) }
                }
            }

            main {
                class: "home-main",

                StatusBanners { error: error().or(state.error.clone()), success: None::<String> }

                if state.loading {
                    Spinner {}
                } else {
                    div {
                        class: "home-hero",
                        h2 { "Decentralized Land Registry" }
                        p { "Register, buy, sell, and track land ownership securely on the blockchain." }
                    }

                    div {
                        class: "home-stats",
                        div {
                            class: "stat stat--blue",
                            h3 { "Total Registered Lands" }
                            p { "{state.land_count}" }
                        }
                        div {
                            class: "stat stat--green",
                            h3 { "Your Account Status" }
                            p { if state.registered { "Registered" } else { "Not Registered" } }
                        }
                    }

                    div {
                        class: "home-actions",

                        if !state.registered {
                            ActionCard {
                                to: Route::RegisterUser {},
                                title: "Register as User",
                                description: "Create a user profile to access the registry.",
                                cta: "Get Started →",
                            }
                        } else {
                            ActionCard {
                                to: Route::RegisterLand {},
                                title: "Register Land",
                                description: "Add your land property to the blockchain.",
                                cta: "Register Now →",
                            }
                            ActionCard {
                                to: Route::SellLand {},
                                title: "Sell Land",
                                description: "List your registered lands for sale.",
                                cta: "List Property →",
                            }
                            ActionCard {
                                to: Route::BuyLand {},
                                title: "Buy Land",
                                description: "Browse and purchase available lands.",
                                cta: "Explore Market →",
                            }
                        }

                        ActionCard {
                            to: Route::LandHistory {},
                            title: "Land History",
                            description: "View ownership records of any land.",
                            cta: "Search Records →",
                        }
                    }
                }
            }

            footer {
                class: "home-footer",
                div {
                    class: "home-footer__inner",
                    p { "© 2025 Land Registry DApp. All rights reserved." }
                    p { class: "muted", "Built on Ethereum blockchain" }
                }
            }
        }
    }
}

#[component]
fn ActionCard(to: Route, title: String, description: String, cta: String) -> Element {
    rsx! {
        Link {
            class: "action-card",
            to,
            h3 { "{title}" }
            p { "{description}" }
            span { "{cta}" }
        }
    }
}
