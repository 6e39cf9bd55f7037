//! Marketplace of lands currently listed for sale.

use dioxus::prelude::*;
use registry::{flows, units::short_address, LandListing};
use ui::{
    icons::FaArrowsRotate, log_submitted, make_registry, use_activity_log, Icon, PageCard, Spinner,
    StatusBanners,
};

use super::report_error;

#[component]
pub fn BuyLand() -> Element {
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);
    let mut log = use_activity_log();

    let mut listings = use_resource(move || async move {
        let contract = make_registry();
        flows::lands_for_sale(&contract).await
    });

    use_effect(move || {
        if let Some(Err(e)) = &*listings.read() {
            error.set(Some(report_error(&mut log, "Load listings", e)));
        }
    });

    let on_done = move |message: String| {
        error.set(None);
        success.set(Some(message));
        listings.restart();
    };
    let on_error = move |message: String| {
        success.set(None);
        error.set(Some(message));
    };

    rsx! {
        PageCard {
            title: "Buy Land",
            wide: true,

            StatusBanners { error: error(), success: success() }

            div {
                class: "section-header",
                h2 { "Available Lands" }
                button {
                    class: "btn btn-secondary",
                    disabled: !listings.finished(),
                    onclick: move |_| {
                        error.set(None);
                        listings.restart();
                    },
                    Icon { icon: FaArrowsRotate, width: 14, height: 14 }
                    " Refresh"
                }
            }

            match &*listings.read() {
                None => rsx! { Spinner { label: "Loading available lands..." } },
                Some(Err(_)) => rsx! {},
                Some(Ok(items)) if items.is_empty() => rsx! {
                    div {
                        class: "empty-state",
                        p { "No lands available for sale at the moment." }
                    }
                },
                Some(Ok(items)) => rsx! {
                    div {
                        class: "listing-grid",
                        for (id, listing) in items.iter().map(|l| (l.id, l.clone())) {
                            ListingCard { key: "{id}", listing, on_done, on_error }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ListingCard(
    listing: LandListing,
    on_done: EventHandler<String>,
    on_error: EventHandler<String>,
) -> Element {
    let mut processing = use_signal(|| false);
    let mut log = use_activity_log();
    let id = listing.id;
    let price_wei = listing.price_wei;

    let buy = move |_| async move {
        processing.set(true);
        let contract = make_registry();
        match flows::buy_land(&contract, id, price_wei).await {
            Ok(submitted) => {
                log_submitted(&mut log, &submitted);
                on_done.call(submitted.message.to_string());
            }
            Err(e) => on_error.call(report_error(&mut log, "Buy land", &e)),
        }
        processing.set(false);
    };

    rsx! {
        div {
            class: "listing-card",
            h3 { "{listing.address_of_land}" }
            p { "Land ID: {listing.id}" }
            p { "Area: {listing.area} sq m" }
            p {
                title: "{listing.owner_address}",
                "Owner: {listing.owner_name} ({short_address(&listing.owner_address, 6, 4)})"
            }
            p { class: "listing-price", "{listing.price} ETH" }
            button {
                class: "btn btn-primary btn-block",
                disabled: processing(),
                onclick: buy,
                if processing() { "Processing..." } else { "Buy Now" }
            }
        }
    }
}
