//! Lists the connected account's lands with per-land listing controls.

use dioxus::prelude::*;
use registry::{
    flows::{self, MyLands},
    OwnedLand,
};
use ui::{
    icons::FaArrowsRotate, log_submitted, make_registry, use_activity_log, Icon, PageCard, Spinner,
    StatusBanners,
};

use super::report_error;
use crate::Route;

#[component]
pub fn SellLand() -> Element {
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);
    let mut log = use_activity_log();

    let mut lands = use_resource(move || async move {
        let contract = make_registry();
        flows::my_lands(&contract).await
    });

    // Fetch failures go to the banner like any other failed action.
    use_effect(move || {
        if let Some(Err(e)) = &*lands.read() {
            error.set(Some(report_error(&mut log, "Load lands", e)));
        }
    });

    let on_done = move |message: String| {
        error.set(None);
        success.set(Some(message));
        lands.restart();
    };
    let on_error = move |message: String| {
        success.set(None);
        error.set(Some(message));
    };

    rsx! {
        PageCard {
            title: "Sell Land",
            wide: true,

            StatusBanners { error: error(), success: success() }

            div {
                class: "section-header",
                h2 { "Your Lands" }
                button {
                    class: "btn btn-secondary",
                    disabled: !lands.finished(),
                    onclick: move |_| {
                        error.set(None);
                        lands.restart();
                    },
                    Icon { icon: FaArrowsRotate, width: 14, height: 14 }
                    " Refresh"
                }
            }

            match &*lands.read() {
                None => rsx! { Spinner { label: "Loading your lands..." } },
                Some(Err(_)) => rsx! {},
                Some(Ok(mine)) if mine.lands.is_empty() => rsx! {
                    div {
                        class: "empty-state",
                        p { "You don't own any lands yet." }
                        Link { class: "btn-link--primary", to: Route::RegisterLand {}, "Register a new land" }
                    }
                },
                Some(Ok(mine)) => rsx! {
                    table {
                        class: "table striped",
                        thead {
                            tr {
                                th { "ID" }
                                th { "Address" }
                                th { "Area (sq m)" }
                                th { "Registered On" }
                                th { "Status" }
                                th { "Price (ETH)" }
                                th { "Actions" }
                            }
                        }
                        tbody {
                            for (key, land, initial_price) in with_prices(mine) {
                                OwnedLandRow {
                                    key: "{key}",
                                    initial_price,
                                    land,
                                    on_done,
                                    on_error,
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

/// Rows paired with their price input seed. The key changes with the listing
/// state so a row remounts with a fresh input after listing or cancelling.
fn with_prices(mine: &MyLands) -> Vec<(String, OwnedLand, String)> {
    mine.lands
        .iter()
        .map(|land| {
            let price = mine.prices.get(&land.id).cloned().unwrap_or_default();
            (row_key(land), land.clone(), price)
        })
        .collect()
}

fn row_key(land: &OwnedLand) -> String {
    format!("{}-{}", land.id, land.is_for_sale)
}

#[component]
fn OwnedLandRow(
    land: OwnedLand,
    initial_price: String,
    on_done: EventHandler<String>,
    on_error: EventHandler<String>,
) -> Element {
    let mut price = use_signal(|| initial_price);
    let mut processing = use_signal(|| false);
    let mut log = use_activity_log();
    let id = land.id;

    let list = move |_| async move {
        processing.set(true);
        let contract = make_registry();
        match flows::list_land_for_sale(&contract, id, &price()).await {
            Ok(submitted) => {
                log_submitted(&mut log, &submitted);
                on_done.call(submitted.message.to_string());
            }
            Err(e) => on_error.call(report_error(&mut log, "List land", &e)),
        }
        processing.set(false);
    };

    let cancel = move |_| async move {
        processing.set(true);
        let contract = make_registry();
        match flows::cancel_land_sale(&contract, id).await {
            Ok(submitted) => {
                log_submitted(&mut log, &submitted);
                on_done.call(submitted.message.to_string());
            }
            Err(e) => on_error.call(report_error(&mut log, "Cancel sale", &e)),
        }
        processing.set(false);
    };

    rsx! {
        tr {
            td { "{land.id}" }
            td { "{land.address_of_land}" }
            td { "{land.area}" }
            td { "{land.registry_date_and_time}" }
            td {
                if land.is_for_sale {
                    span { class: "pill pill--green", "For Sale" }
                } else {
                    span { class: "pill pill--gray", "Not Listed" }
                }
            }
            td {
                input {
                    class: "input",
                    r#type: "number",
                    step: "0.01",
                    min: "0",
                    placeholder: "Price in ETH",
                    value: price(),
                    disabled: land.is_for_sale || processing(),
                    oninput: move |evt: FormEvent| price.set(evt.value()),
                }
            }
            td {
                if processing() {
                    span { class: "muted", "Processing..." }
                } else if land.is_for_sale {
                    button { class: "btn-link btn-link--danger", onclick: cancel, "Cancel Sale" }
                } else {
                    button { class: "btn-link btn-link--primary", onclick: list, "List For Sale" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn owned(id: u64, is_for_sale: bool, price: &str) -> OwnedLand {
        OwnedLand {
            id,
            address_of_land: format!("Plot {id}"),
            area: 100,
            registry_date_and_time: "1970-01-01 00:16:40 UTC".to_string(),
            is_for_sale,
            price: price.to_string(),
        }
    }

    #[test]
    fn row_key_follows_listing_state() {
        let listed = owned(1, true, "1.5");
        let cancelled = owned(1, false, "0");
        assert_ne!(row_key(&listed), row_key(&cancelled));
    }

    #[test]
    fn cancelled_land_gets_an_empty_price_seed() {
        let mine = MyLands {
            lands: vec![owned(1, false, "0"), owned(2, true, "2")],
            prices: BTreeMap::from([(1, String::new()), (2, "2".to_string())]),
        };
        let rows = with_prices(&mine);
        assert_eq!(rows[0].0, "1-false");
        assert_eq!(rows[0].2, "");
        assert_eq!(rows[1].0, "2-true");
        assert_eq!(rows[1].2, "2");
    }
}
