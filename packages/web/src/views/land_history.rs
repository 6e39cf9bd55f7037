//! Search a land by its physical address and show its ownership history.

use dioxus::prelude::*;
use registry::{
    flows::{self, LandHistory as History},
    units::{address_prefix, format_ether, format_timestamp},
    HistoryEvent, LandDetails,
};
use ui::{icons::FaMagnifyingGlass, make_registry, use_activity_log, Icon, PageCard, StatusBanners};

use super::report_error;

#[component]
pub fn LandHistory() -> Element {
    let mut query = use_signal(String::new);
    let mut searching = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut result = use_signal(|| Option::<History>::None);
    let mut log = use_activity_log();

    let search = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            result.set(None);
            searching.set(true);

            let contract = make_registry();
            match flows::land_history(&contract, &query()).await {
                Ok(history) => result.set(Some(history)),
                Err(e) => error.set(Some(report_error(&mut log, "Land history", &e))),
            }
            searching.set(false);
        });
    };

    rsx! {
        PageCard {
            title: "Land Ownership History",
            wide: true,

            form {
                class: "search-form",
                onsubmit: search,
                input {
                    class: "input",
                    r#type: "text",
                    placeholder: "Enter land address",
                    required: true,
                    value: query(),
                    oninput: move |evt: FormEvent| query.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: searching(),
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                    if searching() { " Searching..." } else { " Search" }
                }
            }

            StatusBanners { error: error(), success: None::<String> }

            if let Some(history) = result() {
                DetailsPanel { details: history.details.clone() }
                h2 { "Ownership History" }
                if history.events.is_empty() {
                    p { class: "empty-state", "No ownership transfer history found." }
                } else {
                    table {
                        class: "table striped",
                        thead {
                            tr {
                                th { "Type" }
                                th { "Date" }
                                th { "Details" }
                            }
                        }
                        tbody {
                            for (i, event) in history.events.iter().enumerate() {
                                tr {
                                    key: "{i}",
                                    td {
                                        span {
                                            class: if matches!(event, HistoryEvent::Registration { .. }) { "pill pill--green" } else { "pill pill--blue" },
                                            "{event.kind()}"
                                        }
                                    }
                                    td { "{format_timestamp(event.timestamp())}" }
                                    td { "{event_details(event)}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn DetailsPanel(details: LandDetails) -> Element {
    rsx! {
        div {
            class: "details-grid",
            div {
                h2 { "Land Details" }
                p { span { class: "details-label", "ID: " } "{details.id}" }
                p { span { class: "details-label", "Address: " } "{details.address_of_land}" }
                p { span { class: "details-label", "Area: " } "{details.area} sq m" }
                p { span { class: "details-label", "Registered On: " } "{details.registry_date_and_time}" }
                p {
                    span { class: "details-label", "Status: " }
                    if details.is_for_sale { "For Sale ({details.price} ETH)" } else { "Not For Sale" }
                }
            }
            div {
                h2 { "Current Owner" }
                p { span { class: "details-label", "Name: " } "{details.owner.name}" }
                p { span { class: "details-label", "Address: " } "{details.owner.address}" }
                h2 { "Registered By" }
                p { span { class: "details-label", "Name: " } "{details.registered_by.name}" }
                p { span { class: "details-label", "Address: " } "{details.registered_by.address}" }
            }
        }
    }
}

fn event_details(event: &HistoryEvent) -> String {
    match event {
        HistoryEvent::Registration { registered_by, .. } => {
            format!("Registered by {}", address_prefix(registered_by, 8))
        }
        HistoryEvent::Purchase {
            old_owner,
            new_owner,
            price,
            ..
        } => format!(
            "Transferred from {} to {} for {} ETH",
            address_prefix(old_owner, 8),
            address_prefix(new_owner, 8),
            format_ether(*price)
        ),
    }
}
