//! Land registration form.

use dioxus::prelude::*;
use registry::flows::{self, LandForm};
use ui::{
    log_submitted, make_registry, refresh_wallet, registry_config, sleep, use_activity_log,
    use_wallet, PageCard, StatusBanners, TextField,
};

use super::report_error;
use crate::Route;

#[component]
pub fn RegisterLand() -> Element {
    let address_of_land = use_signal(String::new);
    let area = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);
    let mut log = use_activity_log();
    let wallet = use_wallet();
    let nav = use_navigator();

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            success.set(None);
            loading.set(true);

            let form = LandForm {
                address_of_land: address_of_land(),
                area: area(),
            };
            let contract = make_registry();
            match flows::register_land(&contract, &form).await {
                Ok(submitted) => {
                    log_submitted(&mut log, &submitted);
                    success.set(Some(submitted.message.to_string()));
                    loading.set(false);
                    // The home page shows the land count.
                    refresh_wallet(wallet).await;
                    sleep(registry_config().redirect_delay()).await;
                    nav.push(Route::Home {});
                }
                Err(e) => {
                    error.set(Some(report_error(&mut log, "Register land", &e)));
                    loading.set(false);
                }
            }
        });
    };

    rsx! {
        PageCard {
            title: "Register Land",

            StatusBanners { error: error(), success: success() }

            form {
                onsubmit: handle_register,

                TextField {
                    id: "addressOfLand",
                    label: "Land Address",
                    placeholder: "Enter the address of the land",
                    value: address_of_land,
                }
                TextField {
                    id: "area",
                    label: "Area (in square meters)",
                    input_type: "number",
                    placeholder: "Enter the area",
                    value: area,
                }

                button {
                    class: "btn btn-primary btn-block",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Registering..." } else { "Register Land" }
                }
            }
        }
    }
}
