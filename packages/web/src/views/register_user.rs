//! Participant registration form.

use dioxus::prelude::*;
use registry::{flows, UserRegistration};
use ui::{
    log_submitted, make_registry, refresh_wallet, registry_config, sleep, use_activity_log,
    use_wallet, PageCard, StatusBanners, TextField,
};

use super::report_error;
use crate::Route;

#[component]
pub fn RegisterUser() -> Element {
    let name = use_signal(String::new);
    let email = use_signal(String::new);
    let phone = use_signal(String::new);
    let aadhar = use_signal(String::new);
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

            let form = UserRegistration {
                name: name(),
                email: email(),
                phone: phone(),
                aadhar: aadhar(),
            };
            let contract = make_registry();
            match flows::register_user(&contract, &form).await {
                Ok(submitted) => {
                    log_submitted(&mut log, &submitted);
                    success.set(Some(submitted.message.to_string()));
                    loading.set(false);
                    refresh_wallet(wallet).await;
                    sleep(registry_config().redirect_delay()).await;
                    nav.push(Route::Home {});
                }
                Err(e) => {
                    error.set(Some(report_error(&mut log, "Register user", &e)));
                    loading.set(false);
                }
            }
        });
    };

    rsx! {
        PageCard {
            title: "Register User",

            StatusBanners { error: error(), success: success() }

            form {
                onsubmit: handle_register,

                TextField {
                    id: "name",
                    label: "Full Name",
                    placeholder: "Enter your full name",
                    value: name,
                }
                TextField {
                    id: "email",
                    label: "Email",
                    input_type: "email",
                    placeholder: "Enter your email",
                    value: email,
                }
                TextField {
                    id: "phone",
                    label: "Phone",
                    input_type: "tel",
                    placeholder: "Enter your phone number",
                    value: phone,
                }
                TextField {
                    id: "aadhar",
                    label: "Aadhar Number",
                    placeholder: "Enter your Aadhar number",
                    value: aadhar,
                }

                button {
                    class: "btn btn-primary btn-block",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Registering..." } else { "Register" }
                }
            }
        }
    }
}
