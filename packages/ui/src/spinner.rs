use dioxus::prelude::*;

#[component]
pub fn Spinner(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div {
            class: "spinner-block",
            div { class: "spinner" }
            p { class: "spinner-label", "{label}" }
        }
    }
}
