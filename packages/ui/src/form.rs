use dioxus::prelude::*;

/// A labelled, required text input bound to a string signal.
#[component]
pub fn TextField(
    id: String,
    label: String,
    value: Signal<String>,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default = "".to_string())] placeholder: String,
) -> Element {
    let mut value = value;
    rsx! {
        div {
            class: "form-field",
            label { r#for: "{id}", "{label}" }
            input {
                id: "{id}",
                class: "input",
                r#type: "{input_type}",
                placeholder: "{placeholder}",
                required: true,
                value: value(),
                oninput: move |evt: FormEvent| value.set(evt.value()),
            }
        }
    }
}
