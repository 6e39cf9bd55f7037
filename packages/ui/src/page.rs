use dioxus::prelude::*;

/// Card layout shared by the registry pages, with a "Back to Home" link.
#[component]
pub fn PageCard(
    title: String,
    /// Wide layout for tables and listing grids.
    #[props(default)]
    wide: bool,
    children: Element,
) -> Element {
    rsx! {
        document::Title { "{title} - Land Registry" }
        div {
            class: "page",
            div {
                class: if wide { "page-card page-card--wide" } else { "page-card" },
                h1 { class: "page-title", "{title}" }
                {children}
            }
            div {
                class: "page-footer-link",
                Link { to: "/", "Back to Home" }
            }
        }
    }
}
