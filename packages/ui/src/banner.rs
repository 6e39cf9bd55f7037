use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Success,
}

/// A full-width error or success message.
#[component]
pub fn Banner(kind: BannerKind, message: String) -> Element {
    let class = match kind {
        BannerKind::Error => "banner banner--error",
        BannerKind::Success => "banner banner--success",
    };
    rsx! {
        div { class, role: "status", "{message}" }
    }
}

/// The error banner and then the success banner, each only when set.
#[component]
pub fn StatusBanners(error: Option<String>, success: Option<String>) -> Element {
    rsx! {
        if let Some(message) = error {
            Banner { kind: BannerKind::Error, message }
        }
        if let Some(message) = success {
            Banner { kind: BannerKind::Success, message }
        }
    }
}
