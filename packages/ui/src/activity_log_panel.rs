use dioxus::prelude::*;

use crate::activity_log::use_activity_log;
use crate::icons::{FaListUl, FaXmark};
use crate::Icon;

const ACTIVITY_LOG_CSS: Asset = asset!("/assets/activity_log.css");

/// Floating list of this session's wallet activity, newest first.
#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();
    let snapshot = log();

    if !snapshot.open {
        return rsx! {};
    }

    rsx! {
        document::Stylesheet { href: ACTIVITY_LOG_CSS }

        aside {
            class: "activity-panel",
            header {
                class: "activity-panel__header",
                span { "Wallet Activity" }
                button {
                    class: "activity-panel__clear",
                    disabled: snapshot.is_empty(),
                    onclick: move |_| log.write().clear(),
                    "Clear"
                }
                button {
                    class: "activity-panel__close",
                    title: "Close",
                    onclick: move |_| log.write().open = false,
                    Icon { icon: FaXmark, width: 12, height: 12 }
                }
            }
            ol {
                class: "activity-panel__entries",
                if snapshot.is_empty() {
                    li { class: "activity-panel__empty", "No wallet activity yet." }
                }
                for (i, entry) in snapshot.newest_first().enumerate() {
                    li {
                        key: "{snapshot.len() - i}",
                        class: entry.level.css_class(),
                        time { "{entry.time}" }
                        span { " {entry.message}" }
                        if let Some(hash) = &entry.tx_hash {
                            code { class: "activity-entry__tx", title: "{hash}", "{hash}" }
                        }
                    }
                }
            }
        }
    }
}

/// Corner button with the entry count; red once anything has failed.
#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let snapshot = log();
    let count = snapshot.len();

    rsx! {
        document::Stylesheet { href: ACTIVITY_LOG_CSS }
        button {
            class: if snapshot.has_errors() { "activity-toggle activity-toggle--errors" } else { "activity-toggle" },
            title: "Wallet activity",
            onclick: move |_| {
                let open = log.peek().open;
                log.write().open = !open;
            },
            Icon { icon: FaListUl, width: 14, height: 14 }
            if count > 0 {
                span { class: "activity-toggle__count", "{count}" }
            }
        }
    }
}
