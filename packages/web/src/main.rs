use dioxus::prelude::*;

use views::{BuyLand, Home, LandHistory, RegisterLand, RegisterUser, SellLand};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/register-user")]
    RegisterUser {},
    #[route("/register-land")]
    RegisterLand {},
    #[route("/sell-land")]
    SellLand {},
    #[route("/buy-land")]
    BuyLand {},
    #[route("/land-history")]
    LandHistory {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| Signal::new(ui::ActivityLog::default()));

    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: ui::UI_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ui::WalletProvider {
            Router::<Route> {}
            ui::ActivityLogToggle {}
            ui::ActivityLogPanel {}
        }
    }
}
