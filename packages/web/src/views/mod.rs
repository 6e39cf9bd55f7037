use dioxus::prelude::*;
use registry::RegistryError;
use ui::{log_activity, ActivityLog, LogLevel};

mod home;
pub use home::Home;

mod register_user;
pub use register_user::RegisterUser;

mod register_land;
pub use register_land::RegisterLand;

mod sell_land;
pub use sell_land::SellLand;

mod buy_land;
pub use buy_land::BuyLand;

mod land_history;
pub use land_history::LandHistory;

/// Log a failed page action and return the banner text.
///
/// Form validation is only shown in the banner; wallet and contract failures
/// also go to the activity log.
pub(crate) fn report_error(
    log: &mut Signal<ActivityLog>,
    action: &str,
    error: &RegistryError,
) -> String {
    let message = error.to_string();
    match error {
        RegistryError::Validation(_) | RegistryError::LandNotFound => {
            tracing::debug!("{action}: {message}");
        }
        _ => {
            tracing::error!("{action} failed: {message}");
            log_activity(log, LogLevel::Error, &format!("{action}: {message}"));
        }
    }
    message
}
