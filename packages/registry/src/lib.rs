pub mod abi;
pub mod calls;
pub mod config;
pub mod contract;
pub mod error;
pub mod flows;
pub mod models;
pub mod units;

mod memory;
pub use memory::MemoryRegistry;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod eip1193;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use eip1193::Eip1193Registry;

pub use config::RegistryConfig;
pub use contract::{RegistryContract, RegistryResult};
pub use error::RegistryError;
pub use models::{
    Address, HistoryEvent, Land, LandDetails, LandId, LandListing, LandPurchased, LandRegistered,
    OwnedLand, Party, TxHash, User, UserRegistration, Wei,
};
