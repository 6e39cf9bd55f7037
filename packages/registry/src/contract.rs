//! # `RegistryContract`: the land registry as seen through a wallet
//!
//! Every page talks to the registry through this trait, so the same flows run
//! against the browser wallet ([`crate::Eip1193Registry`], wasm only) and the
//! in-memory contract ([`crate::MemoryRegistry`]) used by tests and native
//! builds.
//!
//! Reads resolve against the latest block. Writes are sent from the given
//! account and resolve once the transaction is mined; a reverted transaction
//! is reported as [`RegistryError::TransactionReverted`].

use std::future::Future;

use crate::error::RegistryError;
use crate::models::{
    Address, Land, LandId, LandPurchased, LandRegistered, TxHash, User, UserRegistration, Wei,
};

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Async interface to the wallet and the registry contract.
pub trait RegistryContract {
    /// Accounts the page is already authorised for (`eth_accounts`). Never prompts.
    fn accounts(&self) -> impl Future<Output = RegistryResult<Vec<Address>>>;

    /// Ask the wallet for account access (`eth_requestAccounts`).
    fn request_accounts(&self) -> impl Future<Output = RegistryResult<Vec<Address>>>;

    fn user_exists(&self, account: &Address) -> impl Future<Output = RegistryResult<bool>>;

    fn users(&self, account: &Address) -> impl Future<Output = RegistryResult<User>>;

    fn land_count(&self) -> impl Future<Output = RegistryResult<u64>>;

    /// Absent ids come back as a zeroed record, as a Solidity mapping would.
    fn lands(&self, id: LandId) -> impl Future<Output = RegistryResult<Land>>;

    /// Id registered for a physical address, `0` when there is none.
    fn land_exists(&self, address_of_land: &str) -> impl Future<Output = RegistryResult<LandId>>;

    fn lands_for_sale(&self) -> impl Future<Output = RegistryResult<Vec<LandId>>>;

    fn register_user(
        &self,
        from: &Address,
        registration: &UserRegistration,
    ) -> impl Future<Output = RegistryResult<TxHash>>;

    fn register_land(
        &self,
        from: &Address,
        address_of_land: &str,
        area: u64,
    ) -> impl Future<Output = RegistryResult<TxHash>>;

    fn list_land_for_sale(
        &self,
        from: &Address,
        id: LandId,
        price: Wei,
    ) -> impl Future<Output = RegistryResult<TxHash>>;

    fn cancel_land_sale(
        &self,
        from: &Address,
        id: LandId,
    ) -> impl Future<Output = RegistryResult<TxHash>>;

    /// Payable: `value` wei is sent along with the call.
    fn buy_land(
        &self,
        from: &Address,
        id: LandId,
        value: Wei,
    ) -> impl Future<Output = RegistryResult<TxHash>>;

    fn land_registered_events(
        &self,
        id: LandId,
    ) -> impl Future<Output = RegistryResult<Vec<LandRegistered>>>;

    fn land_purchased_events(
        &self,
        id: LandId,
    ) -> impl Future<Output = RegistryResult<Vec<LandPurchased>>>;
}
