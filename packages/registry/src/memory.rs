use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::abi::{self, keccak256};
use crate::contract::{RegistryContract, RegistryResult};
use crate::error::RegistryError;
use crate::models::{
    Address, Land, LandId, LandPurchased, LandRegistered, TxHash, User, UserRegistration, Wei,
};

/// In-memory registry contract and wallet, for tests and native builds.
///
/// Enforces the same rules the deployed contract does and records the same
/// events. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct MemoryRegistry {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    wallet_missing: bool,
    wallet_accounts: Vec<Address>,
    authorized: bool,
    now: u64,
    tx_count: u64,
    users: HashMap<Address, User>,
    lands: BTreeMap<LandId, Land>,
    land_ids: HashMap<String, LandId>,
    balances: HashMap<Address, Wei>,
    registered_events: Vec<LandRegistered>,
    purchased_events: Vec<LandPurchased>,
    failing_lands: BTreeSet<LandId>,
    failing_status_reads: bool,
}

impl State {
    fn next_tx_hash(&mut self) -> TxHash {
        self.tx_count += 1;
        abi::to_hex(&keccak256(&self.tx_count.to_be_bytes()))
    }

    fn registered_user(&self, account: &Address) -> RegistryResult<User> {
        self.users
            .get(account)
            .filter(|u| u.is_registered)
            .cloned()
            .ok_or_else(|| revert("User not registered"))
    }

    fn land_mut(&mut self, id: LandId) -> RegistryResult<&mut Land> {
        self.lands
            .get_mut(&id)
            .ok_or_else(|| revert("Land does not exist"))
    }
}

fn revert(reason: &str) -> RegistryError {
    RegistryError::TransactionReverted(reason.to_string())
}

fn unreadable() -> RegistryError {
    RegistryError::Provider("could not decode result data".to_string())
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page without an injected wallet.
    pub fn without_wallet() -> Self {
        let registry = Self::default();
        registry.lock().wallet_missing = true;
        registry
    }

    /// Wallet holding `accounts`, not yet authorised for this page.
    pub fn with_accounts(accounts: Vec<Address>) -> Self {
        let registry = Self::default();
        registry.lock().wallet_accounts = accounts;
        registry
    }

    /// Make `account` the wallet's selected account and authorise the page.
    pub fn connect(&self, account: Address) {
        let mut state = self.lock();
        state.wallet_accounts.retain(|a| *a != account);
        state.wallet_accounts.insert(0, account);
        state.authorized = true;
    }

    /// Block timestamp used for the next registrations and purchases.
    pub fn set_time(&self, now: u64) {
        self.lock().now = now;
    }

    /// Wei credited to `account` from land sales.
    pub fn balance_of(&self, account: &Address) -> Wei {
        self.lock().balances.get(account).copied().unwrap_or_default()
    }

    /// Make every `lands(id)` read fail as an undecodable node response.
    #[cfg(test)]
    pub(crate) fn fail_land(&self, id: LandId) {
        self.lock().failing_lands.insert(id);
    }

    /// Make `user_exists` and `land_count` fail while accounts still resolve.
    #[cfg(test)]
    pub(crate) fn fail_status_reads(&self) {
        self.lock().failing_status_reads = true;
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wallet(&self) -> RegistryResult<MutexGuard<'_, State>> {
        let state = self.lock();
        if state.wallet_missing {
            return Err(RegistryError::NoWallet);
        }
        Ok(state)
    }
}

impl RegistryContract for MemoryRegistry {
    async fn accounts(&self) -> RegistryResult<Vec<Address>> {
        let state = self.wallet()?;
        Ok(if state.authorized {
            state.wallet_accounts.clone()
        } else {
            Vec::new()
        })
    }

    async fn request_accounts(&self) -> RegistryResult<Vec<Address>> {
        let mut state = self.wallet()?;
        if state.wallet_accounts.is_empty() {
            return Err(RegistryError::Provider("User rejected the request.".into()));
        }
        state.authorized = true;
        Ok(state.wallet_accounts.clone())
    }

    async fn user_exists(&self, account: &Address) -> RegistryResult<bool> {
        let state = self.wallet()?;
        if state.failing_status_reads {
            return Err(unreadable());
        }
        Ok(state
            .users
            .get(account)
            .is_some_and(|u| u.is_registered))
    }

    async fn users(&self, account: &Address) -> RegistryResult<User> {
        Ok(self.wallet()?.users.get(account).cloned().unwrap_or_default())
    }

    async fn land_count(&self) -> RegistryResult<u64> {
        let state = self.wallet()?;
        if state.failing_status_reads {
            return Err(unreadable());
        }
        Ok(state.lands.len() as u64)
    }

    async fn lands(&self, id: LandId) -> RegistryResult<Land> {
        let state = self.wallet()?;
        if state.failing_lands.contains(&id) {
            return Err(unreadable());
        }
        Ok(state.lands.get(&id).cloned().unwrap_or_default())
    }

    async fn land_exists(&self, address_of_land: &str) -> RegistryResult<LandId> {
        Ok(self
            .wallet()?
            .land_ids
            .get(address_of_land)
            .copied()
            .unwrap_or_default())
    }

    async fn lands_for_sale(&self) -> RegistryResult<Vec<LandId>> {
        Ok(self
            .wallet()?
            .lands
            .values()
            .filter(|land| land.is_for_sale)
            .map(|land| land.land_id)
            .collect())
    }

    async fn register_user(
        &self,
        from: &Address,
        registration: &UserRegistration,
    ) -> RegistryResult<TxHash> {
        let mut state = self.wallet()?;
        if state.users.get(from).is_some_and(|u| u.is_registered) {
            return Err(revert("User already registered"));
        }
        state.users.insert(
            *from,
            User {
                user_address: *from,
                name: registration.name.clone(),
                email: registration.email.clone(),
                phone: registration.phone.clone(),
                aadhar: registration.aadhar.clone(),
                is_registered: true,
            },
        );
        Ok(state.next_tx_hash())
    }

    async fn register_land(
        &self,
        from: &Address,
        address_of_land: &str,
        area: u64,
    ) -> RegistryResult<TxHash> {
        let mut state = self.wallet()?;
        let user = state.registered_user(from)?;
        if state.land_ids.contains_key(address_of_land) {
            return Err(revert("Land already registered"));
        }
        let land_id = state.lands.len() as LandId + 1;
        let now = state.now;
        state.lands.insert(
            land_id,
            Land {
                owner: user.clone(),
                address_of_land: address_of_land.to_string(),
                registered_by: user,
                registry_date_and_time: now,
                area,
                land_id,
                is_for_sale: false,
                price: 0,
            },
        );
        state.land_ids.insert(address_of_land.to_string(), land_id);
        state.registered_events.push(LandRegistered {
            land_id,
            owner: *from,
            address_of_land: address_of_land.to_string(),
            registered_by: *from,
            registry_date_and_time: now,
            area,
        });
        Ok(state.next_tx_hash())
    }

    async fn list_land_for_sale(
        &self,
        from: &Address,
        id: LandId,
        price: Wei,
    ) -> RegistryResult<TxHash> {
        let mut state = self.wallet()?;
        let land = state.land_mut(id)?;
        if land.owner.user_address != *from {
            return Err(revert("Only the owner can list the land"));
        }
        if price == 0 {
            return Err(revert("Price must be greater than zero"));
        }
        land.is_for_sale = true;
        land.price = price;
        Ok(state.next_tx_hash())
    }

    async fn cancel_land_sale(&self, from: &Address, id: LandId) -> RegistryResult<TxHash> {
        let mut state = self.wallet()?;
        let land = state.land_mut(id)?;
        if land.owner.user_address != *from {
            return Err(revert("Only the owner can cancel the sale"));
        }
        if !land.is_for_sale {
            return Err(revert("Land is not for sale"));
        }
        land.is_for_sale = false;
        land.price = 0;
        Ok(state.next_tx_hash())
    }

    async fn buy_land(&self, from: &Address, id: LandId, value: Wei) -> RegistryResult<TxHash> {
        let mut state = self.wallet()?;
        let buyer = state.registered_user(from)?;
        let now = state.now;
        let land = state.land_mut(id)?;
        if !land.is_for_sale {
            return Err(revert("Land is not for sale"));
        }
        if land.owner.user_address == *from {
            return Err(revert("You cannot buy your own land"));
        }
        if value != land.price {
            return Err(revert("Incorrect payment amount"));
        }
        let seller = land.owner.user_address;
        land.owner = buyer;
        land.is_for_sale = false;
        land.price = 0;

        *state.balances.entry(seller).or_default() += value;
        state.purchased_events.push(LandPurchased {
            land_id: id,
            old_owner: seller,
            new_owner: *from,
            price: value,
            timestamp: now,
        });
        Ok(state.next_tx_hash())
    }

    async fn land_registered_events(&self, id: LandId) -> RegistryResult<Vec<LandRegistered>> {
        Ok(self
            .wallet()?
            .registered_events
            .iter()
            .filter(|e| e.land_id == id)
            .cloned()
            .collect())
    }

    async fn land_purchased_events(&self, id: LandId) -> RegistryResult<Vec<LandPurchased>> {
        Ok(self
            .wallet()?
            .purchased_events
            .iter()
            .filter(|e| e.land_id == id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: Address = Address([0xa1; 20]);
    const BOB: Address = Address([0xb0; 20]);

    fn registration(name: &str) -> UserRegistration {
        UserRegistration {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            phone: "555-0100".to_string(),
            aadhar: "1111-2222-3333".to_string(),
        }
    }

    async fn with_users() -> MemoryRegistry {
        let registry = MemoryRegistry::new();
        registry.register_user(&ALICE, &registration("alice")).await.unwrap();
        registry.register_user(&BOB, &registration("bob")).await.unwrap();
        registry
    }

    #[tokio::test]
    async fn test_accounts_require_authorisation() {
        let registry = MemoryRegistry::with_accounts(vec![ALICE]);
        assert!(registry.accounts().await.unwrap().is_empty());

        assert_eq!(registry.request_accounts().await.unwrap(), vec![ALICE]);
        assert_eq!(registry.accounts().await.unwrap(), vec![ALICE]);
    }

    #[tokio::test]
    async fn test_missing_wallet() {
        let registry = MemoryRegistry::without_wallet();
        assert_eq!(
            registry.request_accounts().await,
            Err(RegistryError::NoWallet)
        );
        assert_eq!(registry.land_count().await, Err(RegistryError::NoWallet));
    }

    #[tokio::test]
    async fn test_register_user_once() {
        let registry = MemoryRegistry::new();
        registry.register_user(&ALICE, &registration("alice")).await.unwrap();
        assert!(registry.user_exists(&ALICE).await.unwrap());
        assert_eq!(registry.users(&ALICE).await.unwrap().name, "alice");

        let again = registry.register_user(&ALICE, &registration("alice")).await;
        assert!(matches!(again, Err(RegistryError::TransactionReverted(_))));
    }

    #[tokio::test]
    async fn test_register_land_assigns_ids_from_one() {
        let registry = with_users().await;
        registry.set_time(1_000);
        registry.register_land(&ALICE, "Plot 1", 100).await.unwrap();
        registry.register_land(&BOB, "Plot 2", 200).await.unwrap();

        assert_eq!(registry.land_count().await.unwrap(), 2);
        assert_eq!(registry.land_exists("Plot 2").await.unwrap(), 2);
        assert_eq!(registry.land_exists("Plot 9").await.unwrap(), 0);

        let land = registry.lands(1).await.unwrap();
        assert_eq!(land.owner.user_address, ALICE);
        assert_eq!(land.registered_by.name, "alice");
        assert_eq!(land.registry_date_and_time, 1_000);
    }

    #[tokio::test]
    async fn test_register_land_rules() {
        let registry = with_users().await;
        let stranger = Address([0x55; 20]);
        assert!(registry.register_land(&stranger, "Plot 1", 1).await.is_err());

        registry.register_land(&ALICE, "Plot 1", 1).await.unwrap();
        assert!(registry.register_land(&BOB, "Plot 1", 1).await.is_err());
    }

    #[tokio::test]
    async fn test_sale_lifecycle_transfers_ownership() {
        let registry = with_users().await;
        registry.register_land(&ALICE, "Plot 1", 100).await.unwrap();

        assert!(registry.list_land_for_sale(&BOB, 1, 10).await.is_err());
        assert!(registry.list_land_for_sale(&ALICE, 1, 0).await.is_err());
        registry.list_land_for_sale(&ALICE, 1, 10).await.unwrap();
        assert_eq!(registry.lands_for_sale().await.unwrap(), vec![1]);

        assert!(registry.buy_land(&ALICE, 1, 10).await.is_err());
        assert!(registry.buy_land(&BOB, 1, 9).await.is_err());
        registry.set_time(2_000);
        registry.buy_land(&BOB, 1, 10).await.unwrap();

        let land = registry.lands(1).await.unwrap();
        assert_eq!(land.owner.user_address, BOB);
        assert!(!land.is_for_sale);
        assert!(registry.lands_for_sale().await.unwrap().is_empty());
        assert_eq!(registry.balance_of(&ALICE), 10);

        let purchases = registry.land_purchased_events(1).await.unwrap();
        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].old_owner, ALICE);
        assert_eq!(purchases[0].timestamp, 2_000);
    }

    #[tokio::test]
    async fn test_cancel_sale() {
        let registry = with_users().await;
        registry.register_land(&ALICE, "Plot 1", 100).await.unwrap();
        assert!(registry.cancel_land_sale(&ALICE, 1).await.is_err());

        registry.list_land_for_sale(&ALICE, 1, 10).await.unwrap();
        assert!(registry.cancel_land_sale(&BOB, 1).await.is_err());
        registry.cancel_land_sale(&ALICE, 1).await.unwrap();
        assert!(registry.lands_for_sale().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_land_reads_as_zeroed() {
        let registry = MemoryRegistry::new();
        let land = registry.lands(42).await.unwrap();
        assert_eq!(land.land_id, 0);
        assert!(land.owner.user_address.is_zero());
    }

    #[tokio::test]
    async fn test_tx_hashes_are_distinct() {
        let registry = MemoryRegistry::new();
        let a = registry.register_user(&ALICE, &registration("a")).await.unwrap();
        let b = registry.register_user(&BOB, &registration("b")).await.unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("0x"));
    }
}
