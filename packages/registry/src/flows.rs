//! # Page flows
//!
//! One function per page action. Each follows the same shape: check the form,
//! ask the wallet for access, make one or two contract calls in order, then
//! hand back either the data to render or a [`Submitted`] receipt carrying the
//! success banner text. Every failure is returned as a [`RegistryError`] whose
//! message goes straight into the error banner.

use std::collections::BTreeMap;

use crate::contract::{RegistryContract, RegistryResult};
use crate::error::RegistryError;
use crate::models::{
    Address, HistoryEvent, LandDetails, LandId, LandListing, OwnedLand, Party, TxHash,
    UserRegistration, Wei,
};
use crate::units::{format_ether, format_timestamp, parse_ether};

pub const USER_REGISTERED: &str = "User registered successfully!";
pub const LAND_REGISTERED: &str = "Land registered successfully!";
pub const LAND_LISTED: &str = "Land listed for sale successfully!";
pub const SALE_CANCELLED: &str = "Land sale cancelled successfully!";
pub const LAND_PURCHASED: &str = "Land purchased successfully!";

/// A confirmed transaction and the banner text that goes with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submitted {
    pub tx_hash: TxHash,
    pub message: &'static str,
}

/// What the home page shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HomeStatus {
    pub account: Option<Address>,
    pub registered: bool,
    pub land_count: u64,
    /// Set when the account resolved but the contract reads after it failed.
    pub error: Option<String>,
}

/// Register-land form fields, as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LandForm {
    pub address_of_land: String,
    pub area: String,
}

/// Lands owned by the connected account plus the initial price inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MyLands {
    pub lands: Vec<OwnedLand>,
    /// ETH price per land: the listing price if listed, empty otherwise.
    pub prices: BTreeMap<LandId, String>,
}

/// Current record and chronological history of one land.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LandHistory {
    pub details: LandDetails,
    pub events: Vec<HistoryEvent>,
}

async fn signer(contract: &impl RegistryContract) -> RegistryResult<Address> {
    contract
        .request_accounts()
        .await?
        .into_iter()
        .next()
        .ok_or(RegistryError::NoAccount)
}

fn price_text(is_for_sale: bool, price: Wei) -> String {
    if is_for_sale {
        format_ether(price)
    } else {
        "0".to_string()
    }
}

/// Home page status. Uses already-authorised accounts only, so it never
/// prompts the wallet; without a wallet or account it reports "not connected".
/// When the account resolves but the contract reads fail, the account is kept
/// and the failure is carried in [`HomeStatus::error`].
pub async fn home_status(contract: &impl RegistryContract) -> RegistryResult<HomeStatus> {
    let account = match contract.accounts().await {
        Ok(accounts) => accounts.into_iter().next(),
        Err(RegistryError::NoWallet) => None,
        Err(e) => return Err(e),
    };
    let Some(account) = account else {
        return Ok(HomeStatus::default());
    };

    let reads = async {
        let registered = contract.user_exists(&account).await?;
        let land_count = contract.land_count().await?;
        Ok::<_, RegistryError>((registered, land_count))
    };
    match reads.await {
        Ok((registered, land_count)) => Ok(HomeStatus {
            account: Some(account),
            registered,
            land_count,
            error: None,
        }),
        Err(e) => {
            tracing::warn!(%account, error = %e, "failed to read account status");
            Ok(HomeStatus {
                account: Some(account),
                error: Some(e.to_string()),
                ..HomeStatus::default()
            })
        }
    }
}

/// Prompt the wallet for access and return the selected account.
pub async fn connect_wallet(contract: &impl RegistryContract) -> RegistryResult<Address> {
    let account = signer(contract).await?;
    tracing::info!(%account, "wallet connected");
    Ok(account)
}

pub async fn register_user(
    contract: &impl RegistryContract,
    form: &UserRegistration,
) -> RegistryResult<Submitted> {
    if [&form.name, &form.email, &form.phone, &form.aadhar]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err(RegistryError::validation("Please fill in all fields"));
    }

    let account = signer(contract).await?;
    if contract.user_exists(&account).await? {
        return Err(RegistryError::validation("User is already registered"));
    }

    let tx_hash = contract.register_user(&account, form).await?;
    tracing::info!(%account, %tx_hash, "user registered");
    Ok(Submitted {
        tx_hash,
        message: USER_REGISTERED,
    })
}

pub async fn register_land(
    contract: &impl RegistryContract,
    form: &LandForm,
) -> RegistryResult<Submitted> {
    if form.address_of_land.trim().is_empty() || form.area.trim().is_empty() {
        return Err(RegistryError::validation("Please fill in all fields"));
    }
    let area: u64 = form
        .area
        .trim()
        .parse()
        .map_err(|_| RegistryError::validation("Area must be a whole number of square meters"))?;

    let account = signer(contract).await?;
    if !contract.user_exists(&account).await? {
        return Err(RegistryError::validation(
            "You must register as a user before registering land",
        ));
    }

    let tx_hash = contract
        .register_land(&account, &form.address_of_land, area)
        .await?;
    tracing::info!(%account, %tx_hash, area, "land registered");
    Ok(Submitted {
        tx_hash,
        message: LAND_REGISTERED,
    })
}

/// Every land owned by the connected account. A land that fails to load is
/// logged and left out rather than failing the whole page.
pub async fn my_lands(contract: &impl RegistryContract) -> RegistryResult<MyLands> {
    let account = signer(contract).await?;
    if !contract.user_exists(&account).await? {
        return Err(RegistryError::validation("You must register as a user first"));
    }

    let count = contract.land_count().await?;
    let mut mine = MyLands::default();
    for id in 1..=count {
        let land = match contract.lands(id).await {
            Ok(land) => land,
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to fetch land");
                continue;
            }
        };
        if land.owner.user_address != account {
            continue;
        }

        let price = price_text(land.is_for_sale, land.price);
        mine.prices.insert(
            land.land_id,
            if land.is_for_sale { price.clone() } else { String::new() },
        );
        mine.lands.push(OwnedLand {
            id: land.land_id,
            address_of_land: land.address_of_land,
            area: land.area,
            registry_date_and_time: format_timestamp(land.registry_date_and_time),
            is_for_sale: land.is_for_sale,
            price,
        });
    }
    Ok(mine)
}

pub async fn list_land_for_sale(
    contract: &impl RegistryContract,
    id: LandId,
    price: &str,
) -> RegistryResult<Submitted> {
    let price = match parse_ether(price) {
        Ok(wei) if wei > 0 => wei,
        _ => return Err(RegistryError::validation("Please enter a valid price")),
    };

    let account = signer(contract).await?;
    let tx_hash = contract.list_land_for_sale(&account, id, price).await?;
    tracing::info!(id, price, %tx_hash, "land listed for sale");
    Ok(Submitted {
        tx_hash,
        message: LAND_LISTED,
    })
}

pub async fn cancel_land_sale(
    contract: &impl RegistryContract,
    id: LandId,
) -> RegistryResult<Submitted> {
    let account = signer(contract).await?;
    let tx_hash = contract.cancel_land_sale(&account, id).await?;
    tracing::info!(id, %tx_hash, "land sale cancelled");
    Ok(Submitted {
        tx_hash,
        message: SALE_CANCELLED,
    })
}

pub async fn lands_for_sale(contract: &impl RegistryContract) -> RegistryResult<Vec<LandListing>> {
    signer(contract).await?;
    let ids = contract.lands_for_sale().await?;

    let mut listings = Vec::with_capacity(ids.len());
    for id in ids {
        let land = contract.lands(id).await?;
        listings.push(LandListing {
            id: land.land_id,
            address_of_land: land.address_of_land,
            area: land.area,
            owner_address: land.owner.user_address,
            owner_name: land.owner.name,
            price: format_ether(land.price),
            price_wei: land.price,
        });
    }
    Ok(listings)
}

/// Buy a listed land, paying exactly its listing price.
pub async fn buy_land(
    contract: &impl RegistryContract,
    id: LandId,
    price_wei: Wei,
) -> RegistryResult<Submitted> {
    let account = signer(contract).await?;
    if !contract.user_exists(&account).await? {
        return Err(RegistryError::validation(
            "You must register as a user before buying land",
        ));
    }

    let tx_hash = contract.buy_land(&account, id, price_wei).await?;
    tracing::info!(id, price_wei, %tx_hash, "land purchased");
    Ok(Submitted {
        tx_hash,
        message: LAND_PURCHASED,
    })
}

/// Look a land up by its physical address and collect its ownership history,
/// oldest first.
pub async fn land_history(
    contract: &impl RegistryContract,
    address_of_land: &str,
) -> RegistryResult<LandHistory> {
    if address_of_land.trim().is_empty() {
        return Err(RegistryError::validation("Please enter a land address"));
    }

    signer(contract).await?;
    let id = contract.land_exists(address_of_land).await?;
    if id == 0 {
        return Err(RegistryError::LandNotFound);
    }

    let land = contract.lands(id).await?;
    let details = LandDetails {
        id: land.land_id,
        address_of_land: land.address_of_land.clone(),
        area: land.area,
        owner: Party::from(&land.owner),
        registered_by: Party::from(&land.registered_by),
        registry_date_and_time: format_timestamp(land.registry_date_and_time),
        is_for_sale: land.is_for_sale,
        price: price_text(land.is_for_sale, land.price),
    };

    let registrations = contract.land_registered_events(id).await?;
    let purchases = contract.land_purchased_events(id).await?;
    let mut events: Vec<HistoryEvent> = registrations
        .iter()
        .map(HistoryEvent::from)
        .chain(purchases.iter().map(HistoryEvent::from))
        .collect();
    events.sort_by_key(HistoryEvent::timestamp);

    Ok(LandHistory { details, events })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryRegistry;

    const ALICE: Address = Address([0xa1; 20]);
    const BOB: Address = Address([0xb0; 20]);
    const ONE_ETH: Wei = 1_000_000_000_000_000_000;

    fn form(name: &str) -> UserRegistration {
        UserRegistration {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            phone: "555-0100".to_string(),
            aadhar: "1111-2222-3333".to_string(),
        }
    }

    fn land_form(address: &str, area: &str) -> LandForm {
        LandForm {
            address_of_land: address.to_string(),
            area: area.to_string(),
        }
    }

    /// Alice and Bob both registered, Alice owning "Plot 1" and "Plot 2".
    async fn populated() -> MemoryRegistry {
        let registry = MemoryRegistry::with_accounts(vec![ALICE, BOB]);
        registry.connect(BOB);
        register_user(&registry, &form("bob")).await.unwrap();
        registry.connect(ALICE);
        register_user(&registry, &form("alice")).await.unwrap();
        registry.set_time(1_000);
        register_land(&registry, &land_form("Plot 1", "100")).await.unwrap();
        register_land(&registry, &land_form("Plot 2", "250")).await.unwrap();
        registry
    }

    #[tokio::test]
    async fn test_home_status_without_wallet_or_access() {
        let status = home_status(&MemoryRegistry::without_wallet()).await.unwrap();
        assert_eq!(status, HomeStatus::default());

        let status = home_status(&MemoryRegistry::with_accounts(vec![ALICE]))
            .await
            .unwrap();
        assert!(status.account.is_none());
    }

    #[tokio::test]
    async fn test_home_status_connected() {
        let registry = populated().await;
        let status = home_status(&registry).await.unwrap();
        assert_eq!(status.account, Some(ALICE));
        assert!(status.registered);
        assert_eq!(status.land_count, 2);
    }

    #[tokio::test]
    async fn test_home_status_keeps_account_when_reads_fail() {
        let registry = populated().await;
        registry.fail_status_reads();

        let status = home_status(&registry).await.unwrap();
        assert_eq!(status.account, Some(ALICE));
        assert!(!status.registered);
        assert_eq!(status.land_count, 0);
        assert_eq!(status.error.as_deref(), Some("could not decode result data"));
    }

    #[tokio::test]
    async fn test_connect_wallet() {
        let registry = MemoryRegistry::with_accounts(vec![BOB]);
        assert_eq!(connect_wallet(&registry).await.unwrap(), BOB);
        assert_eq!(
            connect_wallet(&MemoryRegistry::without_wallet()).await,
            Err(RegistryError::NoWallet)
        );
        assert!(connect_wallet(&MemoryRegistry::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_register_user_requires_every_field() {
        let registry = MemoryRegistry::with_accounts(vec![ALICE]);
        let mut incomplete = form("alice");
        incomplete.phone = "  ".to_string();
        let err = register_user(&registry, &incomplete).await.unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all fields");
        // Validation happens before the wallet is asked for access.
        assert!(registry.accounts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_user_twice() {
        let registry = MemoryRegistry::with_accounts(vec![ALICE]);
        let submitted = register_user(&registry, &form("alice")).await.unwrap();
        assert_eq!(submitted.message, USER_REGISTERED);

        let err = register_user(&registry, &form("alice")).await.unwrap_err();
        assert_eq!(err.to_string(), "User is already registered");
    }

    #[tokio::test]
    async fn test_register_land_validation() {
        let registry = MemoryRegistry::with_accounts(vec![ALICE]);
        let err = register_land(&registry, &land_form("", "10")).await.unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all fields");

        let err = register_land(&registry, &land_form("Plot", "12.5")).await.unwrap_err();
        assert!(matches!(err, RegistryError::Validation(_)));

        let err = register_land(&registry, &land_form("Plot", "10")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "You must register as a user before registering land"
        );
    }

    #[tokio::test]
    async fn test_register_land_accepts_zero_area() {
        let registry = populated().await;
        register_land(&registry, &land_form("Easement", "0")).await.unwrap();
        assert_eq!(registry.lands(3).await.unwrap().area, 0);
    }

    #[tokio::test]
    async fn test_duplicate_land_surfaces_revert() {
        let registry = populated().await;
        let err = register_land(&registry, &land_form("Plot 1", "5")).await.unwrap_err();
        assert!(matches!(err, RegistryError::TransactionReverted(_)));
    }

    #[tokio::test]
    async fn test_my_lands_lists_only_owned() {
        let registry = populated().await;
        registry.connect(BOB);
        register_land(&registry, &land_form("Plot 3", "80")).await.unwrap();

        registry.connect(ALICE);
        list_land_for_sale(&registry, 2, "1.5").await.unwrap();

        let mine = my_lands(&registry).await.unwrap();
        let ids: Vec<LandId> = mine.lands.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(mine.lands[0].price, "0");
        assert_eq!(mine.lands[0].registry_date_and_time, "1970-01-01 00:16:40 UTC");
        assert_eq!(mine.lands[1].price, "1.5");
        assert_eq!(mine.prices[&1], "");
        assert_eq!(mine.prices[&2], "1.5");
    }

    #[tokio::test]
    async fn test_my_lands_skips_unreadable_land() {
        let registry = populated().await;
        registry.fail_land(1);

        let mine = my_lands(&registry).await.unwrap();
        let ids: Vec<LandId> = mine.lands.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2]);
        assert!(!mine.prices.contains_key(&1));
    }

    #[tokio::test]
    async fn test_my_lands_requires_registration() {
        let registry = MemoryRegistry::with_accounts(vec![ALICE]);
        let err = my_lands(&registry).await.unwrap_err();
        assert_eq!(err.to_string(), "You must register as a user first");
    }

    #[tokio::test]
    async fn test_list_rejects_bad_prices() {
        let registry = populated().await;
        for bad in ["", "0", "0.0", "-2", "abc"] {
            let err = list_land_for_sale(&registry, 1, bad).await.unwrap_err();
            assert_eq!(err.to_string(), "Please enter a valid price", "input {bad:?}");
        }
    }

    #[tokio::test]
    async fn test_list_and_cancel() {
        let registry = populated().await;
        let listed = list_land_for_sale(&registry, 1, "2").await.unwrap();
        assert_eq!(listed.message, LAND_LISTED);
        assert_eq!(registry.lands(1).await.unwrap().price, 2 * ONE_ETH);

        let cancelled = cancel_land_sale(&registry, 1).await.unwrap();
        assert_eq!(cancelled.message, SALE_CANCELLED);
        assert!(!registry.lands(1).await.unwrap().is_for_sale);
    }

    #[tokio::test]
    async fn test_non_owner_cannot_list() {
        let registry = populated().await;
        registry.connect(BOB);
        let err = list_land_for_sale(&registry, 1, "1").await.unwrap_err();
        assert!(matches!(err, RegistryError::TransactionReverted(_)));
    }

    #[tokio::test]
    async fn test_buy_listed_land() {
        let registry = populated().await;
        list_land_for_sale(&registry, 2, "0.75").await.unwrap();

        registry.connect(BOB);
        let listings = lands_for_sale(&registry).await.unwrap();
        assert_eq!(listings.len(), 1);
        let listing = &listings[0];
        assert_eq!(listing.id, 2);
        assert_eq!(listing.owner_name, "alice");
        assert_eq!(listing.price, "0.75");

        let bought = buy_land(&registry, listing.id, listing.price_wei).await.unwrap();
        assert_eq!(bought.message, LAND_PURCHASED);
        assert!(lands_for_sale(&registry).await.unwrap().is_empty());
        assert_eq!(registry.lands(2).await.unwrap().owner.user_address, BOB);
        assert_eq!(registry.balance_of(&ALICE), listing.price_wei);
    }

    #[tokio::test]
    async fn test_unregistered_buyer_is_refused() {
        let registry = populated().await;
        list_land_for_sale(&registry, 1, "1").await.unwrap();
        let carol = Address([0xc0; 20]);
        registry.connect(carol);
        let err = buy_land(&registry, 1, ONE_ETH).await.unwrap_err();
        assert_eq!(err.to_string(), "You must register as a user before buying land");
    }

    #[tokio::test]
    async fn test_land_history_in_order() {
        let registry = populated().await;
        list_land_for_sale(&registry, 1, "1").await.unwrap();
        registry.connect(BOB);
        registry.set_time(3_000);
        buy_land(&registry, 1, ONE_ETH).await.unwrap();

        let history = land_history(&registry, "Plot 1").await.unwrap();
        assert_eq!(history.details.id, 1);
        assert_eq!(history.details.owner.name, "bob");
        assert_eq!(history.details.registered_by.name, "alice");
        assert_eq!(history.details.price, "0");

        let kinds: Vec<&str> = history.events.iter().map(HistoryEvent::kind).collect();
        assert_eq!(kinds, vec!["Registration", "Purchase"]);
        assert_eq!(history.events[1].timestamp(), 3_000);
    }

    #[tokio::test]
    async fn test_land_history_sorts_events_by_time() {
        let registry = populated().await;
        list_land_for_sale(&registry, 1, "1").await.unwrap();
        registry.connect(BOB);
        // A purchase stamped before the registration it follows.
        registry.set_time(500);
        buy_land(&registry, 1, ONE_ETH).await.unwrap();

        let history = land_history(&registry, "Plot 1").await.unwrap();
        let times: Vec<u64> = history.events.iter().map(HistoryEvent::timestamp).collect();
        assert_eq!(times, vec![500, 1_000]);
        assert_eq!(history.events[0].kind(), "Purchase");
    }

    #[tokio::test]
    async fn test_land_history_keeps_order_of_simultaneous_events() {
        // Every event shares the registration time.
        let registry = populated().await;
        list_land_for_sale(&registry, 1, "1").await.unwrap();
        registry.connect(BOB);
        buy_land(&registry, 1, ONE_ETH).await.unwrap();
        list_land_for_sale(&registry, 1, "2").await.unwrap();
        registry.connect(ALICE);
        buy_land(&registry, 1, 2 * ONE_ETH).await.unwrap();

        let history = land_history(&registry, "Plot 1").await.unwrap();
        let sellers: Vec<Address> = history
            .events
            .iter()
            .filter_map(|event| match event {
                HistoryEvent::Purchase { old_owner, .. } => Some(*old_owner),
                HistoryEvent::Registration { .. } => None,
            })
            .collect();
        assert_eq!(history.events[0].kind(), "Registration");
        assert_eq!(sellers, vec![ALICE, BOB]);
    }

    #[tokio::test]
    async fn test_land_history_lookup_errors() {
        let registry = populated().await;
        let err = land_history(&registry, "   ").await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter a land address");

        let err = land_history(&registry, "Nowhere").await.unwrap_err();
        assert_eq!(err, RegistryError::LandNotFound);
        assert_eq!(err.to_string(), "Land with this address does not exist");
    }
}
