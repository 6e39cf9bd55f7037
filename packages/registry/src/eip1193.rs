//! # Browser wallet backend: EIP-1193 `window.ethereum`
//!
//! [`Eip1193Registry`] is the [`RegistryContract`] implementation used on the
//! **web platform**. Every operation becomes one or more
//! `window.ethereum.request({ method, params })` calls:
//!
//! | Operation | RPC |
//! |-----------|-----|
//! | `accounts` / `request_accounts` | `eth_accounts` / `eth_requestAccounts` |
//! | reads | `eth_call` against `latest` with ABI calldata from [`crate::calls`] |
//! | writes | `eth_sendTransaction`, then `eth_getTransactionReceipt` until mined |
//! | events | `eth_getLogs` from block `0x0`, filtered on event topic and land id |
//!
//! ## Connection management
//!
//! The provider object is looked up on every request rather than cached: the
//! wallet extension can inject it after the app starts, and `JsValue` is not
//! `Send`/`Sync`. A missing provider is reported as
//! [`RegistryError::NoWallet`].
//!
//! ## Errors
//!
//! Wallet errors are objects carrying a `message` (e.g. "User denied
//! transaction signature."); that text is surfaced unchanged as
//! [`RegistryError::Provider`].

use std::time::Duration;

use js_sys::{Function, Object, Promise, Reflect};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::abi::{self, uint_word};
use crate::calls;
use crate::config::RegistryConfig;
use crate::contract::{RegistryContract, RegistryResult};
use crate::error::RegistryError;
use crate::models::{
    Address, Land, LandId, LandPurchased, LandRegistered, TxHash, User, UserRegistration, Wei,
};

#[derive(Serialize)]
struct TransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    to: String,
    data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogFilter {
    address: String,
    topics: Vec<String>,
    from_block: &'static str,
    to_block: &'static str,
}

#[derive(Deserialize)]
struct Receipt {
    status: Option<String>,
}

#[derive(Deserialize)]
struct Log {
    data: String,
    topics: Vec<String>,
}

/// Registry contract reached through the browser wallet.
#[derive(Clone, Debug)]
pub struct Eip1193Registry {
    contract: Address,
    poll_interval: Duration,
}

fn js_error(value: JsValue) -> RegistryError {
    let message = Reflect::get(&value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    RegistryError::Provider(message)
}

fn serde_error(error: serde_wasm_bindgen::Error) -> RegistryError {
    RegistryError::Provider(error.to_string())
}

fn quantity(value: u128) -> String {
    format!("0x{value:x}")
}

impl Eip1193Registry {
    pub fn new(contract: Address, poll_interval: Duration) -> Self {
        Self {
            contract,
            poll_interval,
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.contract.address, config.receipt_poll_interval())
    }

    fn provider() -> RegistryResult<JsValue> {
        let window = web_sys::window().ok_or(RegistryError::NoWallet)?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum"))
            .map_err(|_| RegistryError::NoWallet)?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return Err(RegistryError::NoWallet);
        }
        Ok(ethereum)
    }

    async fn request<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: &P,
    ) -> RegistryResult<R> {
        let ethereum = Self::provider()?;
        let args = Object::new();
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
            .map_err(js_error)?;
        let params = serde_wasm_bindgen::to_value(params).map_err(serde_error)?;
        Reflect::set(&args, &JsValue::from_str("params"), &params).map_err(js_error)?;

        let request: Function = Reflect::get(&ethereum, &JsValue::from_str("request"))
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;
        let promise: Promise = request
            .call1(&ethereum, &args)
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;

        tracing::debug!(method, "wallet request");
        let result = JsFuture::from(promise).await.map_err(js_error)?;
        serde_wasm_bindgen::from_value(result).map_err(serde_error)
    }

    async fn account_list(&self, method: &str) -> RegistryResult<Vec<Address>> {
        let accounts: Vec<String> = self.request(method, &Vec::<String>::new()).await?;
        accounts.iter().map(|a| a.parse()).collect()
    }

    async fn call(&self, data: Vec<u8>) -> RegistryResult<Vec<u8>> {
        let request = TransactionRequest {
            from: None,
            to: self.contract.to_string(),
            data: abi::to_hex(&data),
            value: None,
        };
        let result: String = self.request("eth_call", &(request, "latest")).await?;
        Ok(abi::from_hex(&result)?)
    }

    /// Send a transaction and wait for it to be mined.
    async fn transact(&self, from: &Address, data: Vec<u8>, value: Wei) -> RegistryResult<TxHash> {
        let request = TransactionRequest {
            from: Some(from.to_string()),
            to: self.contract.to_string(),
            data: abi::to_hex(&data),
            value: (value > 0).then(|| quantity(value)),
        };
        let tx_hash: TxHash = self.request("eth_sendTransaction", &[request]).await?;
        tracing::info!(%tx_hash, "transaction submitted");

        loop {
            let receipt: Option<Receipt> = self
                .request("eth_getTransactionReceipt", &[tx_hash.as_str()])
                .await?;
            match receipt {
                Some(receipt) if receipt.status.as_deref() == Some("0x0") => {
                    return Err(RegistryError::TransactionReverted(format!(
                        "transaction {tx_hash} failed"
                    )));
                }
                Some(_) => return Ok(tx_hash),
                None => gloo_timers::future::sleep(self.poll_interval).await,
            }
        }
    }

    async fn logs(&self, event: &str, id: LandId) -> RegistryResult<Vec<Log>> {
        let filter = LogFilter {
            address: self.contract.to_string(),
            topics: vec![
                abi::to_hex(&abi::event_topic(event)),
                abi::to_hex(&uint_word(u128::from(id))),
            ],
            from_block: "0x0",
            to_block: "latest",
        };
        self.request("eth_getLogs", &[filter]).await
    }
}

impl RegistryContract for Eip1193Registry {
    async fn accounts(&self) -> RegistryResult<Vec<Address>> {
        self.account_list("eth_accounts").await
    }

    async fn request_accounts(&self) -> RegistryResult<Vec<Address>> {
        self.account_list("eth_requestAccounts").await
    }

    async fn user_exists(&self, account: &Address) -> RegistryResult<bool> {
        let data = self.call(calls::user_exists(account)).await?;
        Ok(calls::decode_bool(&data)?)
    }

    async fn users(&self, account: &Address) -> RegistryResult<User> {
        let data = self.call(calls::users(account)).await?;
        Ok(calls::decode_user(&data)?)
    }

    async fn land_count(&self) -> RegistryResult<u64> {
        let data = self.call(calls::land_count()).await?;
        Ok(calls::decode_u64(&data)?)
    }

    async fn lands(&self, id: LandId) -> RegistryResult<Land> {
        let data = self.call(calls::lands(id)).await?;
        Ok(calls::decode_land(&data)?)
    }

    async fn land_exists(&self, address_of_land: &str) -> RegistryResult<LandId> {
        let data = self.call(calls::land_exists(address_of_land)).await?;
        Ok(calls::decode_u64(&data)?)
    }

    async fn lands_for_sale(&self) -> RegistryResult<Vec<LandId>> {
        let data = self.call(calls::get_lands_for_sale()).await?;
        Ok(calls::decode_land_ids(&data)?)
    }

    async fn register_user(
        &self,
        from: &Address,
        registration: &UserRegistration,
    ) -> RegistryResult<TxHash> {
        self.transact(from, calls::register_user(registration), 0).await
    }

    async fn register_land(
        &self,
        from: &Address,
        address_of_land: &str,
        area: u64,
    ) -> RegistryResult<TxHash> {
        self.transact(from, calls::register_land(address_of_land, area), 0)
            .await
    }

    async fn list_land_for_sale(
        &self,
        from: &Address,
        id: LandId,
        price: Wei,
    ) -> RegistryResult<TxHash> {
        self.transact(from, calls::list_land_for_sale(id, price), 0).await
    }

    async fn cancel_land_sale(&self, from: &Address, id: LandId) -> RegistryResult<TxHash> {
        self.transact(from, calls::cancel_land_sale(id), 0).await
    }

    async fn buy_land(&self, from: &Address, id: LandId, value: Wei) -> RegistryResult<TxHash> {
        self.transact(from, calls::buy_land(id), value).await
    }

    async fn land_registered_events(&self, id: LandId) -> RegistryResult<Vec<LandRegistered>> {
        let logs = self.logs(calls::LAND_REGISTERED_EVENT, id).await?;
        logs.iter().map(decode_registered).collect()
    }

    async fn land_purchased_events(&self, id: LandId) -> RegistryResult<Vec<LandPurchased>> {
        let logs = self.logs(calls::LAND_PURCHASED_EVENT, id).await?;
        logs.iter().map(decode_purchased).collect()
    }
}

fn land_id_topic(log: &Log) -> RegistryResult<Vec<u8>> {
    let topic = log
        .topics
        .get(1)
        .ok_or_else(|| RegistryError::Provider("log is missing the land id topic".into()))?;
    Ok(abi::from_hex(topic)?)
}

fn decode_registered(log: &Log) -> RegistryResult<LandRegistered> {
    let data = abi::from_hex(&log.data)?;
    Ok(calls::decode_land_registered(&land_id_topic(log)?, &data)?)
}

fn decode_purchased(log: &Log) -> RegistryResult<LandPurchased> {
    let data = abi::from_hex(&log.data)?;
    Ok(calls::decode_land_purchased(&land_id_topic(log)?, &data)?)
}
