//! Error type shared by every contract backend and page flow.
//!
//! The `Display` output of [`RegistryError`] is exactly what the pages put in
//! their error banner, so wallet and revert messages are passed through
//! untouched.

use crate::abi::AbiError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No EIP-1193 provider is injected into the page.
    #[error("Please install MetaMask to use this application")]
    NoWallet,

    /// The wallet returned no accounts.
    #[error("No wallet account is connected")]
    NoAccount,

    /// A form or precondition check failed before anything was sent.
    #[error("{0}")]
    Validation(String),

    #[error("Land with this address does not exist")]
    LandNotFound,

    /// An error raised by the wallet or its RPC transport.
    #[error("{0}")]
    Provider(String),

    #[error("execution reverted: {0}")]
    TransactionReverted(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error(transparent)]
    Abi(#[from] AbiError),
}

impl RegistryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
