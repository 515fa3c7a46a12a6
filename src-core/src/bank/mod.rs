pub mod bank_errors;
pub mod bank_model;
pub mod bank_service;
pub mod bank_traits;
pub mod plaid_client;

pub use bank_errors::BankError;
pub use bank_model::{LinkToken, ProviderAccount, ProviderTransaction, SyncOutcome, TokenExchange};
pub use bank_service::BankService;
pub use bank_traits::BankServiceTrait;
pub use plaid_client::PlaidClient;
