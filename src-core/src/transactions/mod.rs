pub mod categorizer;
pub mod transactions_constants;
pub mod transactions_model;
pub mod transactions_repository;
pub mod transactions_service;
pub mod transactions_traits;

pub use categorizer::categorize;
pub use transactions_model::{
    CategorySummary, DateRange, NewTransaction, Transaction, TransactionCategory,
    TransactionFilters, TransactionType, TransactionUpdate,
};
pub use transactions_repository::TransactionRepository;
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
