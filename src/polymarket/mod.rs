pub mod data_client;
pub mod types;

pub use data_client::{DataClient, DataClientError, FetchLimits};
pub use types::{is_valid_address, WalletData};
