pub mod abi;
pub mod config;
pub mod error;
pub mod ledger;
pub mod model;
pub mod rpc;
pub mod units;
pub mod workflow;

pub use config::*;
pub use error::*;
pub use ledger::*;
pub use model::*;
pub use workflow::*;
