//! Ledger client abstraction.

mod mock;
mod rpc;
mod traits;

pub use mock::{LedgerCall, MockLedger};
pub use rpc::RpcLedger;
pub use traits::{GameLedger, LedgerError, TxHandle};
