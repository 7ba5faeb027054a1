// Application layer - the owned ledger plus its data file, and report rendering.
// The interactive shell talks only to `LedgerService`.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
