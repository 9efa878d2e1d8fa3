use std::sync::Arc;

use moneta_ledger::{AccountStore, TransactionLog, TransactionProcessor};

/// Shared service handles injected into every handler.
///
/// One account store and one processor for the whole process; the processor
/// holds the only transaction log, so every handler sees the same ledger.
#[derive(Debug)]
pub struct AppServices {
    pub accounts: Arc<AccountStore>,
    pub processor: Arc<TransactionProcessor>,
}

/// Wire up the in-memory ledger services.
pub fn build_services() -> AppServices {
    let accounts = Arc::new(AccountStore::new());
    let log = Arc::new(TransactionLog::new());
    let processor = Arc::new(TransactionProcessor::new(Arc::clone(&accounts), log));

    AppServices {
        accounts,
        processor,
    }
}
