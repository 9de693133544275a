//! Driving port for moving funds between accounts addressed by number.

use async_trait::async_trait;

use crate::domain::{Error, TransferRequest, User};

/// Both documents after a successful transfer.
///
/// When source and destination are the same user both fields hold the same
/// document.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferOutcome {
    /// Source owner after the debit.
    pub source: User,
    /// Destination owner after the credit.
    pub destination: User,
}

/// Domain use-case port for transfers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransferCommand: Send + Sync {
    /// Debit `request.from` in `source` and credit `request.to` in
    /// `destination`.
    async fn transfer(
        &self,
        request: TransferRequest,
        source: User,
        destination: User,
    ) -> Result<TransferOutcome, Error>;
}
