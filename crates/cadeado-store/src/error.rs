//! Error types for store implementations

/// Communication failures a store implementation may surface.
///
/// Contention is never an error: `LockStore` reports it through the boolean
/// results. These variants cover the store being unreachable or answering
/// outside its protocol.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store protocol error: {0}")]
    Protocol(String),
}
