//! Persistence of the resolver list captured before a switch

use crate::models::DnsServerList;
use crate::utils::StoreError;

/// Durable home of the single "previous DNS" entry
///
/// Written by connect, read by disconnect, never deleted automatically.
pub trait DnsStateStore: Send + Sync {
    /// Saved list, or `None` if nothing was ever saved
    fn load_previous(&self) -> Result<Option<DnsServerList>, StoreError>;

    /// Replace the saved list
    fn save_previous(&self, servers: &DnsServerList) -> Result<(), StoreError>;
}
