/// Custom actions for User records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Blocks or unblocks the account with this customer id.
    SetBlocked { customer_id: String, blocked: bool },
}
