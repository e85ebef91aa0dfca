use soroban_sdk::contracttype;

/// Payments distributed for one unit so far
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Distribution {
    /// Number of distributions made
    pub count: u32,
    /// Sum of all distributed amounts
    pub total: i128,
    /// Ledger timestamp of the latest distribution
    pub last_paid_at: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    PaymentToken,
    Distribution(u32), // unit_id -> Distribution
    Initialized,
}
