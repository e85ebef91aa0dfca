use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Verifier(Address),
    Eligible(Address),
    Initialized,
}
