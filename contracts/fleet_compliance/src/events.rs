use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EligibilityChangedEvent {
    pub account: Address,
    pub eligible: bool,
    pub changed_by: Address,
}
