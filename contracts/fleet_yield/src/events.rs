use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub struct DistributedEvent {
    pub unit_id: u32,
    pub payer: Address,
    pub amount: i128,
    pub count: u32,
}
