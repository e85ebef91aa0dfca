use soroban_sdk::{contracttype, Address, String, Symbol, Vec};

#[contracttype]
#[derive(Clone, Debug)]
pub struct UnitCreatedEvent {
    pub unit_id: u32,
    pub container: u32,
    pub is_fractioned: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct FractionsIssuedEvent {
    pub unit_id: u32,
    pub receiver: Address,
    pub amount: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct OrderPaidEvent {
    pub buyer: Address,
    pub receiver: Address,
    pub fractions: u32,
    pub price: i128,
    pub fee: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct FractionsTransferredEvent {
    pub unit_id: u32,
    pub from: Address,
    pub to: Address,
    pub amount: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct StatusUpdatedEvent {
    pub unit_ids: Vec<u32>,
    pub status: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ContainerOpenedEvent {
    pub index: u32,
    pub capacity: u32,
    pub first_unit_id: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ContainerClosedEvent {
    pub index: u32,
    pub batch_id: String,
    pub first_unit_id: u32,
    pub units: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ConfigUpdatedEvent {
    pub field: Symbol,
    pub updated_by: Address,
}
