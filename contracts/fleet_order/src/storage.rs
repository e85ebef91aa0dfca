use soroban_sdk::{contracttype, Address, Env, String};

use crate::error::Error;
use crate::status::UnitStatus;

// Constants
pub const FRACTIONS_PER_UNIT: u32 = 50;
pub const MAX_FULL_UNITS_PER_ORDER: u32 = 3;
pub const MAX_BULK_STATUS_UPDATE: u32 = 50;
pub const BASIS_POINTS: i128 = 10_000; // 100% = 10,000 basis points

pub const DEFAULT_CONTAINER_CAPACITY: u32 = 20;
pub const DEFAULT_MAX_UNITS_PER_HOLDER: u32 = 100;
pub const DEFAULT_LOCK_PERIOD: u32 = 36;

/// One fractionable vehicle pre-order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Unit {
    /// 1-based, never reused
    pub id: u32,
    /// Container the unit was created in
    pub container: u32,
    /// Fractions issued so far (full orders issue exactly one share)
    pub fractions_issued: u32,
    /// Created through the fractional path
    pub is_fractioned: bool,
    pub status: UnitStatus,
    /// Full-unit price at creation (fraction_price × FRACTIONS_PER_UNIT)
    pub initial_value: i128,
    pub protocol_expected_value: i128,
    pub lp_expected_value: i128,
    /// Distributed payments required before Assigned -> Transferred
    pub lock_period: u32,
    /// Fraction price and fee in force at creation
    pub fraction_price: i128,
    pub fee_bps: u32,
    pub created_at: u64,
}

/// Process-wide settings, frozen while a container holds units.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FleetConfig {
    pub fraction_price: i128,
    pub fee_bps: u32,
    pub protocol_expected_value: i128,
    pub lp_expected_value: i128,
    pub lock_period: u32,
    pub container_capacity: u32,
    pub max_units_per_holder: u32,
}

/// The production round currently taking orders.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Container {
    pub index: u32,
    /// Snapshot of container_capacity taken when the round opened
    pub capacity: u32,
    /// Units created in this round so far
    pub units: u32,
    /// Id the next unit of this round will get if units == 0, else the first one
    pub first_unit_id: u32,
    pub closed: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClosedContainer {
    pub index: u32,
    pub batch_id: String,
    pub first_unit_id: u32,
    pub units: u32,
    pub closed_at: u64,
}

/// One leg of a fraction order: `amount` fractions credited to `unit_id`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FractionLeg {
    pub unit_id: u32,
    pub amount: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderCost {
    pub price: i128,
    pub fee: i128,
    pub total: i128,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Capability {
    /// Price, fee, valuation and capacity setters
    Configure,
    /// Bulk status updates
    Status,
    /// Container open/close, labels, pause
    Container,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Treasury,
    PaymentToken,
    Compliance,
    YieldSource,
    Config,
    Container,
    ClosedContainer(u32),
    LastUnitId,
    OpenUnit,
    Initialized,
    Paused,
    ExecutionLock,
    TotalPoolShares,
    Role(Capability, Address),
    Unit(u32),
    UnitLabel(u32),
    Balance(u32, Address),         // (unit_id, holder)
    PoolShares(Address),
    HolderUnits(Address),          // holder -> Vec<unit_id>
    HolderUnitSlot(Address, u32),  // (holder, unit_id) -> position in HolderUnits
    UnitHolders(u32),              // unit_id -> Vec<holder>
    UnitHolderSlot(u32, Address),  // (unit_id, holder) -> position in UnitHolders
}

pub struct Storage;

impl Storage {
    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    fn address(env: &Env, key: &DataKey) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(key)
            .ok_or(Error::NotInitialized)
    }

    pub fn admin(env: &Env) -> Result<Address, Error> {
        Self::address(env, &DataKey::Admin)
    }

    pub fn treasury(env: &Env) -> Result<Address, Error> {
        Self::address(env, &DataKey::Treasury)
    }

    pub fn payment_token(env: &Env) -> Result<Address, Error> {
        Self::address(env, &DataKey::PaymentToken)
    }

    pub fn compliance(env: &Env) -> Result<Address, Error> {
        Self::address(env, &DataKey::Compliance)
    }

    pub fn yield_source(env: &Env) -> Result<Address, Error> {
        Self::address(env, &DataKey::YieldSource)
    }

    // Config
    pub fn config(env: &Env) -> Result<FleetConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_config(env: &Env, config: &FleetConfig) {
        env.storage().instance().set(&DataKey::Config, config);
    }

    // Container
    pub fn container(env: &Env) -> Result<Container, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Container)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_container(env: &Env, container: &Container) {
        env.storage().instance().set(&DataKey::Container, container);
    }

    // Units
    pub fn last_unit_id(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::LastUnitId)
            .unwrap_or(0)
    }

    pub fn set_last_unit_id(env: &Env, unit_id: u32) {
        env.storage().instance().set(&DataKey::LastUnitId, &unit_id);
    }

    pub fn unit(env: &Env, unit_id: u32) -> Result<Unit, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Unit(unit_id))
            .ok_or(Error::UnitNotFound)
    }

    pub fn set_unit(env: &Env, unit: &Unit) {
        env.storage().persistent().set(&DataKey::Unit(unit.id), unit);
    }

    pub fn open_unit(env: &Env) -> Option<u32> {
        env.storage().instance().get(&DataKey::OpenUnit)
    }

    pub fn set_open_unit(env: &Env, unit_id: Option<u32>) {
        match unit_id {
            Some(id) => env.storage().instance().set(&DataKey::OpenUnit, &id),
            None => env.storage().instance().remove(&DataKey::OpenUnit),
        }
    }

    // Balances
    pub fn balance(env: &Env, unit_id: u32, holder: &Address) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance(unit_id, holder.clone()))
            .unwrap_or(0)
    }

    pub fn set_balance(env: &Env, unit_id: u32, holder: &Address, amount: u32) {
        let key = DataKey::Balance(unit_id, holder.clone());
        if amount == 0 {
            env.storage().persistent().remove(&key);
        } else {
            env.storage().persistent().set(&key, &amount);
        }
    }

    // Pooled shares
    pub fn pool_shares(env: &Env, holder: &Address) -> u64 {
        env.storage()
            .persistent()
            .get(&DataKey::PoolShares(holder.clone()))
            .unwrap_or(0)
    }

    pub fn total_pool_shares(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::TotalPoolShares)
            .unwrap_or(0)
    }

    /// Pooled shares only ever grow; transfers leave them untouched.
    pub fn credit_pool_shares(env: &Env, holder: &Address, amount: u64) -> Result<(), Error> {
        let holder_total = Self::pool_shares(env, holder)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let total = Self::total_pool_shares(env)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        env.storage()
            .persistent()
            .set(&DataKey::PoolShares(holder.clone()), &holder_total);
        env.storage()
            .instance()
            .set(&DataKey::TotalPoolShares, &total);
        Ok(())
    }

    // Labels
    pub fn unit_label(env: &Env, unit_id: u32) -> Option<String> {
        env.storage().persistent().get(&DataKey::UnitLabel(unit_id))
    }

    pub fn set_unit_label(env: &Env, unit_id: u32, label: &String) {
        env.storage()
            .persistent()
            .set(&DataKey::UnitLabel(unit_id), label);
    }

    // Pause
    pub fn is_paused(env: &Env) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Paused)
            .unwrap_or(false)
    }

    pub fn set_paused(env: &Env, paused: bool) {
        env.storage().instance().set(&DataKey::Paused, &paused);
    }
}
