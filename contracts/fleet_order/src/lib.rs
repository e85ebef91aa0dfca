#![no_std]

mod access;
mod admin;
mod allocation;
mod container;
mod error;
mod events;
mod lock;
mod orders;
mod ownership;
mod pricing;
mod status;
mod storage;
mod validation;


use access::Access;
use admin::Admin;
use container::ContainerLifecycle;
use events::StatusUpdatedEvent;
use orders::Orders;
use ownership::OwnershipIndex;
use status::StatusMachine;
use storage::Storage;

pub use error::Error;
pub use status::UnitStatus;
pub use storage::{
    Capability, ClosedContainer, Container, FleetConfig, FractionLeg, OrderCost, Unit,
    FRACTIONS_PER_UNIT, MAX_BULK_STATUS_UPDATE, MAX_FULL_UNITS_PER_ORDER,
};

use soroban_sdk::{contract, contractimpl, Address, Env, String, Symbol, Vec};

#[contract]
pub struct FleetOrder;

#[contractimpl]
impl FleetOrder {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the order book
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidConfig`: fraction_price must be positive
    pub fn initialize(
        env: Env,
        admin: Address,
        treasury: Address,
        payment_token: Address,
        compliance: Address,
        yield_source: Address,
        fraction_price: i128,
    ) -> Result<(), Error> {
        Admin::initialize(
            &env,
            &admin,
            &treasury,
            &payment_token,
            &compliance,
            &yield_source,
            fraction_price,
        )
    }

    /// Grant a capability (admin only)
    pub fn grant_role(env: Env, capability: Capability, account: Address) -> Result<(), Error> {
        Admin::grant_role(&env, capability, &account)
    }

    /// Revoke a capability (admin only)
    pub fn revoke_role(env: Env, capability: Capability, account: Address) -> Result<(), Error> {
        Admin::revoke_role(&env, capability, &account)
    }

    /// Suspend order intake
    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        Admin::set_paused(&env, &caller, true)
    }

    /// Resume order intake
    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        Admin::set_paused(&env, &caller, false)
    }

    // ============================================
    // CONFIGURATION (locked while a container holds units)
    // ============================================

    pub fn set_fraction_price(env: Env, caller: Address, price: i128) -> Result<(), Error> {
        Admin::set_fraction_price(&env, &caller, price)
    }

    pub fn set_fee_bps(env: Env, caller: Address, fee_bps: u32) -> Result<(), Error> {
        Admin::set_fee_bps(&env, &caller, fee_bps)
    }

    pub fn set_expected_values(
        env: Env,
        caller: Address,
        protocol: i128,
        liquidity_provider: i128,
    ) -> Result<(), Error> {
        Admin::set_expected_values(&env, &caller, protocol, liquidity_provider)
    }

    pub fn set_lock_period(env: Env, caller: Address, lock_period: u32) -> Result<(), Error> {
        Admin::set_lock_period(&env, &caller, lock_period)
    }

    pub fn set_container_capacity(env: Env, caller: Address, capacity: u32) -> Result<(), Error> {
        Admin::set_container_capacity(&env, &caller, capacity)
    }

    pub fn set_max_units_per_holder(env: Env, caller: Address, max: u32) -> Result<(), Error> {
        Admin::set_max_units_per_holder(&env, &caller, max)
    }

    // ============================================
    // ORDERS
    // ============================================

    /// Buy whole units; returns the new unit ids
    ///
    /// # Errors
    /// - `ContractPaused`: intake suspended
    /// - `InvalidAmount` / `ExceedsOrderLimit`: count outside 1..=MAX_FULL_UNITS_PER_ORDER
    /// - `NotEligible`: receiver fails the compliance gate
    /// - `ContainerFull` / `ExceedsHolderLimit`: ceilings would be exceeded
    /// - `InsufficientFunds`: buyer can't cover price + fee
    pub fn order_full(
        env: Env,
        buyer: Address,
        receiver: Address,
        count: u32,
    ) -> Result<Vec<u32>, Error> {
        Orders::order_full(&env, &buyer, &receiver, count)
    }

    /// Buy fractions; returns one leg, or two when the order seals a unit
    ///
    /// # Errors
    /// Same as `order_full`, with `InvalidAmount` for amounts outside 1..FRACTIONS_PER_UNIT
    pub fn order_fraction(
        env: Env,
        buyer: Address,
        receiver: Address,
        amount: u32,
    ) -> Result<Vec<FractionLeg>, Error> {
        Orders::order_fraction(&env, &buyer, &receiver, amount)
    }

    /// Move fractions of one unit between holders
    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        unit_id: u32,
        amount: u32,
    ) -> Result<(), Error> {
        Orders::transfer(&env, &from, &to, unit_id, amount)
    }

    pub fn quote_fractions(env: Env, amount: u32) -> Result<OrderCost, Error> {
        Orders::quote(&env, amount)
    }

    pub fn quote_full(env: Env, count: u32) -> Result<OrderCost, Error> {
        let fractions = count
            .checked_mul(FRACTIONS_PER_UNIT)
            .ok_or(Error::Overflow)?;
        Orders::quote(&env, fractions)
    }

    // ============================================
    // STATUS
    // ============================================

    /// Advance many units to `status` atomically
    ///
    /// # Errors
    /// - `Unauthorized`: caller lacks the Status capability
    /// - `EmptyBatch` / `BatchTooLarge` / `DuplicateUnit`: malformed batch
    /// - `InvalidStatusCode`: not a single-bit status
    /// - `UnitNotFound` / `InvalidTransition` / `LockPeriodNotReached`: some unit can't move
    pub fn set_bulk_status(
        env: Env,
        caller: Address,
        unit_ids: Vec<u32>,
        status: u32,
    ) -> Result<(), Error> {
        Access::require_capability(&env, &caller, Capability::Status)?;
        StatusMachine::apply_bulk(&env, &unit_ids, status)?;

        env.events().publish(
            (Symbol::new(&env, "status_updated"), status),
            StatusUpdatedEvent { unit_ids, status },
        );
        Ok(())
    }

    // ============================================
    // CONTAINERS
    // ============================================

    /// Start the next production round; intake stays paused until `unpause`
    pub fn open_next_container(env: Env, caller: Address) -> Result<Container, Error> {
        Access::require_capability(&env, &caller, Capability::Container)?;
        ContainerLifecycle::open_next(&env)
    }

    /// Close the full round, label its units and mark them Shipped
    pub fn close_container(
        env: Env,
        caller: Address,
        batch_id: String,
        labels: Vec<String>,
    ) -> Result<ClosedContainer, Error> {
        Access::require_capability(&env, &caller, Capability::Container)?;
        ContainerLifecycle::close(&env, batch_id, labels)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn get_unit(env: Env, unit_id: u32) -> Result<Unit, Error> {
        Storage::unit(&env, unit_id)
    }

    pub fn unit_status(env: Env, unit_id: u32) -> Result<UnitStatus, Error> {
        Ok(Storage::unit(&env, unit_id)?.status)
    }

    pub fn unit_label(env: Env, unit_id: u32) -> Option<String> {
        Storage::unit_label(&env, unit_id)
    }

    pub fn balance_of(env: Env, holder: Address, unit_id: u32) -> u32 {
        Storage::balance(&env, unit_id, &holder)
    }

    pub fn units_of(env: Env, holder: Address) -> Vec<u32> {
        OwnershipIndex::units_of(&env, &holder)
    }

    pub fn holders_of(env: Env, unit_id: u32) -> Vec<Address> {
        OwnershipIndex::holders_of(&env, unit_id)
    }

    /// True when both index directions record the pair
    pub fn owns(env: Env, holder: Address, unit_id: u32) -> bool {
        OwnershipIndex::contains(&env, &holder, unit_id)
            && OwnershipIndex::has_holder(&env, unit_id, &holder)
    }

    pub fn pool_shares(env: Env, holder: Address) -> u64 {
        Storage::pool_shares(&env, &holder)
    }

    pub fn total_pool_shares(env: Env) -> u64 {
        Storage::total_pool_shares(&env)
    }

    /// Unit currently accepting fractions, if any
    pub fn open_unit(env: Env) -> Option<u32> {
        Storage::open_unit(&env)
    }

    pub fn last_unit_id(env: Env) -> u32 {
        Storage::last_unit_id(&env)
    }

    pub fn get_container(env: Env) -> Result<Container, Error> {
        Storage::container(&env)
    }

    pub fn get_closed_container(env: Env, index: u32) -> Option<ClosedContainer> {
        ContainerLifecycle::closed(&env, index)
    }

    pub fn get_config(env: Env) -> Result<FleetConfig, Error> {
        Storage::config(&env)
    }

    pub fn is_authorized(env: Env, account: Address, capability: Capability) -> Result<bool, Error> {
        Access::is_authorized(&env, &account, capability)
    }

    pub fn is_paused(env: Env) -> bool {
        Storage::is_paused(&env)
    }

    pub fn fractions_per_unit() -> u32 {
        FRACTIONS_PER_UNIT
    }
}
