use soroban_sdk::{token, Address, Env, Symbol, Vec};

use crate::access::Access;
use crate::allocation::{plan_fraction, Allocator, OpenUnit};
use crate::container::ContainerLifecycle;
use crate::error::Error;
use crate::events::{FractionsTransferredEvent, OrderPaidEvent};
use crate::lock::ExecutionLock;
use crate::ownership::OwnershipIndex;
use crate::pricing::calculate_order_cost;
use crate::storage::{FractionLeg, OrderCost, Storage, FRACTIONS_PER_UNIT};
use crate::validation::Validator;

pub struct Orders;

impl Orders {
    /// Buy `count` whole units for `receiver`.
    pub fn order_full(
        env: &Env,
        buyer: &Address,
        receiver: &Address,
        count: u32,
    ) -> Result<Vec<u32>, Error> {
        Access::check_not_paused(env)?;
        Validator::validate_full_count(count)?;
        Validator::validate_receiver(env, receiver)?;

        buyer.require_auth();
        Access::require_eligible(env, receiver)?;

        let config = Storage::config(env)?;
        let mut container = Storage::container(env)?;

        ContainerLifecycle::ensure_room(&container, count)?;
        Validator::validate_holder_units(
            OwnershipIndex::unit_count(env, receiver),
            count,
            config.max_units_per_holder,
        )?;

        let fractions = count
            .checked_mul(FRACTIONS_PER_UNIT)
            .ok_or(Error::Overflow)?;
        let cost = calculate_order_cost(fractions, config.fraction_price, config.fee_bps)
            .ok_or(Error::Overflow)?;

        let _lock = ExecutionLock::acquire(env)?;
        Self::settle(env, buyer, receiver, fractions, &cost)?;

        let unit_ids = Allocator::allocate_full(env, receiver, count, &config, &mut container)?;
        Storage::credit_pool_shares(env, receiver, fractions as u64)?;
        Storage::set_container(env, &container);

        Ok(unit_ids)
    }

    /// Buy `amount` fractions for `receiver`, filling the open unit first.
    pub fn order_fraction(
        env: &Env,
        buyer: &Address,
        receiver: &Address,
        amount: u32,
    ) -> Result<Vec<FractionLeg>, Error> {
        Access::check_not_paused(env)?;
        Validator::validate_fraction_amount(amount)?;
        Validator::validate_receiver(env, receiver)?;

        buyer.require_auth();
        Access::require_eligible(env, receiver)?;

        let config = Storage::config(env)?;
        let mut container = Storage::container(env)?;

        let open = match Storage::open_unit(env) {
            Some(unit_id) => {
                let unit = Storage::unit(env, unit_id)?;
                Some(OpenUnit {
                    unit_id,
                    fractions_issued: unit.fractions_issued,
                })
            }
            None => None,
        };
        let plan = plan_fraction(open, amount, FRACTIONS_PER_UNIT);

        ContainerLifecycle::ensure_room(&container, plan.new_units())?;

        let joins_existing = match plan.existing_unit() {
            Some(unit_id) if !OwnershipIndex::contains(env, receiver, unit_id) => 1,
            _ => 0,
        };
        Validator::validate_holder_units(
            OwnershipIndex::unit_count(env, receiver),
            plan.new_units() + joins_existing,
            config.max_units_per_holder,
        )?;

        let cost = calculate_order_cost(amount, config.fraction_price, config.fee_bps)
            .ok_or(Error::Overflow)?;

        let _lock = ExecutionLock::acquire(env)?;
        Self::settle(env, buyer, receiver, amount, &cost)?;

        let legs = Allocator::allocate_fraction(env, receiver, plan, &config, &mut container)?;
        Storage::credit_pool_shares(env, receiver, amount as u64)?;
        Storage::set_container(env, &container);

        Ok(legs)
    }

    /// Move fractions between holders, keeping both index directions in step.
    ///
    /// # Errors
    /// - `InvalidAmount`: amount is zero
    /// - `InvalidReceiver`: sending to self or to this contract
    /// - `UnitNotFound`: unit doesn't exist
    /// - `InsufficientBalance`: sender holds fewer fractions
    /// - `NotEligible`: receiver fails the compliance gate
    /// - `ExceedsHolderLimit`: receiver would own too many units
    pub fn transfer(
        env: &Env,
        from: &Address,
        to: &Address,
        unit_id: u32,
        amount: u32,
    ) -> Result<(), Error> {
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }
        if from == to {
            return Err(Error::InvalidReceiver);
        }
        Validator::validate_receiver(env, to)?;

        from.require_auth();

        Storage::unit(env, unit_id)?;

        let from_balance = Storage::balance(env, unit_id, from);
        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }

        Access::require_eligible(env, to)?;

        let to_balance = Storage::balance(env, unit_id, to);
        if to_balance == 0 {
            let config = Storage::config(env)?;
            Validator::validate_holder_units(
                OwnershipIndex::unit_count(env, to),
                1,
                config.max_units_per_holder,
            )?;
        }

        let new_from_balance = from_balance - amount;
        let new_to_balance = to_balance.checked_add(amount).ok_or(Error::Overflow)?;

        if new_from_balance == 0 {
            OwnershipIndex::remove(env, from, unit_id)?;
        }
        if to_balance == 0 {
            OwnershipIndex::add(env, to, unit_id);
        }
        Storage::set_balance(env, unit_id, from, new_from_balance);
        Storage::set_balance(env, unit_id, to, new_to_balance);

        env.events().publish(
            (Symbol::new(env, "transfer"), unit_id),
            FractionsTransferredEvent {
                unit_id,
                from: from.clone(),
                to: to.clone(),
                amount,
            },
        );

        Ok(())
    }

    pub fn quote(env: &Env, fractions: u32) -> Result<OrderCost, Error> {
        let config = Storage::config(env)?;
        calculate_order_cost(fractions, config.fraction_price, config.fee_bps).ok_or(Error::Overflow)
    }

    /// Pull `cost.total` from the buyer into the treasury.
    fn settle(
        env: &Env,
        buyer: &Address,
        receiver: &Address,
        fractions: u32,
        cost: &OrderCost,
    ) -> Result<(), Error> {
        let payment_token = Storage::payment_token(env)?;
        let treasury = Storage::treasury(env)?;
        let client = token::Client::new(env, &payment_token);

        if client.balance(buyer) < cost.total {
            return Err(Error::InsufficientFunds);
        }
        client.transfer(buyer, &treasury, &cost.total);

        env.events().publish(
            (Symbol::new(env, "order_paid"), buyer.clone()),
            OrderPaidEvent {
                buyer: buyer.clone(),
                receiver: receiver.clone(),
                fractions,
                price: cost.price,
                fee: cost.fee,
            },
        );
        Ok(())
    }
}
