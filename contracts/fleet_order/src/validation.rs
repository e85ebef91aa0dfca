use soroban_sdk::{Address, Env};

use crate::error::Error;
use crate::storage::{BASIS_POINTS, FRACTIONS_PER_UNIT, MAX_FULL_UNITS_PER_ORDER};

pub struct Validator;

impl Validator {
    pub fn validate_fraction_amount(amount: u32) -> Result<(), Error> {
        if amount == 0 || amount >= FRACTIONS_PER_UNIT {
            return Err(Error::InvalidAmount);
        }
        Ok(())
    }

    pub fn validate_full_count(count: u32) -> Result<(), Error> {
        if count == 0 {
            return Err(Error::InvalidAmount);
        }
        if count > MAX_FULL_UNITS_PER_ORDER {
            return Err(Error::ExceedsOrderLimit);
        }
        Ok(())
    }

    /// Fractions can't be parked on this contract.
    pub fn validate_receiver(env: &Env, receiver: &Address) -> Result<(), Error> {
        if *receiver == env.current_contract_address() {
            return Err(Error::InvalidReceiver);
        }
        Ok(())
    }

    pub fn validate_price(price: i128) -> Result<(), Error> {
        if price <= 0 {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }

    pub fn validate_fee_bps(fee_bps: u32) -> Result<(), Error> {
        if fee_bps as i128 >= BASIS_POINTS {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }

    pub fn validate_expected_values(protocol: i128, liquidity_provider: i128) -> Result<(), Error> {
        if protocol < 0 || liquidity_provider < 0 {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }

    pub fn validate_positive(value: u32) -> Result<(), Error> {
        if value == 0 {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }

    /// Per-holder ceiling on distinct units owned.
    pub fn validate_holder_units(current: u32, added: u32, max: u32) -> Result<(), Error> {
        let total = current.checked_add(added).ok_or(Error::Overflow)?;
        if total > max {
            return Err(Error::ExceedsHolderLimit);
        }
        Ok(())
    }
}
