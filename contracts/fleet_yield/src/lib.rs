#![no_std]

mod error;
mod events;
mod storage;

use events::DistributedEvent;
use storage::DataKey;

pub use error::Error;
pub use storage::Distribution;

use soroban_sdk::{contract, contractimpl, token, Address, Env, Symbol};

/// Ledger of rental payouts per unit. The order book reads the payout
/// count to decide when a unit may be handed over.
#[contract]
pub struct FleetYield;

#[contractimpl]
impl FleetYield {
    /// Initialize the yield ledger
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address, payment_token: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::PaymentToken, &payment_token);

        Ok(())
    }

    /// Record one payout for `unit_id`, pulling `amount` from the admin
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: amount must be positive
    pub fn distribute(env: Env, unit_id: u32, amount: i128) -> Result<u32, Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let payment_token: Address = env
            .storage()
            .instance()
            .get(&DataKey::PaymentToken)
            .ok_or(Error::NotInitialized)?;

        let token_client = token::Client::new(&env, &payment_token);
        token_client.transfer(&admin, &env.current_contract_address(), &amount);

        let mut distribution = Self::get_distribution(env.clone(), unit_id);
        distribution.count = distribution.count.checked_add(1).ok_or(Error::Overflow)?;
        distribution.total = distribution
            .total
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        distribution.last_paid_at = env.ledger().timestamp();

        env.storage()
            .persistent()
            .set(&DataKey::Distribution(unit_id), &distribution);

        env.events().publish(
            (Symbol::new(&env, "distributed"), unit_id),
            DistributedEvent {
                unit_id,
                payer: admin,
                amount,
                count: distribution.count,
            },
        );

        Ok(distribution.count)
    }

    /// Number of payouts made for a unit
    pub fn distributed_payment_count(env: Env, unit_id: u32) -> u32 {
        Self::get_distribution(env, unit_id).count
    }

    /// Sum of payouts made for a unit
    pub fn total_distributed(env: Env, unit_id: u32) -> i128 {
        Self::get_distribution(env, unit_id).total
    }

    pub fn get_distribution(env: Env, unit_id: u32) -> Distribution {
        env.storage()
            .persistent()
            .get::<DataKey, Distribution>(&DataKey::Distribution(unit_id))
            .unwrap_or(Distribution {
                count: 0,
                total: 0,
                last_paid_at: 0,
            })
    }
}
