#![no_std]

mod error;
mod events;
mod storage;

use events::EligibilityChangedEvent;
use storage::DataKey;

pub use error::Error;

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

/// Eligibility registry consulted before any fraction is allocated or
/// transferred to an account.
#[contract]
pub struct FleetCompliance;

#[contractimpl]
impl FleetCompliance {
    /// Initialize the registry
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);

        Ok(())
    }

    /// Allow `verifier` to flag accounts
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn add_verifier(env: Env, verifier: Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        env.storage()
            .instance()
            .set(&DataKey::Verifier(verifier), &true);

        Ok(())
    }

    /// Remove a verifier
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn remove_verifier(env: Env, verifier: Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        env.storage()
            .instance()
            .remove(&DataKey::Verifier(verifier));

        Ok(())
    }

    /// Flag or unflag an account
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is neither admin nor verifier
    pub fn set_eligible(
        env: Env,
        caller: Address,
        account: Address,
        eligible: bool,
    ) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;

        caller.require_auth();

        if caller != admin && !Self::is_verifier(env.clone(), caller.clone()) {
            return Err(Error::Unauthorized);
        }

        let key = DataKey::Eligible(account.clone());
        if eligible {
            env.storage().persistent().set(&key, &true);
        } else {
            env.storage().persistent().remove(&key);
        }

        env.events().publish(
            (Symbol::new(&env, "eligibility"), account.clone()),
            EligibilityChangedEvent {
                account,
                eligible,
                changed_by: caller,
            },
        );

        Ok(())
    }

    pub fn is_eligible(env: Env, account: Address) -> bool {
        env.storage()
            .persistent()
            .get::<DataKey, bool>(&DataKey::Eligible(account))
            .unwrap_or(false)
    }

    pub fn is_verifier(env: Env, address: Address) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Verifier(address))
            .unwrap_or(false)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }
}
