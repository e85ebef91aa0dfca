use soroban_sdk::{vec, Address, Env, Symbol};

use crate::error::Error;
use crate::storage::{Capability, DataKey, Storage};

pub struct Access;

impl Access {
    /// Stored admin, after it has authorized the call.
    pub fn require_admin(env: &Env) -> Result<Address, Error> {
        let admin = Storage::admin(env)?;
        admin.require_auth();
        Ok(admin)
    }

    /// `caller` must sign and hold `capability`.
    pub fn require_capability(
        env: &Env,
        caller: &Address,
        capability: Capability,
    ) -> Result<(), Error> {
        caller.require_auth();

        if !Self::is_authorized(env, caller, capability)? {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    /// The admin holds every capability; anyone else needs an explicit grant.
    pub fn is_authorized(env: &Env, account: &Address, capability: Capability) -> Result<bool, Error> {
        if Storage::admin(env)? == *account {
            return Ok(true);
        }
        Ok(env
            .storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Role(capability, account.clone()))
            .unwrap_or(false))
    }

    pub fn grant(env: &Env, capability: Capability, account: &Address) {
        env.storage()
            .instance()
            .set(&DataKey::Role(capability, account.clone()), &true);
    }

    pub fn revoke(env: &Env, capability: Capability, account: &Address) {
        env.storage()
            .instance()
            .remove(&DataKey::Role(capability, account.clone()));
    }

    /// Ask the compliance registry whether `account` may receive fractions.
    pub fn require_eligible(env: &Env, account: &Address) -> Result<(), Error> {
        let compliance = Storage::compliance(env)?;
        let eligible: bool = env.invoke_contract(
            &compliance,
            &Symbol::new(env, "is_eligible"),
            vec![env, account.to_val()],
        );

        if !eligible {
            return Err(Error::NotEligible);
        }
        Ok(())
    }

    pub fn check_not_paused(env: &Env) -> Result<(), Error> {
        if Storage::is_paused(env) {
            return Err(Error::ContractPaused);
        }
        Ok(())
    }
}
