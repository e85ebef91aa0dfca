use soroban_sdk::{Address, Env, Symbol};

use crate::access::Access;
use crate::container::ContainerLifecycle;
use crate::error::Error;
use crate::events::ConfigUpdatedEvent;
use crate::storage::{
    Capability, Container, DataKey, FleetConfig, Storage, DEFAULT_CONTAINER_CAPACITY,
    DEFAULT_LOCK_PERIOD, DEFAULT_MAX_UNITS_PER_HOLDER,
};
use crate::validation::Validator;

pub struct Admin;

impl Admin {
    /// Wire collaborators, seed the config and open the first container.
    pub fn initialize(
        env: &Env,
        admin: &Address,
        treasury: &Address,
        payment_token: &Address,
        compliance: &Address,
        yield_source: &Address,
        fraction_price: i128,
    ) -> Result<(), Error> {
        if Storage::is_initialized(env) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();
        Validator::validate_price(fraction_price)?;

        let config = FleetConfig {
            fraction_price,
            fee_bps: 0,
            protocol_expected_value: 0,
            lp_expected_value: 0,
            lock_period: DEFAULT_LOCK_PERIOD,
            container_capacity: DEFAULT_CONTAINER_CAPACITY,
            max_units_per_holder: DEFAULT_MAX_UNITS_PER_HOLDER,
        };
        let container = Container {
            index: 1,
            capacity: config.container_capacity,
            units: 0,
            first_unit_id: 1,
            closed: false,
        };

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, admin);
        env.storage().instance().set(&DataKey::Treasury, treasury);
        env.storage()
            .instance()
            .set(&DataKey::PaymentToken, payment_token);
        env.storage().instance().set(&DataKey::Compliance, compliance);
        env.storage()
            .instance()
            .set(&DataKey::YieldSource, yield_source);
        Storage::set_config(env, &config);
        Storage::set_container(env, &container);
        Storage::set_paused(env, false);

        Ok(())
    }

    pub fn grant_role(env: &Env, capability: Capability, account: &Address) -> Result<(), Error> {
        Access::require_admin(env)?;
        Access::grant(env, capability, account);
        Ok(())
    }

    pub fn revoke_role(env: &Env, capability: Capability, account: &Address) -> Result<(), Error> {
        Access::require_admin(env)?;
        Access::revoke(env, capability, account);
        Ok(())
    }

    pub fn set_paused(env: &Env, caller: &Address, paused: bool) -> Result<(), Error> {
        Access::require_capability(env, caller, Capability::Container)?;
        Storage::set_paused(env, paused);
        Ok(())
    }

    pub fn set_fraction_price(env: &Env, caller: &Address, price: i128) -> Result<(), Error> {
        Validator::validate_price(price)?;
        Self::update_config(env, caller, "fraction_price", |config| {
            config.fraction_price = price;
        })
    }

    pub fn set_fee_bps(env: &Env, caller: &Address, fee_bps: u32) -> Result<(), Error> {
        Validator::validate_fee_bps(fee_bps)?;
        Self::update_config(env, caller, "fee_bps", |config| {
            config.fee_bps = fee_bps;
        })
    }

    pub fn set_expected_values(
        env: &Env,
        caller: &Address,
        protocol: i128,
        liquidity_provider: i128,
    ) -> Result<(), Error> {
        Validator::validate_expected_values(protocol, liquidity_provider)?;
        Self::update_config(env, caller, "expected_values", |config| {
            config.protocol_expected_value = protocol;
            config.lp_expected_value = liquidity_provider;
        })
    }

    pub fn set_lock_period(env: &Env, caller: &Address, lock_period: u32) -> Result<(), Error> {
        Validator::validate_positive(lock_period)?;
        Self::update_config(env, caller, "lock_period", |config| {
            config.lock_period = lock_period;
        })
    }

    pub fn set_max_units_per_holder(env: &Env, caller: &Address, max: u32) -> Result<(), Error> {
        Validator::validate_positive(max)?;
        Self::update_config(env, caller, "max_units_per_holder", |config| {
            config.max_units_per_holder = max;
        })
    }

    /// Also re-snapshots the (empty) current container.
    pub fn set_container_capacity(env: &Env, caller: &Address, capacity: u32) -> Result<(), Error> {
        Validator::validate_positive(capacity)?;
        Self::update_config(env, caller, "container_capacity", |config| {
            config.container_capacity = capacity;
        })?;

        let mut container = Storage::container(env)?;
        if !container.closed {
            container.capacity = capacity;
            Storage::set_container(env, &container);
        }
        Ok(())
    }

    fn update_config<F>(env: &Env, caller: &Address, field: &str, apply: F) -> Result<(), Error>
    where
        F: FnOnce(&mut FleetConfig),
    {
        Access::require_capability(env, caller, Capability::Configure)?;
        ContainerLifecycle::ensure_config_unlocked(env)?;

        let mut config = Storage::config(env)?;
        apply(&mut config);
        Storage::set_config(env, &config);

        env.events().publish(
            (Symbol::new(env, "config_updated"), caller.clone()),
            ConfigUpdatedEvent {
                field: Symbol::new(env, field),
                updated_by: caller.clone(),
            },
        );
        Ok(())
    }
}
