use soroban_sdk::Env;

use crate::error::Error;
use crate::storage::DataKey;

/// Scoped execution lock held across outbound payment calls.
///
/// Acquiring while another guard is alive fails with `Reentrancy`; the flag
/// is cleared when the guard drops, after local state has been written.
pub struct ExecutionLock<'a> {
    env: &'a Env,
}

impl<'a> ExecutionLock<'a> {
    pub fn acquire(env: &'a Env) -> Result<Self, Error> {
        if Self::is_held(env) {
            return Err(Error::Reentrancy);
        }
        env.storage().instance().set(&DataKey::ExecutionLock, &true);
        Ok(Self { env })
    }

    pub fn is_held(env: &Env) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::ExecutionLock)
            .unwrap_or(false)
    }
}

impl Drop for ExecutionLock<'_> {
    fn drop(&mut self) {
        self.env.storage().instance().remove(&DataKey::ExecutionLock);
    }
}
