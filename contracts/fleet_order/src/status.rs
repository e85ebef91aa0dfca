use soroban_sdk::{contracttype, log, vec, Env, IntoVal, Map, Symbol, Vec};

use crate::error::Error;
use crate::storage::{Storage, Unit, MAX_BULK_STATUS_UPDATE};

/// Lifecycle of a pre-ordered vehicle. Codes are single bits so off-chain
/// indexers can OR them into masks.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum UnitStatus {
    Init = 1,
    Shipped = 2,
    Arrived = 4,
    Cleared = 8,
    Registered = 16,
    Assigned = 32,
    Transferred = 64,
}

impl UnitStatus {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(UnitStatus::Init),
            2 => Some(UnitStatus::Shipped),
            4 => Some(UnitStatus::Arrived),
            8 => Some(UnitStatus::Cleared),
            16 => Some(UnitStatus::Registered),
            32 => Some(UnitStatus::Assigned),
            64 => Some(UnitStatus::Transferred),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    /// The single status a unit may move to next.
    pub fn successor(self) -> Option<Self> {
        match self {
            UnitStatus::Init => Some(UnitStatus::Shipped),
            UnitStatus::Shipped => Some(UnitStatus::Arrived),
            UnitStatus::Arrived => Some(UnitStatus::Cleared),
            UnitStatus::Cleared => Some(UnitStatus::Registered),
            UnitStatus::Registered => Some(UnitStatus::Assigned),
            UnitStatus::Assigned => Some(UnitStatus::Transferred),
            UnitStatus::Transferred => None,
        }
    }

    pub fn can_transition_to(self, target: UnitStatus) -> bool {
        self.successor() == Some(target)
    }
}

pub struct StatusMachine;

impl StatusMachine {
    /// Move every unit in `unit_ids` to `status_code`, or none of them.
    ///
    /// Batch shape is checked first (size, duplicates, code), then every
    /// unit's transition is validated, and only then are statuses written.
    /// `Shipped` is not a valid bulk target; `close_container` owns that step.
    pub fn apply_bulk(env: &Env, unit_ids: &Vec<u32>, status_code: u32) -> Result<UnitStatus, Error> {
        if unit_ids.is_empty() {
            return Err(Error::EmptyBatch);
        }
        if unit_ids.len() > MAX_BULK_STATUS_UPDATE {
            return Err(Error::BatchTooLarge);
        }

        let mut seen: Map<u32, bool> = Map::new(env);
        for unit_id in unit_ids.iter() {
            if seen.contains_key(unit_id) {
                return Err(Error::DuplicateUnit);
            }
            seen.set(unit_id, true);
        }

        let target = UnitStatus::from_code(status_code).ok_or(Error::InvalidStatusCode)?;
        // Units only ship when their container closes
        if target == UnitStatus::Shipped {
            return Err(Error::InvalidTransition);
        }

        let staged = Self::stage(env, unit_ids.iter(), target)?;
        Self::commit(env, &staged, target);

        log!(env, "bulk status update", unit_ids.len(), status_code);
        Ok(target)
    }

    /// Load and validate units against `target` without writing anything.
    pub fn stage(
        env: &Env,
        unit_ids: impl Iterator<Item = u32>,
        target: UnitStatus,
    ) -> Result<Vec<Unit>, Error> {
        let mut staged = Vec::new(env);
        for unit_id in unit_ids {
            let unit = Storage::unit(env, unit_id)?;
            Self::check_transition(env, &unit, target)?;
            staged.push_back(unit);
        }
        Ok(staged)
    }

    pub fn commit(env: &Env, staged: &Vec<Unit>, target: UnitStatus) {
        for mut unit in staged.iter() {
            unit.status = target;
            Storage::set_unit(env, &unit);
        }
    }

    pub fn check_transition(env: &Env, unit: &Unit, target: UnitStatus) -> Result<(), Error> {
        if !unit.status.can_transition_to(target) {
            return Err(Error::InvalidTransition);
        }

        // Hand-over waits until the yield contract has paid out the lock period
        if target == UnitStatus::Transferred {
            let paid = Self::distributed_payment_count(env, unit.id)?;
            if paid < unit.lock_period {
                return Err(Error::LockPeriodNotReached);
            }
        }
        Ok(())
    }

    fn distributed_payment_count(env: &Env, unit_id: u32) -> Result<u32, Error> {
        let yield_source = Storage::yield_source(env)?;
        Ok(env.invoke_contract::<u32>(
            &yield_source,
            &Symbol::new(env, "distributed_payment_count"),
            vec![env, unit_id.into_val(env)],
        ))
    }
}
