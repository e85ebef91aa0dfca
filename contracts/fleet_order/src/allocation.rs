use soroban_sdk::{log, Address, Env, Symbol, Vec};

use crate::error::Error;
use crate::events::{FractionsIssuedEvent, UnitCreatedEvent};
use crate::ownership::OwnershipIndex;
use crate::pricing::calculate_unit_value;
use crate::status::UnitStatus;
use crate::storage::{Container, FleetConfig, FractionLeg, Storage, Unit, FRACTIONS_PER_UNIT};

/// The unit currently accepting fractions, as seen by the planner.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OpenUnit {
    pub unit_id: u32,
    pub fractions_issued: u32,
}

/// How a fraction order lands on units.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FractionPlan {
    /// Open a fresh unit holding all of `amount`
    OpenNew { amount: u32 },
    /// Credit `amount` to the open unit
    TopUp { unit_id: u32, amount: u32 },
    /// Seal the open unit with `sealing` and open a fresh one holding `overflow`
    Split {
        unit_id: u32,
        sealing: u32,
        overflow: u32,
    },
}

impl FractionPlan {
    /// Units this plan creates.
    pub fn new_units(&self) -> u32 {
        match self {
            FractionPlan::OpenNew { .. } | FractionPlan::Split { .. } => 1,
            FractionPlan::TopUp { .. } => 0,
        }
    }

    /// Existing unit this plan credits, if any.
    pub fn existing_unit(&self) -> Option<u32> {
        match self {
            FractionPlan::OpenNew { .. } => None,
            FractionPlan::TopUp { unit_id, .. } | FractionPlan::Split { unit_id, .. } => {
                Some(*unit_id)
            }
        }
    }
}

/// Decide where `amount` fractions go. At most one unit is open at a time;
/// an order either tops it up or seals it and opens exactly one more.
pub fn plan_fraction(open: Option<OpenUnit>, amount: u32, capacity: u32) -> FractionPlan {
    let open = match open {
        Some(open) => open,
        None => return FractionPlan::OpenNew { amount },
    };

    let remaining = capacity.saturating_sub(open.fractions_issued);
    if remaining == 0 {
        FractionPlan::OpenNew { amount }
    } else if amount <= remaining {
        FractionPlan::TopUp {
            unit_id: open.unit_id,
            amount,
        }
    } else {
        FractionPlan::Split {
            unit_id: open.unit_id,
            sealing: remaining,
            overflow: amount - remaining,
        }
    }
}

pub struct Allocator;

impl Allocator {
    /// Create `count` full units for `receiver`. Each carries one indivisible
    /// share and leaves the open-unit cursor alone.
    pub fn allocate_full(
        env: &Env,
        receiver: &Address,
        count: u32,
        config: &FleetConfig,
        container: &mut Container,
    ) -> Result<Vec<u32>, Error> {
        let mut unit_ids = Vec::new(env);
        for _ in 0..count {
            let unit_id = Self::create_unit(env, config, container, 1, false)?;
            Self::credit(env, receiver, unit_id, 1)?;
            unit_ids.push_back(unit_id);
        }
        Ok(unit_ids)
    }

    /// Execute a fraction plan and move the open-unit cursor.
    pub fn allocate_fraction(
        env: &Env,
        receiver: &Address,
        plan: FractionPlan,
        config: &FleetConfig,
        container: &mut Container,
    ) -> Result<Vec<FractionLeg>, Error> {
        let mut legs = Vec::new(env);

        match plan {
            FractionPlan::OpenNew { amount } => {
                let unit_id = Self::create_unit(env, config, container, amount, true)?;
                Self::credit(env, receiver, unit_id, amount)?;
                Storage::set_open_unit(env, Self::still_open(amount, unit_id));
                legs.push_back(FractionLeg { unit_id, amount });
            }
            FractionPlan::TopUp { unit_id, amount } => {
                let issued = Self::issue(env, unit_id, amount)?;
                Self::credit(env, receiver, unit_id, amount)?;
                Storage::set_open_unit(env, Self::still_open(issued, unit_id));
                legs.push_back(FractionLeg { unit_id, amount });
            }
            FractionPlan::Split {
                unit_id,
                sealing,
                overflow,
            } => {
                Self::issue(env, unit_id, sealing)?;
                Self::credit(env, receiver, unit_id, sealing)?;
                legs.push_back(FractionLeg {
                    unit_id,
                    amount: sealing,
                });

                let next_id = Self::create_unit(env, config, container, overflow, true)?;
                Self::credit(env, receiver, next_id, overflow)?;
                Storage::set_open_unit(env, Self::still_open(overflow, next_id));
                legs.push_back(FractionLeg {
                    unit_id: next_id,
                    amount: overflow,
                });

                log!(env, "fraction order split", unit_id, sealing, next_id, overflow);
            }
        }

        Ok(legs)
    }

    fn still_open(issued: u32, unit_id: u32) -> Option<u32> {
        if issued < FRACTIONS_PER_UNIT {
            Some(unit_id)
        } else {
            None
        }
    }

    /// Register a new unit in `container`, snapshotting valuation from `config`.
    fn create_unit(
        env: &Env,
        config: &FleetConfig,
        container: &mut Container,
        fractions: u32,
        is_fractioned: bool,
    ) -> Result<u32, Error> {
        let unit_id = Storage::last_unit_id(env)
            .checked_add(1)
            .ok_or(Error::Overflow)?;
        let initial_value =
            calculate_unit_value(config.fraction_price, FRACTIONS_PER_UNIT).ok_or(Error::Overflow)?;

        let unit = Unit {
            id: unit_id,
            container: container.index,
            fractions_issued: fractions,
            is_fractioned,
            status: UnitStatus::Init,
            initial_value,
            protocol_expected_value: config.protocol_expected_value,
            lp_expected_value: config.lp_expected_value,
            lock_period: config.lock_period,
            fraction_price: config.fraction_price,
            fee_bps: config.fee_bps,
            created_at: env.ledger().timestamp(),
        };

        Storage::set_unit(env, &unit);
        Storage::set_last_unit_id(env, unit_id);
        container.units = container.units.checked_add(1).ok_or(Error::Overflow)?;

        env.events().publish(
            (Symbol::new(env, "unit_created"), unit_id),
            UnitCreatedEvent {
                unit_id,
                container: container.index,
                is_fractioned,
            },
        );

        Ok(unit_id)
    }

    /// Raise `fractions_issued` on an existing unit; returns the new total.
    fn issue(env: &Env, unit_id: u32, amount: u32) -> Result<u32, Error> {
        let mut unit = Storage::unit(env, unit_id)?;
        let issued = unit
            .fractions_issued
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        if issued > FRACTIONS_PER_UNIT {
            return Err(Error::InvalidAmount);
        }

        unit.fractions_issued = issued;
        Storage::set_unit(env, &unit);
        Ok(issued)
    }

    /// Add fractions to a holder's balance, indexing the pair on first credit.
    pub fn credit(env: &Env, receiver: &Address, unit_id: u32, amount: u32) -> Result<(), Error> {
        let balance = Storage::balance(env, unit_id, receiver);
        let new_balance = balance.checked_add(amount).ok_or(Error::Overflow)?;

        if balance == 0 {
            OwnershipIndex::add(env, receiver, unit_id);
        }
        Storage::set_balance(env, unit_id, receiver, new_balance);

        env.events().publish(
            (Symbol::new(env, "fractions_issued"), unit_id, receiver.clone()),
            FractionsIssuedEvent {
                unit_id,
                receiver: receiver.clone(),
                amount,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAP: u32 = FRACTIONS_PER_UNIT;

    #[test]
    fn test_plan_without_open_unit() {
        assert_eq!(
            plan_fraction(None, 10, CAP),
            FractionPlan::OpenNew { amount: 10 }
        );
    }

    #[test]
    fn test_plan_tops_up_when_room() {
        let open = OpenUnit {
            unit_id: 4,
            fractions_issued: 30,
        };
        assert_eq!(
            plan_fraction(Some(open), 20, CAP),
            FractionPlan::TopUp {
                unit_id: 4,
                amount: 20
            }
        );
    }

    #[test]
    fn test_plan_splits_overflow() {
        let open = OpenUnit {
            unit_id: 1,
            fractions_issued: 45,
        };
        let plan = plan_fraction(Some(open), 15, CAP);

        assert_eq!(
            plan,
            FractionPlan::Split {
                unit_id: 1,
                sealing: 5,
                overflow: 10
            }
        );
        assert_eq!(plan.new_units(), 1);
        assert_eq!(plan.existing_unit(), Some(1));
    }

    #[test]
    fn test_plan_seals_with_remaining_room() {
        let open = OpenUnit {
            unit_id: 3,
            fractions_issued: 40,
        };
        assert_eq!(
            plan_fraction(Some(open), 15, CAP),
            FractionPlan::Split {
                unit_id: 3,
                sealing: 10,
                overflow: 5
            }
        );
    }

    #[test]
    fn test_plan_sealed_unit_opens_new() {
        let open = OpenUnit {
            unit_id: 2,
            fractions_issued: CAP,
        };
        let plan = plan_fraction(Some(open), 1, CAP);

        assert_eq!(plan, FractionPlan::OpenNew { amount: 1 });
        assert_eq!(plan.existing_unit(), None);
    }
}
