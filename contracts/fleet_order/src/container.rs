use soroban_sdk::{log, Env, String, Symbol, Vec};

use crate::error::Error;
use crate::events::{ContainerClosedEvent, ContainerOpenedEvent};
use crate::status::{StatusMachine, UnitStatus};
use crate::storage::{ClosedContainer, Container, DataKey, Storage};

pub struct ContainerLifecycle;

impl ContainerLifecycle {
    /// Configuration may only change between rounds.
    pub fn ensure_config_unlocked(env: &Env) -> Result<(), Error> {
        let container = Storage::container(env)?;
        if container.units != 0 {
            return Err(Error::ContainerOpen);
        }
        Ok(())
    }

    /// Room for `new_units` more units in the current round.
    pub fn ensure_room(container: &Container, new_units: u32) -> Result<(), Error> {
        if container.closed {
            return Err(Error::ContainerClosed);
        }

        let units = container
            .units
            .checked_add(new_units)
            .ok_or(Error::Overflow)?;
        if units > container.capacity {
            return Err(Error::ContainerFull);
        }
        Ok(())
    }

    /// Start the next round and suspend intake until `unpause`.
    ///
    /// # Errors
    /// - `ContainerNotClosed`: current round still needs labelling
    pub fn open_next(env: &Env) -> Result<Container, Error> {
        let current = Storage::container(env)?;
        if !current.closed {
            return Err(Error::ContainerNotClosed);
        }

        let config = Storage::config(env)?;
        let next = Container {
            index: current.index.checked_add(1).ok_or(Error::Overflow)?,
            capacity: config.container_capacity,
            units: 0,
            first_unit_id: Storage::last_unit_id(env)
                .checked_add(1)
                .ok_or(Error::Overflow)?,
            closed: false,
        };

        Storage::set_container(env, &next);
        Storage::set_paused(env, true);

        env.events().publish(
            (Symbol::new(env, "container_opened"), next.index),
            ContainerOpenedEvent {
                index: next.index,
                capacity: next.capacity,
                first_unit_id: next.first_unit_id,
            },
        );

        Ok(next)
    }

    /// Close a full round: attach one external label per unit (in id order)
    /// and ship every unit of the round.
    ///
    /// # Errors
    /// - `ContainerClosed`: already closed
    /// - `ContainerNotFull`: fewer units than capacity
    /// - `OpenUnitNotSealed`: last fractional unit still accepts fractions
    /// - `LabelCountMismatch`: one label per unit required
    /// - `InvalidTransition`: some unit is no longer in Init
    pub fn close(env: &Env, batch_id: String, labels: Vec<String>) -> Result<ClosedContainer, Error> {
        let mut container = Storage::container(env)?;

        if container.closed {
            return Err(Error::ContainerClosed);
        }
        if container.units < container.capacity {
            return Err(Error::ContainerNotFull);
        }
        if Storage::open_unit(env).is_some() {
            return Err(Error::OpenUnitNotSealed);
        }
        if labels.len() != container.units {
            return Err(Error::LabelCountMismatch);
        }

        let first = container.first_unit_id;
        let end = first.checked_add(container.units).ok_or(Error::Overflow)?;
        let staged = StatusMachine::stage(env, first..end, UnitStatus::Shipped)?;

        StatusMachine::commit(env, &staged, UnitStatus::Shipped);
        for (unit_id, label) in (first..end).zip(labels.iter()) {
            Storage::set_unit_label(env, unit_id, &label);
        }

        container.closed = true;
        Storage::set_container(env, &container);

        let record = ClosedContainer {
            index: container.index,
            batch_id: batch_id.clone(),
            first_unit_id: first,
            units: container.units,
            closed_at: env.ledger().timestamp(),
        };
        env.storage()
            .persistent()
            .set(&DataKey::ClosedContainer(container.index), &record);

        log!(env, "container closed", container.index, container.units);
        env.events().publish(
            (Symbol::new(env, "container_closed"), container.index),
            ContainerClosedEvent {
                index: container.index,
                batch_id,
                first_unit_id: first,
                units: container.units,
            },
        );

        Ok(record)
    }

    pub fn closed(env: &Env, index: u32) -> Option<ClosedContainer> {
        env.storage()
            .persistent()
            .get(&DataKey::ClosedContainer(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(units: u32, capacity: u32, closed: bool) -> Container {
        Container {
            index: 1,
            capacity,
            units,
            first_unit_id: 1,
            closed,
        }
    }

    #[test]
    fn test_room_within_capacity() {
        assert!(ContainerLifecycle::ensure_room(&container(3, 5, false), 2).is_ok());
    }

    #[test]
    fn test_room_exhausted() {
        assert_eq!(
            ContainerLifecycle::ensure_room(&container(5, 5, false), 1),
            Err(Error::ContainerFull)
        );
        // Top-ups need no new unit even when full
        assert!(ContainerLifecycle::ensure_room(&container(5, 5, false), 0).is_ok());
    }

    #[test]
    fn test_closed_container_takes_nothing() {
        assert_eq!(
            ContainerLifecycle::ensure_room(&container(5, 5, true), 0),
            Err(Error::ContainerClosed)
        );
    }
}
