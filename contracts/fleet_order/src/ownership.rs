use soroban_sdk::{Address, Env, IntoVal, TryFromVal, Val, Vec};

use crate::error::Error;
use crate::storage::DataKey;

/// Bidirectional ownership index: holder -> units and unit -> holders.
///
/// Each direction is a list plus a slot map (value -> position in the list),
/// so add, remove and membership are O(1). Both directions are always
/// updated together; there is no way to touch one side alone.
pub struct OwnershipIndex;

impl OwnershipIndex {
    /// Record `holder` as an owner of `unit_id`. Adding a pair that is
    /// already present is a no-op.
    pub fn add(env: &Env, holder: &Address, unit_id: u32) {
        if Self::contains(env, holder, unit_id) {
            return;
        }

        let holder_key = holder.clone();
        insert(
            env,
            &DataKey::HolderUnits(holder.clone()),
            |id: &u32| DataKey::HolderUnitSlot(holder_key.clone(), *id),
            unit_id,
        );
        insert(
            env,
            &DataKey::UnitHolders(unit_id),
            |h: &Address| DataKey::UnitHolderSlot(unit_id, h.clone()),
            holder.clone(),
        );
    }

    /// Drop the (holder, unit) pair from both directions.
    ///
    /// # Errors
    /// - `NotHolder`: the pair is not currently indexed
    pub fn remove(env: &Env, holder: &Address, unit_id: u32) -> Result<(), Error> {
        if !Self::contains(env, holder, unit_id) || !Self::has_holder(env, unit_id, holder) {
            return Err(Error::NotHolder);
        }

        let holder_key = holder.clone();
        swap_remove(
            env,
            &DataKey::HolderUnits(holder.clone()),
            |id: &u32| DataKey::HolderUnitSlot(holder_key.clone(), *id),
            unit_id,
        )?;
        swap_remove(
            env,
            &DataKey::UnitHolders(unit_id),
            |h: &Address| DataKey::UnitHolderSlot(unit_id, h.clone()),
            holder.clone(),
        )
    }

    /// Holder-side membership test.
    pub fn contains(env: &Env, holder: &Address, unit_id: u32) -> bool {
        let holder_key = holder.clone();
        lookup(
            env,
            &DataKey::HolderUnits(holder.clone()),
            |id: &u32| DataKey::HolderUnitSlot(holder_key.clone(), *id),
            unit_id,
        )
        .is_some()
    }

    /// Unit-side membership test.
    pub fn has_holder(env: &Env, unit_id: u32, holder: &Address) -> bool {
        lookup(
            env,
            &DataKey::UnitHolders(unit_id),
            |h: &Address| DataKey::UnitHolderSlot(unit_id, h.clone()),
            holder.clone(),
        )
        .is_some()
    }

    pub fn units_of(env: &Env, holder: &Address) -> Vec<u32> {
        env.storage()
            .persistent()
            .get(&DataKey::HolderUnits(holder.clone()))
            .unwrap_or(Vec::new(env))
    }

    pub fn holders_of(env: &Env, unit_id: u32) -> Vec<Address> {
        env.storage()
            .persistent()
            .get(&DataKey::UnitHolders(unit_id))
            .unwrap_or(Vec::new(env))
    }

    pub fn unit_count(env: &Env, holder: &Address) -> u32 {
        Self::units_of(env, holder).len()
    }
}

fn insert<V, F>(env: &Env, list_key: &DataKey, slot_key: F, value: V)
where
    V: IntoVal<Env, Val> + TryFromVal<Env, Val> + Clone,
    F: Fn(&V) -> DataKey,
{
    let mut list: Vec<V> = env
        .storage()
        .persistent()
        .get(list_key)
        .unwrap_or(Vec::new(env));
    list.push_back(value.clone());

    env.storage()
        .persistent()
        .set(&slot_key(&value), &(list.len() - 1));
    env.storage().persistent().set(list_key, &list);
}

/// Position of `value` in the list, if the stored slot still points at it.
fn lookup<V, F>(env: &Env, list_key: &DataKey, slot_key: F, value: V) -> Option<u32>
where
    V: IntoVal<Env, Val> + TryFromVal<Env, Val> + Clone + PartialEq,
    F: Fn(&V) -> DataKey,
{
    let list: Vec<V> = env.storage().persistent().get(list_key)?;
    if list.is_empty() {
        return None;
    }

    let slot: u32 = env.storage().persistent().get(&slot_key(&value))?;
    if slot >= list.len() {
        return None;
    }

    match list.get(slot) {
        Some(stored) if stored == value => Some(slot),
        _ => None,
    }
}

fn swap_remove<V, F>(env: &Env, list_key: &DataKey, slot_key: F, value: V) -> Result<(), Error>
where
    V: IntoVal<Env, Val> + TryFromVal<Env, Val> + Clone + PartialEq,
    F: Fn(&V) -> DataKey,
{
    let slot = lookup(env, list_key, &slot_key, value.clone()).ok_or(Error::NotHolder)?;

    let mut list: Vec<V> = env
        .storage()
        .persistent()
        .get(list_key)
        .ok_or(Error::NotHolder)?;
    let last = list.pop_back().ok_or(Error::NotHolder)?;

    // Move the tail into the hole unless the hole was the tail
    if slot < list.len() {
        list.set(slot, last.clone());
        env.storage().persistent().set(&slot_key(&last), &slot);
    }
    env.storage().persistent().remove(&slot_key(&value));

    if list.is_empty() {
        env.storage().persistent().remove(list_key);
    } else {
        env.storage().persistent().set(list_key, &list);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FleetOrder;
    use soroban_sdk::testutils::Address as _;

    fn setup() -> (Env, Address) {
        let env = Env::default();
        let contract_id = env.register(FleetOrder, ());
        (env, contract_id)
    }

    #[test]
    fn test_add_indexes_both_directions() {
        let (env, contract_id) = setup();
        let holder = Address::generate(&env);

        env.as_contract(&contract_id, || {
            OwnershipIndex::add(&env, &holder, 7);

            assert!(OwnershipIndex::contains(&env, &holder, 7));
            assert!(OwnershipIndex::has_holder(&env, 7, &holder));
            assert!(!OwnershipIndex::contains(&env, &holder, 8));
            assert_eq!(OwnershipIndex::units_of(&env, &holder).len(), 1);
            assert_eq!(OwnershipIndex::holders_of(&env, 7).len(), 1);
        });
    }

    #[test]
    fn test_add_is_idempotent() {
        let (env, contract_id) = setup();
        let holder = Address::generate(&env);

        env.as_contract(&contract_id, || {
            OwnershipIndex::add(&env, &holder, 3);
            OwnershipIndex::add(&env, &holder, 3);

            assert_eq!(OwnershipIndex::unit_count(&env, &holder), 1);
            assert_eq!(OwnershipIndex::holders_of(&env, 3).len(), 1);
        });
    }

    #[test]
    fn test_swap_remove_keeps_moved_entry_reachable() {
        let (env, contract_id) = setup();
        let holder = Address::generate(&env);

        env.as_contract(&contract_id, || {
            for id in 1..=4u32 {
                OwnershipIndex::add(&env, &holder, id);
            }

            // 2 is not last: 4 moves into its slot
            OwnershipIndex::remove(&env, &holder, 2).unwrap();

            assert!(!OwnershipIndex::contains(&env, &holder, 2));
            assert!(!OwnershipIndex::has_holder(&env, 2, &holder));
            for id in [1u32, 3, 4] {
                assert!(OwnershipIndex::contains(&env, &holder, id));
                assert!(OwnershipIndex::has_holder(&env, id, &holder));
            }

            let units = OwnershipIndex::units_of(&env, &holder);
            assert_eq!(units.len(), 3);
            assert_eq!(units.get(1), Some(4));
        });
    }

    #[test]
    fn test_remove_last_entry_empties_lists() {
        let (env, contract_id) = setup();
        let holder = Address::generate(&env);

        env.as_contract(&contract_id, || {
            OwnershipIndex::add(&env, &holder, 9);
            OwnershipIndex::remove(&env, &holder, 9).unwrap();

            assert!(!OwnershipIndex::contains(&env, &holder, 9));
            assert_eq!(OwnershipIndex::unit_count(&env, &holder), 0);
            assert!(OwnershipIndex::holders_of(&env, 9).is_empty());
        });
    }

    #[test]
    fn test_remove_of_absent_pair_fails() {
        let (env, contract_id) = setup();
        let holder = Address::generate(&env);
        let other = Address::generate(&env);

        env.as_contract(&contract_id, || {
            OwnershipIndex::add(&env, &other, 1);

            assert_eq!(
                OwnershipIndex::remove(&env, &holder, 1),
                Err(Error::NotHolder)
            );
            assert_eq!(
                OwnershipIndex::remove(&env, &other, 2),
                Err(Error::NotHolder)
            );
            assert!(OwnershipIndex::contains(&env, &other, 1));
        });
    }

    #[test]
    fn test_unit_side_tracks_many_holders() {
        let (env, contract_id) = setup();
        let a = Address::generate(&env);
        let b = Address::generate(&env);
        let c = Address::generate(&env);

        env.as_contract(&contract_id, || {
            OwnershipIndex::add(&env, &a, 5);
            OwnershipIndex::add(&env, &b, 5);
            OwnershipIndex::add(&env, &c, 5);

            OwnershipIndex::remove(&env, &a, 5).unwrap();

            let holders = OwnershipIndex::holders_of(&env, 5);
            assert_eq!(holders.len(), 2);
            assert!(OwnershipIndex::has_holder(&env, 5, &b));
            assert!(OwnershipIndex::has_holder(&env, 5, &c));
            assert!(!OwnershipIndex::has_holder(&env, 5, &a));
        });
    }
}
