//! Workout rotation: the persisted position in the A→E training cycle.

use crate::state::RotationStore;
use crate::{Result, WorkoutKey};

/// The workout key to use for today's session, defaulting to A
pub fn current(store: &dyn RotationStore) -> Result<WorkoutKey> {
    Ok(store.get()?.unwrap_or_default())
}

/// Move the rotation forward one step, persisting before returning
///
/// The cycle is total: five advances from any key land back on that key.
/// There is no way to go back.
pub fn advance(store: &mut dyn RotationStore) -> Result<WorkoutKey> {
    let next = current(store)?.next();
    store.set(next)?;
    tracing::info!("Rotation advanced to workout {}", next);
    Ok(next)
}
