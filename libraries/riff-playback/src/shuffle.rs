//! Random track selection for shuffle mode

use rand::Rng;

/// Pick a uniformly random index in `0..len` different from `current`
///
/// Returns `None` when there is no other index to pick (`len <= 1`).
/// When `current` is `None` or out of range any index may be returned.
pub fn pick_other_index<R: Rng + ?Sized>(len: usize, current: Option<usize>, rng: &mut R) -> Option<usize> {
    match current {
        Some(current) if current < len => {
            if len <= 1 {
                return None;
            }
            // Draw from len - 1 slots and skip over the current one
            let pick = rng.gen_range(0..len - 1);
            Some(if pick >= current { pick + 1 } else { pick })
        }
        _ => {
            if len == 0 {
                None
            } else {
                Some(rng.gen_range(0..len))
            }
        }
    }
}
