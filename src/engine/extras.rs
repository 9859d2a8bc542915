use crate::model::*;

use super::{EngineError, InventorySession};

impl InventorySession {
    pub fn extra_cost(&self, room_id: RoomId, key: ExtraKey) -> Option<u32> {
        self.room(room_id)?.extras.get(&key).copied()
    }

    /// Set or clear one extra-cost cell with an already-typed amount.
    pub fn set_extra_cost(
        &mut self,
        room_id: RoomId,
        key: ExtraKey,
        value: Option<u32>,
    ) -> Result<(), EngineError> {
        let config = self.room_config_mut(room_id)?;
        match value {
            Some(amount) => {
                config.extras.insert(key, amount);
            }
            None => {
                config.extras.remove(&key);
            }
        }
        Ok(())
    }

    /// Set one extra-cost cell from raw user text. Non-digit characters are
    /// stripped before parsing; blank input clears the cell; input with no
    /// digits at all is rejected. Returns the stored value.
    pub fn set_extra_cost_text(
        &mut self,
        room_id: RoomId,
        key: ExtraKey,
        raw: &str,
    ) -> Result<Option<u32>, EngineError> {
        if raw.trim().is_empty() {
            self.set_extra_cost(room_id, key, None)?;
            return Ok(None);
        }
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Err(EngineError::NonNumericAmount(raw.to_string()));
        }
        let amount: u32 = digits
            .parse()
            .map_err(|_| EngineError::LimitExceeded("extra cost amount too large"))?;
        self.set_extra_cost(room_id, key, Some(amount))?;
        Ok(Some(amount))
    }

    /// True iff all three guest-kind cells are filled for every selected
    /// meal plan for `day_type`.
    pub fn extra_costs_complete(&self, room_id: RoomId, day_type: DayType) -> bool {
        let Some(config) = self.room(room_id) else {
            return false;
        };
        let meal_plans = self.resolved_meal_plans(config);
        if meal_plans.is_empty() {
            return false;
        }
        meal_plans.iter().all(|&meal_plan| {
            GuestKind::ALL.iter().all(|&guest_kind| {
                config.extras.contains_key(&ExtraKey {
                    day_type,
                    guest_kind,
                    meal_plan,
                })
            })
        })
    }
}
