use ulid::Ulid;

use crate::limits::*;
use crate::model::*;

use super::{EngineError, InventorySession, SaveState};

impl InventorySession {
    // ── Occupancy ceiling ────────────────────────────────────

    /// Update a room's capacity fields. Growing `adults + children` past
    /// the current occupancy ceiling raises the ceiling to match; like any
    /// ceiling change, that rebuilds the room's price cells empty.
    /// Returns the effective ceiling.
    pub fn set_room_capacities(
        &mut self,
        room_id: RoomId,
        adults: u8,
        children: u8,
        infants: u8,
    ) -> Result<u8, EngineError> {
        let config = self.room_config_mut(room_id)?;
        config.room.max_adults = adults;
        config.room.max_children = children;
        config.room.max_infants = infants;
        let current = config.room.max_persons;
        let floor = config.room.occupancy_floor();
        if floor > current {
            self.set_max_persons(room_id, floor)
        } else {
            Ok(current)
        }
    }

    /// Change the occupancy ceiling. The requested value is clamped up to
    /// `adults + children`. Every date-range's price cells are rebuilt:
    /// existing values are NOT preserved across a ceiling change, and
    /// occupancy selections above the new ceiling are dropped.
    pub fn set_max_persons(&mut self, room_id: RoomId, requested: u8) -> Result<u8, EngineError> {
        if requested > MAX_OCCUPANCY {
            return Err(EngineError::LimitExceeded("occupancy ceiling too high"));
        }
        let config = self.room_config_mut(room_id)?;
        let effective = requested.max(config.room.occupancy_floor());
        if effective > MAX_OCCUPANCY {
            return Err(EngineError::LimitExceeded("occupancy ceiling too high"));
        }
        if effective != config.room.max_persons {
            config.room.max_persons = effective;
            config.prices.clear();
            config.occupancies.retain(|t| *t <= effective);
            tracing::debug!("room {room_id}: occupancy ceiling now {effective}, prices reset");
        }
        Ok(effective)
    }

    // ── Selections ───────────────────────────────────────────

    /// Replace the room's meal-plan selection. Empty means "all".
    pub fn set_meal_plan_selection(
        &mut self,
        room_id: RoomId,
        plans: Vec<MealPlanId>,
    ) -> Result<(), EngineError> {
        let mut selected: Vec<MealPlanId> = Vec::with_capacity(plans.len());
        for plan in plans {
            if !selected.contains(&plan) {
                selected.push(plan);
            }
        }
        self.room_config_mut(room_id)?.meal_plans = selected;
        Ok(())
    }

    /// Replace the room's occupancy-tier selection. Empty means "all".
    pub fn set_occupancy_selection(
        &mut self,
        room_id: RoomId,
        tiers: Vec<u8>,
    ) -> Result<(), EngineError> {
        let config = self.room_config_mut(room_id)?;
        let max = config.room.max_persons;
        let mut selected: Vec<u8> = Vec::with_capacity(tiers.len());
        for tier in tiers {
            if tier < 1 || tier > max {
                return Err(EngineError::InvalidOccupancy(tier));
            }
            if !selected.contains(&tier) {
                selected.push(tier);
            }
        }
        selected.sort_unstable();
        config.occupancies = selected;
        Ok(())
    }

    // ── Price cells ──────────────────────────────────────────

    pub fn price(&self, room_id: RoomId, key: PriceKey) -> Option<u32> {
        self.room(room_id)?.prices.get(&key).copied()
    }

    /// Set or clear one price cell. The key must reference a range of this
    /// room and an occupancy within the ceiling.
    pub fn set_price(
        &mut self,
        room_id: RoomId,
        key: PriceKey,
        value: Option<u32>,
    ) -> Result<(), EngineError> {
        let config = self.room_config_mut(room_id)?;
        if !config.ranges.iter().any(|r| r.id == key.range_id) {
            return Err(EngineError::RangeNotFound(key.range_id));
        }
        if key.occupancy < 1 || key.occupancy > config.room.max_persons {
            return Err(EngineError::InvalidOccupancy(key.occupancy));
        }
        match value {
            Some(amount) => {
                config.prices.insert(key, amount);
            }
            None => {
                config.prices.remove(&key);
            }
        }
        Ok(())
    }

    /// Explicit bulk copy: for every date range and selected meal plan,
    /// overwrite tiers 2..N with the tier-1 price of the same day type.
    /// Meal plans whose tier-1 cell is empty are skipped. Idempotent.
    pub fn apply_base_to_all(&mut self, room_id: RoomId, day_type: DayType) -> Result<(), EngineError> {
        let idx = self.room_index(room_id)?;
        let meal_plans = self.resolved_meal_plans(&self.rooms[idx]);
        self.state = SaveState::Draft;

        let config = &mut self.rooms[idx];
        let range_ids: Vec<Ulid> = config.ranges.iter().map(|r| r.id).collect();
        let tiers = config.resolved_occupancies();

        for range_id in range_ids {
            for &meal_plan in &meal_plans {
                let base_key = PriceKey {
                    range_id,
                    day_type,
                    occupancy: 1,
                    meal_plan,
                };
                let Some(&base) = config.prices.get(&base_key) else {
                    continue;
                };
                for &tier in &tiers {
                    if tier == 1 {
                        continue;
                    }
                    config.prices.insert(
                        PriceKey {
                            range_id,
                            day_type,
                            occupancy: tier,
                            meal_plan,
                        },
                        base,
                    );
                }
            }
        }
        Ok(())
    }

    /// True iff the room has at least one date range, a non-empty resolved
    /// meal-plan and occupancy selection, and a tier-1 price for every
    /// selected meal plan across every date range for `day_type`.
    pub fn base_prices_complete(&self, room_id: RoomId, day_type: DayType) -> bool {
        let Some(config) = self.room(room_id) else {
            return false;
        };
        if config.ranges.is_empty() {
            return false;
        }
        let meal_plans = self.resolved_meal_plans(config);
        if meal_plans.is_empty() || config.resolved_occupancies().is_empty() {
            return false;
        }
        config.ranges.iter().all(|range| {
            meal_plans.iter().all(|&meal_plan| {
                config.prices.contains_key(&PriceKey {
                    range_id: range.id,
                    day_type,
                    occupancy: 1,
                    meal_plan,
                })
            })
        })
    }
}
