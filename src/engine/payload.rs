use std::sync::Arc;

use crate::model::*;
use crate::notify::NotifyHub;

use super::policy::persisted_refund_rules;
use super::{blackout, InventorySession, RoomConfig, SaveState};

/// Effective nightly price used to convert absolute refund amounts into
/// percentages, in priority order: the explicit price field if positive,
/// else the 1-person weekday price of any line item, else the minimum
/// positive price across all line items, else 0.
pub fn effective_nightly_price(explicit: Option<u32>, items: &[LineItem]) -> u32 {
    if let Some(price) = explicit
        && price > 0
    {
        return price;
    }
    if let Some(item) = items
        .iter()
        .find(|i| i.person == 1 && i.day_type == DayType::Weekday && i.amount > 0)
    {
        return item.amount;
    }
    items
        .iter()
        .map(|i| i.amount)
        .filter(|a| *a > 0)
        .min()
        .unwrap_or(0)
}

impl InventorySession {
    /// Same priority chain as [`effective_nightly_price`], evaluated over
    /// the in-memory grid before any payload exists. Used by the hold
    /// validators, which re-run whenever price fields change.
    pub(super) fn nightly_price_hint(&self) -> u32 {
        if let Some(price) = self.header.price
            && price > 0
        {
            return price;
        }
        for config in &self.rooms {
            if let Some(amount) = config
                .prices
                .iter()
                .filter(|(k, v)| k.occupancy == 1 && k.day_type == DayType::Weekday && **v > 0)
                .map(|(_, v)| *v)
                .next()
            {
                return amount;
            }
        }
        self.rooms
            .iter()
            .flat_map(|c| c.prices.values().copied())
            .filter(|a| *a > 0)
            .min()
            .unwrap_or(0)
    }

    /// Flatten the session into the persistence payload: one line item per
    /// room × date-range × occupancy × meal-plan × day-type with a
    /// non-empty price. Weekend items are emitted only for rooms with a
    /// configured weekend-day set.
    pub fn build_payload(&self) -> InventoryPayload {
        let mut items: Vec<LineItem> = Vec::new();
        let mut extras: Vec<ExtraCostRow> = Vec::new();

        for config in &self.rooms {
            let meal_plans = self.resolved_meal_plans(config);
            let tiers = config.resolved_occupancies();
            let day_types: &[DayType] = if config.has_weekend() {
                &[DayType::Weekday, DayType::Weekend]
            } else {
                &[DayType::Weekday]
            };

            for range in &config.ranges {
                let rooms_count = match self.mode {
                    InventoryMode::Normal => config.front_rooms_count.unwrap_or(0),
                    InventoryMode::Confirm => range.rooms_count.unwrap_or(0),
                };
                for &tier in &tiers {
                    for &meal_plan in &meal_plans {
                        for &day_type in day_types {
                            let key = PriceKey {
                                range_id: range.id,
                                day_type,
                                occupancy: tier,
                                meal_plan,
                            };
                            if let Some(&amount) = config.prices.get(&key) {
                                items.push(LineItem {
                                    room_id: config.room.id,
                                    start_date: range.from,
                                    end_date: range.to,
                                    person: tier,
                                    meal_type: meal_plan,
                                    amount,
                                    day_type,
                                    rooms_count,
                                });
                            }
                        }
                    }
                }
            }

            for &day_type in day_types {
                for &meal_plan in &meal_plans {
                    for guest_kind in GuestKind::ALL {
                        let key = ExtraKey {
                            day_type,
                            guest_kind,
                            meal_plan,
                        };
                        if let Some(&amount) = config.extras.get(&key) {
                            extras.push(ExtraCostRow {
                                room_id: config.room.id,
                                guest_kind,
                                meal_type: meal_plan,
                                day_type,
                                amount,
                            });
                        }
                    }
                }
            }
        }

        let effective = effective_nightly_price(self.header.price, &items);
        let refund_rules = if self.refundable {
            persisted_refund_rules(&self.refund_rules, effective)
        } else {
            Vec::new()
        };

        // Storage keeps the hotel-level blackout set on every room row.
        let rooms: Vec<StoredRoomDetail> = self
            .rooms
            .iter()
            .map(|c| StoredRoomDetail {
                room: c.room.clone(),
                rooms_count: c.front_rooms_count,
                weekend_days: c.weekend_days.clone(),
                meal_plans: c.meal_plans.clone(),
                occupancies: c.occupancies.clone(),
                blackout_dates: self.blackout_dates.clone(),
            })
            .collect();

        InventoryPayload {
            id: self.inventory_id,
            mode: self.mode,
            header: self.header.clone(),
            refundable: self.refundable,
            refund_rules,
            hold: self.hold.clone(),
            blackout_dates: self.blackout_dates.clone(),
            rooms,
            extras,
            items,
        }
    }

    /// Reconstruct a session from a stored inventory+rooms+grid response —
    /// the inverse of [`build_payload`]. Distinct `(start, end)` pairs per
    /// room become date ranges; grid rows become price cells keyed by the
    /// fresh range ids.
    pub fn hydrate(
        stored: StoredInventory,
        meal_plans: Vec<MealPlan>,
        notify: Arc<NotifyHub>,
    ) -> Self {
        let mut session = Self::new(stored.mode, meal_plans, notify);
        session.inventory_id = Some(stored.id);
        session.header = stored.header;
        session.refundable = stored.refundable;
        session.refund_rules = stored.refund_rules;
        session.hold = stored.hold;
        session.blackout_dates = blackout::union_room_blackouts(&stored.rooms);

        for detail in stored.rooms {
            let mut config = RoomConfig::new(detail.room);
            config.front_rooms_count = detail.rooms_count;
            config.weekend_days = detail.weekend_days;
            config.meal_plans = detail.meal_plans;
            config.occupancies = detail.occupancies;
            config.blackout_dates = detail.blackout_dates;
            session.rooms.push(config);
        }

        for row in &stored.grid {
            let Some(config) = session.rooms.iter_mut().find(|c| c.room.id == row.room_id)
            else {
                tracing::warn!("dropped grid row for unknown room {}", row.room_id);
                continue;
            };
            let range_id = match config
                .ranges
                .iter()
                .find(|r| r.same_interval(row.start_date, row.end_date))
            {
                Some(range) => range.id,
                None => {
                    let mut range = DateRange::new(row.room_id, row.start_date, row.end_date);
                    if stored.mode == InventoryMode::Confirm {
                        range.rooms_count = Some(row.rooms_count);
                    }
                    let id = range.id;
                    config.ranges.push(range);
                    id
                }
            };
            if row.person >= 1 {
                config.prices.insert(
                    PriceKey {
                        range_id,
                        day_type: row.day_type,
                        occupancy: row.person,
                        meal_plan: row.meal_type,
                    },
                    row.amount,
                );
            }
        }

        for row in &stored.extras {
            if let Some(config) = session.rooms.iter_mut().find(|c| c.room.id == row.room_id) {
                config.extras.insert(
                    ExtraKey {
                        day_type: row.day_type,
                        guest_kind: row.guest_kind,
                        meal_plan: row.meal_type,
                    },
                    row.amount,
                );
            }
        }

        // Normal mode mirrors one aggregate view into every room; rebuild
        // the source of truth from the first room's projection.
        if session.mode == InventoryMode::Normal
            && let Some(first) = session.rooms.first()
        {
            session.aggregate_ranges = first.ranges.iter().map(|r| (r.from, r.to)).collect();
            session.aggregate_weekend = first.weekend_days.clone();
        }

        session.state = SaveState::Draft;
        session
    }
}
