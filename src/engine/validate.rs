use crate::model::*;

use super::{policy, InventorySession, Violation};

impl InventorySession {
    /// Mode-aware completeness check. Walks the whole session and collects
    /// every violation rather than failing fast; the caller shows the first
    /// message and keeps the rest for diagnostics. Save is never issued
    /// while this returns a non-empty list.
    pub fn validate(&self) -> Vec<Violation> {
        let mut out: Vec<Violation> = Vec::new();

        // Required top-level fields.
        if self.header.country.as_deref().is_none_or(str::is_empty) {
            out.push(Violation::MissingField("country"));
        }
        if self.header.state.as_deref().is_none_or(str::is_empty) {
            out.push(Violation::MissingField("state"));
        }
        if self.header.city.as_deref().is_none_or(str::is_empty) {
            out.push(Violation::MissingField("city"));
        }
        if self.header.hotel.as_deref().is_none_or(str::is_empty) {
            out.push(Violation::MissingField("hotel"));
        }
        if self.header.check_in.is_none() {
            out.push(Violation::MissingField("check-in time"));
        }
        if self.header.check_out.is_none() {
            out.push(Violation::MissingField("check-out time"));
        }

        // Hold policy: required fields only while enabled, plus the three
        // cross-field invariants, recomputed from scratch.
        out.extend(policy::hold_violations(&self.hold, self.nightly_price_hint()));

        // Per selected room, in selection order.
        for config in &self.rooms {
            let room = config.room.name.clone();
            let room_id = config.room.id;

            if config.room.max_adults == 0 {
                out.push(Violation::InvalidRoomCapacity {
                    room: room.clone(),
                    field: "adult capacity",
                });
            }
            if config.room.max_persons == 0 {
                out.push(Violation::InvalidRoomCapacity {
                    room: room.clone(),
                    field: "max persons",
                });
            }
            if self.mode == InventoryMode::Normal
                && config.front_rooms_count.is_none_or(|c| c < 1)
            {
                out.push(Violation::MissingRoomsCount { room: room.clone() });
            }

            if config.ranges.is_empty() {
                out.push(Violation::NoDateRange { room: room.clone() });
            }
            if self.mode == InventoryMode::Confirm {
                for range in &config.ranges {
                    if range.rooms_count.is_none_or(|c| c < 1) {
                        out.push(Violation::MissingRangeRoomsCount {
                            room: room.clone(),
                            from: range.from,
                            to: range.to,
                        });
                    }
                }
            }

            if self.resolved_meal_plans(config).is_empty() {
                out.push(Violation::NoMealPlan { room: room.clone() });
            }

            // Grid completeness is a normal-mode invariant: weekday always,
            // weekend only when the room prices any weekend day.
            if self.mode == InventoryMode::Normal {
                if !self.extra_costs_complete(room_id, DayType::Weekday) {
                    out.push(Violation::IncompleteExtraCost {
                        room: room.clone(),
                        day_type: DayType::Weekday,
                    });
                }
                if config.has_weekend() && !self.extra_costs_complete(room_id, DayType::Weekend) {
                    out.push(Violation::IncompleteExtraCost {
                        room: room.clone(),
                        day_type: DayType::Weekend,
                    });
                }
                if !self.base_prices_complete(room_id, DayType::Weekday) {
                    out.push(Violation::IncompleteBasePrice {
                        room: room.clone(),
                        day_type: DayType::Weekday,
                    });
                }
                if config.has_weekend() && !self.base_prices_complete(room_id, DayType::Weekend) {
                    out.push(Violation::IncompleteBasePrice {
                        room,
                        day_type: DayType::Weekend,
                    });
                }
            }
        }

        out
    }
}
