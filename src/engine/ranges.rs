use chrono::{NaiveDate, Weekday};
use ulid::Ulid;

use crate::limits::*;
use crate::model::*;

use super::{EngineError, InventorySession, RoomConfig, SaveState};

fn dedup_days(days: Vec<Weekday>) -> Vec<Weekday> {
    let mut out: Vec<Weekday> = Vec::with_capacity(days.len());
    for day in days {
        if !out.contains(&day) {
            out.push(day);
        }
    }
    out
}

impl InventorySession {
    // ── Room selection ───────────────────────────────────────

    /// Add a room to the selection. Idempotent for an already-selected id.
    /// In normal mode the fresh room receives a projection of the aggregate
    /// view: the global weekend-day set and the global range list.
    pub fn select_room(&mut self, room: Room) -> Result<(), EngineError> {
        if self.rooms.iter().any(|c| c.room.id == room.id) {
            return Ok(());
        }
        if self.rooms.len() >= MAX_ROOMS_PER_INVENTORY {
            return Err(EngineError::LimitExceeded("too many rooms on inventory"));
        }
        if room.name.len() > MAX_ROOM_NAME_LEN {
            return Err(EngineError::LimitExceeded("room name too long"));
        }

        let mut config = RoomConfig::new(room);
        if self.mode == InventoryMode::Normal {
            config.weekend_days = self.aggregate_weekend.clone();
            for (from, to) in &self.aggregate_ranges {
                config.ranges.push(DateRange::new(config.room.id, *from, *to));
            }
        }
        self.state = SaveState::Draft;
        self.rooms.push(config);
        Ok(())
    }

    pub fn deselect_room(&mut self, room_id: RoomId) -> Result<RoomConfig, EngineError> {
        let idx = self.room_index(room_id)?;
        self.state = SaveState::Draft;
        Ok(self.rooms.remove(idx))
    }

    /// Replace the selection wholesale: configs of still-selected rooms are
    /// kept untouched, newly selected rooms are created with the aggregate
    /// projection applied.
    pub fn sync_room_selection(&mut self, rooms: Vec<Room>) -> Result<(), EngineError> {
        self.rooms.retain(|c| rooms.iter().any(|r| r.id == c.room.id));
        for room in rooms {
            self.select_room(room)?;
        }
        Ok(())
    }

    /// Rooms offered for sale in normal mode (mirrored across all ranges at
    /// payload time).
    pub fn set_front_rooms_count(
        &mut self,
        room_id: RoomId,
        count: Option<u32>,
    ) -> Result<(), EngineError> {
        self.room_config_mut(room_id)?.front_rooms_count = count;
        Ok(())
    }

    // ── Per-room date ranges ─────────────────────────────────

    pub fn add_range(
        &mut self,
        room_id: RoomId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Ulid, EngineError> {
        if from > to {
            return Err(EngineError::InvalidRange { from, to });
        }
        let config = self.room_config_mut(room_id)?;
        if config.ranges.len() >= MAX_RANGES_PER_ROOM {
            return Err(EngineError::LimitExceeded("too many date ranges on room"));
        }
        if config.ranges.iter().any(|r| r.same_interval(from, to)) {
            return Err(EngineError::DuplicateRange { from, to });
        }
        if config.ranges.iter().any(|r| r.overlaps(from, to)) {
            return Err(EngineError::OverlappingRange { from, to });
        }

        let range = DateRange::new(room_id, from, to);
        let id = range.id;
        config.ranges.push(range);
        Ok(id)
    }

    /// Remove a range by position; its price cells go with it.
    pub fn remove_range(
        &mut self,
        room_id: RoomId,
        index: usize,
    ) -> Result<DateRange, EngineError> {
        let config = self.room_config_mut(room_id)?;
        if index >= config.ranges.len() {
            return Err(EngineError::IndexOutOfBounds {
                what: "date range",
                index,
            });
        }
        let removed = config.ranges.remove(index);
        config.prices.retain(|k, _| k.range_id != removed.id);
        Ok(removed)
    }

    /// Rooms available for one interval — the confirm-mode count.
    pub fn set_range_rooms_count(
        &mut self,
        room_id: RoomId,
        index: usize,
        count: u32,
    ) -> Result<(), EngineError> {
        let config = self.room_config_mut(room_id)?;
        let range = config
            .ranges
            .get_mut(index)
            .ok_or(EngineError::IndexOutOfBounds {
                what: "date range",
                index,
            })?;
        range.rooms_count = Some(count);
        Ok(())
    }

    // ── Aggregate (normal-mode) ranges ───────────────────────

    /// Add a range to the room-independent global list and mirror it into
    /// every selected room. Rooms already carrying an identical range are
    /// skipped, which keeps the operation idempotent per room.
    pub fn aggregate_add_range(
        &mut self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<(), EngineError> {
        if self.mode != InventoryMode::Normal {
            return Err(EngineError::AggregateInConfirmMode);
        }
        if from > to {
            return Err(EngineError::InvalidRange { from, to });
        }
        if self
            .aggregate_ranges
            .iter()
            .any(|(f, t)| *f == from && *t == to)
        {
            return Err(EngineError::DuplicateRange { from, to });
        }
        if self.aggregate_ranges.iter().any(|(f, t)| *f <= to && *t >= from) {
            return Err(EngineError::OverlappingRange { from, to });
        }

        self.state = SaveState::Draft;
        self.aggregate_ranges.push((from, to));

        for config in &mut self.rooms {
            if config.ranges.iter().any(|r| r.same_interval(from, to)) {
                continue;
            }
            if config.ranges.iter().any(|r| r.overlaps(from, to)) {
                // A hydrated room may carry a diverging range; never break
                // the per-room no-overlap invariant by mirroring into it.
                tracing::debug!(
                    "room {}: skipped mirroring {from}..{to} over an overlapping range",
                    config.room.id
                );
                continue;
            }
            config.ranges.push(DateRange::new(config.room.id, from, to));
        }
        Ok(())
    }

    /// Remove a global range and its mirror from every room.
    pub fn aggregate_remove_range(&mut self, index: usize) -> Result<(), EngineError> {
        if self.mode != InventoryMode::Normal {
            return Err(EngineError::AggregateInConfirmMode);
        }
        if index >= self.aggregate_ranges.len() {
            return Err(EngineError::IndexOutOfBounds {
                what: "date range",
                index,
            });
        }
        self.state = SaveState::Draft;
        let (from, to) = self.aggregate_ranges.remove(index);
        for config in &mut self.rooms {
            if let Some(pos) = config.ranges.iter().position(|r| r.same_interval(from, to)) {
                let removed = config.ranges.remove(pos);
                config.prices.retain(|k, _| k.range_id != removed.id);
            }
        }
        Ok(())
    }

    // ── Weekend-day sets ─────────────────────────────────────

    pub fn set_weekend_days(
        &mut self,
        room_id: RoomId,
        days: Vec<Weekday>,
    ) -> Result<(), EngineError> {
        self.room_config_mut(room_id)?.weekend_days = dedup_days(days);
        Ok(())
    }

    /// Replace the global weekend-day set and mirror it into every room.
    pub fn set_aggregate_weekend_days(&mut self, days: Vec<Weekday>) -> Result<(), EngineError> {
        if self.mode != InventoryMode::Normal {
            return Err(EngineError::AggregateInConfirmMode);
        }
        let days = dedup_days(days);
        self.state = SaveState::Draft;
        self.aggregate_weekend = days.clone();
        for config in &mut self.rooms {
            config.weekend_days = days.clone();
        }
        Ok(())
    }
}
