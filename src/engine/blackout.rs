use chrono::NaiveDate;

use crate::limits::*;
use crate::model::StoredRoomDetail;

use super::{EngineError, InventorySession, SaveState};

impl InventorySession {
    /// Insert a blackout date. A repeated insertion is rejected and leaves
    /// the set unchanged.
    pub fn add_blackout_date(&mut self, date: NaiveDate) -> Result<(), EngineError> {
        if self.blackout_dates.contains(&date) {
            return Err(EngineError::DuplicateBlackoutDate(date));
        }
        if self.blackout_dates.len() >= MAX_BLACKOUT_DATES {
            return Err(EngineError::LimitExceeded("too many blackout dates"));
        }
        self.state = SaveState::Draft;
        self.blackout_dates.push(date);
        Ok(())
    }

    pub fn remove_blackout_date(&mut self, index: usize) -> Result<NaiveDate, EngineError> {
        if index >= self.blackout_dates.len() {
            return Err(EngineError::IndexOutOfBounds {
                what: "blackout date",
                index,
            });
        }
        self.state = SaveState::Draft;
        Ok(self.blackout_dates.remove(index))
    }
}

/// Union of each room's stored blackout list, deduplicated, first-seen
/// order preserved. Storage keeps the hotel-level set on every room row, so
/// hydration has to fold the duplicates back out.
pub(super) fn union_room_blackouts(rooms: &[StoredRoomDetail]) -> Vec<NaiveDate> {
    let mut out: Vec<NaiveDate> = Vec::new();
    for room in rooms {
        for &date in &room.blackout_dates {
            if !out.contains(&date) {
                out.push(date);
            }
        }
    }
    out
}
