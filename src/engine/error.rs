use chrono::NaiveDate;
use ulid::Ulid;

use crate::model::{DayType, RoomId};

/// Errors rejected at the point of entry. Nothing here is fatal; every
/// variant maps to an inline, field-scoped message.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    InvalidRange { from: NaiveDate, to: NaiveDate },
    DuplicateRange { from: NaiveDate, to: NaiveDate },
    OverlappingRange { from: NaiveDate, to: NaiveDate },
    RoomNotFound(RoomId),
    RangeNotFound(Ulid),
    IndexOutOfBounds { what: &'static str, index: usize },
    /// Aggregate range operations only exist for normal inventories.
    AggregateInConfirmMode,
    InvalidOccupancy(u8),
    NonNumericAmount(String),
    InvalidRefundRule(&'static str),
    /// Flat hold amount above the nightly price.
    ExceedsPrice { amount: f64, nightly_price: u32 },
    PercentageOutOfRange(f64),
    /// Hold cutoff above the 30-day bound.
    MaxDaysExceeded(u16),
    /// Hold-validity hours above `cutoff_days * 24`.
    LimitExceedsCutOff { hours: u32, max_hours: u32 },
    DuplicateBlackoutDate(NaiveDate),
    LimitExceeded(&'static str),
    /// Calendar sync requested before the inventory was ever saved.
    NotSaved,
    /// Collaborator/transport failure; in-memory state is untouched.
    Storage(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidRange { from, to } => {
                write!(f, "invalid range: {from} is after {to}")
            }
            EngineError::DuplicateRange { from, to } => {
                write!(f, "range {from}..{to} already exists")
            }
            EngineError::OverlappingRange { from, to } => {
                write!(f, "range {from}..{to} overlaps an existing range")
            }
            EngineError::RoomNotFound(id) => write!(f, "room not selected: {id}"),
            EngineError::RangeNotFound(id) => write!(f, "date range not found: {id}"),
            EngineError::IndexOutOfBounds { what, index } => {
                write!(f, "no {what} at index {index}")
            }
            EngineError::AggregateInConfirmMode => {
                write!(f, "aggregate ranges are only available for normal inventories")
            }
            EngineError::InvalidOccupancy(n) => write!(f, "occupancy {n} out of bounds"),
            EngineError::NonNumericAmount(s) => write!(f, "amount is not a number: {s:?}"),
            EngineError::InvalidRefundRule(msg) => write!(f, "invalid refund rule: {msg}"),
            EngineError::ExceedsPrice { amount, nightly_price } => {
                write!(f, "hold amount {amount} exceeds nightly price {nightly_price}")
            }
            EngineError::PercentageOutOfRange(p) => {
                write!(f, "hold percentage {p} must be between 0 and 100")
            }
            EngineError::MaxDaysExceeded(days) => {
                write!(f, "hold cutoff {days} exceeds the 30-day maximum")
            }
            EngineError::LimitExceedsCutOff { hours, max_hours } => {
                write!(f, "hold validity {hours}h exceeds cutoff window of {max_hours}h")
            }
            EngineError::DuplicateBlackoutDate(date) => {
                write!(f, "blackout date {date} already added")
            }
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
            EngineError::NotSaved => write!(f, "inventory has not been saved yet"),
            EngineError::Storage(e) => write!(f, "storage error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// One completeness finding collected by the validation walk. `Display`
/// renders the user-facing message; the first violation is what the user
/// sees, the rest are kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    MissingField(&'static str),
    MissingHoldField(&'static str),
    HoldAmountExceedsPrice { amount: f64, nightly_price: u32 },
    HoldPercentageOutOfRange(f64),
    HoldCutoffExceeded(u16),
    HoldLimitExceedsCutoff { hours: u32, max_hours: u32 },
    InvalidRoomCapacity { room: String, field: &'static str },
    MissingRoomsCount { room: String },
    NoDateRange { room: String },
    MissingRangeRoomsCount { room: String, from: NaiveDate, to: NaiveDate },
    NoMealPlan { room: String },
    IncompleteExtraCost { room: String, day_type: DayType },
    IncompleteBasePrice { room: String, day_type: DayType },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::MissingField(field) => write!(f, "Please select {field}"),
            Violation::MissingHoldField(field) => {
                write!(f, "Please enter hold booking {field}")
            }
            Violation::HoldAmountExceedsPrice { amount, nightly_price } => {
                write!(
                    f,
                    "Hold amount {amount} cannot exceed the nightly price {nightly_price}"
                )
            }
            Violation::HoldPercentageOutOfRange(p) => {
                write!(f, "Hold percentage {p} must be between 0 and 100")
            }
            Violation::HoldCutoffExceeded(days) => {
                write!(f, "Hold cutoff cannot exceed 30 days (got {days})")
            }
            Violation::HoldLimitExceedsCutoff { hours, max_hours } => {
                write!(
                    f,
                    "Hold validity {hours} hours cannot exceed the cutoff window ({max_hours} hours)"
                )
            }
            Violation::InvalidRoomCapacity { room, field } => {
                write!(f, "Please enter {field} for room {room}")
            }
            Violation::MissingRoomsCount { room } => {
                write!(f, "Please enter number of rooms for room {room}")
            }
            Violation::NoDateRange { room } => {
                write!(f, "Please add at least one date range for room {room}")
            }
            Violation::MissingRangeRoomsCount { room, from, to } => {
                write!(
                    f,
                    "Please enter number of rooms for {from}..{to} of room {room}"
                )
            }
            Violation::NoMealPlan { room } => {
                write!(f, "Please select at least one meal plan for room {room}")
            }
            Violation::IncompleteExtraCost { room, day_type } => {
                write!(
                    f,
                    "Please fill all {} extra costs for room {room}",
                    day_type.label()
                )
            }
            Violation::IncompleteBasePrice { room, day_type } => {
                write!(
                    f,
                    "Please fill all {} base prices for room {room}",
                    day_type.label()
                )
            }
        }
    }
}
