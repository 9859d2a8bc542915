//! Hard bounds on user-supplied configuration. Everything here is a
//! protective limit, not a tuning knob.

/// Max rooms configurable in one inventory session.
pub const MAX_ROOMS_PER_INVENTORY: usize = 64;

/// Max date ranges per room.
pub const MAX_RANGES_PER_ROOM: usize = 128;

/// Highest occupancy ceiling a room may be configured with.
pub const MAX_OCCUPANCY: u8 = 16;

/// Max refund rules per inventory.
pub const MAX_REFUND_RULES: usize = 16;

/// Max blackout dates per inventory.
pub const MAX_BLACKOUT_DATES: usize = 366;

/// Hold bookings may be placed at most this many days before check-in.
pub const MAX_HOLD_CUTOFF_DAYS: u16 = 30;

/// Hold-validity limit is expressed in hours against a cutoff in days.
pub const HOURS_PER_DAY: u32 = 24;

/// Max data rows accepted from one availability CSV import.
pub const MAX_CSV_ROWS: usize = 10_000;

/// Max concurrently open configuration sessions.
pub const MAX_SESSIONS: usize = 1024;

/// Max room name length accepted from the hotel master.
pub const MAX_ROOM_NAME_LEN: usize = 128;
