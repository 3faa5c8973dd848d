// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "clock/clock_source.rs"]
pub mod clock;

#[path = "filter/mod.rs"]
pub mod filter;

#[path = "moderation/mod.rs"]
pub mod moderation;

#[path = "voting/mod.rs"]
pub mod voting;

#[path = "board/board_service.rs"]
pub mod board;
