//! Selection policies: who bats next, who bowls next, who fielded a dismissal.

pub mod batting;
pub mod bowling;
pub mod fielding;

pub use batting::BattingManager;
pub use bowling::BowlingManager;
pub use fielding::FieldingManager;
