//! Domain types for propsim

pub mod account;
pub mod params;
pub mod risk;
pub mod trade;

pub use account::AccountState;
pub use params::{ParamError, SimulationParameters, DEFAULT_MAX_TRADES, MAX_ACCOUNTS};
pub use risk::RiskLevel;
pub use trade::{Outcome, TradeRecord};
