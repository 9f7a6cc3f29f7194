pub mod wmw;
pub mod config;

pub use wmw::{approximate_wmw_statistic, wmw_loss, WmwLoss, DEFAULT_GAMMA, DEFAULT_P};
