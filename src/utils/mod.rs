//! Utility modules for summarise

pub mod timing;
