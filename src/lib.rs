//! Contas keeps the companies that pay you and the bills you owe, and tells
//! you what is left over next month.
//!
//! Records live as JSON arrays under fixed keys in a small key-value store
//! (see [`storage`] and [`store`]); everything in [`reports`] is a pure
//! function over those lists.

pub mod calendar;
pub mod cli;
pub mod error;
pub mod fmt;
pub mod logging;
pub mod models;
pub mod reports;
pub mod settings;
pub mod storage;
pub mod store;
pub mod theme;
