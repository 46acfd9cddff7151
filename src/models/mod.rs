//! Domain models for the Biblos server

pub mod borrowing;
pub mod enums;
pub mod event;
pub mod item;
pub mod member;
pub mod request;
pub mod session;
pub mod staff;

pub use enums::*;
