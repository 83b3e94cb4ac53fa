// src/layout/mod.rs
//! 手札・捨て札のレイアウトまわり！

pub mod calculator;
pub mod child;
pub mod container;

pub use calculator::{calculate_layout, ChildSize, LayoutParams, LayoutPlan};
pub use child::LayoutChild;
pub use container::LayoutContainer;
