#![forbid(unsafe_code)]

//! Test harness and reference fixtures for lifebind.
//!
//! - [`view`]: a small shared view tree implementing `ViewNode`.
//! - [`owners`]: reference screen, view host, and modal owners that drive
//!   their own lifecycles.
//! - [`binding`]: a sample bound-view type and a counting bind function.
//! - [`ops`]: `proptest` strategies over owner/cache operation sequences.

pub mod binding;
pub mod ops;
pub mod owners;
pub mod view;

pub use binding::{BindCounter, SampleBinding};
pub use owners::{ModalFixture, ScreenFixture, ViewHostFixture};
pub use view::FixtureView;
