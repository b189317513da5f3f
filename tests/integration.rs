//! Integration tests entry point
//!
//! Tests component interactions and boundaries.
//! Run with: cargo test --test integration

mod integration {
    pub mod drawing;
    pub mod reading;
}
