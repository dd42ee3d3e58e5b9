//! Kinship Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Kinship family
//! tree builder. It includes:
//!
//! - **Identifiers**: Monotonic person identifiers ([`identifier::PersonId`])
//! - **People**: Tree members and how they are attached ([`person`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod person;
