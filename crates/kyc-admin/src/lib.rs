//! # KYC Admin
//!
//! Administration client for the KYC case-management API, built on
//! [`resource_framework`].
//!
//! ## Core Components
//!
//! - **[model]**: the seven KYC records and their wire format.
//! - **[clients]**: typed clients (e.g. [`KycCaseClient`](clients::KycCaseClient)) with
//!   per-resource errors and criteria queries.
//! - **[forms]**: editable snapshots, constraints and relationship pickers.
//! - **[config]**: environment configuration.
//! - **[lifecycle]**: wiring of one admin session ([`AdminSystem`](lifecycle::AdminSystem)).
//!
//! ## Quick Start
//!
//! The binary in `main.rs` sets up tracing, loads the configuration and prints
//! every KYC case in `id,asc` order.
//!
//! ## Testing
//!
//! See [`resource_framework::mock`] for transports that let every client, list and
//! form be tested without a backend.

pub mod clients;
pub mod config;
pub mod forms;
pub mod lifecycle;
pub mod model;
