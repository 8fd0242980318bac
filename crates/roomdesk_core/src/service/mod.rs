//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into booking, settings and stats APIs.
//! - Keep the CLI decoupled from storage details.

pub mod availability;
pub mod reservation_service;
pub mod room_config_service;
pub mod stats_service;
