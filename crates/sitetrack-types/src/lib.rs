//! Platform-agnostic types for sitetrack visit counters.
//!
//! This crate provides the device classification shared by the native
//! (sitetrack-core, sitetrack-cli) and WebAssembly (sitetrack-wasm) front ends.
//!
//! # Features
//!
//! - Device type and category enums with stable labels
//! - Environment signal struct (user agent, platform, touch support)
//! - The pure, total [`classify`] function
//! - Error type for label parsing
//!
//! # Example
//!
//! ```
//! use sitetrack_types::{classify_parts, DeviceType};
//!
//! let device = classify_parts("", "MacIntel", true);
//! assert_eq!(device.device_type(), DeviceType::IPad);
//! ```

pub mod classifier;
pub mod error;
pub mod types;

pub use classifier::{classify, classify_parts};
pub use error::{ParseError, ParseResult};
pub use types::{Category, DeviceCategory, DeviceType, EnvSignals};
