// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the viewer.
//!
//! This module provides localization capabilities using the Fluent localization system.
//! It handles language detection, translation file loading, and string formatting.
//!
//! # Features
//!
//! - Automatic locale detection from CLI, config, or system settings
//! - Translation files embedded at build time from `assets/i18n/`
//! - Fallback to `en-US` when the requested locale is unavailable

pub mod fluent;

pub use fluent::I18n;
