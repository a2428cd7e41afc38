// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the viewer. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Maximum zoom factor and wheel zoom step
//! - **Gestures**: Touch slop, double-tap window, dismiss distance, swipe threshold
//! - **Animation**: Transition duration and UI tick rate
//! - **Fetch**: Source size limit

use std::time::Duration;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Maximum zoom factor a page can reach (5× the intrinsic size).
pub const DEFAULT_MAX_ZOOM: f32 = 5.0;

/// Lowest accepted maximum zoom factor.
pub const MIN_MAX_ZOOM: f32 = 1.0;

/// Highest accepted maximum zoom factor.
pub const MAX_MAX_ZOOM: f32 = 20.0;

/// Zoom multiplier applied per mouse wheel line.
pub const WHEEL_ZOOM_FACTOR: f32 = 1.1;

/// Pixels that count as one wheel line for high-resolution touchpads.
pub const WHEEL_PIXELS_PER_LINE: f32 = 40.0;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Vertical travel (device-independent pixels) at which a released drag dismisses.
pub const DEFAULT_DISMISS_DISTANCE: f32 = 200.0;

/// Smallest accepted dismiss distance.
pub const MIN_DISMISS_DISTANCE: f32 = 50.0;

/// Largest accepted dismiss distance.
pub const MAX_DISMISS_DISTANCE: f32 = 1000.0;

/// Movement below this distance from the press point is still a tap.
pub const TOUCH_SLOP: f32 = 10.0;

/// Maximum distance between the two taps of a double tap.
pub const DOUBLE_TAP_SLOP: f32 = 40.0;

/// Default time window for the second tap of a double tap (milliseconds).
pub const DEFAULT_DOUBLE_TAP_MS: u64 = 300;

/// Shortest accepted double-tap window (milliseconds).
pub const MIN_DOUBLE_TAP_MS: u64 = 100;

/// Longest accepted double-tap window (milliseconds).
pub const MAX_DOUBLE_TAP_MS: u64 = 1000;

/// Fraction of the viewport width a horizontal swipe must cover to change page.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 0.25;

/// Smallest accepted swipe threshold.
pub const MIN_SWIPE_THRESHOLD: f32 = 0.05;

/// Largest accepted swipe threshold.
pub const MAX_SWIPE_THRESHOLD: f32 = 0.9;

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Default duration of snap-back, zoom-to-rect and page settle transitions (milliseconds).
pub const DEFAULT_ANIMATION_MS: u64 = 250;

/// Longest accepted transition duration (milliseconds). Zero disables animation.
pub const MAX_ANIMATION_MS: u64 = 2000;

/// Interval between UI ticks that drain deferred updates and step animations.
pub const UI_TICK: Duration = Duration::from_millis(16);

// ==========================================================================
// Fetch Defaults
// ==========================================================================

/// Largest source payload accepted by the fetcher (64 MiB).
pub const MAX_SOURCE_BYTES: u64 = 64 * 1024 * 1024;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Zoom validation
    assert!(MIN_MAX_ZOOM >= 1.0);
    assert!(MAX_MAX_ZOOM > MIN_MAX_ZOOM);
    assert!(DEFAULT_MAX_ZOOM >= MIN_MAX_ZOOM);
    assert!(DEFAULT_MAX_ZOOM <= MAX_MAX_ZOOM);
    assert!(WHEEL_ZOOM_FACTOR > 1.0);

    // Gesture validation
    assert!(MIN_DISMISS_DISTANCE > 0.0);
    assert!(DEFAULT_DISMISS_DISTANCE >= MIN_DISMISS_DISTANCE);
    assert!(DEFAULT_DISMISS_DISTANCE <= MAX_DISMISS_DISTANCE);
    assert!(TOUCH_SLOP > 0.0);
    assert!(DOUBLE_TAP_SLOP > TOUCH_SLOP);
    assert!(DEFAULT_DOUBLE_TAP_MS >= MIN_DOUBLE_TAP_MS);
    assert!(DEFAULT_DOUBLE_TAP_MS <= MAX_DOUBLE_TAP_MS);
    assert!(DEFAULT_SWIPE_THRESHOLD >= MIN_SWIPE_THRESHOLD);
    assert!(DEFAULT_SWIPE_THRESHOLD <= MAX_SWIPE_THRESHOLD);

    // Animation validation
    assert!(DEFAULT_ANIMATION_MS <= MAX_ANIMATION_MS);
};
