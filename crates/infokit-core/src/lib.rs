//! infokit-core — Small host-side helpers.
//!
//! OS name lookup, truncating duration formatting, and wrappers that time
//! or guard a call.

pub mod format;
pub mod guard;
pub mod os;
pub mod timing;

pub use format::{format_duration, format_seconds, DEFAULT_DECIMALS, MAX_DECIMALS};
pub use guard::{guarded, log_errors, log_panics};
pub use os::{current_os, OsKind};
pub use timing::{
    function_time_stamp, label_of, method_time_stamp, method_time_stamp_self_only,
    print_time_stamp, TimeStamp, TimingStyle,
};
