//! getnative 原生解析度偵測選單

mod getnative;
mod main;
mod presets;

pub use getnative::{DependencyStatus, Getnative, parse_plugins};
pub use main::NativeResolution;
pub use presets::{
    COMMON_COMBINATIONS, Preset, PresetValue, SOURCE_FILTERS, height_range_args, split_args,
};
