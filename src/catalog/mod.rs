//! Static catalogs: device profiles and recognised transform parameters
//!
//! Both catalogs are read-only process-wide data. The device table is a
//! compiled-in array; the parameter catalog is parsed from the bundled JSON
//! file on first access and shared afterwards.

pub mod device;
pub mod parameters;

pub use device::{physical_widths, profiles_in, DeviceProfile, DEVICES};
pub use parameters::ParameterCatalog;

/// Form factor a device profile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceGroup {
    Phone,
    Phablet,
    Tablet,
    /// Common layout breakpoints, listed at 1x and again at 2x
    Breakpoint,
}

impl DeviceGroup {
    pub const ALL: [DeviceGroup; 4] = [
        DeviceGroup::Phone,
        DeviceGroup::Phablet,
        DeviceGroup::Tablet,
        DeviceGroup::Breakpoint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceGroup::Phone => "phone",
            DeviceGroup::Phablet => "phablet",
            DeviceGroup::Tablet => "tablet",
            DeviceGroup::Breakpoint => "breakpoint",
        }
    }
}
