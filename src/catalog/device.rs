//! Device profiles used to seed candidate widths
//!
//! Values come from published device specifications (mydevice.io). Landscape
//! and 2x breakpoint variants are listed explicitly rather than derived.

use super::DeviceGroup;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceProfile {
    pub name: &'static str,
    pub group: DeviceGroup,
    /// Viewport width in CSS pixels
    pub css_width: u32,
    pub dpr: f32,
}

impl DeviceProfile {
    const fn new(name: &'static str, group: DeviceGroup, css_width: u32, dpr: f32) -> Self {
        DeviceProfile { name, group, css_width, dpr }
    }

    /// Width in physical pixels, rounded half away from zero
    pub fn physical_width(&self) -> u32 {
        (self.css_width as f64 * self.dpr as f64).round() as u32
    }
}

use super::DeviceGroup::{Breakpoint, Phablet, Phone, Tablet};

pub static DEVICES: [DeviceProfile; 28] = [
    // Phones
    DeviceProfile::new("iPhone", Phone, 320, 1.0),
    DeviceProfile::new("iPhone 4", Phone, 320, 2.0),
    DeviceProfile::new("iPhone 6", Phone, 375, 2.0),
    DeviceProfile::new("LG G3", Phone, 360, 4.0),
    // Phablets
    DeviceProfile::new("iPhone 6 Plus", Phablet, 414, 3.0),
    DeviceProfile::new("iPhone 6 Plus (landscape)", Phablet, 736, 3.0),
    DeviceProfile::new("Moto Nexus 6", Phablet, 412, 3.5),
    DeviceProfile::new("Moto Nexus 6 (landscape)", Phablet, 690, 3.5),
    DeviceProfile::new("Lumia 1520", Phablet, 432, 2.5),
    DeviceProfile::new("Lumia 1520 (landscape)", Phablet, 768, 2.5),
    DeviceProfile::new("Galaxy Note 3", Phablet, 360, 3.0),
    DeviceProfile::new("Galaxy Note 3 (landscape)", Phablet, 640, 3.0),
    DeviceProfile::new("Galaxy Note 4", Phablet, 360, 4.0),
    DeviceProfile::new("Galaxy Note 4 (landscape)", Phablet, 640, 4.0),
    // Tablets
    DeviceProfile::new("iPad", Tablet, 768, 1.0),
    DeviceProfile::new("iPad (landscape)", Tablet, 1024, 1.0),
    DeviceProfile::new("iPad 3", Tablet, 768, 2.0),
    DeviceProfile::new("iPad 3 (landscape)", Tablet, 1024, 2.0),
    DeviceProfile::new("iPad Pro", Tablet, 1024, 2.0),
    DeviceProfile::new("iPad Pro (landscape)", Tablet, 1366, 2.0),
    // Layout breakpoints
    DeviceProfile::new("Breakpoint sm", Breakpoint, 576, 1.0),
    DeviceProfile::new("Breakpoint md", Breakpoint, 720, 1.0),
    DeviceProfile::new("Breakpoint lg", Breakpoint, 940, 1.0),
    DeviceProfile::new("Breakpoint xl", Breakpoint, 1140, 1.0),
    DeviceProfile::new("Breakpoint sm @2x", Breakpoint, 576, 2.0),
    DeviceProfile::new("Breakpoint md @2x", Breakpoint, 720, 2.0),
    DeviceProfile::new("Breakpoint lg @2x", Breakpoint, 940, 2.0),
    DeviceProfile::new("Breakpoint xl @2x", Breakpoint, 1140, 2.0),
];

/// Profiles of a single form factor, in table order
pub fn profiles_in(group: DeviceGroup) -> impl Iterator<Item = &'static DeviceProfile> {
    DEVICES.iter().filter(move |d| d.group == group)
}

/// Physical width of every profile, in table order. Duplicates are kept.
pub fn physical_widths() -> impl Iterator<Item = u32> {
    DEVICES.iter().map(DeviceProfile::physical_width)
}
