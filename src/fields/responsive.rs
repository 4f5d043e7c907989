//! Device breakpoint tabs.

use std::collections::BTreeMap;

use super::{Device, Field, FieldError, FieldKind, HiddenInput};

/// Tabs switching the device whose values are being edited.
///
/// Submits nothing itself; switching is propagated to device-aware widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponsiveTabs {
    name: String,
    devices: Vec<Device>,
    active: Device,
    has_values: BTreeMap<Device, bool>,
}

impl ResponsiveTabs {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            devices: Device::ALL.to_vec(),
            active: Device::Desktop,
            has_values: BTreeMap::new(),
        }
    }

    pub fn with_devices(mut self, devices: Vec<Device>) -> Self {
        if !devices.is_empty() {
            self.active = devices[0];
            self.devices = devices;
        }
        self
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn active(&self) -> Device {
        self.active
    }

    /// Switch device. Always emits, even when re-selecting the active tab.
    pub fn set_active(&mut self, device: Device) {
        self.active = device;
    }

    pub fn next(&mut self) {
        self.shift(1);
    }

    pub fn prev(&mut self) {
        self.shift(self.devices.len().saturating_sub(1));
    }

    fn shift(&mut self, by: usize) {
        let len = self.devices.len();
        if len == 0 {
            return;
        }
        let current = self.devices.iter().position(|d| *d == self.active).unwrap_or(0);
        self.active = self.devices[(current + by) % len];
    }

    /// Mark a device as carrying its own value (shown as a dot on the tab).
    pub fn set_has_value(&mut self, device: Device, has_value: bool) {
        self.has_values.insert(device, has_value);
    }

    pub fn has_value(&self, device: Device) -> bool {
        self.has_values.get(&device).copied().unwrap_or(false)
    }
}

impl Field for ResponsiveTabs {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FieldKind {
        FieldKind::ResponsiveTabs
    }

    fn value(&self) -> String {
        self.active.to_string()
    }

    fn load(&mut self, value: &str) -> Result<(), FieldError> {
        self.active = value.parse()?;
        Ok(())
    }

    fn set_device(&mut self, device: Device) {
        self.active = device;
    }

    fn hidden_inputs(&self) -> Vec<HiddenInput> {
        Vec::new()
    }
}
