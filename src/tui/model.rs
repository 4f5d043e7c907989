//! Application model for the TUI.

use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr};
use tracing::{debug, warn};
use tuirealm::Update;

use crate::config::PanelConfig;
use crate::fields::{AnyField, Device, FieldChange, TooltipController};
use crate::form::{FormData, stylesheet};
use crate::registry::Registry;

use super::activities::Msg;

const DEFAULT_EXPORT_PATH: &str = "fieldkit-form.json";

/// Application model containing all state shared between screens.
pub struct Model {
    pub config: PanelConfig,
    pub registry: Registry,

    // Derived output
    pub form: FormData,

    // Panel state
    pub device: Device,
    pub tooltip: TooltipController,

    // UI state
    pub quit: bool,
    pub show_help: bool,
    pub message: Option<String>,
    pub export_path: String,
}

impl Model {
    pub fn new(config: PanelConfig, registry: Registry) -> Self {
        let form = FormData::from_registry(&registry);
        let tooltip = TooltipController::new(config.tooltip.timing());
        Self {
            config,
            registry,
            form,
            device: Device::Desktop,
            tooltip,
            quit: false,
            show_help: false,
            message: None,
            export_path: DEFAULT_EXPORT_PATH.to_string(),
        }
    }

    /// Generated stylesheet for the custom-CSS fields.
    pub fn stylesheet(&self) -> String {
        stylesheet(
            &self.registry,
            &self.config.panel.selector_id,
            self.config.breakpoints,
        )
    }

    /// Export the current form to a file.
    pub fn export(&mut self) -> Result<()> {
        let json = self.form.to_json().wrap_err("Failed to serialize form")?;

        let path = PathBuf::from(&self.export_path);
        std::fs::write(&path, json + "\n")
            .wrap_err_with(|| format!("Failed to write to {}", path.display()))?;

        self.message = Some(format!("Exported to {}", path.display()));
        Ok(())
    }

    fn apply_change(&mut self, change: FieldChange) -> Option<Msg> {
        debug!(field = %change.name, inputs = change.inputs.len(), "field changed");
        self.form.apply(&change);
        self.message = None;
        match self.registry.get(&change.name) {
            Some(AnyField::ResponsiveTabs(tabs)) if tabs.active() != self.device => {
                Some(Msg::DeviceChanged(tabs.active()))
            }
            _ => None,
        }
    }
}

impl Update<Msg> for Model {
    /// Apply one message. A returned message should be processed next.
    fn update(&mut self, msg: Option<Msg>) -> Option<Msg> {
        let msg = msg?;

        match msg {
            Msg::Quit => {
                self.quit = true;
                None
            }
            Msg::ShowHelp => {
                self.show_help = true;
                None
            }
            Msg::HideHelp => {
                self.show_help = false;
                None
            }

            // A component's edited copy replaces the stored widget
            Msg::Edited(field) => match self.registry.replace(*field) {
                Ok(change) => self.apply_change(change),
                Err(e) => {
                    warn!(error = %e, "edit dropped");
                    self.message = Some(e.to_string());
                    None
                }
            },

            Msg::DeviceChanged(device) => {
                self.device = device;
                self.registry.set_active_device(device);
                // Device switches can touch several fields at once
                self.form = FormData::from_registry(&self.registry);
                self.message = Some(format!("Editing {} values", device.label()));
                None
            }
            Msg::NextDevice => {
                let index = Device::ALL
                    .iter()
                    .position(|d| *d == self.device)
                    .unwrap_or(0);
                Some(Msg::DeviceChanged(Device::ALL[(index + 1) % Device::ALL.len()]))
            }

            Msg::Reset(name) => match self.registry.reset(&name) {
                Ok(Some(change)) => {
                    self.apply_change(change);
                    self.message = Some(format!("Reset {name}"));
                    None
                }
                Ok(None) => {
                    self.message = Some(format!("{name} is already at its default"));
                    None
                }
                Err(e) => {
                    warn!(error = %e, "reset failed");
                    self.message = Some(e.to_string());
                    None
                }
            },

            Msg::Regenerate => {
                self.form = FormData::from_registry(&self.registry);
                self.message = Some(format!("Rebuilt {} form inputs", self.form.len()));
                None
            }

            Msg::Status(text) => {
                self.message = Some(text);
                None
            }

            // Export
            Msg::DoExport => {
                if let Err(e) = self.export() {
                    self.message = Some(format!("Export failed: {}", e));
                }
                None
            }

            // These messages don't need model updates
            Msg::FocusNext
            | Msg::FocusPrev
            | Msg::Focus(_)
            | Msg::Hover { .. }
            | Msg::ScrollUp
            | Msg::ScrollDown
            | Msg::SwitchToFormPreview
            | Msg::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Field;

    fn model() -> Model {
        let config = PanelConfig::builtin();
        let registry = Registry::from_config(&config).unwrap();
        Model::new(config, registry)
    }

    fn drain(model: &mut Model, msg: Msg) {
        let mut current = Some(msg);
        while let Some(m) = current {
            current = model.update(Some(m));
        }
    }

    #[test]
    fn next_device_propagates_to_fields() {
        let mut model = model();
        drain(&mut model, Msg::NextDevice);
        assert_eq!(model.device, Device::Tablet);
        let tabs = model.registry.get("device").unwrap();
        assert_eq!(tabs.value(), "tablet");
        assert!(model.form.get("device").is_none());
    }

    #[test]
    fn reset_restores_default_into_form() {
        let mut model = model();
        assert_eq!(model.form.get("border_radius"), Some("8px"));
        drain(&mut model, Msg::Reset("border_radius".to_string()));
        assert_eq!(model.form.get("border_radius"), Some("0px"));
        let field = model.registry.get("border_radius").unwrap();
        assert_eq!(field.value(), "0px");
    }

    #[test]
    fn edited_copy_reaches_registry_and_form() {
        let mut model = model();
        let Some(AnyField::Range(slider)) = model.registry.get("border_radius") else {
            panic!("border_radius should be a slider");
        };
        let mut slider = slider.clone();
        slider.step_up();
        let expected = slider.value();

        drain(&mut model, Msg::Edited(Box::new(slider.into())));
        assert_eq!(model.form.get("border_radius"), Some(expected.as_str()));
        assert_eq!(model.registry.get("border_radius").unwrap().value(), expected);
    }

    #[test]
    fn edited_tabs_switch_the_device() {
        let mut model = model();
        let Some(AnyField::ResponsiveTabs(tabs)) = model.registry.get("device") else {
            panic!("device should be responsive tabs");
        };
        let mut tabs = tabs.clone();
        tabs.set_active(Device::Mobile);

        drain(&mut model, Msg::Edited(Box::new(tabs.into())));
        assert_eq!(model.device, Device::Mobile);
    }
}
