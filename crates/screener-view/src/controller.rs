//! Tab Controller
//!
//! Keeps exactly one filter section visible and exactly one tab control
//! highlighted. Sections and controls are kept in registration order so
//! snapshots render them the same way every time.

use crate::error::TabError;
use crate::section::{FilterSection, TabControl};
use crate::Result;

#[derive(Debug, Clone, Default)]
pub struct TabController {
    sections: Vec<FilterSection>,
    controls: Vec<TabControl>,
}

impl TabController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one section and one control per `(key, label)` pair.
    ///
    /// The section id is the key and the control id is `<key>-tab`. The
    /// first pair starts active.
    pub fn with_tabs<I, K, L>(tabs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        let mut controller = Self::new();
        for (key, label) in tabs {
            let key = key.into();
            let label = label.into();
            controller.register_section(FilterSection::new(key.clone(), label.clone())?)?;
            controller.register_control(TabControl::new(format!("{key}-tab"), key, label)?)?;
        }

        let first = controller
            .controls
            .first()
            .map(|c| (c.section_id.clone(), c.id.clone()));
        if let Some((section_id, control_id)) = first {
            controller.activate_tab(&section_id, &control_id)?;
        }

        Ok(controller)
    }

    pub fn register_section(&mut self, section: FilterSection) -> Result<()> {
        if self.find_section(&section.id).is_some() {
            return Err(TabError::Duplicate(section.id));
        }
        self.sections.push(section);
        Ok(())
    }

    pub fn register_control(&mut self, control: TabControl) -> Result<()> {
        if self.find_control(&control.id).is_some() {
            return Err(TabError::Duplicate(control.id));
        }
        self.controls.push(control);
        Ok(())
    }

    /// Show the section `tab_id` and highlight `control_id`.
    ///
    /// Both ids are resolved before anything changes, so an unknown id
    /// leaves the current selection intact. Repeating a call is a no-op.
    pub fn activate_tab(&mut self, tab_id: &str, control_id: &str) -> Result<()> {
        let section_idx = self
            .find_section(tab_id)
            .ok_or_else(|| TabError::SectionNotFound(tab_id.to_string()))?;
        let control_idx = self
            .find_control(control_id)
            .ok_or_else(|| TabError::ControlNotFound(control_id.to_string()))?;

        for section in &mut self.sections {
            section.hide();
        }
        self.sections[section_idx].show();

        for control in &mut self.controls {
            control.deactivate();
        }
        self.controls[control_idx].activate();

        tracing::debug!(section = %tab_id, control = %control_id, "Activated tab");

        Ok(())
    }

    /// Activate a section through the first control registered for it
    pub fn select_section(&mut self, tab_id: &str) -> Result<()> {
        self.get_section(tab_id)?;
        let control_id = self
            .controls
            .iter()
            .find(|c| c.section_id == tab_id)
            .map(|c| c.id.clone())
            .ok_or_else(|| TabError::ControlNotFound(format!("{tab_id}-tab")))?;
        self.activate_tab(tab_id, &control_id)
    }

    pub fn active_section(&self) -> Option<&FilterSection> {
        self.sections.iter().find(|s| s.is_active())
    }

    pub fn active_control(&self) -> Option<&TabControl> {
        self.controls.iter().find(|c| c.is_active())
    }

    pub fn get_section(&self, id: &str) -> Result<&FilterSection> {
        self.find_section(id)
            .map(|idx| &self.sections[idx])
            .ok_or_else(|| TabError::SectionNotFound(id.to_string()))
    }

    pub fn sections(&self) -> &[FilterSection] {
        &self.sections
    }

    pub fn controls(&self) -> &[TabControl] {
        &self.controls
    }

    fn find_section(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    fn find_control(&self, id: &str) -> Option<usize> {
        self.controls.iter().position(|c| c.id == id)
    }
}
