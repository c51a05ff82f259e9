//! Host adapter - the presentation tree the controller writes to.
//!
//! [`Host`] is the thin layer between the form model and whatever renders
//! it. [`MemoryHost`] is a headless implementation that keeps the signup
//! markup as a flat list of nodes in document order.

use std::collections::HashMap;

use thiserror::Error;

use crate::strength::{MeterLayout, StrengthMeter};
use crate::ui::{
    FieldId, FieldStyle, InlineStyle, InputKind, PasswordField, SubmitButton, SuccessView,
    ToggleIcon, Tooltip,
};

/// Elements the controller must find before binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    EmailInput,
    PasswordInput,
    ConfirmationInput,
    SubmitButton,
    Container,
}

impl Selector {
    pub const REQUIRED: [Selector; 5] = [
        Selector::EmailInput,
        Selector::PasswordInput,
        Selector::ConfirmationInput,
        Selector::SubmitButton,
        Selector::Container,
    ];

    pub fn css(self) -> &'static str {
        match self {
            Selector::EmailInput => ".email input",
            Selector::PasswordInput => ".password1 input",
            Selector::ConfirmationInput => ".password2 input",
            Selector::SubmitButton => ".btn",
            Selector::Container => ".container",
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BindError {
    #[error("Required element not found: {0}")]
    MissingElement(Selector),
    #[error("Form controller must be bound inside a Tokio runtime")]
    NoRuntime,
}

/// Checks that every required element is present.
///
/// # Errors
///
/// Returns the first missing [`Selector`], in [`Selector::REQUIRED`] order.
pub fn check_required<H: Host + ?Sized>(host: &H) -> Result<(), BindError> {
    match Selector::REQUIRED.into_iter().find(|s| !host.contains(*s)) {
        Some(missing) => Err(BindError::MissingElement(missing)),
        None => Ok(()),
    }
}

/// Presentation tree the form controller drives.
pub trait Host {
    /// Whether an element matching `selector` exists.
    fn contains(&self, selector: Selector) -> bool;

    fn set_field_style(&mut self, field: FieldId, style: FieldStyle);

    /// Inserts `tooltip`, with its class and style, directly after the group
    /// of its anchor field. Does nothing if that group is gone.
    fn insert_tooltip(&mut self, tooltip: &Tooltip);

    /// Removes the tooltip if one is present. Returns whether one was removed.
    fn remove_tooltip(&mut self) -> bool;

    /// Appends a visibility toggle icon styled with `style` to a password group.
    fn install_toggle(&mut self, field: PasswordField, icon: ToggleIcon, style: InlineStyle);

    /// Switches the input `type` and the toggle icon of a password field.
    fn set_visibility(&mut self, field: PasswordField, kind: InputKind, icon: ToggleIcon);

    /// Inserts the strength meter directly after the first password group.
    fn install_strength_meter(&mut self, meter: &StrengthMeter, layout: &MeterLayout);

    /// Repaints every segment of the strength meter.
    fn paint_strength_meter(&mut self, meter: &StrengthMeter);

    fn set_submit_button(&mut self, button: &SubmitButton);

    /// Replaces the whole content of the form container.
    fn show_success(&mut self, view: &SuccessView);
}

/// A node of the in-memory document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Group(FieldId),
    StrengthMeter(StrengthMeter),
    Tooltip(Tooltip),
    SubmitButton(SubmitButton),
    Success(SuccessView),
}

/// Headless [`Host`] holding the signup markup in memory.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    nodes: Vec<Node>,
    styles: HashMap<FieldId, FieldStyle>,
    toggles: HashMap<PasswordField, (InputKind, ToggleIcon)>,
    toggle_styles: HashMap<PasswordField, InlineStyle>,
    meter_layout: Option<MeterLayout>,
    absent: Vec<Selector>,
    success_renders: usize,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Standard signup markup: three field groups and the submit button.
    pub fn new() -> Self {
        Self {
            nodes: vec![
                Node::Group(FieldId::Email),
                Node::Group(FieldId::Password),
                Node::Group(FieldId::Confirmation),
                Node::SubmitButton(SubmitButton {
                    label: "Create account".to_string(),
                    disabled: false,
                }),
            ],
            styles: HashMap::new(),
            toggles: HashMap::new(),
            toggle_styles: HashMap::new(),
            meter_layout: None,
            absent: Vec::new(),
            success_renders: 0,
        }
    }

    /// Same markup with one required element left out.
    pub fn without(selector: Selector) -> Self {
        let mut host = Self::new();
        host.absent.push(selector);
        host
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn style(&self, field: FieldId) -> Option<FieldStyle> {
        self.styles.get(&field).copied()
    }

    pub fn tooltips(&self) -> Vec<&Tooltip> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Tooltip(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltips().into_iter().next()
    }

    pub fn toggle(&self, field: PasswordField) -> Option<(InputKind, ToggleIcon)> {
        self.toggles.get(&field).copied()
    }

    pub fn strength_meter(&self) -> Option<&StrengthMeter> {
        self.nodes.iter().find_map(|n| match n {
            Node::StrengthMeter(m) => Some(m),
            _ => None,
        })
    }

    pub fn submit_button(&self) -> Option<&SubmitButton> {
        self.nodes.iter().find_map(|n| match n {
            Node::SubmitButton(b) => Some(b),
            _ => None,
        })
    }

    pub fn success_view(&self) -> Option<&SuccessView> {
        self.nodes.iter().find_map(|n| match n {
            Node::Success(v) => Some(v),
            _ => None,
        })
    }

    pub fn toggle_style(&self, field: PasswordField) -> Option<InlineStyle> {
        self.toggle_styles.get(&field).copied()
    }

    pub fn meter_layout(&self) -> Option<&MeterLayout> {
        self.meter_layout.as_ref()
    }

    /// How many times the container was replaced by the success view.
    pub fn success_renders(&self) -> usize {
        self.success_renders
    }

    fn group_position(&self, field: FieldId) -> Option<usize> {
        self.nodes.iter().position(|n| *n == Node::Group(field))
    }

    fn insert_after_group(&mut self, field: FieldId, node: Node) -> bool {
        match self.group_position(field) {
            Some(pos) => {
                self.nodes.insert(pos + 1, node);
                true
            }
            None => false,
        }
    }
}

impl Host for MemoryHost {
    fn contains(&self, selector: Selector) -> bool {
        if self.absent.contains(&selector) {
            return false;
        }
        match selector {
            Selector::EmailInput => self.group_position(FieldId::Email).is_some(),
            Selector::PasswordInput => self.group_position(FieldId::Password).is_some(),
            Selector::ConfirmationInput => self.group_position(FieldId::Confirmation).is_some(),
            Selector::SubmitButton => self.submit_button().is_some(),
            Selector::Container => true,
        }
    }

    fn set_field_style(&mut self, field: FieldId, style: FieldStyle) {
        self.styles.insert(field, style);
    }

    fn insert_tooltip(&mut self, tooltip: &Tooltip) {
        self.insert_after_group(tooltip.anchor, Node::Tooltip(tooltip.clone()));
    }

    fn remove_tooltip(&mut self) -> bool {
        match self.nodes.iter().position(|n| matches!(n, Node::Tooltip(_))) {
            Some(pos) => {
                self.nodes.remove(pos);
                true
            }
            None => false,
        }
    }

    fn install_toggle(&mut self, field: PasswordField, icon: ToggleIcon, style: InlineStyle) {
        if self.group_position(field.field_id()).is_some() {
            self.toggles.insert(field, (InputKind::Masked, icon));
            self.toggle_styles.insert(field, style);
        }
    }

    fn set_visibility(&mut self, field: PasswordField, kind: InputKind, icon: ToggleIcon) {
        if let Some(toggle) = self.toggles.get_mut(&field) {
            *toggle = (kind, icon);
        }
    }

    fn install_strength_meter(&mut self, meter: &StrengthMeter, layout: &MeterLayout) {
        if self.insert_after_group(FieldId::Password, Node::StrengthMeter(*meter)) {
            self.meter_layout = Some(*layout);
        }
    }

    fn paint_strength_meter(&mut self, meter: &StrengthMeter) {
        for node in self.nodes.iter_mut() {
            if let Node::StrengthMeter(m) = node {
                *m = *meter;
            }
        }
    }

    fn set_submit_button(&mut self, button: &SubmitButton) {
        for node in self.nodes.iter_mut() {
            if let Node::SubmitButton(b) = node {
                *b = button.clone();
            }
        }
    }

    fn show_success(&mut self, view: &SuccessView) {
        self.nodes = vec![Node::Success(view.clone())];
        self.styles.clear();
        self.toggles.clear();
        self.toggle_styles.clear();
        self.meter_layout = None;
        self.success_renders += 1;
    }
}
