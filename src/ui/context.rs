use crate::input::layout::KeyboardLayout;
use crate::tutor::{Flow, Snapshot};
use crate::ui::theme::Theme;

pub struct RenderContext<'a> {
    pub snapshot: &'a Snapshot,
    pub layout: &'a KeyboardLayout,
    pub theme: &'a Theme,
    pub flow: Flow,
    /// Digits typed so far while the go-to prompt is open.
    pub prompt: Option<&'a str>,
}
