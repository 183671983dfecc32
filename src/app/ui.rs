use crate::tutor::{Flow, Snapshot};
use crate::ui::components::{Completion, Feedback, Footer, Header, KeyCaps, ScenePreview, Task};
use crate::ui::compositor::Compositor;
use anyhow::Result;

pub const HEADER: &str = "header";
pub const TASK: &str = "task";
pub const KEYCAPS: &str = "keycaps";
pub const FEEDBACK: &str = "feedback";
pub const SCENE: &str = "scene";
pub const COMPLETION: &str = "completion";
pub const FOOTER: &str = "footer";

pub struct UISystem {
    pub compositor: Compositor,
}

impl UISystem {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let mut compositor = Compositor::new(width, height);

        compositor.add_component(HEADER, Header, true)?;
        compositor.add_component(TASK, Task, true)?;
        compositor.add_component(KEYCAPS, KeyCaps, true)?;
        compositor.add_component(FEEDBACK, Feedback, true)?;
        compositor.add_component(SCENE, ScenePreview, false)?;
        compositor.add_component(FOOTER, Footer, true)?;

        // Add invisible components
        compositor.add_component(COMPLETION, Completion, false)?;

        Ok(Self { compositor })
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.compositor.resize(width, height);
    }

    /// Swaps the exercise view for the completion summary and shows the
    /// scene preview only in the level flow.
    pub fn sync(&mut self, snapshot: &Snapshot, flow: Flow) -> Result<()> {
        let playing = !snapshot.all_completed;
        for id in [TASK, KEYCAPS, FEEDBACK] {
            self.compositor.mark_visible(id, playing)?;
        }
        let scene = playing && flow == Flow::Level && snapshot.scene().is_some();
        self.compositor.mark_visible(SCENE, scene)?;
        self.compositor.mark_visible(COMPLETION, !playing)?;
        // Every component reads the snapshot; the diff keeps output small.
        self.compositor.mark_all_dirty();
        Ok(())
    }
}
