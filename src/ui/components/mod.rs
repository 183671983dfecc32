mod completion;
mod feedback;
mod footer;
mod header;
mod keycaps;
mod scene;
mod task;

pub use completion::Completion;
pub use feedback::Feedback;
pub use footer::Footer;
pub use header::Header;
pub use keycaps::KeyCaps;
pub use scene::ScenePreview;
pub use task::Task;

use crate::ui::Drawable;

pub(crate) const HEADER_ROW: usize = 0;
pub(crate) const PROGRESS_ROW: usize = 1;
pub(crate) const TASK_ROW: usize = 3;
pub(crate) const HINT_ROW: usize = 4;
pub(crate) const KEYCAP_ROW: usize = 6;
pub(crate) const STATUS_ROW: usize = 8;
pub(crate) const COMBO_ROW: usize = 9;
pub(crate) const SCENE_ROW: usize = 11;
pub(crate) const MARGIN: usize = 2;

pub struct Component {
    pub dirty: bool,
    pub visible: bool,
    pub(in crate::ui) drawable: Box<dyn Drawable>,
}

impl Component {
    pub fn new(drawable: Box<dyn Drawable>) -> Self {
        Self {
            dirty: true,
            visible: true,
            drawable,
        }
    }

    pub fn new_invisible(drawable: Box<dyn Drawable>) -> Self {
        Self {
            dirty: true,
            visible: false,
            drawable,
        }
    }
}
