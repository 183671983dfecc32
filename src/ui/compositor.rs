use crate::ui::Drawable;
use crate::ui::components::Component;
use crate::ui::context::RenderContext;
use crate::ui::render_buffer::RenderBuffer;
use anyhow::{Result, anyhow};
use std::io::Write;

pub struct Compositor {
    // Drawn in insertion order.
    components: Vec<(String, Component)>,
    current_buffer: RenderBuffer,
    previous_buffer: Option<RenderBuffer>,
}

impl Compositor {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            components: Vec::new(),
            current_buffer: RenderBuffer::new(width, height),
            previous_buffer: None,
        }
    }

    pub fn add_component<C: Drawable + 'static>(
        &mut self,
        id: &str,
        drawable: C,
        visible: bool,
    ) -> Result<String> {
        if self.components.iter().any(|(existing, _)| existing == id) {
            return Err(anyhow!("Component already exists"));
        }
        let component = if visible {
            Component::new(Box::new(drawable))
        } else {
            Component::new_invisible(Box::new(drawable))
        };
        self.components.push((id.to_string(), component));
        Ok(id.to_string())
    }

    fn get_component_mut(&mut self, component_id: &str) -> Option<&mut Component> {
        self.components
            .iter_mut()
            .find(|(id, _)| id == component_id)
            .map(|(_, component)| component)
    }

    pub fn mark_visible(&mut self, component_id: &str, visible: bool) -> Result<()> {
        let component = self
            .get_component_mut(component_id)
            .ok_or_else(|| anyhow!("Component not found"))?;
        if component.visible != visible {
            component.visible = visible;
            component.dirty = true;
        }
        Ok(())
    }

    pub fn mark_all_dirty(&mut self) {
        for (_, component) in self.components.iter_mut() {
            component.dirty = true;
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.current_buffer = RenderBuffer::new(width, height);
        // Invalidate previous buffer on resize
        self.previous_buffer = None;
        self.mark_all_dirty();
    }

    #[cfg(test)]
    pub fn buffer(&self) -> &RenderBuffer {
        &self.current_buffer
    }

    /// Draws dirty components, then writes only the cells that changed since
    /// the last frame.
    pub fn render<W: Write>(&mut self, context: &RenderContext, writer: &mut W) -> Result<()> {
        // Hidden components are cleared first so overlapping visible ones win.
        for (_, component) in self.components.iter_mut() {
            if component.dirty && !component.visible {
                component.drawable.clear(&mut self.current_buffer, context)?;
                component.dirty = false;
            }
        }
        for (_, component) in self.components.iter_mut() {
            if component.dirty {
                component.drawable.draw(&mut self.current_buffer, context)?;
                component.dirty = false;
            }
        }

        let base = context.theme.base_style();
        if let Some(ref previous) = self.previous_buffer {
            for change in self.current_buffer.diff(previous) {
                change.flush(writer, &base)?
            }
        } else {
            self.current_buffer.flush(writer, &base)?;
        }

        self.previous_buffer = Some(self.current_buffer.clone());

        Ok(())
    }
}
