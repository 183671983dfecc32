use crate::app::Tutor;
use crate::config::Config;
use anyhow::Result;

#[derive(Default)]
pub struct TutorBuilder {
    pub(super) config: Option<Config>,
}

impl TutorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<Tutor> {
        Tutor::from_builder(self)
    }
}
