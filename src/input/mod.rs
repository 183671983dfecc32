pub mod events;
pub mod keys;
pub mod layout;
pub mod matcher;
pub mod normalizer;
