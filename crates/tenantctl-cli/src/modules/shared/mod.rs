mod actions;
pub(crate) mod args;
mod render;
mod resource_file;

pub(crate) use actions::{handle_patch, handle_resource, target_id};
pub(crate) use render::print_value;
pub(crate) use resource_file::read_resource_file;
