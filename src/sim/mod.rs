pub mod event;
pub mod site;
pub mod step;
