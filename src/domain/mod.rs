pub mod contact;
pub mod content;
pub mod gallery;
pub mod intro;
pub mod nav;
pub mod reveal;
pub mod timeline;
pub mod typing;
