pub mod config;
pub mod gpu;
pub mod input;
pub mod resource;
pub mod shader;
pub mod triangle;
pub mod view;
pub mod wnd;
