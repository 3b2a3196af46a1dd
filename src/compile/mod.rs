/// Scene-to-timeline compiler.
pub mod timeline;
