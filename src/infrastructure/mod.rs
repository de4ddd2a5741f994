pub mod json_renderer;
