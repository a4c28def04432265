//! Window and rendering configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Window title
    pub title: String,

    /// Line colour at particle id 0 (linear RGB)
    pub color_start: [f32; 3],

    /// Line colour at particle id 1 (linear RGB)
    pub color_end: [f32; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            title: "Audio Lissajous Lines".to_string(),
            color_start: [1.0, 0.2, 0.8], // Pink
            color_end: [0.6, 0.0, 1.0],   // Violet
        }
    }
}
