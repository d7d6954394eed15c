use serde::{Deserialize, Serialize};

fn default_max_body_chars() -> usize {
    120
}

fn default_show_images() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone)]
pub struct UiConfig {
    /// Longest rendered body line before the presenter truncates it
    #[serde(default = "default_max_body_chars")]
    pub max_body_chars: usize,

    /// Whether debug-image updates are shown at all
    #[serde(default = "default_show_images")]
    pub show_images: bool,
}

impl UiConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_body_chars: default_max_body_chars(),
            show_images: default_show_images(),
        }
    }
}
