//! dialoguer prompts

use crate::error::{Result, SkyswoopError};
use crate::types::{MenuItem, VideoFormat, VideoQuality};
use dialoguer::{theme::ColorfulTheme, Input, Select};

/// Select an item from the menu; `None` when cancelled
pub fn select<T: Clone>(items: &[MenuItem<T>], prompt: &str, default: usize) -> Option<T> {
    if items.is_empty() {
        return None;
    }

    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&labels)
        .default(default.min(items.len() - 1))
        .interact_opt()
        .ok()
        .flatten()?;

    items.get(selection).map(|item| item.value.clone())
}

/// Ask for a post URL
pub fn prompt_url() -> Result<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Paste Bluesky video URL")
        .allow_empty(true)
        .interact_text()
        .map_err(|_| SkyswoopError::NoSelection)
}

pub fn choose_format(current: VideoFormat) -> Result<VideoFormat> {
    let items: Vec<MenuItem<VideoFormat>> = VideoFormat::ALL
        .iter()
        .map(|f| MenuItem {
            label: f.as_str().to_uppercase(),
            value: *f,
        })
        .collect();
    let default = VideoFormat::ALL.iter().position(|f| *f == current).unwrap_or(0);

    select(&items, "Format", default).ok_or(SkyswoopError::NoSelection)
}

pub fn choose_quality(current: VideoQuality) -> Result<VideoQuality> {
    let items: Vec<MenuItem<VideoQuality>> = VideoQuality::ALL
        .iter()
        .map(|q| MenuItem {
            label: format!("{} (~{})", q, q.estimated_size()),
            value: *q,
        })
        .collect();
    let default = VideoQuality::ALL.iter().position(|q| *q == current).unwrap_or(0);

    select(&items, "Quality", default).ok_or(SkyswoopError::NoSelection)
}
