use crate::consts;
use ratatui::layout::{Rect, Size};
use std::path::PathBuf;

/// Return the path to the file `name` in the program's local data directory
pub(crate) fn data_file_path(name: &str) -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join(consts::APP_DIR_NAME).join(name))
}

/// Return a rectangle of the given size centered within `area`, clipped to
/// `area` if it does not fit.  Odd leftover space goes after the rectangle.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let width = size.width.min(area.width);
    let height = size.height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render an error and all of its sources on one line, separated by colons
pub(crate) fn error_chain(e: &dyn std::error::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(src) = source {
        msg.push_str(": ");
        msg.push_str(&src.to_string());
        source = src.source();
    }
    msg
}
