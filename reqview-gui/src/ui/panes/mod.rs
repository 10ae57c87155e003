pub mod header_rows;
pub mod highlights;
pub mod raw_view;

pub use header_rows::{NewHeaderDraft, header_rows_view};
pub use highlights::highlights_view;
pub use raw_view::raw_view;

use iced::widget::scrollable;
use iced::{Element, Length};

use crate::app::Message;

pub fn pane_scroll(content: Element<'_, Message>) -> Element<'_, Message> {
    scrollable(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

pub fn format_bytes(bytes: usize) -> String {
    if bytes > 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes > 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
