use iced::widget::{container, text_editor};
use iced::{Element, Font, Length};
use reqview_viewer::ViewerSide;

use crate::app::Message;
use crate::theme::{ThemePalette, pane_border_style};

/// Raw head and body text. Without `editable` the editor ignores input.
pub fn raw_view(
    content: &text_editor::Content,
    side: ViewerSide,
    editable: bool,
    theme: ThemePalette,
) -> Element<'_, Message> {
    let editor = text_editor(content)
        .font(Font::MONOSPACE)
        .size(13)
        .height(Length::Fill);
    let editor = if editable {
        editor.on_action(move |action| Message::RawEdited(side, action))
    } else {
        editor
    };
    container(editor)
        .padding(8)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| pane_border_style(theme))
        .into()
}
