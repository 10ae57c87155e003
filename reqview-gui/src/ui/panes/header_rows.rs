use iced::widget::{column, container, row, text_input};
use iced::{Alignment, Element, Length};
use reqview_viewer::{HeaderTable, TabularEditor, ViewerSide};

use crate::app::Message;
use crate::theme::{ThemePalette, action_button, text_input_style, text_muted, text_primary};
use crate::ui::panes::pane_scroll;

const NAME_WIDTH: f32 = 200.0;

pub struct NewHeaderDraft<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

pub fn header_rows_view<'a>(
    table: &'a HeaderTable,
    side: ViewerSide,
    editable: bool,
    draft: NewHeaderDraft<'a>,
    theme: ThemePalette,
) -> Element<'a, Message> {
    let mut titles = row![].spacing(8);
    for column in table.columns() {
        let title = text_muted(column.title(), 12, theme);
        titles = match column {
            reqview_viewer::HeaderColumn::Name => {
                titles.push(container(title).width(Length::Fixed(NAME_WIDTH)))
            }
            reqview_viewer::HeaderColumn::Value => titles.push(title),
        };
    }

    let mut rows = column![titles].spacing(6);
    for (index, header_row) in table.rows().iter().enumerate() {
        let mut value = text_input("value", &header_row.entry.value)
            .padding(4)
            .size(13)
            .style(move |_theme, status| text_input_style(theme, status));
        if editable {
            value = value.on_input(move |value| Message::HeaderValueChanged(side, index, value));
        }
        let mut line = row![
            container(text_primary(header_row.entry.name.clone(), 13, theme))
                .width(Length::Fixed(NAME_WIDTH)),
            value,
        ]
        .spacing(8)
        .align_y(Alignment::Center);
        for action in header_row.actions() {
            let message = editable.then_some(Message::HeaderRowAction(side, index, action));
            line = line.push(action_button(action.label(), message, theme));
        }
        rows = rows.push(line);
    }

    if table.is_empty() {
        rows = rows.push(text_muted("(no headers)", 12, theme));
    }

    if editable {
        let add_message = (!draft.name.trim().is_empty()).then_some(Message::AddHeader(side));
        rows = rows.push(
            row![
                text_input("Header name", draft.name)
                    .on_input(Message::NewHeaderNameChanged)
                    .padding(4)
                    .size(13)
                    .width(Length::Fixed(NAME_WIDTH))
                    .style(move |_theme, status| text_input_style(theme, status)),
                text_input("Header value", draft.value)
                    .on_input(Message::NewHeaderValueChanged)
                    .padding(4)
                    .size(13)
                    .style(move |_theme, status| text_input_style(theme, status)),
                action_button("Add", add_message, theme),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        );
    }

    pane_scroll(container(rows).padding(12).into())
}
