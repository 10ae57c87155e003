use iced::widget::{column, container, row};
use iced::{Alignment, Element};
use reqview_viewer::{HighlightSpan, SeverityColorMap};

use crate::app::Message;
use crate::theme::{ThemePalette, highlight_badge_style, parse_hex_color, text_muted, text_primary};

/// One line per tagged span with its severity colour and matched text.
pub fn highlights_view(
    matches: Vec<(HighlightSpan, String)>,
    colors: &SeverityColorMap,
    theme: ThemePalette,
) -> Element<'static, Message> {
    if matches.is_empty() {
        return text_muted("No highlighted matches", 12, theme).into();
    }
    let mut list = column![text_muted(format!("{} matches", matches.len()), 12, theme)].spacing(4);
    for (span, matched) in matches {
        let color = parse_hex_color(colors.color(span.severity), theme.accent);
        let badge = container(iced::widget::text(span.severity.name()).size(11))
            .padding([2, 6])
            .style(move |_| highlight_badge_style(theme, color));
        list = list.push(
            row![
                badge,
                text_muted(
                    format!("{} {}..{}", span.tab.title(), span.start, span.end),
                    12,
                    theme
                ),
                text_primary(matched, 12, theme),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        );
    }
    list.into()
}
