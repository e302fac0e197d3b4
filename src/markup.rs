//! Inline color tags → styled [`Text`].
//!
//! Feed text carries tags like `[yellow]Priority: High[-]`.  A known color
//! name in brackets pushes that foreground color; `[-]` restores whatever
//! color enclosed it.  Bracketed text that is not a known tag (common in
//! headlines, e.g. `[pdf]`) is shown as-is.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span, Text},
};

fn color_for(name: &str) -> Option<Color> {
    let color = match name {
        "white" => Color::White,
        "lightgray" => Color::Gray,
        "gray" => Color::Indexed(245),
        "darkgray" => Color::DarkGray,
        "black" => Color::Black,
        "yellow" => Color::Yellow,
        "green" => Color::Green,
        "red" => Color::Red,
        _ => return None,
    };
    Some(color)
}

enum Tag {
    Push(Color),
    Pop,
}

fn parse_tag(name: &str) -> Option<Tag> {
    if name == "-" {
        Some(Tag::Pop)
    } else {
        color_for(name).map(Tag::Push)
    }
}

/// Parse tagged text into styled lines.  Color state carries across line
/// breaks, so one tag can color a multi-line block.
pub fn to_text(input: &str) -> Text<'static> {
    let mut stack: Vec<Color> = Vec::new();
    let mut lines = Vec::new();

    for raw_line in input.split('\n') {
        let mut spans = Vec::new();
        let mut plain = String::new();
        let mut rest = raw_line;

        while let Some(open) = rest.find('[') {
            let after = &rest[open + 1..];
            let tag = after
                .find(']')
                .and_then(|close| parse_tag(&after[..close]).map(|t| (t, close)));

            match tag {
                Some((tag, close)) => {
                    plain.push_str(&rest[..open]);
                    flush(&mut spans, &mut plain, stack.last().copied());
                    match tag {
                        Tag::Push(color) => stack.push(color),
                        Tag::Pop => {
                            stack.pop();
                        }
                    }
                    rest = &after[close + 1..];
                }
                None => {
                    plain.push_str(&rest[..=open]);
                    rest = after;
                }
            }
        }
        plain.push_str(rest);
        flush(&mut spans, &mut plain, stack.last().copied());

        lines.push(Line::from(spans));
    }

    Text::from(lines)
}

fn flush(spans: &mut Vec<Span<'static>>, plain: &mut String, color: Option<Color>) {
    if plain.is_empty() {
        return;
    }
    let style = color.map_or_else(Style::default, |c| Style::default().fg(c));
    spans.push(Span::styled(std::mem::take(plain), style));
}
