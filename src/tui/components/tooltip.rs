//! Tooltip overlay anchored to a field row.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::fields::{Rect as Anchor, Size, TooltipTrigger, place_tooltip};

/// Widest tooltip box, in cells.
const MAX_WIDTH: u16 = 48;

fn to_anchor(rect: Rect) -> Anchor {
    Anchor::new(
        f64::from(rect.x),
        f64::from(rect.y),
        f64::from(rect.width),
        f64::from(rect.height),
    )
}

/// Box for `trigger` next to `anchor`, kept inside `viewport`.
///
/// `gap` and `margin` are in cells.
pub fn tooltip_area(
    trigger: &TooltipTrigger,
    anchor: Rect,
    viewport: Rect,
    gap: f64,
    margin: f64,
) -> Rect {
    let width = (trigger.text.chars().count() as u16 + 4)
        .min(MAX_WIDTH)
        .min(viewport.width);
    let inner = width.saturating_sub(4).max(1);
    let lines = (trigger.text.chars().count() as u16).div_ceil(inner).max(1);
    let height = (lines + 2).min(viewport.height);

    let origin = place_tooltip(
        to_anchor(anchor),
        Size::new(f64::from(width), f64::from(height)),
        Size::new(
            f64::from(viewport.x + viewport.width),
            f64::from(viewport.y + viewport.height),
        ),
        trigger.placement,
        gap,
        margin,
    );
    Rect::new(
        origin.x.round().max(0.0) as u16,
        origin.y.round().max(0.0) as u16,
        width,
        height,
    )
    .intersection(viewport)
}

pub fn render_tooltip(frame: &mut Frame, trigger: &TooltipTrigger, anchor: Rect, gap: f64, margin: f64) {
    let area = tooltip_area(trigger, anchor, frame.area(), gap, margin);
    if area.is_empty() {
        return;
    }
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    frame.render_widget(
        Paragraph::new(trigger.text.clone())
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Placement;

    #[test]
    fn top_placement_sits_above_anchor() {
        let trigger = TooltipTrigger::new("f", "hello", Placement::Top);
        let area = tooltip_area(&trigger, Rect::new(10, 10, 20, 1), Rect::new(0, 0, 80, 24), 0.0, 1.0);
        assert_eq!(area.height, 3);
        assert_eq!(area.y + area.height, 10);
    }

    #[test]
    fn stays_inside_viewport() {
        let trigger = TooltipTrigger::new("f", "a fairly long tooltip text", Placement::Top);
        let viewport = Rect::new(0, 0, 40, 12);
        let area = tooltip_area(&trigger, Rect::new(0, 0, 10, 1), viewport, 1.0, 1.0);
        assert_eq!(viewport.intersection(area), area);
    }
}
