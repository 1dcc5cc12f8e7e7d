use crate::anim::{ENTRANCE_DISTANCE, EntranceFrame};
use crate::app::{CardList, CardTarget};
use crate::data::Dataset;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

/// Columns a card slides across while entering.
const SLIDE_COLUMNS: f64 = 4.0;

/// Map an entrance frame onto terminal styling: opacity becomes brightness,
/// offset becomes leading indent.
fn entrance_style(frame: EntranceFrame) -> (Style, String) {
    let fg = if frame.opacity < 0.34 {
        Color::DarkGray
    } else if frame.opacity < 0.67 {
        Color::Gray
    } else {
        Color::White
    };
    let offset = frame.offset_x.abs().max(frame.offset_y.abs());
    let indent = (offset / ENTRANCE_DISTANCE * SLIDE_COLUMNS).round().max(0.0) as usize;
    (Style::default().fg(fg), " ".repeat(indent))
}

fn bookmark(saved: bool) -> Span<'static> {
    if saved {
        Span::styled("♥ ", Style::default().fg(Color::Magenta))
    } else {
        Span::styled("♡ ", Style::default().fg(Color::DarkGray))
    }
}

/// Render the mounted card at `index` of `list` as a two-line list entry.
pub fn card_item(dataset: &Dataset, list: &CardList, index: usize, width: usize) -> ListItem<'static> {
    let Some(card) = list.page().get(index) else {
        return ListItem::new(Line::from(""));
    };
    let (style, indent) = entrance_style(list.entrances.frame(index));
    let width = width.saturating_sub(indent.len() + 4);
    let dim = Style::default().fg(Color::DarkGray);

    let (first, second) = match card.target {
        CardTarget::Item(r) => {
            let item = dataset.item(r);
            let mut detail = vec![item.category.as_str().to_string()];
            if let Some(tag) = item.headline_style() {
                detail.push(tag.to_string());
            }
            detail.push(item.color.clone());
            if let Some(brand) = &item.brand {
                detail.push(brand.clone());
            }
            (
                Line::from(vec![
                    Span::raw(indent.clone()),
                    bookmark(list.bookmarks.is_saved(index)),
                    Span::styled(
                        super::truncate_str(&item.name, width),
                        style.add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(vec![
                    Span::raw(format!("{}  ", indent)),
                    Span::styled(super::truncate_str(&detail.join(" · "), width), dim),
                ]),
            )
        }
        CardTarget::Outfit(r) => {
            let outfit = dataset.outfit(r);
            let slots: Vec<String> = dataset
                .slot_names(outfit)
                .into_iter()
                .map(|(slot, name)| format!("{}: {}", slot.label(), name))
                .collect();
            (
                Line::from(vec![
                    Span::raw(indent.clone()),
                    bookmark(list.bookmarks.is_saved(index)),
                    Span::styled(outfit.title.clone(), style.add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!("  {}", outfit.tags.join(" · ")),
                        Style::default().fg(Color::Yellow),
                    ),
                ]),
                Line::from(vec![
                    Span::raw(format!("{}  ", indent)),
                    Span::styled(super::truncate_str(&slots.join(" | "), width), dim),
                ]),
            )
        }
        CardTarget::Collection(i) => {
            let collection = &dataset.collections()[i];
            let count = collection.outfits.len();
            (
                Line::from(vec![
                    Span::raw(indent.clone()),
                    Span::styled(collection.name.clone(), style.add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!("  {} outfit{}", count, if count == 1 { "" } else { "s" }),
                        Style::default().fg(Color::Yellow),
                    ),
                ]),
                Line::from(vec![
                    Span::raw(indent),
                    Span::styled(super::truncate_str(&collection.description, width), dim),
                ]),
            )
        }
    };
    ListItem::new(vec![first, second])
}
