//! UI rendering

use crate::app::View;
use adventure_core::prelude::*;
use adventure_core::{Actor, StatField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, state: &GameState, view: &View) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status bar
            Constraint::Min(8),    // Panels + log
            Constraint::Length(3), // Prompt
        ])
        .split(f.area());

    draw_status(f, state, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(body[0]);

    draw_party(f, state, view, side[0]);
    draw_foes(f, state, side[1]);
    draw_log(f, view, body[1]);
    draw_prompt(f, view, chunks[2]);
}

fn draw_status(f: &mut Frame, state: &GameState, area: Rect) {
    let (mode, color) = if state.in_battle() {
        ("BATTLE", Color::Red)
    } else {
        ("EXPLORING", Color::Green)
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  │  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Potions: {}", state.inventory.potions),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Coins: {}", state.inventory.coins),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled("  │  ", Style::default().fg(Color::DarkGray)),
        Span::styled("[help] commands  [Esc] quit", Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" Adventure "));
    f.render_widget(paragraph, area);
}

fn draw_party(f: &mut Frame, state: &GameState, view: &View, area: Rect) {
    let mut items = Vec::new();
    for id in state.players() {
        let Some(player) = state.player(id) else {
            continue;
        };
        let name_style = if view.active == Some(id) {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let hp_color = if !player.is_alive() {
            Color::DarkGray
        } else if player.health < player.max_health() * 0.3 {
            Color::Red
        } else {
            Color::Green
        };

        let mut spans = vec![
            Span::styled(player.name.clone(), name_style),
            Span::styled(format!(" ({})", player.class), Style::default().fg(Color::Gray)),
        ];
        if state.targeting_override() == Some(id) {
            spans.push(Span::styled(" [defending]", Style::default().fg(Color::Cyan)));
        }
        if player.budget < 0 {
            spans.push(Span::styled(" [paralyzed]", Style::default().fg(Color::Magenta)));
        }
        items.push(ListItem::new(Line::from(spans)));
        items.push(ListItem::new(Line::from(Span::styled(
            format!("  HP {}/{}", player.health, player.max_health()),
            Style::default().fg(hp_color),
        ))));
    }

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Party "));
    f.render_widget(list, area);
}

fn draw_foes(f: &mut Frame, state: &GameState, area: Rect) {
    let mut items = Vec::new();
    for id in state.enemies().into_iter().chain(state.entities()) {
        let Some(actor) = state.actor(id) else {
            continue;
        };
        let health = match actor {
            Actor::Entity(_) => format!("durability {}", actor.health()),
            _ => {
                let max = actor
                    .stats()
                    .and_then(|stats| stats.get(StatField::MaxHealth))
                    .unwrap_or_default();
                format!("HP {}/{}", actor.health(), max)
            }
        };
        let style = if actor.is_alive() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        items.push(ListItem::new(Line::from(vec![
            Span::styled(actor.name().to_string(), style),
            Span::styled(format!("  {}", health), Style::default().fg(Color::Gray)),
        ])));
    }

    let ground = state.ground_items();
    if !ground.is_empty() {
        items.push(ListItem::new(""));
        items.push(ListItem::new(Span::styled(
            "On the ground:",
            Style::default().fg(Color::Cyan),
        )));
        for item in ground {
            items.push(ListItem::new(format!("  {}", state.item_name(item))));
        }
    }

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Around "));
    f.render_widget(list, area);
}

fn draw_log(f: &mut Frame, view: &View, area: Rect) {
    let height = area.height.saturating_sub(2) as usize;
    let end = view.log.len().saturating_sub(view.scroll);
    let start = end.saturating_sub(height);

    let items: Vec<ListItem> = view.log[start..end]
        .iter()
        .map(|line| {
            let style = if line.starts_with("> ") {
                Style::default().fg(Color::Yellow)
            } else if line.starts_with("--") || line.starts_with("==") {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(line.clone(), style)))
        })
        .collect();

    let title = if view.scroll > 0 {
        format!(" Log (+{} below, PgDn) ", view.scroll)
    } else {
        " Log (PgUp to scroll) ".to_string()
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn draw_prompt(f: &mut Frame, view: &View, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!("{} ", view.prompt),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(view.input.clone()),
        Span::styled("_", Style::default().fg(Color::DarkGray)),
    ]);
    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}
