use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};
use streets::encounter::{BattleView, CombatantView, RunStatus};

/// Draws the whole battle screen from one snapshot of the run.
pub fn draw_battle_scene(frame: &mut Frame, view: &BattleView, paused: bool) {
    let area = frame.size();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Streets | {} ", view.stage));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // player HP
            Constraint::Length(3), // enemy HP
            Constraint::Min(6),    // messages
            Constraint::Length(3), // special meter
            Constraint::Length(1), // keys
        ])
        .split(inner);

    draw_header(frame, chunks[0], view);
    draw_hp(frame, chunks[1], &view.player, "Player", view.screen_effects);
    draw_hp(frame, chunks[2], &view.enemy, "Enemy", view.screen_effects);
    draw_messages(frame, chunks[3], view);
    draw_special_meter(frame, chunks[4], view);
    draw_key_legend(frame, chunks[5], view);

    if paused {
        draw_pause_overlay(frame, area);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, view: &BattleView) {
    let seconds = view.elapsed_seconds as u64;
    let line = Line::from(vec![
        Span::styled(
            format!("Stage {}/3", view.stage.number()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("   Time {}m {:02}s", seconds / 60, seconds % 60)),
        Span::raw(format!("   Kills {}", view.enemies_defeated)),
        Span::raw(format!("   Damage {}", view.total_damage)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn hp_color(ratio: f64) -> Color {
    if ratio > 0.66 {
        Color::Green
    } else if ratio > 0.33 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn draw_hp(frame: &mut Frame, area: Rect, who: &CombatantView, title: &str, effects: bool) {
    let ratio = who.hp_ratio().clamp(0.0, 1.0);
    let mut style = Style::default().fg(hp_color(ratio));
    if effects && ratio <= 0.33 {
        style = style.add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK);
    } else {
        style = style.add_modifier(Modifier::BOLD);
    }

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{}: {} (Lv {})", title, who.name, who.level)),
        )
        .gauge_style(style)
        .label(format!("HP {}/{}", who.hp, who.max_hp))
        .ratio(ratio);

    frame.render_widget(gauge, area);
}

fn draw_messages(frame: &mut Frame, area: Rect, view: &BattleView) {
    let lines: Vec<Line> = view
        .messages
        .iter()
        .map(|m| Line::from(m.as_str()))
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Battle"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_special_meter(frame: &mut Frame, area: Rect, view: &BattleView) {
    let threshold = view.special_threshold.max(1);
    let ratio = (view.special_progress as f64 / threshold as f64).clamp(0.0, 1.0);
    let color = if view.special_available {
        Color::Magenta
    } else {
        Color::DarkGray
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Special ({}/3 used)",
            view.specials_used
        )))
        .gauge_style(Style::default().fg(color))
        .label(format!(
            "{}/{} damage",
            view.special_progress.min(view.special_threshold),
            view.special_threshold
        ))
        .ratio(ratio);

    frame.render_widget(gauge, area);
}

fn draw_key_legend(frame: &mut Frame, area: Rect, view: &BattleView) {
    let text = match view.status {
        RunStatus::InProgress if view.enemy_turn_pending => {
            Line::from(Span::styled(
                "Enemy is moving...",
                Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
            ))
        }
        RunStatus::InProgress => Line::from(
            "[A] Attack  [D] Defend  [S] Special  [F] Flee  [P] Pause  [Q] Save & Quit",
        ),
        _ => Line::from(Span::styled(
            "Run over. Press any key to exit.",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
    };
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn draw_pause_overlay(frame: &mut Frame, area: Rect) {
    let width = 30.min(area.width);
    let height = 5.min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "PAUSED",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("[P] Resume"),
    ])
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hp_color_thresholds() {
        assert_eq!(hp_color(1.0), Color::Green);
        assert_eq!(hp_color(0.5), Color::Yellow);
        assert_eq!(hp_color(0.1), Color::Red);
    }
}
