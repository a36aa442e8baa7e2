//! TUI rendering for Cupid using ratatui.

mod input;
mod theme;

pub use input::{apply_event, flush_clipboard, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use cupid_engine::{App, CellRect, FlowStep, FormField, Gender, NoticeKind, phrases};

const CARD_WIDTH: u16 = 64;
const CARD_HEIGHT: u16 = 18;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    let area = frame.area();
    app.set_viewport(area.width, area.height);

    frame.render_widget(Block::default().style(Style::default().bg(palette.bg)), area);
    draw_hearts(frame, app, area, &palette, &glyphs);

    match app.step() {
        FlowStep::Setup => draw_setup(frame, app, area, &palette),
        FlowStep::ChooseGender => draw_gender(frame, app, area, &palette, &glyphs),
        FlowStep::ProduceLink => draw_link(frame, app, area, &palette, &glyphs),
        FlowStep::Ask => draw_ask(frame, app, area, &palette, &glyphs),
        FlowStep::Celebrate => draw_celebrate(frame, app, area, &palette, &glyphs),
    }

    if app.step() != FlowStep::Ask {
        app.set_button_rects(None, None);
    }
    draw_notice(frame, app, area, &palette);
}

fn draw_hearts(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let max_x = f32::from(area.width - 1);
    let max_y = f32::from(area.height - 1);
    let style = Style::default().fg(palette.heart_dim);
    let buffer = frame.buffer_mut();
    for (column, height, style_index) in app.hearts().positions(app.clock()) {
        let x = area.x + (column * max_x).round() as u16;
        let y = area.y + (height * max_y).round() as u16;
        if let Some(cell) = buffer.cell_mut((x, y)) {
            cell.set_symbol(glyphs.hearts[style_index % glyphs.hearts.len()])
                .set_style(style);
        }
    }
}

/// Rectangle of at most `width` x `height`, centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn card(frame: &mut Frame, area: Rect, title: &str, palette: &Palette) -> Rect {
    let rect = centered(area, CARD_WIDTH, CARD_HEIGHT);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.pink))
        .title(Line::from(Span::styled(format!(" {title} "), styles::title(palette))))
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(palette.bg_card));
    let inner = block.inner(rect);
    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);
    inner
}

fn hint_line<'a>(pairs: &[(&'a str, &'a str)], palette: &Palette) -> Line<'a> {
    let mut spans = Vec::with_capacity(pairs.len() * 3);
    for (index, (key, action)) in pairs.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("  ", styles::key_hint(palette)));
        }
        spans.push(Span::styled(*key, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {action}"), styles::key_hint(palette)));
    }
    Line::from(spans)
}

fn draw_hints(frame: &mut Frame, inner: Rect, line: Line<'_>) {
    if inner.height == 0 {
        return;
    }
    let row = Rect {
        y: inner.y + inner.height - 1,
        height: 1,
        ..inner
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
}

fn draw_setup(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let inner = card(frame, area, "Crée ta demande", palette);
    let form = app.form();

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Envoie une demande de Saint-Valentin inoubliable",
            styles::label(palette),
        )))
        .alignment(Alignment::Center),
        rows[0],
    );

    for (field, row) in FormField::ALL.into_iter().zip(rows[1..5].iter().copied()) {
        let focused = form.focus() == field;
        let text = form.field(field);
        let label = Line::from(Span::styled(
            format!(" {}", field.label()),
            if focused {
                styles::key_highlight(palette)
            } else {
                styles::label(palette)
            },
        ));
        let value = if text.text().is_empty() {
            Span::styled(field.placeholder(), styles::placeholder(palette))
        } else {
            Span::styled(text.text(), styles::input(palette, focused))
        };
        let input_row = Rect {
            x: row.x + 1,
            y: row.y + 1,
            width: row.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(label), Rect { height: 1, ..row });
        frame.render_widget(
            Paragraph::new(Line::from(value)).style(styles::input(palette, focused)),
            input_row,
        );

        if focused {
            let before = &text.text()[..text.byte_index()];
            let offset = u16::try_from(before.width()).unwrap_or(u16::MAX);
            let cursor_x = input_row.x + offset.min(input_row.width.saturating_sub(1));
            frame.set_cursor_position((cursor_x, input_row.y));
        }
    }

    draw_hints(
        frame,
        inner,
        hint_line(
            &[("Tab", "champ suivant"), ("Entrée", "continuer"), ("Échap", "quitter")],
            palette,
        ),
    );
}

fn draw_gender(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let inner = card(frame, area, "Qui reçoit ta demande ?", palette);
    let receiver = app
        .flow()
        .draft()
        .map(|draft| draft.receiver_name.trim().to_string())
        .unwrap_or_default();

    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{receiver} "), styles::title(palette)),
            Span::styled("est...", styles::label(palette)),
        ]))
        .alignment(Alignment::Center),
        rows[1],
    );

    let mut spans = Vec::new();
    for (index, gender) in Gender::ALL.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("     "));
        }
        let highlighted = app.gender_highlight() == Some(gender);
        let marker = if highlighted { glyphs.selected } else { " " };
        spans.push(Span::styled(
            format!(" {marker} {} ", phrases::gender_label(gender)),
            styles::choice(palette, highlighted),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        rows[2],
    );

    draw_hints(
        frame,
        inner,
        hint_line(
            &[
                ("←/→", "choisir"),
                ("h/f", "homme/femme"),
                ("Entrée", "valider"),
                ("Retour", "modifier"),
            ],
            palette,
        ),
    );
}

fn draw_link(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let inner = card(frame, area, "Ton lien est prêt", palette);
    let Some(proposal) = app.proposal() else {
        return;
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} ", glyphs.heart), Style::default().fg(palette.rose)),
            Span::styled(
                format!(
                    "Pour {} ({})",
                    proposal.receiver_name(),
                    phrases::gender_label(proposal.gender())
                ),
                styles::label(palette),
            ),
        ]),
        Line::from(""),
    ];
    match app.share_link() {
        Some(link) => {
            lines.push(Line::from(Span::styled(
                "Envoie ce lien :",
                styles::label(palette),
            )));
            lines.push(Line::from(Span::styled(
                link.as_str().to_string(),
                Style::default()
                    .fg(palette.text_primary)
                    .add_modifier(Modifier::UNDERLINED),
            )));
        }
        None => lines.push(Line::from(Span::styled(
            "Appuie sur Entrée pour générer et copier le lien.",
            styles::key_hint(palette),
        ))),
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        },
    );
    draw_hints(
        frame,
        inner,
        hint_line(&[("Entrée", "générer et copier"), ("Échap", "quitter")], palette),
    );
}

fn button_rect(area: Rect, x: u16, y: u16, width: u16, height: u16) -> Rect {
    let x = x.min(area.right().saturating_sub(1)).max(area.x);
    let y = y.min(area.bottom().saturating_sub(1)).max(area.y);
    Rect {
        x,
        y,
        width: width.min(area.right() - x),
        height: height.min(area.bottom() - y),
    }
}

fn draw_button(frame: &mut Frame, rect: Rect, label: &str, style: Style, border: Style) {
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(Line::from(label.to_string()))
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border),
            ),
        rect,
    );
}

fn cell_rect(rect: Rect) -> CellRect {
    CellRect::new(rect.x, rect.y, rect.width, rect.height)
}

fn draw_ask(frame: &mut Frame, app: &mut App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let Some(question) = app.question() else {
        return;
    };
    let band = (app.settings().evade.top_band as u16).min(area.height);
    let footprint = app.decline_footprint();
    let button_width = footprint.width as u16;
    let button_height = footprint.height as u16;

    let question_area = Rect {
        height: band.saturating_sub(1),
        ..area
    };
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                glyphs.heart,
                Style::default().fg(palette.rose).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(question, styles::title(palette))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true }),
        question_area,
    );

    let center = area.x + area.width / 2;
    let row = area.y + band.saturating_add(2);
    let accept = button_rect(
        area,
        center.saturating_sub(button_width + 1),
        row,
        button_width,
        button_height,
    );
    draw_button(
        frame,
        accept,
        phrases::ACCEPT_LABEL,
        styles::accept_button(palette),
        Style::default().fg(palette.rose),
    );

    let decline = if app.decline_visible() {
        let (x, y) = match app.decline_placement() {
            Some(placement) => (
                area.x + placement.x.round().max(0.0) as u16,
                area.y + placement.y.round().max(0.0) as u16,
            ),
            None => (center + 1, row),
        };
        let rect = button_rect(area, x, y, button_width, button_height);
        draw_button(
            frame,
            rect,
            app.decline_label(),
            styles::decline_button(palette),
            Style::default().fg(palette.text_muted),
        );
        Some(cell_rect(rect))
    } else {
        None
    };

    app.set_button_rects(Some(cell_rect(accept)), decline);
}

fn draw_celebrate(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let inner = card(frame, area, "C'est un match !", palette);
    let Some(proposal) = app.proposal() else {
        return;
    };

    let beat = if app.ui_options().reduced_motion || (app.clock().as_millis() / 500) % 2 == 0 {
        Modifier::BOLD
    } else {
        Modifier::DIM
    };
    let hearts = [glyphs.heart; 3].join(" ");
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            hearts,
            Style::default().fg(palette.rose).add_modifier(beat),
        )),
        Line::from(""),
        Line::from(Span::styled("OUI !", styles::title(palette))),
        Line::from(Span::styled(
            phrases::celebration(proposal),
            styles::label(palette),
        )),
        Line::from(""),
    ];

    let mut hints = vec![("Échap", "quitter")];
    if let Some(link) = app.reply_link() {
        lines.push(Line::from(Span::styled(
            format!("Réponds-lui sur WhatsApp {} {}", glyphs.bullet, link.as_str()),
            styles::key_hint(palette),
        )));
        hints.insert(0, ("c", "copier le lien de réponse"));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        },
    );
    draw_hints(frame, inner, hint_line(&hints, palette));
}

fn draw_notice(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let Some(notice) = app.notice() else {
        return;
    };
    if area.height == 0 {
        return;
    }
    let color = match notice.kind() {
        NoticeKind::Success => palette.success,
        NoticeKind::Warning => palette.warning,
    };
    let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if notice.is_fading() {
        style = style.add_modifier(Modifier::DIM);
    }
    let row = Rect {
        y: area.bottom() - 1,
        height: 1,
        ..area
    };
    frame.render_widget(Clear, row);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            notice.text().to_string(),
            style,
        )))
        .alignment(Alignment::Center)
        .style(Style::default().bg(palette.bg)),
        row,
    );
}

#[cfg(test)]
mod tests;
