//! Main application state and rendering

use crate::data::{MatchKind, ModuleId};
use crate::game::dashboard::DashboardView;
use crate::game::engines::{ActiveEngine, Advisory, EngineInput};
use crate::game::{Controller, Screen};
use crate::tui::widgets::{CelebrationBox, GemCounter, MeterBar};
use crate::tui::{
    create_content_layout, create_main_layout, styled_block, Theme, HELP_TEXT, LOGO, SMALL_LOGO,
};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

/// Input mode for typed entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing the teacher password.
    TeacherPassword,
    /// Typing a word to unlock a locked sentence block.
    UnlockTyping,
}

/// Application state
pub struct App {
    pub controller: Controller,
    pub theme: Theme,
    pub running: bool,
    pub show_help: bool,
    pub menu_state: ListState,
    pub input_mode: InputMode,
    pub input_buffer: String,

    // Per-game cursors, reset on entry.
    choice_ix: usize,
    basket_lane: usize,
    token_ix: usize,

    /// Latest hint or notice shown in the bottom bar, with remaining life.
    banner: Option<(String, Duration)>,
}

const BANNER_LIFE: Duration = Duration::from_secs(6);

impl App {
    pub fn new(controller: Controller) -> Self {
        let mut menu_state = ListState::default();
        menu_state.select(Some(0));

        Self {
            controller,
            theme: Theme::default(),
            running: true,
            show_help: false,
            menu_state,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            choice_ix: 0,
            basket_lane: 0,
            token_ix: 0,
            banner: None,
        }
    }

    /// Advance game time and surface any hints.
    pub fn tick(&mut self, dt: Duration) {
        for advisory in self.controller.tick(dt) {
            let text = match advisory {
                Advisory::Hint(text) => format!("Hint: {text}"),
                Advisory::ContextHelp(text) => text,
            };
            self.banner = Some((text, BANNER_LIFE));
        }
        for notice in self.controller.take_notices() {
            self.banner = Some((notice, BANNER_LIFE));
        }
        if let Some((_, life)) = &mut self.banner {
            *life = life.saturating_sub(dt);
            if life.is_zero() {
                self.banner = None;
            }
        }
    }

    /// Handle keyboard input. Returns false when the app should exit.
    pub fn handle_input(&mut self) -> std::io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(true);
                }

                if self.input_mode != InputMode::Normal {
                    self.handle_typed_entry(key.code);
                    return Ok(true);
                }

                // Teacher shortcut works from any screen.
                if key.code == KeyCode::Char('t')
                    && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    self.input_mode = InputMode::TeacherPassword;
                    self.input_buffer.clear();
                    return Ok(true);
                }

                if key.code == KeyCode::Char('?') {
                    self.show_help = !self.show_help;
                    return Ok(true);
                }
                if self.show_help {
                    if key.code == KeyCode::Esc {
                        self.show_help = false;
                    }
                    return Ok(true);
                }

                match self.controller.screen().clone() {
                    Screen::Menu => return self.handle_menu_key(key.code),
                    Screen::InGame(_) => self.handle_game_key(key.code),
                    Screen::ModuleComplete { .. } | Screen::Locked { .. } => {
                        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                            self.controller.return_to_menu();
                        }
                    }
                    Screen::TeacherDashboard(_) => {
                        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                            self.controller.return_to_menu();
                        }
                    }
                }
            }
        }
        Ok(self.running)
    }

    fn handle_typed_entry(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                let typed = std::mem::take(&mut self.input_buffer);
                match self.input_mode {
                    InputMode::TeacherPassword => self.controller.teacher_login(&typed),
                    InputMode::UnlockTyping => {
                        self.controller.handle_engine_input(EngineInput::TypeUnlock {
                            token: self.token_ix,
                            typed,
                        });
                    }
                    InputMode::Normal => {}
                }
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Esc => {
                self.input_buffer.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
            }
            _ => {}
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) -> std::io::Result<bool> {
        let modules = ModuleId::all();
        match code {
            KeyCode::Char('q') if !self.controller.config().kiosk_mode => {
                self.running = false;
                return Ok(false);
            }
            KeyCode::Up => {
                let ix = self.menu_state.selected().unwrap_or(0);
                self.menu_state
                    .select(Some(ix.checked_sub(1).unwrap_or(modules.len() - 1)));
            }
            KeyCode::Down => {
                let ix = self.menu_state.selected().unwrap_or(0);
                self.menu_state.select(Some((ix + 1) % modules.len()));
            }
            KeyCode::Enter => {
                let ix = self.menu_state.selected().unwrap_or(0);
                self.choice_ix = 0;
                self.basket_lane = 0;
                self.token_ix = 0;
                self.controller.select_module(modules[ix]);
            }
            _ => {}
        }
        Ok(true)
    }

    fn handle_game_key(&mut self, code: KeyCode) {
        if code == KeyCode::Esc {
            self.controller.handle_engine_input(EngineInput::Abort);
            return;
        }
        match self.controller.engine() {
            Some(ActiveEngine::Phonics(_)) => self.handle_phonics_key(code),
            Some(ActiveEngine::Sentence(_)) => self.handle_sentence_key(code),
            Some(ActiveEngine::Recipe(_)) => self.handle_recipe_key(code),
            Some(_) => self.handle_choice_key(code),
            None => {}
        }
    }

    fn handle_phonics_key(&mut self, code: KeyCode) {
        let lanes = match self.controller.engine() {
            Some(ActiveEngine::Phonics(e)) => e.falling().len().max(1),
            _ => return,
        };
        match code {
            KeyCode::Left => {
                self.basket_lane = self.basket_lane.checked_sub(1).unwrap_or(lanes - 1);
            }
            KeyCode::Right => {
                self.basket_lane = (self.basket_lane + 1) % lanes;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                // Catch whatever is in the basket's lane.
                let symbol = match self.controller.engine() {
                    Some(ActiveEngine::Phonics(e)) => e
                        .falling()
                        .iter()
                        .find(|s| s.lane == self.basket_lane)
                        .map(|s| s.symbol.clone()),
                    _ => None,
                };
                if let Some(symbol) = symbol {
                    self.controller
                        .handle_engine_input(EngineInput::Catch { symbol });
                }
            }
            _ => {}
        }
    }

    fn handle_sentence_key(&mut self, code: KeyCode) {
        // Snapshot what the key handlers need before mutating the engine.
        let (token_count, locked, placed, first_empty, last_filled) =
            match self.controller.engine() {
                Some(ActiveEngine::Sentence(e)) => {
                    let token = &e.tokens()[self.token_ix.min(e.tokens().len() - 1)];
                    (
                        e.tokens().len(),
                        token.locked,
                        token.placed,
                        e.slots().iter().position(Option::is_none),
                        e.slots().iter().rposition(Option::is_some),
                    )
                }
                _ => return,
            };
        self.token_ix = self.token_ix.min(token_count - 1);
        match code {
            KeyCode::Left => {
                self.token_ix = self.token_ix.checked_sub(1).unwrap_or(token_count - 1);
            }
            KeyCode::Right => {
                self.token_ix = (self.token_ix + 1) % token_count;
            }
            KeyCode::Enter => {
                if locked {
                    // Typing the word opens the block.
                    self.input_mode = InputMode::UnlockTyping;
                    self.input_buffer.clear();
                    return;
                }
                if placed {
                    return;
                }
                if let Some(slot) = first_empty {
                    self.controller.handle_engine_input(EngineInput::PlaceToken {
                        slot,
                        token: self.token_ix,
                    });
                }
            }
            KeyCode::Backspace => {
                if let Some(slot) = last_filled {
                    self.controller
                        .handle_engine_input(EngineInput::ClearSlot { slot });
                }
            }
            _ => {}
        }
    }

    fn handle_recipe_key(&mut self, code: KeyCode) {
        let reading = match self.controller.engine() {
            Some(ActiveEngine::Recipe(e)) => e.is_reading(),
            _ => return,
        };
        if reading {
            if matches!(code, KeyCode::Char(' ') | KeyCode::Enter) {
                self.choice_ix = 0;
                self.controller.handle_engine_input(EngineInput::Proceed);
            }
            return;
        }
        self.handle_choice_key(code);
    }

    fn handle_choice_key(&mut self, code: KeyCode) {
        let choices = match self.controller.engine() {
            Some(ActiveEngine::Dialogue(e)) => e.current_node().choices.len(),
            Some(ActiveEngine::Decision(e)) => e.current_prompt().choices.len(),
            Some(ActiveEngine::WordMatch(e)) => e.current_prompt().choices.len(),
            Some(ActiveEngine::Recipe(e)) => e.current_question().choices.len(),
            _ => return,
        };
        match code {
            KeyCode::Up | KeyCode::Down => {
                self.choice_ix = if code == KeyCode::Up {
                    self.choice_ix.checked_sub(1).unwrap_or(choices - 1)
                } else {
                    (self.choice_ix + 1) % choices
                };
                // Restart the dwell clock on the new selection.
                self.controller.handle_engine_input(EngineInput::Hover(false));
                self.controller.handle_engine_input(EngineInput::Hover(true));
            }
            KeyCode::Enter => {
                let picked = self.choice_ix;
                self.choice_ix = 0;
                self.controller.handle_engine_input(EngineInput::Choose(picked));
            }
            _ => {}
        }
    }

    // ---------- rendering ----------

    pub fn render(&mut self, frame: &mut Frame) {
        match self.controller.screen().clone() {
            Screen::Menu => self.render_menu(frame),
            Screen::InGame(module) => self.render_game(frame, module),
            Screen::ModuleComplete {
                module,
                score,
                gems_earned,
                improved_best,
                new_unlocks,
            } => self.render_complete(frame, module, score, gems_earned, improved_best, &new_unlocks),
            Screen::Locked { module, needed } => self.render_locked(frame, module, needed),
            Screen::TeacherDashboard(report) => {
                let view = DashboardView::new(&report);
                self.render_dashboard(frame, &view);
            }
        }

        if self.input_mode == InputMode::TeacherPassword {
            self.render_password_overlay(frame);
        }
        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_menu(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.bg)),
            area,
        );

        let compact = area.height < 32;
        let logo_height = if compact { 3 } else { LOGO.lines().count() as u16 };

        if compact {
            let title = Paragraph::new("═══ LITERACY QUEST ═══")
                .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center);
            frame.render_widget(title, Rect::new(0, 1, area.width, 1));
            let subtitle = Paragraph::new("An Island Reading Adventure")
                .style(Style::default().fg(self.theme.header))
                .alignment(Alignment::Center);
            frame.render_widget(subtitle, Rect::new(0, 2, area.width, 1));
        } else {
            let logo = Paragraph::new(LOGO)
                .style(Style::default().fg(self.theme.accent))
                .alignment(Alignment::Center);
            frame.render_widget(logo, Rect::new(0, 0, area.width, logo_height));
        }

        frame.render_widget(
            GemCounter::new(self.controller.gems()).color(self.theme.gem),
            Rect::new(2, logo_height, area.width.saturating_sub(2), 1),
        );

        let accessible = self.controller.accessible().clone();
        let items: Vec<ListItem> = ModuleId::all()
            .iter()
            .map(|module| {
                if accessible.contains(module) {
                    ListItem::new(vec![
                        Line::from(Span::styled(
                            format!("  {} ", module.title()),
                            Style::default()
                                .fg(self.theme.success)
                                .add_modifier(Modifier::BOLD),
                        )),
                        Line::from(Span::styled(
                            format!("    {}", module.blurb()),
                            Style::default().fg(Color::DarkGray),
                        )),
                    ])
                } else {
                    let needed = self.controller.config().threshold(*module);
                    ListItem::new(vec![
                        Line::from(Span::styled(
                            format!("  {} (locked)", module.title()),
                            Style::default().fg(self.theme.locked),
                        )),
                        Line::from(Span::styled(
                            format!("    Opens at {} gems", needed),
                            Style::default().fg(self.theme.locked),
                        )),
                    ])
                }
            })
            .collect();

        let menu_y = logo_height + 2;
        let menu_area = Rect::new(
            area.width / 6,
            menu_y.min(area.height.saturating_sub(4)),
            area.width * 2 / 3,
            area.height.saturating_sub(menu_y).saturating_sub(2),
        );
        let menu = List::new(items)
            .block(styled_block("Island Map", &self.theme))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
            .highlight_symbol("→ ");
        frame.render_stateful_widget(menu, menu_area, &mut self.menu_state);

        self.render_bottom_bar(frame, "↑/↓ choose a zone | Enter to play | ? help | q quit");
    }

    fn render_game(&mut self, frame: &mut Frame, module: ModuleId) {
        let area = frame.area();
        let layout = create_main_layout(area);

        self.render_header(frame, layout[0], module);

        let content = create_content_layout(layout[1]);
        match self.controller.engine() {
            Some(ActiveEngine::Phonics(_)) => self.render_phonics(frame, content[0]),
            Some(ActiveEngine::Sentence(_)) => self.render_sentence(frame, content[0]),
            Some(ActiveEngine::Dialogue(_)) => self.render_dialogue(frame, content[0]),
            Some(ActiveEngine::Decision(_)) => self.render_decision(frame, content[0]),
            Some(ActiveEngine::WordMatch(_)) => self.render_wordmatch(frame, content[0]),
            Some(ActiveEngine::Recipe(_)) => self.render_recipe(frame, content[0]),
            None => {}
        }
        self.render_side_panel(frame, content[1]);

        let footer = match self.controller.engine() {
            Some(ActiveEngine::Phonics(_)) => "←/→ move basket | Space catch | Esc leave",
            Some(ActiveEngine::Sentence(_)) => {
                "←/→ pick a block | Enter place | Backspace undo | Esc leave"
            }
            Some(ActiveEngine::Recipe(e)) if e.is_reading() => {
                "Space when you are done reading | Esc leave"
            }
            _ => "↑/↓ choose | Enter answer | Esc leave",
        };
        self.render_notice_or(frame, layout[2], footer);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, module: ModuleId) {
        let header = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(18),
                Constraint::Min(20),
                Constraint::Length(18),
            ])
            .split(area);

        let logo = Paragraph::new(SMALL_LOGO)
            .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(logo, header[0]);

        let title = Paragraph::new(module.title())
            .style(Style::default().fg(self.theme.header).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(title, header[1]);

        let gems = Paragraph::new(format!("◆ {} gems", self.controller.gems()))
            .style(Style::default().fg(self.theme.gem))
            .alignment(Alignment::Right)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(gems, header[2]);
    }

    fn render_phonics(&self, frame: &mut Frame, area: Rect) {
        let Some(ActiveEngine::Phonics(engine)) = self.controller.engine() else {
            return;
        };
        let block = styled_block(&format!("Catch the sound: {}", engine.target()), &self.theme);
        let inner_h = area.height.saturating_sub(2).max(1) as usize;
        let inner_w = area.width.saturating_sub(2).max(1) as usize;

        let lanes = engine.falling().len().max(1);
        let lane_width = (inner_w / lanes).max(1);

        // Paint the sky row by row, then the basket on the ground row.
        let mut rows = vec![vec![' '; inner_w]; inner_h];
        for symbol in engine.falling() {
            let y = symbol.y.clamp(0.0, 1.0);
            let row = ((y * (inner_h.saturating_sub(2)) as f32) as usize).min(inner_h - 1);
            let col = symbol.lane * lane_width + lane_width / 2;
            for (offset, c) in symbol.symbol.chars().enumerate() {
                if col + offset < inner_w {
                    rows[row][col + offset] = c;
                }
            }
        }
        let basket_col = self.basket_lane.min(lanes - 1) * lane_width + lane_width / 2;
        if let Some(ground) = rows.last_mut() {
            for (offset, c) in "\\_/".chars().enumerate() {
                let col = (basket_col + offset).saturating_sub(1);
                if col < inner_w {
                    ground[col] = c;
                }
            }
        }

        let lines: Vec<Line> = rows
            .into_iter()
            .map(|row| Line::from(row.into_iter().collect::<String>()))
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_sentence(&self, frame: &mut Frame, area: Rect) {
        let Some(ActiveEngine::Sentence(engine)) = self.controller.engine() else {
            return;
        };
        let mut lines = vec![
            Line::from(Span::styled(
                engine.prompt().to_string(),
                Style::default().fg(self.theme.header),
            )),
            Line::from(""),
        ];

        // The sentence under construction.
        let slot_spans: Vec<Span> = engine
            .slots()
            .iter()
            .map(|slot| match slot {
                Some(ix) => Span::styled(
                    format!("[ {} ] ", engine.tokens()[*ix].word),
                    Style::default().fg(self.theme.success),
                ),
                None => Span::styled("[ ___ ] ", Style::default().fg(Color::DarkGray)),
            })
            .collect();
        lines.push(Line::from(slot_spans));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Word blocks:",
            Style::default().fg(self.theme.fg),
        )));

        let token_spans: Vec<Span> = engine
            .tokens()
            .iter()
            .enumerate()
            .map(|(ix, token)| {
                let mut style = if token.placed {
                    Style::default().fg(Color::DarkGray)
                } else if token.locked {
                    Style::default().fg(self.theme.warning)
                } else {
                    Style::default().fg(self.theme.accent)
                };
                if ix == self.token_ix {
                    style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                let marker = if token.locked { "🔒" } else { "" };
                Span::styled(format!(" {}{} ", token.word, marker), style)
            })
            .collect();
        lines.push(Line::from(token_spans));

        if self.input_mode == InputMode::UnlockTyping {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Type the word to unlock: {}_", self.input_buffer),
                Style::default().fg(self.theme.warning),
            )));
        }

        let widget = Paragraph::new(lines)
            .block(styled_block("Build the sentence", &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(widget, area);
    }

    fn render_dialogue(&self, frame: &mut Frame, area: Rect) {
        let Some(ActiveEngine::Dialogue(engine)) = self.controller.engine() else {
            return;
        };
        let node = engine.current_node();
        let mut lines = vec![
            Line::from(Span::styled(
                node.prompt.clone(),
                Style::default().fg(self.theme.fg),
            )),
            Line::from(""),
        ];
        for (ix, choice) in node.choices.iter().enumerate() {
            let mut style = Style::default().fg(self.theme.accent);
            if ix == self.choice_ix {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            lines.push(Line::from(Span::styled(
                format!("  {}. {}", ix + 1, choice.text),
                style,
            )));
        }
        let widget = Paragraph::new(lines)
            .block(styled_block(engine.title(), &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(widget, area);
    }

    fn render_decision(&self, frame: &mut Frame, area: Rect) {
        let Some(ActiveEngine::Decision(engine)) = self.controller.engine() else {
            return;
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(6)])
            .split(area);

        frame.render_widget(
            MeterBar::new("Community happiness", engine.happiness().max(0) as u32, 100)
                .color(self.theme.success)
                .low_threshold(25),
            chunks[0],
        );

        let prompt = engine.current_prompt();
        let mut lines = vec![
            Line::from(Span::styled(
                format!(
                    "Complaint {} of {}",
                    engine.prompt_number(),
                    engine.prompt_total()
                ),
                Style::default().fg(self.theme.header),
            )),
            Line::from(""),
            Line::from(Span::styled(
                prompt.situation.clone(),
                Style::default().fg(self.theme.fg),
            )),
            Line::from(""),
        ];
        for (ix, choice) in prompt.choices.iter().enumerate() {
            let mut style = Style::default().fg(self.theme.accent);
            if ix == self.choice_ix {
                // Tier colors would give the answer away; selection only.
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            lines.push(Line::from(Span::styled(
                format!("  {}. {}", ix + 1, choice.text),
                style,
            )));
        }
        let widget = Paragraph::new(lines)
            .block(styled_block(engine.title(), &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(widget, chunks[1]);
    }

    fn render_wordmatch(&self, frame: &mut Frame, area: Rect) {
        let Some(ActiveEngine::WordMatch(engine)) = self.controller.engine() else {
            return;
        };
        let prompt = engine.current_prompt();
        let ask = match prompt.kind {
            MatchKind::Synonym => "means the same as",
            MatchKind::Antonym => "means the opposite of",
        };
        let mut lines = vec![
            Line::from(Span::styled(
                format!(
                    "Word {} of {}",
                    engine.prompt_number(),
                    engine.prompt_total()
                ),
                Style::default().fg(self.theme.header),
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("Which word "),
                Span::styled(ask, Style::default().fg(self.theme.warning)),
                Span::raw(" "),
                Span::styled(
                    format!("'{}'", prompt.word),
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("?"),
            ]),
            Line::from(""),
        ];
        for (ix, choice) in prompt.choices.iter().enumerate() {
            let mut style = Style::default().fg(self.theme.accent);
            if ix == self.choice_ix {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            lines.push(Line::from(Span::styled(
                format!("  {}. {}", ix + 1, choice),
                style,
            )));
        }
        let widget = Paragraph::new(lines)
            .block(styled_block("Word Reef", &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(widget, area);
    }

    fn render_recipe(&self, frame: &mut Frame, area: Rect) {
        let Some(ActiveEngine::Recipe(engine)) = self.controller.engine() else {
            return;
        };
        let recipe = engine.current_recipe();
        let mut lines = Vec::new();

        if engine.is_reading() {
            lines.push(Line::from(Span::styled(
                "Ingredients:",
                Style::default().fg(self.theme.header).add_modifier(Modifier::BOLD),
            )));
            for ingredient in &recipe.ingredients {
                lines.push(Line::from(format!("  • {}", ingredient)));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Directions:",
                Style::default().fg(self.theme.header).add_modifier(Modifier::BOLD),
            )));
            for (ix, step) in recipe.directions.iter().enumerate() {
                lines.push(Line::from(format!("  {}. {}", ix + 1, step)));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Press Space when you are ready for the questions",
                Style::default().fg(self.theme.warning),
            )));
        } else {
            let question = engine.current_question();
            lines.push(Line::from(Span::styled(
                format!(
                    "Question {} of {}",
                    engine.question_number(),
                    engine.question_total()
                ),
                Style::default().fg(self.theme.header),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                question.prompt.clone(),
                Style::default().fg(self.theme.fg),
            )));
            lines.push(Line::from(""));
            for (ix, choice) in question.choices.iter().enumerate() {
                let mut style = Style::default().fg(self.theme.accent);
                if ix == self.choice_ix {
                    style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                lines.push(Line::from(Span::styled(
                    format!("  {}. {}", ix + 1, choice),
                    style,
                )));
            }
        }

        let widget = Paragraph::new(lines)
            .block(styled_block(&recipe.title, &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(widget, area);
    }

    fn render_side_panel(&self, frame: &mut Frame, area: Rect) {
        let (score, progress) = match self.controller.engine() {
            Some(ActiveEngine::Phonics(e)) => {
                (e.score(), format!("Round {} of {}", e.round(), e.round_limit()))
            }
            Some(ActiveEngine::Sentence(e)) => {
                let filled = e.slots().iter().filter(|s| s.is_some()).count();
                (0, format!("{} of {} blocks placed", filled, e.slots().len()))
            }
            Some(ActiveEngine::Dialogue(e)) => (e.score(), format!("Step {}", e.steps() + 1)),
            Some(ActiveEngine::Decision(e)) => (
                e.score(),
                format!("Complaint {} of {}", e.prompt_number(), e.prompt_total()),
            ),
            Some(ActiveEngine::WordMatch(e)) => (
                e.score(),
                format!("Word {} of {}", e.prompt_number(), e.prompt_total()),
            ),
            Some(ActiveEngine::Recipe(e)) => (
                e.score(),
                if e.is_reading() {
                    format!("Reading recipe {} of {}", e.recipe_number(), e.recipe_total())
                } else {
                    format!("Question {} of {}", e.question_number(), e.question_total())
                },
            ),
            None => (0, String::new()),
        };
        let lines = vec![
            Line::from(vec![
                Span::raw("Score: "),
                Span::styled(
                    score.to_string(),
                    Style::default().fg(self.theme.success).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(progress, Style::default().fg(self.theme.fg))),
            Line::from(""),
            Line::from(Span::styled(
                "Every 10 points is a gem",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(styled_block("Progress", &self.theme)),
            area,
        );
    }

    fn render_complete(
        &self,
        frame: &mut Frame,
        module: ModuleId,
        score: u32,
        gems_earned: u32,
        improved_best: bool,
        new_unlocks: &[ModuleId],
    ) {
        let area = frame.area();
        frame.render_widget(Clear, area);

        let mut content = vec![
            String::new(),
            format!("  You finished {}!", module.title()),
            String::new(),
            format!("  Score: {}    Gems earned: ◆ {}", score, gems_earned),
        ];
        if improved_best {
            content.push("  A new personal best!".to_string());
        }
        for unlocked in new_unlocks {
            content.push(String::new());
            content.push(format!("  ★ {} is now open! ★", unlocked.title()));
        }
        content.push(String::new());
        content.push("  Press Enter to go back to the island map".to_string());

        let height = (content.len() as u16 + 2).min(area.height);
        let box_area = Rect::new(
            area.width / 6,
            area.height.saturating_sub(height) / 2,
            area.width * 2 / 3,
            height,
        );
        frame.render_widget(
            CelebrationBox::new("GREAT JOB")
                .content(content)
                .border_color(self.theme.success),
            box_area,
        );
    }

    fn render_locked(&self, frame: &mut Frame, module: ModuleId, needed: u32) {
        let area = frame.area();
        frame.render_widget(Clear, area);

        let content = vec![
            String::new(),
            format!("  {} is still locked.", module.title()),
            String::new(),
            format!(
                "  You need ◆ {} gems to enter. You have ◆ {}.",
                needed,
                self.controller.gems()
            ),
            String::new(),
            "  Play the open zones to earn more Knowledge Gems!".to_string(),
            String::new(),
            "  Press Enter to go back".to_string(),
        ];
        let height = (content.len() as u16 + 2).min(area.height);
        let box_area = Rect::new(
            area.width / 6,
            area.height.saturating_sub(height) / 2,
            area.width * 2 / 3,
            height,
        );
        frame.render_widget(
            CelebrationBox::new("LOCKED")
                .content(content)
                .border_color(self.theme.warning),
            box_area,
        );
    }

    fn render_dashboard(&self, frame: &mut Frame, view: &DashboardView) {
        let area = frame.area();
        frame.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Percentage(45),
                Constraint::Percentage(45),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Paragraph::new(format!("TEACHER DASHBOARD — {}", view.session_summary()))
            .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(title, chunks[0]);

        let mut student_lines = vec![Line::from(Span::styled(
            format!("{:<20} {:>8} {:>12}", "Student", "Gems", "Completed"),
            Style::default().fg(self.theme.header).add_modifier(Modifier::BOLD),
        ))];
        for [id, gems, completed] in view.student_rows() {
            student_lines.push(Line::from(format!(
                "{:<20} {:>8} {:>12}",
                id, gems, completed
            )));
        }
        frame.render_widget(
            Paragraph::new(student_lines).block(styled_block("Students", &self.theme)),
            chunks[1],
        );

        let mut module_lines = vec![Line::from(Span::styled(
            format!(
                "{:<20} {:>12} {:>12} {:>10}",
                "Zone", "Completions", "Avg score", "Avg time"
            ),
            Style::default().fg(self.theme.header).add_modifier(Modifier::BOLD),
        ))];
        for [title, count, avg, time] in view.module_rows() {
            module_lines.push(Line::from(format!(
                "{:<20} {:>12} {:>12} {:>10}",
                title, count, avg, time
            )));
        }
        frame.render_widget(
            Paragraph::new(module_lines).block(styled_block("Zones", &self.theme)),
            chunks[2],
        );

        let footer = Paragraph::new("Esc to close")
            .style(Style::default().fg(self.theme.border))
            .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[3]);
    }

    fn render_password_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let width = 44.min(area.width);
        let overlay = Rect::new(
            (area.width - width) / 2,
            (area.height / 2).saturating_sub(2),
            width,
            4.min(area.height),
        );
        frame.render_widget(Clear, overlay);
        let masked = "*".repeat(self.input_buffer.len());
        let widget = Paragraph::new(vec![
            Line::from("Teacher password:"),
            Line::from(Span::styled(
                format!("{masked}_"),
                Style::default().fg(self.theme.warning),
            )),
        ])
        .block(styled_block("Teacher Access", &self.theme));
        frame.render_widget(widget, overlay);
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let width = 67.min(area.width);
        let height = (HELP_TEXT.lines().count() as u16).min(area.height);
        let overlay = Rect::new(
            (area.width - width) / 2,
            (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );
        frame.render_widget(Clear, overlay);
        let help = Paragraph::new(HELP_TEXT)
            .style(Style::default().fg(self.theme.fg))
            .alignment(Alignment::Center);
        frame.render_widget(help, overlay);
    }

    fn render_bottom_bar(&self, frame: &mut Frame, fallback: &str) {
        let area = frame.area();
        if area.height < 2 {
            return;
        }
        let bar = Rect::new(0, area.height - 1, area.width, 1);
        self.render_notice_or(frame, bar, fallback);
    }

    fn render_notice_or(&self, frame: &mut Frame, area: Rect, fallback: &str) {
        let (text, style) = match &self.banner {
            Some((notice, _)) => (
                notice.clone(),
                Style::default().fg(self.theme.warning).add_modifier(Modifier::BOLD),
            ),
            None => (fallback.to_string(), Style::default().fg(self.theme.border)),
        };
        let widget = Paragraph::new(text).style(style).alignment(Alignment::Center);
        frame.render_widget(widget, area);
    }
}
