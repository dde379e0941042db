use crossterm::event::{Event, KeyEvent};
use devenv_core::github::RepoCandidate;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::Color;
use ratatui::widgets::{
    Clear, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::centered_rect;
use crate::keymap;
use crate::theme;
use crate::ui::text::{compact_hint, focus_line, key_hint_height, key_hint_paragraph};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RepoPickerSignal {
    Continue,
    /// Confirmed with the highlighted candidate's url.
    Chosen(String),
    /// Explicit "clear the current selection", regardless of highlight.
    Cleared,
    Cancelled,
}

#[derive(Debug)]
pub(crate) struct RepoPickerState {
    candidates: Vec<RepoCandidate>,
    filtered: Vec<usize>,
    selected: usize,
    query: Input,
    filter_focused: bool,
}

impl RepoPickerState {
    pub(crate) fn new(candidates: Vec<RepoCandidate>) -> Self {
        let mut state = Self {
            candidates,
            filtered: Vec::new(),
            selected: 0,
            query: Input::default(),
            // Matches the form's flow: the picker opens ready to type.
            filter_focused: true,
        };
        state.refresh_filtered();
        state
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent) -> RepoPickerSignal {
        if keymap::is_back(key) {
            return RepoPickerSignal::Cancelled;
        }

        if keymap::is_focus_switch(key) {
            self.filter_focused = !self.filter_focused;
            return RepoPickerSignal::Continue;
        }

        if keymap::is_confirm(key) {
            return match self.highlighted() {
                Some(candidate) => RepoPickerSignal::Chosen(candidate.url.clone()),
                None => RepoPickerSignal::Continue,
            };
        }

        if self.filter_focused {
            if self.query.handle_event(&Event::Key(key)).is_some() {
                self.refresh_filtered();
            }
            return RepoPickerSignal::Continue;
        }

        if keymap::is_up(key) {
            self.selected = self.selected.saturating_sub(1);
            return RepoPickerSignal::Continue;
        }

        if keymap::is_down(key) {
            if self.selected + 1 < self.filtered.len() {
                self.selected += 1;
            }
            return RepoPickerSignal::Continue;
        }

        if keymap::is_clear(key) {
            return RepoPickerSignal::Cleared;
        }

        RepoPickerSignal::Continue
    }

    pub(crate) fn highlighted(&self) -> Option<&RepoCandidate> {
        let index = *self.filtered.get(self.selected)?;
        self.candidates.get(index)
    }

    /// Recomputed from the full candidate set on every edit, so the subset
    /// is correct for both widening and narrowing changes.
    fn refresh_filtered(&mut self) {
        let query = self.query.value().trim().to_lowercase();
        self.filtered = self
            .candidates
            .iter()
            .enumerate()
            .filter(|(_, candidate)| {
                query.is_empty() || candidate.name.to_lowercase().contains(&query)
            })
            .map(|(index, _)| index)
            .collect();

        if self.filtered.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.filtered.len() {
            self.selected = self.filtered.len() - 1;
        }
    }

    #[cfg(test)]
    fn visible_names(&self) -> Vec<&str> {
        self.filtered
            .iter()
            .filter_map(|index| self.candidates.get(*index))
            .map(|candidate| candidate.name.as_str())
            .collect()
    }

    pub(crate) fn render(&self, frame: &mut ratatui::Frame<'_>) {
        let area = centered_rect(80, 80, frame.area());
        frame.render_widget(Clear, area);

        let key_text = if self.filter_focused {
            compact_hint(
                area.width,
                "Type: filter    Enter: select    Tab: list focus    Esc: cancel",
                "Type filter    Enter: select    Tab: list    Esc: cancel",
                "Type | Enter sel | Tab list | Esc cancel",
            )
        } else {
            compact_hint(
                area.width,
                "Enter: select    c: clear selection    Up/Down or j/k: move    Tab: filter    Esc: cancel",
                "Enter: select    c: clear    j/k: move    Esc: cancel",
                "Enter sel | c clear | j/k | Esc",
            )
        };
        let footer_height = key_hint_height(area.width, key_text);
        let [filter_area, list_area, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(footer_height),
            ])
            .areas(area);

        self.render_filter(frame, filter_area);

        let title = if self.filter_focused {
            ratatui::text::Line::from("Select Repository (type to filter)")
        } else {
            focus_line("Select Repository")
        };

        if self.filtered.is_empty() {
            frame.render_widget(
                Paragraph::new("No matching repositories.").block(theme::chrome(title)),
                list_area,
            );
        } else {
            let items: Vec<ListItem<'_>> = self
                .filtered
                .iter()
                .filter_map(|index| self.candidates.get(*index))
                .map(|candidate| ListItem::new(candidate.name.clone()))
                .collect();
            let list = List::new(items)
                .block(theme::chrome(title))
                .highlight_style(theme::list_highlight(Color::Yellow))
                .highlight_symbol(">> ");

            let mut state = ListState::default();
            state.select(Some(self.selected));
            frame.render_stateful_widget(list, list_area, &mut state);

            let viewport = list_area.height.saturating_sub(2) as usize;
            let mut scrollbar_state = ScrollbarState::new(self.filtered.len())
                .position(self.selected)
                .viewport_content_length(viewport);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                list_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        let hints = key_hint_paragraph(key_text).block(theme::key_block());
        frame.render_widget(hints, footer);
    }

    fn render_filter(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = if self.filter_focused {
            focus_line("Filter")
        } else {
            ratatui::text::Line::from("Filter (Tab to focus)")
        };

        let width = area.width.saturating_sub(2) as usize;
        let scroll = self.query.visual_scroll(width);
        let paragraph = Paragraph::new(self.query.value())
            .scroll((0, scroll as u16))
            .block(theme::chrome(title));
        frame.render_widget(paragraph, area);

        if !self.filter_focused || width == 0 {
            return;
        }

        let visual = self.query.visual_cursor();
        let relative = visual.saturating_sub(scroll).min(width.saturating_sub(1));
        frame.set_cursor_position((area.x + 1 + relative as u16, area.y + 1));
    }
}
