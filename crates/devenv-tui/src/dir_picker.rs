use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crossterm::event::{Event, KeyEvent};
use devenv_core::fsops::{create_folder, filter_hidden, list_subdirectories};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;
use ratatui::widgets::{Clear, Paragraph, ScrollbarOrientation};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_tree_widget::{Scrollbar as TreeScrollbar, Tree, TreeItem, TreeState};

use crate::centered_rect;
use crate::keymap;
use crate::theme;
use crate::ui::text::{compact_hint, key_hint_height, key_hint_paragraph};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DirPickerSignal {
    Continue,
    /// Confirmed: the current selection, or the start path when nothing was
    /// ever selected. Always a usable path.
    Picked(PathBuf),
    Cancelled,
}

#[derive(Debug)]
struct DirNode {
    path: PathBuf,
    name: String,
    /// None until the level has been listed (lazy expansion).
    children: Option<Vec<String>>,
}

#[derive(Debug)]
pub(crate) struct DirPickerState {
    start_path: PathBuf,
    nodes: BTreeMap<String, DirNode>,
    roots: Vec<String>,
    expanded: BTreeSet<String>,
    visible: Vec<String>,
    cursor: usize,
    selection: Option<PathBuf>,
    folder_input: Input,
    input_focused: bool,
    error: Option<String>,
    created: bool,
}

impl DirPickerState {
    pub(crate) fn new(start_path: PathBuf) -> Self {
        let mut state = Self {
            start_path,
            nodes: BTreeMap::new(),
            roots: Vec::new(),
            expanded: BTreeSet::new(),
            visible: Vec::new(),
            cursor: 0,
            selection: None,
            folder_input: Input::default(),
            input_focused: false,
            error: None,
            created: false,
        };
        state.load_level(None);
        state.rebuild_visible();
        state
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent) -> DirPickerSignal {
        if keymap::is_back(key) {
            return DirPickerSignal::Cancelled;
        }

        if keymap::is_focus_switch(key) {
            self.input_focused = !self.input_focused;
            return DirPickerSignal::Continue;
        }

        if self.input_focused {
            if keymap::is_confirm(key) {
                self.create_folder_from_input();
                return DirPickerSignal::Continue;
            }
            if self.folder_input.handle_event(&Event::Key(key)).is_some() {
                self.error = None;
            }
            return DirPickerSignal::Continue;
        }

        if keymap::is_up(key) {
            self.cursor = self.cursor.saturating_sub(1);
            return DirPickerSignal::Continue;
        }

        if keymap::is_down(key) {
            if self.cursor + 1 < self.visible.len() {
                self.cursor += 1;
            }
            return DirPickerSignal::Continue;
        }

        if keymap::is_expand(key) {
            if let Some(current) = self.visible.get(self.cursor).cloned() {
                self.ensure_loaded(&current);
                self.expanded.insert(current);
                self.rebuild_visible();
            }
            return DirPickerSignal::Continue;
        }

        if keymap::is_collapse(key) {
            if let Some(current) = self.visible.get(self.cursor).cloned() {
                self.expanded.remove(&current);
                self.rebuild_visible();
            }
            return DirPickerSignal::Continue;
        }

        if keymap::is_toggle(key) {
            if let Some(current) = self.visible.get(self.cursor)
                && let Some(node) = self.nodes.get(current)
            {
                self.selection = Some(node.path.clone());
                self.created = false;
                self.error = None;
            }
            return DirPickerSignal::Continue;
        }

        if keymap::is_confirm(key) {
            let picked = self
                .selection
                .clone()
                .unwrap_or_else(|| self.start_path.clone());
            return DirPickerSignal::Picked(picked);
        }

        DirPickerSignal::Continue
    }

    pub(crate) fn selection(&self) -> Option<&Path> {
        self.selection.as_deref()
    }

    fn load_level(&mut self, parent_key: Option<&str>) {
        let parent_path = match parent_key {
            Some(key) => self.start_path.join(key),
            None => self.start_path.clone(),
        };

        let entries = filter_hidden(list_subdirectories(&parent_path));
        let mut child_keys = Vec::with_capacity(entries.len());
        for entry in entries {
            let key = match parent_key {
                Some(parent) => format!("{parent}/{}", entry.name),
                None => entry.name.clone(),
            };
            self.nodes.insert(
                key.clone(),
                DirNode {
                    path: entry.path,
                    name: entry.name,
                    children: None,
                },
            );
            child_keys.push(key);
        }

        match parent_key {
            Some(parent) => {
                if let Some(node) = self.nodes.get_mut(parent) {
                    node.children = Some(child_keys);
                }
            }
            None => self.roots = child_keys,
        }
    }

    fn ensure_loaded(&mut self, key: &str) {
        let needs_listing = self
            .nodes
            .get(key)
            .is_some_and(|node| node.children.is_none());
        if needs_listing {
            self.load_level(Some(key));
        }
    }

    fn rebuild_visible(&mut self) {
        let mut visible = Vec::new();
        let roots = self.roots.clone();
        for key in &roots {
            self.push_visible(key, &mut visible);
        }
        self.visible = visible;

        if self.visible.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.visible.len() {
            self.cursor = self.visible.len() - 1;
        }
    }

    fn push_visible(&self, key: &str, out: &mut Vec<String>) {
        out.push(key.to_string());

        if self.expanded.contains(key)
            && let Some(children) = self.nodes.get(key).and_then(|node| node.children.as_ref())
        {
            for child in children {
                self.push_visible(child, out);
            }
        }
    }

    fn create_folder_from_input(&mut self) {
        let name = self.folder_input.value().trim().to_string();
        if name.is_empty() {
            return;
        }

        let parent = self
            .selection
            .clone()
            .unwrap_or_else(|| self.start_path.clone());

        match create_folder(&parent, &name) {
            Ok(created) => {
                self.selection = Some(created.clone());
                self.created = true;
                self.error = None;
                self.folder_input = Input::default();
                self.reveal_path(&created);
            }
            Err(error) => {
                self.error = Some(error.to_string());
                self.created = false;
            }
        }
    }

    fn key_for_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.start_path).ok()?;
        if relative.as_os_str().is_empty() {
            return None;
        }
        Some(relative.to_string_lossy().to_string())
    }

    /// Reloads and expands the tree along the path so a freshly created
    /// folder is visible and highlighted.
    fn reveal_path(&mut self, target: &Path) {
        let Some(target_key) = self.key_for_path(target) else {
            return;
        };

        let segments: Vec<String> = target_key.split('/').map(str::to_string).collect();
        let mut parent_key: Option<String> = None;

        for segment in &segments {
            let prefix = match parent_key.as_deref() {
                Some(parent) => format!("{parent}/{segment}"),
                None => segment.clone(),
            };

            let known = match parent_key.as_deref() {
                None => self.roots.contains(&prefix),
                Some(parent) => self
                    .nodes
                    .get(parent)
                    .and_then(|node| node.children.as_ref())
                    .is_some_and(|children| children.contains(&prefix)),
            };
            if !known {
                self.load_level(parent_key.as_deref());
            }

            if prefix != target_key {
                self.ensure_loaded(&prefix);
                self.expanded.insert(prefix.clone());
            }

            parent_key = Some(prefix);
        }

        self.rebuild_visible();
        if let Some(index) = self.visible.iter().position(|key| key == &target_key) {
            self.cursor = index;
        }
    }

    fn readout_line(&self) -> (String, ratatui::style::Style) {
        if let Some(error) = &self.error {
            return (format!("Error: {error}"), theme::error_prompt());
        }

        match &self.selection {
            Some(path) if self.created => (
                format!("Created & selected: {}", path.display()),
                theme::success_prompt(),
            ),
            Some(path) => (format!("Selected: {}", path.display()), theme::focus_prompt()),
            None => (
                format!("Current: {}", self.start_path.display()),
                theme::secondary_text(),
            ),
        }
    }

    fn tree_items(&self) -> Vec<TreeItem<'static, String>> {
        self.roots
            .iter()
            .filter_map(|key| self.tree_item_for(key))
            .collect()
    }

    fn tree_item_for(&self, key: &str) -> Option<TreeItem<'static, String>> {
        let node = self.nodes.get(key)?;

        let children: Vec<TreeItem<'static, String>> = node
            .children
            .as_ref()
            .map(|child_keys| {
                child_keys
                    .iter()
                    .filter_map(|child| self.tree_item_for(child))
                    .collect()
            })
            .unwrap_or_default();

        if children.is_empty() {
            Some(TreeItem::new_leaf(key.to_string(), node.name.clone()))
        } else {
            Some(
                TreeItem::new(key.to_string(), node.name.clone(), children)
                    .expect("directory tree identifiers are unique"),
            )
        }
    }

    fn tree_state(&self) -> TreeState<String> {
        let mut state = TreeState::default();
        for key in &self.expanded {
            state.open(identifier_path_for_key(key));
        }
        if let Some(key) = self.visible.get(self.cursor) {
            state.select(identifier_path_for_key(key));
        }
        state
    }

    pub(crate) fn render(&self, frame: &mut ratatui::Frame<'_>) {
        let area = centered_rect(84, 84, frame.area());
        frame.render_widget(Clear, area);

        let key_text = if self.input_focused {
            compact_hint(
                area.width,
                "Type: folder name    Enter: create folder    Tab: back to tree    Esc: cancel",
                "Type name    Enter: create    Tab: tree    Esc: cancel",
                "Type | Enter create | Tab tree | Esc cancel",
            )
        } else {
            compact_hint(
                area.width,
                "Space: select    Right/Left: expand/collapse    Enter: confirm    Tab: new folder    Esc: cancel",
                "Space: select    Enter: confirm    Tab: new folder    Esc: cancel",
                "Space sel | Enter ok | Tab new | Esc cancel",
            )
        };
        let footer_height = key_hint_height(area.width, key_text);
        let [readout_area, tree_area, input_area, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(footer_height),
            ])
            .areas(area);

        let (readout, style) = self.readout_line();
        frame.render_widget(
            Paragraph::new(readout)
                .style(style)
                .block(theme::chrome("Select Target Directory")),
            readout_area,
        );

        let tree_title = if self.input_focused {
            ratatui::text::Line::from("Directories")
        } else {
            crate::ui::text::focus_line("Directories")
        };
        let items = self.tree_items();
        if items.is_empty() {
            frame.render_widget(
                Paragraph::new("No subdirectories here. Tab creates a new folder.")
                    .block(theme::chrome(tree_title)),
                tree_area,
            );
        } else {
            let mut state = self.tree_state();
            let tree = Tree::new(&items)
                .expect("directory tree identifiers are unique")
                .block(theme::chrome(tree_title))
                .experimental_scrollbar(Some(
                    TreeScrollbar::new(ScrollbarOrientation::VerticalRight)
                        .begin_symbol(None)
                        .end_symbol(None),
                ))
                .highlight_style(theme::list_highlight(Color::Cyan))
                .highlight_symbol(">> ");
            frame.render_stateful_widget(tree, tree_area, &mut state);
        }

        self.render_folder_input(frame, input_area);

        let hints = key_hint_paragraph(key_text).block(theme::key_block());
        frame.render_widget(hints, footer);
    }

    fn render_folder_input(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = if self.input_focused {
            crate::ui::text::focus_line("New folder")
        } else {
            ratatui::text::Line::from("New folder (Tab to focus)")
        };

        let width = area.width.saturating_sub(2) as usize;
        let scroll = self.folder_input.visual_scroll(width);
        let paragraph = Paragraph::new(self.folder_input.value())
            .scroll((0, scroll as u16))
            .block(theme::chrome(title));
        frame.render_widget(paragraph, area);

        if !self.input_focused || width == 0 {
            return;
        }

        let visual = self.folder_input.visual_cursor();
        let relative = visual.saturating_sub(scroll).min(width.saturating_sub(1));
        frame.set_cursor_position((area.x + 1 + relative as u16, area.y + 1));
    }
}

fn identifier_path_for_key(key: &str) -> Vec<String> {
    let mut identifiers = Vec::new();
    let mut current = String::new();
    for segment in key.split('/') {
        if current.is_empty() {
            current = segment.to_string();
        } else {
            current = format!("{current}/{segment}");
        }
        identifiers.push(current.clone());
    }
    identifiers
}
