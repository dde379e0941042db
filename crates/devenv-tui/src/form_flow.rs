use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent};
use devenv_app::{App, SetupOutcome, SetupRequest};
use devenv_core::github::RepoCandidate;
use devenv_core::names::validate_project_name;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::UiExit;
use crate::dir_picker::{DirPickerSignal, DirPickerState};
use crate::keymap;
use crate::repo_picker::{RepoPickerSignal, RepoPickerState};
use crate::theme;
use crate::ui::text::{
    compact_hint, focus_line, key_hint_height, key_hint_paragraph, wrapped_paragraph,
};

pub(crate) trait FormOps {
    fn repo_candidates(&self) -> Result<Vec<RepoCandidate>>;
}

impl<'a> FormOps for App<'a> {
    fn repo_candidates(&self) -> Result<Vec<RepoCandidate>> {
        self.ensure_repos_loaded()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FormOptions {
    pub(crate) versions: Vec<String>,
    pub(crate) default_version: String,
    pub(crate) target_dir: PathBuf,
    pub(crate) picker_root: PathBuf,
}

impl FormOptions {
    pub(crate) fn from_app(app: &App<'_>) -> Result<Self> {
        Ok(Self {
            versions: app.config.setup.platform_versions.clone(),
            default_version: app.config.setup.default_version.clone(),
            target_dir: app.config.resolved_base_path()?,
            picker_root: devenv_core::config::resolve_home_dir()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    ProjectName,
    PlatformVersion,
    TargetDir,
    DbName,
    Precommit,
    Repo,
    Create,
}

impl FormField {
    fn label(self) -> &'static str {
        match self {
            Self::ProjectName => "Project Name",
            Self::PlatformVersion => "Odoo Version",
            Self::TargetDir => "Target Directory",
            Self::DbName => "Database Name",
            Self::Precommit => "Pre-commit",
            Self::Repo => "Clone Git Repo",
            Self::Create => "",
        }
    }

    fn is_text_input(self) -> bool {
        matches!(self, Self::ProjectName | Self::DbName)
    }
}

const FORM_FIELDS: [FormField; 7] = [
    FormField::ProjectName,
    FormField::PlatformVersion,
    FormField::TargetDir,
    FormField::DbName,
    FormField::Precommit,
    FormField::Repo,
    FormField::Create,
];

const LABEL_WIDTH: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
    Success,
}

#[derive(Debug, Clone)]
struct StatusLine {
    message: String,
    kind: StatusKind,
}

impl StatusLine {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Info,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Error,
        }
    }

    fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Success,
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default(),
            StatusKind::Error => theme::error_prompt(),
            StatusKind::Success => theme::success_prompt(),
        }
    }
}

enum Modal {
    DirPicker(DirPickerState),
    RepoPicker(RepoPickerState),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FormSignal {
    Exit(UiExit),
    RunSetup(SetupRequest),
}

pub(crate) struct FormScreen {
    focus: usize,
    name_input: Input,
    versions: Vec<String>,
    version_index: usize,
    target_dir: PathBuf,
    picker_root: PathBuf,
    db_input: Input,
    install_precommit: bool,
    repo_candidates: Vec<RepoCandidate>,
    selected_repo: Option<String>,
    selected_repo_name: Option<String>,
    modal: Option<Modal>,
    status: StatusLine,
    run_log: Vec<String>,
}

impl FormScreen {
    pub(crate) fn new(options: FormOptions) -> Self {
        let version_index = options
            .versions
            .iter()
            .position(|version| version == &options.default_version)
            .unwrap_or(0);

        Self {
            focus: 0,
            name_input: Input::default(),
            versions: options.versions,
            version_index,
            target_dir: options.target_dir,
            picker_root: options.picker_root,
            db_input: Input::default(),
            install_precommit: false,
            repo_candidates: Vec::new(),
            selected_repo: None,
            selected_repo_name: None,
            modal: None,
            status: StatusLine::info("Ready"),
            run_log: Vec::new(),
        }
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent, ops: &dyn FormOps) -> Option<FormSignal> {
        if self.modal.is_some() {
            self.on_modal_key(key);
            return None;
        }

        if keymap::is_back(key) {
            return Some(FormSignal::Exit(UiExit::Completed));
        }

        if matches!(key.code, KeyCode::Up) {
            self.focus = self.focus.saturating_sub(1);
            return None;
        }

        if matches!(key.code, KeyCode::Down) || keymap::is_focus_switch(key) {
            if self.focus + 1 < FORM_FIELDS.len() {
                self.focus += 1;
            }
            return None;
        }

        let field = FORM_FIELDS[self.focus];

        if keymap::is_confirm(key) {
            return self.activate(field, ops);
        }

        if !field.is_text_input() && keymap::is_quit(key) {
            return Some(FormSignal::Exit(UiExit::Completed));
        }

        match field {
            FormField::ProjectName => {
                self.name_input.handle_event(&Event::Key(key));
            }
            FormField::DbName => {
                self.db_input.handle_event(&Event::Key(key));
            }
            FormField::PlatformVersion => {
                if matches!(key.code, KeyCode::Left) {
                    self.version_index =
                        (self.version_index + self.versions.len() - 1) % self.versions.len();
                } else if matches!(key.code, KeyCode::Right) {
                    self.version_index = (self.version_index + 1) % self.versions.len();
                }
            }
            FormField::Precommit => {
                if keymap::is_toggle(key) {
                    self.install_precommit = !self.install_precommit;
                }
            }
            FormField::TargetDir | FormField::Repo | FormField::Create => {}
        }

        None
    }

    fn on_modal_key(&mut self, key: KeyEvent) {
        let Some(mut modal) = self.modal.take() else {
            return;
        };

        match &mut modal {
            Modal::DirPicker(picker) => match picker.on_key(key) {
                DirPickerSignal::Continue => {
                    self.modal = Some(modal);
                }
                DirPickerSignal::Picked(path) => {
                    self.status =
                        StatusLine::info(format!("Target directory set to {}", path.display()));
                    self.target_dir = path;
                }
                DirPickerSignal::Cancelled => {}
            },
            Modal::RepoPicker(picker) => match picker.on_key(key) {
                RepoPickerSignal::Continue => {
                    self.modal = Some(modal);
                }
                RepoPickerSignal::Chosen(url) => {
                    let name = self
                        .repo_candidates
                        .iter()
                        .find(|candidate| candidate.url == url)
                        .map(|candidate| candidate.name.clone())
                        .unwrap_or_else(|| url.clone());
                    self.status = StatusLine::info(format!("Repository selected: {name}"));
                    self.selected_repo = Some(url);
                    self.selected_repo_name = Some(name);
                }
                RepoPickerSignal::Cleared => {
                    self.selected_repo = None;
                    self.selected_repo_name = None;
                    self.status = StatusLine::info("Repository selection cleared");
                }
                RepoPickerSignal::Cancelled => {}
            },
        }
    }

    fn activate(&mut self, field: FormField, ops: &dyn FormOps) -> Option<FormSignal> {
        match field {
            FormField::ProjectName | FormField::PlatformVersion | FormField::DbName => {
                if self.focus + 1 < FORM_FIELDS.len() {
                    self.focus += 1;
                }
                None
            }
            FormField::Precommit => {
                self.install_precommit = !self.install_precommit;
                None
            }
            FormField::TargetDir => {
                self.modal = Some(Modal::DirPicker(DirPickerState::new(
                    self.picker_root.clone(),
                )));
                None
            }
            FormField::Repo => {
                self.open_repo_picker(ops);
                None
            }
            FormField::Create => self.submit(),
        }
    }

    /// The listing call blocks the event loop, so it only ever happens here,
    /// on an explicit activation of the repository field.
    fn open_repo_picker(&mut self, ops: &dyn FormOps) {
        match ops.repo_candidates() {
            Ok(candidates) => {
                self.status = StatusLine::info(format!("Loaded {} repositories", candidates.len()));
                self.repo_candidates = candidates.clone();
                self.modal = Some(Modal::RepoPicker(RepoPickerState::new(candidates)));
            }
            Err(error) => {
                self.status = StatusLine::error(format!("{error:#}"));
            }
        }
    }

    fn submit(&mut self) -> Option<FormSignal> {
        let project_name = self.name_input.value().trim().to_string();
        if let Err(error) = validate_project_name(&project_name) {
            self.status = StatusLine::error(error.to_string());
            self.focus = 0;
            return None;
        }

        let db_name = self.db_input.value().trim().to_string();
        let request = SetupRequest {
            project_name,
            platform_version: self.versions[self.version_index].clone(),
            target_dir: self.target_dir.clone(),
            db_name: (!db_name.is_empty()).then_some(db_name),
            install_precommit: self.install_precommit,
            clone_repo: self.selected_repo.clone(),
        };

        Some(FormSignal::RunSetup(request))
    }

    pub(crate) fn on_setup_finished(
        &mut self,
        request: &SetupRequest,
        result: Result<SetupOutcome>,
    ) {
        match result {
            Ok(outcome) if outcome.succeeded() => {
                self.run_log = vec![format!("Setup completed for {}", request.project_name)];
                self.status = StatusLine::success("Environment created successfully!");
            }
            Ok(outcome) => {
                self.run_log = vec![format!(
                    "Setup failed with exit code {} for {}",
                    outcome.exit_code, request.project_name
                )];
                self.status =
                    StatusLine::error(format!("Setup failed (exit code {})", outcome.exit_code));
            }
            Err(error) => {
                self.run_log = vec![format!("{error:#}")];
                self.status = StatusLine::error(format!("{error:#}"));
            }
        }
    }

    fn field_value(&self, field: FormField) -> String {
        match field {
            FormField::ProjectName => self.name_input.value().to_string(),
            FormField::PlatformVersion => format!("< {} >", self.versions[self.version_index]),
            FormField::TargetDir => self.target_dir.display().to_string(),
            FormField::DbName => self.db_input.value().to_string(),
            FormField::Precommit => {
                let mark = if self.install_precommit { "x" } else { " " };
                format!("[{mark}] Install pre-commit hooks")
            }
            FormField::Repo => self
                .selected_repo_name
                .clone()
                .unwrap_or_else(|| "(none)".to_string()),
            FormField::Create => "[ Create Environment ]".to_string(),
        }
    }

    fn row_line(&self, index: usize) -> Line<'static> {
        let field = FORM_FIELDS[index];
        let focused = self.focus == index && self.modal.is_none();
        let marker = if focused { ">> " } else { "   " };
        let label = format!("{marker}{:<17}", field.label());
        let label_style = if focused {
            theme::focus_prompt()
        } else {
            theme::secondary_text()
        };

        let mut value = self.field_value(field);
        if value.is_empty() {
            value = match field {
                FormField::ProjectName => "e.g., houtland-18".to_string(),
                FormField::DbName => "e.g., myproject (optional)".to_string(),
                _ => value,
            };
            return Line::from(vec![
                Span::styled(label, label_style),
                Span::styled(value, theme::secondary_text()),
            ]);
        }

        Line::from(vec![Span::styled(label, label_style), Span::raw(value)])
    }

    fn focused_input(&self) -> Option<&Input> {
        match FORM_FIELDS[self.focus] {
            FormField::ProjectName => Some(&self.name_input),
            FormField::DbName => Some(&self.db_input),
            _ => None,
        }
    }

    pub(crate) fn render(&self, frame: &mut ratatui::Frame<'_>) {
        let area = frame.area();
        let key_text = compact_hint(
            area.width,
            "Up/Down: move    Enter: open/confirm    Space: toggle    Esc: quit",
            "Up/Down: move    Enter: open    Space: toggle    Esc: quit",
            "Up/Down | Enter | Space | Esc quit",
        );
        let footer_height = key_hint_height(area.width, key_text);
        let [header, form_area, log_area, status_area, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(FORM_FIELDS.len() as u16 + 2),
                Constraint::Min(4),
                Constraint::Length(3),
                Constraint::Length(footer_height),
            ])
            .areas(area);

        let title = Paragraph::new("Create Odoo development environments with ease")
            .block(theme::chrome("devenv"));
        frame.render_widget(title, header);

        let rows: Vec<Line<'static>> = (0..FORM_FIELDS.len())
            .map(|index| self.row_line(index))
            .collect();
        let form = Paragraph::new(rows).block(theme::chrome(focus_line("Environment")));
        frame.render_widget(form, form_area);

        let log_lines: Vec<Line<'static>> = if self.run_log.is_empty() {
            vec![Line::from(Span::styled(
                "No runs yet.",
                theme::secondary_text(),
            ))]
        } else {
            self.run_log
                .iter()
                .map(|line| Line::from(line.clone()))
                .collect()
        };
        frame.render_widget(
            wrapped_paragraph(log_lines).block(theme::chrome("Output Log")),
            log_area,
        );

        frame.render_widget(
            Paragraph::new(self.status.message.clone())
                .style(self.status.style())
                .block(theme::chrome("Status")),
            status_area,
        );

        let hints = key_hint_paragraph(key_text).block(theme::key_block());
        frame.render_widget(hints, footer);

        self.position_cursor(frame, form_area);

        match &self.modal {
            Some(Modal::DirPicker(picker)) => picker.render(frame),
            Some(Modal::RepoPicker(picker)) => picker.render(frame),
            None => {}
        }
    }

    fn position_cursor(&self, frame: &mut ratatui::Frame<'_>, form_area: Rect) {
        if self.modal.is_some() {
            return;
        }
        let Some(input) = self.focused_input() else {
            return;
        };

        let inner_x = form_area.x + 1 + LABEL_WIDTH;
        let inner_y = form_area.y + 1 + self.focus as u16;
        let width = form_area
            .width
            .saturating_sub(2 + LABEL_WIDTH)
            .max(1) as usize;
        let scroll = input.visual_scroll(width);
        let visual = input.visual_cursor();
        let relative = visual.saturating_sub(scroll).min(width.saturating_sub(1));
        frame.set_cursor_position((inner_x + relative as u16, inner_y));
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use anyhow::{Result, anyhow};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use devenv_app::SetupOutcome;
    use devenv_core::github::RepoCandidate;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::{FormField, FormOps, FormOptions, FormScreen, FormSignal, Modal, StatusKind};
    use crate::UiExit;

    struct FakeOps {
        candidates: Result<Vec<RepoCandidate>>,
    }

    impl FakeOps {
        fn with_candidates() -> Self {
            Self {
                candidates: Ok(vec![
                    RepoCandidate {
                        name: "me/alpha".to_string(),
                        url: "https://github.com/me/alpha".to_string(),
                    },
                    RepoCandidate {
                        name: "org/beta".to_string(),
                        url: "https://github.com/org/beta".to_string(),
                    },
                ]),
            }
        }

        fn failing() -> Self {
            Self {
                candidates: Err(anyhow!("gh CLI not found in PATH")),
            }
        }
    }

    impl FormOps for FakeOps {
        fn repo_candidates(&self) -> Result<Vec<RepoCandidate>> {
            match &self.candidates {
                Ok(candidates) => Ok(candidates.clone()),
                Err(error) => Err(anyhow!("{error}")),
            }
        }
    }

    fn options(picker_root: &Path) -> FormOptions {
        FormOptions {
            versions: vec!["master".to_string(), "18.0".to_string(), "17.0".to_string()],
            default_version: "18.0".to_string(),
            target_dir: PathBuf::from("/home/dev/odoo_projects"),
            picker_root: picker_root.to_path_buf(),
        }
    }

    fn screen(picker_root: &Path) -> FormScreen {
        FormScreen::new(options(picker_root))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn focus_field(form: &mut FormScreen, ops: &dyn FormOps, field: FormField) {
        while super::FORM_FIELDS[form.focus] != field {
            assert!(form.on_key(key(KeyCode::Down), ops).is_none());
        }
    }

    fn type_text(form: &mut FormScreen, ops: &dyn FormOps, text: &str) {
        for ch in text.chars() {
            form.on_key(key(KeyCode::Char(ch)), ops);
        }
    }

    fn render_output(form: &FormScreen, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| form.render(frame))
            .expect("render form");
        format!("{}", terminal.backend())
    }

    #[test]
    fn default_version_is_preselected() {
        let temp = tempfile::tempdir().expect("temp dir");
        let form = screen(temp.path());
        assert_eq!(form.versions[form.version_index], "18.0");
    }

    #[test]
    fn escape_exits_the_form() {
        let temp = tempfile::tempdir().expect("temp dir");
        let ops = FakeOps::with_candidates();
        let mut form = screen(temp.path());

        assert_eq!(
            form.on_key(key(KeyCode::Esc), &ops),
            Some(FormSignal::Exit(UiExit::Completed))
        );
    }

    #[test]
    fn enter_on_target_dir_opens_the_directory_picker() {
        let temp = tempfile::tempdir().expect("temp dir");
        let ops = FakeOps::with_candidates();
        let mut form = screen(temp.path());

        focus_field(&mut form, &ops, FormField::TargetDir);
        assert!(form.on_key(key(KeyCode::Enter), &ops).is_none());
        assert!(matches!(form.modal, Some(Modal::DirPicker(_))));
    }

    #[test]
    fn picking_a_directory_updates_the_target_field() {
        let temp = tempfile::tempdir().expect("temp dir");
        let ops = FakeOps::with_candidates();
        let mut form = screen(temp.path());

        focus_field(&mut form, &ops, FormField::TargetDir);
        form.on_key(key(KeyCode::Enter), &ops);
        form.on_key(key(KeyCode::Enter), &ops);

        assert!(form.modal.is_none());
        assert_eq!(form.target_dir, temp.path());
    }

    #[test]
    fn cancelling_the_directory_picker_keeps_the_old_target() {
        let temp = tempfile::tempdir().expect("temp dir");
        let ops = FakeOps::with_candidates();
        let mut form = screen(temp.path());

        focus_field(&mut form, &ops, FormField::TargetDir);
        form.on_key(key(KeyCode::Enter), &ops);
        form.on_key(key(KeyCode::Esc), &ops);

        assert!(form.modal.is_none());
        assert_eq!(form.target_dir, PathBuf::from("/home/dev/odoo_projects"));
    }

    #[test]
    fn repo_field_opens_picker_with_loaded_candidates() {
        let temp = tempfile::tempdir().expect("temp dir");
        let ops = FakeOps::with_candidates();
        let mut form = screen(temp.path());

        focus_field(&mut form, &ops, FormField::Repo);
        form.on_key(key(KeyCode::Enter), &ops);

        assert!(matches!(form.modal, Some(Modal::RepoPicker(_))));
        assert_eq!(form.repo_candidates.len(), 2);
        assert_eq!(form.status.kind, StatusKind::Info);
    }

    #[test]
    fn repo_load_failure_surfaces_in_the_status_line() {
        let temp = tempfile::tempdir().expect("temp dir");
        let ops = FakeOps::failing();
        let mut form = screen(temp.path());

        focus_field(&mut form, &ops, FormField::Repo);
        form.on_key(key(KeyCode::Enter), &ops);

        assert!(form.modal.is_none());
        assert_eq!(form.status.kind, StatusKind::Error);
        assert!(form.status.message.contains("gh CLI not found"));
    }

    #[test]
    fn choosing_and_clearing_a_repository_updates_the_display() {
        let temp = tempfile::tempdir().expect("temp dir");
        let ops = FakeOps::with_candidates();
        let mut form = screen(temp.path());

        focus_field(&mut form, &ops, FormField::Repo);
        form.on_key(key(KeyCode::Enter), &ops);
        form.on_key(key(KeyCode::Enter), &ops);
        assert_eq!(
            form.selected_repo.as_deref(),
            Some("https://github.com/me/alpha")
        );
        assert_eq!(form.field_value(FormField::Repo), "me/alpha");

        form.on_key(key(KeyCode::Enter), &ops);
        form.on_key(key(KeyCode::Tab), &ops);
        form.on_key(key(KeyCode::Char('c')), &ops);
        assert_eq!(form.selected_repo, None);
        assert_eq!(form.field_value(FormField::Repo), "(none)");
    }

    #[test]
    fn invalid_project_name_blocks_submission_and_refocuses_the_field() {
        let temp = tempfile::tempdir().expect("temp dir");
        let ops = FakeOps::with_candidates();
        let mut form = screen(temp.path());

        type_text(&mut form, &ops, "my proj!");
        focus_field(&mut form, &ops, FormField::Create);
        let signal = form.on_key(key(KeyCode::Enter), &ops);

        assert!(signal.is_none());
        assert_eq!(form.status.kind, StatusKind::Error);
        assert_eq!(super::FORM_FIELDS[form.focus], FormField::ProjectName);
    }

    #[test]
    fn valid_submission_assembles_the_setup_request() {
        let temp = tempfile::tempdir().expect("temp dir");
        let ops = FakeOps::with_candidates();
        let mut form = screen(temp.path());

        type_text(&mut form, &ops, "my-proj_18");
        focus_field(&mut form, &ops, FormField::DbName);
        type_text(&mut form, &ops, "mydb");
        focus_field(&mut form, &ops, FormField::Precommit);
        form.on_key(key(KeyCode::Char(' ')), &ops);
        focus_field(&mut form, &ops, FormField::Create);

        let signal = form.on_key(key(KeyCode::Enter), &ops).expect("signal");
        let FormSignal::RunSetup(request) = signal else {
            panic!("expected a setup request");
        };

        assert_eq!(request.project_name, "my-proj_18");
        assert_eq!(request.platform_version, "18.0");
        assert_eq!(request.target_dir, PathBuf::from("/home/dev/odoo_projects"));
        assert_eq!(request.db_name.as_deref(), Some("mydb"));
        assert!(request.install_precommit);
        assert_eq!(request.clone_repo, None);
    }

    #[test]
    fn setup_outcomes_update_status_and_log() {
        let temp = tempfile::tempdir().expect("temp dir");
        let ops = FakeOps::with_candidates();
        let mut form = screen(temp.path());

        type_text(&mut form, &ops, "proj");
        focus_field(&mut form, &ops, FormField::Create);
        let Some(FormSignal::RunSetup(request)) = form.on_key(key(KeyCode::Enter), &ops) else {
            panic!("expected a setup request");
        };

        form.on_setup_finished(&request, Ok(SetupOutcome { exit_code: 0 }));
        assert_eq!(form.status.kind, StatusKind::Success);
        assert!(form.run_log[0].contains("Setup completed for proj"));

        form.on_setup_finished(&request, Ok(SetupOutcome { exit_code: 3 }));
        assert_eq!(form.status.kind, StatusKind::Error);
        assert!(form.status.message.contains("exit code 3"));
    }

    #[test]
    fn version_field_cycles_with_left_and_right() {
        let temp = tempfile::tempdir().expect("temp dir");
        let ops = FakeOps::with_candidates();
        let mut form = screen(temp.path());

        focus_field(&mut form, &ops, FormField::PlatformVersion);
        form.on_key(key(KeyCode::Right), &ops);
        assert_eq!(form.versions[form.version_index], "17.0");

        form.on_key(key(KeyCode::Left), &ops);
        form.on_key(key(KeyCode::Left), &ops);
        assert_eq!(form.versions[form.version_index], "master");
    }

    #[test]
    fn render_shows_all_field_labels_and_status() {
        let temp = tempfile::tempdir().expect("temp dir");
        let form = screen(temp.path());
        let output = render_output(&form, 110, 30);

        assert!(output.contains("Project Name"));
        assert!(output.contains("Odoo Version"));
        assert!(output.contains("Target Directory"));
        assert!(output.contains("Database Name"));
        assert!(output.contains("Clone Git Repo"));
        assert!(output.contains("Create Environment"));
        assert!(output.contains("Ready"));
        assert!(output.contains("No runs yet."));
    }
}
