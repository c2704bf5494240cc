//! Dashboard application state and key handling
//!
//! The app owns the login [`Session`], the parsed records of the current
//! source and the active [`ErrorFilter`]. Filter toggles re-aggregate the
//! already-parsed records; only file selection goes back to disk, which the
//! event loop does on an [`Action::Load`].

use std::path::PathBuf;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{info, warn};

use logpulse_analyzer::{Analysis, Analyzer, ErrorFilter, LogSource, ParsedBatch, Session};
use logpulse_core::error::SourceError;
use logpulse_core::pipeline::CredentialVerifier;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    /// Read this file and hand it to [`DashboardApp::apply_source`].
    Load(PathBuf),
}

/// Login form field with keyboard focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Username,
    Password,
}

/// Login screen input.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: Focus,
    /// Last failed attempt
    pub error: Option<String>,
}

impl LoginForm {
    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Focus::Username => &mut self.username,
            Focus::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Username => Focus::Password,
            Focus::Password => Focus::Username,
        };
    }
}

pub struct DashboardApp {
    session: Session,
    verifier: Box<dyn CredentialVerifier>,
    analyzer: Analyzer,
    filter: ErrorFilter,
    default_path: PathBuf,
    source_path: PathBuf,
    batch: Option<ParsedBatch>,
    analysis: Option<Analysis>,
    login: LoginForm,
    /// File selection input, open while `Some`
    path_input: Option<String>,
    status: Option<String>,
}

impl DashboardApp {
    pub fn new(
        analyzer: Analyzer,
        verifier: Box<dyn CredentialVerifier>,
        source_path: PathBuf,
    ) -> Self {
        Self {
            session: Session::default(),
            verifier,
            filter: analyzer.filter(),
            analyzer,
            default_path: source_path.clone(),
            source_path,
            batch: None,
            analysis: None,
            login: LoginForm::default(),
            path_input: None,
            status: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    pub fn filter(&self) -> ErrorFilter {
        self.filter
    }

    pub fn source_path(&self) -> &PathBuf {
        &self.source_path
    }

    pub fn path_input(&self) -> Option<&str> {
        self.path_input.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        if !self.session.is_authenticated() {
            self.handle_login_key(key)
        } else if self.path_input.is_some() {
            self.handle_path_key(key)
        } else {
            self.handle_dashboard_key(key)
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.toggle_focus();
                Action::None
            }
            KeyCode::Enter if self.login.focus == Focus::Username => {
                self.login.focus = Focus::Password;
                Action::None
            }
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => {
                self.login.focused_mut().pop();
                Action::None
            }
            KeyCode::Char(c) => {
                self.login.focused_mut().push(c);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn submit_login(&mut self) -> Action {
        let result = self.session.login(
            self.verifier.as_ref(),
            &self.login.username,
            &self.login.password,
        );
        self.login.password.clear();

        match result {
            Ok(()) => {
                self.login.error = None;
                if self.batch.is_none() {
                    Action::Load(self.source_path.clone())
                } else {
                    Action::None
                }
            }
            Err(e) => {
                self.login.error = Some(e.to_string());
                Action::None
            }
        }
    }

    fn handle_path_key(&mut self, key: KeyEvent) -> Action {
        let Some(input) = self.path_input.as_mut() else {
            return Action::None;
        };
        match key.code {
            KeyCode::Esc => {
                self.path_input = None;
                Action::None
            }
            KeyCode::Enter => {
                let path = input.trim().to_owned();
                self.path_input = None;
                if path.is_empty() {
                    Action::None
                } else {
                    Action::Load(PathBuf::from(path))
                }
            }
            KeyCode::Backspace => {
                input.pop();
                Action::None
            }
            KeyCode::Char(c) => {
                input.push(c);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('4') => {
                self.filter.toggle_4xx();
                self.refresh();
                Action::None
            }
            KeyCode::Char('5') => {
                self.filter.toggle_5xx();
                self.refresh();
                Action::None
            }
            KeyCode::Char('o') => {
                self.path_input = Some(self.source_path.display().to_string());
                Action::None
            }
            KeyCode::Char('r') => Action::Load(self.source_path.clone()),
            KeyCode::Char('L') | KeyCode::Char('l') => {
                self.logout();
                Action::None
            }
            _ => Action::None,
        }
    }

    /// End the session and drop everything it loaded or toggled.
    fn logout(&mut self) {
        self.session.logout();
        self.login = LoginForm::default();
        self.path_input = None;
        self.status = None;
        self.batch = None;
        self.analysis = None;
        self.filter = self.analyzer.filter();
        self.source_path = self.default_path.clone();
    }

    /// Take a freshly loaded source, or report why it could not be read.
    ///
    /// A failed load keeps the previous data on screen.
    pub fn apply_source(&mut self, path: PathBuf, loaded: Result<LogSource, SourceError>) {
        let parsed = loaded.and_then(|source| {
            self.analyzer
                .parse(&source)
                .map_err(|e| match e {
                    logpulse_analyzer::AnalyzerError::Source(source) => source,
                    other => SourceError::Unavailable {
                        path: source.name().to_owned(),
                        reason: other.to_string(),
                    },
                })
        });

        match parsed {
            Ok(batch) => {
                info!(
                    path = %path.display(),
                    records = batch.records.len(),
                    invalid_lines = batch.invalid_lines(),
                    "dashboard source loaded"
                );
                self.status = Some(format!("Loaded {}", path.display()));
                self.source_path = path;
                self.batch = Some(batch);
                self.refresh();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "dashboard source failed");
                self.status = Some(e.to_string());
            }
        }
    }

    /// Re-aggregate the parsed records with the current filter.
    pub fn refresh(&mut self) {
        if let Some(ref batch) = self.batch {
            let name = self.source_path.display().to_string();
            self.analysis = Some(self.analyzer.summarize(&name, batch, &self.filter));
        }
    }
}
