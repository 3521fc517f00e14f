//! Per-session advising state.
//!
//! One [`AdvisorSession`] per chat session: created at session start,
//! discarded at session end, never shared. It owns the transcript, the
//! selector state, and the handles to the (shared, read-only) catalogs
//! and the completion provider.

use crate::prompt::PromptAssembler;
use pathfinder_catalog::ReferenceCatalogs;
use pathfinder_config::AppConfig;
use pathfinder_core::error::Error;
use pathfinder_core::message::Message;
use pathfinder_core::profile::{Program, ResolvedProfile, SEMESTER_RANGE, resolve};
use pathfinder_core::provider::{CompletionRequest, Provider};
use pathfinder_core::transcript::Transcript;
use std::sync::Arc;
use tracing::debug;

/// The fixed greeting, emitted exactly once per session before anything
/// else.
pub const GREETING: &str = "\
Hallo, ich bin **Path Finder** – dein persönlicher KI-Berater rund um dein \
Studium und deinen Berufseinstieg an der TH Köln (Campus Gummersbach).\n\n\
Bitte wähle zuerst deinen Studiengang und dein Semester.\n\n\
Ich ersetze **keine** persönliche Beratung, sondern bin eine \
**ergänzende Unterstützung**.";

/// Invalid selector input. Reported to the user, never sent anywhere.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("Semester muss zwischen 1 und 10 liegen (nicht {0})")]
    InvalidSemester(u8),

    #[error("Bitte zuerst einen Studiengang wählen")]
    NoProgramSelected,

    #[error("{program} bietet keine Schwerpunktwahl an")]
    NoFocusChoice { program: Program },

    #[error("Schwerpunktwahl in {program} erst ab dem {entry}. Semester")]
    FocusNotYetAvailable { program: Program, entry: u8 },

    #[error("Unbekannter Schwerpunkt \"{choice}\" — wählbar: {options}")]
    UnknownFocus { choice: String, options: String },
}

/// Sampling parameters for the session, taken from configuration.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub history_window: Option<usize>,
}

impl SessionOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            history_window: config.history_window,
        }
    }
}

/// One chat session: selector state, transcript, and the advising pipeline.
pub struct AdvisorSession {
    provider: Arc<dyn Provider>,
    catalogs: Arc<ReferenceCatalogs>,
    assembler: PromptAssembler,
    options: SessionOptions,
    transcript: Transcript,
    program: Option<Program>,
    semester: u8,
    focus: Option<String>,
}

impl AdvisorSession {
    /// Create a session and emit the greeting.
    pub fn new(
        provider: Arc<dyn Provider>,
        catalogs: Arc<ReferenceCatalogs>,
        options: SessionOptions,
    ) -> Self {
        let assembler = PromptAssembler::new(options.history_window);
        let mut transcript = Transcript::new();
        transcript.append_greeting(GREETING);

        Self {
            provider,
            catalogs,
            assembler,
            options,
            transcript,
            program: None,
            semester: 1,
            focus: None,
        }
    }

    /// Select (or clear) the program. Changing the program invalidates the
    /// focus choice.
    pub fn select_program(&mut self, program: Option<Program>) {
        if self.program != program {
            self.focus = None;
        }
        self.program = program;
    }

    /// Set the current semester (1–10).
    pub fn select_semester(&mut self, semester: u8) -> Result<(), SelectionError> {
        if !SEMESTER_RANGE.contains(&semester) {
            return Err(SelectionError::InvalidSemester(semester));
        }
        self.semester = semester;
        Ok(())
    }

    /// Choose (or clear) the focus area. Validates eligibility and option
    /// membership against the selected program.
    pub fn select_focus(&mut self, choice: Option<&str>) -> Result<(), SelectionError> {
        let Some(choice) = choice else {
            self.focus = None;
            return Ok(());
        };

        let program = self.program.ok_or(SelectionError::NoProgramSelected)?;
        let options = program.focus_options();
        if options.is_empty() {
            return Err(SelectionError::NoFocusChoice { program });
        }

        let entry = program
            .entry_semester()
            .expect("programs with focus options have an entry semester");
        if self.semester < entry {
            return Err(SelectionError::FocusNotYetAvailable { program, entry });
        }

        match options.iter().find(|opt| opt.eq_ignore_ascii_case(choice)) {
            Some(opt) => {
                self.focus = Some((*opt).to_string());
                Ok(())
            }
            None => Err(SelectionError::UnknownFocus {
                choice: choice.to_string(),
                options: options.join(", "),
            }),
        }
    }

    /// The resolved profile for the current selector state, if complete.
    pub fn profile(&self) -> Option<ResolvedProfile> {
        self.program
            .map(|program| resolve(program, self.semester, self.focus.as_deref()))
    }

    /// Resolve the current selector state and upsert the summary message.
    ///
    /// Returns the summary message when it was (re)rendered, so the
    /// presentation loop can display it.
    pub fn sync_profile(&mut self) -> Option<&Message> {
        let profile = self.profile()?;
        if self.transcript.upsert_summary(&profile) {
            self.transcript.summary()
        } else {
            None
        }
    }

    /// One advising turn: record the user's message, assemble the layered
    /// prompt, call the provider, record and return the reply.
    ///
    /// On failure the user's message stays in the transcript and no
    /// assistant message is appended.
    pub async fn ask(&mut self, text: &str) -> Result<String, Error> {
        self.transcript.push_user(text);

        let profile = self.profile();
        let messages =
            self.assembler
                .assemble(profile.as_ref(), &self.transcript, &self.catalogs);

        debug!(
            provider = self.provider.name(),
            prompt_messages = messages.len(),
            "Requesting completion"
        );

        let request = CompletionRequest {
            model: self.options.model.clone(),
            messages,
            temperature: self.options.temperature,
            max_tokens: Some(self.options.max_tokens),
        };

        let response = self.provider.complete(request).await?;
        self.transcript.push_assistant(&response.content);
        Ok(response.content)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn catalogs(&self) -> &ReferenceCatalogs {
        &self.catalogs
    }

    pub fn program(&self) -> Option<Program> {
        self.program
    }

    pub fn semester(&self) -> u8 {
        self.semester
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfinder_core::profile::Specialization;
    use std::collections::HashMap;

    struct NoopProvider;

    #[async_trait::async_trait]
    impl Provider for NoopProvider {
        fn name(&self) -> &str {
            "noop"
        }

        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<pathfinder_core::provider::CompletionResponse, pathfinder_core::error::ProviderError>
        {
            Ok(pathfinder_core::provider::CompletionResponse {
                content: "ok".into(),
                usage: None,
                model: "noop".into(),
            })
        }
    }

    fn session() -> AdvisorSession {
        AdvisorSession::new(
            Arc::new(NoopProvider),
            Arc::new(ReferenceCatalogs::from_parts(
                HashMap::new(),
                HashMap::new(),
                HashMap::new(),
            )),
            SessionOptions {
                model: "test".into(),
                temperature: 0.3,
                max_tokens: 500,
                history_window: None,
            },
        )
    }

    #[test]
    fn new_session_greets_once_at_position_zero() {
        let s = session();
        assert_eq!(s.transcript().len(), 1);
        assert_eq!(s.transcript().messages()[0].content, GREETING);
    }

    #[test]
    fn no_profile_until_program_selected() {
        let mut s = session();
        assert!(s.profile().is_none());
        assert!(s.sync_profile().is_none());

        s.select_program(Some(Program::ElectricalEngineering));
        assert!(s.sync_profile().is_some());
    }

    #[test]
    fn semester_outside_range_rejected() {
        let mut s = session();
        assert!(matches!(
            s.select_semester(0),
            Err(SelectionError::InvalidSemester(0))
        ));
        assert!(matches!(
            s.select_semester(11),
            Err(SelectionError::InvalidSemester(11))
        ));
        assert!(s.select_semester(10).is_ok());
    }

    #[test]
    fn focus_requires_program_and_eligibility() {
        let mut s = session();
        assert!(matches!(
            s.select_focus(Some("Konstruktion")),
            Err(SelectionError::NoProgramSelected)
        ));

        s.select_program(Some(Program::ElectricalEngineering));
        assert!(matches!(
            s.select_focus(Some("Automatisierung")),
            Err(SelectionError::NoFocusChoice { .. })
        ));

        s.select_program(Some(Program::MechanicalEngineering));
        s.select_semester(4).unwrap();
        assert!(matches!(
            s.select_focus(Some("Konstruktion")),
            Err(SelectionError::FocusNotYetAvailable { entry: 5, .. })
        ));

        s.select_semester(5).unwrap();
        assert!(matches!(
            s.select_focus(Some("Raumfahrt")),
            Err(SelectionError::UnknownFocus { .. })
        ));
        assert!(s.select_focus(Some("Konstruktion")).is_ok());
    }

    #[test]
    fn changing_program_clears_focus() {
        let mut s = session();
        s.select_program(Some(Program::MechanicalEngineering));
        s.select_semester(5).unwrap();
        s.select_focus(Some("Fertigung")).unwrap();
        assert_eq!(s.focus(), Some("Fertigung"));

        s.select_program(Some(Program::IndustrialEngineering));
        assert_eq!(s.focus(), None);
    }

    #[test]
    fn sync_profile_is_a_noop_for_unchanged_state() {
        let mut s = session();
        s.select_program(Some(Program::IndustrialEngineering));
        s.select_semester(2).unwrap();

        let first = s.sync_profile().map(|m| m.content.clone());
        assert!(first.unwrap().contains("Schwerpunktwahl ab dem 3. Semester"));
        assert!(s.sync_profile().is_none());

        let len = s.transcript().len();
        s.select_semester(3).unwrap();
        s.select_focus(Some("Elektrotechnik")).unwrap();
        let updated = s.sync_profile().map(|m| m.content.clone()).unwrap();
        assert!(updated.contains("Elektrotechnik"));
        assert_eq!(s.transcript().len(), len);
    }

    #[test]
    fn profile_resolves_through_decision_table() {
        let mut s = session();
        s.select_program(Some(Program::MechanicalEngineering));
        s.select_semester(6).unwrap();
        s.select_focus(Some("Umwelttechnik")).unwrap();

        let profile = s.profile().unwrap();
        assert_eq!(
            profile.specialization,
            Specialization::Chosen("Umwelttechnik".into())
        );
    }
}
