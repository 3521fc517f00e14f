//! Prompt assembly — builds the ordered message list for each call.
//!
//! Four layers, assembled fresh before every completion request:
//!
//! 1. **Persona** — fixed system instructions, never trimmed
//! 2. **Profile context** — literal program, semester, phase, focus
//! 3. **Regulation excerpt** — only when the program has a catalog entry,
//!    serialized verbatim
//! 4. **Transcript** — the conversation history, roles preserved
//!
//! Assembly is deterministic: identical inputs always produce identical
//! output. There is no token budgeting or deduplication; the full history
//! is resent on every call unless a history window is configured.

use pathfinder_catalog::ReferenceCatalogs;
use pathfinder_core::message::Message;
use pathfinder_core::profile::ResolvedProfile;
use pathfinder_core::transcript::Transcript;

/// Fixed persona and answer-shape instructions.
pub const SYSTEM_PROMPT: &str = "\
Du bist ein sachlicher Studien- und Karriereberater
für Studierende der TH Köln (Campus Gummersbach).

Struktur deiner Antworten:
1. Kurze Einordnung der Situation
2. Relevante Zusammenhänge oder Optionen (max. 3–4)
3. Hinweise, worauf man achten kann (neutral, nicht drängend)

Regeln:
- Die Studienphase ist wichtiger als das formale Semester.
- Im Grundstudium keine Spezialisierungs- oder Karrierefestlegung.
- Ruhig, sachlich, beratend formulieren.";

/// Assembles the request-message list sent to the completion service.
pub struct PromptAssembler {
    /// Cap the transcript layer to the last N messages. `None` sends the
    /// full history, matching the original advisor.
    history_window: Option<usize>,
}

impl PromptAssembler {
    pub fn new(history_window: Option<usize>) -> Self {
        Self { history_window }
    }

    /// Build the ordered message list for one completion call.
    pub fn assemble(
        &self,
        profile: Option<&ResolvedProfile>,
        transcript: &Transcript,
        catalogs: &ReferenceCatalogs,
    ) -> Vec<Message> {
        let mut messages = vec![
            Message::system(SYSTEM_PROMPT),
            Message::system(render_profile_context(profile)),
        ];

        if let Some(profile) = profile
            && let Some(regulation) = catalogs.regulation_for(profile.program)
        {
            messages.push(Message::system(format!(
                "Relevante Prüfungsordnung für {}:\n{}",
                profile.program,
                serde_json::to_string(regulation).unwrap_or_default()
            )));
        }

        let history = transcript.messages();
        let window_start = self
            .history_window
            .map_or(0, |n| history.len().saturating_sub(n));
        messages.extend(history[window_start..].iter().cloned());

        messages
    }
}

fn render_profile_context(profile: Option<&ResolvedProfile>) -> String {
    match profile {
        Some(p) => format!(
            "Studiengang: {}\nSemester: {}\nStudienphase: {}\nSchwerpunkt: {}",
            p.program, p.semester, p.phase, p.specialization
        ),
        None => "Der Studierende hat noch keinen Studiengang und kein Semester gewählt.".into(),
    }
}
