//! The conversation transcript.
//!
//! An append-mostly log of role-tagged messages with one twist: a single
//! "profile summary" slot that is rewritten in place whenever the resolved
//! profile changes, tracked by a stored index rather than by scanning for
//! content. All per-session bookkeeping (greeting shown, last rendered
//! profile, summary index) lives here — no globals, no flags elsewhere.

use crate::message::{Message, Role};
use crate::profile::ResolvedProfile;
use serde::{Deserialize, Serialize};

/// Ordered conversation history plus the summary-slot bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
    greeted: bool,
    summary_index: Option<usize>,
    last_profile: Option<ResolvedProfile>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the fixed greeting as the first transcript entry.
    ///
    /// Idempotent per session: returns `true` only on the call that
    /// actually appended.
    pub fn append_greeting(&mut self, content: impl Into<String>) -> bool {
        if self.greeted {
            return false;
        }
        self.messages.push(Message::assistant(content));
        self.greeted = true;
        true
    }

    /// Insert or rewrite the profile summary message.
    ///
    /// The summary is regenerated if and only if the resolved profile
    /// differs from the last one rendered. The first change appends a new
    /// assistant message and records its index; later changes overwrite
    /// the message at that index in place. Returns `true` when the
    /// transcript changed.
    pub fn upsert_summary(&mut self, profile: &ResolvedProfile) -> bool {
        if self.last_profile.as_ref() == Some(profile) {
            return false;
        }

        let text = render_summary(profile);
        match self.summary_index {
            Some(index) => {
                self.messages[index].content = text;
            }
            None => {
                self.messages.push(Message::assistant(text));
                self.summary_index = Some(self.messages.len() - 1);
            }
        }
        self.last_profile = Some(profile.clone());
        true
    }

    /// Append a user message.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant message.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// The full ordered message sequence, for rendering and for prompt
    /// assembly.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The current summary message, if one has been rendered.
    pub fn summary(&self) -> Option<&Message> {
        self.summary_index.map(|i| &self.messages[i])
    }

    /// The profile behind the current summary message.
    pub fn last_profile(&self) -> Option<&ResolvedProfile> {
        self.last_profile.as_ref()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Render the profile summary text shown in the chat.
fn render_summary(profile: &ResolvedProfile) -> String {
    format!(
        "Alles klar 👍\n\
         Du studierst **{}**\n\
         und befindest dich im **{}. Semester**.\n\n\
         Studienphase: **{}**\n\
         Schwerpunkt: **{}**\n\n\
         Wobei kann ich dich unterstützen?",
        profile.program, profile.semester, profile.phase, profile.specialization
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Program, resolve};

    #[test]
    fn greeting_is_appended_exactly_once() {
        let mut transcript = Transcript::new();
        assert!(transcript.append_greeting("Hallo!"));
        assert!(!transcript.append_greeting("Hallo!"));
        assert!(!transcript.append_greeting("Hallo nochmal!"));
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].role, Role::Assistant);
        assert_eq!(transcript.messages()[0].content, "Hallo!");
    }

    #[test]
    fn upsert_is_idempotent_for_unchanged_profile() {
        let mut transcript = Transcript::new();
        let profile = resolve(Program::ElectricalEngineering, 2, None);

        assert!(transcript.upsert_summary(&profile));
        let rendered = transcript.summary().unwrap().content.clone();
        let len = transcript.len();

        assert!(!transcript.upsert_summary(&profile));
        assert_eq!(transcript.len(), len);
        assert_eq!(transcript.summary().unwrap().content, rendered);
    }

    #[test]
    fn changed_profile_rewrites_summary_in_place() {
        let mut transcript = Transcript::new();
        transcript.append_greeting("Hallo!");

        let before = resolve(Program::MechanicalEngineering, 4, None);
        assert!(transcript.upsert_summary(&before));
        let len = transcript.len();
        assert!(
            transcript
                .summary()
                .unwrap()
                .content
                .contains("Schwerpunktwahl ab dem 5. Semester")
        );

        // Semester 4 → 5 with a chosen focus: exactly one replacement,
        // length unchanged, content changed.
        let after = resolve(Program::MechanicalEngineering, 5, Some("Konstruktion"));
        assert!(transcript.upsert_summary(&after));
        assert_eq!(transcript.len(), len);
        assert!(transcript.summary().unwrap().content.contains("Konstruktion"));
        assert!(transcript.summary().unwrap().content.contains("5. Semester"));
    }

    #[test]
    fn summary_slot_survives_interleaved_messages() {
        let mut transcript = Transcript::new();
        transcript.append_greeting("Hallo!");
        let profile = resolve(Program::IndustrialEngineering, 2, None);
        transcript.upsert_summary(&profile);
        transcript.push_user("Was ist ein Schwerpunkt?");
        transcript.push_assistant("Ein Schwerpunkt ist ...");

        let updated = resolve(Program::IndustrialEngineering, 3, Some("Umwelttechnik"));
        assert!(transcript.upsert_summary(&updated));

        // Still at index 1, user/assistant messages untouched.
        assert_eq!(transcript.len(), 4);
        assert!(transcript.messages()[1].content.contains("Umwelttechnik"));
        assert_eq!(transcript.messages()[2].role, Role::User);
        assert_eq!(transcript.messages()[3].role, Role::Assistant);
    }

    #[test]
    fn summary_mentions_phase_label() {
        let mut transcript = Transcript::new();
        let profile = resolve(Program::EngineeringFoundation, 1, None);
        transcript.upsert_summary(&profile);
        let content = &transcript.summary().unwrap().content;
        assert!(content.contains("Grundstudium"));
        assert!(content.contains("Noch kein Schwerpunkt"));
    }
}
