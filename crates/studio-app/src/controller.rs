//! Application state machine, independent of the UI toolkit.
//!
//! The controller is synchronous: the egui layer asks it for a "ticket"
//! (a sequence number plus the request to run), spawns the network future
//! on the runtime, and feeds the outcome back through `resolve_*`. Each
//! draft request bumps a sequence counter, and a result is only applied
//! while its sequence is still the live one, so a reply that lands after
//! the operator moved on is dropped instead of overwriting newer state.

use std::time::{Duration, Instant};

use studio_core::{
    GeneratedDraft, GenerationMode, GenerationRequest, RefinementRequest, SourceEmail,
};

/// How long the "Copied!" confirmation stays up.
pub const COPIED_FLASH: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq)]
pub enum DraftPhase {
    Idle,
    Generating { seq: u64, refining: bool },
    Ready(GeneratedDraft),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    None,
    Record(String),
    Manual,
}

/// What to send to the store alongside a status flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateIntent {
    Approve,
    Discard,
}

pub struct Controller {
    pending: Vec<SourceEmail>,
    selection: Selection,
    source_text: String,
    manual_text: String,
    pub mode: GenerationMode,
    pub instructions: String,
    phase: DraftPhase,
    banner: Option<String>,
    copied_at: Option<Instant>,
    seq: u64,
}

impl Controller {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            selection: Selection::None,
            source_text: String::new(),
            manual_text: String::new(),
            mode: GenerationMode::Standard,
            instructions: String::new(),
            phase: DraftPhase::Idle,
            banner: None,
            copied_at: None,
            seq: 0,
        }
    }

    pub fn pending(&self) -> &[SourceEmail] {
        &self.pending
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn phase(&self) -> &DraftPhase {
        &self.phase
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn clear_banner(&mut self) {
        self.banner = None;
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.phase, DraftPhase::Generating { .. })
    }

    /// Whether the in-flight request is a refinement of an existing draft
    /// rather than a fresh generation. Drives the busy label.
    pub fn is_refining(&self) -> bool {
        matches!(self.phase, DraftPhase::Generating { refining: true, .. })
    }

    pub fn draft(&self) -> Option<&GeneratedDraft> {
        match &self.phase {
            DraftPhase::Ready(draft) => Some(draft),
            _ => None,
        }
    }

    /// Mutable access for the editable subject and body fields in the
    /// preview panel.
    pub fn draft_mut(&mut self) -> Option<&mut GeneratedDraft> {
        match &mut self.phase {
            DraftPhase::Ready(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn active_record(&self) -> Option<&SourceEmail> {
        match &self.selection {
            Selection::Record(id) => self
                .pending
                .iter()
                .find(|email| email.id.as_deref() == Some(id.as_str())),
            _ => None,
        }
    }

    // --- inbox -----------------------------------------------------------

    pub fn pending_loaded(&mut self, outcome: Result<Vec<SourceEmail>, String>) {
        match outcome {
            Ok(emails) => {
                // Drop a selection that no longer exists in the refreshed list.
                if let Selection::Record(id) = &self.selection {
                    let still_there = emails
                        .iter()
                        .any(|email| email.id.as_deref() == Some(id.as_str()));
                    if !still_there {
                        self.clear_selection();
                    }
                }
                self.pending = emails;
            }
            Err(message) => self.banner = Some(message),
        }
    }

    pub fn select_record(&mut self, id: &str) {
        let Some(email) = self
            .pending
            .iter()
            .find(|email| email.id.as_deref() == Some(id))
        else {
            return;
        };
        self.source_text = email.body.clone();
        self.selection = Selection::Record(id.to_string());
        self.reset_draft_state();
    }

    pub fn select_manual(&mut self) {
        if self.selection == Selection::Manual {
            return;
        }
        self.selection = Selection::Manual;
        self.source_text = self.manual_text.clone();
        self.reset_draft_state();
    }

    /// The paste-an-email text box edits this buffer directly.
    pub fn manual_text_mut(&mut self) -> &mut String {
        &mut self.manual_text
    }

    pub fn sync_manual_text(&mut self) {
        if self.selection == Selection::Manual {
            self.source_text = self.manual_text.clone();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
        self.source_text.clear();
        self.reset_draft_state();
    }

    fn reset_draft_state(&mut self) {
        // Bumping the sequence here orphans any in-flight request.
        self.seq += 1;
        self.phase = DraftPhase::Idle;
        self.copied_at = None;
    }

    // --- draft generation ------------------------------------------------

    pub fn can_generate(&self) -> bool {
        !self.source_text.trim().is_empty() && !self.is_generating()
    }

    /// Start a fresh generation. Clears the previous draft, error and copy
    /// confirmation before the request goes out.
    pub fn begin_generation(&mut self) -> Option<(u64, GenerationRequest)> {
        if !self.can_generate() {
            return None;
        }
        self.seq += 1;
        self.phase = DraftPhase::Generating {
            seq: self.seq,
            refining: false,
        };
        self.copied_at = None;
        Some((
            self.seq,
            GenerationRequest {
                source_text: self.source_text.clone(),
                mode: self.mode,
                instructions: self.instructions.clone(),
            },
        ))
    }

    /// Start a refinement of the current draft. Only valid with a draft on
    /// screen and a non-blank instruction.
    pub fn begin_refinement(&mut self, instruction: &str) -> Option<(u64, RefinementRequest)> {
        if instruction.trim().is_empty() {
            return None;
        }
        let draft = match &self.phase {
            DraftPhase::Ready(draft) => draft.clone(),
            _ => return None,
        };
        self.seq += 1;
        self.phase = DraftPhase::Generating {
            seq: self.seq,
            refining: true,
        };
        self.copied_at = None;
        Some((
            self.seq,
            RefinementRequest {
                source_text: self.source_text.clone(),
                current_subject: draft.subject,
                current_body: draft.body,
                instruction: instruction.to_string(),
            },
        ))
    }

    /// Apply a finished generation or refinement. Results whose sequence is
    /// no longer live are stale and ignored.
    pub fn resolve_draft(&mut self, seq: u64, outcome: Result<GeneratedDraft, String>) {
        match self.phase {
            DraftPhase::Generating { seq: live, .. } if live == seq => {}
            _ => {
                tracing::debug!(seq, "dropping stale draft result");
                return;
            }
        }
        self.phase = match outcome {
            Ok(draft) => DraftPhase::Ready(draft),
            Err(message) => DraftPhase::Failed(message),
        };
    }

    // --- record updates --------------------------------------------------

    /// Approve the on-screen draft. Returns the record id and the draft
    /// body to archive; `None` for manual input or without a ready draft.
    pub fn approve_ticket(&self) -> Option<(String, String)> {
        let Selection::Record(id) = &self.selection else {
            return None;
        };
        self.draft().map(|draft| (id.clone(), draft.body.clone()))
    }

    pub fn resolve_approve(&mut self, id: &str, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => {
                self.pending
                    .retain(|email| email.id.as_deref() != Some(id));
                self.clear_selection();
            }
            Err(message) => self.banner = Some(message),
        }
    }

    pub fn resolve_discard(&mut self, id: &str, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => {
                self.pending
                    .retain(|email| email.id.as_deref() != Some(id));
                if self.selection == Selection::Record(id.to_string()) {
                    self.clear_selection();
                }
            }
            Err(message) => self.banner = Some(message),
        }
    }

    // --- copy confirmation -----------------------------------------------

    pub fn mark_copied(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    pub fn copied(&self) -> bool {
        self.copied_at.is_some()
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(at) = self.copied_at {
            if now.duration_since(at) >= COPIED_FLASH {
                self.copied_at = None;
            }
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::RecordStatus;

    fn email(id: &str, body: &str) -> SourceEmail {
        SourceEmail {
            id: Some(id.to_string()),
            body: body.to_string(),
            status: RecordStatus::New,
            ..SourceEmail::manual(String::new())
        }
    }

    fn draft(subject: &str) -> GeneratedDraft {
        GeneratedDraft {
            subject: subject.to_string(),
            body: format!("<html>{subject}</html>"),
        }
    }

    fn loaded_controller() -> Controller {
        let mut controller = Controller::new();
        controller.pending_loaded(Ok(vec![
            email("rec1", "Where is my order #123?"),
            email("rec2", "I want a refund."),
        ]));
        controller
    }

    #[test]
    fn generation_happy_path() {
        let mut controller = loaded_controller();
        controller.select_record("rec1");
        controller.instructions = "be brief".to_string();

        let (seq, request) = controller.begin_generation().expect("ticket");
        assert_eq!(request.source_text, "Where is my order #123?");
        assert_eq!(request.mode, GenerationMode::Standard);
        assert_eq!(request.instructions, "be brief");
        assert!(controller.is_generating());

        controller.resolve_draft(seq, Ok(draft("Re: Order #123")));
        assert!(!controller.is_generating());
        assert_eq!(controller.draft().expect("draft").subject, "Re: Order #123");
    }

    #[test]
    fn generation_failure_lands_in_failed_phase() {
        let mut controller = loaded_controller();
        controller.select_record("rec1");
        let (seq, _) = controller.begin_generation().expect("ticket");
        controller.resolve_draft(seq, Err("model returned no content".to_string()));
        assert_eq!(
            controller.phase(),
            &DraftPhase::Failed("model returned no content".to_string())
        );
        // Generation failures never hit the inbox banner.
        assert!(controller.banner().is_none());
    }

    #[test]
    fn starting_a_generation_clears_previous_draft_and_error() {
        let mut controller = loaded_controller();
        controller.select_record("rec1");
        let (seq, _) = controller.begin_generation().expect("ticket");
        controller.resolve_draft(seq, Err("boom".to_string()));

        let (seq, _) = controller.begin_generation().expect("ticket");
        assert_eq!(
            controller.phase(),
            &DraftPhase::Generating {
                seq,
                refining: false
            }
        );

        controller.resolve_draft(seq, Ok(draft("Re: hi")));
        controller.mark_copied(Instant::now());
        let (seq, _) = controller.begin_generation().expect("ticket");
        assert!(controller.draft().is_none());
        assert!(!controller.copied());
        controller.resolve_draft(seq, Ok(draft("Re: again")));
        assert_eq!(controller.draft().expect("draft").subject, "Re: again");
    }

    #[test]
    fn blank_source_cannot_generate() {
        let mut controller = Controller::new();
        controller.select_manual();
        *controller.manual_text_mut() = "   \n".to_string();
        controller.sync_manual_text();
        assert!(controller.begin_generation().is_none());
    }

    #[test]
    fn result_for_a_superseded_request_is_dropped() {
        let mut controller = loaded_controller();
        controller.select_record("rec1");
        let (first, _) = controller.begin_generation().expect("ticket");

        // Operator switches records while the first request is in flight.
        controller.select_record("rec2");
        let (second, _) = controller.begin_generation().expect("ticket");

        controller.resolve_draft(first, Ok(draft("Re: stale")));
        assert!(controller.is_generating());

        controller.resolve_draft(second, Ok(draft("Re: refund")));
        assert_eq!(controller.draft().expect("draft").subject, "Re: refund");
    }

    #[test]
    fn navigating_away_orphans_the_in_flight_request() {
        let mut controller = loaded_controller();
        controller.select_record("rec1");
        let (seq, _) = controller.begin_generation().expect("ticket");

        controller.clear_selection();
        controller.resolve_draft(seq, Ok(draft("Re: late")));
        assert_eq!(controller.phase(), &DraftPhase::Idle);
    }

    #[test]
    fn refinement_requires_a_ready_draft_and_an_instruction() {
        let mut controller = loaded_controller();
        controller.select_record("rec1");
        assert!(controller.begin_refinement("shorter").is_none());

        let (seq, _) = controller.begin_generation().expect("ticket");
        controller.resolve_draft(seq, Ok(draft("Re: Order #123")));
        assert!(controller.begin_refinement("  ").is_none());

        let (seq, request) = controller.begin_refinement("mention the refund").expect("ticket");
        assert_eq!(request.current_subject, "Re: Order #123");
        assert_eq!(request.current_body, "<html>Re: Order #123</html>");
        assert_eq!(request.instruction, "mention the refund");
        assert!(controller.is_generating());

        controller.resolve_draft(seq, Ok(draft("Re: Order #123 (updated)")));
        assert_eq!(
            controller.draft().expect("draft").subject,
            "Re: Order #123 (updated)"
        );
    }

    #[test]
    fn refinement_in_flight_is_distinguishable_from_generation() {
        let mut controller = loaded_controller();
        controller.select_record("rec1");

        let (seq, _) = controller.begin_generation().expect("ticket");
        assert!(controller.is_generating());
        assert!(!controller.is_refining());
        controller.resolve_draft(seq, Ok(draft("Re: Order #123")));

        let (seq, _) = controller.begin_refinement("shorter").expect("ticket");
        assert!(controller.is_refining());
        controller.resolve_draft(seq, Ok(draft("Re: shorter")));
        assert!(!controller.is_refining());
    }

    #[test]
    fn approve_removes_the_record_and_clears_the_selection() {
        let mut controller = loaded_controller();
        controller.select_record("rec1");
        let (seq, _) = controller.begin_generation().expect("ticket");
        controller.resolve_draft(seq, Ok(draft("Re: Order #123")));

        let (id, body) = controller.approve_ticket().expect("ticket");
        assert_eq!(id, "rec1");
        assert_eq!(body, "<html>Re: Order #123</html>");

        controller.resolve_approve(&id, Ok(()));
        assert_eq!(controller.pending().len(), 1);
        assert_eq!(controller.selection(), &Selection::None);
        assert_eq!(controller.phase(), &DraftPhase::Idle);
    }

    #[test]
    fn failed_approve_keeps_the_record_and_raises_the_banner() {
        let mut controller = loaded_controller();
        controller.select_record("rec1");
        let (seq, _) = controller.begin_generation().expect("ticket");
        controller.resolve_draft(seq, Ok(draft("Re: Order #123")));

        controller.resolve_approve("rec1", Err("record update failed".to_string()));
        assert_eq!(controller.pending().len(), 2);
        assert_eq!(controller.selection(), &Selection::Record("rec1".to_string()));
        assert!(controller.draft().is_some());
        assert_eq!(controller.banner(), Some("record update failed"));
    }

    #[test]
    fn manual_input_has_no_approve_ticket() {
        let mut controller = Controller::new();
        controller.select_manual();
        *controller.manual_text_mut() = "pasted email".to_string();
        controller.sync_manual_text();
        let (seq, _) = controller.begin_generation().expect("ticket");
        controller.resolve_draft(seq, Ok(draft("Re: pasted")));
        assert!(controller.approve_ticket().is_none());
    }

    #[test]
    fn discard_of_an_unselected_record_leaves_the_workspace_alone() {
        let mut controller = loaded_controller();
        controller.select_record("rec1");
        let (seq, _) = controller.begin_generation().expect("ticket");
        controller.resolve_draft(seq, Ok(draft("Re: Order #123")));

        controller.resolve_discard("rec2", Ok(()));
        assert_eq!(controller.pending().len(), 1);
        assert_eq!(controller.selection(), &Selection::Record("rec1".to_string()));
        assert!(controller.draft().is_some());
    }

    #[test]
    fn discard_of_the_selected_record_clears_the_workspace() {
        let mut controller = loaded_controller();
        controller.select_record("rec1");
        controller.resolve_discard("rec1", Ok(()));
        assert_eq!(controller.pending().len(), 1);
        assert_eq!(controller.selection(), &Selection::None);
    }

    #[test]
    fn failed_discard_raises_the_banner() {
        let mut controller = loaded_controller();
        controller.resolve_discard("rec2", Err("503".to_string()));
        assert_eq!(controller.pending().len(), 2);
        assert_eq!(controller.banner(), Some("503"));
    }

    #[test]
    fn fetch_failure_raises_the_banner_and_keeps_the_list() {
        let mut controller = loaded_controller();
        controller.pending_loaded(Err("store unreachable".to_string()));
        assert_eq!(controller.pending().len(), 2);
        assert_eq!(controller.banner(), Some("store unreachable"));
    }

    #[test]
    fn refresh_drops_a_vanished_selection() {
        let mut controller = loaded_controller();
        controller.select_record("rec1");
        controller.pending_loaded(Ok(vec![email("rec2", "I want a refund.")]));
        assert_eq!(controller.selection(), &Selection::None);
    }

    #[test]
    fn copied_confirmation_expires() {
        let mut controller = Controller::new();
        let start = Instant::now();
        controller.mark_copied(start);
        assert!(controller.copied());
        controller.tick(start + Duration::from_millis(1500));
        assert!(controller.copied());
        controller.tick(start + Duration::from_millis(2100));
        assert!(!controller.copied());
    }
}
