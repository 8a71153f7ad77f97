use crate::session::editor::EditorState;
use crate::session::task::{CodeTask, Difficulty, FeedbackResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    LoadingTask,
    TaskReady,
    Evaluating,
    FeedbackShown,
}

/// An evaluation request handed to a gateway worker: the reference text,
/// the retyped candidate, and the sequence number the reply must echo.
#[derive(Clone, Debug)]
pub struct EvaluationRequest {
    pub seq: u64,
    pub original: String,
    pub candidate: String,
}

/// The practice loop's state machine.
///
/// The controller never performs gateway calls itself; it issues
/// sequence-numbered requests and applies completions. Each request kind
/// tracks only the latest issued sequence, so a completion from a
/// superseded request is discarded rather than clobbering newer state.
/// Abandoned requests are left to resolve; they are never cancelled.
pub struct PracticeSession {
    pub difficulty: Difficulty,
    pub task: Option<CodeTask>,
    pub feedback: Option<FeedbackResult>,
    pub editor: EditorState,
    phase: SessionPhase,
    next_seq: u64,
    pending_task: Option<u64>,
    pending_eval: Option<u64>,
}

impl PracticeSession {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            task: None,
            feedback: None,
            editor: EditorState::new(),
            phase: SessionPhase::Idle,
            next_seq: 0,
            pending_task: None,
            pending_eval: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::LoadingTask
    }

    pub fn is_evaluating(&self) -> bool {
        self.phase == SessionPhase::Evaluating
    }

    /// Entering the practice screen always issues a fresh load.
    pub fn start(&mut self) -> u64 {
        self.issue_load()
    }

    /// Changing difficulty issues a new load even while one is in flight;
    /// the sequence check decides which reply wins.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Option<u64> {
        if difficulty == self.difficulty {
            return None;
        }
        self.difficulty = difficulty;
        Some(self.issue_load())
    }

    /// The "next task" control, gated off while a load is already in flight.
    pub fn can_reload(&self) -> bool {
        self.phase != SessionPhase::LoadingTask
    }

    pub fn begin_load(&mut self) -> Option<u64> {
        if !self.can_reload() {
            return None;
        }
        Some(self.issue_load())
    }

    fn issue_load(&mut self) -> u64 {
        self.feedback = None;
        self.editor.clear();
        self.phase = SessionPhase::LoadingTask;
        // Any evaluation still in flight would describe a superseded task.
        self.pending_eval = None;
        self.next_seq += 1;
        self.pending_task = Some(self.next_seq);
        self.next_seq
    }

    /// Apply a completed generation. Stale sequences are discarded.
    pub fn apply_task(&mut self, seq: u64, task: CodeTask) {
        if self.pending_task != Some(seq) {
            return;
        }
        self.pending_task = None;
        self.task = Some(task);
        self.phase = SessionPhase::TaskReady;
    }

    pub fn can_submit(&self) -> bool {
        self.phase == SessionPhase::TaskReady
            && self.task.is_some()
            && !self.editor.is_empty()
    }

    pub fn begin_evaluation(&mut self) -> Option<EvaluationRequest> {
        if !self.can_submit() {
            return None;
        }
        let original = self.task.as_ref()?.code.clone();
        self.phase = SessionPhase::Evaluating;
        self.next_seq += 1;
        self.pending_eval = Some(self.next_seq);
        Some(EvaluationRequest {
            seq: self.next_seq,
            original,
            candidate: self.editor.text(),
        })
    }

    /// Apply a completed evaluation. Stale sequences are discarded.
    pub fn apply_feedback(&mut self, seq: u64, result: FeedbackResult) {
        if self.pending_eval != Some(seq) {
            return;
        }
        self.pending_eval = None;
        self.feedback = Some(result);
        self.phase = SessionPhase::FeedbackShown;
    }

    /// Dismissing feedback keeps the task and the retyped text.
    pub fn dismiss_feedback(&mut self) {
        if self.phase == SessionPhase::FeedbackShown {
            self.feedback = None;
            self.phase = SessionPhase::TaskReady;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(difficulty: Difficulty) -> CodeTask {
        CodeTask {
            id: "t1".to_string(),
            title: "제목".to_string(),
            description: "설명".to_string(),
            language: "python".to_string(),
            code: "print('hi')".to_string(),
            explanation: "개념".to_string(),
            difficulty,
        }
    }

    fn feedback(score: u8) -> FeedbackResult {
        FeedbackResult {
            score,
            is_correct: score >= 90,
            feedback: "피드백".to_string(),
            suggestions: Vec::new(),
        }
    }

    fn type_str(session: &mut PracticeSession, s: &str) {
        for ch in s.chars() {
            session.editor.insert_char(ch);
        }
    }

    #[test]
    fn test_start_enters_loading_and_clears_state() {
        let mut session = PracticeSession::new(Difficulty::Beginner);
        assert_eq!(session.phase(), SessionPhase::Idle);
        let seq = session.start();
        assert_eq!(session.phase(), SessionPhase::LoadingTask);
        assert!(session.feedback.is_none());
        assert!(session.editor.is_empty());
        session.apply_task(seq, task(Difficulty::Beginner));
        assert_eq!(session.phase(), SessionPhase::TaskReady);
    }

    #[test]
    fn test_submit_gated_on_editor_content() {
        let mut session = PracticeSession::new(Difficulty::Beginner);
        let seq = session.start();
        assert!(!session.can_submit()); // still loading
        session.apply_task(seq, task(Difficulty::Beginner));
        assert!(!session.can_submit()); // editor empty
        type_str(&mut session, "print('hi')");
        assert!(session.can_submit());
    }

    #[test]
    fn test_evaluation_flow() {
        let mut session = PracticeSession::new(Difficulty::Beginner);
        let seq = session.start();
        session.apply_task(seq, task(Difficulty::Beginner));
        type_str(&mut session, "print('hi')");

        let req = session.begin_evaluation().unwrap();
        assert_eq!(req.original, "print('hi')");
        assert_eq!(req.candidate, "print('hi')");
        assert_eq!(session.phase(), SessionPhase::Evaluating);
        assert!(!session.can_submit()); // no concurrent submissions

        session.apply_feedback(req.seq, feedback(95));
        assert_eq!(session.phase(), SessionPhase::FeedbackShown);
        assert_eq!(session.feedback.as_ref().unwrap().score, 95);
    }

    #[test]
    fn test_dismiss_feedback_retains_task_and_editor() {
        let mut session = PracticeSession::new(Difficulty::Beginner);
        let seq = session.start();
        session.apply_task(seq, task(Difficulty::Beginner));
        type_str(&mut session, "print");
        let req = session.begin_evaluation().unwrap();
        session.apply_feedback(req.seq, feedback(40));

        session.dismiss_feedback();
        assert_eq!(session.phase(), SessionPhase::TaskReady);
        assert!(session.feedback.is_none());
        assert!(session.task.is_some());
        assert_eq!(session.editor.text(), "print");
    }

    #[test]
    fn test_reload_blocked_while_loading() {
        let mut session = PracticeSession::new(Difficulty::Beginner);
        session.start();
        assert!(!session.can_reload());
        assert!(session.begin_load().is_none());
    }

    #[test]
    fn test_difficulty_change_supersedes_in_flight_load() {
        let mut session = PracticeSession::new(Difficulty::Beginner);
        let first = session.start();
        let second = session
            .set_difficulty(Difficulty::Advanced)
            .expect("difficulty change issues a load");
        assert_ne!(first, second);

        // The superseded reply lands first and must be discarded.
        session.apply_task(first, task(Difficulty::Beginner));
        assert_eq!(session.phase(), SessionPhase::LoadingTask);
        assert!(session.task.is_none());

        session.apply_task(second, task(Difficulty::Advanced));
        assert_eq!(session.phase(), SessionPhase::TaskReady);
        assert_eq!(session.task.as_ref().unwrap().difficulty, Difficulty::Advanced);
    }

    #[test]
    fn test_stale_reply_after_newer_one_is_discarded() {
        let mut session = PracticeSession::new(Difficulty::Beginner);
        let first = session.start();
        let second = session.set_difficulty(Difficulty::Master).unwrap();

        session.apply_task(second, task(Difficulty::Master));
        session.apply_task(first, task(Difficulty::Beginner));
        assert_eq!(session.task.as_ref().unwrap().difficulty, Difficulty::Master);
    }

    #[test]
    fn test_set_same_difficulty_is_noop() {
        let mut session = PracticeSession::new(Difficulty::Beginner);
        session.start();
        assert!(session.set_difficulty(Difficulty::Beginner).is_none());
    }

    #[test]
    fn test_reload_invalidates_pending_evaluation() {
        let mut session = PracticeSession::new(Difficulty::Beginner);
        let seq = session.start();
        session.apply_task(seq, task(Difficulty::Beginner));
        type_str(&mut session, "x = 1");
        let req = session.begin_evaluation().unwrap();

        // "Next task" is allowed while evaluating; it supersedes the eval.
        let load = session.begin_load().unwrap();
        session.apply_feedback(req.seq, feedback(80));
        assert!(session.feedback.is_none());
        assert_eq!(session.phase(), SessionPhase::LoadingTask);

        session.apply_task(load, task(Difficulty::Beginner));
        assert_eq!(session.phase(), SessionPhase::TaskReady);
    }

    #[test]
    fn test_begin_evaluation_refused_without_content() {
        let mut session = PracticeSession::new(Difficulty::Beginner);
        let seq = session.start();
        session.apply_task(seq, task(Difficulty::Beginner));
        assert!(session.begin_evaluation().is_none());
    }
}
