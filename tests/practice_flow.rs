//! End-to-end scenarios for the practice loop, driven through the
//! controller with the gateway's fallback sentinels standing in for
//! failed calls. No network involved.

use std::sync::mpsc;

use deepclone::app::{App, AppScreen};
use deepclone::config::Config;
use deepclone::gateway::GeminiClient;
use deepclone::gateway::client::{fallback_feedback, fallback_task};
use deepclone::session::controller::{PracticeSession, SessionPhase};
use deepclone::session::task::Difficulty;

fn type_str(session: &mut PracticeSession, s: &str) {
    for ch in s.chars() {
        if ch == '\n' {
            session.editor.insert_newline();
        } else {
            session.editor.insert_char(ch);
        }
    }
}

/// Beginner is selected, generation fails, the learner types anyway, and
/// evaluation fails too. Every step must degrade gracefully instead of
/// erroring or sticking in a loading state.
#[test]
fn faulted_generation_and_evaluation_degrade_to_sentinels() {
    let mut session = PracticeSession::new(Difficulty::Beginner);

    let seq = session.start();
    assert_eq!(session.phase(), SessionPhase::LoadingTask);

    // The gateway caught its fault and substituted the sentinel task.
    session.apply_task(seq, fallback_task(Difficulty::Beginner));
    assert_eq!(session.phase(), SessionPhase::TaskReady);

    let task = session.task.as_ref().unwrap();
    assert_eq!(task.difficulty, Difficulty::Beginner);
    assert_eq!(task.title, "과제 생성 오류");

    // Editor is empty, so submit stays disabled.
    assert!(session.editor.is_empty());
    assert!(!session.can_submit());

    // Typing enables submit.
    type_str(&mut session, "# 과제를 불러올 수 없습니다");
    assert!(session.can_submit());

    // Evaluation faults as well; the zero-score sentinel comes back.
    let req = session.begin_evaluation().unwrap();
    assert_eq!(session.phase(), SessionPhase::Evaluating);
    session.apply_feedback(req.seq, fallback_feedback());

    assert_eq!(session.phase(), SessionPhase::FeedbackShown);
    let feedback = session.feedback.as_ref().unwrap();
    assert_eq!(feedback.score, 0);
    assert!(!feedback.is_correct);
    assert!(feedback.suggestions.is_empty());
    assert!(!feedback.feedback.is_empty());
}

/// Changing difficulty while a generation is still in flight leaves two
/// requests outstanding; the latest-issued one determines the displayed
/// task no matter which settles last.
#[test]
fn latest_issued_request_wins_regardless_of_settle_order() {
    // Older reply settles last.
    let mut session = PracticeSession::new(Difficulty::Beginner);
    let first = session.start();
    let second = session.set_difficulty(Difficulty::Intermediate).unwrap();

    session.apply_task(second, fallback_task(Difficulty::Intermediate));
    session.apply_task(first, fallback_task(Difficulty::Beginner));
    assert_eq!(
        session.task.as_ref().unwrap().difficulty,
        Difficulty::Intermediate
    );

    // Older reply settles first.
    let mut session = PracticeSession::new(Difficulty::Beginner);
    let first = session.start();
    let second = session.set_difficulty(Difficulty::Intermediate).unwrap();

    session.apply_task(first, fallback_task(Difficulty::Beginner));
    assert_eq!(session.phase(), SessionPhase::LoadingTask);
    session.apply_task(second, fallback_task(Difficulty::Intermediate));
    assert_eq!(
        session.task.as_ref().unwrap().difficulty,
        Difficulty::Intermediate
    );
    assert_eq!(session.phase(), SessionPhase::TaskReady);
}

/// Feedback for a submission that was superseded by a reload is dropped.
#[test]
fn superseded_evaluation_never_surfaces() {
    let mut session = PracticeSession::new(Difficulty::Advanced);
    let seq = session.start();
    session.apply_task(seq, fallback_task(Difficulty::Advanced));
    type_str(&mut session, "x = 1\ny = 2");

    let eval = session.begin_evaluation().unwrap();
    let reload = session.begin_load().unwrap();

    session.apply_feedback(eval.seq, fallback_feedback());
    assert!(session.feedback.is_none());
    assert_eq!(session.phase(), SessionPhase::LoadingTask);

    session.apply_task(reload, fallback_task(Difficulty::Advanced));
    assert_eq!(session.phase(), SessionPhase::TaskReady);
}

/// A paste event never changes editor content.
#[test]
fn paste_never_mutates_the_editor() {
    let (tx, _rx) = mpsc::channel();
    let gateway = GeminiClient::new("gemini-2.5-flash", "http://127.0.0.1:9").unwrap();
    let mut app = App::new(Config::default(), gateway, tx);
    app.screen = AppScreen::Practice;

    for ch in "import torch".chars() {
        app.session.editor.insert_char(ch);
    }
    let before = app.session.editor.text();

    app.handle_paste("import torch\nimport torch.nn as nn\n".to_string());

    assert_eq!(app.session.editor.text(), before);
    assert!(app.paste_notice_active());
}
