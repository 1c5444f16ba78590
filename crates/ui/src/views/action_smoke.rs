use diagnostic_core::model::{ProgressMap, SectionId, SectionState};

use super::onboarding::WizardAction;
use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn report_actions_open_unlock_and_reset_rerender() {
    let mut harness = setup_view_harness(ViewKind::ReportActions).await;
    harness.rebuild();
    harness.settle().await;
    assert!(harness.render().contains("0 / 9 sections lues"));

    let actions = harness.handles.report();

    harness.in_runtime(|| actions.open.call(SectionId::new(1)));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("1 / 9 sections lues"), "missing counter in {html}");
    assert_eq!(html.matches("section-card read").count(), 1, "{html}");
    assert_eq!(html.matches("section-card unread").count(), 1, "{html}");
    assert!(html.contains(">Lu<"), "missing read badge in {html}");
    assert!(html.contains(">Nouveau<"), "missing unread badge in {html}");
    let progress = harness.services.reading_progress().progress().await;
    assert_eq!(progress.get(SectionId::new(2)), Some(SectionState::Unread));

    harness.in_runtime(|| actions.unlock_all.call(()));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Toutes les sections ont été lues."), "missing banner in {html}");
    assert!(html.contains("9 / 9 sections lues"), "missing counter in {html}");
    assert!(!html.contains(">Nouveau<"), "unexpected unread badge in {html}");

    harness.in_runtime(|| actions.reset.call(()));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("0 / 9 sections lues"), "missing counter in {html}");
    assert!(!html.contains("Toutes les sections"), "unexpected banner in {html}");
    assert_eq!(
        harness.services.reading_progress().progress().await,
        ProgressMap::default()
    );
}

#[tokio::test(flavor = "current_thread")]
async fn report_actions_ignore_locked_sections() {
    let mut harness = setup_view_harness(ViewKind::ReportActions).await;
    harness.rebuild();
    harness.settle().await;

    let actions = harness.handles.report();
    harness.in_runtime(|| actions.open.call(SectionId::new(4)));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("0 / 9 sections lues"), "unexpected counter in {html}");
    assert_eq!(
        harness.services.reading_progress().progress().await,
        ProgressMap::default()
    );
}

#[tokio::test(flavor = "current_thread")]
async fn wizard_actions_step_answer_and_restart() {
    let mut harness = setup_view_harness(ViewKind::OnboardingActions).await;
    harness.rebuild();
    harness.settle().await;
    assert!(harness.render().contains("Étape 1 sur 4"));

    let act = harness.handles.wizard();

    harness.in_runtime(|| act.call(WizardAction::Next));
    harness.settle().await;
    assert!(harness.render().contains("Étape 2 sur 4"));

    harness.in_runtime(|| {
        act.call(WizardAction::Answer {
            question_id: "etape-2".to_string(),
            answer: " Industrie ".to_string(),
        });
    });
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Réponses enregistrées : 1"), "missing count in {html}");
    assert!(html.contains("Industrie"), "missing answer in {html}");
    let state = harness.services.onboarding().state().await;
    assert_eq!(state.answer("etape-2"), Some("Industrie"));

    harness.in_runtime(|| act.call(WizardAction::Back));
    harness.settle().await;
    assert!(harness.render().contains("Étape 1 sur 4"));

    for _ in 0..4 {
        harness.in_runtime(|| act.call(WizardAction::Next));
        harness.settle().await;
    }
    let html = harness.render();
    assert!(html.contains("Démarrage terminé."), "missing completion in {html}");
    assert!(harness.services.onboarding().state().await.is_completed());

    harness.in_runtime(|| act.call(WizardAction::Restart));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Étape 1 sur 4"), "missing first step in {html}");
    assert!(html.contains("Réponses enregistrées : 0"), "answers not cleared in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn wizard_rejected_answer_shows_notice() {
    let mut harness = setup_view_harness(ViewKind::OnboardingActions).await;
    harness.rebuild();
    harness.settle().await;

    let act = harness.handles.wizard();
    harness.in_runtime(|| {
        act.call(WizardAction::Answer {
            question_id: "  ".to_string(),
            answer: "Transport".to_string(),
        });
    });
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("question id cannot be empty"), "missing notice in {html}");
    assert!(html.contains("Réponses enregistrées : 0"), "unexpected answer in {html}");

    harness.in_runtime(|| act.call(WizardAction::Next));
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains("question id cannot be empty"), "stale notice in {html}");
}
