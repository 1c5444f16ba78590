use diagnostic_core::model::SectionId;

use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn report_view_smoke_renders_default_progress() {
    let mut harness = setup_view_harness(ViewKind::Report).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Rapport de maturité climat"), "missing title in {html}");
    assert!(html.contains("Section 1"), "missing first section in {html}");
    assert!(html.contains("Section 9"), "missing last section in {html}");
    assert!(html.contains("Nouveau"), "missing unread badge in {html}");
    assert!(html.contains("0 / 9 sections lues"), "missing counter in {html}");
    assert!(!html.contains("Toutes les sections"), "unexpected banner in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn report_view_smoke_renders_read_sections() {
    let mut harness = setup_view_harness(ViewKind::Report).await;
    let store = harness.services.reading_progress();
    store.mark_as_read(SectionId::new(1)).await;
    store.mark_as_read(SectionId::new(2)).await;

    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Lu"), "missing read badge in {html}");
    assert!(html.contains("2 / 9 sections lues"), "missing counter in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn report_view_smoke_renders_all_read_banner() {
    let mut harness = setup_view_harness(ViewKind::Report).await;
    harness.services.reading_progress().unlock_all().await;

    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Toutes les sections ont été lues."), "missing banner in {html}");
    assert!(!html.contains("Nouveau"), "unexpected unread badge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn onboarding_view_smoke_renders_current_step() {
    let mut harness = setup_view_harness(ViewKind::Onboarding).await;
    harness.services.onboarding().advance().await;

    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Étape 2 sur 4"), "missing step label in {html}");
    assert!(html.contains("Suivant"), "missing next button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn onboarding_view_smoke_renders_completion() {
    let mut harness = setup_view_harness(ViewKind::Onboarding).await;
    let onboarding = harness.services.onboarding();
    for _ in 0..4 {
        onboarding.advance().await;
    }

    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Démarrage terminé."), "missing completion in {html}");
}
