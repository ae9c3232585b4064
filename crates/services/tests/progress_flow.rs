use services::forms::{ProfileForm, StepForm};
use services::{AppServices, Clock};
use staircase_core::health::HealthLabel;
use staircase_core::model::{StepId, UserId};
use staircase_core::time::fixed_now;
use uuid::Uuid;

#[tokio::test]
async fn edit_save_reread_flow_through_a_session() {
    let services = AppServices::in_memory(Clock::fixed(fixed_now()));
    let user = UserId::new(Uuid::new_v4());
    let mut session = services.session_for(user);

    // Fresh user: seven defaults on the dashboard.
    let overview = session.overview().await.unwrap();
    assert_eq!(overview.steps.len(), 7);
    assert_eq!(overview.stats.overall_percent, 0.0);

    // Open step 1, edit the form the way the detail page does.
    let detail = session.step_detail(StepId::new(1)).await.unwrap().unwrap();
    let mut form = StepForm::from_view(&detail.step);
    assert_eq!(form.target_amount, "1000");
    form.current_amount = "650".into();
    form.notes = "payday auto-transfer".into();

    session
        .save_step(StepId::new(1), &form.to_patch())
        .await
        .unwrap();

    // The next read re-merges and reflects the write.
    let overview = session.overview().await.unwrap();
    assert_eq!(overview.steps[0].current_amount, 650.0);
    assert_eq!(overview.steps[0].progress_percent(), 65.0);
    assert_eq!(overview.stats.total_savings, 650.0);
    // Ratio progress alone never moves the completion-count dashboard.
    assert_eq!(overview.stats.overall_percent, 0.0);

    // Mark a boolean-complete milestone done.
    let mut form = StepForm::from_view(
        &session
            .step_detail(StepId::new(2))
            .await
            .unwrap()
            .unwrap()
            .step,
    );
    form.completed = true;
    session
        .save_step(StepId::new(2), &form.to_patch())
        .await
        .unwrap();

    let overview = session.overview().await.unwrap();
    assert_eq!(overview.stats.completed_count, 1);
    assert_eq!(overview.stats.remaining_steps, 6);
    assert!((overview.stats.overall_percent - 100.0 / 7.0).abs() < 1e-9);
    assert_eq!(overview.steps[1].progress_percent(), 100.0);
}

#[tokio::test]
async fn profile_form_save_and_health_summary() {
    let services = AppServices::in_memory(Clock::fixed(fixed_now()));
    let user = UserId::new(Uuid::new_v4());
    let profiles = services.profiles();

    // Prefill from the blank profile, fill the form in.
    let blank = profiles.load_or_empty(&user).await.unwrap();
    let mut form = ProfileForm::from_profile(&blank);
    form.monthly_income = "5000".into();
    form.monthly_expenses = "3500".into();
    form.current_savings = "2000".into();
    form.financial_goals = "financial freedom within five years".into();

    let stored = profiles.save(&form.to_profile(user)).await.unwrap();
    assert_eq!(stored.updated_at, Some(fixed_now()));

    let loaded = profiles.load(&user).await.unwrap().unwrap();
    let health = profiles.health(&loaded);
    assert_eq!(health.net_monthly_income, 1500.0);
    assert_eq!(health.savings_rate, 30.0);
    assert_eq!(health.label, HealthLabel::Healthy);
}

#[tokio::test]
async fn unknown_step_navigation_is_a_not_found_case() {
    let services = AppServices::in_memory(Clock::fixed(fixed_now()));
    let mut session = services.session_for(UserId::new(Uuid::new_v4()));

    // Route parsing feeds arbitrary ids here; absence must be explicit.
    let missing = session.step_detail(StepId::new(12)).await.unwrap();
    assert!(missing.is_none());
}
