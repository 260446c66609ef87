use vidiwise_core::{update, AppState, JobHandle, Msg, PollStatus};

#[test]
fn cancel_without_running_job_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::CancelClicked);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn status_for_unknown_job_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::StatusReported {
            handle: JobHandle::new(42),
            status: PollStatus::Completed,
        },
    );

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
