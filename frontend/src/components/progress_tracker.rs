use common::progress::{ClassifiedStep, StepState};
use yew::prelude::*;

fn state_class(state: StepState) -> &'static str {
    match state {
        StepState::Completed => "completed",
        StepState::Current => "current",
        StepState::Pending => "pending",
    }
}

/// Horizontal step indicator shared by the customer, admin and rider cards.
/// `message` is the latest milestone text, shown under the indicator.
pub fn progress_tracker(steps: &[ClassifiedStep], message: Option<&str>) -> Html {
    let last = steps.len().saturating_sub(1);
    html! {
        <div class="progress-tracker">
            <ol class="progress-steps">
                { for steps.iter().enumerate().map(|(i, step)| html! {
                    <li class={classes!("progress-step", state_class(step.state))}>
                        <span class={classes!("progress-ring", step.is_highlighted().then_some("highlighted"))}>
                            { if step.is_completed() { "✓".to_string() } else { (i + 1).to_string() } }
                        </span>
                        <span class="progress-label">{ step.label }</span>
                        if i < last {
                            <span class={classes!("progress-bar", step.is_completed().then_some("filled"))} />
                        }
                    </li>
                }) }
            </ol>
            if let Some(message) = message {
                <p class="progress-message">{ message }</p>
            }
        </div>
    }
}
