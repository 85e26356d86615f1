use std::{cell::RefCell, rc::Rc};

use chrono::Utc;
use dioxus::{core::Task, prelude::*};
use futures_util::StreamExt;
use gloo_timers::future::{IntervalStream, TimeoutFuture};
use log::debug;

use crate::{component::element::Icon, t};
use setpace_domain::{self as domain, EXIT_ANIMATION_MS, Outcome, TICK_INTERVAL_MS, Tick, Time};
use setpace_web_app::{
    Text,
    presentation::{format_duration, percentage, rest_timer_background},
};

const REST_TIME_STEP: i32 = 15;

type TaskSlot = Rc<RefCell<Option<Task>>>;

/// Countdown shown while a set is pending.
///
/// The countdown starts when the component is mounted. At most one timer task is alive: it is
/// replaced when the timer is dismissed and cancelled when the component unmounts, so callbacks
/// of an abandoned countdown never fire.
#[component]
pub fn RestTimer(
    rest_time: Time,
    on_adjust: EventHandler<i32>,
    on_complete: EventHandler<()>,
    on_dismiss: EventHandler<()>,
) -> Element {
    let mut timer = use_signal(|| domain::RestTimer::new(rest_time));
    let task: TaskSlot = use_hook(|| Rc::new(RefCell::new(None)));

    use_hook({
        let task = task.clone();
        move || replace_task(&task, spawn(run(timer, on_complete, on_dismiss)))
    });
    use_effect(use_reactive((&rest_time,), move |(rest_time,)| {
        timer.write().set_rest_time(rest_time, Utc::now());
    }));
    use_drop({
        let task = task.clone();
        move || {
            if let Some(task) = task.borrow_mut().take() {
                task.cancel();
            }
        }
    });

    let dismiss = move |_| {
        if timer.write().dismiss() {
            debug!("rest timer dismissed");
            replace_task(&task, spawn(finish(timer, on_complete, on_dismiss)));
        }
    };

    let state = timer.read();
    let background = rest_timer_background(state.progress());
    let remaining = percentage(state.remaining_fraction());

    rsx! {
        div {
            class: "rest-timer",
            class: if state.is_animating_out() { "is-leaving" },
            style: "background: {background}",
            div { class: "rest-timer-label", "{t(Text::Rest)}" }
            div { class: "rest-timer-remaining", "{format_duration(state.remaining())}" }
            div {
                class: "rest-timer-bar",
                div { class: "rest-timer-bar-fill", style: "width: {remaining}" }
            }
            div {
                class: "rest-timer-controls",
                button {
                    class: "rest-timer-button",
                    onclick: move |_| on_adjust.call(-REST_TIME_STEP),
                    "-{REST_TIME_STEP}"
                }
                button {
                    class: "rest-timer-button",
                    title: "{t(Text::Dismiss)}",
                    onclick: dismiss,
                    Icon { name: "xmark" }
                }
                button {
                    class: "rest-timer-button",
                    onclick: move |_| on_adjust.call(REST_TIME_STEP),
                    "+{REST_TIME_STEP}"
                }
            }
        }
    }
}

fn replace_task(slot: &TaskSlot, task: Task) {
    if let Some(previous) = slot.borrow_mut().replace(task) {
        previous.cancel();
    }
}

async fn run(
    mut timer: Signal<domain::RestTimer>,
    on_complete: EventHandler<()>,
    on_dismiss: EventHandler<()>,
) {
    let Some(delay) = timer.write().activate(Utc::now()) else {
        return;
    };
    TimeoutFuture::new(delay).await;

    let first = timer.write().begin(Utc::now());
    if first == Tick::Running {
        let mut ticks = IntervalStream::new(TICK_INTERVAL_MS);
        while ticks.next().await.is_some() {
            let tick = timer.write().tick(Utc::now());
            if tick != Tick::Running {
                break;
            }
        }
    }

    finish(timer, on_complete, on_dismiss).await;
}

async fn finish(
    mut timer: Signal<domain::RestTimer>,
    on_complete: EventHandler<()>,
    on_dismiss: EventHandler<()>,
) {
    TimeoutFuture::new(EXIT_ANIMATION_MS).await;
    let outcome = timer.write().finish();
    match outcome {
        Some(Outcome::Completed) => on_complete.call(()),
        Some(Outcome::Dismissed) => on_dismiss.call(()),
        None => {}
    }
}
