use dioxus::prelude::*;
use log::{debug, error, info};

use crate::{
    DOMAIN_SERVICE, SETTINGS,
    component::{
        element::{ErrorMessage, LoadingPage},
        footer::Footer,
        header::Header,
        media::MediaDisplay,
        rest_timer::RestTimer,
        set::{SetDetails, SetSelector},
    },
    eh, t,
};
use setpace_domain::{self as domain, AudioConfigService, ExerciseService};
use setpace_web_app::{Text, audio::AudioPlayer, random::MathRandom};

#[component]
pub fn Workout() -> Element {
    let catalog = use_resource(|| async { DOMAIN_SERVICE.read().get_catalog().await });
    let initial_exercise = use_memo(move || {
        if let Some(Ok(catalog)) = &*catalog.read() {
            catalog.pick_random(None, &mut MathRandom).cloned()
        } else {
            None
        }
    });

    let player = use_hook(|| AudioPlayer::new(SETTINGS.peek().audio_volume()));
    use_future({
        let player = player.clone();
        move || {
            let player = player.clone();
            async move {
                match DOMAIN_SERVICE.read().get_audio_config().await {
                    Ok(config) => player.set_config(config),
                    Err(err) => error!("failed to load audio configuration: {err}"),
                }
            }
        }
    });
    use_effect({
        let player = player.clone();
        move || player.set_volume(SETTINGS.read().audio_volume())
    });
    use_drop({
        let player = player.clone();
        move || player.dispose()
    });

    match (&*catalog.read(), initial_exercise()) {
        (Some(Ok(catalog)), Some(exercise)) => rsx! {
            WorkoutSession { catalog: catalog.clone(), exercise, player }
        },
        (Some(Ok(_) | Err(domain::ReadError::NotFound)), _) => rsx! {
            div {
                class: "page",
                ErrorMessage { message: "{t(Text::NoExercise)}" }
            }
        },
        (Some(Err(err)), _) => rsx! {
            div {
                class: "page",
                ErrorMessage { message: "{err}" }
            }
        },
        (None, _) => rsx! { LoadingPage {} },
    }
}

#[component]
fn WorkoutSession(
    catalog: domain::Catalog,
    exercise: domain::Exercise,
    player: AudioPlayer,
) -> Element {
    let mut session = use_signal(|| domain::Session::new(exercise));

    let new_exercise = move |_| {
        let mut session = session.write();
        if session.new_exercise(&catalog, &mut MathRandom) {
            info!("new exercise: {}", session.exercise().name);
        }
    };
    let toggle_complete = eh!(mut player; {
        let status = session.write().toggle_complete(&mut player);
        debug!("set status changed to {status:?}");
    });
    let rest_completed = eh!(mut player; {
        session.write().complete_rest_timer(&mut player);
    });
    let rest_dismissed = eh!(mut player; {
        session.write().dismiss_rest_timer(&mut player);
    });

    let session_ref = session.read();
    let exercise = session_ref.exercise();
    let set = session_ref.current_set().clone();

    rsx! {
        div {
            class: "workout",
            Header {
                on_new_exercise: new_exercise,
                on_toggle_sounds: eh!(player; player.toggle_audio_bank()),
            }
            main {
                class: "workout-body",
                h1 { class: "exercise-name", "{exercise.name}" }
                MediaDisplay {
                    key: "{exercise.id}",
                    media: exercise.media.clone(),
                    name: exercise.name.to_string(),
                }
                if !exercise.description.is_empty() {
                    p { class: "exercise-description", "{exercise.description}" }
                }
                SetSelector {
                    current: session_ref.current_set_number(),
                    completed: session_ref.completed_sets().into_iter().collect::<Vec<_>>(),
                    on_select: move |number| session.write().select_set(number),
                }
                SetDetails {
                    set: set.clone(),
                    on_toggle_complete: toggle_complete,
                    on_adjust_weight: move |delta| session.write().adjust_weight(delta),
                    on_adjust_duration: move |delta| session.write().adjust_duration(delta),
                }
                if session_ref.show_rest_timer() {
                    RestTimer {
                        key: "{set.id:?}",
                        rest_time: set.rest_time,
                        on_adjust: move |delta| session.write().adjust_rest_time(delta),
                        on_complete: rest_completed,
                        on_dismiss: rest_dismissed,
                    }
                }
            }
            Footer {
                total_duration: session_ref.total_duration(),
                on_next_sound: eh!(player; player.cycle_and_play_next()),
            }
        }
    }
}
