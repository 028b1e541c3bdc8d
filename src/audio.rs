//! Background music
//!
//! One looped track, started by the first click (browsers block autoplay),
//! then faded in on a timer that runs outside the frame loop. Playback
//! failure only costs the music.

/// Whether a fade has more steps to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeStatus {
    Rising,
    Done,
}

/// Linear volume ramp toward a ceiling
#[derive(Debug, Clone, PartialEq)]
pub struct MusicFade {
    volume: f32,
    ceiling: f32,
    step: f32,
}

impl MusicFade {
    pub fn new(ceiling: f32, step: f32) -> Self {
        Self {
            volume: 0.0,
            ceiling: ceiling.clamp(0.0, 1.0),
            step: step.max(f32::EPSILON),
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Raise the volume one step; `Done` once the ceiling is held
    pub fn step(&mut self) -> FadeStatus {
        if self.volume < self.ceiling {
            self.volume = (self.volume + self.step).min(self.ceiling);
            FadeStatus::Rising
        } else {
            FadeStatus::Done
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::MusicPlayer;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlAudioElement;

    use super::{FadeStatus, MusicFade};
    use crate::settings::Settings;

    /// Looped background track behind a click-to-start gate
    pub struct MusicPlayer {
        element: HtmlAudioElement,
        fade: RefCell<MusicFade>,
        interval_ms: i32,
        interval_id: RefCell<Option<i32>>,
        /// Keeps the interval callback alive while it is scheduled
        tick: RefCell<Option<Closure<dyn FnMut()>>>,
    }

    impl MusicPlayer {
        pub fn new(settings: &Settings) -> Result<Rc<Self>, JsValue> {
            let element = HtmlAudioElement::new_with_src(&settings.music_src)?;
            element.set_preload("auto");
            element.set_attribute("playsinline", "")?;
            element.set_loop(true);
            element.set_volume(f64::from(settings.music_volume));

            Ok(Rc::new(Self {
                element,
                fade: RefCell::new(MusicFade::new(
                    settings.music_volume,
                    settings.music_fade_step,
                )),
                interval_ms: settings.music_fade_interval_ms,
                interval_id: RefCell::new(None),
                tick: RefCell::new(None),
            }))
        }

        /// Start playback on the first click anywhere in the window
        pub fn start_on_first_click(self: &Rc<Self>) -> Result<(), JsValue> {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            let player = self.clone();
            let closure = Closure::once(move |_event: web_sys::MouseEvent| {
                wasm_bindgen_futures::spawn_local(async move {
                    player.start().await;
                });
            });

            let options = web_sys::AddEventListenerOptions::new();
            options.set_once(true);
            window.add_event_listener_with_callback_and_add_event_listener_options(
                "click",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
            Ok(())
        }

        async fn start(self: Rc<Self>) {
            self.element.set_volume(0.0);
            let played = match self.element.play() {
                Ok(promise) => JsFuture::from(promise).await.map(|_| ()),
                Err(err) => Err(err),
            };

            match played {
                Ok(()) => {
                    log::info!("Music is playing");
                    self.begin_fade();
                }
                Err(err) => log::warn!("Music play failed: {:?}", err),
            }
        }

        fn begin_fade(self: &Rc<Self>) {
            let Some(window) = web_sys::window() else {
                return;
            };

            let player = self.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let status = player.fade.borrow_mut().step();
                player
                    .element
                    .set_volume(f64::from(player.fade.borrow().volume()));
                if status == FadeStatus::Done {
                    player.stop_fade();
                }
            });

            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                self.interval_ms,
            ) {
                Ok(id) => {
                    *self.interval_id.borrow_mut() = Some(id);
                    *self.tick.borrow_mut() = Some(closure);
                }
                Err(err) => log::warn!("Music fade timer failed: {:?}", err),
            }
        }

        fn stop_fade(&self) {
            if let Some(id) = self.interval_id.borrow_mut().take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(id);
                }
            }
            // Dropping the closure from inside its own call is unsound, so
            // release it on the next turn of the event loop instead
            if let Some(closure) = self.tick.borrow_mut().take() {
                wasm_bindgen_futures::spawn_local(async move {
                    drop(closure);
                });
            }
            log::debug!("Music fade complete");
        }
    }
}
