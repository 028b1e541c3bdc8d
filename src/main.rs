//! Pixel Racer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use pixel_racer::Settings;
    use pixel_racer::audio::MusicPlayer;
    use pixel_racer::consts::*;
    use pixel_racer::hud::{Dashboard, FpsCounter};
    use pixel_racer::renderer::{RenderState, Scenery};
    use pixel_racer::sim::{InputState, SimulationState, tick};

    /// Game instance holding all state
    struct Game {
        state: SimulationState,
        scenery: Scenery,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: InputState,
        fps: FpsCounter,
        show_fps: bool,
    }

    impl Game {
        fn new(seed: u64, settings: &Settings) -> Self {
            Self {
                state: SimulationState::new(seed),
                scenery: Scenery::new(seed ^ 0x5eed, settings.quality),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: InputState::default(),
                fps: FpsCounter::default(),
                show_fps: settings.show_fps,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let report = tick(&mut self.state, &self.input, SIM_DT);
                if report.collisions > 0 {
                    log::debug!("Frame {}: {} collision(s)", self.state.frame, report.collisions);
                }
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            self.scenery.advance(dt);
            self.fps.record(time);
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = self.scenery.build_frame(&self.state);
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let dash = Dashboard::from_state(&self.state);

            if let Some(el) = document.get_element_by_id("hud-speed") {
                el.set_text_content(Some(&dash.speed));
            }
            if let Some(el) = document.get_element_by_id("hud-curve") {
                el.set_text_content(Some(&dash.curve));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.show_fps {
                    el.set_text_content(Some(&format!("FPS: {}", self.fps.fps())));
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Pixel Racer starting...");

        let settings = Settings::load();
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Logical size is fixed; backing store follows device pixel ratio
        let dpr = window.device_pixel_ratio();
        let width = (f64::from(CANVAS_WIDTH) * dpr) as u32;
        let height = (f64::from(CANVAS_HEIGHT) * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, &settings)));
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        // Music is optional; the game runs silently without it
        match MusicPlayer::new(&settings) {
            Ok(player) => {
                if let Err(e) = player.start_on_first_click() {
                    log::warn!("Music unavailable: {:?}", e);
                }
            }
            Err(e) => log::warn!("Music unavailable: {:?}", e),
        }

        setup_input_handlers(game.clone())?;

        if let Some(el) = document.get_element_by_id("loading") {
            let _ = el.set_attribute("class", "hidden");
        }

        request_animation_frame(game);

        log::info!("Pixel Racer running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.key()) {
                    // Arrow keys would otherwise scroll the page
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; frame loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Pixel Racer failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pixel Racer (native) starting...");
    log::info!("Native mode runs the simulation headless - run with `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted drive without a window, for checking tuning changes
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use pixel_racer::Tuning;
    use pixel_racer::consts::SIM_DT;
    use pixel_racer::hud::Dashboard;
    use pixel_racer::sim::{InputState, SimulationState, tick};

    const DEFAULT_SEED: u64 = 12345;
    const DEFAULT_FRAMES: u64 = 60 * 120;

    fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
        let raw = std::env::var(name).ok()?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid {}: {:?}", name, raw);
                None
            }
        }
    }

    fn load_tuning() -> Tuning {
        let Ok(json) = std::env::var("RACER_TUNING") else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Using custom tuning");
                tuning
            }
            Err(e) => {
                log::warn!("{}; using default tuning", e);
                Tuning::default()
            }
        }
    }

    /// Weave across the road with the throttle mostly open
    fn scripted_input(frame: u64) -> InputState {
        let phase = (frame / 90) % 4;
        InputState {
            accelerate: frame % 600 < 500,
            brake: frame % 600 >= 560,
            steer_left: phase == 1,
            steer_right: phase == 3,
        }
    }

    pub fn run() {
        let seed = env_parse("RACER_SEED").unwrap_or(DEFAULT_SEED);
        let frames = env_parse("RACER_FRAMES").unwrap_or(DEFAULT_FRAMES);
        let mut state = SimulationState::with_tuning(seed, load_tuning());
        log::info!("Simulating {} frames with seed {}", frames, seed);

        let mut collisions = 0u64;
        let mut recycled = 0u64;
        for frame in 0..frames {
            let report = tick(&mut state, &scripted_input(frame), SIM_DT);
            collisions += u64::from(report.collisions);
            recycled += u64::from(report.recycled);

            if frame > 0 && frame % (60 * 30) == 0 {
                let dash = Dashboard::from_state(&state);
                log::info!("t={}s {} {}", frame / 60, dash.speed, dash.curve);
            }
        }

        log::info!(
            "Done: {} collision steps, {} cars recycled, road scrolled {:.0}",
            collisions,
            recycled,
            state.road_offset
        );
        println!(
            "seed={} frames={} collisions={} recycled={} speed={:.1} player_x={:.2} curve={:.1}",
            seed,
            frames,
            collisions,
            recycled,
            state.speed,
            state.player_x,
            state.road.curve
        );
    }
}
