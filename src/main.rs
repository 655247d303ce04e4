//! Edge Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, Window};

    use edge_runner::Settings;
    use edge_runner::platform::{FrameClock, StopHandle};
    use edge_runner::renderer::RenderState;
    use edge_runner::sim::{GameEvent, GameState, TickInput, Viewport, tick};

    type FrameCallback = Closure<dyn FnMut(f64)>;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        settings: Settings,
        clock: FrameClock,
        /// Input gathered since the last frame
        input: TickInput,
        canvas: HtmlCanvasElement,
        // Last values written to the DOM
        shown_score: Option<u64>,
        shown_fps: Option<u32>,
    }

    impl Game {
        fn new(seed: u64, viewport: Viewport, settings: Settings, canvas: HtmlCanvasElement) -> Self {
            Self {
                state: GameState::new(seed, viewport),
                render_state: None,
                settings,
                clock: FrameClock::new(),
                input: TickInput::default(),
                canvas,
                shown_score: None,
                shown_fps: None,
            }
        }

        /// Run one simulation frame
        fn update(&mut self, time: f64, viewport: Viewport) {
            let dt = self.clock.frame(time);
            self.input.viewport = Some(viewport);
            tick(&mut self.state, &self.input, dt);
            self.input = TickInput::default();

            for event in self.state.drain_events() {
                log_event(&event);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state, &self.settings, self.state.time_ms) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if self.shown_score != Some(self.state.score) {
                if let Some(el) = document.get_element_by_id("score") {
                    el.set_text_content(Some(&self.state.score.to_string()));
                }
                self.shown_score = Some(self.state.score);
            }

            if self.settings.show_fps {
                let fps = self.clock.fps();
                if self.shown_fps != Some(fps) {
                    if let Some(el) = document.get_element_by_id("fps") {
                        el.set_text_content(Some(&format!("{} fps", fps)));
                    }
                    self.shown_fps = Some(fps);
                }
            }
        }

        /// Match the canvas backing store to its CSS size
        fn resize_surface(&mut self, window: &Window) {
            let (width, height) = size_canvas(window, &self.canvas);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
        }
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::HazardSpawned { id, edge } => log::debug!("Hazard {} spawned on {:?} edge", id, edge),
            GameEvent::HazardExpired { id, score } => log::debug!("Hazard {} expired, score {}", id, score),
            GameEvent::Collision { hazard_id, score_lost } => {
                log::debug!("Hit hazard {}, lost {} point(s)", hazard_id, score_lost)
            }
            GameEvent::Jumped { .. } | GameEvent::Turned { .. } => {}
        }
    }

    /// Viewport size, queried fresh every frame
    fn viewport_of(window: &Window) -> Viewport {
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport::new(width as f32, height as f32)
    }

    /// Set canvas size in physical pixels; returns it
    fn size_canvas(window: &Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    /// Everything a running game holds on to; released by `unmount`
    pub struct Mount {
        game: Rc<RefCell<Game>>,
        stop: StopHandle,
        frame_id: Rc<Cell<Option<i32>>>,
        frame_cb: Rc<RefCell<Option<FrameCallback>>>,
        keydown: Closure<dyn FnMut(KeyboardEvent)>,
        resize: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl Mount {
        fn unmount(self) {
            self.stop.stop();

            if let Some(window) = web_sys::window() {
                if let Some(id) = self.frame_id.take() {
                    let _ = window.cancel_animation_frame(id);
                }
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    self.keydown.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    self.resize.as_ref().unchecked_ref(),
                );
            }

            // Breaks the frame closure's reference to itself
            self.frame_cb.borrow_mut().take();

            let cancelled = self.game.borrow_mut().state.teardown();
            log::info!("Game unmounted ({} pending hazard expiries cancelled)", cancelled);
        }
    }

    thread_local! {
        static ACTIVE: RefCell<Option<Mount>> = const { RefCell::new(None) };
    }

    fn schedule_frame(
        window: &Window,
        frame_cb: &RefCell<Option<FrameCallback>>,
        frame_id: &Cell<Option<i32>>,
    ) -> Result<(), JsValue> {
        let cb = frame_cb.borrow();
        let cb = cb.as_ref().ok_or("frame callback released")?;
        let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        frame_id.set(Some(id));
        Ok(())
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        // Errors only if a logger is already installed
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Edge Runner starting...");

        match mount().await {
            Ok(mount) => {
                let previous = ACTIVE.with(|active| active.borrow_mut().replace(mount));
                if let Some(previous) = previous {
                    previous.unmount();
                }
                log::info!("Edge Runner running!");
            }
            Err(e) => log::error!("Failed to start: {:?}", e),
        }
    }

    /// Tear down the running game, if any
    pub fn unmount() {
        match ACTIVE.with(|active| active.borrow_mut().take()) {
            Some(mount) => mount.unmount(),
            None => log::debug!("No running game to unmount"),
        }
    }

    async fn mount() -> Result<Mount, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let (width, height) = size_canvas(&window, &canvas);

        let settings = Settings::load();
        if let Some(el) = document.get_element_by_id("fps") {
            let class = if settings.show_fps { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            viewport_of(&window),
            settings,
            canvas.clone(),
        )));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        // Space to jump; everything else passes through
        let keydown = {
            let game = game.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    game.borrow_mut().input.jumps += 1;
                }
            })
        };
        window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;

        let resize = {
            let game = game.clone();
            let window = window.clone();
            Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resize_surface(&window);
            })
        };
        window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;

        // Leaving the page tears the game down
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                unmount();
            });
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Game loop: checks the stop flag before doing any work
        let stop = StopHandle::new();
        let frame_id = Rc::new(Cell::new(None));
        let frame_cb: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        {
            let game = game.clone();
            let stop = stop.clone();
            let frame_id = frame_id.clone();
            let next = frame_cb.clone();
            let window = window.clone();
            *frame_cb.borrow_mut() = Some(Closure::new(move |time: f64| {
                frame_id.set(None);
                let keep_going = stop.run_frame(|| {
                    let mut g = game.borrow_mut();
                    g.update(time, viewport_of(&window));
                    g.render();
                    g.update_hud();
                });
                if !keep_going {
                    return;
                }

                if let Err(e) = schedule_frame(&window, &next, &frame_id) {
                    log::error!("Failed to schedule frame: {:?}", e);
                }
            }));
        }
        schedule_frame(&window, &frame_cb, &frame_id)?;

        Ok(Mount {
            game,
            stop,
            frame_id,
            frame_cb,
            keydown,
            resize,
        })
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Stop the game loop and release listeners (callable from JS)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn unmount_game() {
    wasm_game::unmount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Edge Runner (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seed = std::env::var("EDGE_RUNNER_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5eed);
    run_headless(seed, 30_000.0);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulate a run without a window and report what happened
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(seed: u64, duration_ms: f64) {
    use edge_runner::consts::NOMINAL_FRAME_MS;
    use edge_runner::platform::FrameClock;
    use edge_runner::sim::{GameEvent, GameState, TickInput, Viewport, tick};

    let mut state = GameState::new(seed, Viewport::new(1280.0, 720.0));
    let mut clock = FrameClock::new();
    let mut survived = 0u32;
    let mut collisions = 0u32;
    let mut best = 0u64;

    let frames = (duration_ms / NOMINAL_FRAME_MS) as u32;
    for frame in 0..frames {
        let dt = clock.frame(f64::from(frame) * NOMINAL_FRAME_MS);
        // Jump about every three quarters of a second
        let input = TickInput {
            jumps: u32::from(frame % 45 == 0),
            ..Default::default()
        };
        tick(&mut state, &input, dt);

        for event in state.drain_events() {
            match event {
                GameEvent::HazardExpired { .. } => survived += 1,
                GameEvent::Collision { .. } => collisions += 1,
                _ => {}
            }
        }
        best = best.max(state.score);
    }

    log::info!("Simulated {} frames at {} fps", frames, clock.fps());
    println!(
        "Seed {}: {:.1}s simulated, score {}, best {}, {} hazards survived, {} collision checks hit",
        seed,
        state.time_ms / 1000.0,
        state.score,
        best,
        survived,
        collisions
    );
}
