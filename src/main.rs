//! Arkanoid entry point
//!
//! Browser: WebGPU canvas, keyboard input, DOM overlay for text.
//! Native: headless autopilot session printed to the terminal.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use arkanoid::consts::*;
    use arkanoid::platform::{Game, KeyState};
    use arkanoid::renderer::{FrameBuilder, RenderState};
    use arkanoid::settings::Settings;

    /// Browser-side wrapper around the host-agnostic game
    struct WebGame {
        game: Game,
        render_state: Option<RenderState>,
        frame: FrameBuilder,
        keys: KeyState,
        last_time: f64,
        /// Last markup written to the overlay, to skip redundant DOM writes
        hud_markup: String,
    }

    impl WebGame {
        fn new(settings: Settings) -> Self {
            Self {
                game: Game::init(settings),
                render_state: None,
                frame: FrameBuilder::new(),
                keys: KeyState::default(),
                last_time: 0.0,
                hud_markup: String::new(),
            }
        }

        /// Run simulation ticks for the elapsed frame time
        fn update(&mut self, dt: f32) {
            let was_over = self.game.state.game_over;
            self.game.advance(dt, &self.keys);
            if !was_over && self.game.state.game_over {
                log::info!("Game over, score {}", self.game.state.score);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            self.frame.clear();
            self.game.draw(&mut self.frame);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.frame.vertices) {
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
        }

        /// Mirror this frame's text labels into the DOM overlay
        fn update_hud(&mut self) {
            let mut markup = String::new();
            for label in &self.frame.labels {
                let glyph = label.font.glyph_size();
                let left = label.pos.x / FIELD_WIDTH * 100.0;
                let top = (label.pos.y - glyph.y) / FIELD_HEIGHT * 100.0;
                markup.push_str(&format!(
                    "<span class=\"hud-label\" style=\"left:{:.2}%;top:{:.2}%;font-size:{}px;color:{}\">{}</span>",
                    left,
                    top,
                    glyph.y,
                    label.color.to_css(),
                    label.text
                ));
            }
            if markup == self.hud_markup {
                return;
            }

            if let Some(hud) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("hud"))
            {
                hud.set_inner_html(&markup);
            }
            self.hud_markup = markup;
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&format!("Failed to init logger: {}", e)))?;

        log::info!("{} starting...", WINDOW_TITLE);

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        document.set_title(WINDOW_TITLE);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let game = Rc::new(RefCell::new(WebGame::new(Settings::load())));

        // The game echoes whatever size it's offered; offer the field size
        let (width, height) = {
            let g = game.borrow();
            let (w, h) = g.game.window_size();
            g.game.layout(w, h)
        };
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {}", e)))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, game.clone())?;

        request_animation_frame(game);

        log::info!("{} running!", WINDOW_TITLE);
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<WebGame>>) -> Result<(), JsValue> {
        for (event_name, down) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = KeyState::key_from_name(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().keys.set(key, down);
                }
            });
            window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Focus loss swallows keyup events; release everything
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys = KeyState::default();
                log::debug!("Window blurred, keys released");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, stopping game loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<WebGame>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
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
        log::error!("Fatal startup error: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = native::run() {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::Context;

    use arkanoid::consts::WINDOW_TITLE;
    use arkanoid::platform::headless;
    use arkanoid::settings::Settings;

    /// `arkanoid [settings.json]`: play a headless autopilot session
    pub fn run() -> anyhow::Result<()> {
        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::from_file(path)?,
            None => Settings::load(),
        };

        log::info!(
            "{} (native, headless) starting: variant={}",
            WINDOW_TITLE,
            settings.variant.as_str()
        );

        let (summary, canvas) = headless::run_demo(settings);
        print!("{}", canvas.to_text());
        for label in &summary.labels {
            println!("{}", label);
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to encode summary")?
        );
        Ok(())
    }
}
