//! Neon Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, FocusEvent, HtmlCanvasElement, KeyboardEvent,
    };

    use neon_pong::consts::*;
    use neon_pong::effects::Effects;
    use neon_pong::hud::HudText;
    use neon_pong::sim::Player;
    use neon_pong::{Game, Settings};

    /// World units visible across the shorter canvas side
    const VIEW_EXTENT: f64 = 16.0;
    const PADDLE_LENGTH: f64 = 2.0;
    const PADDLE_WIDTH: f64 = 0.5;
    const BALL_RADIUS: f64 = 0.2;

    /// Browser-side presentation state wrapped around the simulation
    struct App {
        game: Game,
        effects: Effects,
        settings: Settings,
        ctx: CanvasRenderingContext2d,
        canvas: HtmlCanvasElement,
        document: Document,
        last_time: f64,
        last_hud: Option<HudText>,
    }

    impl App {
        /// Run one simulation frame and feed its events to the effects
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            for event in self.game.frame(dt) {
                self.effects.on_event(&event, &self.settings);
            }
            self.effects.advance(dt);
        }

        /// World (x, z) to canvas pixels
        fn to_screen(&self, x: f32, z: f32, scale: f64) -> (f64, f64) {
            let cx = self.canvas.width() as f64 / 2.0;
            let cy = self.canvas.height() as f64 / 2.0;
            (cx + x as f64 * scale, cy + z as f64 * scale)
        }

        /// Top-down view of the field
        fn render(&self) {
            let w = self.canvas.width() as f64;
            let h = self.canvas.height() as f64;
            let scale = w.min(h) / VIEW_EXTENT * self.effects.camera_zoom() as f64;
            let ctx = &self.ctx;

            ctx.set_global_alpha(1.0);
            ctx.set_fill_style_str("#000");
            ctx.fill_rect(0.0, 0.0, w, h);

            // Field
            let (fx, fy) = self.to_screen(-WALL_X, -WALL_X, scale);
            let side = 2.0 * WALL_X as f64 * scale;
            ctx.set_fill_style_str("#228b22");
            ctx.fill_rect(fx, fy, side, side);
            ctx.set_stroke_style_str("#00ffff");
            ctx.set_line_width(3.0);
            ctx.stroke_rect(fx, fy, side, side);

            // Goal flashes over the conceding half
            for player in [Player::One, Player::Two] {
                let intensity = self.effects.flash_intensity(player);
                if intensity > 0.0 {
                    let conceding_z = if player == Player::One { -WALL_X } else { 0.0 };
                    let (gx, gy) = self.to_screen(-WALL_X, conceding_z, scale);
                    ctx.set_global_alpha(0.5 * intensity as f64);
                    ctx.set_fill_style_str(paddle_color(player));
                    ctx.fill_rect(gx, gy, side, side / 2.0);
                }
            }
            ctx.set_global_alpha(1.0);

            // Paddles
            for player in [Player::One, Player::Two] {
                let pos = self.game.state.paddle(player).pos();
                let (px, py) = self.to_screen(pos.x, pos.y, scale);
                ctx.set_fill_style_str(paddle_color(player));
                ctx.fill_rect(
                    px - PADDLE_LENGTH / 2.0 * scale,
                    py - PADDLE_WIDTH / 2.0 * scale,
                    PADDLE_LENGTH * scale,
                    PADDLE_WIDTH * scale,
                );
            }

            // Particles
            ctx.set_fill_style_str("#ffffff");
            for particle in self.effects.particles() {
                let (x, y) = self.to_screen(particle.pos.x, particle.pos.y, scale);
                ctx.set_global_alpha(particle.life.clamp(0.0, 1.0) as f64);
                ctx.fill_rect(x, y, particle.size as f64 * scale, particle.size as f64 * scale);
            }
            ctx.set_global_alpha(1.0);

            // Ball
            let ball = self.game.state.ball.pos;
            let (bx, by) = self.to_screen(ball.x, ball.y, scale);
            ctx.set_fill_style_str("#ff0000");
            ctx.begin_path();
            if ctx.arc(bx, by, BALL_RADIUS * scale, 0.0, TAU).is_ok() {
                ctx.fill();
            }
        }

        /// Update HUD elements in DOM (only when text changed)
        fn update_hud(&mut self) {
            let hud = HudText::from_state(&self.game.state);
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }

            if let Some(el) = self.document.get_element_by_id("score") {
                el.set_text_content(Some(&hud.score));
            }
            if let Some(el) = self.document.get_element_by_id("info") {
                let text = if self.settings.show_info {
                    hud.info.as_str()
                } else {
                    ""
                };
                el.set_text_content(Some(text));
            }
            self.last_hud = Some(hud);
        }
    }

    fn paddle_color(player: Player) -> &'static str {
        match player {
            Player::One => "#00ff00",
            Player::Two => "#800080",
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Neon Pong starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        canvas.set_width((canvas.client_width() as f64 * dpr) as u32);
        canvas.set_height((canvas.client_height() as f64 * dpr) as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(),
            effects: Effects::new(seed),
            settings,
            ctx,
            canvas,
            document,
            last_time: 0.0,
            last_hud: None,
        }));

        setup_input_handlers(&window, app.clone())?;
        start_animation_loop(app)?;

        log::info!("Neon Pong running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Key down - by physical code so layouts don't matter
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                let mut a = app.borrow_mut();
                if a.game.key_down(&code) {
                    event.prevent_default();
                } else if !event.repeat() && a.settings.handle_key(&code) {
                    event.prevent_default();
                    a.settings.save();
                    // Force the HUD to redraw with the new info setting
                    a.last_hud = None;
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.borrow_mut().game.key_up(&event.code()) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Blur - key-ups are lost once the page loses focus
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: FocusEvent| {
                log::warn!("Window lost focus - releasing controls");
                app.borrow_mut().game.release_controls();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Visibility change - a hidden tab gets no key events either
        {
            let document = window.document().ok_or("no document")?;
            let hidden_doc = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if hidden_doc.hidden() {
                    app.borrow_mut().game.release_controls();
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        Ok(())
    }

    /// Drive `App` from requestAnimationFrame with a single reusable closure
    fn start_animation_loop(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let next = callback.clone();

        *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
            {
                let mut a = app.borrow_mut();

                // Calculate delta time
                let dt = if a.last_time > 0.0 {
                    ((time - a.last_time) / 1000.0) as f32
                } else {
                    0.0
                };
                a.last_time = time;

                a.update(dt);
                a.render();
                a.update_hud();
            }

            if let Some(closure) = next.borrow().as_ref() {
                if let Some(window) = web_sys::window() {
                    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
                }
            }
        }));

        let window = web_sys::window().ok_or("no window")?;
        if let Some(closure) = callback.borrow().as_ref() {
            window.request_animation_frame(closure.as_ref().unchecked_ref())?;
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_pong::Game;
    use neon_pong::hud::HudText;
    use neon_pong::sim::GameEvent;

    env_logger::init();
    log::info!("Neon Pong (native) starting...");
    log::info!("Native mode has no renderer - run with `trunk serve` for the web version");

    // Headless session: fixed key pattern, one minute at 60 fps
    const FRAME: f32 = 1.0 / 60.0;
    let pattern = [
        ["KeyA", "ArrowRight"],
        ["KeyD", "ArrowLeft"],
        ["KeyA", "ArrowLeft"],
        ["KeyD", "ArrowRight"],
    ];

    let mut game = Game::new();
    let mut goals = 0;
    for frame in 0..3600usize {
        if frame % 45 == 0 {
            let keys = pattern[(frame / 45) % pattern.len()];
            let previous = pattern[(frame / 45 + pattern.len() - 1) % pattern.len()];
            for code in previous {
                game.key_up(code);
            }
            for code in keys {
                game.key_down(code);
            }
        }

        for event in game.frame(FRAME) {
            match event {
                GameEvent::Goal { .. } => goals += 1,
                GameEvent::RoundEnd { score1, score2 } => {
                    log::info!("Round end reached at {} - {}", score1, score2)
                }
                _ => {}
            }
        }
    }

    let hud = HudText::from_state(&game.state);
    println!("Goals: {}  Score: {}", goals, hud.score);
    println!("{}", hud.info);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
