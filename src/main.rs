//! Bingo Globe entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_globe {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::Document;

    use bingo_globe::audio::{AudioManager, SoundEffect};
    use bingo_globe::consts::*;
    use bingo_globe::settings::VOLUME_STEP;
    use bingo_globe::sim::{DrawPhase, GlobeEvent, GlobeState, TickInput, tick};
    use bingo_globe::{Ledger, Settings, format_number};

    /// Globe instance holding all state
    struct Globe {
        state: GlobeState,
        settings: Settings,
        audio: AudioManager,
        input: TickInput,
        accumulator: f32,
        last_time: f64,
        /// Tick at which the ball layer was last pushed to the DOM
        last_rendered_tick: u64,
    }

    impl Globe {
        fn new(seed: u64, ledger: Ledger, settings: Settings) -> Self {
            let audio = AudioManager::new(settings.volume);
            Self {
                state: GlobeState::restore(seed, ledger),
                settings,
                audio,
                input: TickInput::default(),
                accumulator: 0.0,
                last_time: 0.0,
                last_rendered_tick: 0,
            }
        }

        /// Run simulation ticks, coalescing fast frames to the 60 Hz cadence
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input = TickInput::default();
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bingo Globe starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let seed = js_sys::Date::now() as u64;
        let ledger = Ledger::load();
        let settings = Settings::load();
        let globe = Rc::new(RefCell::new(Globe::new(seed, ledger, settings)));

        {
            let g = globe.borrow();
            build_ball_layer(&document, &g.state);
            update_history(&document, &g.state);
            update_volume_label(&document, &g.settings);
        }

        setup_spin_button(globe.clone());
        setup_reset_button(globe.clone());
        setup_volume_buttons(globe.clone());
        setup_keyboard(globe.clone());

        request_animation_frame(globe);

        log::info!("Bingo Globe running with seed {}", seed);
    }

    fn request_animation_frame(globe: Rc<RefCell<Globe>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            globe_loop(globe, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn globe_loop(globe: Rc<RefCell<Globe>>, time: f64) {
        {
            let document = web_sys::window().unwrap().document().unwrap();
            let mut g = globe.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            process_events(&mut g, &document);

            // Observe positions only every few ticks; the throttle never
            // touches simulation state
            if g.state.time_ticks.saturating_sub(g.last_rendered_tick) >= RENDER_EVERY {
                render_balls(&document, &g.state);
                g.last_rendered_tick = g.state.time_ticks;
            }
            update_spin_button(&document, &g.state);
        }

        request_animation_frame(globe);
    }

    /// React to drained simulation events (audio, persistence, HUD)
    fn process_events(g: &mut Globe, document: &Document) {
        for event in g.state.drain_events() {
            match event {
                GlobeEvent::SpinStarted => {
                    g.audio.play(SoundEffect::SpinWhirr);
                    set_hidden(document, "notice", true);
                }
                GlobeEvent::BallSelected(number) => {
                    log::info!("Ball {} selected, dropping", number);
                }
                GlobeEvent::Revealed(number) => {
                    g.audio.play(SoundEffect::RevealChime);
                    g.state.ledger.save();
                    update_history(document, &g.state);
                    log::info!("Number {} revealed", number);
                }
                GlobeEvent::PoolExhausted => {
                    g.audio.play(SoundEffect::ExhaustedBuzz);
                    set_hidden(document, "notice", false);
                    log::warn!("All numbers drawn - reset to start a new game");
                }
                GlobeEvent::LedgerCleared => {
                    g.state.ledger.save();
                    update_history(document, &g.state);
                    set_hidden(document, "notice", true);
                    log::info!("Game reset");
                }
            }
        }
    }

    /// Create one div per ball inside the #globe container
    fn build_ball_layer(document: &Document, state: &GlobeState) {
        let Some(layer) = document.get_element_by_id("globe") else {
            log::error!("Missing #globe element");
            return;
        };
        layer.set_inner_html("");
        for ball in &state.balls {
            if let Ok(el) = document.create_element("div") {
                let _ = el.set_attribute("id", &format!("ball-{}", ball.number));
                let _ = el.set_attribute("class", "bingo-ball");
                let _ = el.set_attribute("data-letter", &ball.letter.to_string());
                el.set_text_content(Some(&format_number(ball.number)));
                let _ = layer.append_child(&el);
            }
        }
    }

    /// Push current ball positions to the DOM
    fn render_balls(document: &Document, state: &GlobeState) {
        let highlighted = match state.draw_phase {
            DrawPhase::Falling { number, .. } | DrawPhase::Revealed { number, .. } => Some(number),
            _ => None,
        };

        for ball in &state.balls {
            let Some(el) = document.get_element_by_id(&format!("ball-{}", ball.number)) else {
                continue;
            };

            // Depth is faked with scale and stacking order
            let depth_scale = ((ball.pos.z + 250.0) / 400.0).clamp(0.7, 1.2);
            let z_index = (ball.pos.z + 300.0).round() as i32;
            let style = format!(
                "left:{:.1}px;top:{:.1}px;transform:scale({:.3});z-index:{};",
                ball.pos.x - BALL_RADIUS,
                ball.pos.y - BALL_RADIUS,
                depth_scale,
                z_index
            );
            let _ = el.set_attribute("style", &style);

            if highlighted == Some(ball.number) {
                let _ = el.class_list().add_1("drawn");
            } else {
                let _ = el.class_list().remove_1("drawn");
            }
        }
    }

    /// Refresh the history panel (count badge, last number, drawn grid)
    fn update_history(document: &Document, state: &GlobeState) {
        if let Some(el) = document.get_element_by_id("drawn-count") {
            el.set_text_content(Some(&format!(
                "{}/{}",
                state.ledger.len(),
                state.total_numbers
            )));
        }

        if let Some(el) = document.get_element_by_id("last-number") {
            let text = state
                .last_drawn
                .map(format_number)
                .unwrap_or_else(|| "--".to_string());
            el.set_text_content(Some(&text));
        }

        if let Some(grid) = document.get_element_by_id("history") {
            grid.set_inner_html("");
            for &number in state.ledger.numbers() {
                if let Ok(el) = document.create_element("div") {
                    let _ = el.set_attribute("class", "history-ball");
                    el.set_text_content(Some(&format_number(number)));
                    let _ = grid.append_child(&el);
                }
            }
        }
    }

    /// Disable the spin trigger while a draw runs or the pool is empty
    fn update_spin_button(document: &Document, state: &GlobeState) {
        if let Some(btn) = document.get_element_by_id("spin-btn") {
            let exhausted = state.ledger.len() >= state.total_numbers as usize;
            if state.draw_in_progress() || exhausted {
                let _ = btn.set_attribute("disabled", "");
            } else {
                let _ = btn.remove_attribute("disabled");
            }
            btn.set_text_content(Some(if state.draw_in_progress() {
                "SPINNING..."
            } else {
                "SPIN"
            }));
        }
    }

    fn update_volume_label(document: &Document, settings: &Settings) {
        if let Some(el) = document.get_element_by_id("vol-label") {
            el.set_text_content(Some(&format!("{}%", settings.volume_percent())));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            if hidden {
                let _ = el.class_list().add_1("hidden");
            } else {
                let _ = el.class_list().remove_1("hidden");
            }
        }
    }

    fn setup_spin_button(globe: Rc<RefCell<Globe>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id("spin-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                globe.borrow_mut().input.spin = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_reset_button(globe: Rc<RefCell<Globe>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                globe.borrow_mut().input.reset = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_volume_buttons(globe: Rc<RefCell<Globe>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        for (id, delta) in [("vol-up", VOLUME_STEP), ("vol-down", -VOLUME_STEP)] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let globe = globe.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = globe.borrow_mut();
                g.settings.adjust_volume(delta);
                g.settings.save();
                let volume = g.settings.volume;
                g.audio.set_volume(volume);
                let document = web_sys::window().unwrap().document().unwrap();
                update_volume_label(&document, &g.settings);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(globe: Rc<RefCell<Globe>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = globe.borrow_mut();
            match event.key().as_str() {
                " " | "Enter" => g.input.spin = true,
                "r" | "R" => g.input.reset = true,
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_globe::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bingo_globe::consts::*;
    use bingo_globe::sim::{GlobeState, TickInput, tick};
    use bingo_globe::{bingo_letter, format_number};

    env_logger::init();
    log::info!("Bingo Globe (native) starting...");
    log::info!("Native mode is a headless demo - serve the web build for the full globe");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    let mut state = GlobeState::new(seed);

    // Run a handful of full draw choreographies
    for _ in 0..5 {
        tick(
            &mut state,
            &TickInput {
                spin: true,
                ..Default::default()
            },
        );
        for _ in 0..(SPIN_TICKS + FALL_TICKS + REVEAL_TICKS) {
            tick(&mut state, &TickInput::default());
        }
        for event in state.drain_events() {
            log::debug!("{:?}", event);
        }
        if let Some(number) = state.last_drawn {
            println!("Drew {}{}", bingo_letter(number), format_number(number));
        }
    }

    println!("History (most recent first): {:?}", state.ledger.numbers());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
