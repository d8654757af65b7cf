//! Dino Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use dino_runner::Game;
    use dino_runner::consts::*;
    use dino_runner::persistence::default_storage;
    use dino_runner::platform::input::{is_game_key, key_command, pointer_command};
    use dino_runner::renderer::WebCanvas;

    /// The game plus the surface it draws on
    struct Runner {
        game: Game,
        canvas: WebCanvas,
    }

    type Shared = Rc<RefCell<Runner>>;

    thread_local! {
        /// Handle for the exported bindings
        static RUNNER: RefCell<Option<Shared>> = const { RefCell::new(None) };
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Dino Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "element #canvas is not a canvas")?;
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let seed = js_sys::Date::now() as u64;
        let runner = Rc::new(RefCell::new(Runner {
            game: Game::new(seed, default_storage()),
            canvas: WebCanvas::new(&canvas)?,
        }));
        RUNNER.with(|slot| *slot.borrow_mut() = Some(runner.clone()));

        setup_input_handlers(&window, &canvas, runner.clone());
        setup_auto_pause(&window, &document, runner.clone());

        request_animation_frame(runner);
        log::info!("Dino Runner running!");
        Ok(())
    }

    /// Start or restart from page buttons
    pub fn start() {
        RUNNER.with(|slot| {
            if let Some(runner) = slot.borrow().as_ref() {
                runner.borrow_mut().game.start();
            }
        });
    }

    /// Tear down the loop; the next scheduled frame is the last
    pub fn stop() {
        RUNNER.with(|slot| {
            if let Some(runner) = slot.borrow_mut().take() {
                runner.borrow_mut().game.stop();
            }
        });
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        runner: Shared,
    ) {
        // Keyboard
        {
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if is_game_key(&key) {
                    event.prevent_default();
                }
                let mut r = runner.borrow_mut();
                if let Some(command) = key_command(&key, r.game.phase()) {
                    r.game.handle(command);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse press (primary button only)
        {
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let mut r = runner.borrow_mut();
                if let Some(command) = pointer_command(r.game.phase()) {
                    r.game.handle(command);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut r = runner.borrow_mut();
                if let Some(command) = pointer_command(r.game.phase()) {
                    r.game.handle(command);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(window: &web_sys::Window, document: &web_sys::Document, runner: Shared) {
        // Visibility change (tab switch, minimize)
        {
            let runner = runner.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    runner.borrow_mut().game.auto_pause("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                runner.borrow_mut().game.auto_pause("window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(runner: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(runner, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(runner: Shared, time: f64) {
        let keep_going = {
            let mut r = runner.borrow_mut();
            let Runner { game, canvas } = &mut *r;
            game.frame(time, canvas)
        };
        if keep_going {
            request_animation_frame(runner);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Start or restart a run (for page buttons)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_game() {
    wasm_game::start();
}

/// Stop the frame loop
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn stop_game() {
    wasm_game::stop();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dino Runner (native) starting...");
    log::info!("Native mode is a headless autopilot demo - build for wasm32 to play");

    run_headless_demo(60);
}

/// Let the autopilot play for `seconds` of simulated time
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo(seconds: u32) {
    use dino_runner::Game;
    use dino_runner::persistence::default_storage;
    use dino_runner::platform::Command;
    use dino_runner::renderer::DisplayList;
    use std::time::{SystemTime, UNIX_EPOCH};

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut game = Game::new(seed, default_storage());
    let mut canvas = DisplayList::new();
    game.handle(Command::ToggleAutopilot);
    game.handle(Command::Start);

    let frames = seconds * 60;
    let mut draw_calls = 0;
    for i in 0..frames {
        canvas.clear();
        game.frame(i as f64 * 1000.0 / 60.0, &mut canvas);
        draw_calls += canvas.len();
    }
    game.stop();

    let state = game.state();
    println!(
        "Autopilot ran {} frames: phase {:?}, score {}, speed {:.1}x, best {}",
        frames,
        state.phase,
        state.score,
        state.speed_multiplier,
        game.high_score()
    );
    log::info!(
        "Average draw calls per frame: {}",
        draw_calls / frames.max(1) as usize
    );
}
