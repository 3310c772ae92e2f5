//! Celebration Card entry point
//!
//! Handles platform-specific initialization and runs the card loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_card {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlInputElement};

    use celebration_card::audio::AudioManager;
    use celebration_card::consts::*;
    use celebration_card::sim::{Action, Session, TickInput, tick};
    use celebration_card::ui::{CardView, DomPresenter};
    use celebration_card::{CardError, CardResult, Settings};

    /// Card instance holding all state
    struct Card {
        session: Session,
        settings: Settings,
        presenter: DomPresenter,
        audio: AudioManager,
        accumulator_ms: f64,
        last_time: f64,
        input: TickInput,
    }

    impl Card {
        fn new(seed: u64, settings: Settings, presenter: DomPresenter) -> Self {
            let audio = AudioManager::new(&settings);
            Self {
                session: Session::new(seed),
                settings,
                presenter,
                audio,
                accumulator_ms: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Queue a visitor action for the next tick
        fn push(&mut self, action: Action) {
            self.audio.resume();
            self.input.actions.push(action);
        }

        /// Run simulation ticks
        fn update(&mut self, dt_ms: f64) {
            let dt_ms = dt_ms.min(100.0);
            self.accumulator_ms += dt_ms;

            let step = SIM_DT_MS as f64;
            let mut substeps = 0;
            while self.accumulator_ms >= step && substeps < MAX_SUBSTEPS {
                let events = tick(&mut self.session, &self.input, SIM_DT_MS);
                self.accumulator_ms -= step;
                substeps += 1;

                // Actions are one-shot
                self.input.actions.clear();

                for event in &events {
                    log::debug!("{:?}", event);
                }
                self.audio.play_events(&events);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let view = CardView::from_session(&self.session, &self.settings);
            self.presenter.render(view);
        }
    }

    pub fn run() -> CardResult<()> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| CardError::platform(format!("logger: {e}")))?;

        log::info!("Celebration Card starting...");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let presenter = DomPresenter::new()?;
        let card = Rc::new(RefCell::new(Card::new(seed, settings, presenter)));

        log::info!("Session started with seed: {}", seed);

        setup_input_handlers(card.clone())?;
        setup_auto_mute(card.clone())?;

        // Start card loop
        request_animation_frame(card);

        log::info!("Celebration Card running!");
        Ok(())
    }

    fn document() -> CardResult<web_sys::Document> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| CardError::platform("no document"))
    }

    fn element(id: &str) -> CardResult<Element> {
        document()?
            .get_element_by_id(id)
            .ok_or_else(|| CardError::missing_element(id))
    }

    /// Register `handler` for `event` on element `id`
    fn listen<E, F>(id: &str, event: &str, handler: F) -> CardResult<()>
    where
        E: FromWasmAbi + 'static,
        F: FnMut(E) + 'static,
    {
        let el = element(id)?;
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|_| CardError::platform(format!("listen {event} on #{id}")))?;
        closure.forget();
        Ok(())
    }

    /// Click on `id` queues `action`
    fn on_click(card: &Rc<RefCell<Card>>, id: &str, action: Action) -> CardResult<()> {
        let card = card.clone();
        listen(id, "click", move |_event: web_sys::MouseEvent| {
            card.borrow_mut().push(action.clone());
        })
    }

    /// Clicks inside a layer of `[data-index]` children
    fn on_indexed_click(
        card: &Rc<RefCell<Card>>,
        id: &str,
        make: fn(usize) -> Action,
    ) -> CardResult<()> {
        let card = card.clone();
        listen(id, "click", move |event: web_sys::MouseEvent| {
            let index = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("[data-index]").ok().flatten())
                .and_then(|el| el.get_attribute("data-index"))
                .and_then(|s| s.parse::<usize>().ok());
            if let Some(index) = index {
                card.borrow_mut().push(make(index));
            }
        })
    }

    fn setup_input_handlers(card: Rc<RefCell<Card>>) -> CardResult<()> {
        // Name entry
        {
            let card = card.clone();
            listen("name-input", "input", move |event: web_sys::InputEvent| {
                let value = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();
                card.borrow_mut().push(Action::EditName(value));
            })?;
        }
        {
            let card = card.clone();
            listen("name-form", "submit", move |event: web_sys::Event| {
                event.prevent_default();
                card.borrow_mut().push(Action::SubmitDraft);
            })?;
        }

        on_click(&card, "envelope", Action::OpenEnvelope)?;
        for id in [
            "envelope-continue",
            "wish-continue",
            "sticker-continue",
            "flip-continue",
        ] {
            on_click(&card, id, Action::Continue)?;
        }
        on_indexed_click(&card, "stickers", Action::TapSticker)?;
        on_indexed_click(&card, "flip-cards", Action::FlipCard)?;
        on_click(&card, "hug-btn", Action::Hug)?;
        on_click(&card, "restart-btn", Action::Restart)?;

        Ok(())
    }

    fn setup_auto_mute(card: Rc<RefCell<Card>>) -> CardResult<()> {
        if !card.borrow().settings.mute_on_blur {
            return Ok(());
        }
        let window = web_sys::window().ok_or_else(|| CardError::platform("no window"))?;
        let initially_muted = card.borrow().audio.is_muted();

        for (event, muted) in [("blur", true), ("focus", initially_muted)] {
            let card = card.clone();
            let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
                card.borrow_mut().audio.set_muted(muted);
                log::info!("Audio {} ({})", if muted { "muted" } else { "unmuted" }, event);
            });
            window
                .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
                .map_err(|_| CardError::platform(format!("listen {event} on window")))?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(card: Rc<RefCell<Card>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, card loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            card_loop(card, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn card_loop(card: Rc<RefCell<Card>>, time: f64) {
        {
            let mut c = card.borrow_mut();

            // Calculate delta time
            let dt_ms = if c.last_time > 0.0 {
                time - c.last_time
            } else {
                SIM_DT_MS as f64
            };
            c.last_time = time;

            c.update(dt_ms);
            c.render();
        }

        request_animation_frame(card);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_card::run() {
        log::error!("Celebration Card failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Celebration Card (native) starting...");
    log::info!("The card itself runs in the browser - run with `trunk serve` for the web version");

    println!("\nRunning scripted walkthrough...");
    walkthrough();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Click through every scene headlessly, logging what happens
#[cfg(not(target_arch = "wasm32"))]
fn walkthrough() {
    use celebration_card::consts::SIM_DT_MS;
    use celebration_card::sim::{Action, CardEvent, SceneId, Session, TickInput, tick};
    use celebration_card::Settings;
    use celebration_card::ui::{CardView, SceneView};

    let settings = Settings::load();
    let mut session = Session::new(settings.seed.unwrap_or(2026));

    let run = |session: &mut Session, actions: Vec<Action>, ms: u64| {
        let mut input = TickInput::with(actions);
        for _ in 0..(ms / SIM_DT_MS).max(1) {
            for event in tick(session, &input, SIM_DT_MS) {
                match event {
                    CardEvent::FireworkLaunched(_) => log::debug!("{:?}", event),
                    _ => log::info!("  {:?}", event),
                }
            }
            input.actions.clear();
        }
    };

    run(&mut session, vec![], 3_600);
    run(
        &mut session,
        vec![Action::EditName("  Friend  ".into()), Action::SubmitDraft],
        10,
    );
    run(&mut session, vec![Action::OpenEnvelope], 2_400);
    run(&mut session, vec![Action::Continue], 1_000);
    run(&mut session, vec![Action::Continue], 10);
    run(&mut session, vec![Action::TapSticker(0), Action::TapSticker(4)], 700);
    run(&mut session, vec![Action::Continue], 10);
    run(&mut session, vec![Action::FlipCard(1), Action::FlipCard(2)], 10);
    run(&mut session, vec![Action::Continue], 10);
    for _ in 0..3 {
        run(&mut session, vec![Action::Hug], 300);
    }
    run(&mut session, vec![], 2_000);

    let view = CardView::from_session(&session, &settings);
    if let SceneView::Final {
        farewell: Some(farewell),
        confetti,
        ..
    } = &view.content
    {
        println!("Farewell: {} ({} confetti pieces)", farewell.title, confetti.len());
    }

    if session.current_scene() != SceneId::Final {
        log::warn!("Walkthrough ended on {} instead of the final scene", session.current_scene());
    }
    run(&mut session, vec![Action::Restart], 10);
    println!(
        "✓ Walkthrough finished in {} ms simulated, {} transitions, back on {}",
        session.elapsed_ms,
        session.transitions,
        session.current_scene()
    );
}
