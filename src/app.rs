//! Frame loop
//!
//! [`Game`] owns one run plus everything around it (storage, audio, frame
//! clock). Each frame: accumulate time, run the due ticks, react to the
//! events they produced, then draw.

use crate::audio::{AudioManager, SoundEffect};
use crate::highscores::HighScore;
use crate::persistence::Storage;
use crate::platform::{Command, FpsCounter, FrameClock};
use crate::renderer::{Canvas, FrameStats, render};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, RunState, TickInput, tick};

/// Game instance holding all state
pub struct Game {
    state: RunState,
    storage: Box<dyn Storage>,
    high_score: HighScore,
    settings: Settings,
    audio: AudioManager,
    clock: FrameClock,
    fps: FpsCounter,
    input: TickInput,
    running: bool,
}

impl Game {
    /// Load the stored best score and settings, and wait on the title screen
    pub fn new(seed: u64, storage: Box<dyn Storage>) -> Self {
        let high_score = HighScore::load(storage.as_ref());
        let settings = Settings::load(storage.as_ref());
        let audio = AudioManager::new(&settings);
        log::info!("Game initialized with seed: {}", seed);

        Self {
            state: RunState::new(seed, high_score.best()),
            storage,
            high_score,
            settings,
            audio,
            clock: FrameClock::new(),
            fps: FpsCounter::new(),
            input: TickInput::default(),
            running: true,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Replace and persist the settings
    pub fn set_settings(&mut self, settings: Settings) {
        self.audio.apply_settings(&settings);
        if let Err(e) = settings.save(self.storage.as_mut()) {
            log::warn!("Could not save settings: {}", e);
        }
        self.settings = settings;
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Jump => self.jump(),
            Command::Start => self.start(),
            Command::Pause => self.toggle_pause(),
            Command::ToggleAutopilot => self.toggle_autopilot(),
        }
    }

    pub fn jump(&mut self) {
        self.audio.resume();
        self.input.jump = true;
    }

    /// Start or restart; ignored mid-run
    pub fn start(&mut self) {
        self.audio.resume();
        self.input.start = true;
    }

    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    pub fn toggle_autopilot(&mut self) {
        self.input.autopilot = !self.input.autopilot;
        log::info!("Autopilot: {}", self.input.autopilot);
    }

    pub fn autopilot(&self) -> bool {
        self.input.autopilot
    }

    /// Pause if a run is in progress (tab hidden, window blur)
    pub fn auto_pause(&mut self, reason: &str) {
        if self.state.phase == GamePhase::Running && !self.input.pause {
            self.input.pause = true;
            log::info!("Auto-paused ({})", reason);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the loop; later frames do nothing
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("Game loop stopped");
        }
    }

    /// Run simulation ticks for a frame at `now_ms`; returns ticks run
    pub fn update(&mut self, now_ms: f64) -> u32 {
        if !self.running {
            return 0;
        }
        self.fps.record(now_ms);

        let ticks = self.clock.advance(now_ms);
        for _ in 0..ticks {
            tick(&mut self.state, &self.input);

            // Clear one-shot inputs after processing
            self.input.jump = false;
            self.input.start = false;
            self.input.pause = false;
        }

        if let Err(violation) = self.state.check_invariants() {
            if cfg!(debug_assertions) {
                panic!("Run invariant broken: {}", violation);
            }
            log::error!("Run invariant broken: {}", violation);
        }

        for event in self.state.drain_events() {
            self.dispatch(event);
        }
        ticks
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::Started => {}
            GameEvent::Jumped => self.audio.play(SoundEffect::Jump),
            GameEvent::Crashed { .. } => self.audio.play(SoundEffect::Collision),
            GameEvent::NewHighScore(score) => {
                if self.high_score.record(score) {
                    log::info!("New high score: {}", score);
                    if let Err(e) = self.high_score.save(self.storage.as_mut()) {
                        log::warn!("Could not save high score: {}", e);
                    }
                }
            }
        }
    }

    /// Draw the current state
    pub fn render<C: Canvas>(&self, canvas: &mut C) {
        let stats = FrameStats {
            fps: self.fps.fps(),
        };
        render(&self.state, &self.settings, &stats, canvas);
    }

    /// One animation frame. Returns false once the loop has been stopped.
    pub fn frame<C: Canvas>(&mut self, now_ms: f64, canvas: &mut C) -> bool {
        if !self.running {
            return false;
        }
        self.update(now_ms);
        self.render(canvas);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::STORAGE_KEY;
    use crate::persistence::MemoryStorage;
    use crate::renderer::DisplayList;
    use crate::sim::ObstacleKind;

    struct Harness {
        game: Game,
        canvas: DisplayList,
        now: f64,
    }

    impl Harness {
        fn new(storage: MemoryStorage) -> Self {
            Self {
                game: Game::new(7, Box::new(storage)),
                canvas: DisplayList::new(),
                now: 0.0,
            }
        }

        /// Step frames until at least `ticks` ticks have run
        fn run_ticks(&mut self, ticks: u32) {
            let mut done = 0;
            while done < ticks {
                self.canvas.clear();
                self.now += 1000.0 / 60.0;
                done += self.game.update(self.now);
                self.game.render(&mut self.canvas);
            }
        }
    }

    #[test]
    fn test_loads_stored_high_score() {
        let h = Harness::new(MemoryStorage::with_value(STORAGE_KEY, "250"));
        assert_eq!(h.game.high_score(), 250);
        assert_eq!(h.game.state().high_score, 250);
        assert_eq!(h.game.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_unavailable_storage_still_plays() {
        let mut h = Harness::new(MemoryStorage::unavailable());
        assert_eq!(h.game.high_score(), 0);
        h.game.start();
        h.run_ticks(1);
        assert_eq!(h.game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_title_then_start() {
        let mut h = Harness::new(MemoryStorage::new());
        h.run_ticks(5);
        assert_eq!(h.game.phase(), GamePhase::NotStarted);
        assert!(h.canvas.contains_text("DINO RUNNER"));

        h.game.start();
        h.run_ticks(10);
        assert_eq!(h.game.phase(), GamePhase::Running);
        assert!(h.canvas.contains_text("Score:"));
    }

    #[test]
    fn test_one_shot_inputs_are_consumed() {
        let mut h = Harness::new(MemoryStorage::new());
        h.game.start();
        h.run_ticks(1);
        h.game.state.spawn_obstacles = false;

        h.game.jump();
        h.run_ticks(1);
        assert!(h.game.state().player.jumping);
        h.run_ticks(60);
        assert!(h.game.state().player.is_grounded());
    }

    #[test]
    fn test_crash_saves_new_high_score() {
        let mut h = Harness::new(MemoryStorage::new());
        h.game.start();
        h.run_ticks(1);
        h.game.state.push_obstacle(70.0, ObstacleKind::Cactus);
        h.run_ticks(3);

        assert_eq!(h.game.phase(), GamePhase::GameOver);
        assert_eq!(h.game.high_score(), h.game.state().score);
        let stored = h.game.storage().get(STORAGE_KEY).unwrap();
        assert_eq!(stored, Some(h.game.state().score.to_string()));
        assert!(h.canvas.contains_text("GAME OVER"));
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut h = Harness::new(MemoryStorage::with_value(STORAGE_KEY, "900"));
        h.game.start();
        h.run_ticks(1);
        h.game.state.push_obstacle(70.0, ObstacleKind::Bird);
        h.run_ticks(2);
        assert_eq!(h.game.phase(), GamePhase::GameOver);
        // Lower score leaves the stored value alone
        assert_eq!(
            h.game.storage().get(STORAGE_KEY).unwrap().as_deref(),
            Some("900")
        );

        h.game.start();
        h.run_ticks(1);
        assert_eq!(h.game.phase(), GamePhase::Running);
        assert!(h.game.state().obstacles.is_empty());
        assert_eq!(h.game.state().high_score, 900);
    }

    #[test]
    fn test_auto_pause_only_while_running() {
        let mut h = Harness::new(MemoryStorage::new());
        h.game.auto_pause("test");
        h.run_ticks(1);
        assert_eq!(h.game.phase(), GamePhase::NotStarted);

        h.game.start();
        h.run_ticks(1);
        h.game.auto_pause("test");
        // A second trigger in the same frame must not toggle back
        h.game.auto_pause("test");
        h.run_ticks(1);
        assert_eq!(h.game.phase(), GamePhase::Paused);
        assert!(h.canvas.contains_text("PAUSED"));

        h.game.toggle_pause();
        h.run_ticks(1);
        assert_eq!(h.game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_stop_halts_frames() {
        let mut h = Harness::new(MemoryStorage::new());
        h.game.start();
        assert!(h.game.frame(0.0, &mut h.canvas));
        h.game.stop();
        assert!(!h.game.is_running());

        let score = h.game.state().score;
        h.canvas.clear();
        assert!(!h.game.frame(1_000.0, &mut h.canvas));
        assert_eq!(h.game.update(2_000.0), 0);
        assert_eq!(h.game.state().score, score);
        assert!(h.canvas.is_empty());
    }

    #[test]
    fn test_settings_are_persisted() {
        let mut h = Harness::new(MemoryStorage::new());
        let settings = Settings {
            show_fps: false,
            ..Default::default()
        };
        h.game.set_settings(settings.clone());
        assert_eq!(Settings::load(h.game.storage()), settings);

        h.run_ticks(1);
        assert!(!h.canvas.contains_text("FPS"));
    }

    #[test]
    fn test_autopilot_plays_unattended() {
        let mut h = Harness::new(MemoryStorage::new());
        h.game.handle(Command::ToggleAutopilot);
        assert!(h.game.autopilot());
        h.game.handle(Command::Start);
        h.run_ticks(1200);
        assert_eq!(h.game.phase(), GamePhase::Running);
        assert!(h.game.state().score >= 1199);
    }
}
