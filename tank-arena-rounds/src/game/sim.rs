//! Headless Simulation
//!
//! In-memory collaborators for running the round controller without an
//! engine, plus a seeded skirmish that knocks tanks out at random moments.
//! Used by the demo binary and by tests.

use std::time::Duration;

use tracing::{debug, trace};

use crate::core::hash::StateHash;
use crate::core::rng::DeterministicRng;
use crate::game::arena::{ActorHandle, Arena, CameraRig, Presentation, SpawnPoint, TimerColor};
use crate::game::config::GameConfig;
use crate::game::controller::{ControllerError, RoundController};
use crate::game::events::{GameEvent, GameEventData};
use crate::game::player::PlayerSetup;
use crate::game::state::GameOutcome;
use crate::TICK_RATE;

// =============================================================================
// ARENA
// =============================================================================

/// A tank in the simulated arena.
#[derive(Clone, Debug)]
pub struct SimActor {
    /// Where it respawns.
    pub spawn: SpawnPoint,
    /// Still in the fight.
    pub alive: bool,
    /// Accepting player input.
    pub controlled: bool,
    /// Times it has been reset.
    pub resets: u32,
}

/// Arena that only tracks liveness and control.
///
/// Handles index straight into the actor list; an unknown handle is a bug in
/// the caller and panics.
#[derive(Clone, Debug, Default)]
pub struct SimArena {
    actors: Vec<SimActor>,
}

impl SimArena {
    /// Empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Knock a tank out.
    pub fn destroy(&mut self, actor: ActorHandle) {
        self.actors[actor.0 as usize].alive = false;
    }

    /// Number of spawned tanks.
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Whether the tank accepts input.
    pub fn is_controlled(&self, actor: ActorHandle) -> bool {
        self.actors[actor.0 as usize].controlled
    }

    /// Times the tank has been reset.
    pub fn resets(&self, actor: ActorHandle) -> u32 {
        self.actors[actor.0 as usize].resets
    }

    /// Handles of tanks still alive.
    pub fn live_actors(&self) -> Vec<ActorHandle> {
        self.actors
            .iter()
            .enumerate()
            .filter(|(_, a)| a.alive)
            .map(|(i, _)| ActorHandle(i as u32))
            .collect()
    }

    /// True while every live tank is under player control.
    pub fn fighting(&self) -> bool {
        let mut live = self.actors.iter().filter(|a| a.alive).peekable();
        live.peek().is_some() && live.all(|a| a.controlled)
    }
}

impl Arena for SimArena {
    fn spawn(&mut self, spawn: &SpawnPoint) -> ActorHandle {
        let handle = ActorHandle(self.actors.len() as u32);
        self.actors.push(SimActor {
            spawn: *spawn,
            alive: true,
            controlled: false,
            resets: 0,
        });
        handle
    }

    fn reset(&mut self, actor: ActorHandle) {
        let a = &mut self.actors[actor.0 as usize];
        a.alive = true;
        a.resets += 1;
    }

    fn enable_control(&mut self, actor: ActorHandle) {
        self.actors[actor.0 as usize].controlled = true;
    }

    fn disable_control(&mut self, actor: ActorHandle) {
        self.actors[actor.0 as usize].controlled = false;
    }

    fn is_alive(&self, actor: ActorHandle) -> bool {
        self.actors[actor.0 as usize].alive
    }
}

// =============================================================================
// CAMERA & PRESENTATION
// =============================================================================

/// Camera that records what it was asked to do.
#[derive(Clone, Debug, Default)]
pub struct SimCamera {
    /// Current targets.
    pub targets: Vec<ActorHandle>,
    /// Times the framing was snapped.
    pub snaps: u32,
}

impl CameraRig for SimCamera {
    fn set_targets(&mut self, targets: &[ActorHandle]) {
        self.targets = targets.to_vec();
    }

    fn snap_to_start(&mut self) {
        self.snaps += 1;
    }
}

/// Presentation sink that keeps the latest text and a message history.
#[derive(Clone, Debug, Default)]
pub struct SimPresentation {
    /// Current status message.
    pub message: String,
    /// Every message published, in order.
    pub message_log: Vec<String>,
    /// Current timer text.
    pub timer: String,
    /// Current timer color.
    pub timer_color: Option<TimerColor>,
}

impl Presentation for SimPresentation {
    fn set_message(&mut self, text: &str) {
        if !text.is_empty() {
            debug!("message: {}", text.lines().next().unwrap_or_default());
        }
        self.message = text.to_string();
        self.message_log.push(self.message.clone());
    }

    fn set_timer(&mut self, text: &str, color: TimerColor) {
        trace!("timer: {} ({:?})", text, color);
        self.timer = text.to_string();
        self.timer_color = Some(color);
    }
}

// =============================================================================
// SKIRMISH
// =============================================================================

/// Random knockouts while tanks are fighting.
#[derive(Clone, Debug)]
pub struct Skirmish {
    rng: DeterministicRng,
    /// Shortest fight, in ticks.
    pub min_fight_ticks: u32,
    /// Longest fight, in ticks.
    pub max_fight_ticks: u32,
    /// Chance that a fight ends with both tanks destroyed.
    pub draw_per_mille: u32,
    countdown: Option<u32>,
}

impl Skirmish {
    /// Seeded skirmish with fights lasting 2 to 20 seconds at the tick rate.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: DeterministicRng::new(seed),
            min_fight_ticks: 2 * TICK_RATE,
            max_fight_ticks: 20 * TICK_RATE,
            draw_per_mille: 100,
            countdown: None,
        }
    }

    /// Advance one tick, possibly destroying tanks.
    pub fn step(&mut self, arena: &mut SimArena) {
        if !arena.fighting() {
            self.countdown = None;
            return;
        }

        let remaining = match self.countdown {
            Some(ticks) => ticks,
            None => self
                .rng
                .next_int_range(self.min_fight_ticks, self.max_fight_ticks),
        };

        if remaining > 0 {
            self.countdown = Some(remaining - 1);
            return;
        }
        self.countdown = None;

        let live = arena.live_actors();
        if self.rng.chance_per_mille(self.draw_per_mille) {
            for actor in live {
                arena.destroy(actor);
            }
        } else if let Some(i) = self.rng.choose_index(live.len()) {
            arena.destroy(live[i]);
        }
    }
}

// =============================================================================
// HEADLESS RUN
// =============================================================================

/// Controller wired to the simulated collaborators.
pub type SimController = RoundController<SimArena, SimCamera, SimPresentation>;

/// Summary of a headless game.
#[derive(Clone, Debug)]
pub struct HeadlessRun {
    /// Every event, in order.
    pub events: Vec<GameEvent>,
    /// How the game ended, if it did within the frame budget.
    pub outcome: Option<GameOutcome>,
    /// State hash on the frame the game ended (or the last frame).
    pub final_hash: StateHash,
    /// Frames simulated.
    pub frames: u64,
}

/// Build a controller for the default duel.
pub fn sim_controller(config: GameConfig) -> Result<SimController, ControllerError> {
    RoundController::new(
        config,
        &PlayerSetup::duel(),
        SimArena::new(),
        SimCamera::default(),
        SimPresentation::default(),
    )
}

/// Play one game at the fixed tick rate until it ends or `max_frames` run out.
pub fn run_headless(
    config: GameConfig,
    seed: u64,
    max_frames: u64,
) -> Result<HeadlessRun, ControllerError> {
    let mut controller = sim_controller(config)?;
    let mut skirmish = Skirmish::new(seed);
    let dt = Duration::from_secs(1) / TICK_RATE;

    let mut events = Vec::new();
    let mut frames = 0;

    while frames < max_frames {
        skirmish.step(controller.arena_mut());
        let result = controller.tick(dt);
        frames += 1;

        let ended = result
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::GameEnded { .. }));
        events.extend(result.events);

        if ended {
            break;
        }
    }

    Ok(HeadlessRun {
        events,
        outcome: controller.outcome(),
        final_hash: controller.compute_hash(),
        frames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_lifecycle() {
        let mut arena = SimArena::new();
        let a = arena.spawn(&SpawnPoint::new([0.0, 0.0, 0.0], 0.0));
        let b = arena.spawn(&SpawnPoint::new([1.0, 0.0, 0.0], 180.0));

        assert!(!arena.fighting());
        arena.enable_control(a);
        arena.enable_control(b);
        assert!(arena.fighting());

        arena.destroy(b);
        assert_eq!(arena.live_actors(), vec![a]);
        assert!(!arena.is_alive(b));

        arena.reset(b);
        assert!(arena.is_alive(b));
        assert_eq!(arena.resets(b), 1);
    }

    #[test]
    #[should_panic]
    fn test_unknown_handle_fails_fast() {
        let arena = SimArena::new();
        arena.is_alive(ActorHandle(3));
    }

    #[test]
    fn test_skirmish_waits_for_control() {
        let mut arena = SimArena::new();
        let a = arena.spawn(&SpawnPoint::new([0.0, 0.0, 0.0], 0.0));
        let b = arena.spawn(&SpawnPoint::new([1.0, 0.0, 0.0], 0.0));
        let mut skirmish = Skirmish::new(1);

        for _ in 0..10_000 {
            skirmish.step(&mut arena);
        }
        assert!(arena.is_alive(a) && arena.is_alive(b));
    }

    #[test]
    fn test_skirmish_ends_fight() {
        let mut arena = SimArena::new();
        let a = arena.spawn(&SpawnPoint::new([0.0, 0.0, 0.0], 0.0));
        let b = arena.spawn(&SpawnPoint::new([1.0, 0.0, 0.0], 0.0));
        arena.enable_control(a);
        arena.enable_control(b);

        let mut skirmish = Skirmish::new(99);
        for _ in 0..=skirmish.max_fight_ticks {
            skirmish.step(&mut arena);
        }
        assert!(arena.live_actors().len() <= 1);
    }

    #[test]
    fn test_headless_game_finishes() {
        let run = run_headless(GameConfig::default(), 12345, 60 * 60 * 10).unwrap();

        let outcome = run.outcome.expect("game should end within the frame budget");
        assert!(matches!(
            run.events.last().map(|e| &e.data),
            Some(GameEventData::GameEnded { .. })
        ));
        assert!(run
            .events
            .iter()
            .any(|e| e.data == GameEventData::RoundStarted { round: 1 }));

        if let GameOutcome::Winner { player, .. } = outcome {
            assert!(player.number() == 1 || player.number() == 2);
        }
    }

    #[test]
    fn test_headless_is_deterministic() {
        let config = GameConfig { max_game_time_secs: 90.0, ..GameConfig::default() };

        let a = run_headless(config.clone(), 777, 60 * 60 * 5).unwrap();
        let b = run_headless(config, 777, 60 * 60 * 5).unwrap();

        assert_eq!(a.final_hash, b.final_hash);
        assert_eq!(a.events, b.events);
        assert_eq!(a.frames, b.frames);
    }

    #[test]
    fn test_short_clock_times_out() {
        let config = GameConfig { max_game_time_secs: 1.0, ..GameConfig::default() };
        let run = run_headless(config, 5, 600).unwrap();

        assert_eq!(run.outcome, Some(GameOutcome::Timeout));
    }
}
