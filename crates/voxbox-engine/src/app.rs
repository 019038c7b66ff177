//! Session: the single owner of the world, the player and the input queue.
//!
//! Every step drains the input queue in arrival order (break and place take
//! effect as their events are drained), then advances the player controller
//! by one fixed timestep and syncs the camera.

use glam::Vec3;
use tracing::{debug, info};
use voxbox_common::VoxboxResult;
use voxbox_gameplay::{InputEvent, InputQueue, InputSender, InteractionOutcome, PlayerController, StepReport};
use voxbox_world::{Renderer, WorldGenerator, WorldStore};

use crate::config::EngineConfig;
use crate::renderer::TracingRenderer;
use crate::timing::FrameTiming;

/// Result of one simulation step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutput {
    /// Player physics outcome
    pub report: StepReport,
    /// Break/place results triggered by this step's input, in order
    pub interactions: Vec<InteractionOutcome>,
}

/// Snapshot of the session for reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    /// Simulation steps run
    pub steps: u64,
    /// Blocks in the world store
    pub blocks: usize,
    /// Live visuals in the renderer
    pub live_visuals: usize,
    /// Player position
    pub position: Vec3,
    /// Player yaw
    pub yaw: f32,
    /// Player pitch
    pub pitch: f32,
    /// Blocks broken so far
    pub broken: u32,
    /// Blocks placed so far
    pub placed: u32,
}

/// A running sandbox.
#[derive(Debug)]
pub struct Session {
    store: WorldStore,
    renderer: TracingRenderer,
    controller: PlayerController,
    queue: InputQueue,
    timing: FrameTiming,
    steps: u64,
    broken: u32,
    placed: u32,
}

impl Session {
    /// Generates a world from `config` and spawns the player on it.
    pub fn new(config: &EngineConfig) -> VoxboxResult<Self> {
        config.validate()?;

        let mut store = WorldStore::new();
        let mut renderer = TracingRenderer::new();
        let mut generator = WorldGenerator::new(config.world.clone())?;
        info!("World seed: {}", generator.seed());
        generator.generate(&mut store, &mut renderer);

        Ok(Self::with_world(config, store, renderer))
    }

    /// Starts a session on an existing world.
    #[must_use]
    pub fn with_world(
        config: &EngineConfig,
        store: WorldStore,
        mut renderer: TracingRenderer,
    ) -> Self {
        let controller = PlayerController::spawn(&store, &config.controller());
        let player = controller.player();
        renderer.set_camera_pose(player.eye(), player.yaw(), player.pitch());

        Self {
            store,
            renderer,
            controller,
            queue: InputQueue::new(),
            timing: FrameTiming::new(config.session.fixed_dt, config.session.max_frame_dt),
            steps: 0,
            broken: 0,
            placed: 0,
        }
    }

    /// Handle for feeding input events from any thread.
    #[must_use]
    pub fn input_sender(&self) -> InputSender {
        self.queue.sender()
    }

    /// Queues an input event from the owning thread.
    pub fn push_input(&self, event: InputEvent) {
        self.queue.push(event);
    }

    /// The world store.
    #[must_use]
    pub const fn store(&self) -> &WorldStore {
        &self.store
    }

    /// The renderer.
    #[must_use]
    pub const fn renderer(&self) -> &TracingRenderer {
        &self.renderer
    }

    /// The player controller.
    #[must_use]
    pub const fn controller(&self) -> &PlayerController {
        &self.controller
    }

    /// Mutable access to the player controller.
    pub fn controller_mut(&mut self) -> &mut PlayerController {
        &mut self.controller
    }

    /// Frame timing.
    #[must_use]
    pub const fn timing(&self) -> &FrameTiming {
        &self.timing
    }

    /// Runs one simulation step of `dt` seconds.
    pub fn step(&mut self, dt: f32) -> StepOutput {
        let mut interactions = Vec::new();
        for event in self.queue.drain() {
            let outcome = self.controller.handle_event(event, &mut self.store, &mut self.renderer);
            let Some(outcome) = outcome else {
                continue;
            };
            match outcome {
                InteractionOutcome::Broken { .. } => self.broken += 1,
                InteractionOutcome::Placed { .. } => self.placed += 1,
                InteractionOutcome::Missed => {},
            }
            interactions.push(outcome);
        }

        let report = self.controller.update(&self.store, &mut self.renderer, dt);
        self.steps += 1;
        StepOutput {
            report,
            interactions,
        }
    }

    /// Feeds a frame delta to the fixed-step accumulator and runs the
    /// resulting steps. Returns the number of steps run.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let steps = self.timing.accumulate(frame_dt);
        let dt = self.timing.fixed_dt();
        for _ in 0..steps {
            let output = self.step(dt);
            if !output.interactions.is_empty() {
                debug!("Step {}: {:?}", self.steps, output.interactions);
            }
        }
        steps
    }

    /// Current state for reporting.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        let player = self.controller.player();
        SessionSummary {
            steps: self.steps,
            blocks: self.store.len(),
            live_visuals: self.renderer.live_visuals(),
            position: player.position(),
            yaw: player.yaw(),
            pitch: player.pitch(),
            broken: self.broken,
            placed: self.placed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxbox_common::BlockPos;
    use voxbox_gameplay::{KeyCode, MouseButton};
    use voxbox_world::{Block, BlockType};

    fn flat_session() -> Session {
        let mut store = WorldStore::new();
        let mut renderer = TracingRenderer::new();
        for x in -4..=4 {
            for z in -4..=4 {
                store.insert(Block::new(BlockPos::new(x, 0, z), BlockType::Grass), &mut renderer);
            }
        }
        Session::with_world(&EngineConfig::default(), store, renderer)
    }

    #[test]
    fn test_new_generates_and_spawns() {
        let mut config = EngineConfig::default();
        config.world.seed = Some(99);
        config.world.width = 8;
        config.world.depth = 8;

        let session = Session::new(&config).expect("valid config");
        let report = session.summary();
        assert!(report.blocks >= 64);
        assert_eq!(report.live_visuals, report.blocks);
        assert!(session.renderer().camera().is_some());
        assert!(!session
            .store()
            .any_intersecting(&session.controller().player().aabb()));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.world.tree_probability = 2.0;
        assert!(Session::new(&config).is_err());
    }

    #[test]
    fn test_events_apply_in_order_within_a_step() {
        let mut session = flat_session();
        session.controller_mut().player_mut().set_orientation(0.0, -1.2);

        // Place then break in the same step: the break hits the new block
        session.push_input(InputEvent::LookMode(true));
        session.push_input(InputEvent::KeyDown(KeyCode::Num2));
        session.push_input(InputEvent::MouseDown(MouseButton::Right));
        session.push_input(InputEvent::MouseDown(MouseButton::Left));
        let before = session.store().len();

        let output = session.step(1.0 / 60.0);
        assert_eq!(output.interactions.len(), 2);
        match (output.interactions[0], output.interactions[1]) {
            (
                InteractionOutcome::Placed { id: a, kind, .. },
                InteractionOutcome::Broken { id: b, .. },
            ) => {
                assert_eq!(a, b);
                assert_eq!(kind, BlockType::Dirt);
            },
            other => panic!("unexpected outcomes {other:?}"),
        }
        assert_eq!(session.store().len(), before);

        let report = session.summary();
        assert_eq!((report.placed, report.broken), (1, 1));
        assert_eq!(report.live_visuals, report.blocks);
    }

    #[test]
    fn test_look_then_click_in_one_step() {
        let mut session = flat_session();

        // Looking down and clicking in the same step breaks the floor ahead
        session.push_input(InputEvent::LookMode(true));
        session.push_input(InputEvent::MouseMotion { dx: 0.0, dy: 500.0 });
        session.push_input(InputEvent::MouseDown(MouseButton::Left));
        let before = session.store().len();

        let output = session.step(1.0 / 60.0);
        assert!(matches!(
            output.interactions.as_slice(),
            [InteractionOutcome::Broken {
                pos: BlockPos { x: 0, y: 0, z: -1 },
                kind: BlockType::Grass,
                ..
            }]
        ));
        assert_eq!(session.store().len(), before - 1);
        assert!((session.controller().player().pitch() + 1.1).abs() < 1e-4);
    }

    #[test]
    fn test_advance_runs_fixed_steps() {
        let mut session = flat_session();
        assert_eq!(session.advance(0.06), 3);
        assert_eq!(session.summary().steps, 3);
        // Clamped to 0.25 s
        assert!(session.advance(5.0) <= 16);
    }

    #[test]
    fn test_sender_from_other_thread() {
        let mut session = flat_session();
        let sender = session.input_sender();
        std::thread::spawn(move || {
            sender
                .send(InputEvent::KeyDown(KeyCode::W))
                .expect("session alive");
        })
        .join()
        .expect("sender thread");

        let start = session.controller().player().position();
        for _ in 0..10 {
            session.step(1.0 / 60.0);
        }
        assert!(session.controller().player().position().z < start.z);
    }
}
