//! Player controller: ties input, physics, hotbar and interaction together.

use serde::{Deserialize, Serialize};
use voxbox_world::{Renderer, WorldStore};

use crate::hotbar::Hotbar;
use crate::input::{Command, InputEvent, InputState};
use crate::interaction::{BlockInteractor, InteractionConfig, InteractionOutcome};
use crate::physics::{PhysicsConfig, PlayerPhysics, StepReport};
use crate::player::{Player, PlayerConfig};

/// Mouse-look configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Radians of rotation per pixel of mouse motion
    pub sensitivity: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.0022,
        }
    }
}

/// Everything the controller needs to be built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerConfig {
    /// Player shape
    pub player: PlayerConfig,
    /// Movement physics
    pub physics: PhysicsConfig,
    /// Hotbar and reach
    pub interaction: InteractionConfig,
    /// Mouse look
    pub look: LookConfig,
}

/// Per-frame player state machine.
#[derive(Debug)]
pub struct PlayerController {
    player: Player,
    input: InputState,
    hotbar: Hotbar,
    physics: PlayerPhysics,
    interactor: BlockInteractor,
    look: LookConfig,
}

impl PlayerController {
    /// Spawns the player on the given world.
    #[must_use]
    pub fn spawn(store: &WorldStore, config: &ControllerConfig) -> Self {
        Self {
            player: Player::spawn(store, config.player),
            input: InputState::new(),
            hotbar: config.interaction.build_hotbar(),
            physics: PlayerPhysics::with_config(config.physics),
            interactor: BlockInteractor::new(&config.interaction),
            look: config.look,
        }
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable access to the player.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Current input snapshot.
    #[must_use]
    pub const fn input(&self) -> &InputState {
        &self.input
    }

    /// The hotbar.
    #[must_use]
    pub const fn hotbar(&self) -> &Hotbar {
        &self.hotbar
    }

    /// The physics system.
    #[must_use]
    pub const fn physics(&self) -> &PlayerPhysics {
        &self.physics
    }

    /// The break/place interactor.
    #[must_use]
    pub const fn interactor(&self) -> &BlockInteractor {
        &self.interactor
    }

    /// Applies one input event.
    ///
    /// Mouse motion turns the player right away, so a break or place later
    /// in the same batch casts along the updated view.
    pub fn handle_event<R: Renderer + ?Sized>(
        &mut self,
        event: InputEvent,
        store: &mut WorldStore,
        renderer: &mut R,
    ) -> Option<InteractionOutcome> {
        let command = self.input.apply(event);
        self.apply_look();
        match command? {
            Command::SelectSlot(digit) => {
                self.hotbar.select_digit(digit);
                None
            },
            Command::Break => Some(self.interactor.break_block(store, renderer, &self.player)),
            Command::Place => Some(self.interactor.place_block(
                store,
                renderer,
                &self.player,
                self.hotbar.selected_type(),
            )),
        }
    }

    /// Runs one simulation step and pushes the camera pose to the renderer.
    pub fn update<R: Renderer + ?Sized>(
        &mut self,
        store: &WorldStore,
        renderer: &mut R,
        dt: f32,
    ) -> StepReport {
        self.apply_look();

        let intent = self.input.movement();
        let report = self.physics.step(&mut self.player, &intent, store, dt);

        renderer.set_camera_pose(self.player.eye(), self.player.yaw(), self.player.pitch());
        report
    }

    fn apply_look(&mut self) {
        let delta = self.input.take_look_delta();
        self.player.rotate(delta, self.look.sensitivity);
    }
}
