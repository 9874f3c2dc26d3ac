//! Light node - the per-node context object
//!
//! Owns the node and animation state, applies wire commands to them and
//! drives the output stage from the main loop.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::AnimationState;
use crate::color::{self, Animation, Rgb10, scale_brightness};
use crate::config::{IrConfig, NodeConfig};
use crate::ir::{IrEvent, keymap};
use crate::output::{OutputStage, PwmOutput};
use crate::protocol::{AnimationId, MasterBroadcast, NodeCommand};
use crate::state::{Mode, NodeState};

/// Side effects of a dispatched command that other nodes care about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchEffects {
    /// New mode, if the command changed it
    pub mode_changed: Option<Mode>,
}

impl DispatchEffects {
    /// Fold in the effects of a later dispatch
    pub fn merge(&mut self, later: DispatchEffects) {
        if later.mode_changed.is_some() {
            self.mode_changed = later.mode_changed;
        }
    }

    /// State byte to announce on the general call address
    pub fn broadcast(&self) -> Option<MasterBroadcast> {
        self.mode_changed
            .map(|mode| MasterBroadcast::for_animated(mode == Mode::Animated))
    }
}

/// A node driving one RGB light head
pub struct LightNode<'a, P: PwmOutput> {
    output: &'a OutputStage<P>,
    ir: IrConfig,
    state: NodeState,
    animation: AnimationState,
}

impl<'a, P: PwmOutput> LightNode<'a, P> {
    /// Create a node and show its initial state
    pub fn new(output: &'a OutputStage<P>, config: &NodeConfig) -> Self {
        let mut node = Self {
            output,
            ir: config.ir,
            state: config.initial,
            animation: AnimationState::new(),
        };
        node.output.set(node.current_color());
        if !node.state.is_on {
            node.output.halt();
        }
        node
    }

    pub const fn state(&self) -> &NodeState {
        &self.state
    }

    pub const fn animation_state(&self) -> &AnimationState {
        &self.animation
    }

    pub const fn output(&self) -> &'a OutputStage<P> {
        self.output
    }

    /// Apply one wire byte; idle and unknown bytes are ignored
    pub fn dispatch(&mut self, byte: u8) -> DispatchEffects {
        match NodeCommand::from_byte(byte) {
            Some(command) => self.apply(command),
            None => DispatchEffects::default(),
        }
    }

    /// Apply a decoded command
    pub fn apply(&mut self, command: NodeCommand) -> DispatchEffects {
        #[cfg(feature = "esp32-log")]
        println!("[LightNode] command {:?}", command);

        let mode_before = self.state.mode;
        match command {
            NodeCommand::PowerOff => self.power_off(),
            NodeCommand::PowerOn => self.power_on(),
            NodeCommand::BrightnessDown | NodeCommand::BrightnessUp => {
                let up = command == NodeCommand::BrightnessUp;
                if self.state.step_brightness(up) {
                    self.refresh_static();
                }
            }
            NodeCommand::SpeedDown | NodeCommand::SpeedUp => {
                self.state.step_speed(command == NodeCommand::SpeedUp);
            }
            NodeCommand::Animation(raw) => {
                if let Some(id) = AnimationId::from_raw(raw) {
                    self.select_animation(color::animation(id));
                }
            }
            NodeCommand::Color(index) => self.select_color(index),
            NodeCommand::SetBrightness(brightness) => {
                self.state.set_brightness(brightness);
                self.refresh_static();
            }
            NodeCommand::SetSpeed(speed) => self.state.set_speed(speed),
        }

        let mode_after = self.state.mode;
        DispatchEffects {
            mode_changed: (mode_before != mode_after).then_some(mode_after),
        }
    }

    /// Apply a remote button press, reading up/down against the local mode
    ///
    /// Frames from foreign remotes and unknown buttons yield `None`.
    pub fn handle_ir_event(&mut self, event: IrEvent) -> Option<(NodeCommand, DispatchEffects)> {
        let command = keymap::command_for(
            &event.frame(),
            self.ir.accepted_address,
            self.state.is_animated(),
        )?;
        Some((command, self.apply(command)))
    }

    /// Run the animation engine once per rollover since the last call
    ///
    /// Returns the number of ticks drained.
    pub fn service(&mut self) -> u16 {
        let ticks = self.output.take_pending_ticks();
        if self.state.is_on && self.state.is_animated() {
            for _ in 0..ticks {
                self.animate();
            }
        }
        ticks
    }

    /// Color the node should be showing right now, brightness applied
    pub fn current_color(&self) -> Rgb10 {
        let color = match (self.state.mode, self.state.animation) {
            (Mode::Animated, Some(animation)) => self.animation.sample(animation),
            _ => color::static_color(self.state.color_index).unwrap_or_default(),
        };
        scale_brightness(color, self.state.brightness)
    }

    fn animate(&mut self) {
        let Some(animation) = self.state.animation else {
            return;
        };
        let color = self.animation.advance(animation, self.state.speed);
        self.output.set(scale_brightness(color, self.state.brightness));
    }

    fn select_color(&mut self, index: u8) {
        if color::static_color(index).is_none() {
            return;
        }
        self.state.mode = Mode::Static;
        self.state.color_index = index;
        self.output.set(self.current_color());
    }

    fn select_animation(&mut self, animation: &'static Animation) {
        self.state.mode = Mode::Animated;
        self.state.animation = Some(animation);
        self.animation.reset();
    }

    fn refresh_static(&mut self) {
        if self.state.mode == Mode::Static {
            self.output.set(self.current_color());
        }
    }

    fn power_off(&mut self) {
        self.state.is_on = false;
        self.output.halt();
    }

    fn power_on(&mut self) {
        self.state.is_on = true;
        self.output.resume();
    }
}
