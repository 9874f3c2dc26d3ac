//! Button layout of the bundled 24-key remote
//!
//! Codes 0 and 1 are the up/down keys: they adjust speed while the lights
//! animate and brightness otherwise. Colors are arranged by column on the
//! remote, so the code order interleaves the color table rows.

use super::decoder::DecodedFrame;
use crate::protocol::{AnimationId, NodeCommand};

#[derive(Clone, Copy)]
enum Key {
    Up,
    Down,
    Fixed(NodeCommand),
}

const fn color(index: u8) -> Key {
    Key::Fixed(NodeCommand::Color(index))
}

const fn animation(id: AnimationId) -> Key {
    Key::Fixed(NodeCommand::select_animation(id))
}

const KEYS: [Key; 24] = [
    Key::Up,
    Key::Down,
    Key::Fixed(NodeCommand::PowerOff),
    Key::Fixed(NodeCommand::PowerOn),
    color(0),
    color(5),
    color(10),
    color(15),
    color(1),
    color(6),
    color(11),
    animation(AnimationId::Flash),
    color(2),
    color(7),
    color(12),
    animation(AnimationId::Strobe),
    color(3),
    color(8),
    color(13),
    animation(AnimationId::Fade),
    color(4),
    color(9),
    color(14),
    animation(AnimationId::Smooth),
];

/// Translate a remote button code
///
/// `animated` picks what the up/down keys adjust.
pub fn translate(code: u8, animated: bool) -> Option<NodeCommand> {
    let key = KEYS.get(usize::from(code))?;
    Some(match (*key, animated) {
        (Key::Up, true) => NodeCommand::SpeedUp,
        (Key::Up, false) => NodeCommand::BrightnessUp,
        (Key::Down, true) => NodeCommand::SpeedDown,
        (Key::Down, false) => NodeCommand::BrightnessDown,
        (Key::Fixed(command), _) => command,
    })
}

/// Translate a frame, ignoring frames for other remotes
pub fn command_for(
    frame: &DecodedFrame,
    accepted_address: u16,
    animated: bool,
) -> Option<NodeCommand> {
    if frame.address != accepted_address {
        return None;
    }
    translate(frame.command, animated)
}
