//! Single-byte wire protocol shared by every node on the bus.
//!
//! ```text
//! 00000000  idle / no command
//! 00000010  power off          00000011  power on
//! 00000100  brightness down    00000101  brightness up
//! 00000110  speed down         00000111  speed up
//! 0001xxxx  select animation xxxx
//! 001xxxxx  select static color xxxxx
//! 10xxxxxx  set brightness to xxxxxx
//! 11xxxxxx  set speed to xxxxxx
//! ```
//!
//! Every other pattern is unused and decodes to nothing.

/// Reserved "nothing to report" byte.
pub const COMMAND_IDLE: u8 = 0x00;

const COMMAND_POWER_OFF: u8 = 0x02;
const COMMAND_POWER_ON: u8 = 0x03;
const COMMAND_BRIGHTNESS_DOWN: u8 = 0x04;
const COMMAND_BRIGHTNESS_UP: u8 = 0x05;
const COMMAND_SPEED_DOWN: u8 = 0x06;
const COMMAND_SPEED_UP: u8 = 0x07;

const ANIMATION_PREFIX: u8 = 0x10;
const ANIMATION_MASK: u8 = 0x0f;
const COLOR_PREFIX: u8 = 0x20;
const COLOR_MASK: u8 = 0x1f;
const BRIGHTNESS_PREFIX: u8 = 0x80;
const SPEED_PREFIX: u8 = 0xc0;
const VALUE_MASK: u8 = 0x3f;

/// General call address, accepted by every responder.
pub const GENERAL_CALL_ADDRESS: u8 = 0x00;

/// First 7-bit address probed during discovery.
pub const SCAN_FIRST_ADDRESS: u8 = 0x08;

/// Last 7-bit address probed during discovery.
pub const SCAN_LAST_ADDRESS: u8 = 0x77;

const ANIMATION_ID_FLASH: u8 = 0;
const ANIMATION_ID_STROBE: u8 = 1;
const ANIMATION_ID_FADE: u8 = 2;
const ANIMATION_ID_SMOOTH: u8 = 3;

/// Predefined animations addressable over the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AnimationId {
    Flash = ANIMATION_ID_FLASH,
    Strobe = ANIMATION_ID_STROBE,
    Fade = ANIMATION_ID_FADE,
    Smooth = ANIMATION_ID_SMOOTH,
}

impl AnimationId {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            ANIMATION_ID_FLASH => Self::Flash,
            ANIMATION_ID_STROBE => Self::Strobe,
            ANIMATION_ID_FADE => Self::Fade,
            ANIMATION_ID_SMOOTH => Self::Smooth,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flash => "flash",
            Self::Strobe => "strobe",
            Self::Fade => "fade",
            Self::Smooth => "smooth",
        }
    }
}

/// A decoded command byte.
///
/// `Animation` and `Color` carry the raw field; whether the index names
/// something is decided by the node that applies it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeCommand {
    PowerOff,
    PowerOn,
    BrightnessDown,
    BrightnessUp,
    SpeedDown,
    SpeedUp,
    /// Select animation by 4-bit id
    Animation(u8),
    /// Select static color by 5-bit index
    Color(u8),
    /// Absolute brightness, 6 bits
    SetBrightness(u8),
    /// Absolute speed, 6 bits
    SetSpeed(u8),
}

impl NodeCommand {
    /// Decode a wire byte. Idle and unused patterns yield `None`.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            COMMAND_POWER_OFF => Self::PowerOff,
            COMMAND_POWER_ON => Self::PowerOn,
            COMMAND_BRIGHTNESS_DOWN => Self::BrightnessDown,
            COMMAND_BRIGHTNESS_UP => Self::BrightnessUp,
            COMMAND_SPEED_DOWN => Self::SpeedDown,
            COMMAND_SPEED_UP => Self::SpeedUp,
            0x10..=0x1f => Self::Animation(byte & ANIMATION_MASK),
            0x20..=0x3f => Self::Color(byte & COLOR_MASK),
            0x80..=0xbf => Self::SetBrightness(byte & VALUE_MASK),
            0xc0..=0xff => Self::SetSpeed(byte & VALUE_MASK),
            _ => return None,
        })
    }

    /// Encode to a wire byte. Field values are masked to their width.
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::PowerOff => COMMAND_POWER_OFF,
            Self::PowerOn => COMMAND_POWER_ON,
            Self::BrightnessDown => COMMAND_BRIGHTNESS_DOWN,
            Self::BrightnessUp => COMMAND_BRIGHTNESS_UP,
            Self::SpeedDown => COMMAND_SPEED_DOWN,
            Self::SpeedUp => COMMAND_SPEED_UP,
            Self::Animation(id) => ANIMATION_PREFIX | (id & ANIMATION_MASK),
            Self::Color(index) => COLOR_PREFIX | (index & COLOR_MASK),
            Self::SetBrightness(value) => BRIGHTNESS_PREFIX | (value & VALUE_MASK),
            Self::SetSpeed(value) => SPEED_PREFIX | (value & VALUE_MASK),
        }
    }

    pub const fn select_animation(id: AnimationId) -> Self {
        Self::Animation(id as u8)
    }
}

impl From<NodeCommand> for u8 {
    fn from(command: NodeCommand) -> Self {
        command.to_byte()
    }
}

const BROADCAST_ANIMATION_OFF: u8 = 0x01;
const BROADCAST_ANIMATION_ON: u8 = 0x02;

/// State bytes the coordinator writes to the general call address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum MasterBroadcast {
    AnimationOff = BROADCAST_ANIMATION_OFF,
    AnimationOn = BROADCAST_ANIMATION_ON,
}

impl MasterBroadcast {
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            BROADCAST_ANIMATION_OFF => Some(Self::AnimationOff),
            BROADCAST_ANIMATION_ON => Some(Self::AnimationOn),
            _ => None,
        }
    }

    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    /// Broadcast announcing the given animated state.
    pub const fn for_animated(animated: bool) -> Self {
        if animated {
            Self::AnimationOn
        } else {
            Self::AnimationOff
        }
    }
}
