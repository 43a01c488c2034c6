//! EV3 direct-command byte vocabulary
//!
//! Opcodes, subcodes, and device type numbers from the brick firmware's
//! bytecode set. Only the subset this library issues is listed.

/// Write to a UI element (status light)
pub const OP_UI_WRITE: u8 = 0x82;
/// Button handling (simulated presses)
pub const OP_UI_BUTTON: u8 = 0x83;
/// Display drawing
pub const OP_UI_DRAW: u8 = 0x84;
/// Sound playback
pub const OP_SOUND: u8 = 0x94;
/// Read an input device
pub const OP_INPUT_DEVICE: u8 = 0x99;
/// Stop one or more motors
pub const OP_OUTPUT_STOP: u8 = 0xA3;
/// Set motor speed with regulation
pub const OP_OUTPUT_SPEED: u8 = 0xA5;
/// Start one or more motors
pub const OP_OUTPUT_START: u8 = 0xA6;
/// Query brick information
pub const OP_COM_GET: u8 = 0xD3;

/// `OP_UI_WRITE` subcode: status-light pattern
pub const UI_WRITE_LED: u8 = 0x1B;

/// `OP_UI_DRAW` subcode: flush drawing operations to the screen
pub const UI_DRAW_UPDATE: u8 = 0x00;
/// `OP_UI_DRAW` subcode: draw a line
pub const UI_DRAW_LINE: u8 = 0x03;
/// `OP_UI_DRAW` subcode: enable/disable the status top line
pub const UI_DRAW_TOPLINE: u8 = 0x12;
/// `OP_UI_DRAW` subcode: fill the whole window with a color
pub const UI_DRAW_FILLWINDOW: u8 = 0x13;
/// `OP_UI_DRAW` subcode: draw a bitmap file
pub const UI_DRAW_BMPFILE: u8 = 0x1C;

/// `OP_UI_BUTTON` subcode: block until the press is processed
pub const UI_BUTTON_WAIT_FOR_PRESS: u8 = 0x03;
/// `OP_UI_BUTTON` subcode: inject a button press
pub const UI_BUTTON_PRESS: u8 = 0x05;

/// `OP_SOUND` subcode: stop all playback
pub const SOUND_BREAK: u8 = 0x00;
/// `OP_SOUND` subcode: play a tone
pub const SOUND_TONE: u8 = 0x01;
/// `OP_SOUND` subcode: play a sound file once
pub const SOUND_PLAY: u8 = 0x02;
/// `OP_SOUND` subcode: play a sound file on repeat
pub const SOUND_REPEAT: u8 = 0x03;

/// `OP_INPUT_DEVICE` subcode: read raw values
pub const INPUT_READY_RAW: u8 = 0x1C;
/// `OP_INPUT_DEVICE` subcode: read SI-unit values
pub const INPUT_READY_SI: u8 = 0x1D;

/// `OP_COM_GET` subcode: query the brick name
pub const COM_GET_BRICKNAME: u8 = 0x0D;

/// Device type number of the large motor
pub const TYPE_LARGE_MOTOR: u8 = 7;
/// Device type number of the medium motor
pub const TYPE_MEDIUM_MOTOR: u8 = 8;
/// Device type number of the touch sensor
pub const TYPE_TOUCH_SENSOR: u8 = 16;
/// Device type number of the color sensor
pub const TYPE_COLOR_SENSOR: u8 = 29;
/// Device type number of the infrared sensor
pub const TYPE_INFRARED_SENSOR: u8 = 33;
