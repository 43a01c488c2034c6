//! End-to-end tests over a scripted transport: assert the exact op bytes
//! each operation emits and feed back canned reply buffers.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use openbrick_core::brick::{Brick, LightColor, LightEffect};
use openbrick_core::error::DeviceError;
use openbrick_core::motor::{Motor, MotorKind};
use openbrick_core::ports::{MotorPort, SensorPort};
use openbrick_core::protocol::{ProtocolError, Transport};
use openbrick_core::sensor::{BeaconButton, BeaconChannel, Color, ColorSensor, InfraredSensor, TouchSensor};

/// Everything the brick sent, in order.
#[derive(Default)]
struct TransportLog {
    calls: Vec<(Vec<u8>, u16)>,
}

impl TransportLog {
    fn ops(&self, index: usize) -> &[u8] {
        &self.calls[index].0
    }

    fn reply_len(&self, index: usize) -> u16 {
        self.calls[index].1
    }
}

/// Records every send and serves scripted reply buffers for replied sends.
struct ScriptedTransport {
    log: Rc<RefCell<TransportLog>>,
    replies: VecDeque<Vec<u8>>,
}

impl Transport for ScriptedTransport {
    fn send_direct_command(
        &mut self,
        ops: &[u8],
        reply_len: u16,
    ) -> Result<Vec<u8>, ProtocolError> {
        self.log.borrow_mut().calls.push((ops.to_vec(), reply_len));
        if reply_len == 0 {
            return Ok(Vec::new());
        }
        self.replies.pop_front().ok_or(ProtocolError::ReplyTooShort {
            expected: reply_len as usize,
            actual: 0,
        })
    }
}

fn scripted(replies: Vec<Vec<u8>>) -> (Brick, Rc<RefCell<TransportLog>>) {
    let log = Rc::new(RefCell::new(TransportLog::default()));
    let transport = ScriptedTransport {
        log: Rc::clone(&log),
        replies: replies.into(),
    };
    (Brick::with_transport(Box::new(transport)), log)
}

fn float_buffer(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn int_buffer(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

#[test]
fn rotate_emits_speed_and_start_as_one_message() {
    let (brick, log) = scripted(vec![]);
    let motor = Motor::large(&brick, MotorPort::C);
    motor.rotate(50).unwrap();

    let log = log.borrow();
    assert_eq!(
        log.ops(0),
        &[0xA5, 0x00, 0x04, 0x81, 50, 0xA6, 0x00, 0x04]
    );
    assert_eq!(log.reply_len(0), 0);
}

#[test]
fn rotate_starts_with_the_speed_opcode_pair_for_every_port() {
    for port in [
        MotorPort::A,
        MotorPort::B,
        MotorPort::C,
        MotorPort::D,
        MotorPort::All,
    ] {
        let (brick, log) = scripted(vec![]);
        Motor::large(&brick, port).rotate(25).unwrap();
        let log = log.borrow();
        assert_eq!(&log.ops(0)[..2], &[0xA5, 0x00]);
        assert_eq!(log.ops(0)[2], port.mask());
    }
}

#[test]
fn stop_coasts_the_motor() {
    let (brick, log) = scripted(vec![]);
    Motor::large(&brick, MotorPort::B).stop().unwrap();
    assert_eq!(log.borrow().ops(0), &[0xA3, 0x00, 0x02, 0x00]);
}

#[test]
fn registry_conflict_keeps_the_second_motor() {
    let (brick, _log) = scripted(vec![]);
    let _first = Motor::large(&brick, MotorPort::B);
    let _second = Motor::medium(&brick, MotorPort::B);
    assert_eq!(brick.motor(MotorPort::B), Some(MotorKind::Medium));
}

#[test]
fn rotation_sends_the_read_twice_and_decodes_the_second_reply() {
    let (brick, log) = scripted(vec![float_buffer(&[90.5])]);
    let motor = Motor::large(&brick, MotorPort::A);
    assert_eq!(motor.rotation().unwrap(), 90.5);

    let log = log.borrow();
    assert_eq!(log.calls.len(), 2);
    assert_eq!(log.ops(0), log.ops(1));
    assert_eq!(log.reply_len(0), 0); // priming send, no reply
    assert_eq!(log.reply_len(1), 4);
    // READY_SI on input 16, large-motor type, mode 0, one value into slot 0
    assert_eq!(
        log.ops(1),
        &[0x99, 0x1D, 0x00, 0x10, 0x07, 0x00, 0x01, 0x60]
    );
}

#[test]
fn rotation_on_the_all_port_is_a_configuration_error() {
    let (brick, _log) = scripted(vec![]);
    let motor = Motor::large(&brick, MotorPort::All);
    assert!(matches!(
        motor.rotation(),
        Err(DeviceError::UnreadablePort(MotorPort::All))
    ));
}

#[test]
fn rotation_duration_reproduces_the_open_loop_formula() {
    let (brick, _log) = scripted(vec![]);
    let motor = Motor::large(&brick, MotorPort::A);
    let duration = motor.rotation_duration(50, 180.0).unwrap();
    // 180 / ((50/100 * 170) * 6) seconds
    assert!((duration.as_secs_f32() - 180.0 / 510.0).abs() < 1e-6);
}

#[test]
fn rotation_math_without_max_rpm_is_a_configuration_error() {
    let (brick, _log) = scripted(vec![]);
    let motor = Motor::generic(&brick, MotorPort::A);
    assert!(matches!(
        motor.rotation_duration(50, 180.0),
        Err(DeviceError::MaxRpmNotSet)
    ));
}

#[test]
fn rotation_math_rejects_unusable_speed_angle_pairs() {
    let (brick, _log) = scripted(vec![]);
    let motor = Motor::large(&brick, MotorPort::A);

    // zero speed never covers the angle
    assert!(matches!(
        motor.rotation_duration(0, 180.0),
        Err(DeviceError::InvalidRotationTime { .. })
    ));
    // opposing signs would give a negative run time
    assert!(matches!(
        motor.rotation_duration(50, -90.0),
        Err(DeviceError::InvalidRotationTime { .. })
    ));
    assert!(matches!(
        motor.rotation_duration(-50, 90.0),
        Err(DeviceError::InvalidRotationTime { .. })
    ));
    // matching signs are a backwards rotation over a positive time
    let duration = motor.rotation_duration(-50, -90.0).unwrap();
    assert!((duration.as_secs_f32() - 90.0 / 510.0).abs() < 1e-6);
}

#[test]
fn color_sensor_reads_mode_two_and_maps_codes() {
    let (brick, log) = scripted(vec![
        float_buffer(&[0.0]),
        float_buffer(&[7.0]),
        float_buffer(&[8.0]),
    ]);
    let sensor = ColorSensor::attach(&brick, SensorPort::One);

    assert_eq!(sensor.color().unwrap(), Color::NoColor);
    assert_eq!(sensor.color().unwrap(), Color::Brown);
    assert!(matches!(sensor.color(), Err(DeviceError::UnknownColor(8))));

    let log = log.borrow();
    // READY_SI on port 0, color type 29, mode 2, one value into slot 0
    assert_eq!(
        log.ops(0),
        &[0x99, 0x1D, 0x00, 0x00, 0x1D, 0x02, 0x01, 0x60]
    );
    assert_eq!(log.reply_len(0), 4);
}

#[test]
fn color_sensor_truncates_fractional_codes() {
    let (brick, _log) = scripted(vec![float_buffer(&[3.9])]);
    let sensor = ColorSensor::attach(&brick, SensorPort::Two);
    assert_eq!(sensor.color().unwrap(), Color::Green);
}

#[test]
fn touch_sensor_modes() {
    let (brick, log) = scripted(vec![float_buffer(&[1.0]), float_buffer(&[42.0])]);
    let sensor = TouchSensor::attach(&brick, SensorPort::Four);

    assert!(sensor.is_pressed().unwrap());
    assert_eq!(sensor.press_count().unwrap(), 42);

    let log = log.borrow();
    // port 3, touch type 16, mode 0 then mode 1
    assert_eq!(
        log.ops(0),
        &[0x99, 0x1D, 0x00, 0x03, 0x10, 0x00, 0x01, 0x60]
    );
    assert_eq!(log.ops(1)[5], 0x01);
}

#[test]
fn beacon_buttons_explode_chord_codes() {
    let (brick, _log) = scripted(vec![
        float_buffer(&[5.0, 0.0, 0.0, 0.0]),
        float_buffer(&[9.0, 0.0, 0.0, 0.0]),
        float_buffer(&[0.0, 0.0, 0.0, 0.0]),
    ]);
    let sensor = InfraredSensor::attach(&brick, SensorPort::Three);

    assert_eq!(
        sensor.beacon_buttons(BeaconChannel::One).unwrap(),
        vec![BeaconButton::RedUpper, BeaconButton::BlueUpper]
    );
    assert_eq!(
        sensor.beacon_buttons(BeaconChannel::One).unwrap(),
        vec![BeaconButton::Beacon]
    );
    assert_eq!(sensor.beacon_buttons(BeaconChannel::One).unwrap(), vec![]);
}

#[test]
fn beacon_buttons_select_the_requested_channel() {
    let (brick, log) = scripted(vec![float_buffer(&[0.0, 0.0, 3.0, 0.0])]);
    let sensor = InfraredSensor::attach(&brick, SensorPort::One);
    assert_eq!(
        sensor.beacon_buttons(BeaconChannel::Three).unwrap(),
        vec![BeaconButton::BlueUpper]
    );
    // four floats reserved: one chord code per channel
    assert_eq!(log.borrow().reply_len(0), 16);
}

#[test]
fn beacon_proximity_reads_the_seeker_pairs() {
    let (brick, log) = scripted(vec![int_buffer(&[0, 0, -12, 45, 0, 0, 0, 0])]);
    let sensor = InfraredSensor::attach(&brick, SensorPort::One);
    assert_eq!(
        sensor.beacon_proximity(BeaconChannel::Two).unwrap(),
        (-12, 45)
    );

    let log = log.borrow();
    // READY_RAW, infrared type 33, seeker mode 1, eight values
    assert_eq!(&log.ops(0)[..7], &[0x99, 0x1C, 0x00, 0x00, 0x81, 33, 0x01]);
    assert_eq!(log.reply_len(0), 32);
}

#[test]
fn brick_name_decodes_a_fixed_sixteen_byte_string() {
    let mut name = b"ev3dev\0".to_vec();
    name.resize(16, 0xAA); // garbage after the terminator must be ignored
    let (brick, log) = scripted(vec![name]);

    assert_eq!(brick.brick_name().unwrap(), "ev3dev");

    let log = log.borrow();
    assert_eq!(log.ops(0), &[0xD3, 0x0D, 0x10, 0x60]);
    assert_eq!(log.reply_len(0), 16);
}

#[test]
fn status_light_sends_the_pattern_for_color_and_effect() {
    let (brick, log) = scripted(vec![]);
    brick
        .set_status_light(LightColor::Red, LightEffect::Pulse)
        .unwrap();
    assert_eq!(log.borrow().ops(0), &[0x82, 0x1B, 0x08]);
}

#[test]
fn play_tone_passes_operands_through_untouched() {
    let (brick, log) = scripted(vec![]);
    brick.play_tone(20, 440, 1000).unwrap();
    assert_eq!(
        log.borrow().ops(0),
        &[0x94, 0x01, 0x14, 0x82, 0xB8, 0x01, 0x82, 0xE8, 0x03]
    );
}

#[test]
fn out_of_range_volume_is_not_validated() {
    let (brick, log) = scripted(vec![]);
    brick.play_tone(250, 100, 100).unwrap();
    // 250 passes through as a two-byte tagged constant
    assert_eq!(&log.borrow().ops(0)[2..4], &[0x82, 250]);
}

#[test]
fn closing_the_brick_stops_every_registered_motor_once() {
    let (brick, log) = scripted(vec![]);
    let _a = Motor::large(&brick, MotorPort::A);
    let _c = Motor::medium(&brick, MotorPort::C);

    brick.close();
    brick.close(); // second close must not stop motors again

    let log = log.borrow();
    assert_eq!(log.calls.len(), 2);
    let mut masks: Vec<u8> = log.calls.iter().map(|(ops, _)| ops[2]).collect();
    masks.sort_unstable();
    assert_eq!(masks, vec![MotorPort::A.mask(), MotorPort::C.mask()]);
    for (ops, reply_len) in &log.calls {
        assert_eq!(ops[0], 0xA3);
        assert_eq!(*reply_len, 0);
    }
}

#[test]
fn dropping_the_last_handle_stops_motors() {
    let (brick, log) = scripted(vec![]);
    let motor = Motor::large(&brick, MotorPort::D);
    drop(brick);
    assert!(log.borrow().calls.is_empty()); // motor handle still alive
    drop(motor);

    let log = log.borrow();
    assert_eq!(log.calls.len(), 1);
    assert_eq!(log.ops(0), &[0xA3, 0x00, 0x08, 0x00]);
}

#[test]
fn stop_failures_during_close_do_not_abort_the_sweep() {
    /// Fails every send.
    struct FailingTransport {
        calls: Rc<RefCell<usize>>,
    }

    impl Transport for FailingTransport {
        fn send_direct_command(
            &mut self,
            _ops: &[u8],
            _reply_len: u16,
        ) -> Result<Vec<u8>, ProtocolError> {
            *self.calls.borrow_mut() += 1;
            Err(ProtocolError::SerialError("gone".into()))
        }
    }

    let calls = Rc::new(RefCell::new(0));
    let brick = Brick::with_transport(Box::new(FailingTransport {
        calls: Rc::clone(&calls),
    }));
    let _a = Motor::large(&brick, MotorPort::A);
    let _b = Motor::large(&brick, MotorPort::B);

    brick.close();
    assert_eq!(*calls.borrow(), 2); // both stops attempted despite failures
}
