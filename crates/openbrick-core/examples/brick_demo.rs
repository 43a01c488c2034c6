//! Connect to a brick, read its name, blink the status light, play a
//! tone, and spin a motor.
//!
//! Usage: `cargo run --example brick_demo -- /dev/rfcomm0`

use std::time::Duration;

use anyhow::Result;
use openbrick_core::brick::{Brick, LightColor, LightEffect};
use openbrick_core::motor::Motor;
use openbrick_core::ports::MotorPort;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let device = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/rfcomm0".to_string());

    let brick = Brick::bluetooth(&device)?;
    println!("connected to '{}'", brick.brick_name()?);

    brick.set_status_light(LightColor::Green, LightEffect::Pulse)?;
    brick.play_tone(20, 440, 500)?;

    let motor = Motor::large(&brick, MotorPort::A);
    motor.rotate_for_time(30, Duration::from_secs(1))?;
    println!("motor position: {:.1} degrees", motor.rotation()?);

    brick.set_status_light(LightColor::Off, LightEffect::Solid)?;
    brick.close();
    Ok(())
}
