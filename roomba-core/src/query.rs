//! On-demand sensor queries
//!
//! A query writes the sensor opcode and id, waits for the robot to answer,
//! then reads exactly the number of bytes the sensor table gives for that id.
//! A short reply is a timeout; partial data is never returned.

use roomba_hal::{ByteChannel, Clock, OutputPin};
use roomba_protocol::sensor::MAX_SENSOR_LEN;
use roomba_protocol::{Command, DecodeError, SensorBytes, SensorId, SensorValue};

use crate::error::OiError;
use crate::link::OpenInterface;

impl<C, P, K> OpenInterface<C, P, K>
where
    C: ByteChannel,
    P: OutputPin,
    K: Clock,
{
    /// Query one sensor and return its raw reply
    pub fn query_sensor(&mut self, id: SensorId) -> Result<SensorBytes, OiError> {
        self.send(&Command::QuerySensor(id))?;
        self.clock.delay_ms(self.config.query_settle_ms);

        let mut raw = [0u8; MAX_SENSOR_LEN];
        let reply = &mut raw[..id.len()];
        if let Err(e) = self.read_exact(reply, self.config.query_timeout_ms) {
            debug!("Sensor {} reply timed out", id.to_byte());
            return Err(e);
        }

        SensorBytes::from_slice(reply).map_err(|_| OiError::Decode(DecodeError::LengthMismatch))
    }

    /// Query one sensor and decode it
    pub fn read_sensor(&mut self, id: SensorId) -> Result<SensorValue, OiError> {
        let bytes = self.query_sensor(id)?;
        Ok(id.decode(&bytes)?)
    }

    /// Battery voltage in millivolts
    pub fn battery_voltage(&mut self) -> Result<u16, OiError> {
        match self.read_sensor(SensorId::Voltage)? {
            SensorValue::Unsigned16(mv) => Ok(mv),
            _ => Err(OiError::Decode(DecodeError::LengthMismatch)),
        }
    }

    /// Battery current in milliamps, negative while discharging
    pub fn battery_current(&mut self) -> Result<i16, OiError> {
        match self.read_sensor(SensorId::Current)? {
            SensorValue::Signed16(ma) => Ok(ma),
            _ => Err(OiError::Decode(DecodeError::LengthMismatch)),
        }
    }

    /// Whether the wall sensor sees a wall
    pub fn wall_detected(&mut self) -> Result<bool, OiError> {
        Ok(self.read_sensor(SensorId::Wall)?.is_set())
    }

    /// Whether either bumper is pressed
    pub fn bumper_pressed(&mut self) -> Result<bool, OiError> {
        Ok(self.read_sensor(SensorId::BumpsWheelDrops)?.bumper_pressed())
    }
}
