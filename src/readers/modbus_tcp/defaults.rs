pub const UNIT_ID: u8 = 1;
/// Sensors are always read from the first holding register
pub const READ_START_REGISTER: u16 = 0;
