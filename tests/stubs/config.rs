#![allow(dead_code)]

pub const SENSORS_TEMPLATE: &str = r#"
[
    {"label": "TempSensor1", "ip": "127.0.0.1", "port": {PORT}, "length": 1, "type": "sensor"},
    {"label": "Valve", "ip": "127.0.0.1", "port": {PORT}, "register_address": 3, "valor": 1, "start_time": "08:00", "type": "actuator"}
]
"#;

pub const SCHEDULE_VALID: &str = r#"
[
    {"label": "Pump", "ip": "192.168.1.200", "port": 502, "register_address": 10, "valor": 1, "start_time": "06:00"},
    {"label": "Pump", "ip": "192.168.1.200", "port": 502, "register_address": 10, "valor": 0, "start_time": "18:30"}
]
"#;

pub const SCHEDULE_WITH_BAD_ENTRY: &str = r#"
[
    {"label": "Pump", "ip": "192.168.1.200", "port": 502, "register_address": 10, "valor": 1, "start_time": "06:00"},
    {"label": "Heater", "ip": "192.168.1.202", "port": 502, "register_address": 10, "valor": 1}
]
"#;

pub const SCHEDULE_EMPTY: &str = "[]";

pub const INVALID_JSON: &str = "blah";

pub fn sensors_on_port(port: u16) -> String {
    SENSORS_TEMPLATE.replace("{PORT}", &port.to_string())
}

/// A single event for a local actuator
pub fn schedule_event_at(start_time: &str, port: u16) -> String {
    format!(
        r#"[{{"label": "Light1", "ip": "127.0.0.1", "port": {}, "register_address": 10, "valor": 1, "start_time": "{}"}}]"#,
        port, start_time
    )
}
