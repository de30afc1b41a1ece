//! Module ports and renderer handle identifiers.

use std::fmt;

use serde::Serialize;

/// Direction of a data port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PortIoType {
    Input,
    Output,
}

/// A data port on a module.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPort {
    id: i64,
    name: String,
    port_io_type: PortIoType,
    #[serde(skip_serializing_if = "Option::is_none")]
    port_type: Option<String>,
}

impl DataPort {
    pub fn new(id: i64, name: impl Into<String>, port_io_type: PortIoType) -> Self {
        Self {
            id,
            name: name.into(),
            port_io_type,
            port_type: None,
        }
    }

    /// Sets the `Static`/`Dynamic` port class reported by the input.
    pub fn with_port_type(mut self, port_type: Option<String>) -> Self {
        self.port_type = port_type;
        self
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn port_io_type(&self) -> PortIoType {
        self.port_io_type
    }

    pub fn port_type(&self) -> Option<&str> {
        self.port_type.as_deref()
    }

    /// Returns the renderer handle addressing this port.
    pub fn handle(&self) -> String {
        handle::data(self.id)
    }
}

/// A named intent carried by a control port.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intent {
    id: i64,
    name: String,
}

impl Intent {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A control port on a module. Control ports may act as either link endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlPort {
    id: i64,
    name: String,
    intents: Vec<Intent>,
    #[serde(rename = "portType", skip_serializing_if = "Option::is_none")]
    port_type: Option<String>,
}

impl ControlPort {
    pub fn new(id: i64, name: impl Into<String>, intents: Vec<Intent>) -> Self {
        Self {
            id,
            name: name.into(),
            intents,
            port_type: None,
        }
    }

    pub fn with_port_type(mut self, port_type: Option<String>) -> Self {
        self.port_type = port_type;
        self
    }

    pub fn port_type(&self) -> Option<&str> {
        self.port_type.as_deref()
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }
}

/// Port class prefix used in handle identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortClass {
    Data,
    Control,
}

impl fmt::Display for PortClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortClass::Data => write!(f, "Data"),
            PortClass::Control => write!(f, "Control"),
        }
    }
}

/// Handle identifiers of the form `<PortClass>:<portId>`.
///
/// Control handles carry a `-source` or `-target` suffix because a control
/// port can sit on either end of a link.
///
/// # Examples
///
/// ```
/// use usegraph_core::model::handle;
///
/// assert_eq!(handle::data(4), "Data:4");
/// assert_eq!(handle::control_source(9), "Control:9-source");
/// assert_eq!(handle::control_target(9), "Control:9-target");
/// ```
pub mod handle {
    use super::PortClass;

    /// Bare handle for a port of the given class.
    pub fn make(class: PortClass, port_id: i64) -> String {
        format!("{class}:{port_id}")
    }

    pub fn data(port_id: i64) -> String {
        make(PortClass::Data, port_id)
    }

    pub fn control_source(port_id: i64) -> String {
        format!("{}-source", make(PortClass::Control, port_id))
    }

    pub fn control_target(port_id: i64) -> String {
        format!("{}-target", make(PortClass::Control, port_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_port_handle() {
        let port = DataPort::new(12, "out", PortIoType::Output);
        assert_eq!(port.handle(), "Data:12");
        assert_eq!(port.port_io_type(), PortIoType::Output);
    }

    #[test]
    fn test_data_port_serializes_camel_case() {
        let port = DataPort::new(1, "in", PortIoType::Input);
        let json = serde_json::to_value(&port).unwrap();
        assert_eq!(json["portIoType"], "Input");
        assert_eq!(json["name"], "in");
        assert!(json.get("portType").is_none());

        let port = port.with_port_type(Some("Static".to_string()));
        let json = serde_json::to_value(&port).unwrap();
        assert_eq!(json["portType"], "Static");
    }

    #[test]
    fn test_control_port_intents() {
        let port = ControlPort::new(3, "ctrl", vec![Intent::new(1, "gain"), Intent::new(2, "mute")]);
        let names: Vec<_> = port.intents().iter().map(Intent::name).collect();
        assert_eq!(names, ["gain", "mute"]);

        let json = serde_json::to_value(&port).unwrap();
        assert!(json.get("portType").is_none());
        let json = serde_json::to_value(port.with_port_type(Some("Dynamic".to_string()))).unwrap();
        assert_eq!(json["portType"], "Dynamic");
    }
}
