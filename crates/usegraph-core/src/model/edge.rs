//! Data and control links between module ports.

use serde::Serialize;

use crate::identifier::Id;

/// Kind of link an [`Edge`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    Data,
    Control,
}

impl EdgeKind {
    /// Short lowercase name used inside edge identifiers.
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Data => "data",
            EdgeKind::Control => "control",
        }
    }
}

/// A directed link between two node ports.
///
/// `source_handle` and `target_handle` follow the `<PortClass>:<portId>`
/// convention from [`handle`](crate::model::handle), so the renderer can
/// address a port without consulting the module data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    id: Id,
    kind: EdgeKind,
    source: Id,
    source_handle: String,
    target: Id,
    target_handle: String,
}

impl Edge {
    pub fn new(
        id: Id,
        kind: EdgeKind,
        (source, source_handle): (Id, String),
        (target, target_handle): (Id, String),
    ) -> Self {
        Self {
            id,
            kind,
            source,
            source_handle,
            target,
            target_handle,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn source_handle(&self) -> &str {
        &self.source_handle
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn target_handle(&self) -> &str {
        &self.target_handle
    }
}
