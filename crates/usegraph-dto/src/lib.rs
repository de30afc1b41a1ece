//! Decoding of audio use case component documents.
//!
//! A use case arrives from the backend as JSON: one document object, or an
//! array of them, holding `moduleInstances`, `subsystems`, `dataLinks` and
//! `controlLinks`. The input is untrusted. [`decode_value`] coerces whatever
//! it is given into a [`UsecaseDto`] and records each substitution as a
//! [`Diagnostic`](error::Diagnostic); [`validate`] reports data-quality
//! findings on the result.
//!
//! ```
//! use usegraph_dto::decode_str;
//!
//! let decoded = decode_str(r#"{
//!     "moduleInstances": [
//!         {"id": 1, "name": "src", "containerId": 1, "subgraphId": 1},
//!         {"id": 2, "name": "sink", "containerId": 1, "subgraphId": 1}
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(decoded.dto.module_instances.len(), 2);
//! assert!(decoded.diagnostics.is_empty());
//! ```

pub mod error;

mod decode;
mod dto;
mod validate;

pub use decode::{Decoded, decode_str, decode_value};
pub use dto::{
    ControlPortDto, DataPortDto, IntentDto, LinkDto, ModuleInstanceDto, PortIoTypeDto,
    SubsystemDto, UsecaseDto,
};
pub use error::{DecodeError, Diagnostic, ErrorCode, Severity};
pub use validate::validate;
