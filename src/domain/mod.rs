//! Domain Layer
//!
//! Types and ports shared by every pipeline step, without I/O of their own.
//!
//! ## Structure
//!
//! - `entities/` - Workspace layout and the produced artifacts
//! - `value_objects/` - Tool commands, externals bundle, modes
//! - `ports/` - Interfaces implemented by the infrastructure layer

pub mod entities;
pub mod ports;
pub mod value_objects;
