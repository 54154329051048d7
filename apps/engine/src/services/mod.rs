//! Services: session lifecycle and turn orchestration over injected handles.

pub mod session;
pub mod turn_flow;
