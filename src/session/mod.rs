// Practice session orchestration

mod controller;

pub use controller::{PracticeSession, SessionConfig, SessionDeps, SessionError};
