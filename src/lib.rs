//! Workspace test host. The cross-crate integration tests live in `tests/`.
