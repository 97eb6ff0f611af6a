// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment detection capability.

/// Reports facts about the hosting environment.
pub trait Environment: Send + Sync {
    /// True when the application is itself running embedded as a plugin of
    /// another host. External plugin loading does not apply in that mode.
    fn is_plugin(&self) -> bool;
}

impl Environment for bool {
    fn is_plugin(&self) -> bool {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_environment_reports_itself() {
        assert!(true.is_plugin());
        assert!(!false.is_plugin());
    }
}
