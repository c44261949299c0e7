use std::time::Duration;

/// Compiled-in console settings.
///
/// ```rust,ignore
/// let config = ConsoleConfig {
///     welcome: "hello".into(),
///     ..ConsoleConfig::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Time between two revealed characters (default: 30ms).
    pub tick: Duration,
    /// Banner revealed on mount.
    pub welcome: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(30),
            welcome: "Welcome! Please type 'help' to get started".to_string(),
        }
    }
}
