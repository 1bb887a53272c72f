/// Mutable, user-level settings shared with command handlers.
///
/// - `log_level`: the value read and written by the `log` command.
/// - `should_exit`: set by `exit`; the run loop checks it after every byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub log_level: u32,
    pub should_exit: bool,
}

impl Environment {
    pub fn new(log_level: u32) -> Self {
        Self {
            log_level,
            should_exit: false,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use crate::env::Environment;

    #[test]
    fn test_env_defaults() {
        let env = Environment::default();
        assert_eq!(env.log_level, 1);
        assert!(!env.should_exit);
    }
}
