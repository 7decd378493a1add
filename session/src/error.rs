use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot {action} while the session is {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}
