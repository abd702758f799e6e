//! Error types for the tally subsystem.

use livepoll_types::OptionId;

/// Errors produced by tally mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TallyError {
    /// The target option is not part of the configured option set.
    ///
    /// The request/response surface reports this to the caller as a client
    /// error; the push surface drops the offending frame silently. In both
    /// cases no state changes.
    #[error("invalid option: {0}")]
    InvalidOption(OptionId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_option_names_the_offender() {
        let err = TallyError::InvalidOption(OptionId::from("option9"));
        assert_eq!(err.to_string(), "invalid option: option9");
    }
}
