//! Process-level setup for hosts embedding the pipeline.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use longform_domain::GenerationError;

/// Install the `tracing` subscriber.
///
/// `RUST_LOG` is honoured; `longform=info` is added on top. Calling this twice
/// is harmless: only the first subscriber sticks.
pub fn init_tracing() -> Result<(), GenerationError> {
    let directive = "longform=info"
        .parse()
        .map_err(|e| GenerationError::Configuration(format!("tracing directive: {e}")))?;

    if let Err(e) = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(directive))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()
    {
        // A global subscriber is already installed; it keeps receiving events.
        tracing::debug!(error = %e, "tracing subscriber already set");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        assert!(init_tracing().is_ok());
        assert!(init_tracing().is_ok());
    }
}
