use std::fmt::Display;

use crate::common::escape_html;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BoundaryState {
    #[default]
    Healthy,
    Failed {
        message: String,
    },
}

/// Wraps rendering of a fragment. After the first failure it keeps showing
/// the fallback until `reset` is called.
#[derive(Debug, Default)]
pub struct ErrorBoundary {
    state: BoundaryState,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    pub fn has_failed(&self) -> bool {
        matches!(self.state, BoundaryState::Failed { .. })
    }

    pub fn render<E: Display>(
        &mut self,
        render: impl FnOnce() -> Result<String, E>,
    ) -> String {
        if self.has_failed() {
            return self.fallback();
        }

        match render() {
            Ok(html) => html,
            Err(e) => {
                log::error!("Render failed: {}", e);
                self.state = BoundaryState::Failed {
                    message: e.to_string(),
                };
                self.fallback()
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = BoundaryState::Healthy;
    }

    fn fallback(&self) -> String {
        let message = match &self.state {
            BoundaryState::Failed { message } => escape_html(message),
            BoundaryState::Healthy => String::new(),
        };
        format!(
            r#"<section class="error-boundary" role="alert"><h2>Something went wrong</h2><p>{message}</p><a href="">Try again</a></section>"#
        )
    }
}
