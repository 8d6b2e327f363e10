use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Unknown plan identifier '{0}'")]
    UnknownPlan(String),

    #[error("Unknown subscription status '{0}'")]
    UnknownStatus(String),

    #[error("Unknown resource kind '{0}'")]
    UnknownResource(String),
}

impl PlanError {
    /// Plan and status identifiers come from storage, so an unknown value
    /// there means the deployment itself is misconfigured.
    pub fn is_configuration(&self) -> bool {
        matches!(self, PlanError::UnknownPlan(_) | PlanError::UnknownStatus(_))
    }
}
