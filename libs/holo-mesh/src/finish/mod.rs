//! # Mesh Finishing
//!
//! Best-effort cleanup applied after construction. Each [`FinishStep`] maps
//! a mesh to a new mesh; a step that fails, or returns a mesh that breaks the
//! UV/index invariants, is skipped with a [`Diagnostic`] and the previous
//! mesh carries on. Finishing therefore never fails.
//!
//! Default order:
//! 1. [`Cleanup`]: drop degenerate, duplicate and non-finite geometry
//! 2. [`FixWinding`]: consistent outward winding
//! 3. [`LaplacianSmooth`]: umbrella smoothing with volume restore
//! 4. [`Recenter`]: bounding-box centre to the origin

mod center;
mod cleanup;
mod smooth;
mod winding;

#[cfg(test)]
mod tests;

pub use center::Recenter;
pub use cleanup::Cleanup;
pub use smooth::LaplacianSmooth;
pub use winding::FixWinding;

use crate::diagnostic::Diagnostic;
use crate::error::MeshResult;
use crate::mesh::Mesh;
use config::FinishConfig;
use log::{debug, warn};

/// One independent finishing transformation.
pub trait FinishStep: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Produces the transformed mesh. The input is left untouched.
    fn apply(&self, mesh: &Mesh) -> MeshResult<Mesh>;
}

/// Finished mesh plus a diagnostic for every skipped step.
#[derive(Debug, Clone)]
pub struct FinishOutput {
    pub mesh: Mesh,
    pub diagnostics: Vec<Diagnostic>,
}

/// An ordered list of finishing steps.
#[derive(Default)]
pub struct Finisher {
    steps: Vec<Box<dyn FinishStep>>,
}

impl Finisher {
    /// A finisher with no steps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    pub fn with_step(mut self, step: impl FinishStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// The standard sequence. Smoothing is included only when `smooth` is set
    /// and the configuration asks for at least one iteration.
    pub fn standard(config: &FinishConfig, smooth: bool) -> Self {
        let mut finisher = Self::new().with_step(Cleanup).with_step(FixWinding);
        if smooth && config.smoothing_iterations > 0 {
            finisher = finisher.with_step(LaplacianSmooth::from(config));
        }
        finisher.with_step(Recenter)
    }

    /// Names of the configured steps, in order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Runs every step, keeping the prior mesh whenever one fails.
    pub fn run(&self, mesh: Mesh) -> FinishOutput {
        let mut current = mesh;
        let mut diagnostics = Vec::new();

        for step in &self.steps {
            let result = step
                .apply(&current)
                .and_then(|next| next.check_invariants().map(|()| next));
            match result {
                Ok(next) => {
                    debug!(
                        "finish step {}: {} -> {} triangles",
                        step.name(),
                        current.triangle_count(),
                        next.triangle_count()
                    );
                    current = next;
                }
                Err(err) => {
                    warn!("finish step {} skipped: {err}", step.name());
                    diagnostics.push(Diagnostic::warning(step.name(), err.to_string()));
                }
            }
        }

        FinishOutput {
            mesh: current,
            diagnostics,
        }
    }
}

impl std::fmt::Debug for Finisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Finisher")
            .field("steps", &self.step_names())
            .finish()
    }
}
