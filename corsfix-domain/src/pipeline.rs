use crate::error::PipelineError;
use crate::helper::CorsHelper;
use crate::steps::{Step, builtin_steps};
use corsfix_types::step::{StepId, StepRecord};
use tracing::debug;

/// Result of running every step over one handler text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub text: String,
    pub steps: Vec<StepRecord>,
}

impl Transformed {
    /// Steps that rewrote something, in pipeline order.
    pub fn applied(&self) -> Vec<StepId> {
        self.steps
            .iter()
            .filter(|r| r.outcome.is_applied())
            .map(|r| r.step)
            .collect()
    }

    /// Steps that were needed but could not find their anchor.
    pub fn missed(&self) -> Vec<StepId> {
        self.steps
            .iter()
            .filter(|r| r.outcome.is_missed())
            .map(|r| r.step)
            .collect()
    }
}

/// The ordered, individually gated transformation steps.
pub struct Pipeline {
    helper: CorsHelper,
    steps: Vec<Box<dyn Step>>,
}

impl Pipeline {
    pub fn new(helper: CorsHelper) -> Result<Self, PipelineError> {
        helper.validate()?;
        let steps = builtin_steps(&helper)?;
        Ok(Self { helper, steps })
    }

    pub fn helper(&self) -> &CorsHelper {
        &self.helper
    }

    pub fn step_ids(&self) -> Vec<StepId> {
        self.steps.iter().map(|s| s.id()).collect()
    }

    pub fn transform(&self, original: &str) -> Transformed {
        let mut text = original.to_string();
        let mut records = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let outcome = step.apply(&mut text);
            debug!(step = %step.id(), ?outcome, "step evaluated");
            records.push(StepRecord {
                step: step.id(),
                outcome,
            });
        }

        Transformed {
            text,
            steps: records,
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("helper", &self.helper)
            .field("steps", &self.step_ids())
            .finish()
    }
}
